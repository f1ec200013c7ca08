use crate::backend::MockBackend;
use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::{dispatch, Handler as TerminalEventHandler};
use crate::state::{Snapshot, State};
use crate::ui;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        info!("Starting application...");
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        println!("{}", ui::help_text());
        let mut state = State::new(config.password_policy);
        state.subscribe(Box::new(|snapshot: &Snapshot| println!("{}", ui::render(snapshot))));
        let mut app = App {
            state: Arc::new(Mutex::new(state)),
            config,
        };
        app.start_network(rx)?;
        app.start_ui(tx).await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations. Every
    /// submission runs on its own task so a slow one never delays the next.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;
        let cloned_state = Arc::clone(&self.state);
        let backend = Arc::new(MockBackend::from_config(&self.config));
        let success_hold = self.config.success_hold_ms.clone();
        std::thread::spawn(move || {
            while let Ok(network_event) = net_receiver.recv() {
                let state = Arc::clone(&cloned_state);
                let backend = Arc::clone(&backend);
                let success_hold = success_hold.clone();
                runtime.spawn(async move {
                    let mut network_event_handler =
                        NetworkEventHandler::new(&state, backend, success_hold);
                    if let Err(e) = network_event_handler.handle(network_event).await {
                        error!("Failed to handle network event: {}", e);
                    }
                });
            }
            debug!("Network event channel closed.");
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread, then apply each
    /// intent to the state on the main task. Return the result following an
    /// exit request, closed input, or unrecoverable error.
    ///
    async fn start_ui(&mut self, net_sender: NetworkEventSender) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let intent = tokio::task::block_in_place(|| terminal_event_handler.next_intent())?;
            let Some(intent) = intent else {
                debug!("Input closed, waiting for the current submission...");
                wait_for_submission(&self.state).await;
                break;
            };
            let mut state = self.state.lock().await;
            if !dispatch(intent, &mut state, &net_sender)? {
                break;
            }
        }
        Ok(())
    }
}

/// Wait until the active screen accepts a new submit, which means any
/// submission in flight has failed or run its completion.
///
async fn wait_for_submission(state: &Arc<Mutex<State>>) {
    while !state.lock().await.phase().accepts_submit() {
        tokio::time::sleep(SETTLE_POLL_INTERVAL).await;
    }
}
