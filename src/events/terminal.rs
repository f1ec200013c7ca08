use crate::app::NetworkEventSender;
use crate::error::{AppError, AppResult};
use crate::events::network::Event as NetworkEvent;
use crate::state::{completion_for, Field, Route, State};
use crate::ui;
use anyhow::{anyhow, Result};
use log::*;
use std::io::BufRead;
use std::{sync::mpsc, thread};

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Closed,
}

/// Specify the user intents a rendering surface can deliver.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Intent {
    SetField(Field, String),
    ToggleRememberMe,
    Submit,
    Navigate(Route),
    Back,
    Dismiss,
    Clear,
    Help,
    Quit,
}

/// Parse one input line into an intent.
///
/// Field values keep everything after the first space, inner spaces included.
pub fn parse_intent(line: &str) -> AppResult<Intent> {
    let line = line.trim_start();
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest),
        None => (line.trim_end(), ""),
    };
    match command {
        "email" | "password" | "confirm" => {
            let field = command.parse::<Field>().map_err(AppError::Input)?;
            Ok(Intent::SetField(field, rest.trim_end_matches(&['\r', '\n'][..]).to_string()))
        }
        "remember" => Ok(Intent::ToggleRememberMe),
        "submit" => Ok(Intent::Submit),
        "go" => rest
            .trim()
            .parse::<Route>()
            .map(Intent::Navigate)
            .map_err(|e| AppError::Input(e.to_string())),
        "back" => Ok(Intent::Back),
        "dismiss" => Ok(Intent::Dismiss),
        "clear" => Ok(Intent::Clear),
        "help" => Ok(Intent::Help),
        "quit" | "exit" => Ok(Intent::Quit),
        other => Err(AppError::Input(format!("unknown command '{}'", other))),
    }
}

/// Apply an intent to the session. Returns result with value true if should
/// continue or false if exit was requested.
///
pub fn dispatch(intent: Intent, state: &mut State, net_sender: &NetworkEventSender) -> Result<bool> {
    debug!("Processing intent '{:?}'...", intent);
    match intent {
        Intent::SetField(field, value) => {
            state.set_field(field, value);
        }
        Intent::ToggleRememberMe => {
            if !state.toggle_remember_me() {
                warn!("Remember me is only available on the login screen.");
            }
        }
        Intent::Submit => {
            let route = state.current_route();
            if let Some(pending) = state.submit(completion_for(route)) {
                net_sender
                    .send(NetworkEvent::Submit(pending))
                    .map_err(|_| anyhow!("Network handler is no longer running"))?;
            }
        }
        Intent::Navigate(route) => {
            let current = state.current_route();
            if current.links_to(route) {
                state.navigate(route);
            } else {
                warn!("Screen {} has no link to {}.", current, route);
            }
        }
        Intent::Back => {
            state.go_back();
        }
        Intent::Dismiss => {
            state.dismiss_error();
        }
        Intent::Clear => state.clear_form(),
        Intent::Help => println!("{}", ui::help_text()),
        Intent::Quit => {
            debug!("Received application exit request.");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<String>>,
    _tx: mpsc::Sender<Event<String>>,
}

impl Handler {
    /// Return new instance after spawning new input reading thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx_clone.send(Event::Input(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            let _ = tx_clone.send(Event::Closed);
        });
        Handler { rx, _tx: tx }
    }

    /// Block until the next well-formed intent. Returns None once input is
    /// closed.
    ///
    pub fn next_intent(&self) -> Result<Option<Intent>> {
        loop {
            match self.rx.recv()? {
                Event::Input(line) if line.trim().is_empty() => continue,
                Event::Input(line) => match parse_intent(&line) {
                    Ok(intent) => return Ok(Some(intent)),
                    Err(e) => warn!("{} (type 'help' for commands)", e),
                },
                Event::Closed => return Ok(None),
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}
