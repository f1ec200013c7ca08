use crate::backend::{coerce, AuthBackend, AuthRequest, SubmissionError};
use crate::config::SuccessHold;
use crate::state::{PendingSubmission, Resolution, State};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug)]
pub enum Event {
    Submit(PendingSubmission),
}

/// Specify struct for driving submissions against the backend.
///
pub struct Handler<'a, B> {
    state: &'a Arc<Mutex<State>>,
    backend: Arc<B>,
    success_hold: SuccessHold,
}

impl<'a, B> Handler<'a, B>
where
    B: AuthBackend + 'static,
{
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, backend: Arc<B>, success_hold: SuccessHold) -> Self {
        Handler {
            state,
            backend,
            success_hold,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::Submit(pending) => self.submit(pending).await?,
        }
        Ok(())
    }

    /// Take a pending submission to a terminal phase and, on success, run its
    /// completion after the success hold.
    ///
    async fn submit(&mut self, pending: PendingSubmission) -> Result<()> {
        let (activation, request, on_success) = pending.into_parts();
        let kind = request.kind;

        let outcome = self.call_backend(&request).await;
        match &outcome {
            Ok(()) => info!("{:?} request for {} succeeded.", kind, request.credentials.email),
            Err(e) => warn!("{:?} request for {} failed: {}", kind, request.credentials.email, e),
        }

        let resolution = {
            let mut state = self.state.lock().await;
            state.resolve_submission(activation, &request, outcome)
        };
        if resolution != Resolution::Succeeded {
            return Ok(());
        }

        tokio::time::sleep(self.success_hold.duration(kind)).await;

        let mut state = self.state.lock().await;
        if state.complete_submission(activation, on_success) {
            debug!("Completed {:?} submission, now on {}.", kind, state.current_route());
        }
        Ok(())
    }

    /// Run the backend call on its own task so that neither an error nor a
    /// panic can leave the submission pending.
    ///
    async fn call_backend(&self, request: &AuthRequest) -> Result<(), SubmissionError> {
        let backend = Arc::clone(&self.backend);
        let request = request.clone();
        match tokio::spawn(async move { backend.submit(request).await }).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(coerce(e)),
            Err(join_error) => {
                error!("Backend call aborted: {}", join_error);
                Err(SubmissionError::NetworkError(join_error.to_string()))
            }
        }
    }
}
