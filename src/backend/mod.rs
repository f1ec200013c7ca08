//! Authentication backend integration point.
//!
//! The real payments backend is not wired in yet; `MockBackend` stands in for
//! it with simulated latency, sentinel addresses and injected failures.

mod error;
mod outcome;
mod resource;

pub use error::{coerce, SubmissionError};
pub use outcome::{FixedOutcome, OutcomeProvider, RandomOutcome};
pub use resource::*;

use crate::config::Config;
use crate::state::FormKind;
use anyhow::{anyhow, Result};
use log::*;
use std::future::Future;
use std::time::Duration;

/// Address for which password reset reports an unknown account.
///
pub const DEFAULT_UNKNOWN_EMAIL: &str = "unknown@example.com";

/// Address for which sign-up reports an existing account.
///
pub const DEFAULT_EXISTING_EMAIL: &str = "existing@example.com";

/// Contract of the service that performs login, sign-up and password reset.
///
/// Domain failures are returned as `SubmissionError` inside the `anyhow`
/// error; any other error is treated as a network failure by the caller.
pub trait AuthBackend: Send + Sync {
    fn submit(&self, request: AuthRequest) -> impl Future<Output = Result<()>> + Send;
}

/// Simulates the authentication service.
///
pub struct MockBackend {
    latency: Duration,
    unknown_email: String,
    existing_email: String,
    outcome: Box<dyn OutcomeProvider>,
}

impl MockBackend {
    /// Returns a new instance with no latency and the default sentinels.
    ///
    pub fn new(outcome: Box<dyn OutcomeProvider>) -> Self {
        MockBackend {
            latency: Duration::ZERO,
            unknown_email: DEFAULT_UNKNOWN_EMAIL.to_string(),
            existing_email: DEFAULT_EXISTING_EMAIL.to_string(),
            outcome,
        }
    }

    /// Returns a new instance matching the configuration.
    ///
    pub fn from_config(config: &Config) -> Self {
        let outcome: Box<dyn OutcomeProvider> = match config.seed {
            Some(seed) => Box::new(RandomOutcome::seeded(config.failure_probability, seed)),
            None => Box::new(RandomOutcome::new(config.failure_probability)),
        };
        MockBackend::new(outcome)
            .with_latency(Duration::from_millis(config.submit_delay_ms))
            .with_sentinels(&config.unknown_email, &config.existing_email)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_sentinels(mut self, unknown_email: &str, existing_email: &str) -> Self {
        self.unknown_email = unknown_email.to_string();
        self.existing_email = existing_email.to_string();
        self
    }
}

impl AuthBackend for MockBackend {
    fn submit(&self, request: AuthRequest) -> impl Future<Output = Result<()>> + Send {
        async move {
            debug!(
                "Simulating {:?} request for {} ({} ms)...",
                request.kind,
                request.credentials.email,
                self.latency.as_millis()
            );
            tokio::time::sleep(self.latency).await;

            let email = &request.credentials.email;
            match request.kind {
                FormKind::ForgotPassword if *email == self.unknown_email => {
                    return Err(SubmissionError::UnknownEmail {
                        email: email.clone(),
                    }
                    .into());
                }
                FormKind::SignUp if *email == self.existing_email => {
                    return Err(SubmissionError::EmailAlreadyExists {
                        email: email.clone(),
                    }
                    .into());
                }
                _ => {}
            }

            if self.outcome.should_fail() {
                return Err(anyhow!("Network error"));
            }
            Ok(())
        }
    }
}
