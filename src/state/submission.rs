//! Submission lifecycle state.
//!
//! `Idle -> Validating -> {Idle, Pending -> {Succeeded, Failed}}`. A failed
//! submission can be dismissed back to `Idle` or retried directly.

use super::form::FormKind;
use crate::backend::{Credentials, SubmissionError};
use log::*;

/// Specifying the phases of a submission.
///
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Pending,
    Succeeded,
    Failed(SubmissionError),
}

impl Phase {
    /// Return true if a submit intent may start a new submission.
    ///
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Failed(_))
    }

    /// Return true while the loading indicator should be visible.
    ///
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Validating | Phase::Pending)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Pending => "pending",
            Phase::Succeeded => "succeeded",
            Phase::Failed(_) => "failed",
        }
    }
}

/// Tracks the phase of the current screen's submission and the message to
/// show for its outcome.
///
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Submission {
    phase: Phase,
    message: Option<String>,
}

impl Submission {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// User-visible outcome message, if any.
    ///
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Enter `Validating`. Returns false, leaving the phase untouched, when a
    /// submission is already under way or has succeeded.
    ///
    pub fn begin(&mut self) -> bool {
        if !self.phase.accepts_submit() {
            warn!("Ignoring submit while submission is {}.", self.phase.name());
            return false;
        }
        self.phase = Phase::Validating;
        true
    }

    /// Return from `Validating` to `Idle` after failed validation.
    ///
    pub fn reject(&mut self) {
        if self.phase == Phase::Validating {
            self.phase = Phase::Idle;
            self.message = None;
        }
    }

    /// Move from `Validating` to `Pending`, clearing the previous outcome.
    ///
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Validating {
            warn!("Cannot start submission from {}.", self.phase.name());
            return false;
        }
        self.phase = Phase::Pending;
        self.message = None;
        true
    }

    /// Leave `Pending` with the given outcome.
    ///
    pub fn resolve(&mut self, outcome: Result<String, SubmissionError>) -> bool {
        if self.phase != Phase::Pending {
            warn!("Ignoring outcome for submission in {}.", self.phase.name());
            return false;
        }
        match outcome {
            Ok(message) => {
                self.phase = Phase::Succeeded;
                self.message = Some(message);
            }
            Err(error) => {
                self.message = Some(error.user_message());
                self.phase = Phase::Failed(error);
            }
        }
        true
    }

    /// Close a failure dialog.
    ///
    pub fn dismiss(&mut self) -> bool {
        if let Phase::Failed(_) = self.phase {
            self.phase = Phase::Idle;
            self.message = None;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Submission::default();
    }
}

/// Return the message shown after a successful submission.
///
pub fn success_message(kind: FormKind, credentials: &Credentials) -> String {
    match kind {
        FormKind::Login if credentials.remember_me => {
            "Login successful! Your session will be remembered.".to_string()
        }
        FormKind::Login => "Login successful!".to_string(),
        FormKind::SignUp => "Your PayStell account has been created successfully!".to_string(),
        FormKind::ForgotPassword => format!(
            "We've sent a password reset link to {}. Please check your inbox and follow the instructions.",
            credentials.email
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_error() -> SubmissionError {
        SubmissionError::NetworkError("Network error".to_string())
    }

    #[test]
    fn test_successful_lifecycle() {
        let mut submission = Submission::default();
        assert_eq!(submission.phase(), &Phase::Idle);
        assert!(submission.begin());
        assert_eq!(submission.phase(), &Phase::Validating);
        assert!(submission.phase().is_loading());
        assert!(submission.start());
        assert_eq!(submission.phase(), &Phase::Pending);
        assert!(submission.resolve(Ok("done".to_string())));
        assert_eq!(submission.phase(), &Phase::Succeeded);
        assert_eq!(submission.message(), Some("done"));
    }

    #[test]
    fn test_rejected_validation_returns_to_idle() {
        let mut submission = Submission::default();
        submission.begin();
        submission.reject();
        assert_eq!(submission.phase(), &Phase::Idle);
    }

    #[test]
    fn test_failure_can_be_dismissed_or_retried() {
        let mut submission = Submission::default();
        submission.begin();
        submission.start();
        submission.resolve(Err(network_error()));
        assert_eq!(submission.phase(), &Phase::Failed(network_error()));
        assert!(submission.message().is_some());
        assert!(submission.phase().accepts_submit());

        assert!(submission.begin());
        submission.start();
        submission.resolve(Err(network_error()));
        assert!(submission.dismiss());
        assert_eq!(submission.phase(), &Phase::Idle);
        assert_eq!(submission.message(), None);
    }

    #[test]
    fn test_reentrant_submit_is_ignored() {
        let mut submission = Submission::default();
        submission.begin();
        assert!(!submission.begin());
        submission.start();
        assert!(!submission.begin());
        assert_eq!(submission.phase(), &Phase::Pending);
        submission.resolve(Ok(String::new()));
        assert!(!submission.begin());
    }

    #[test]
    fn test_out_of_order_transitions_are_ignored() {
        let mut submission = Submission::default();
        assert!(!submission.start());
        assert!(!submission.resolve(Ok(String::new())));
        assert!(!submission.dismiss());
        assert_eq!(submission, Submission::default());
    }

    #[test]
    fn test_success_messages() {
        let mut credentials = Credentials {
            email: "user@example.com".to_string(),
            password: String::new(),
            remember_me: false,
        };
        assert_eq!(success_message(FormKind::Login, &credentials), "Login successful!");
        credentials.remember_me = true;
        assert!(success_message(FormKind::Login, &credentials).contains("remembered"));
        assert!(success_message(FormKind::ForgotPassword, &credentials)
            .contains("user@example.com"));
    }
}
