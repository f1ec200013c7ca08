//! Submission error types reported by an authentication backend.

/// Errors that end a pending submission.
///
/// Each one leaves the screen interactive: the user dismisses it and either
/// retries or edits the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// Transport failure or any unexpected error at the submission boundary
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Password reset requested for an address with no account
    #[error("No account found for {email}")]
    UnknownEmail { email: String },

    /// Sign-up attempted with an address that already has an account
    #[error("Email already registered: {email}")]
    EmailAlreadyExists { email: String },
}

impl SubmissionError {
    /// Dialog title shown for this error.
    ///
    pub fn title(&self) -> &'static str {
        match self {
            SubmissionError::NetworkError(_) => "Connection Error",
            SubmissionError::UnknownEmail { .. } => "Email Not Found",
            SubmissionError::EmailAlreadyExists { .. } => "Email Already Exists",
        }
    }

    /// Dialog body shown for this error.
    ///
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::NetworkError(_) => "We encountered a problem connecting to our servers. \
                Please check your internet connection and try again."
                .to_string(),
            SubmissionError::UnknownEmail { email } => format!(
                "We couldn't find an account associated with {}. \
                 Please check if you entered the correct email address.",
                email
            ),
            SubmissionError::EmailAlreadyExists { email } => format!(
                "The email address {} is already registered. \
                 Please use a different email or try to log in.",
                email
            ),
        }
    }

    /// Whether resubmitting the same input can succeed.
    ///
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmissionError::NetworkError(_))
    }
}

/// Convert an error escaping a backend call into a submission error.
///
/// Domain errors pass through; anything else becomes a network error carrying
/// the original message.
pub fn coerce(error: anyhow::Error) -> SubmissionError {
    match error.downcast::<SubmissionError>() {
        Ok(submission_error) => submission_error,
        Err(other) => SubmissionError::NetworkError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_submission_error_display() {
        let error = SubmissionError::NetworkError("timed out".to_string());
        assert!(error.to_string().contains("Network error"));
        assert!(error.to_string().contains("timed out"));

        let error = SubmissionError::UnknownEmail {
            email: "unknown@example.com".to_string(),
        };
        assert!(error.to_string().contains("unknown@example.com"));

        let error = SubmissionError::EmailAlreadyExists {
            email: "existing@example.com".to_string(),
        };
        assert!(error.to_string().contains("already registered"));
    }

    #[test]
    fn test_submission_error_dialog_text() {
        let error = SubmissionError::UnknownEmail {
            email: "a@b.co".to_string(),
        };
        assert_eq!(error.title(), "Email Not Found");
        assert!(error.user_message().contains("a@b.co"));
        assert!(!error.is_retryable());

        let error = SubmissionError::NetworkError("boom".to_string());
        assert_eq!(error.title(), "Connection Error");
        assert!(error.is_retryable());
    }

    #[test]
    fn test_coerce_passes_domain_errors_through() {
        let error: anyhow::Error = SubmissionError::EmailAlreadyExists {
            email: "x@y.io".to_string(),
        }
        .into();
        assert_eq!(
            coerce(error),
            SubmissionError::EmailAlreadyExists {
                email: "x@y.io".to_string()
            }
        );
    }

    #[test]
    fn test_coerce_wraps_unknown_errors() {
        let error = anyhow!("socket closed");
        assert_eq!(
            coerce(error),
            SubmissionError::NetworkError("socket closed".to_string())
        );
    }
}
