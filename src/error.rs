//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the application,
//! allowing for type-safe error handling throughout the codebase.

pub use crate::config::ConfigError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unparseable user input
    #[error("Invalid input: {0}")]
    Input(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),

    /// Runtime creation errors
    #[error("Failed to create runtime: {0}")]
    RuntimeCreation(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_error = ConfigError::FilePathNotSet;
        let app_error: AppError = config_error.into();
        assert!(matches!(app_error, AppError::Config(_)));
        assert!(app_error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_app_error_input() {
        let error = AppError::Input("fly home".to_string());
        assert_eq!(error.to_string(), "Invalid input: fly home");
    }

    #[test]
    fn test_app_result_propagates_config_error() {
        fn load() -> AppResult<()> {
            Err::<(), _>(ConfigError::HomeDirectoryNotFound)?;
            Ok(())
        }
        assert!(matches!(
            load(),
            Err(AppError::Config(ConfigError::HomeDirectoryNotFound))
        ));
    }
}
