//! Configuration management module.
//!
//! This module handles loading, saving and validating the application
//! configuration: simulated backend timing, failure injection, password
//! policy, sentinel addresses and log level.

mod error;

pub use error::ConfigError;

use crate::backend::{DEFAULT_EXISTING_EMAIL, DEFAULT_UNKNOWN_EMAIL};
use crate::error::AppResult;
use crate::state::FormKind;
use crate::utils::validation::PasswordPolicy;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/paystell";

/// How long a success state stays visible before navigation, per form.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessHold {
    pub login: u64,
    pub sign_up: u64,
    pub forgot_password: u64,
}

impl Default for SuccessHold {
    fn default() -> Self {
        SuccessHold {
            login: 0,
            sign_up: 1500,
            forgot_password: 3000,
        }
    }
}

impl SuccessHold {
    /// Return the hold duration for the form.
    ///
    pub fn duration(&self, kind: FormKind) -> Duration {
        let millis = match kind {
            FormKind::Login => self.login,
            FormKind::SignUp => self.sign_up,
            FormKind::ForgotPassword => self.forgot_password,
        };
        Duration::from_millis(millis)
    }

    /// Return a hold of zero for every form.
    ///
    pub fn none() -> Self {
        SuccessHold {
            login: 0,
            sign_up: 0,
            forgot_password: 0,
        }
    }
}

/// Oversees management of configuration file.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated backend latency
    pub submit_delay_ms: u64,
    /// Chance a simulated call fails with a network error
    pub failure_probability: f64,
    /// Fixed seed for reproducible failure injection
    pub seed: Option<u64>,
    pub password_policy: PasswordPolicy,
    pub success_hold_ms: SuccessHold,
    pub unknown_email: String,
    pub existing_email: String,
    pub log_level: String,
    #[serde(skip)]
    file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            submit_delay_ms: 1500,
            failure_probability: 0.2,
            seed: None,
            password_policy: PasswordPolicy::Strict,
            success_hold_ms: SuccessHold::default(),
            unknown_email: DEFAULT_UNKNOWN_EMAIL.to_string(),
            existing_email: DEFAULT_EXISTING_EMAIL.to_string(),
            log_level: "info".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config::default()
    }

    /// Parse and validate YAML configuration. Missing keys take defaults.
    ///
    pub fn from_yaml(contents: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place; the
    /// directory is created so a later save succeeds.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> AppResult<()> {
        let dir_path = match custom_path {
            Some(path) => Path::new(path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            *self = Config::from_yaml(&contents)?;
        }
        self.file_path = Some(file_path);

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> AppResult<()> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Check that every value is usable.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(ConfigError::InvalidValue {
                key: "failure_probability",
                message: format!("{} is not between 0 and 1", self.failure_probability),
            });
        }
        self.level_filter()?;
        Ok(())
    }

    /// Return the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::InvalidValue {
            key: "log_level",
            message: format!("unknown level '{}'", self.log_level),
        })
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> AppResult<PathBuf> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
