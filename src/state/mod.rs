//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct holding the router and the active screen
//! - Navigation types (Route, Router, completion callbacks)
//! - Form editing types (Field, FormKind, AuthForm)
//! - Submission lifecycle phases
//! - Validation error handling

mod error;
mod form;
mod navigation;
mod submission;

pub use error::ValidationError;
pub use form::{AuthForm, Field, FormKind, FormSnapshot, INVALID_EMAIL};
pub use navigation::{completion_for, Completion, Route, Router, UnknownRoute};
pub use submission::{success_message, Phase, Submission};

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{Observer, PendingSubmission, Resolution, Snapshot, State};
