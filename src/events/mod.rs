//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: submissions sent to the authentication backend
//! - Terminal events: line-based user intents read from stdin

pub mod network;
pub mod terminal;
