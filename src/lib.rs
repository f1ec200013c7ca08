//! Headless authentication flow for the PayStell payments app.
//!
//! The crate models the screens a user moves through before reaching the home
//! screen, the forms on those screens and the lifecycle of each submission
//! against an authentication backend.

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod ui;
pub mod utils;
