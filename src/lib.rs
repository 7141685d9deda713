//! asana-statusbar - keep the current Asana task in view
//!
//! This library crate exposes internal modules for integration testing.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod integrations;
pub mod setup;
pub mod statusbar;
pub mod tasks;
pub mod util;
