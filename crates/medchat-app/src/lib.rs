//! medchat library
//!
//! Terminal front-end for the medical study assistant: configuration,
//! the sign-in gate, command-backed speech and the interactive loop.

pub mod app;
pub mod cli;
pub mod config;
pub mod gate;
pub mod speech;

pub use cli::Cli;
pub use config::{AppConfig, FileConfig};
pub use gate::{route, View};
