//! CLI command implementations

pub mod config;
pub mod model;
pub mod preview;
pub mod resolve;

pub use config::ConfigCommand;
pub use model::ModelCommand;
pub use preview::PreviewCommand;
pub use resolve::ResolveCommand;

use anyhow::{Context, Result};
use std::path::Path;
use stubsmith::Settings;

/// Load settings from `path`, or from the standard locations when `None`
///
/// # Errors
///
/// Returns an error if any configuration source is unreadable or invalid.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Settings::load().context("Failed to load configuration"),
    }
}
