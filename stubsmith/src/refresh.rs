//! Autoload cache refresh
//!
//! After a new class file appears, the host project's autoloader usually
//! needs its class map rebuilt (`composer dump-autoload`). Refreshing is
//! fire-and-forget: failures are logged, never returned.

use crate::config::{LayoutSettings, RefreshSettings};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Refreshes the host project's autoload cache
#[cfg_attr(test, mockall::automock)]
pub trait AutoloadRefresher {
    /// Trigger a refresh
    fn refresh(&self);
}

/// Build the refresher selected in configuration
#[must_use]
pub fn from_settings(settings: &RefreshSettings, layout: &LayoutSettings) -> Box<dyn AutoloadRefresher> {
    if settings.enabled {
        Box::new(CommandRefresher::new(
            settings.program.clone(),
            settings.args.clone(),
            layout.project_root.clone(),
        ))
    } else {
        Box::new(NoopRefresher)
    }
}

/// Runs a refresh command such as `composer dump-autoload`
#[derive(Debug, Clone)]
pub struct CommandRefresher {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandRefresher {
    /// Create a command refresher
    pub fn new(program: impl Into<String>, args: Vec<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }
}

impl AutoloadRefresher for CommandRefresher {
    fn refresh(&self) {
        tracing::debug!(program = %self.program, args = ?self.args, "Refreshing autoload cache");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => tracing::info!("Autoload cache refreshed"),
            Ok(status) => tracing::warn!(%status, program = %self.program, "Autoload refresh failed"),
            Err(e) => tracing::warn!(error = %e, program = %self.program, "Autoload refresh could not start"),
        }
    }
}

/// Does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRefresher;

impl AutoloadRefresher for NoopRefresher {
    fn refresh(&self) {
        tracing::debug!("Autoload refresh disabled");
    }
}
