//! Configuration inspection command

use anyhow::Result;
use console::style;
use stubsmith::Settings;

/// Show the effective configuration or where the user config lives
pub struct ConfigCommand {
    path_only: bool,
}

impl ConfigCommand {
    /// Create a new command instance
    pub const fn new(path_only: bool) -> Self {
        Self { path_only }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be rendered as TOML.
    pub fn execute(&self, settings: &Settings) -> Result<String> {
        let output = if self.path_only {
            Settings::recommended_path().display().to_string()
        } else {
            settings.to_toml()?
        };

        if !self.path_only {
            println!("{}", style("# Effective configuration").dim());
        }
        println!("{output}");

        Ok(output)
    }
}
