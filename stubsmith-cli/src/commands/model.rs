//! Model scaffolding command
//!
//! Runs the whole pipeline for one table:
//!
//! ```bash
//! stubsmith model users
//! stubsmith model invoices --suffix Model --connection billing
//! ```

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use stubsmith::config::GeneratorKind;
use stubsmith::{Generation, Scaffolder, Settings};

/// Scaffold a table-bound model class
pub struct ModelCommand {
    table: String,
    connection: Option<String>,
    suffix: Option<String>,
    use_template: bool,
}

impl ModelCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `table` - Source table name (e.g. `users`)
    /// * `connection` - Database connection the model should use
    /// * `suffix` - Overrides the configured class suffix
    /// * `use_template` - Render the built-in stub instead of running the generator command
    pub const fn new(
        table: String,
        connection: Option<String>,
        suffix: Option<String>,
        use_template: bool,
    ) -> Self {
        Self {
            table,
            connection,
            suffix,
            use_template,
        }
    }

    /// Apply command-line overrides to loaded settings
    #[must_use]
    pub fn effective_settings(&self, mut settings: Settings) -> Settings {
        if let Some(suffix) = &self.suffix {
            settings.naming.suffix.clone_from(suffix);
        }
        if self.use_template {
            settings.generator.kind = GeneratorKind::Template;
        }
        if self.connection.is_some() {
            settings.stamp.bind_connection = true;
        }
        settings
    }

    /// Execute the command, returning the qualified class name
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be resolved, the generator fails,
    /// or the generated file cannot be stamped.
    pub fn execute(&self, settings: Settings) -> Result<String> {
        let settings = self.effective_settings(settings);

        println!(
            "\n{} {} {}",
            style("Scaffolding model for").cyan().bold(),
            style(&self.table).green().bold(),
            style("...").cyan().bold()
        );

        let scaffolder = Scaffolder::from_settings(self.table.clone(), &settings)
            .context("Failed to create scaffolder")?
            .with_connection(self.connection.clone());

        let class = scaffolder
            .qualified_name()
            .with_context(|| format!("Cannot derive a class name from table '{}'", self.table))?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message(format!("Generating {class}..."));

        let result = scaffolder.generate();
        spinner.finish_and_clear();
        let class = result.with_context(|| format!("Failed to generate {class}"))?;

        if let Some(path) = scaffolder.target_path() {
            println!(
                "  {} {} ({})",
                style("✓").green(),
                style(path.display()).dim(),
                style(&class).dim()
            );
        }

        if scaffolder.resolution().is_ok_and(|r| r.inject_binding) {
            println!(
                "  {} bound to table {}",
                style("✓").green(),
                style(format!("'{}'", self.table.trim())).yellow()
            );
        }
        if let Some(connection) = &self.connection {
            println!(
                "  {} using connection {}",
                style("✓").green(),
                style(format!("'{connection}'")).yellow()
            );
        }

        println!(
            "\n{} {} is ready!",
            style("✨").green().bold(),
            style(&class).green().bold()
        );

        Ok(class)
    }
}
