//! Identity resolution command (no side effects)

use anyhow::Result;
use console::style;
use stubsmith::{Generation, Scaffolder, Settings};

/// Resolved identity of a table, as printed by `stubsmith resolve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// Fully qualified class name
    pub qualified: String,
    /// Simple class name
    pub class: String,
    /// Class namespace
    pub namespace: String,
    /// File the generator is expected to create
    pub path: String,
    /// Whether a `$table` binding would be injected
    pub inject_binding: bool,
}

/// Show what `model` would generate for a table
pub struct ResolveCommand {
    table: String,
}

impl ResolveCommand {
    /// Create a new command instance
    pub const fn new(table: String) -> Self {
        Self { table }
    }

    /// Resolve without printing; `None` when the table name is unresolvable
    #[must_use]
    pub fn resolve(&self, settings: &Settings) -> Option<ResolvedIdentity> {
        let scaffolder = Scaffolder::new(
            self.table.clone(),
            settings,
            Box::new(stubsmith::generator::TemplateGenerator::default()),
            Box::new(stubsmith::refresh::NoopRefresher),
        );

        Some(ResolvedIdentity {
            qualified: scaffolder.qualified_name()?,
            class: scaffolder.class_name()?,
            namespace: scaffolder.namespace()?,
            path: scaffolder.target_path()?.display().to_string(),
            inject_binding: scaffolder.resolution().ok()?.inject_binding,
        })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the table name cannot be resolved.
    pub fn execute(&self, settings: &Settings) -> Result<ResolvedIdentity> {
        let Some(identity) = self.resolve(settings) else {
            anyhow::bail!("Cannot derive a class name from table '{}'", self.table);
        };

        println!("{:>10} {}", style("class").bold(), style(&identity.qualified).green());
        println!("{:>10} {}", style("name").bold(), identity.class);
        println!("{:>10} {}", style("namespace").bold(), identity.namespace);
        println!("{:>10} {}", style("path").bold(), style(&identity.path).dim());
        println!(
            "{:>10} {}",
            style("binding").bold(),
            if identity.inject_binding {
                style("$table injected").yellow()
            } else {
                style("encoded in class name").dim()
            }
        );

        Ok(identity)
    }
}
