//! Preview command: render the built-in stub, stamp it in memory and show
//! the difference. Nothing is written.

use anyhow::{Context, Result};
use console::style;
use similar::{ChangeTag, TextDiff};
use stubsmith::generator::{StubRequest, TemplateGenerator};
use stubsmith::{FileStamper, NamespaceResolver, Settings, TableBinding};

/// Stub before and after stamping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Rendered stub
    pub before: String,
    /// Stub after binding injection and stamping
    pub after: String,
}

/// Preview the stamped stub for a table
pub struct PreviewCommand {
    table: String,
}

impl PreviewCommand {
    /// Create a new command instance
    pub const fn new(table: String) -> Self {
        Self { table }
    }

    /// Build the preview without printing
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be resolved, the configured
    /// template cannot be read, or rendering fails.
    pub fn build(&self, settings: &Settings) -> Result<Preview> {
        let generator = match &settings.generator.template {
            Some(path) => TemplateGenerator::from_file(path)
                .with_context(|| format!("Failed to read stub template {}", path.display()))?,
            None => TemplateGenerator::default(),
        };

        let resolver = NamespaceResolver::from_settings(settings.naming.clone());
        let resolution = resolver
            .resolve(&self.table)
            .with_context(|| format!("Cannot derive a class name from table '{}'", self.table))?;

        let request = StubRequest::for_identity(&resolution.identity, &resolver, &settings.layout);
        let before = generator.render(&request).context("Failed to render stub")?;

        let binding = TableBinding::new(self.table.trim(), resolution.inject_binding);
        let after = FileStamper::new(settings.stamp.clone()).apply_now(&before, &binding);

        Ok(Preview { before, after })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the preview cannot be built.
    pub fn execute(&self, settings: &Settings) -> Result<Preview> {
        let preview = self.build(settings)?;

        println!(
            "{} {}\n",
            style("Preview for table").cyan().bold(),
            style(&self.table).green().bold()
        );

        let diff = TextDiff::from_lines(&preview.before, &preview.after);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => {
                    print!("{}", style(format!("-{change}")).red());
                }
                ChangeTag::Insert => {
                    print!("{}", style(format!("+{change}")).green());
                }
                ChangeTag::Equal => {
                    print!(" {change}");
                }
            }
        }
        println!();

        Ok(preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_injects_binding() {
        let preview = PreviewCommand::new("users".to_string())
            .build(&Settings::default())
            .unwrap();

        assert!(!preview.before.contains("$table"));
        assert!(preview.after.contains("protected $table = 'users';"));
        assert_eq!(preview.after.matches("Generated by").count(), 1);
    }

    #[test]
    fn test_preview_with_suffix() {
        let mut settings = Settings::default();
        settings.naming.suffix = "Model".to_string();
        let preview = PreviewCommand::new("users".to_string()).build(&settings).unwrap();

        assert!(preview.before.contains("class UserModel extends Model"));
        assert!(!preview.after.contains("$table"));
    }

    #[test]
    fn test_preview_uses_configured_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("model.stub");
        std::fs::write(&template, "<?php\nfinal class {{class}}\n{\n    //\n}\n").unwrap();

        let mut settings = Settings::default();
        settings.generator.template = Some(template);
        let preview = PreviewCommand::new("posts".to_string()).build(&settings).unwrap();

        assert!(preview.before.starts_with("<?php\nfinal class Post\n"));
        assert!(preview.after.contains("protected $table = 'posts';"));
    }

    #[test]
    fn test_preview_rejects_empty_table() {
        assert!(PreviewCommand::new(" ".to_string()).build(&Settings::default()).is_err());
    }
}
