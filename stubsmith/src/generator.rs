//! Stub generators
//!
//! A [`Generator`] materializes a skeleton source file for an identity. The
//! file must exist at [`StubRequest::path`] when `generate` returns and must
//! contain the start marker and the placeholder line the stamper looks for.
//!
//! - [`CommandGenerator`] shells out to a scaffolding command such as
//!   `php artisan make:model {name}`.
//! - [`TemplateGenerator`] renders a Handlebars stub directly.

use crate::config::{GeneratorKind, GeneratorSettings, LayoutSettings};
use crate::error::GeneratorError;
use crate::identity::Identity;
use crate::naming::NamespaceResolver;
use handlebars::Handlebars;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Eloquent model skeleton used by [`TemplateGenerator`]
pub const MODEL_STUB: &str = r"<?php

namespace {{namespace}};

use Illuminate\Database\Eloquent\Model;

class {{class}} extends Model
{
    //
}
";

/// Everything a generator needs to know about the file to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRequest {
    /// Fully qualified class name
    pub qualified: String,
    /// Name relative to the root namespace
    pub relative_name: String,
    /// Simple class name
    pub class_name: String,
    /// Namespace of the class
    pub namespace: String,
    /// Where the stub must be created
    pub path: PathBuf,
}

impl StubRequest {
    /// Request for `identity` as named by `resolver` and placed under `layout`
    #[must_use]
    pub fn for_identity(identity: &Identity, resolver: &NamespaceResolver, layout: &LayoutSettings) -> Self {
        let separator = resolver.separator();
        let root_len = resolver.root_len();
        Self {
            qualified: identity.qualified(separator),
            relative_name: identity.relative_name(separator, root_len),
            class_name: identity.simple_name.clone(),
            namespace: identity.namespace_string(separator),
            path: identity.file_path(layout, root_len),
        }
    }
}

/// Creates stub files
#[cfg_attr(test, mockall::automock)]
pub trait Generator {
    /// Create the stub described by `request`
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the stub could not be produced.
    fn generate(&self, request: &StubRequest) -> Result<(), GeneratorError>;
}

/// Build the generator selected in configuration
///
/// # Errors
///
/// Returns an I/O error if a custom template is configured but unreadable.
pub fn from_settings(
    settings: &GeneratorSettings,
    layout: &LayoutSettings,
) -> std::io::Result<Box<dyn Generator>> {
    Ok(match settings.kind {
        GeneratorKind::Command => Box::new(CommandGenerator::new(
            settings.program.clone(),
            settings.args.clone(),
            layout.project_root.clone(),
        )),
        GeneratorKind::Template => match &settings.template {
            Some(path) => Box::new(TemplateGenerator::from_file(path)?),
            None => Box::new(TemplateGenerator::default()),
        },
    })
}

/// Runs an external scaffolding command
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandGenerator {
    /// Create a command generator
    pub fn new(program: impl Into<String>, args: Vec<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    /// Arguments with placeholders substituted for `request`
    #[must_use]
    pub fn expand_args(&self, request: &StubRequest) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{name}", &request.relative_name)
                    .replace("{qualified}", &request.qualified)
                    .replace("{class}", &request.class_name)
            })
            .collect()
    }
}

impl Generator for CommandGenerator {
    fn generate(&self, request: &StubRequest) -> Result<(), GeneratorError> {
        let args = self.expand_args(request);
        tracing::info!(program = %self.program, ?args, "Running stub generator");

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| GeneratorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            tracing::error!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "Stub generator failed"
            );
            return Err(GeneratorError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }

        tracing::debug!(stdout = %String::from_utf8_lossy(&output.stdout), "Stub generator finished");
        Ok(())
    }
}

/// Renders a Handlebars stub to the target path
pub struct TemplateGenerator {
    template: String,
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateGenerator")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new(MODEL_STUB)
    }
}

impl TemplateGenerator {
    /// Create a generator for a template string
    pub fn new(template: impl Into<String>) -> Self {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            template: template.into(),
            handlebars,
        }
    }

    /// Load the template from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// Render the stub for `request` without writing it
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Template`] if rendering fails.
    pub fn render(&self, request: &StubRequest) -> Result<String, GeneratorError> {
        let context = json!({
            "namespace": request.namespace,
            "class": request.class_name,
            "qualified": request.qualified,
            "name": request.relative_name,
        });
        Ok(self.handlebars.render_template(&self.template, &context)?)
    }
}

impl Generator for TemplateGenerator {
    fn generate(&self, request: &StubRequest) -> Result<(), GeneratorError> {
        let content = self.render(request)?;

        let write_err = |source| GeneratorError::Write {
            path: request.path.clone(),
            source,
        };
        if let Some(parent) = request.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&request.path, content).map_err(write_err)?;

        tracing::info!(path = %request.path.display(), "Rendered stub");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn request(path: PathBuf) -> StubRequest {
        StubRequest {
            qualified: "App\\Models\\User".to_string(),
            relative_name: "Models\\User".to_string(),
            class_name: "User".to_string(),
            namespace: "App\\Models".to_string(),
            path,
        }
    }

    #[test]
    fn test_expand_args() {
        let generator = CommandGenerator::new(
            "php",
            vec![
                "artisan".to_string(),
                "make:model".to_string(),
                "{name}".to_string(),
                "--class={class}".to_string(),
            ],
            ".",
        );
        let args = generator.expand_args(&request(PathBuf::from("x")));
        assert_eq!(args, vec!["artisan", "make:model", "Models\\User", "--class=User"]);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempdir().unwrap();
        let generator = CommandGenerator::new("stubsmith-no-such-program", vec![], dir.path());
        let err = generator.generate(&request(dir.path().join("User.php"))).unwrap_err();
        assert!(matches!(err, GeneratorError::Spawn { .. }));
    }

    #[test]
    fn test_render_model_stub() {
        let rendered = TemplateGenerator::default()
            .render(&request(PathBuf::from("x")))
            .unwrap();
        assert!(rendered.starts_with("<?php\n\nnamespace App\\Models;"));
        assert!(rendered.contains("class User extends Model"));
        assert!(rendered.contains("\n    //\n"));
    }

    #[test]
    fn test_template_generator_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app/Models/User.php");
        TemplateGenerator::default().generate(&request(path.clone())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_from_settings_template_file() {
        let dir = tempdir().unwrap();
        let stub = dir.path().join("model.stub");
        fs::write(&stub, "<?php // {{class}}\n").unwrap();
        let settings = GeneratorSettings {
            kind: GeneratorKind::Template,
            template: Some(stub),
            ..GeneratorSettings::default()
        };
        let generator = from_settings(&settings, &LayoutSettings::default()).unwrap();

        let target = dir.path().join("User.php");
        generator.generate(&request(target.clone())).unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "<?php // User\n");
    }
}
