//! Table-bound class scaffolding
//!
//! [`Scaffolder`] ties the pieces together for a single table:
//!
//! 1. Resolve the table name into an identity
//! 2. Ask the [`Generator`] for a stub at the identity's path
//! 3. Stamp the stub (table binding + provenance)
//! 4. Refresh the autoload cache
//!
//! Identity accessors never cache: each call re-resolves from the table name
//! and the configured naming settings.

use crate::config::{LayoutSettings, Settings};
use crate::error::{ResolutionError, ScaffoldError};
use crate::generator::{Generator, StubRequest};
use crate::identity::split_qualified;
use crate::naming::{NamespaceResolver, NamingPolicy, Resolution};
use crate::refresh::AutoloadRefresher;
use crate::stamper::{FileStamper, TableBinding};
use std::fmt;
use std::path::PathBuf;

/// A generation action exposing the identity of what it generates
///
/// Identity accessors return `None` when the table name cannot be resolved.
pub trait Generation {
    /// Generate and stamp the class, returning its qualified name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError`] if resolution, generation or stamping fails.
    fn generate(&self) -> Result<String, ScaffoldError>;

    /// Fully qualified class name
    fn qualified_name(&self) -> Option<String>;

    /// Last segment of [`Generation::qualified_name`]
    fn class_name(&self) -> Option<String>;

    /// Everything before the last segment of [`Generation::qualified_name`]
    fn namespace(&self) -> Option<String>;
}

/// Scaffolds one table-bound class
pub struct Scaffolder {
    table: String,
    connection: Option<String>,
    resolver: NamespaceResolver,
    layout: LayoutSettings,
    stamper: FileStamper,
    generator: Box<dyn Generator>,
    refresher: Box<dyn AutoloadRefresher>,
}

impl fmt::Debug for Scaffolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scaffolder")
            .field("table", &self.table)
            .field("connection", &self.connection)
            .field("resolver", &self.resolver)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl Scaffolder {
    /// Create a scaffolder for `table`
    ///
    /// Settings are captured here; the resolver and stamper never consult
    /// ambient configuration afterwards.
    pub fn new(
        table: impl Into<String>,
        settings: &Settings,
        generator: Box<dyn Generator>,
        refresher: Box<dyn AutoloadRefresher>,
    ) -> Self {
        Self {
            table: table.into(),
            connection: None,
            resolver: NamespaceResolver::from_settings(settings.naming.clone()),
            layout: settings.layout.clone(),
            stamper: FileStamper::new(settings.stamp.clone()),
            generator,
            refresher,
        }
    }

    /// Create a scaffolder with the generator and refresher named in `settings`
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a configured stub template cannot be read.
    pub fn from_settings(table: impl Into<String>, settings: &Settings) -> std::io::Result<Self> {
        let generator = crate::generator::from_settings(&settings.generator, &settings.layout)?;
        let refresher = crate::refresh::from_settings(&settings.refresh, &settings.layout);
        Ok(Self::new(table, settings, generator, refresher))
    }

    /// Replace the naming policy
    #[must_use]
    pub fn with_policy(mut self, policy: impl NamingPolicy + 'static) -> Self {
        self.resolver = NamespaceResolver::new(self.resolver.settings().clone(), policy);
        self
    }

    /// Database connection the class should use
    #[must_use]
    pub fn with_connection(mut self, connection: Option<String>) -> Self {
        self.connection = connection;
        self
    }

    /// Table name this scaffolder works on
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Resolve the table name under the current settings
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if the table name cannot be resolved.
    pub fn resolution(&self) -> Result<Resolution, ResolutionError> {
        self.resolver.resolve(&self.table)
    }

    /// Path of the file the generator is expected to create
    #[must_use]
    pub fn target_path(&self) -> Option<PathBuf> {
        self.resolution()
            .ok()
            .map(|r| r.identity.file_path(&self.layout, self.resolver.root_len()))
    }

    /// Generator request for a resolved identity
    #[must_use]
    pub fn stub_request(&self, resolution: &Resolution) -> StubRequest {
        StubRequest::for_identity(&resolution.identity, &self.resolver, &self.layout)
    }
}

impl Generation for Scaffolder {
    fn generate(&self) -> Result<String, ScaffoldError> {
        let span = tracing::info_span!("generate", table = %self.table);
        let _guard = span.enter();

        let resolution = self.resolution()?;
        let request = self.stub_request(&resolution);
        tracing::info!(class = %request.qualified, path = %request.path.display(), "Generating stub");

        self.generator.generate(&request)?;

        let binding = TableBinding::new(self.table.trim(), resolution.inject_binding)
            .with_connection(self.connection.clone());
        self.stamper.stamp(&request.path, &binding)?;

        self.refresher.refresh();

        tracing::info!(class = %request.qualified, binding = resolution.inject_binding, "Generated");
        Ok(request.qualified)
    }

    fn qualified_name(&self) -> Option<String> {
        match self.resolution() {
            Ok(resolution) => Some(resolution.identity.qualified(self.resolver.separator())),
            Err(e) => {
                tracing::debug!(table = %self.table, error = %e, "Unresolvable table name");
                None
            }
        }
    }

    fn class_name(&self) -> Option<String> {
        let qualified = self.qualified_name()?;
        let (_, class) = split_qualified(&qualified, self.resolver.separator());
        Some(class.to_string())
    }

    fn namespace(&self) -> Option<String> {
        let qualified = self.qualified_name()?;
        let (namespace, _) = split_qualified(&qualified, self.resolver.separator());
        Some(namespace.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingSettings;
    use crate::error::GeneratorError;
    use crate::generator::MockGenerator;
    use crate::refresh::MockAutoloadRefresher;
    use std::fs;
    use tempfile::tempdir;

    const STUB: &str = "<?php\n\nnamespace App;\n\nclass User extends Model\n{\n    //\n}\n";

    fn settings(root: &std::path::Path, suffix: &str) -> Settings {
        Settings {
            naming: NamingSettings {
                suffix: suffix.to_string(),
                ..NamingSettings::default()
            },
            layout: LayoutSettings {
                project_root: root.to_path_buf(),
                ..LayoutSettings::default()
            },
            ..Settings::default()
        }
    }

    fn writing_generator() -> MockGenerator {
        let mut generator = MockGenerator::new();
        generator.expect_generate().times(1).returning(|request| {
            fs::create_dir_all(request.path.parent().unwrap()).unwrap();
            fs::write(&request.path, STUB).unwrap();
            Ok(())
        });
        generator
    }

    fn refreshed_once() -> MockAutoloadRefresher {
        let mut refresher = MockAutoloadRefresher::new();
        refresher.expect_refresh().times(1).return_const(());
        refresher
    }

    #[test]
    fn test_generate_injects_binding_without_suffix() {
        let dir = tempdir().unwrap();
        let scaffolder = Scaffolder::new(
            "users",
            &settings(dir.path(), ""),
            Box::new(writing_generator()),
            Box::new(refreshed_once()),
        );

        assert_eq!(scaffolder.generate().unwrap(), "App\\User");

        let content = fs::read_to_string(dir.path().join("app/User.php")).unwrap();
        assert!(content.contains("protected $table = 'users';"));
        assert_eq!(content.matches("Generated by").count(), 1);
    }

    #[test]
    fn test_generate_with_suffix_skips_binding() {
        let dir = tempdir().unwrap();
        let scaffolder = Scaffolder::new(
            "users",
            &settings(dir.path(), "Model"),
            Box::new(writing_generator()),
            Box::new(refreshed_once()),
        );

        assert_eq!(scaffolder.class_name().as_deref(), Some("UserModel"));
        assert_eq!(scaffolder.generate().unwrap(), "App\\UserModel");

        let content = fs::read_to_string(dir.path().join("app/UserModel.php")).unwrap();
        assert!(!content.contains("$table"));
    }

    #[test]
    fn test_generator_receives_identity() {
        let dir = tempdir().unwrap();
        let expected_path = dir.path().join("app/User.php");
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .withf(move |r| r.relative_name == "User" && r.qualified == "App\\User" && r.path == expected_path)
            .times(1)
            .returning(|r| {
                fs::create_dir_all(r.path.parent().unwrap()).unwrap();
                fs::write(&r.path, STUB).unwrap();
                Ok(())
            });

        let scaffolder = Scaffolder::new(
            "users",
            &settings(dir.path(), ""),
            Box::new(generator),
            Box::new(refreshed_once()),
        );
        scaffolder.generate().unwrap();
    }

    #[test]
    fn test_io_error_propagates_and_skips_refresh() {
        let dir = tempdir().unwrap();
        let mut generator = MockGenerator::new();
        generator.expect_generate().times(1).returning(|_| Ok(()));
        let mut refresher = MockAutoloadRefresher::new();
        refresher.expect_refresh().times(0);

        let scaffolder = Scaffolder::new(
            "users",
            &settings(dir.path(), ""),
            Box::new(generator),
            Box::new(refresher),
        );

        assert_eq!(scaffolder.qualified_name().as_deref(), Some("App\\User"));
        let err = scaffolder.generate().unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_generator_error_stops_pipeline() {
        let dir = tempdir().unwrap();
        let mut generator = MockGenerator::new();
        generator.expect_generate().returning(|_| {
            Err(GeneratorError::Failed {
                program: "php".to_string(),
                status: "exit status: 1".to_string(),
            })
        });
        let mut refresher = MockAutoloadRefresher::new();
        refresher.expect_refresh().times(0);

        let scaffolder = Scaffolder::new(
            "users",
            &settings(dir.path(), ""),
            Box::new(generator),
            Box::new(refresher),
        );
        assert!(matches!(scaffolder.generate(), Err(ScaffoldError::Generator(_))));
    }

    #[test]
    fn test_unresolvable_table_returns_sentinels() {
        let dir = tempdir().unwrap();
        let mut generator = MockGenerator::new();
        generator.expect_generate().times(0);
        let mut refresher = MockAutoloadRefresher::new();
        refresher.expect_refresh().times(0);

        let scaffolder = Scaffolder::new(
            "",
            &settings(dir.path(), ""),
            Box::new(generator),
            Box::new(refresher),
        );

        assert_eq!(scaffolder.qualified_name(), None);
        assert_eq!(scaffolder.class_name(), None);
        assert_eq!(scaffolder.namespace(), None);
        assert_eq!(scaffolder.target_path(), None);
        assert!(matches!(scaffolder.generate(), Err(ScaffoldError::Resolution(_))));
    }

    #[test]
    fn test_accessors_with_sub_namespace() {
        let dir = tempdir().unwrap();
        let mut config = settings(dir.path(), "");
        config.naming.sub_namespace = "Models".to_string();
        let scaffolder = Scaffolder::new(
            "blog_posts",
            &config,
            Box::new(MockGenerator::new()),
            Box::new(MockAutoloadRefresher::new()),
        );

        assert_eq!(scaffolder.qualified_name().as_deref(), Some("App\\Models\\BlogPost"));
        assert_eq!(scaffolder.class_name().as_deref(), Some("BlogPost"));
        assert_eq!(scaffolder.namespace().as_deref(), Some("App\\Models"));
        assert_eq!(
            scaffolder.target_path(),
            Some(dir.path().join("app").join("Models").join("BlogPost.php"))
        );
    }

    #[test]
    fn test_connection_binding() {
        let dir = tempdir().unwrap();
        let mut config = settings(dir.path(), "");
        config.stamp.bind_connection = true;
        let scaffolder = Scaffolder::new(
            "users",
            &config,
            Box::new(writing_generator()),
            Box::new(refreshed_once()),
        )
        .with_connection(Some("reporting".to_string()));

        scaffolder.generate().unwrap();
        let content = fs::read_to_string(dir.path().join("app/User.php")).unwrap();
        assert!(content.contains("protected $connection = 'reporting';"));
    }

    #[test]
    fn test_custom_policy() {
        let dir = tempdir().unwrap();
        let scaffolder = Scaffolder::new(
            "users",
            &settings(dir.path(), ""),
            Box::new(MockGenerator::new()),
            Box::new(MockAutoloadRefresher::new()),
        )
        .with_policy(|table: &str| format!("Legacy{}", table.to_uppercase()));

        assert_eq!(scaffolder.class_name().as_deref(), Some("LegacyUSERS"));
    }
}
