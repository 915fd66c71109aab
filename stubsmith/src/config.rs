//! Configuration management for stubsmith
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `STUBSMITH_` prefix, `__` for nesting)
//! 2. `./stubsmith.toml` (project)
//! 3. `~/.config/stubsmith/config.toml` (user config, XDG)
//! 4. `/etc/stubsmith/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! Defaults target Eloquent models in a Laravel application.
//!
//! # Example Configuration
//!
//! ```toml
//! # stubsmith.toml
//! [naming]
//! suffix = "Model"
//! root_namespace = "App"
//! sub_namespace = "Models"
//!
//! [layout]
//! source_root = "app"
//! extension = "php"
//!
//! [generator]
//! kind = "command"
//! program = "php"
//! args = ["artisan", "make:model", "{name}"]
//!
//! [refresh]
//! enabled = true
//! program = "composer"
//! args = ["dump-autoload"]
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use stubsmith::config::Settings;
//!
//! # fn example() -> anyhow::Result<()> {
//! let settings = Settings::load()?;
//! let suffix = &settings.naming.suffix;
//! # Ok(())
//! # }
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name used for config directories and the environment prefix
pub const APP_NAME: &str = "stubsmith";

/// Project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "stubsmith.toml";

/// Naming policy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingSettings {
    /// Appended to every class name; empty means the table must be bound explicitly
    pub suffix: String,

    /// Namespace that maps onto the source root
    pub root_namespace: String,

    /// Namespace below the root where classes are placed (may be empty)
    pub sub_namespace: String,

    /// Qualifier separator between namespace segments
    pub separator: String,

    /// Singularize table names before converting to a class name
    pub singularize: bool,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            suffix: String::new(),
            root_namespace: "App".to_string(),
            sub_namespace: String::new(),
            separator: "\\".to_string(),
            singularize: true,
        }
    }
}

/// Where generated files live on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Project root the generator runs in
    pub project_root: PathBuf,

    /// Directory (relative to the project root) that holds the root namespace
    pub source_root: PathBuf,

    /// Source file extension, without the dot
    pub extension: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            source_root: PathBuf::from("app"),
            extension: "php".to_string(),
        }
    }
}

/// Markers and text used when stamping a generated stub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampSettings {
    /// Token at the very top of every stub
    pub start_marker: String,

    /// Placeholder line replaced by the table binding
    pub placeholder: String,

    /// Single-line comment prefix of the target language
    pub comment_prefix: String,

    /// Tool name written into the provenance stamp
    pub tool_name: String,

    /// Comment placed above the injected binding
    pub binding_comment: String,

    /// Visibility of the injected fields
    pub visibility: String,

    /// Optional type declaration for the injected fields
    pub field_type: Option<String>,

    /// Also inject a `$connection` field when a connection name is known
    pub bind_connection: bool,
}

impl Default for StampSettings {
    fn default() -> Self {
        Self {
            start_marker: "<?php".to_string(),
            placeholder: "//".to_string(),
            comment_prefix: "//".to_string(),
            tool_name: "Stubsmith".to_string(),
            binding_comment: "Table binding injected because the class name no longer encodes the table"
                .to_string(),
            visibility: "protected".to_string(),
            field_type: None,
            bind_connection: false,
        }
    }
}

/// How stub files are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// Run an external scaffolding command
    #[default]
    Command,
    /// Render the built-in stub template
    Template,
}

/// External generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Which generator to use
    pub kind: GeneratorKind,

    /// Program invoked by the command generator
    pub program: String,

    /// Arguments; `{name}`, `{qualified}` and `{class}` are substituted
    pub args: Vec<String>,

    /// Custom Handlebars stub for the template generator
    pub template: Option<PathBuf>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::Command,
            program: "php".to_string(),
            args: vec![
                "artisan".to_string(),
                "make:model".to_string(),
                "{name}".to_string(),
            ],
            template: None,
        }
    }
}

/// Autoload cache refresh configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Run the refresh command after stamping
    pub enabled: bool,

    /// Program to run
    pub program: String,

    /// Program arguments
    pub args: Vec<String>,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "composer".to_string(),
            args: vec!["dump-autoload".to_string()],
        }
    }
}

/// Complete stubsmith configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Naming policy
    #[serde(default)]
    pub naming: NamingSettings,

    /// File layout
    #[serde(default)]
    pub layout: LayoutSettings,

    /// Stamping markers and text
    #[serde(default)]
    pub stamp: StampSettings,

    /// Stub generator
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Autoload refresh
    #[serde(default)]
    pub refresh: RefreshSettings,
}

impl Settings {
    /// Load configuration from all standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 5. Start with defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 4. System config: /etc/stubsmith/config.toml
        let system_config = PathBuf::from("/etc").join(APP_NAME).join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        // 3. User config: ~/.config/stubsmith/config.toml
        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        // 2. Project config: ./stubsmith.toml
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        // 1. Environment variables (highest priority, double underscore for nesting)
        figment = figment.merge(Env::prefixed("STUBSMITH_").split("__").lowercase(true));

        Ok(figment.extract()?)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or holds values of the wrong type.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(Env::prefixed("STUBSMITH_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path
    ///
    /// Returns `~/.config/stubsmith/config.toml` where a config directory exists.
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG_FILE),
            |config_dir| config_dir.join(APP_NAME).join("config.toml"),
        )
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.naming.suffix, "");
        assert_eq!(settings.naming.root_namespace, "App");
        assert_eq!(settings.naming.separator, "\\");
        assert_eq!(settings.layout.source_root, PathBuf::from("app"));
        assert_eq!(settings.stamp.start_marker, "<?php");
        assert_eq!(settings.stamp.placeholder, "//");
        assert_eq!(settings.generator.kind, GeneratorKind::Command);
        assert!(settings.refresh.enabled);
    }

    #[test]
    fn test_load_from_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stubsmith.toml");
        fs::write(
            &path,
            "[naming]\nsuffix = \"Model\"\nsub_namespace = \"Models\"\n\n[generator]\nkind = \"template\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.naming.suffix, "Model");
        assert_eq!(settings.naming.sub_namespace, "Models");
        assert_eq!(settings.naming.root_namespace, "App");
        assert_eq!(settings.generator.kind, GeneratorKind::Template);
        assert_eq!(settings.stamp.visibility, "protected");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempdir().unwrap();
        assert!(Settings::load_from(dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_to_toml_includes_markers() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("start_marker = \"<?php\""));
        assert!(rendered.contains("[refresh]"));
    }
}
