//! Table name to class identity resolution
//!
//! The mapping from a table name to a simple class name is owned by a
//! [`NamingPolicy`]. [`NamespaceResolver`] wraps a policy with the configured
//! suffix and namespace and decides whether the generated class needs an
//! explicit table binding.

use crate::config::NamingSettings;
use crate::error::ResolutionError;
use crate::identity::Identity;
use inflector::Inflector;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Whether `candidate` is a valid class or namespace identifier
#[must_use]
pub fn is_valid_identifier(candidate: &str) -> bool {
    IDENTIFIER.is_match(candidate)
}

/// Maps a table name to a simple class name
pub trait NamingPolicy: Send + Sync {
    /// Class name for `table`, without suffix or namespace
    fn class_name(&self, table: &str) -> String;
}

impl<F> NamingPolicy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn class_name(&self, table: &str) -> String {
        self(table)
    }
}

/// Default policy: optionally singularize, then convert to `PascalCase`
///
/// # Examples
///
/// ```
/// use stubsmith::naming::{InflectorPolicy, NamingPolicy};
///
/// let policy = InflectorPolicy::new(true);
/// assert_eq!(policy.class_name("users"), "User");
/// assert_eq!(policy.class_name("user_profiles"), "UserProfile");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflectorPolicy {
    singularize: bool,
}

impl InflectorPolicy {
    /// Create a policy
    #[must_use]
    pub const fn new(singularize: bool) -> Self {
        Self { singularize }
    }
}

impl Default for InflectorPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NamingPolicy for InflectorPolicy {
    fn class_name(&self, table: &str) -> String {
        if self.singularize {
            table.to_singular().to_pascal_case()
        } else {
            table.to_pascal_case()
        }
    }
}

/// Result of resolving a table name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Derived identity
    pub identity: Identity,
    /// The class name does not encode the table, so bind it explicitly
    pub inject_binding: bool,
}

/// Resolves table names into identities under a fixed configuration
#[derive(Clone)]
pub struct NamespaceResolver {
    settings: NamingSettings,
    policy: Arc<dyn NamingPolicy>,
}

impl fmt::Debug for NamespaceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceResolver")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl NamespaceResolver {
    /// Create a resolver with an explicit naming policy
    pub fn new(settings: NamingSettings, policy: impl NamingPolicy + 'static) -> Self {
        Self {
            settings,
            policy: Arc::new(policy),
        }
    }

    /// Create a resolver using [`InflectorPolicy`] as configured
    #[must_use]
    pub fn from_settings(settings: NamingSettings) -> Self {
        let policy = InflectorPolicy::new(settings.singularize);
        Self::new(settings, policy)
    }

    /// Naming settings in use
    #[must_use]
    pub const fn settings(&self) -> &NamingSettings {
        &self.settings
    }

    /// Qualifier separator
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.settings.separator
    }

    /// Number of namespace segments that belong to the root namespace
    #[must_use]
    pub fn root_len(&self) -> usize {
        self.split_segments(&self.settings.root_namespace).len()
    }

    /// Whether resolved classes need an explicit table binding
    #[must_use]
    pub fn requires_binding(&self) -> bool {
        self.settings.suffix.is_empty()
    }

    /// Resolve `table` into an identity
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if the table name is empty, the policy
    /// yields an invalid identifier, or a configured namespace segment is
    /// not an identifier.
    pub fn resolve(&self, table: &str) -> Result<Resolution, ResolutionError> {
        let table = table.trim();
        if table.is_empty() {
            return Err(ResolutionError::EmptyTable);
        }

        let simple_name = format!("{}{}", self.policy.class_name(table), self.settings.suffix);
        if !is_valid_identifier(&simple_name) {
            return Err(ResolutionError::InvalidIdentifier {
                table: table.to_string(),
                candidate: simple_name,
            });
        }

        let mut namespace = self.split_segments(&self.settings.root_namespace);
        namespace.extend(self.split_segments(&self.settings.sub_namespace));
        if let Some(bad) = namespace.iter().find(|s| !is_valid_identifier(s)) {
            return Err(ResolutionError::InvalidNamespace(bad.clone()));
        }

        Ok(Resolution {
            identity: Identity::new(namespace, simple_name),
            inject_binding: self.requires_binding(),
        })
    }

    fn split_segments(&self, namespace: &str) -> Vec<String> {
        // Accept either qualifier style in configuration
        namespace
            .split(|c: char| self.settings.separator.contains(c) || c == '\\' || c == '/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
