//! Namespace-qualified identity of a generated class
//!
//! An [`Identity`] is always derived, never stored: it can be rebuilt from a
//! table name and the naming settings at any time, and it maps onto exactly
//! one file path without looking at the filesystem.

use crate::config::LayoutSettings;
use std::path::PathBuf;

/// Namespace segments plus the simple class name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Ordered namespace segments, root namespace first
    pub namespace: Vec<String>,
    /// Class name without namespace
    pub simple_name: String,
}

impl Identity {
    /// Create a new identity
    #[must_use]
    pub const fn new(namespace: Vec<String>, simple_name: String) -> Self {
        Self {
            namespace,
            simple_name,
        }
    }

    /// Fully qualified name, e.g. `App\Models\User`
    #[must_use]
    pub fn qualified(&self, separator: &str) -> String {
        self.namespace
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.simple_name.as_str()))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Namespace alone, segments joined with `separator`
    #[must_use]
    pub fn namespace_string(&self, separator: &str) -> String {
        self.namespace.join(separator)
    }

    /// Name relative to the first `root_len` namespace segments
    ///
    /// This is the form scaffolding commands expect (`Models\User` rather
    /// than `App\Models\User`).
    #[must_use]
    pub fn relative_name(&self, separator: &str, root_len: usize) -> String {
        self.namespace
            .iter()
            .skip(root_len)
            .map(String::as_str)
            .chain(std::iter::once(self.simple_name.as_str()))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// File path implied by this identity
    ///
    /// Segments after the root namespace become directories below the
    /// source root: `App\Models\User` → `<project>/app/Models/User.php`.
    #[must_use]
    pub fn file_path(&self, layout: &LayoutSettings, root_len: usize) -> PathBuf {
        let mut path = layout.project_root.join(&layout.source_root);
        for segment in self.namespace.iter().skip(root_len) {
            path.push(segment);
        }
        path.push(format!("{}.{}", self.simple_name, layout.extension));
        path
    }
}

/// Split a qualified name into `(namespace, simple name)`
///
/// The namespace is empty when the name has no separator.
#[must_use]
pub fn split_qualified<'a>(qualified: &'a str, separator: &str) -> (&'a str, &'a str) {
    if separator.is_empty() {
        return ("", qualified);
    }
    qualified
        .rsplit_once(separator)
        .unwrap_or(("", qualified))
}

/// Rejoin a namespace and simple name produced by [`split_qualified`]
#[must_use]
pub fn join_qualified(namespace: &str, simple_name: &str, separator: &str) -> String {
    if namespace.is_empty() {
        simple_name.to_string()
    } else {
        format!("{namespace}{separator}{simple_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn user_in_models() -> Identity {
        Identity::new(
            vec!["App".to_string(), "Models".to_string()],
            "User".to_string(),
        )
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(user_in_models().qualified("\\"), "App\\Models\\User");
        assert_eq!(user_in_models().namespace_string("\\"), "App\\Models");
    }

    #[test]
    fn test_qualified_without_namespace() {
        let identity = Identity::new(vec![], "User".to_string());
        assert_eq!(identity.qualified("\\"), "User");
        assert_eq!(identity.namespace_string("\\"), "");
    }

    #[test]
    fn test_relative_name_drops_root() {
        assert_eq!(user_in_models().relative_name("\\", 1), "Models\\User");
        assert_eq!(user_in_models().relative_name("/", 2), "User");
    }

    #[test]
    fn test_file_path() {
        let layout = LayoutSettings {
            project_root: PathBuf::from("/srv/shop"),
            ..LayoutSettings::default()
        };
        assert_eq!(
            user_in_models().file_path(&layout, 1),
            Path::new("/srv/shop/app/Models/User.php")
        );
    }

    #[test]
    fn test_split_qualified() {
        assert_eq!(split_qualified("App\\Models\\User", "\\"), ("App\\Models", "User"));
        assert_eq!(split_qualified("User", "\\"), ("", "User"));
        assert_eq!(join_qualified("", "User", "\\"), "User");
        assert_eq!(join_qualified("App", "User", "\\"), "App\\User");
    }
}
