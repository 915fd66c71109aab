//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while deriving an identity from a table name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Table name is empty or only whitespace
    #[error("table name must not be empty")]
    EmptyTable,

    /// The naming policy produced something that is not a class identifier
    #[error("table '{table}' maps to '{candidate}', which is not a valid identifier")]
    InvalidIdentifier {
        /// Table name as supplied
        table: String,
        /// Name produced by the naming policy (suffix included)
        candidate: String,
    },

    /// A configured namespace segment is not a valid identifier
    #[error("namespace segment '{0}' is not a valid identifier")]
    InvalidNamespace(String),
}

/// Errors raised by the external stub generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The generator program could not be started
    #[error("failed to start generator '{program}': {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The generator program exited unsuccessfully
    #[error("generator '{program}' exited with {status}")]
    Failed {
        /// Program that was invoked
        program: String,
        /// Exit status description
        status: String,
    },

    /// Stub template could not be rendered
    #[error("failed to render stub template: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Stub file could not be written
    #[error("failed to write stub {path}: {source}")]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by [`crate::Scaffolder::generate`]
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Identity could not be derived
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Stub generation failed
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Stub file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being stamped
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it occurred on
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is an I/O failure from the stamping step
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
