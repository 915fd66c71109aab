//! stubsmith: scaffold table-bound model classes
//!
//! Given a table name, stubsmith derives a namespace-qualified class
//! identity, asks an external generator (e.g. `php artisan make:model`) for a
//! skeleton file, then stamps that file with an explicit table binding (when
//! the class name no longer encodes the table) and a provenance comment.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stubsmith::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let settings = Settings::load()?;
//! let scaffolder = Scaffolder::from_settings("users", &settings)?;
//!
//! // Identity is available without touching the filesystem
//! assert_eq!(scaffolder.qualified_name().as_deref(), Some("App\\User"));
//!
//! let class = scaffolder.generate()?;
//! println!("generated {class}");
//! # Ok(())
//! # }
//! ```
//!
//! # Stamping is not idempotent
//!
//! Stamping a file twice adds a second provenance comment. Run generation
//! exactly once per file.

pub mod config;
pub mod error;
pub mod generator;
pub mod identity;
pub mod naming;
pub mod observability;
pub mod refresh;
pub mod scaffolder;
pub mod stamper;

pub use config::Settings;
pub use error::{GeneratorError, ResolutionError, ScaffoldError};
pub use identity::Identity;
pub use naming::{NamespaceResolver, NamingPolicy, Resolution};
pub use scaffolder::{Generation, Scaffolder};
pub use stamper::{FileStamper, TableBinding};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::error::ScaffoldError;
    pub use crate::generator::{Generator, StubRequest};
    pub use crate::refresh::AutoloadRefresher;
    pub use crate::scaffolder::{Generation, Scaffolder};
}
