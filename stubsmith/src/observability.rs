//! Observability (logging, tracing)
//!
//! Provides structured logging for the library and CLI. Log output goes to
//! stderr so that command output on stdout stays machine-readable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging stack
///
/// Sets up:
/// - Environment-based log level filtering (`RUST_LOG` wins)
/// - Pretty formatting in debug builds, JSON in release builds
///
/// `verbose` raises the default level from `info` to `debug`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// use stubsmith::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(false)?;
/// tracing::info!("Scaffolding started");
/// # Ok(())
/// # }
/// ```
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_directive(verbose))
    });

    #[cfg(debug_assertions)]
    {
        // Pretty formatting for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        // JSON formatting for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

/// Default filter directive when `RUST_LOG` is unset
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,stubsmith=debug,stubsmith_cli_lib=debug"
    } else {
        "warn,stubsmith=info"
    }
}
