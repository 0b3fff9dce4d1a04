//! Opt-in log output for applications embedding confstore
//!
//! The library never installs a subscriber on its own. Events are emitted
//! under the `confstore` and `confstore_fs` targets: loads, saves and merges
//! at `debug`, per-file writes at `trace`, and sync failures that
//! [`ConfigStore::sync`](crate::ConfigStore::sync) swallows at `warn`.

use tracing_subscriber::{EnvFilter, filter::ParseError, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset: other crates stay quiet below
/// `warn`, store activity is shown from `info`.
pub const DEFAULT_DIRECTIVE: &str = "warn,confstore=info,confstore_fs=info";

/// Install a stderr subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_DIRECTIVE`].
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with_directive(DEFAULT_DIRECTIVE)
}

/// Like [`init`], with `directive` as the fallback filter, e.g.
/// `"confstore=debug"` to trace every load and save.
///
/// Fails if the directive does not parse or a global subscriber is already
/// installed.
pub fn init_with_directive(
    directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_layer = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => filter(directive)?,
    };

    // stderr keeps log lines out of JSON an application prints on stdout
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Parse a filter directive without touching the environment.
pub fn filter(directive: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(directive)
}
