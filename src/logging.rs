//! Tracing subscriber setup for the command-line binary
//!
//! Diagnostics go to stderr so rule output on stdout can be piped. `RUST_LOG`
//! takes precedence over the default level picked from `--verbose`.

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "basketforge=debug"
    } else {
        "basketforge=warn"
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns error if a global subscriber is already set
pub fn init(verbose: bool) -> crate::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to initialize logging")
}
