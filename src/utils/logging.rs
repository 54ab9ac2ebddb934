//! Logging setup

use tracing_subscriber::EnvFilter;

/// Target used for lines forwarded from external tools
pub const TOOL_TARGET: &str = "clipbatch::tool";

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level` when it is set. Calling this
/// twice is harmless; the second call leaves the first subscriber in place.
pub fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        let _ = tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Check that `level` is a filter the subscriber understands.
///
/// Accepts a plain level name or comma-separated directives such as
/// `info,clipbatch::tool=debug`. Bare words must be level names, so a
/// typo is rejected instead of being read as a target.
pub fn is_valid_level(level: &str) -> bool {
    let directives: Vec<&str> = level.split(',').map(str::trim).collect();
    if directives.iter().any(|d| d.is_empty()) {
        return false;
    }
    let names_ok = directives.iter().all(|directive| match directive.rsplit_once('=') {
        Some((target, name)) => !target.trim().is_empty() && is_level_name(name),
        None => is_level_name(directive),
    });
    names_ok && EnvFilter::try_new(level).is_ok()
}

fn is_level_name(name: &str) -> bool {
    matches!(
        name.trim().to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
}
