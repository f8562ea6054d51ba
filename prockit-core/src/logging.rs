//! Diagnostic-stream helpers.
//!
//! Facade logging goes through the standard `log` macros (backend chosen by
//! the binary, e.g. env_logger). The functions here cover the other half of
//! the diagnostic contract: plain program-prefixed lines on stderr, the
//! format calling scripts grep for.

use once_cell::sync::Lazy;
use std::path::Path;

static PROGRAM_NAME: Lazy<String> = Lazy::new(|| {
    std::env::args()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "prockit".to_string())
});

/// Returns the base name of the running program (argv[0] without its
/// directory), computed once and cached.
pub fn program_name() -> &'static str {
    &PROGRAM_NAME
}

/// Writes a program-prefixed message to stderr.
///
/// Used for progress notes and diagnostics that must be visible regardless
/// of the `RUST_LOG` configuration.
pub fn log_message(message: &str) {
    eprintln!("{}: {}", program_name(), message);
}
