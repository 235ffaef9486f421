//! Logging setup and helpers.

use serde::Serialize;
use std::fmt::Debug;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Install a stderr subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (e.g. `"dataform=debug"`).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

/// Wrapper for pretty-printing payloads in logs as JSON
///
/// ```ignore
/// use dataform::logging::Pretty;
/// use tracing::debug;
///
/// debug!("edit payload: {}", Pretty(&payload));
/// ```
///
/// Debug formatting is used as a fallback if serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string_pretty(&self.0) {
            Ok(json) => write!(f, "\n{}", json),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
