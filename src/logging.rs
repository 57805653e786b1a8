//! Optional logging setup helpers.
//!
//! The library emits [`tracing`] events but never installs a subscriber on
//! its own. Binaries and tests that want console output can call [`init`].

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `warn` when `RUST_LOG` is unset. Calling this more than once
/// is harmless; later installs are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).try_init();
}
