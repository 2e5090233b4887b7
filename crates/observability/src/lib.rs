//! Process-wide tracing setup shared by embedders and integration tests.

/// Log filter and output format.
pub mod logging;

pub use logging::{ENV_LOG_FORMAT, LogFormat};

/// Initialize tracing with `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init("info");
}

/// Like [`init`] but with a caller-chosen default directive, used when
/// `RUST_LOG` is unset.
pub fn init_with_default(directive: &str) {
    logging::init(directive);
}
