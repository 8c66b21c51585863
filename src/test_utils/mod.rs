//! Test utilities for the extension map
//!
//! This module provides helpers shared by unit and integration tests:
//! - [`init_test_logging`] - one-time tracing subscriber setup
//! - [`CountingEngineRegistry`] / [`StaticEngineClass`] - an engine registry
//!   double that records every lookup
//! - [`fixtures`] - ready-made build configurations and extension maps
//!
//! # Example
//!
//! ```rust,no_run
//! use template_extension_map::test_utils::{fixtures, init_test_logging};
//!
//! init_test_logging(None);
//! let (map, engines) = fixtures::extension_map_with_formats(&["md", "njk"]);
//! assert!(map.has_engine("index.njk"));
//! assert_eq!(engines.total_lookups(), 0);
//! ```

pub mod engines;
pub mod fixtures;

pub use engines::{CountingEngineRegistry, StaticEngineClass};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=template_extension_map=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
