//! Template Extension Map
//!
//! Resolves file-name extensions to the template language keys that select a
//! rendering engine in a static site build, and derives the glob patterns used
//! to discover source files of each kind.
//!
//! # Architecture Overview
//!
//! - A fixed set of built-in registrations (`md`, `html`, `njk`, `liquid`, and
//!   the `11ty.js` family) is merged with custom registrations from the build
//!   configuration into an ordered extension table
//! - The user's active formats are split into template languages (the token is
//!   a key in the table) and passthrough copies (anything else)
//! - File discovery asks for globs and classifies paths; layout resolution asks
//!   for candidate file names and strips extensions
//! - Script templates ask whether their engine needs the module graph walked;
//!   the first resolvable engine decides and the answer is cached per extension
//!
//! # Core Modules
//!
//! - [`extension_map`] - the [`ExtensionMap`](extension_map::ExtensionMap) resolver
//! - [`config`] - build configuration snapshots and the store seam
//! - [`engine`] - the engine registry seam
//! - [`core`] - error types and user-facing error context
//! - [`template_path`] - lexical path helpers for glob roots
//! - [`constants`] - built-in registrations and default formats
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use template_extension_map::config::{BuildConfig, TemplateConfig};
//! use template_extension_map::engine::EngineRegistry;
//! use template_extension_map::extension_map::ExtensionMap;
//!
//! # async fn example(engines: Arc<dyn EngineRegistry>) -> anyhow::Result<()> {
//! let mut config = BuildConfig::default();
//! config.add_extension("11ty.ts", "11ty.js")?;
//! config.set_template_formats(["md", "11ty.js", "png"]);
//!
//! let store = Arc::new(TemplateConfig::new(config));
//! let mut map = ExtensionMap::new(store, engines)?;
//! map.set_formats_from_config();
//!
//! // ./src/**/*.{md,11ty.js,11ty.cjs,11ty.mjs,11ty.ts}
//! let globs = map.get_valid_globs("src");
//! let spider = map.should_spider_javascript_dependencies("src/feed.11ty.ts").await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod core;
pub mod engine;
pub mod extension_map;
pub mod template_path;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
