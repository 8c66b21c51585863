//! Build configuration consumed by the extension map.
//!
//! - [`BuildConfig`] - an immutable settings snapshot (template formats and
//!   custom extension registrations), loadable from TOML
//! - [`ExtensionRegistration`] / [`CompileOptions`] - one custom binding and its
//!   engine metadata
//! - [`ConfigStore`] - the read-only seam the extension map depends on
//! - [`TemplateConfig`] - the default in-memory store
//!
//! # Source Resolution Priority
//!
//! Built-in registrations are applied first; configuration registrations are
//! applied on top, so a custom entry for `md` rebinds the built-in `md`
//! extension without moving it in the table.

mod build;
mod store;

pub use build::{BuildConfig, CompileOptions, ExtensionRegistration};
pub use store::{ConfigStore, TemplateConfig};
