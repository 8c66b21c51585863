//! Extension to template language key table.

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::config::BuildConfig;
use crate::constants::BUILTIN_EXTENSIONS;

/// Ordered mapping from extension to template language key.
///
/// Built once per configuration snapshot: built-in registrations first, then
/// custom registrations in configuration order. A custom registration for an
/// extension that already exists replaces its key but keeps the extension's
/// original position, so table order is "first insertion" order.
///
/// Extensions are unique; keys are not (`11ty.cjs` and `11ty.mjs` both map
/// to `11ty.js`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionTable {
    entries: IndexMap<String, String>,
}

impl ExtensionTable {
    /// Table containing only the built-in registrations.
    pub fn builtin() -> Self {
        let entries = BUILTIN_EXTENSIONS
            .iter()
            .map(|(extension, key)| ((*extension).to_string(), (*key).to_string()))
            .collect();
        Self {
            entries,
        }
    }

    /// Merge the built-ins with the custom registrations of `config`.
    ///
    /// Registrations that fail validation are skipped with a warning, so
    /// every extension in the table is lowercase and reachable by lookups.
    pub fn from_config(config: &BuildConfig) -> Self {
        let mut table = Self::builtin();
        for entry in config.custom_extensions() {
            if let Err(e) = entry.validate() {
                warn!("Skipping custom registration: {e}");
                continue;
            }
            if let Some(previous) = table.insert(&entry.extension, &entry.key) {
                trace!(
                    "Custom registration rebinds extension '{}' from '{}' to '{}'",
                    entry.extension, previous, entry.key
                );
            }
        }
        table
    }

    /// Insert or rebind an extension, returning the key it had before.
    pub(crate) fn insert(&mut self, extension: &str, key: &str) -> Option<String> {
        self.entries.insert(extension.to_string(), key.to_string())
    }

    /// Key bound to `extension`.
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.entries.get(extension).map(String::as_str)
    }

    /// Whether `extension` is registered.
    pub fn contains_extension(&self, extension: &str) -> bool {
        self.entries.contains_key(extension)
    }

    /// Whether any extension maps to `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.entries.values().any(|k| k == key)
    }

    /// Every extension mapping to `key`, in table order.
    pub fn extensions_for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().filter(move |(_, k)| *k == key).map(|(extension, _)| extension)
    }

    /// All extensions in table order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(extension, key)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(e, k)| (e.as_str(), k.as_str()))
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty. Never true for tables built from config.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `path` is exactly `extension` or ends with `.extension`.
pub(crate) fn matches_extension(path: &str, extension: &str) -> bool {
    path == extension || ends_with_dot_extension(path, extension)
}

/// Whether `path` ends with `.extension`.
pub(crate) fn ends_with_dot_extension(path: &str, extension: &str) -> bool {
    path.len() > extension.len()
        && path.ends_with(extension)
        && path.as_bytes()[path.len() - extension.len() - 1] == b'.'
}
