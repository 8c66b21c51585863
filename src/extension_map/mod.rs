//! Extension to template language resolution.
//!
//! [`ExtensionMap`] answers the questions file discovery and layout
//! resolution ask about file names:
//!
//! - which template language key handles `page.njk` ([`get_key`](ExtensionMap::get_key))
//! - which globs find the source files of each active format
//!   ([`get_globs`](ExtensionMap::get_globs) and friends)
//! - which candidate files a layout name may resolve to
//!   ([`get_file_list`](ExtensionMap::get_file_list))
//! - whether a script template needs its module graph walked
//!   ([`ExtensionMap::should_spider_javascript_dependencies`])
//!
//! # State
//!
//! The map owns two caches, both scoped to the instance:
//!
//! - the [`ExtensionTable`], built lazily from the current configuration
//!   snapshot and rebuilt when the store hands out a different snapshot `Arc`
//! - the spidering decisions, keyed by extension, written once and never
//!   evicted
//!
//! [`reset`](ExtensionMap::reset) only resets the engine registry. It does
//! not rebuild the extension table and does not clear spidering decisions;
//! use [`invalidate_extension_table`](ExtensionMap::invalidate_extension_table)
//! for an explicit rebuild.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use template_extension_map::config::{BuildConfig, TemplateConfig};
//! use template_extension_map::engine::EngineRegistry;
//! use template_extension_map::extension_map::ExtensionMap;
//!
//! # fn example(engines: Arc<dyn EngineRegistry>) -> anyhow::Result<()> {
//! let store = Arc::new(TemplateConfig::new(BuildConfig::default()));
//! let mut map = ExtensionMap::new(store, engines)?;
//! map.set_formats(["md", "html", "css"]);
//!
//! assert_eq!(map.get_valid_globs("src"), vec!["./src/**/*.{md,html}"]);
//! assert_eq!(map.get_passthrough_copy_globs("src"), vec!["./src/**/*.css"]);
//! assert_eq!(map.get_key("about.MD").as_deref(), Some("md"));
//! # Ok(())
//! # }
//! ```

mod formats;
mod table;


pub use formats::FormatClassification;
pub use table::ExtensionTable;

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use tracing::{debug, trace, warn};

use crate::config::{BuildConfig, ConfigStore, ExtensionRegistration};
use crate::constants::DEFAULT_TEMPLATE_FORMATS;
use crate::core::{ExtensionMapError, Result};
use crate::engine::EngineRegistry;
use crate::template_path::convert_to_recursive_glob;
use table::{ends_with_dot_extension, matches_extension};

/// Extension table memoized against the snapshot it was built from.
#[derive(Debug)]
struct CachedTable {
    snapshot: Arc<BuildConfig>,
    table: Arc<ExtensionTable>,
}

/// Resolver between file extensions and template language keys.
pub struct ExtensionMap {
    store: Arc<dyn ConfigStore>,
    engines: Arc<dyn EngineRegistry>,
    table: RwLock<Option<CachedTable>>,
    formats: FormatClassification,
    spider_cache: DashMap<String, bool>,
}

impl fmt::Debug for ExtensionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionMap")
            .field("formats", &self.formats)
            .field("spider_cache_len", &self.spider_cache.len())
            .finish_non_exhaustive()
    }
}

impl ExtensionMap {
    /// Create an extension map over a configuration store and engine registry.
    ///
    /// No formats are active until [`set_formats`](Self::set_formats) or
    /// [`set_formats_from_config`](Self::set_formats_from_config) is called.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionMapError::InvalidConfig`] if the store is not bound
    /// to a configuration snapshot.
    pub fn new(store: Arc<dyn ConfigStore>, engines: Arc<dyn EngineRegistry>) -> Result<Self> {
        if store.snapshot().is_none() {
            return Err(ExtensionMapError::InvalidConfig {
                reason: "configuration store is not bound to a build configuration".to_string(),
            });
        }

        Ok(Self {
            store,
            engines,
            table: RwLock::new(None),
            formats: FormatClassification::default(),
            spider_cache: DashMap::new(),
        })
    }

    /// Current configuration snapshot. If the store was unbound after
    /// construction, the snapshot the table was last built from (or the
    /// defaults) stands in.
    fn config(&self) -> Arc<BuildConfig> {
        if let Some(snapshot) = self.store.snapshot() {
            return snapshot;
        }

        warn!("Configuration store lost its snapshot; keeping the last known configuration");
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|cached| Arc::clone(&cached.snapshot))
            .unwrap_or_default()
    }

    /// The extension table for the current configuration snapshot.
    ///
    /// Built on first use and memoized. A different snapshot `Arc` from the
    /// store triggers a rebuild; repeated calls against the same snapshot
    /// return the same table.
    pub fn extension_table(&self) -> Arc<ExtensionTable> {
        let snapshot = self.config();

        {
            let guard = self.table.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = guard.as_ref().filter(|c| Arc::ptr_eq(&c.snapshot, &snapshot)) {
                return Arc::clone(&cached.table);
            }
        }

        let mut guard = self.table.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = guard.as_ref().filter(|c| Arc::ptr_eq(&c.snapshot, &snapshot)) {
            return Arc::clone(&cached.table);
        }

        let table = Arc::new(ExtensionTable::from_config(&snapshot));
        debug!(
            "Built extension table: {} extensions ({} custom registrations)",
            table.len(),
            snapshot.custom_extensions().len()
        );
        *guard = Some(CachedTable {
            snapshot,
            table: Arc::clone(&table),
        });
        table
    }

    /// Drop the memoized extension table so the next access rebuilds it.
    pub fn invalidate_extension_table(&self) {
        trace!("Invalidating extension table");
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Set the active formats.
    ///
    /// Each token is trimmed and lower-cased, then classified as a template
    /// language (it is a key in the extension table) or a passthrough copy
    /// (anything else). Unknown tokens are never an error.
    pub fn set_formats<I, S>(&mut self, formats: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = self.extension_table();
        self.formats = FormatClassification::classify(formats, &table);
        debug!(
            "Active formats: template languages {:?}, passthrough copy {:?}",
            self.formats.valid_template_language_keys, self.formats.passthrough_copy_keys
        );
    }

    /// Set the active formats from the configuration snapshot, falling back
    /// to [`DEFAULT_TEMPLATE_FORMATS`] when it declares none.
    pub fn set_formats_from_config(&mut self) {
        let config = self.config();
        if config.template_formats.is_empty() {
            self.set_formats(DEFAULT_TEMPLATE_FORMATS);
        } else {
            self.set_formats(&config.template_formats);
        }
    }

    /// Current format classification.
    pub fn classification(&self) -> &FormatClassification {
        &self.formats
    }

    /// Active formats exactly as last supplied.
    pub fn format_keys(&self) -> &[String] {
        &self.formats.format_keys
    }

    /// Normalised active formats.
    pub fn unfiltered_format_keys(&self) -> &[String] {
        &self.formats.unfiltered_format_keys
    }

    /// Active formats backed by a template language.
    pub fn valid_template_language_keys(&self) -> &[String] {
        &self.formats.valid_template_language_keys
    }

    /// Active formats copied verbatim.
    pub fn passthrough_copy_keys(&self) -> &[String] {
        &self.formats.passthrough_copy_keys
    }

    /// Forget engine classes resolved by the engine registry.
    ///
    /// The extension table and the spidering decisions are kept.
    pub fn reset(&self) {
        debug!("Resetting engine registry");
        self.engines.reset();
    }

    /// Candidate layout files for `base_path`.
    ///
    /// One `[dir/]base_path.extension` entry per extension of each active
    /// template language, in activation order then table order. Existence is
    /// not checked.
    pub fn get_file_list(&self, base_path: &str, dir: Option<&str>) -> Vec<String> {
        if base_path.is_empty() {
            return Vec::new();
        }

        let prefix = match dir {
            Some(dir) if !dir.is_empty() => format!("{dir}/"),
            _ => String::new(),
        };
        let table = self.extension_table();

        self.formats
            .valid_template_language_keys
            .iter()
            .flat_map(|key| table.extensions_for_key(key).collect::<Vec<_>>())
            .map(|extension| format!("{prefix}{base_path}.{extension}"))
            .collect()
    }

    /// Whether `path` ends with an extension of an active template language.
    ///
    /// This cannot tell a template from an include that shares its suffix.
    /// Only call it on paths produced by the discovery globs.
    pub fn is_full_template_file_path(&self, path: &str) -> bool {
        let table = self.extension_table();
        self.formats
            .valid_template_language_keys
            .iter()
            .flat_map(|key| table.extensions_for_key(key).collect::<Vec<_>>())
            .any(|extension| ends_with_dot_extension(path, extension))
    }

    /// Registered extensions that `path` ends with and whose key is an active
    /// template language, longest first.
    ///
    /// `page.11ty.js` matches both `11ty.js` and a custom `js`; the longer
    /// suffix comes first so the more specific engine wins. The relative
    /// order of equal-length matches is unspecified.
    pub fn get_valid_extensions_for_path(&self, path: &str) -> Vec<String> {
        let table = self.extension_table();
        let mut extensions: Vec<String> = table
            .iter()
            .filter(|(extension, key)| {
                ends_with_dot_extension(path, extension) && self.formats.is_template_language(key)
            })
            .map(|(extension, _)| extension.to_string())
            .collect();

        extensions.sort_by(|a, b| b.len().cmp(&a.len()));
        extensions
    }

    /// Whether the engine for `path` needs its JavaScript dependency graph
    /// walked.
    ///
    /// Candidates from [`get_valid_extensions_for_path`](Self::get_valid_extensions_for_path)
    /// are tried longest first. The first extension with a cached decision or
    /// a resolvable engine class decides; later candidates are not consulted.
    /// Decisions are cached per extension. When no candidate resolves an
    /// engine the answer is `false` and nothing is cached.
    ///
    /// Concurrent calls for an uncached extension may each query the engine
    /// registry.
    pub async fn should_spider_javascript_dependencies(&self, path: &str) -> bool {
        for extension in self.get_valid_extensions_for_path(path) {
            if let Some(cached) = self.spider_cache.get(&extension).map(|decision| *decision) {
                trace!("Spider decision for '{}' cached: {}", extension, cached);
                return cached;
            }

            let Some(class) = self.engines.engine_class_by_extension(&extension).await else {
                trace!("No engine class for extension '{}'", extension);
                continue;
            };

            let entry = self.get_custom_extension_entry(&extension);
            let should_spider = class.should_spider_javascript_dependencies(entry.as_ref());
            debug!(
                "Engine '{}' for extension '{}' spiders JavaScript dependencies: {}",
                class.name(),
                extension,
                should_spider
            );
            self.spider_cache.insert(extension, should_spider);
            return should_spider;
        }

        false
    }

    /// Number of cached spidering decisions.
    pub fn spider_cache_len(&self) -> usize {
        self.spider_cache.len()
    }

    /// Glob for the passthrough copy formats.
    pub fn get_passthrough_copy_globs(&self, input_dir: &str) -> Vec<String> {
        self.globs_for(&self.formats.passthrough_copy_keys, input_dir)
    }

    /// Glob for the template language formats.
    pub fn get_valid_globs(&self, input_dir: &str) -> Vec<String> {
        self.globs_for(&self.formats.valid_template_language_keys, input_dir)
    }

    /// Glob for every active format.
    pub fn get_globs(&self, input_dir: &str) -> Vec<String> {
        self.globs_for(&self.formats.unfiltered_format_keys, input_dir)
    }

    /// Build zero or one glob over `format_keys` rooted at `input_dir`.
    ///
    /// Template language keys expand to all their extensions; other tokens are
    /// used as literal extensions. Extensions are not de-duplicated, so two
    /// active keys sharing an extension list it twice.
    fn globs_for(&self, format_keys: &[String], input_dir: &str) -> Vec<String> {
        let table = self.extension_table();
        let mut extensions: Vec<&str> = Vec::new();
        for key in format_keys {
            if table.has_key(key) {
                extensions.extend(table.extensions_for_key(key));
            } else {
                extensions.push(key);
            }
        }

        let dir = convert_to_recursive_glob(input_dir);
        match extensions.as_slice() {
            [] => Vec::new(),
            [extension] => vec![format!("{dir}/*.{extension}")],
            _ => vec![format!("{dir}/*.{{{}}}", extensions.join(","))],
        }
    }

    /// Whether any extension maps to `key`.
    pub fn has_extension(&self, key: &str) -> bool {
        self.extension_table().has_key(key)
    }

    /// Every extension mapping to `key`, in table order.
    pub fn get_extensions_from_key(&self, key: &str) -> Vec<String> {
        self.extension_table().extensions_for_key(key).map(str::to_string).collect()
    }

    /// First custom registration for exactly `extension`.
    ///
    /// Built-ins are never returned.
    pub fn get_custom_extension_entry(&self, extension: &str) -> Option<ExtensionRegistration> {
        self.config().custom_extensions().iter().find(|entry| entry.extension == extension).cloned()
    }

    /// Custom registrations for `key`, in configuration order.
    pub fn get_extension_entries_from_key(&self, key: &str) -> Vec<ExtensionRegistration> {
        self.config().custom_extensions().iter().filter(|entry| entry.key == key).cloned().collect()
    }

    /// Whether a template language handles `path_or_key`.
    pub fn has_engine(&self, path_or_key: &str) -> bool {
        self.get_key(path_or_key).is_some()
    }

    /// Template language key for a path or bare extension.
    ///
    /// The input is lower-cased, then the first table extension (in table
    /// order) that equals it or is a `.extension` suffix of it decides.
    pub fn get_key(&self, path_or_key: &str) -> Option<String> {
        let needle = path_or_key.to_lowercase();
        self.extension_table()
            .iter()
            .find(|(extension, _)| matches_extension(&needle, extension))
            .map(|(_, key)| key.to_string())
    }

    /// Strip the first registered extension (in table order) from `path`.
    ///
    /// A path equal to an extension becomes empty; a path with no registered
    /// extension is returned unchanged.
    pub fn remove_template_extension<'a>(&self, path: &'a str) -> &'a str {
        let table = self.extension_table();
        match table.extensions().find(|extension| matches_extension(path, extension)) {
            Some(extension) => &path[..path.len().saturating_sub(extension.len() + 1)],
            None => path,
        }
    }

    /// Every registered extension, in table order.
    pub fn get_all_template_keys(&self) -> Vec<String> {
        self.extension_table().extensions().map(str::to_string).collect()
    }

    /// Registered extensions joined by spaces, for messages.
    pub fn get_readable_file_extensions(&self) -> String {
        self.extension_table().extensions().collect::<Vec<_>>().join(" ")
    }
}
