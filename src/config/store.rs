//! Configuration store seam.
//!
//! The extension map never owns configuration. It reads the current snapshot
//! from a [`ConfigStore`] every time it needs one and rebuilds its derived
//! extension table when the snapshot `Arc` changes.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::BuildConfig;
use crate::core::ExtensionMapError;

/// Source of configuration snapshots.
///
/// Returning `None` means the store is not bound to any configuration; the
/// extension map rejects such a store at construction time.
pub trait ConfigStore: Send + Sync {
    /// Current configuration snapshot.
    fn snapshot(&self) -> Option<Arc<BuildConfig>>;
}

impl ConfigStore for Arc<BuildConfig> {
    fn snapshot(&self) -> Option<Arc<BuildConfig>> {
        Some(Arc::clone(self))
    }
}

/// In-memory configuration store with copy-on-write updates.
///
/// Every mutation installs a fresh `Arc<BuildConfig>`, so readers holding the
/// previous snapshot are unaffected and derived tables know to rebuild.
///
/// # Examples
///
/// ```rust
/// use template_extension_map::config::{BuildConfig, ConfigStore, TemplateConfig};
///
/// let store = TemplateConfig::new(BuildConfig::default());
/// let before = store.snapshot().unwrap();
///
/// store.update(|config| config.add_extension("scss", "scss")).unwrap();
/// let after = store.snapshot().unwrap();
///
/// assert!(before.custom_extensions().is_empty());
/// assert_eq!(after.custom_extensions().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TemplateConfig {
    current: RwLock<Option<Arc<BuildConfig>>>,
}

impl TemplateConfig {
    /// Create a store bound to `config`.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(config))),
        }
    }

    /// Create a store with no configuration bound.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Install a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionMapError::InvalidRegistration`] if `config` holds a
    /// malformed registration; the current snapshot is kept.
    pub fn replace(&self, config: BuildConfig) -> Result<(), ExtensionMapError> {
        config.validate()?;
        debug!(
            "Replacing build configuration snapshot ({} custom extensions)",
            config.custom_extensions().len()
        );
        self.install(config);
        Ok(())
    }

    /// Edit a copy of the current snapshot and install it.
    ///
    /// An unbound store starts from [`BuildConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns the error from `edit`, or [`ExtensionMapError::InvalidRegistration`]
    /// if the edited copy does not validate. Either way the current snapshot
    /// is kept.
    pub fn update<F>(&self, edit: F) -> Result<(), ExtensionMapError>
    where
        F: FnOnce(&mut BuildConfig) -> Result<(), ExtensionMapError>,
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.as_deref().cloned().unwrap_or_default();
        edit(&mut next)?;
        next.validate()?;
        *guard = Some(Arc::new(next));
        Ok(())
    }

    /// Replace the snapshot with defaults, dropping all custom registrations.
    pub fn reset(&self) {
        debug!("Resetting build configuration to defaults");
        self.install(BuildConfig::default());
    }

    fn install(&self, config: BuildConfig) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(config));
    }
}

impl ConfigStore for TemplateConfig {
    fn snapshot(&self) -> Option<Arc<BuildConfig>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
