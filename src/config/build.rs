//! Build configuration snapshot.
//!
//! A [`BuildConfig`] is an immutable snapshot of the settings the extension
//! map reads: the active template formats and the custom extension
//! registrations. Snapshots are shared as `Arc<BuildConfig>`; a new `Arc`
//! means a new snapshot, which is what the extension map keys its derived
//! table on.
//!
//! # File Format
//!
//! ```toml
//! template_formats = ["md", "njk", "scss", "css"]
//!
//! [[extension_map]]
//! extension = "scss"
//! key = "scss"
//!
//! [[extension_map]]
//! extension = "11ty.ts"
//! key = "11ty.js"
//!
//! [extension_map.compile_options]
//! spider_javascript_dependencies = true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ExtensionMapError;

/// One extension to template language key binding.
///
/// Built-ins are fixed (see [`BUILTIN_EXTENSIONS`](crate::constants::BUILTIN_EXTENSIONS));
/// everything else comes from configuration. Several extensions may share a
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRegistration {
    /// Lowercase file suffix without a leading dot. May be compound (`11ty.ts`).
    pub extension: String,
    /// Template language key selecting the rendering engine.
    pub key: String,
    /// Engine options forwarded to capability queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_options: Option<CompileOptions>,
}

/// Engine options carried by a custom registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Explicit answer to "does this engine need its module graph walked".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spider_javascript_dependencies: Option<bool>,
}

impl ExtensionRegistration {
    /// Create a registration with no compile options.
    pub fn new(extension: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            key: key.into(),
            compile_options: None,
        }
    }

    /// Attach compile options.
    #[must_use]
    pub fn with_compile_options(mut self, options: CompileOptions) -> Self {
        self.compile_options = Some(options);
        self
    }

    /// Explicit spidering preference from the compile options, if any.
    pub fn spider_javascript_dependencies(&self) -> Option<bool> {
        self.compile_options.as_ref().and_then(|o| o.spider_javascript_dependencies)
    }

    /// Check that the registration is usable as a table entry.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionMapError::InvalidRegistration`] if the extension is
    /// empty, starts with a dot, or contains uppercase characters, or if the
    /// key is empty.
    pub fn validate(&self) -> Result<(), ExtensionMapError> {
        let reason = if self.extension.is_empty() {
            Some("extension must not be empty")
        } else if self.extension.starts_with('.') {
            Some("extension must not start with a dot")
        } else if self.extension.chars().any(char::is_uppercase) {
            Some("extension must be lowercase")
        } else if self.key.trim().is_empty() {
            Some("key must not be empty")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ExtensionMapError::InvalidRegistration {
                extension: self.extension.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Snapshot of the build settings consumed by the extension map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Active format tokens, raw as the user wrote them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub template_formats: Vec<String>,

    /// Custom extension registrations, in declaration order.
    ///
    /// `None` and an empty list are equivalent for lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_map: Option<Vec<ExtensionRegistration>>,
}

impl BuildConfig {
    /// Parse a configuration from TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionMapError::ConfigParse`] for malformed TOML and
    /// [`ExtensionMapError::InvalidRegistration`] for bad registrations.
    pub fn from_toml_str(content: &str) -> Result<Self, ExtensionMapError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, file: &str) -> Result<Self, ExtensionMapError> {
        let config: Self = toml::from_str(content).map_err(|e| ExtensionMapError::ConfigParse {
            file: file.to_string(),
            reason: e.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// contains an invalid registration. The typed [`ExtensionMapError`] is
    /// available through `downcast_ref` on the returned error chain.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let file = path.display().to_string();
        let content =
            tokio::fs::read_to_string(path).await.map_err(|source| ExtensionMapError::ConfigRead {
                file: file.clone(),
                source,
            })?;

        let config = Self::parse(&content, &file)
            .with_context(|| format!("Failed to load build configuration from {file}"))?;

        debug!(
            "Loaded build configuration from {}: {} formats, {} custom extensions",
            file,
            config.template_formats.len(),
            config.custom_extensions().len()
        );
        Ok(config)
    }

    /// Validate every custom registration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ExtensionMapError::InvalidRegistration`] found.
    pub fn validate(&self) -> Result<(), ExtensionMapError> {
        self.custom_extensions().iter().try_for_each(ExtensionRegistration::validate)
    }

    /// Custom registrations as a slice; empty when none are configured.
    pub fn custom_extensions(&self) -> &[ExtensionRegistration] {
        self.extension_map.as_deref().unwrap_or(&[])
    }

    /// Register a custom extension for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionMapError::InvalidRegistration`] if the registration
    /// fails [`ExtensionRegistration::validate`]; the config is left unchanged.
    pub fn add_extension(
        &mut self,
        extension: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<(), ExtensionMapError> {
        self.add_registration(ExtensionRegistration::new(extension, key))
    }

    /// Register a custom extension with compile options.
    ///
    /// # Errors
    ///
    /// Same as [`add_extension`](Self::add_extension).
    pub fn add_extension_with_options(
        &mut self,
        extension: impl Into<String>,
        key: impl Into<String>,
        options: CompileOptions,
    ) -> Result<(), ExtensionMapError> {
        let registration = ExtensionRegistration::new(extension, key).with_compile_options(options);
        self.add_registration(registration)
    }

    /// Append a registration. Later registrations win on extension collision.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionMapError::InvalidRegistration`] for a malformed
    /// registration, which is not appended.
    pub fn add_registration(
        &mut self,
        registration: ExtensionRegistration,
    ) -> Result<(), ExtensionMapError> {
        registration.validate()?;
        self.extension_map.get_or_insert_with(Vec::new).push(registration);
        Ok(())
    }

    /// Replace the active template formats.
    pub fn set_template_formats<I, S>(&mut self, formats: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.template_formats = formats.into_iter().map(Into::into).collect();
    }
}
