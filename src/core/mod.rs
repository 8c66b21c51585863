//! Core types for the extension map
//!
//! This module holds the error types shared by the rest of the crate:
//! - [`ExtensionMapError`] - enumerated failure modes (configuration wiring and loading)
//! - [`ErrorContext`] - user-facing wrapper with details and suggestions
//! - [`user_friendly_error`] - convert any `anyhow::Error` into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust
//! use template_extension_map::core::{ExtensionMapError, user_friendly_error};
//!
//! let error = anyhow::Error::from(ExtensionMapError::InvalidConfig {
//!     reason: "unbound store".to_string(),
//! });
//! let friendly = user_friendly_error(error);
//! assert!(friendly.suggestion.is_some());
//! ```

pub mod error;

pub use error::{ErrorContext, ExtensionMapError, user_friendly_error};

/// Result alias for operations that fail with [`ExtensionMapError`].
pub type Result<T, E = ExtensionMapError> = std::result::Result<T, E>;
