//! Error handling for the extension map
//!
//! This module provides the error types used by the crate and a small
//! user-facing wrapper for presenting them. The error system follows two
//! principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for build tools
//!
//! Almost every lookup in this crate is total: unknown extensions, keys, and
//! paths produce empty results, `false`, or `None`. The errors below are
//! reserved for construction-time wiring problems and configuration loading.
//!
//! # Examples
//!
//! ```rust,no_run
//! use template_extension_map::core::{ExtensionMapError, ErrorContext};
//!
//! let error = ExtensionMapError::InvalidConfig {
//!     reason: "store has no configuration snapshot".to_string(),
//! };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Load a build configuration before creating the extension map");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for extension map operations.
///
/// # Error Categories
///
/// ## Wiring
/// - [`InvalidConfig`] - The configuration store could not provide a snapshot
///
/// ## Configuration Loading
/// - [`ConfigRead`] - The configuration file could not be read
/// - [`ConfigParse`] - The configuration file is not valid TOML for [`BuildConfig`]
/// - [`InvalidRegistration`] - A custom extension registration is malformed
///
/// ## Other
/// - [`Other`] - Any failure from outside this crate, kept as its message
///
/// [`InvalidConfig`]: ExtensionMapError::InvalidConfig
/// [`ConfigRead`]: ExtensionMapError::ConfigRead
/// [`ConfigParse`]: ExtensionMapError::ConfigParse
/// [`InvalidRegistration`]: ExtensionMapError::InvalidRegistration
/// [`Other`]: ExtensionMapError::Other
/// [`BuildConfig`]: crate::config::BuildConfig
#[derive(Error, Debug)]
pub enum ExtensionMapError {
    /// The configuration binding is missing or unusable.
    ///
    /// Raised when an [`ExtensionMap`](crate::extension_map::ExtensionMap) is
    /// constructed over a store that cannot produce a configuration snapshot.
    /// This is fatal: surfacing it at construction avoids confusing lookup
    /// failures later.
    #[error("Missing or invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the binding was rejected
        reason: String,
    },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {file}")]
    ConfigRead {
        /// Path of the configuration file
        file: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parsing error
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParse {
        /// Path of the configuration file
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Custom extension registration is malformed
    #[error("Invalid extension registration '{extension}': {reason}")]
    InvalidRegistration {
        /// The extension as written in the registration
        extension: String,
        /// Why the registration was rejected
        reason: String,
    },

    /// Error that did not originate in this crate
    #[error("{message}")]
    Other {
        /// Full message chain of the original error
        message: String,
    },
}

/// Error wrapper carrying user-facing details and suggestions.
///
/// Displayed in colour on stderr via [`display`](ErrorContext::display), or
/// as plain text via [`fmt::Display`] for logs.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ExtensionMapError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ExtensionMapError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// Errors that are not an [`ExtensionMapError`] anywhere in their chain are
/// reported as [`ExtensionMapError::Other`] carrying the full message chain,
/// with no suggestion attached.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let Some(known) = error.chain().find_map(|e| e.downcast_ref::<ExtensionMapError>()) else {
        return ErrorContext::new(ExtensionMapError::Other {
            message: format!("{error:#}"),
        });
    };

    match known {
        ExtensionMapError::InvalidConfig {
            reason,
        } => ErrorContext::new(ExtensionMapError::InvalidConfig {
            reason: reason.clone(),
        })
        .with_suggestion("Bind the extension map to a loaded build configuration"),
        ExtensionMapError::ConfigRead {
            file,
            source,
        } => ErrorContext::new(ExtensionMapError::ConfigRead {
            file: file.clone(),
            source: std::io::Error::new(source.kind(), source.to_string()),
        })
        .with_details(source.to_string())
        .with_suggestion("Check that the configuration file exists and is readable"),
        ExtensionMapError::ConfigParse {
            file,
            reason,
        } => ErrorContext::new(ExtensionMapError::ConfigParse {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_details(reason.clone())
        .with_suggestion(
            "Fix the TOML syntax; `template_formats` is a list of strings \
             and each `[[extension_map]]` needs `extension` and `key`",
        ),
        ExtensionMapError::InvalidRegistration {
            extension,
            reason,
        } => ErrorContext::new(ExtensionMapError::InvalidRegistration {
            extension: extension.clone(),
            reason: reason.clone(),
        })
        .with_suggestion(
            "Register extensions in lowercase without a leading dot, \
             e.g. `scss` or `11ty.ts`",
        ),
        ExtensionMapError::Other {
            message,
        } => ErrorContext::new(ExtensionMapError::Other {
            message: message.clone(),
        }),
    }
}
