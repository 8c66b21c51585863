//! Global constants used throughout the crate.
//!
//! This module contains the built-in extension registrations and the
//! default set of template formats. These are part of the external
//! contract: downstream file discovery depends on the exact extension
//! spellings and their order.

/// Built-in extension to template language key registrations.
///
/// Order matters: the extension table is built by inserting these first,
/// and lookups that scan the table (`get_key`, `remove_template_extension`)
/// return the first match in this order.
///
/// The three JavaScript module suffixes all alias the `11ty.js` key.
pub const BUILTIN_EXTENSIONS: &[(&str, &str)] = &[
    ("md", "md"),
    ("html", "html"),
    ("njk", "njk"),
    ("liquid", "liquid"),
    ("11ty.js", "11ty.js"),
    ("11ty.cjs", "11ty.js"),
    ("11ty.mjs", "11ty.js"),
];

/// Template formats used when a configuration snapshot declares none.
pub const DEFAULT_TEMPLATE_FORMATS: &[&str] = &["liquid", "md", "njk", "html", "11ty.js"];

/// Recursive glob suffix appended to input directories.
pub const RECURSIVE_GLOB_SUFFIX: &str = "**";
