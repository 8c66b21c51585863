//! Active format classification.

use super::ExtensionTable;

/// Active formats split into template languages and passthrough copies.
///
/// Built from a user-declared format list. Each token is trimmed and
/// lower-cased; a token that is a *key* in the extension table is a template
/// language, anything else is copied verbatim. Declaration order is kept
/// within each list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatClassification {
    /// Tokens exactly as supplied.
    pub format_keys: Vec<String>,
    /// Normalised tokens, in declaration order.
    pub unfiltered_format_keys: Vec<String>,
    /// Normalised tokens that name a template language key.
    pub valid_template_language_keys: Vec<String>,
    /// Normalised tokens with no engine behind them.
    pub passthrough_copy_keys: Vec<String>,
}

impl FormatClassification {
    /// Classify `formats` against `table`.
    pub fn classify<I, S>(formats: I, table: &ExtensionTable) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let format_keys: Vec<String> =
            formats.into_iter().map(|format| format.as_ref().to_string()).collect();
        let unfiltered_format_keys: Vec<String> =
            format_keys.iter().map(|key| key.trim().to_lowercase()).collect();

        let (valid_template_language_keys, passthrough_copy_keys): (Vec<String>, Vec<String>) =
            unfiltered_format_keys.iter().cloned().partition(|key| table.has_key(key));

        Self {
            format_keys,
            unfiltered_format_keys,
            valid_template_language_keys,
            passthrough_copy_keys,
        }
    }

    /// Whether `key` is an active template language key.
    pub fn is_template_language(&self, key: &str) -> bool {
        self.valid_template_language_keys.iter().any(|k| k == key)
    }
}
