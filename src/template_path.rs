//! Path helpers for building discovery globs.
//!
//! These functions are purely lexical. They never touch the filesystem: the
//! input directory passed to glob construction is always treated as a
//! directory.

use crate::constants::RECURSIVE_GLOB_SUFFIX;

/// Prefix a relative path with `./`.
///
/// - `"."` and `".."` become `"./"` and `"../"`
/// - absolute paths and paths already starting with `./` or `../` are unchanged
/// - everything else gains a `./` prefix
///
/// # Examples
///
/// ```rust
/// use template_extension_map::template_path::add_leading_dot_slash;
///
/// assert_eq!(add_leading_dot_slash("src"), "./src");
/// assert_eq!(add_leading_dot_slash("./src"), "./src");
/// assert_eq!(add_leading_dot_slash("."), "./");
/// assert_eq!(add_leading_dot_slash("/abs/src"), "/abs/src");
/// ```
pub fn add_leading_dot_slash(path: &str) -> String {
    if path == "." || path == ".." {
        return format!("{path}/");
    }
    if is_absolute(path) || path.starts_with("./") || path.starts_with("../") {
        return path.to_string();
    }
    format!("./{path}")
}

/// Convert an input directory into a recursive glob root.
///
/// An empty path means the current directory. The result never ends with a
/// slash, so callers append `/*.ext` directly.
///
/// # Examples
///
/// ```rust
/// use template_extension_map::template_path::convert_to_recursive_glob;
///
/// assert_eq!(convert_to_recursive_glob(""), "./**");
/// assert_eq!(convert_to_recursive_glob("src"), "./src/**");
/// assert_eq!(convert_to_recursive_glob("src/"), "./src/**");
/// assert_eq!(convert_to_recursive_glob("."), "./**");
/// ```
pub fn convert_to_recursive_glob(path: &str) -> String {
    if path.is_empty() {
        return format!("./{RECURSIVE_GLOB_SUFFIX}");
    }

    let dir = add_leading_dot_slash(path);
    if dir.ends_with('/') {
        format!("{dir}{RECURSIVE_GLOB_SUFFIX}")
    } else {
        format!("{dir}/{RECURSIVE_GLOB_SUFFIX}")
    }
}

fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }
    // Windows drive letter, e.g. `C:\` or `C:/`
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}
