//! Path utilities for normalization and route validation
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Validates if a route string is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use routefs_router::path::is_canonical_route;
///
/// assert!(is_canonical_route("/"));
/// assert!(is_canonical_route("/about"));
/// assert!(is_canonical_route("/users/profile"));
///
/// assert!(!is_canonical_route(""));
/// assert!(!is_canonical_route("about")); // Missing leading /
/// assert!(!is_canonical_route("/about/")); // Trailing /
/// assert!(!is_canonical_route("/about//page")); // Double //
/// assert!(!is_canonical_route("/about\\page")); // Backslash
/// ```
pub fn is_canonical_route(route: &str) -> bool {
    if route.is_empty() || !route.starts_with('/') {
        return false;
    }

    if route.contains("//") || route.contains('\\') {
        return false;
    }

    route == "/" || !route.ends_with('/')
}

/// Checks that `target` can name a route directory
///
/// Route strings are built from path segments, so the path must be
/// non-empty UTF-8 without NUL bytes.
///
/// # Examples
///
/// ```
/// use routefs_router::path::validate_target;
/// use std::path::Path;
///
/// assert_eq!(validate_target(Path::new("routes")).unwrap(), "routes");
/// assert!(validate_target(Path::new("")).is_err());
/// ```
pub fn validate_target(target: &Path) -> Result<&str> {
    match target.to_str() {
        Some(text) if !text.is_empty() && !text.contains('\0') => Ok(text),
        _ => Err(Error::InvalidArgument(target.to_path_buf())),
    }
}

/// Lexically normalizes a filesystem path
///
/// Collapses repeated separators and `.` segments and resolves `..` against
/// the preceding segment. Nothing touches the filesystem, so symlinks are
/// not resolved. Leading `..` segments of a relative path are kept, and `..`
/// directly under the root is dropped.
///
/// # Examples
///
/// ```
/// use routefs_router::path::normalize;
/// use std::path::Path;
///
/// assert_eq!(normalize(Path::new("/srv//routes/./users/../about.js")), Path::new("/srv/routes/about.js"));
/// assert_eq!(normalize(Path::new("../routes/./x")), Path::new("../routes/x"));
/// assert_eq!(normalize(Path::new("./")), Path::new("."));
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }

    parts.iter().collect()
}

/// Splits a path into string segments the way a `/`-separated string splits
///
/// A root component becomes an empty leading segment, so `/srv/routes`
/// yields `["", "srv", "routes"]`.
pub(crate) fn segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::RootDir => Some(String::new()),
            Component::Prefix(prefix) => Some(prefix.as_os_str().to_string_lossy().into_owned()),
            Component::CurDir => None,
            Component::ParentDir => Some("..".to_string()),
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        })
        .collect()
}
