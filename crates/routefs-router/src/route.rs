//! File path to URL route conversion
//!
//! The route of a file is the chain of directory names between the base
//! directory and the file, followed by the file's stem. A trailing `index`
//! stem is dropped so the directory itself becomes the route.

use std::path::{Path, PathBuf};

use crate::path::{normalize, segments};

/// Stem that makes a file its directory's own route
pub const INDEX_STEM: &str = "index";

/// A route file paired with the route it maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRoute {
    /// Canonical URL route like `/users/profile`
    pub route: String,
    /// Absolute path of the file
    pub file: PathBuf,
}

impl DiscoveredRoute {
    /// Maps `file` relative to `base` and pairs the two
    pub fn new(file: impl Into<PathBuf>, base: &Path) -> Self {
        let file = file.into();
        Self {
            route: path_to_route(&file, Some(base)),
            file,
        }
    }
}

/// Converts a file path into a URL route
///
/// With a base, segments are collected walking backwards from the file until
/// one equals the base directory's own name. Any segment with that name ends
/// the walk, so `routes/admin/routes/list.js` maps to `/list`.
///
/// Without a base (or with an empty one), only the file stem is used.
///
/// # Examples
///
/// ```
/// use routefs_router::path_to_route;
/// use std::path::Path;
///
/// let base = Path::new("/srv/app/routes");
/// assert_eq!(path_to_route("/srv/app/routes/index.js", Some(base)), "/");
/// assert_eq!(path_to_route("/srv/app/routes/about.js", Some(base)), "/about");
/// assert_eq!(path_to_route("/srv/app/routes/users/index.js", Some(base)), "/users");
/// assert_eq!(path_to_route("/srv/app/routes/users/profile.js", Some(base)), "/users/profile");
///
/// assert_eq!(path_to_route("/anywhere/index.js", None), "/");
/// assert_eq!(path_to_route("/anywhere/about.js", None), "/about");
/// ```
pub fn path_to_route(file: impl AsRef<Path>, base: Option<&Path>) -> String {
    let file = strip_extension(&normalize(file.as_ref()));

    match base.filter(|base| !base.as_os_str().is_empty()) {
        Some(base) => {
            let base_name = segments(&normalize(base)).pop().unwrap_or_default();
            let segs = segments(&file);
            let collected = collect_segments(&segs, &base_name);
            format!("/{}", collected.join("/"))
        }
        None => {
            let stem = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if stem == INDEX_STEM {
                "/".to_string()
            } else {
                format!("/{}", stem)
            }
        }
    }
}

/// Removes the extension of the last segment (`a/b.test.js` → `a/b.test`)
fn strip_extension(path: &Path) -> PathBuf {
    match path.file_stem() {
        Some(stem) if path.extension().is_some() => path.with_file_name(stem),
        _ => path.to_path_buf(),
    }
}

/// Walks segments backwards, stopping at `base_name`
///
/// Skips a trailing `index` segment and empty segments; returns the kept
/// segments in path order.
fn collect_segments<'a>(segments: &'a [String], base_name: &str) -> Vec<&'a str> {
    let last = segments.len().saturating_sub(1);

    let mut collected: Vec<&str> = segments
        .iter()
        .enumerate()
        .rev()
        .take_while(|(_, segment)| segment.as_str() != base_name)
        .filter(|(i, segment)| !(*i == last && segment.as_str() == INDEX_STEM))
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(_, segment)| segment.as_str())
        .collect();

    collected.reverse();
    collected
}
