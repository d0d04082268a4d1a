//! File-name filters for route discovery
//!
//! A filter is tested against a file's *name* only, never its directory, and
//! is never applied to directories.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Extension accepted by [`FileFilter::default`]
pub const DEFAULT_EXTENSION: &str = "js";

/// Predicate deciding which file names are route files
///
/// # Examples
///
/// ```
/// use routefs_router::FileFilter;
///
/// let filter = FileFilter::default();
/// assert!(filter.matches("users.js"));
/// assert!(!filter.matches("users.json"));
///
/// let filter = FileFilter::pattern(r"\.(js|mjs)$").unwrap();
/// assert!(filter.matches("users.mjs"));
/// ```
#[derive(Clone)]
pub struct FileFilter {
    kind: FilterKind,
}

#[derive(Clone)]
enum FilterKind {
    /// Name ends with `.{ext}`
    Extension(String),
    /// Unanchored regex search over the name
    Pattern(Regex),
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl FileFilter {
    /// Accepts names ending in `.{ext}` (a leading dot in `ext` is ignored)
    pub fn extension(ext: impl AsRef<str>) -> Self {
        let ext = ext.as_ref().trim_start_matches('.');
        Self {
            kind: FilterKind::Extension(format!(".{}", ext)),
        }
    }

    /// Accepts names in which `pattern` finds a match anywhere
    ///
    /// Anchor the pattern (`^...$`) to require a full match.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            kind: FilterKind::Pattern(regex),
        })
    }

    /// Accepts names for which `predicate` returns true
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            kind: FilterKind::Custom(Arc::new(predicate)),
        }
    }

    /// Tests a file name (not a path) against this filter
    pub fn matches(&self, file_name: &str) -> bool {
        match &self.kind {
            FilterKind::Extension(suffix) => file_name.ends_with(suffix.as_str()),
            FilterKind::Pattern(regex) => regex.is_match(file_name),
            FilterKind::Custom(predicate) => predicate(file_name),
        }
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::extension(DEFAULT_EXTENSION)
    }
}

impl fmt::Debug for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FilterKind::Extension(suffix) => f.debug_tuple("Extension").field(suffix).finish(),
            FilterKind::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            FilterKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
