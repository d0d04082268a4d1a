//! Recursive route-file discovery
//!
//! Produces the ordered file sequence route registration depends on: every
//! directory contributes its own matching files (index files first) before
//! the files of any of its subdirectories.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::filter::FileFilter;
use crate::path::{normalize, validate_target};

/// Substring that marks a file as an index file when sorting a directory
///
/// The test runs against the full path, so a file below a directory named
/// `index.js` also counts.
pub const INDEX_MARKER: &str = "index.js";

/// Scans a directory tree for route files
///
/// # Examples
///
/// ```no_run
/// use routefs_router::{DirectoryScanner, FileFilter};
///
/// let scanner = DirectoryScanner::new(FileFilter::extension("rs"))
///     .relative_to("/srv/app")
///     .follow_links(true);
///
/// // "./routes" resolves to "/srv/app/routes"
/// let files = scanner.scan("./routes").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner {
    filter: FileFilter,
    base_dir: Option<PathBuf>,
    follow_links: bool,
}

impl DirectoryScanner {
    /// Create a scanner keeping the files `filter` accepts
    pub fn new(filter: FileFilter) -> Self {
        Self {
            filter,
            base_dir: None,
            follow_links: false,
        }
    }

    /// Directory that `.`-prefixed roots resolve against (default: working directory)
    pub fn relative_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Follow symbolic links when classifying entries (default: false)
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Replace the file filter, keeping other options
    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Get the file filter
    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Scan `root` and return matching files in registration order
    ///
    /// A root that does not exist yields an empty sequence.
    pub fn scan(&self, root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let root = self.resolve(root.as_ref())?;
        let files = self.scan_dir(&root);
        debug!("Scanned {:?}: {} route files", root, files.len());
        Ok(files)
    }

    /// Validate `root` and resolve `.`-prefixed paths against the base directory
    pub fn resolve(&self, root: &Path) -> Result<PathBuf> {
        let text = validate_target(root)?;

        if !text.starts_with('.') {
            return Ok(root.to_path_buf());
        }

        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => match std::env::current_dir() {
                Ok(cwd) => cwd,
                Err(e) => {
                    warn!("Cannot read working directory, scanning {:?} as given: {}", root, e);
                    return Ok(root.to_path_buf());
                }
            },
        };

        Ok(normalize(&base.join(root)))
    }

    /// Files of `dir` (index first), then each subdirectory's results in order
    fn scan_dir(&self, dir: &Path) -> Vec<PathBuf> {
        if !dir.exists() {
            trace!("Skipping missing directory {:?}", dir);
            return Vec::new();
        }

        let (files, dirs) = self.read_entries(dir);
        let mut files: Vec<PathBuf> = files
            .into_iter()
            .filter(|file| self.accepts(file))
            .collect();

        // Stable: non-index files keep their name order
        files.sort_by_key(|file| !is_index_file(file));

        for sub in &dirs {
            files.extend(self.scan_dir(sub));
        }
        files
    }

    /// Partition the immediate entries of `dir` into files and directories
    fn read_entries(&self, dir: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_file() {
                files.push(entry.into_path());
            } else if file_type.is_dir() {
                dirs.push(entry.into_path());
            } else {
                trace!("Ignoring {:?}: neither file nor directory", entry.path());
            }
        }

        (files, dirs)
    }

    fn accepts(&self, file: &Path) -> bool {
        match file.file_name().and_then(|name| name.to_str()) {
            Some(name) => self.filter.matches(name),
            None => {
                debug!("Skipping {:?}: file name is not UTF-8", file);
                false
            }
        }
    }
}

/// Scan `root` with `filter` and default options
pub fn scan(root: impl AsRef<Path>, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    DirectoryScanner::new(filter.clone()).scan(root)
}

fn is_index_file(path: &Path) -> bool {
    path.to_string_lossy().contains(INDEX_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_resolve_rejects_empty() {
        let scanner = DirectoryScanner::default();
        assert!(matches!(
            scanner.resolve(Path::new("")),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_relative_marker() {
        let scanner = DirectoryScanner::default().relative_to("/srv/app");
        assert_eq!(
            scanner.resolve(Path::new("./routes")).unwrap(),
            PathBuf::from("/srv/app/routes")
        );
        assert_eq!(
            scanner.resolve(Path::new("../shared/routes")).unwrap(),
            PathBuf::from("/srv/shared/routes")
        );
    }

    #[test]
    fn test_resolve_keeps_other_paths() {
        let scanner = DirectoryScanner::default().relative_to("/srv/app");
        assert_eq!(
            scanner.resolve(Path::new("/abs/routes")).unwrap(),
            PathBuf::from("/abs/routes")
        );
        assert_eq!(
            scanner.resolve(Path::new("routes")).unwrap(),
            PathBuf::from("routes")
        );
    }

    #[test]
    fn test_is_index_file_substring() {
        assert!(is_index_file(Path::new("/r/index.js")));
        assert!(is_index_file(Path::new("/r/myindex.js")));
        assert!(is_index_file(Path::new("/r/index.js/about.js")));
        assert!(!is_index_file(Path::new("/r/index.ts")));
    }

    #[test]
    fn test_scan_dir_index_first() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "about.js");
        touch(tmp.path(), "contact.js");
        touch(tmp.path(), "index.js");

        let files = DirectoryScanner::default().scan_dir(tmp.path());
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["index.js", "about.js", "contact.js"]);
    }

    #[test]
    fn test_root_that_is_a_file() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "index.js");
        let files = DirectoryScanner::default()
            .scan(tmp.path().join("index.js"))
            .unwrap();
        assert!(files.is_empty());
    }
}
