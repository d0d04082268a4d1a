use std::path::PathBuf;

/// Errors raised while preparing a scan
///
/// A missing route directory is not an error: scanning it yields no files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target is not usable as a path (empty, not UTF-8, or contains NUL)
    #[error("expecting target path to be a non-empty UTF-8 path, got {0:?}")]
    InvalidArgument(PathBuf),

    /// A filter pattern that does not compile as a regular expression
    #[error("invalid file filter pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
