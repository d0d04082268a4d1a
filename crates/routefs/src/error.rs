use std::path::PathBuf;

/// Errors that abort a route load
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Invalid target or filter
    #[error(transparent)]
    Scan(#[from] routefs_router::Error),

    /// The working directory needed to resolve a relative target is unavailable
    #[error("cannot determine application root")]
    AppRoot(#[source] std::io::Error),

    /// A discovered route file failed to load; later files were not processed
    #[error("failed to load route module {path:?}")]
    Module {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
