//! # routefs router
//!
//! File-system route discovery:
//! - Recursive, deterministically ordered directory scan (`index` files first)
//! - File-name filtering with an explicit predicate (`.js` by default)
//! - File path to URL route conversion relative to a base directory
//!
//! ## Conventions
//!
//! - `routes/index.js` → `/`
//! - `routes/about.js` → `/about`
//! - `routes/users/index.js` → `/users`
//! - `routes/users/profile.js` → `/users/profile`
//!
//! ## Example
//!
//! ```no_run
//! use routefs_router::{path_to_route, DirectoryScanner, FileFilter};
//! use std::path::Path;
//!
//! let root = Path::new("/srv/app/routes");
//! let files = DirectoryScanner::new(FileFilter::default()).scan(root).unwrap();
//!
//! for file in &files {
//!     println!("{} -> {}", path_to_route(file, Some(root)), file.display());
//! }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
pub mod filter;
pub mod path;
pub mod route;
pub mod scan;

pub use error::{Error, Result};
pub use filter::FileFilter;
pub use path::{is_canonical_route, normalize, validate_target};
pub use route::{path_to_route, DiscoveredRoute};
pub use scan::{scan, DirectoryScanner, INDEX_MARKER};
