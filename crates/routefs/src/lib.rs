// routefs - file-system routes for web applications
// Directory = route namespace, file name = route segment, `index` = namespace root

pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod module;

#[cfg(feature = "axum")]
pub mod axum_host;

// Re-export framework types
pub use config::{Config, RoutingConfig};
pub use error::{LoadError, Result};
pub use host::{Middleware, Registration, RouteHost, RouteTable};
pub use loader::{load_routes, LoadReport, RouteLoader, DEFAULT_TARGET};
pub use module::{Exported, ModuleCache, ModuleLoader, ModuleRegistry};

#[cfg(feature = "axum")]
pub use axum_host::{AxumHost, RouteMiddleware};

// Re-export the discovery layer
pub use routefs_router::{path_to_route, DirectoryScanner, DiscoveredRoute, FileFilter};

#[cfg(feature = "axum")]
pub use axum;
