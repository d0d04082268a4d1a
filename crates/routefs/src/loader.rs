// File: src/loader.rs
// Purpose: Discovers route files under a directory and registers them with a host

use routefs_router::{normalize, validate_target, DirectoryScanner, DiscoveredRoute, FileFilter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::RoutingConfig;
use crate::error::{LoadError, Result};
use crate::host::RouteHost;
use crate::module::ModuleLoader;

/// Route directory used when no target is given
pub const DEFAULT_TARGET: &str = "routes";

/// Outcome of a successful load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Registered routes in registration order
    pub registered: Vec<DiscoveredRoute>,
    /// Route files whose export had no handler
    pub skipped: Vec<PathBuf>,
}

/// Registers the route files of one directory tree with a host application
///
/// The target directory is resolved once, when the loader is built.
///
/// # Examples
///
/// ```no_run
/// use routefs::{Exported, ModuleRegistry, RouteLoader, RouteTable};
///
/// let loader = RouteLoader::new("routes").unwrap();
///
/// let modules: ModuleRegistry<&str, &str> = ModuleRegistry::new(loader.root())
///     .with("index.js", Exported::Handler("home"))
///     .with("users/index.js", Exported::with_middleware("auth", "users"));
///
/// let mut app = RouteTable::new();
/// let report = loader.load(&mut app, &modules).unwrap();
/// assert_eq!(report.registered.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RouteLoader {
    root: PathBuf,
    scanner: DirectoryScanner,
}

impl RouteLoader {
    /// Create a loader for `target`, relative to the working directory
    pub fn new(target: impl AsRef<Path>) -> Result<Self> {
        let app_root = std::env::current_dir().map_err(LoadError::AppRoot)?;
        Self::with_app_root(target, app_root)
    }

    /// Create a loader for the default `routes` directory
    pub fn from_default_target() -> Result<Self> {
        Self::new(DEFAULT_TARGET)
    }

    /// Create a loader for `target`, relative to `app_root`
    ///
    /// An absolute target is used as is.
    pub fn with_app_root(target: impl AsRef<Path>, app_root: impl AsRef<Path>) -> Result<Self> {
        let target = target.as_ref();
        validate_target(target)?;

        let root = normalize(&app_root.as_ref().join(target));
        debug!("Resolved route target {:?} to {:?}", target, root);

        Ok(Self {
            root,
            scanner: DirectoryScanner::default(),
        })
    }

    /// Create a loader from the routing section of the configuration
    pub fn with_config(config: &RoutingConfig) -> Result<Self> {
        Ok(Self::new(&config.dir)?
            .with_filter(config.filter()?)
            .follow_links(config.follow_links))
    }

    /// Use `filter` to select route files (default: `.js` files)
    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.scanner = self.scanner.with_filter(filter);
        self
    }

    /// Follow symbolic links while scanning (default: false)
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.scanner = self.scanner.follow_links(follow);
        self
    }

    /// Get the resolved route directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the file filter
    pub fn filter(&self) -> &FileFilter {
        self.scanner.filter()
    }

    /// List route files and their routes in registration order, without loading them
    pub fn discover(&self) -> Result<Vec<DiscoveredRoute>> {
        let files = self.scanner.scan(&self.root)?;
        Ok(files
            .into_iter()
            .map(|file| DiscoveredRoute::new(file, &self.root))
            .collect())
    }

    /// Load every route file and register its handler with `app`
    ///
    /// Files are processed in discovery order. A file whose export has no
    /// handler is skipped. The first module that fails to load aborts the
    /// load; files after it are not processed.
    pub fn load<A, L>(&self, app: &mut A, modules: &L) -> Result<LoadReport>
    where
        A: RouteHost,
        L: ModuleLoader<Handler = A::Handler, Middleware = A::Middleware> + ?Sized,
    {
        let mut report = LoadReport::default();

        for found in self.discover()? {
            let export = modules
                .load(&found.file)
                .map_err(|source| LoadError::Module {
                    path: found.file.clone(),
                    source,
                })?;

            match export.into_parts() {
                Some((middleware, handler)) => {
                    debug!("Registering {} -> {:?}", found.route, found.file);
                    app.register(&found.route, middleware, handler);
                    report.registered.push(found);
                }
                None => {
                    debug!("Skipping {:?}: export has no handler", found.file);
                    report.skipped.push(found.file);
                }
            }
        }

        info!(
            "Registered {} routes from {:?} ({} skipped)",
            report.registered.len(),
            self.root,
            report.skipped.len()
        );

        Ok(report)
    }
}

/// Register the route files under `target` (default `routes`) with `app`
///
/// Files are selected with `filter` (default: `.js` files).
pub fn load_routes<A, L>(
    app: &mut A,
    target: Option<&Path>,
    filter: Option<FileFilter>,
    modules: &L,
) -> Result<LoadReport>
where
    A: RouteHost,
    L: ModuleLoader<Handler = A::Handler, Middleware = A::Middleware> + ?Sized,
{
    let loader = RouteLoader::new(target.unwrap_or_else(|| Path::new(DEFAULT_TARGET)))?
        .with_filter(filter.unwrap_or_default());
    loader.load(app, modules)
}
