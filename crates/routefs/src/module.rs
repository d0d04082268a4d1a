// File: src/module.rs
// Purpose: Route module exports and the loaders that produce them

use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::host::Middleware;

/// Shape of the value a route file exports
///
/// Decided once when the module is loaded; the loader never probes the
/// value again afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Exported<H, M> {
    /// A bare handler
    Handler(H),
    /// A module object with an optional `default` handler and an optional
    /// pre-handler middleware (the `_` member)
    Module {
        default: Option<H>,
        middleware: Option<M>,
    },
    /// Anything else: helpers, fixtures, data
    Inert,
}

impl<H, M> Exported<H, M> {
    /// Module exporting `default` with no middleware
    pub fn with_default(handler: H) -> Self {
        Exported::Module {
            default: Some(handler),
            middleware: None,
        }
    }

    /// Module exporting `default` behind `middleware`
    pub fn with_middleware(middleware: M, handler: H) -> Self {
        Exported::Module {
            default: Some(handler),
            middleware: Some(middleware),
        }
    }

    /// Split into the middleware and handler to register
    ///
    /// Returns `None` when there is no handler to register.
    pub fn into_parts(self) -> Option<(Middleware<M>, H)> {
        match self {
            Exported::Handler(handler) => Some((Middleware::Passthrough, handler)),
            Exported::Module {
                default: Some(handler),
                middleware,
            } => Some((Middleware::from(middleware), handler)),
            Exported::Module { default: None, .. } | Exported::Inert => None,
        }
    }

    /// Whether this export can be registered
    pub fn is_routable(&self) -> bool {
        matches!(
            self,
            Exported::Handler(_) | Exported::Module { default: Some(_), .. }
        )
    }
}

/// Loads the export of a route file
///
/// Errors are fatal to the load in progress: a route file that fails to load
/// is a configuration error.
pub trait ModuleLoader {
    type Handler;
    type Middleware;

    fn load(&self, path: &Path) -> Result<Exported<Self::Handler, Self::Middleware>>;
}

impl<L: ModuleLoader + ?Sized> ModuleLoader for &L {
    type Handler = L::Handler;
    type Middleware = L::Middleware;

    fn load(&self, path: &Path) -> Result<Exported<Self::Handler, Self::Middleware>> {
        (**self).load(path)
    }
}

/// In-memory table of route modules, keyed by absolute file path
///
/// Stands in for a module system: the application declares what each route
/// file exports, relative to the routes root.
///
/// # Examples
///
/// ```
/// use routefs::{Exported, ModuleLoader, ModuleRegistry};
/// use std::path::Path;
///
/// let mut modules: ModuleRegistry<&str, &str> = ModuleRegistry::new("/srv/app/routes");
/// modules.define("index.js", Exported::Handler("home"));
/// modules.define("users/index.js", Exported::with_middleware("auth", "users"));
///
/// let export = modules.load(Path::new("/srv/app/routes/index.js")).unwrap();
/// assert_eq!(export, Exported::Handler("home"));
/// assert!(modules.load(Path::new("/srv/app/routes/missing.js")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ModuleRegistry<H, M> {
    root: PathBuf,
    modules: HashMap<PathBuf, Exported<H, M>>,
}

impl<H, M> ModuleRegistry<H, M> {
    /// Create an empty registry for files under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: routefs_router::normalize(&root.into()),
            modules: HashMap::new(),
        }
    }

    /// Declare the export of `file` (relative to the root, or absolute)
    pub fn define(&mut self, file: impl AsRef<Path>, export: Exported<H, M>) -> &mut Self {
        let path = routefs_router::normalize(&self.root.join(file));
        self.modules.insert(path, export);
        self
    }

    /// Builder form of [`define`](Self::define)
    pub fn with(mut self, file: impl AsRef<Path>, export: Exported<H, M>) -> Self {
        self.define(file, export);
        self
    }

    /// Get the registry root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get total number of declared modules
    pub fn count(&self) -> usize {
        self.modules.len()
    }
}

impl<H: Clone, M: Clone> ModuleLoader for ModuleRegistry<H, M> {
    type Handler = H;
    type Middleware = M;

    fn load(&self, path: &Path) -> Result<Exported<H, M>> {
        self.modules
            .get(&routefs_router::normalize(path))
            .cloned()
            .ok_or_else(|| anyhow!("Cannot find module {:?}", path))
    }
}

/// Caches a loader's exports so each file is loaded once
///
/// Keys are canonical absolute paths when the file exists, so different
/// spellings of one file share an entry. Failed loads are not cached.
pub struct ModuleCache<L: ModuleLoader> {
    inner: L,
    exports: Mutex<HashMap<PathBuf, Exported<L::Handler, L::Middleware>>>,
}

impl<L: ModuleLoader> ModuleCache<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            exports: Mutex::new(HashMap::new()),
        }
    }

    /// Get total number of cached exports
    pub fn count(&self) -> usize {
        self.exports.lock().len()
    }

    /// Drop every cached export
    pub fn clear(&self) {
        self.exports.lock().clear();
    }

    /// Get the wrapped loader
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L> ModuleLoader for ModuleCache<L>
where
    L: ModuleLoader,
    L::Handler: Clone,
    L::Middleware: Clone,
{
    type Handler = L::Handler;
    type Middleware = L::Middleware;

    fn load(&self, path: &Path) -> Result<Exported<L::Handler, L::Middleware>> {
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| routefs_router::normalize(path));

        if let Some(export) = self.exports.lock().get(&key) {
            return Ok(export.clone());
        }

        // Lock released while loading: a loader may load other modules
        let export = self.inner.load(path)?;
        Ok(self.exports.lock().entry(key).or_insert(export).clone())
    }
}
