//! Integration tests for RouteLoader
//!
//! Handlers and middleware are plain string labels registered on a
//! RouteTable, so assertions can compare registrations directly.

use pretty_assertions::assert_eq;
use routefs::*;
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

type Table = RouteTable<&'static str, &'static str>;
type Modules = ModuleRegistry<&'static str, &'static str>;

fn fixture(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for relative in files {
        let path = tmp.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }
    tmp
}

fn loader_for(tmp: &TempDir) -> RouteLoader {
    RouteLoader::with_app_root(tmp.path(), "/unused").unwrap()
}

#[test]
fn test_load_registers_in_discovery_order() {
    let tmp = fixture(&["about.js", "index.js", "users/index.js", "users/profile.js"]);
    let modules = Modules::new(tmp.path())
        .with("index.js", Exported::Handler("home"))
        .with("about.js", Exported::Handler("about"))
        .with("users/index.js", Exported::Handler("users"))
        .with("users/profile.js", Exported::Handler("profile"));

    let mut app = Table::new();
    let report = loader_for(&tmp).load(&mut app, &modules).unwrap();

    assert_eq!(app.routes(), vec!["/", "/about", "/users", "/users/profile"]);
    let handlers: Vec<_> = app.registrations().iter().map(|r| r.handler).collect();
    assert_eq!(handlers, vec!["home", "about", "users", "profile"]);
    assert_eq!(report.registered.len(), 4);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_load_middleware_substitution() {
    let tmp = fixture(&["index.js", "admin.js"]);
    let modules = Modules::new(tmp.path())
        .with("index.js", Exported::Handler("home"))
        .with("admin.js", Exported::with_middleware("require_admin", "admin"));

    let mut app = Table::new();
    loader_for(&tmp).load(&mut app, &modules).unwrap();

    assert_eq!(
        app.get("/").unwrap(),
        &Registration {
            route: "/".to_string(),
            middleware: Middleware::Passthrough,
            handler: "home",
        }
    );
    assert_eq!(
        app.get("/admin").unwrap(),
        &Registration {
            route: "/admin".to_string(),
            middleware: Middleware::Custom("require_admin"),
            handler: "admin",
        }
    );
}

#[test]
fn test_load_default_export_without_middleware() {
    let tmp = fixture(&["posts.js"]);
    let modules = Modules::new(tmp.path()).with("posts.js", Exported::with_default("posts"));

    let mut app = Table::new();
    loader_for(&tmp).load(&mut app, &modules).unwrap();

    let registration = app.get("/posts").unwrap();
    assert!(registration.middleware.is_passthrough());
    assert_eq!(registration.handler, "posts");
}

#[test]
fn test_load_skips_non_invocable_exports() {
    let tmp = fixture(&["index.js", "helpers.js", "partial.js"]);
    let modules = Modules::new(tmp.path())
        .with("index.js", Exported::Handler("home"))
        .with("helpers.js", Exported::Inert)
        .with(
            "partial.js",
            Exported::Module {
                default: None,
                middleware: Some("orphan"),
            },
        );

    let mut app = Table::new();
    let report = loader_for(&tmp).load(&mut app, &modules).unwrap();

    assert_eq!(app.routes(), vec!["/"]);
    assert_eq!(
        report.skipped,
        vec![tmp.path().join("helpers.js"), tmp.path().join("partial.js")]
    );
}

#[test]
fn test_load_aborts_on_module_error() {
    let tmp = fixture(&["index.js", "broken.js", "users/index.js"]);
    let modules = Modules::new(tmp.path())
        .with("index.js", Exported::Handler("home"))
        .with("users/index.js", Exported::Handler("users"));

    let mut app = Table::new();
    let err = loader_for(&tmp).load(&mut app, &modules).unwrap_err();

    match err {
        LoadError::Module { path, .. } => assert_eq!(path, tmp.path().join("broken.js")),
        other => panic!("expected module error, got {:?}", other),
    }
    // Files after the failing one are never processed
    assert_eq!(app.routes(), vec!["/"]);
}

#[test]
fn test_load_missing_directory_registers_nothing() {
    let tmp = TempDir::new().unwrap();
    let loader = RouteLoader::with_app_root("routes", tmp.path()).unwrap();
    let modules = Modules::new(loader.root());

    let mut app = Table::new();
    let report = loader.load(&mut app, &modules).unwrap();

    assert!(app.is_empty());
    assert_eq!(report, LoadReport::default());
}

#[test]
fn test_invalid_target() {
    let err = RouteLoader::with_app_root("", "/srv/app").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Scan(routefs_router::Error::InvalidArgument(_))
    ));
}

#[test]
fn test_target_resolved_against_app_root() {
    let loader = RouteLoader::with_app_root("./api/../routes", "/srv/app").unwrap();
    assert_eq!(loader.root(), Path::new("/srv/app/routes"));

    let loader = RouteLoader::with_app_root("/abs/routes", "/srv/app").unwrap();
    assert_eq!(loader.root(), Path::new("/abs/routes"));
}

#[test]
fn test_filter_applies_to_registration() {
    let tmp = fixture(&["index.rs", "users.rs", "notes.js"]);
    let modules = Modules::new(tmp.path())
        .with("index.rs", Exported::Handler("home"))
        .with("users.rs", Exported::Handler("users"));

    let mut app = Table::new();
    loader_for(&tmp)
        .with_filter(FileFilter::extension("rs"))
        .load(&mut app, &modules)
        .unwrap();

    assert_eq!(app.routes(), vec!["/", "/users"]);
}

#[test]
fn test_discover_does_not_load() {
    let tmp = fixture(&["index.js", "users/profile.js"]);

    let routes = loader_for(&tmp).discover().unwrap();

    assert_eq!(
        routes,
        vec![
            DiscoveredRoute {
                route: "/".to_string(),
                file: tmp.path().join("index.js"),
            },
            DiscoveredRoute {
                route: "/users/profile".to_string(),
                file: tmp.path().join("users/profile.js"),
            },
        ]
    );
}

#[test]
fn test_load_routes_entry_point() {
    let tmp = fixture(&["index.js", "about.js"]);
    let modules = Modules::new(tmp.path())
        .with("index.js", Exported::Handler("home"))
        .with("about.js", Exported::Handler("about"));

    let mut app = Table::new();
    load_routes(&mut app, Some(tmp.path()), None, &modules).unwrap();

    assert_eq!(app.routes(), vec!["/", "/about"]);
}

#[test]
fn test_with_config() {
    let tmp = fixture(&["pages/index.rs"]);
    let config = RoutingConfig {
        dir: tmp.path().join("pages").to_string_lossy().into_owned(),
        extension: Some("rs".to_string()),
        ..RoutingConfig::default()
    };

    let loader = RouteLoader::with_config(&config).unwrap();
    let routes = loader.discover().unwrap();

    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].route, "/");
}

struct CountingModules {
    inner: Modules,
    calls: Cell<usize>,
}

impl ModuleLoader for CountingModules {
    type Handler = &'static str;
    type Middleware = &'static str;

    fn load(&self, path: &Path) -> anyhow::Result<Exported<&'static str, &'static str>> {
        self.calls.set(self.calls.get() + 1);
        self.inner.load(path)
    }
}

#[test]
fn test_repeated_load_uses_module_cache() {
    let tmp = fixture(&["index.js", "about.js"]);
    let modules = ModuleCache::new(CountingModules {
        inner: Modules::new(tmp.path())
            .with("index.js", Exported::Handler("home"))
            .with("about.js", Exported::Handler("about")),
        calls: Cell::new(0),
    });
    let loader = loader_for(&tmp);

    let mut first = Table::new();
    let mut second = Table::new();
    loader.load(&mut first, &modules).unwrap();
    loader.load(&mut second, &modules).unwrap();

    assert_eq!(first.routes(), second.routes());
    assert_eq!(modules.inner().calls.get(), 2);
}
