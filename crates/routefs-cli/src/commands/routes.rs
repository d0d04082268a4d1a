use anyhow::{Context, Result};
use colored::Colorize;
use routefs::{Config, DiscoveredRoute, RouteLoader, RoutingConfig};
use serde_json::json;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Command-line values that replace configured routing settings
#[derive(Debug, Default)]
pub struct RoutingOverrides {
    pub dir: Option<String>,
    pub pattern: Option<String>,
    pub extension: Option<String>,
    pub follow_links: bool,
}

impl RoutingOverrides {
    fn apply(self, routing: &mut RoutingConfig) {
        if let Some(dir) = self.dir {
            routing.dir = dir;
        }
        if let Some(pattern) = self.pattern {
            routing.pattern = Some(pattern);
        }
        if let Some(extension) = self.extension {
            // An explicit extension replaces a configured pattern
            routing.extension = Some(extension);
            routing.pattern = None;
        }
        routing.follow_links |= self.follow_links;
    }
}

/// One line of the route table
#[derive(Debug, PartialEq)]
struct RouteRow {
    route: String,
    file: String,
    /// An earlier file already claimed this route
    shadowed: bool,
}

pub fn execute(config_path: &Path, overrides: RoutingOverrides, json: bool) -> Result<()> {
    let (loader, rows) = discover_rows(config_path, overrides)?;

    if json {
        println!("{}", render_json(&rows)?);
        return Ok(());
    }

    println!("{} {}", "Routes in".green().bold(), loader.root().display());
    println!();

    if !loader.root().exists() {
        println!("  {} Directory does not exist, no routes", "⚠".yellow());
        return Ok(());
    }

    let width = rows.iter().map(|row| row.route.len()).max().unwrap_or(0);
    for row in &rows {
        if row.shadowed {
            println!(
                "  {} {:<width$}  {} {}",
                "⚠".yellow(),
                row.route.yellow(),
                row.file,
                "(shadowed)".yellow()
            );
        } else {
            println!("  {} {:<width$}  {}", "→".cyan(), row.route, row.file);
        }
    }

    let shadowed = rows.iter().filter(|row| row.shadowed).count();
    println!();
    println!(
        "{} route files, {} shadowed",
        rows.len().to_string().bold(),
        shadowed
    );

    Ok(())
}

/// Resolve the routing configuration and list the route rows it produces
fn discover_rows(
    config_path: &Path,
    overrides: RoutingOverrides,
) -> Result<(RouteLoader, Vec<RouteRow>)> {
    let mut config = Config::load(config_path)?;
    overrides.apply(&mut config.routing);
    debug!("Routing configuration: {:?}", config.routing);

    let loader =
        RouteLoader::with_config(&config.routing).context("Invalid routing configuration")?;
    let routes = loader
        .discover()
        .with_context(|| format!("Failed to scan {:?}", loader.root()))?;
    let rows = route_table(&routes, loader.root());

    Ok((loader, rows))
}

fn render_json(rows: &[RouteRow]) -> Result<String> {
    let table: Vec<_> = rows
        .iter()
        .map(|row| json!({ "route": row.route, "file": row.file, "shadowed": row.shadowed }))
        .collect();
    Ok(serde_json::to_string_pretty(&table)?)
}

/// Route rows in registration order, files shown relative to `root`
fn route_table(routes: &[DiscoveredRoute], root: &Path) -> Vec<RouteRow> {
    let mut seen = HashSet::new();

    routes
        .iter()
        .map(|found| RouteRow {
            route: found.route.clone(),
            file: found
                .file
                .strip_prefix(root)
                .unwrap_or(&found.file)
                .to_string_lossy()
                .replace('\\', "/"),
            shadowed: !seen.insert(found.route.as_str()),
        })
        .collect()
}
