mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::routes::RoutingOverrides;

#[derive(Parser)]
#[command(name = "routefs")]
#[command(version, about = "routefs CLI - routes from the file system", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = routefs::config::CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the routes discovered under the route directory, in registration order
    Routes {
        /// Route directory (overrides routing.dir)
        #[arg(short, long)]
        dir: Option<String>,

        /// Regex route file names must match (overrides routing.pattern)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Route file extension (overrides routing.extension)
        #[arg(short, long)]
        extension: Option<String>,

        /// Follow symbolic links while scanning
        #[arg(long)]
        follow_links: bool,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Routes {
            dir,
            pattern,
            extension,
            follow_links,
            json,
        } => {
            let overrides = RoutingOverrides {
                dir,
                pattern,
                extension,
                follow_links,
            };
            commands::routes::execute(&cli.config, overrides, json)?;
        }
    }

    Ok(())
}
