//! Subnautica Base Calculator
//!
//! Bill-of-materials calculator for Subnautica base building.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use subnautica_calculator::models::Section;
use subnautica_calculator::{Catalog, ItemId, Mode, Resolution, calculator, catalog, db};

/// Default log filter, extended by `RUST_LOG`
const DEFAULT_LOG_DIRECTIVE: &str = "subnautica_calculator=info";

#[derive(Parser)]
#[command(name = "subnautica-calculator")]
#[command(about = "Bill-of-materials calculator for Subnautica base building")]
struct Cli {
    /// SQLite catalog store; the built-in catalog is used when omitted
    #[arg(short, long, env = "SUBNAUTICA_DB")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the materials needed for one item
    Calc {
        /// Item id or display name (e.g., "moonpool", "Scanner Room")
        item: String,

        /// Number of units to build
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// How far to expand the recipe
        #[arg(short, long, value_enum, default_value_t = Mode::Flattened)]
        mode: Mode,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Total the materials for several items, e.g. `plan foundation=2 moonpool`
    Plan {
        /// Selections as ITEM or ITEM=COUNT
        #[arg(required = true, value_parser = parse_selection)]
        selections: Vec<(String, i64)>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List catalog items
    ListItems {
        /// Only list one build menu section
        #[arg(short, long, value_enum)]
        section: Option<Section>,
    },

    /// Show details for a specific item
    Item {
        /// Item id or display name
        item: String,
    },

    /// Initialize empty database with schema
    Init,

    /// Write the built-in catalog into the database
    LoadBuiltin,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(DEFAULT_LOG_DIRECTIVE.parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let path = require_database(cli.database.as_deref(), "init")?;
            open_store(path)?;
            println!("Database initialized at: {}", path.display());
        }

        Commands::LoadBuiltin => {
            let path = require_database(cli.database.as_deref(), "load-builtin")?;
            let mut conn = open_store(path)?;
            let builtin = catalog::builtin()?;
            db::store_catalog(&mut conn, builtin)?;
            println!("Loaded {} items into {}", builtin.len(), path.display());
        }

        Commands::Calc {
            item,
            quantity,
            mode,
            json,
        } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let target = catalog.find(&item)?;
            let resolution = calculator::resolve(&catalog, target.id.as_str(), mode, quantity)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else if resolution.is_empty() {
                println!("{} is a raw material; nothing to craft.", target.name);
            } else {
                match &resolution {
                    Resolution::Direct(recipe) => {
                        println!("Recipe for {}x {}:\n", quantity, target.name);
                        print!("{}", calculator::format_bill(&catalog, recipe));
                    }
                    Resolution::Expanded(tree) => {
                        println!("Recipe tree for {}x {}:\n", quantity, target.name);
                        print!("{}", calculator::format_recipe_tree(&catalog, tree, 1));
                    }
                    Resolution::Flattened(bill) => {
                        println!("Raw materials for {}x {}:\n", quantity, target.name);
                        print!("{}", calculator::format_bill(&catalog, bill));
                    }
                }
            }
        }

        Commands::Plan { selections, json } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let mut resolved: Vec<(ItemId, i64)> = Vec::with_capacity(selections.len());
            for (query, count) in selections {
                resolved.push((catalog.find(&query)?.id.clone(), count));
            }

            let summary = calculator::plan(&catalog, &resolved)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary);
            }
        }

        Commands::ListItems { section } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let items: Vec<_> = match section {
                Some(section) => catalog.section(section).collect(),
                None => catalog.items().iter().collect(),
            };

            if items.is_empty() {
                println!("No items in catalog. Run 'load-builtin' first.");
            } else {
                println!("{:<26} {:<24} {:<22}", "Item", "Id", "Category");
                println!("{}", "-".repeat(72));
                for item in items {
                    println!("{:<26} {:<24} {:<22}", item.name, item.id, item.category.kind());
                }
            }
        }

        Commands::Item { item } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let item = catalog.find(&item)?;

            println!("Item: {}", item.name);
            println!("  ID: {}", item.id);
            println!("  Category: {}", item.category.kind());
            if let Some(section) = item.section {
                println!("  Section: {}", section.display_name());
            }
            if let Some(si) = item.category.structural_integrity() {
                println!("  Structural integrity: {:+}", si);
            }
            if let Some(watts) = item.category.power_output() {
                println!("  Power output: {}", watts);
            }

            if !item.is_raw() {
                let recipe = catalog.lookup_recipe(item.id.as_str())?;
                println!("  Recipe:");
                for (component, quantity) in recipe {
                    println!("    {}x {}", quantity, component);
                }
            }

            let users = catalog.used_in(item.id.as_str());
            if !users.is_empty() {
                println!("  Used in:");
                for user in users {
                    println!("    {}", user);
                }
            }
        }
    }

    Ok(())
}

fn require_database<'a>(database: Option<&'a Path>, command: &str) -> Result<&'a Path> {
    match database {
        Some(path) => Ok(path),
        None => bail!("'{}' needs --database (or SUBNAUTICA_DB)", command),
    }
}

fn open_store(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    db::init_schema(&conn)?;
    Ok(conn)
}

/// Stored catalog when a database is given, otherwise the built-in one
fn load_catalog(database: Option<&Path>) -> Result<Catalog> {
    match database {
        Some(path) => {
            info!(path = %path.display(), "loading catalog from database");
            db::load_catalog(&open_store(path)?)
        }
        None => Ok(catalog::builtin()?.clone()),
    }
}

/// Parse `ITEM` or `ITEM=COUNT`
fn parse_selection(s: &str) -> Result<(String, i64), String> {
    match s.rsplit_once('=') {
        Some((item, count)) => {
            let count = count
                .trim()
                .parse::<i64>()
                .map_err(|e| format!("invalid count in '{}': {}", s, e))?;
            Ok((item.trim().to_string(), count))
        }
        None => Ok((s.trim().to_string(), 1)),
    }
}
