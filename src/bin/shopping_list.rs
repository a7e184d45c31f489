//! Utility to print a shopping list for a recipe file
//!
//! Usage: shopping_list [RECIPES.json] [--ids 1,2,3] [--markdown]
//!
//! Without a path the catalog from SHOPLIST_RECIPES_PATH (or the default
//! data/recipes.json) is used. Without --ids every recipe is included.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use shoplist::catalog::{get_recipes_path, RecipeCatalog};
use shoplist::tools::shopping::{aggregate_recipes, render_markdown};

struct Args {
    path: Option<PathBuf>,
    ids: Option<Vec<i64>>,
    markdown: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        path: None,
        ids: None,
        markdown: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--markdown" | "-m" => args.markdown = true,
            "--ids" => {
                let value = iter.next().ok_or("--ids needs a comma-separated list")?;
                let ids = value
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| s.trim().parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| format!("Invalid recipe id in '{}': {}", value, e))?;
                args.ids = Some(ids);
            }
            other if other.starts_with('-') => return Err(format!("Unknown option: {}", other)),
            other => args.path = Some(PathBuf::from(other)),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shoplist=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let path = args.path.unwrap_or_else(get_recipes_path);
    let catalog = RecipeCatalog::load(&path)?;

    let selection = match args.ids {
        Some(ids) => catalog.select(&ids)?,
        None => catalog.all().to_vec(),
    };

    let response = aggregate_recipes(&selection);

    if args.markdown {
        print!("{}", render_markdown(&response.shopping_list, "Shopping List"));
    } else {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    eprintln!(
        "{} recipes, {} lines, {} rows in {} aisles",
        response.summary.recipes,
        response.summary.lines_processed,
        response.summary.rows,
        response.summary.aisles
    );

    Ok(())
}
