//! Shopping List Builder (shoplist)
//!
//! An MCP server that builds shopping lists from recipes.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use shoplist::build_info;
use shoplist::catalog::{get_recipes_path, RecipeCatalog};
use shoplist::mcp::ShoplistService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shoplist=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    eprintln!("{}", build_info::startup_banner(&build_info::BuildStamp::current()));
    eprintln!("Starting MCP server on stdio...");

    let recipes_path = get_recipes_path();
    eprintln!("Recipe catalog path: {}", recipes_path.display());

    let catalog = RecipeCatalog::load_or_empty(&recipes_path)?;
    eprintln!("Recipes loaded: {}", catalog.len());

    let service = ShoplistService::new(catalog);

    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;

    server.waiting().await?;

    Ok(())
}
