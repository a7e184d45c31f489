//! Recipe MCP Tools
//!
//! Read-only browsing of the recipe catalog.

use serde::Serialize;

use crate::catalog::RecipeCatalog;
use crate::models::Recipe;

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub ingredient_count: usize,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// List recipes with optional title search and pagination
pub fn list_recipes(
    catalog: &RecipeCatalog,
    query: Option<&str>,
    limit: i64,
    offset: i64,
) -> ListRecipesResponse {
    let limit = limit.clamp(1, 200) as usize;
    let offset = offset.max(0) as usize;

    let matches = catalog.search(query);
    let total = matches.len();
    let recipes = matches
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|r| RecipeSummary {
            id: r.id,
            title: r.title.clone(),
            ingredient_count: r.ingredients.len(),
        })
        .collect();

    ListRecipesResponse {
        recipes,
        total,
        limit,
        offset,
    }
}

/// Get a recipe with its ingredient lines
pub fn get_recipe(catalog: &RecipeCatalog, id: i64) -> Option<Recipe> {
    catalog.get(id).cloned()
}
