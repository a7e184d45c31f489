//! Shopping List MCP Tools
//!
//! Tools for building shopping lists and inspecting how quantities and units
//! are interpreted.

use serde::Serialize;

use crate::catalog::RecipeCatalog;
use crate::models::{Recipe, ShoppingList};
use crate::shopping::{
    aggregate_with_stats, classify_unit, format_quantity, parse_quantity, AggregationStats,
    UnitFamily,
};

/// Recipe included in a shopping list
#[derive(Debug, Serialize)]
pub struct SelectedRecipe {
    pub id: i64,
    pub title: String,
}

/// Response for build_shopping_list and aggregate_recipes
#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub recipes: Vec<SelectedRecipe>,
    pub summary: AggregationStats,
    pub shopping_list: ShoppingList,
}

/// Response for parse_quantity
#[derive(Debug, Serialize)]
pub struct ParseQuantityResponse {
    pub input: String,
    pub quantity: f64,
}

/// Response for classify_unit
#[derive(Debug, Serialize)]
pub struct ClassifyUnitResponse {
    pub input: String,
    pub family: UnitFamily,
    pub canonical_unit: String,
    pub display_unit: String,
    pub base_unit: Option<&'static str>,
    pub factor_to_base: Option<f64>,
}

// ============================================================================
// Aggregation Tools
// ============================================================================

/// Aggregate an explicit recipe selection
pub fn aggregate_recipes(recipes: &[Recipe]) -> ShoppingListResponse {
    let (shopping_list, summary) = aggregate_with_stats(recipes);
    ShoppingListResponse {
        recipes: recipes
            .iter()
            .map(|r| SelectedRecipe {
                id: r.id,
                title: r.title.clone(),
            })
            .collect(),
        summary,
        shopping_list,
    }
}

/// Build a shopping list from catalog recipe ids
pub fn build_shopping_list(
    catalog: &RecipeCatalog,
    recipe_ids: &[i64],
) -> Result<ShoppingListResponse, String> {
    if recipe_ids.is_empty() {
        return Err("Select at least one recipe".to_string());
    }

    let recipes = catalog
        .select(recipe_ids)
        .map_err(|e| format!("Failed to select recipes: {}", e))?;

    Ok(aggregate_recipes(&recipes))
}

/// Render a shopping list as a Markdown checklist
pub fn render_markdown(list: &ShoppingList, title: &str) -> String {
    let mut out = format!("# {}\n", title.trim());

    if list.is_empty() {
        out.push_str("\n_Nothing to buy._\n");
        return out;
    }

    for (aisle, rows) in list.sections() {
        out.push_str(&format!("\n## {}\n\n", aisle));
        for row in rows {
            let amount = match row.unit.as_str() {
                "" => format_quantity(row.quantity),
                unit => format!("{} {}", format_quantity(row.quantity), unit),
            };
            out.push_str(&format!("- [ ] {} {}", amount, row.name));
            if !row.sources.is_empty() {
                out.push_str(&format!(" ({})", row.sources.join(", ")));
            }
            out.push('\n');
        }
    }
    out
}

// ============================================================================
// Inspection Tools
// ============================================================================

/// Show how a quantity string is read
pub fn inspect_quantity(input: &str) -> ParseQuantityResponse {
    ParseQuantityResponse {
        input: input.to_string(),
        quantity: parse_quantity(input),
    }
}

/// Show how a unit string is classified
pub fn inspect_unit(input: &str) -> ClassifyUnitResponse {
    let unit = classify_unit(input);
    ClassifyUnitResponse {
        input: input.to_string(),
        family: unit.family(),
        canonical_unit: unit.canonical_unit().to_string(),
        display_unit: unit.display_unit().to_string(),
        base_unit: unit.base_unit(),
        factor_to_base: unit.factor_to_base(),
    }
}
