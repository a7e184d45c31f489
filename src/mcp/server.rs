//! Shoplist MCP Server Implementation
//!
//! Implements the MCP server with all shopping list tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::RecipeCatalog;
use crate::models::{IngredientLine, Recipe};
use crate::tools::recipes;
use crate::tools::shopping;
use crate::tools::status::StatusTracker;

/// Shoplist MCP Service
#[derive(Clone)]
pub struct ShoplistService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    catalog: RecipeCatalog,
    tool_router: ToolRouter<ShoplistService>,
}

impl ShoplistService {
    pub fn new(catalog: RecipeCatalog) -> Self {
        let recipes_path = catalog
            .source()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(recipes_path, catalog.len()))),
            catalog,
            tool_router: Self::tool_router(),
        }
    }

    /// Resolve either catalog ids or inline recipes into a selection
    fn resolve_selection(
        &self,
        recipe_ids: Option<Vec<i64>>,
        recipes: Option<Vec<RecipeParam>>,
    ) -> Result<Vec<Recipe>, McpError> {
        match (recipe_ids, recipes) {
            (Some(ids), None) => self
                .catalog
                .select(&ids)
                .map_err(|e| McpError::invalid_params(e.to_string(), None)),
            (None, Some(inline)) => Ok(inline.into_iter().map(RecipeParam::into_recipe).collect()),
            _ => Err(McpError::invalid_params(
                "Provide either recipe_ids or recipes (not both)",
                None,
            )),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecipesParams {
    /// Search query for recipe title (optional)
    pub query: Option<String>,
    /// Maximum results (default 50, max 200)
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    /// Offset for pagination (default 0)
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe ID
    pub id: i64,
}

/// Single ingredient line of an inline recipe
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IngredientLineParam {
    /// Ingredient name, e.g. "flour"
    #[serde(default)]
    pub name: Option<String>,
    /// Free-text quantity, e.g. "1 1/2", "about 2", "2-3"
    #[serde(default)]
    pub quantity: Option<String>,
    /// Free-text unit, e.g. "cups", "g", "" for plain counts
    #[serde(default)]
    pub unit: Option<String>,
    /// Store aisle, e.g. "Produce" (empty goes to "Other")
    #[serde(default)]
    pub aisle: Option<String>,
}

/// Inline recipe
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeParam {
    /// Optional recipe ID (default 0)
    #[serde(default)]
    pub id: i64,
    /// Recipe title, listed as the source of each ingredient
    pub title: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<IngredientLineParam>,
}

impl RecipeParam {
    fn into_recipe(self) -> Recipe {
        let ingredients = self
            .ingredients
            .into_iter()
            .map(|i| IngredientLine {
                name: i.name.unwrap_or_default(),
                quantity: i.quantity.unwrap_or_default(),
                unit: i.unit.unwrap_or_default(),
                aisle: i.aisle.unwrap_or_default(),
            })
            .collect();
        Recipe::new(self.id, &self.title, ingredients)
    }
}

// ============================================================================
// Shopping List Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BuildShoppingListParams {
    /// Catalog recipe IDs to include, in order
    pub recipe_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AggregateRecipesParams {
    /// Recipes to merge into one shopping list
    pub recipes: Vec<RecipeParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportShoppingListParams {
    /// Catalog recipe IDs to include (use this OR recipes)
    pub recipe_ids: Option<Vec<i64>>,
    /// Inline recipes to include (use this OR recipe_ids)
    pub recipes: Option<Vec<RecipeParam>>,
    /// Heading for the document (default "Shopping List")
    #[serde(default = "default_export_title")]
    pub title: String,
}

fn default_export_title() -> String { "Shopping List".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseQuantityParams {
    /// Quantity text, e.g. "1½" or "about 2-3"
    pub quantity: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyUnitParams {
    /// Unit text, e.g. "Tablespoons" or "knob"
    pub unit: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl ShoplistService {
    // --- Status ---

    #[tool(description = "Get the current status of the shoplist service including build info, recipe catalog, and process information")]
    async fn shoplist_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = to_json(&status)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for building shopping lists: how ingredients merge, how quantities and units are read, and which tools to call. Call this when unsure how to use the shopping list tools.")]
    fn shopping_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::SHOPPING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(SHOPPING_INSTRUCTIONS)]))
    }

    // --- Recipes ---

    #[tool(description = "List catalog recipes with optional title search and pagination")]
    fn list_recipes(&self, Parameters(p): Parameters<ListRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.catalog, p.query.as_deref(), p.limit, p.offset);
        Ok(CallToolResult::success(vec![Content::text(to_json(&result)?)]))
    }

    #[tool(description = "Get a catalog recipe with all of its ingredient lines")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let json = match recipes::get_recipe(&self.catalog, p.id) {
            Some(recipe) => to_json(&recipe)?,
            None => format!(r#"{{"error": "Recipe not found", "id": {}}}"#, p.id),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Shopping List ---

    #[tool(description = "Build one merged shopping list from catalog recipes. Compatible quantities are summed and converted; incompatible units stay on separate rows. Rows are grouped by aisle and list the recipes they came from.")]
    fn build_shopping_list(&self, Parameters(p): Parameters<BuildShoppingListParams>) -> Result<CallToolResult, McpError> {
        let result = shopping::build_shopping_list(&self.catalog, &p.recipe_ids)
            .map_err(|e| McpError::invalid_params(e, None))?;
        Ok(CallToolResult::success(vec![Content::text(to_json(&result)?)]))
    }

    #[tool(description = "Build one merged shopping list from recipes given inline (title plus ingredient lines with free-text name, quantity, unit and aisle)")]
    fn aggregate_recipes(&self, Parameters(p): Parameters<AggregateRecipesParams>) -> Result<CallToolResult, McpError> {
        let selection: Vec<Recipe> = p.recipes.into_iter().map(RecipeParam::into_recipe).collect();
        let result = shopping::aggregate_recipes(&selection);
        Ok(CallToolResult::success(vec![Content::text(to_json(&result)?)]))
    }

    #[tool(description = "Export a shopping list as a Markdown checklist grouped by aisle. Provide either recipe_ids (catalog) or recipes (inline).")]
    fn export_shopping_list_markdown(&self, Parameters(p): Parameters<ExportShoppingListParams>) -> Result<CallToolResult, McpError> {
        let selection = self.resolve_selection(p.recipe_ids, p.recipes)?;
        let result = shopping::aggregate_recipes(&selection);
        let markdown = shopping::render_markdown(&result.shopping_list, &p.title);
        Ok(CallToolResult::success(vec![Content::text(markdown)]))
    }

    // --- Inspection ---

    #[tool(description = "Show the number a free-text quantity is read as (fractions, mixed numbers, ranges, qualifiers)")]
    fn parse_quantity(&self, Parameters(p): Parameters<ParseQuantityParams>) -> Result<CallToolResult, McpError> {
        let result = shopping::inspect_quantity(&p.quantity);
        Ok(CallToolResult::success(vec![Content::text(to_json(&result)?)]))
    }

    #[tool(description = "Show how a free-text unit is classified: family (count, volume, weight, unknown), canonical unit and conversion factor")]
    fn classify_unit(&self, Parameters(p): Parameters<ClassifyUnitParams>) -> Result<CallToolResult, McpError> {
        let result = shopping::inspect_unit(&p.unit);
        Ok(CallToolResult::success(vec![Content::text(to_json(&result)?)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ShoplistService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "shoplist".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Shopping List Builder".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Shopping List Builder - merges recipe ingredients into one aisle-grouped shopping list. \
                 IMPORTANT: Call shopping_instructions first if unsure how ingredients are merged. \
                 Recipes: list_recipes/get_recipe. \
                 Shopping list: build_shopping_list (catalog ids), aggregate_recipes (inline recipes), \
                 export_shopping_list_markdown. \
                 Inspection: parse_quantity, classify_unit. \
                 Status: shoplist_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_recipe_param_fills_missing_fields() {
        let json = r#"{"title": "Tacos", "ingredients": [{"name": "tortillas", "quantity": "8"}]}"#;
        let param: RecipeParam = serde_json::from_str(json).unwrap();
        let recipe = param.into_recipe();

        assert_eq!(recipe.id, 0);
        assert_eq!(recipe.title, "Tacos");
        assert_eq!(recipe.ingredients[0].unit, "");
        assert_eq!(recipe.ingredients[0].aisle, "");
    }

    #[test]
    fn test_resolve_selection_requires_exactly_one_source() {
        let service = ShoplistService::new(RecipeCatalog::default());
        assert!(service.resolve_selection(None, None).is_err());
        assert!(service.resolve_selection(Some(vec![]), Some(vec![])).is_err());
        assert!(service.resolve_selection(Some(vec![1]), None).is_err());
        assert_eq!(service.resolve_selection(None, Some(vec![])).unwrap().len(), 0);
    }
}
