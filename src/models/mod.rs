//! Data models
//!
//! Recipe input records and the aggregated shopping list they produce.

mod recipe;
mod shopping_list;

pub use recipe::{IngredientLine, Recipe, RecipeRef};
pub use shopping_list::{DisplayRow, ShoppingList};
