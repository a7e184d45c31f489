//! Recipe model
//!
//! The read-only recipe shape supplied by the recipe store.

use serde::{Deserialize, Deserializer, Serialize};

/// One ingredient line as written in a recipe.
///
/// All four fields are free text and any of them may be empty. A missing or
/// `null` field deserializes as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub quantity: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub aisle: String,
}

impl IngredientLine {
    pub fn new(name: &str, quantity: &str, unit: &str, aisle: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
            aisle: aisle.to_string(),
        }
    }
}

/// A recipe with its ingredient lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Recipe {
    pub fn new(id: i64, title: &str, ingredients: Vec<IngredientLine>) -> Self {
        Self {
            id,
            title: title.to_string(),
            ingredients,
            notes: None,
        }
    }

    /// Provenance handle carried alongside each ingredient
    pub fn reference(&self) -> RecipeRef<'_> {
        RecipeRef {
            id: self.id,
            title: &self.title,
        }
    }
}

/// Identifies the recipe an ingredient line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeRef<'a> {
    pub id: i64,
    pub title: &'a str,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
