//! Recipe catalog module
//!
//! Loads the read-only recipe collection the shopping list is built from,
//! and resolves where that collection lives.

pub mod library;

use std::path::PathBuf;

pub use library::{CatalogError, CatalogResult, RecipeCatalog};

/// Environment variable naming the recipe catalog file
pub const RECIPES_PATH_ENV: &str = "SHOPLIST_RECIPES_PATH";

/// Get the recipe catalog path from environment or use default
pub fn get_recipes_path() -> PathBuf {
    std::env::var(RECIPES_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("recipes.json");
            path
        })
}
