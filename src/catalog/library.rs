//! Recipe catalog
//!
//! Read-only collection of recipes loaded from a JSON file. The catalog is
//! immutable once loaded and cheap to clone across request handlers.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Recipe;

/// Catalog error types
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read recipe file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid recipe JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate recipe id {0}")]
    DuplicateId(i64),

    #[error("Recipe not found: {0}")]
    NotFound(i64),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Accepted file layouts: a bare array or `{ "recipes": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

/// Shared, immutable recipe catalog
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Arc<Vec<Recipe>>,
    source: Option<PathBuf>,
}

impl RecipeCatalog {
    /// Build a catalog from in-memory recipes
    pub fn from_recipes(recipes: Vec<Recipe>) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.id) {
                return Err(CatalogError::DuplicateId(recipe.id));
            }
        }
        Ok(Self {
            recipes: Arc::new(recipes),
            source: None,
        })
    }

    /// Parse a catalog from JSON text
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let recipes = match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::List(recipes) => recipes,
            CatalogFile::Wrapped { recipes } => recipes,
        };
        Self::from_recipes(recipes)
    }

    /// Load a catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::from_json_str(&text)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog file, treating a missing file as an empty catalog
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No recipe file found, starting with an empty catalog");
            return Ok(Self {
                recipes: Arc::new(Vec::new()),
                source: Some(path.to_path_buf()),
            });
        }
        let catalog = Self::load(path)?;
        tracing::info!(path = %path.display(), recipes = catalog.len(), "Loaded recipe catalog");
        Ok(catalog)
    }

    /// Path the catalog was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Get a recipe by ID
    pub fn get(&self, id: i64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Recipes whose title contains `query` (case-insensitive), in catalog order
    pub fn search(&self, query: Option<&str>) -> Vec<&Recipe> {
        let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
        self.recipes
            .iter()
            .filter(|r| needle.is_empty() || r.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Select recipes by id, in request order, each id at most once
    pub fn select(&self, ids: &[i64]) -> CatalogResult<Vec<Recipe>> {
        let mut seen = HashSet::new();
        let mut selected = Vec::with_capacity(ids.len());
        for &id in ids {
            if !seen.insert(id) {
                continue;
            }
            match self.get(id) {
                Some(recipe) => selected.push(recipe.clone()),
                None => {
                    tracing::warn!(recipe_id = id, "Requested recipe is not in the catalog");
                    return Err(CatalogError::NotFound(id));
                }
            }
        }
        Ok(selected)
    }
}
