//! Shoplist Status Tool
//!
//! Provides runtime status information about the shoplist service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildStamp;

/// Shopping list instructions for AI assistants
pub const SHOPPING_INSTRUCTIONS: &str = r#"
# Shopping List Instructions

This guide explains how to turn recipes into one merged shopping list.

## Overview

1. **Pick recipes** - `list_recipes` (optional `query` searches titles), `get_recipe` for details
2. **Build the list** - `build_shopping_list` with the chosen `recipe_ids`
3. **Share it** - `export_shopping_list_markdown` for a printable checklist

Recipes that are not in the catalog can be passed inline to `aggregate_recipes`
(each with `title` and `ingredients: [{name, quantity, unit, aisle}]`).

---

## How Ingredients Are Merged

Two lines merge when they have the same **aisle**, the same **name** (case,
hyphens and extra spaces ignored) and units of the same **family**:

| Family | Examples | Summed in |
|--------|----------|-----------|
| Count | "", each, pcs, piece | raw count |
| Volume | tsp, tbsp, cup, ml, l, fl oz, pt, qt, gal | milliliters |
| Weight | g, kg, oz, lb | grams |
| Unknown | knob, pinch, clove, can | raw sum, per unit label |

- "1 cup sugar" and "200 g sugar" stay on **separate rows**
- "1 knob ginger" and "1 pinch ginger" stay on **separate rows**
- Totals are shown in the largest sensible unit (e.g. 6 tsp becomes 2 tbsp)

## Quantity Text

- Fractions and mixed numbers: "1/2", "2 1/2", "1½"
- Qualifiers are ignored: "about 2", "~1 cup"
- Ranges use the first value: "2-3" counts as 2
- Text without a number ("to taste") counts as 0 and is left off the list

## Aisles

Aisle names are tidied up ("dairy and eggs" becomes "Dairy & Eggs").
Lines without an aisle are listed under **Other**.

Use `parse_quantity` and `classify_unit` to check how a specific value is read.
"#;

/// Runtime status of the shoplist service
#[derive(Debug, Clone, Serialize)]
pub struct ShoplistStatus {
    pub build: BuildStamp,

    /// Recipe catalog information
    pub recipes_path: String,
    pub recipes_file_size_bytes: Option<u64>,
    pub recipe_count: usize,
    pub catalog_loaded_at: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    recipes_path: PathBuf,
    recipe_count: usize,
    loaded_at: chrono::DateTime<chrono::Utc>,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(recipes_path: PathBuf, recipe_count: usize) -> Self {
        Self {
            start_time: Instant::now(),
            recipes_path,
            recipe_count,
            loaded_at: chrono::Utc::now(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ShoplistStatus {
        let recipes_file_size_bytes = std::fs::metadata(&self.recipes_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ShoplistStatus {
            build: BuildStamp::current(),
            recipes_path: self.recipes_path.display().to_string(),
            recipes_file_size_bytes,
            recipe_count: self.recipe_count,
            catalog_loaded_at: self.loaded_at.to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
