//! Shopping list aggregation
//!
//! Merges ingredient lines from a selection of recipes into one aisle-grouped
//! list. Lines combine when their normalized aisle, normalized name and unit
//! family agree; unknown units additionally need the same label.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use super::display::{
    round_quantity, select_volume_unit, select_weight_unit, to_display, PreferredUnits,
};
use super::normalize::{normalize_aisle, normalize_name};
use super::quantity::parse_quantity;
use super::units::{classify_unit, UnitDescriptor, UnitFamily};
use crate::models::{DisplayRow, IngredientLine, Recipe, RecipeRef, ShoppingList};

/// Identity of one bucket within an aisle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BucketKey {
    name: String,
    family: UnitFamily,
    /// Normalized unit label; only set for `UnitFamily::Unknown`
    label: String,
}

/// Running total for one bucket.
///
/// Volume totals are in ml and weight totals in g; count and unknown totals
/// are raw sums.
#[derive(Debug)]
struct Bucket {
    display_name: String,
    total: f64,
    sources: BTreeSet<String>,
    preferred: PreferredUnits,
}

/// Counters describing one aggregation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    pub recipes: usize,
    pub lines_processed: usize,
    /// Lines dropped because their ingredient name was empty
    pub lines_skipped: usize,
    pub aisles: usize,
    pub rows: usize,
}

/// Per-run accumulator. Build one per aggregation; never share it.
///
/// Aisles and the buckets inside each aisle are kept in first-seen order.
#[derive(Debug, Default)]
pub struct Accumulator {
    aisles: IndexMap<String, IndexMap<BucketKey, Bucket>>,
    recipes: usize,
    lines_processed: usize,
    lines_skipped: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every ingredient line of a recipe
    pub fn add_recipe(&mut self, recipe: &Recipe) {
        self.recipes += 1;
        let source = recipe.reference();
        for line in &recipe.ingredients {
            self.add_line(source, line);
        }
    }

    /// Route one ingredient line into its bucket.
    ///
    /// Returns false when the line was skipped for having no name.
    pub fn add_line(&mut self, source: RecipeRef<'_>, line: &IngredientLine) -> bool {
        let name = normalize_name(&line.name);
        if name.is_empty() {
            tracing::debug!(
                recipe_id = source.id,
                recipe = source.title,
                "Skipping ingredient line with empty name"
            );
            self.lines_skipped += 1;
            return false;
        }
        self.lines_processed += 1;

        let aisle = normalize_aisle(&line.aisle);
        let quantity = parse_quantity(&line.quantity);
        let unit = classify_unit(&line.unit);

        let (amount, preferred, label) = match &unit {
            UnitDescriptor::Count { .. } => (quantity, None, String::new()),
            UnitDescriptor::Volume(measured) | UnitDescriptor::Weight(measured) => {
                (measured.to_base(quantity), Some(measured.canonical), String::new())
            }
            UnitDescriptor::Unknown { label } => (quantity, None, label.clone()),
        };

        let key = BucketKey {
            name,
            family: unit.family(),
            label,
        };
        let bucket = self
            .aisles
            .entry(aisle)
            .or_default()
            .entry(key)
            .or_insert_with(|| Bucket {
                display_name: line.name.trim().to_string(),
                total: 0.0,
                sources: BTreeSet::new(),
                preferred: PreferredUnits::new(),
            });

        bucket.total += amount;
        if let Some(canonical) = preferred {
            bucket.preferred.insert(canonical);
        }
        let title = source.title.trim();
        if !title.is_empty() {
            bucket.sources.insert(title.to_string());
        }

        true
    }

    pub fn stats(&self) -> AggregationStats {
        AggregationStats {
            recipes: self.recipes,
            lines_processed: self.lines_processed,
            lines_skipped: self.lines_skipped,
            ..AggregationStats::default()
        }
    }

    /// Consume the accumulator into display rows grouped by aisle.
    ///
    /// Rows whose quantity shows as 0 are dropped, as are aisles left empty.
    pub fn finish(self) -> ShoppingList {
        let mut list = ShoppingList::new();

        for (aisle, mut buckets) in self.aisles {
            // Stable: unknown labels of one name stay in first-seen order.
            buckets.sort_by(|a, _, b, _| a.name.cmp(&b.name).then(a.family.cmp(&b.family)));

            let rows = buckets
                .into_iter()
                .filter_map(|(key, bucket)| display_row(&aisle, key, bucket))
                .collect();
            list.push_section(aisle, rows);
        }
        list
    }
}

fn display_row(aisle: &str, key: BucketKey, bucket: Bucket) -> Option<DisplayRow> {
    if bucket.total == 0.0 {
        return None;
    }

    let (quantity, unit) = match key.family {
        UnitFamily::Count => (round_quantity(bucket.total), String::new()),
        UnitFamily::Volume => {
            let unit = select_volume_unit(bucket.total, &bucket.preferred);
            (to_display(bucket.total, &unit), unit.canonical.to_string())
        }
        UnitFamily::Weight => {
            let unit = select_weight_unit(bucket.total, &bucket.preferred);
            (to_display(bucket.total, &unit), unit.canonical.to_string())
        }
        UnitFamily::Unknown => (round_quantity(bucket.total), key.label),
    };
    if quantity == 0.0 {
        tracing::debug!(aisle, name = %bucket.display_name, "Dropping row that rounds to zero");
        return None;
    }

    Some(DisplayRow {
        aisle: aisle.to_string(),
        name: bucket.display_name,
        quantity,
        unit,
        sources: bucket.sources.into_iter().collect(),
    })
}

/// Aggregate a recipe selection into an aisle-grouped shopping list
pub fn aggregate(recipes: &[Recipe]) -> ShoppingList {
    aggregate_with_stats(recipes).0
}

/// Aggregate and also report run counters
pub fn aggregate_with_stats(recipes: &[Recipe]) -> (ShoppingList, AggregationStats) {
    let mut accumulator = Accumulator::new();
    for recipe in recipes {
        accumulator.add_recipe(recipe);
    }

    let mut stats = accumulator.stats();
    let list = accumulator.finish();
    stats.aisles = list.aisle_count();
    stats.rows = list.row_count();

    tracing::debug!(
        recipes = stats.recipes,
        lines = stats.lines_processed,
        skipped = stats.lines_skipped,
        rows = stats.rows,
        "Aggregated shopping list"
    );

    (list, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: &str, unit: &str, aisle: &str) -> IngredientLine {
        IngredientLine::new(name, quantity, unit, aisle)
    }

    fn recipe(title: &str, ingredients: Vec<IngredientLine>) -> Recipe {
        Recipe::new(0, title, ingredients)
    }

    #[test]
    fn test_flour_scenario() {
        let recipes = vec![
            recipe("A", vec![line("flour", "2", "cups", "Baking")]),
            recipe("B", vec![line("Flour", "1/2", "cup", "baking")]),
        ];
        let list = aggregate(&recipes);

        let rows = list.get("Baking").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "flour");
        assert_eq!(rows[0].quantity, 2.5);
        assert_eq!(rows[0].unit, "cup");
        assert_eq!(rows[0].sources, vec!["A", "B"]);
    }

    #[test]
    fn test_bare_count_without_aisle() {
        let recipes = vec![recipe("Omelette", vec![line("eggs", "3", "", "")])];
        let list = aggregate(&recipes);

        let rows = list.get("Other").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].aisle, "Other");
        assert_eq!(rows[0].name, "eggs");
        assert_eq!(rows[0].quantity, 3.0);
        assert_eq!(rows[0].unit, "");
    }

    #[test]
    fn test_unknown_units_bucket_by_label() {
        let recipes = vec![recipe(
            "Stir Fry",
            vec![
                line("ginger", "1", "knob", "Produce"),
                line("ginger", "2", "Knob", "Produce"),
                line("ginger", "1", "pinch", "Produce"),
            ],
        )];
        let list = aggregate(&recipes);

        let rows = list.get("Produce").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].quantity, 3.0);
        assert_eq!(rows[0].unit, "knob");
        assert_eq!(rows[1].quantity, 1.0);
        assert_eq!(rows[1].unit, "pinch");
    }

    #[test]
    fn test_families_never_merge() {
        let recipes = vec![
            recipe("Cake", vec![line("sugar", "1", "cup", "Baking")]),
            recipe("Cookies", vec![line("sugar", "200", "g", "Baking")]),
        ];
        let list = aggregate(&recipes);

        let rows = list.get("Baking").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit, "cup");
        assert_eq!(rows[0].quantity, 1.0);
        assert_eq!(rows[0].sources, vec!["Cake"]);
        assert_eq!(rows[1].unit, "oz");
        assert_eq!(rows[1].quantity, 7.05);
        assert_eq!(rows[1].sources, vec!["Cookies"]);
    }

    #[test]
    fn test_repeated_cups_round_trip() {
        for n in 1..=4 {
            let lines = (0..n).map(|_| line("milk", "1", "cup", "Dairy")).collect();
            let list = aggregate(&[recipe("Batch", lines)]);
            let rows = list.get("Dairy & Eggs").unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].quantity, n as f64);
            assert_eq!(rows[0].unit, "cup");
        }
    }

    #[test]
    fn test_large_volume_switches_to_liters() {
        let list = aggregate(&[recipe(
            "Stock",
            vec![line("broth", "3", "cups", ""), line("broth", "2", "cups", "")],
        )]);
        let rows = list.get("Other").unwrap();
        assert_eq!(rows[0].unit, "l");
        assert_eq!(rows[0].quantity, 1.18);
    }

    #[test]
    fn test_mixed_volume_units_convert() {
        let list = aggregate(&[
            recipe("Dressing", vec![line("olive oil", "2", "tbsp", "Pantry")]),
            recipe("Pasta", vec![line("olive oil", "1", "tsp", "pantry")]),
        ]);
        let rows = list.get("Pantry").unwrap();
        assert_eq!(rows.len(), 1);
        // 2 tbsp + 1 tsp = 7 tsp = 2.33 tbsp
        assert_eq!(rows[0].unit, "tbsp");
        assert_eq!(rows[0].quantity, 2.33);
    }

    #[test]
    fn test_weight_prefers_largest_used_unit() {
        let list = aggregate(&[
            recipe("Roast", vec![line("beef", "1", "kg", "Meat")]),
            recipe("Stew", vec![line("beef", "8", "oz", "meat")]),
        ]);
        let rows = list.get("Meat & Seafood").unwrap();
        assert_eq!(rows[0].unit, "kg");
        assert_eq!(rows[0].quantity, 1.23);
    }

    #[test]
    fn test_pound_and_ounces_show_in_pounds() {
        let list = aggregate(&[
            recipe("Burgers", vec![line("ground beef", "1", "lb", "Meat")]),
            recipe("Meatballs", vec![line("ground beef", "2", "oz", "Meat")]),
        ]);
        let rows = list.get("Meat & Seafood").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "lb");
        assert_eq!(rows[0].quantity, 1.13);
    }

    #[test]
    fn test_used_unit_overrides_size_threshold() {
        let list = aggregate(&[
            recipe("Cookies", vec![line("vanilla", "1/4", "tbsp", "Baking")]),
            recipe("Quiche", vec![line("cheddar", "1/4", "lb", "Dairy"), line("cheddar", "1", "oz", "dairy")]),
        ]);

        // 3.7 ml would otherwise show in teaspoons
        let baking = list.get("Baking").unwrap();
        assert_eq!(baking[0].unit, "tbsp");
        assert_eq!(baking[0].quantity, 0.25);

        // 141.75 g would otherwise show in ounces
        let dairy = list.get("Dairy & Eggs").unwrap();
        assert_eq!(dairy[0].unit, "lb");
        assert_eq!(dairy[0].quantity, 0.31);
    }

    #[test]
    fn test_idempotent() {
        let recipes = vec![
            recipe("A", vec![line("flour", "2", "cups", "Baking"), line("eggs", "2", "", "")]),
            recipe("B", vec![line("flour", "100", "g", "Baking"), line("salt", "1", "pinch", "")]),
        ];
        let snapshot = recipes.clone();
        let first = aggregate(&recipes);
        let second = aggregate(&recipes);
        assert_eq!(first, second);
        assert_eq!(recipes, snapshot);
    }

    #[test]
    fn test_empty_names_are_skipped() {
        let recipes = vec![recipe(
            "A",
            vec![line("  ", "2", "cups", "Baking"), line("-", "1", "", ""), line("salt", "1", "tsp", "")],
        )];
        let (list, stats) = aggregate_with_stats(&recipes);

        assert_eq!(stats.lines_skipped, 2);
        assert_eq!(stats.lines_processed, 1);
        assert!(list.get("Baking").is_none());
        assert_eq!(list.row_count(), 1);
    }

    #[test]
    fn test_zero_totals_emit_no_rows() {
        let list = aggregate(&[recipe(
            "Soup",
            vec![line("salt", "to taste", "", "Spices"), line("pepper", "", "tsp", "Spices")],
        )]);
        assert!(list.is_empty());
    }

    #[test]
    fn test_rows_rounding_to_zero_are_dropped() {
        let (list, stats) = aggregate_with_stats(&[recipe(
            "Garnish",
            vec![line("saffron", "0.001", "g", "Spices"), line("chives", "0.001", "", "Produce")],
        )]);
        assert!(list.is_empty());
        assert_eq!(stats.lines_processed, 2);
        assert_eq!(stats.rows, 0);
    }

    #[test]
    fn test_separator_only_aisles_fall_back_to_other() {
        let list = aggregate(&[recipe(
            "Odd",
            vec![line("x", "1", "", "and"), line("y", "1", "", "/")],
        )]);
        assert_eq!(list.aisle_names().collect::<Vec<_>>(), vec!["Other"]);
        assert_eq!(list.get("Other").unwrap().len(), 2);
    }

    #[test]
    fn test_aisles_keep_first_seen_order() {
        let list = aggregate(&[
            recipe("A", vec![line("onion", "1", "", "Produce"), line("milk", "1", "cup", "Dairy")]),
            recipe("B", vec![line("bread", "1", "", "Bakery"), line("apple", "2", "", "produce")]),
        ]);
        let aisles: Vec<_> = list.aisle_names().collect();
        assert_eq!(aisles, vec!["Produce", "Dairy & Eggs", "Bakery"]);

        let produce: Vec<_> = list.get("Produce").unwrap().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(produce, vec!["apple", "onion"]);
    }

    #[test]
    fn test_rows_order_by_family_then_label_insertion() {
        let list = aggregate(&[recipe(
            "Mix",
            vec![
                line("butter", "1", "stick", ""),
                line("butter", "100", "g", ""),
                line("butter", "1", "tbsp", ""),
                line("butter", "2", "", ""),
                line("butter", "1", "block", ""),
            ],
        )]);
        let units: Vec<_> = list.get("Other").unwrap().iter().map(|r| r.unit.as_str()).collect();
        assert_eq!(units, vec!["", "tbsp", "oz", "stick", "block"]);
    }

    #[test]
    fn test_sources_are_sorted_and_deduplicated() {
        let list = aggregate(&[
            recipe("Zucchini Bread", vec![line("eggs", "2", "", "")]),
            recipe("Apple Pie", vec![line("eggs", "1", "", ""), line("Eggs", "1", "each", "")]),
        ]);
        let rows = list.get("Other").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 4.0);
        assert_eq!(rows[0].name, "eggs");
        assert_eq!(rows[0].sources, vec!["Apple Pie", "Zucchini Bread"]);
    }

    #[test]
    fn test_hyphenated_names_merge() {
        let list = aggregate(&[
            recipe("A", vec![line("All-Purpose Flour", "1", "cup", "Baking")]),
            recipe("B", vec![line("all purpose  flour", "1", "cup", "Baking")]),
        ]);
        let rows = list.get("Baking").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "All-Purpose Flour");
        assert_eq!(rows[0].quantity, 2.0);
    }

    #[test]
    fn test_adversarial_input_does_not_panic() {
        let weird = ["", " ", "⅞⅞⅞", "--", "////", "∞", "1e999", "\u{0}", "ǅ", "١٢"];
        let lines = weird
            .iter()
            .flat_map(|a| weird.iter().map(move |b| line(a, b, a, b)))
            .collect();
        let list = aggregate(&[recipe("", lines)]);
        for row in list.rows() {
            assert!(row.quantity.is_finite());
            assert!(row.sources.is_empty());
        }
    }
}
