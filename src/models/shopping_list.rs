//! Shopping list model
//!
//! Output of an aggregation run: display rows grouped by aisle.

use indexmap::IndexMap;
use serde::Serialize;

/// One merged line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub aisle: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Contributing recipe titles, sorted and deduplicated
    pub sources: Vec<String>,
}

/// Aisle-grouped shopping list.
///
/// Aisles keep the order in which they were first seen and serialize as
/// `{ "<aisle>": [rows...] }` in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    aisles: IndexMap<String, Vec<DisplayRow>>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an aisle; aisles without rows are dropped
    pub fn push_section(&mut self, aisle: String, rows: Vec<DisplayRow>) {
        if rows.is_empty() {
            return;
        }
        self.aisles.entry(aisle).or_default().extend(rows);
    }

    /// Rows for an aisle display name
    pub fn get(&self, aisle: &str) -> Option<&[DisplayRow]> {
        self.aisles.get(aisle).map(Vec::as_slice)
    }

    /// Aisles with their rows, in first-seen order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[DisplayRow])> {
        self.aisles.iter().map(|(aisle, rows)| (aisle.as_str(), rows.as_slice()))
    }

    pub fn aisle_names(&self) -> impl Iterator<Item = &str> {
        self.aisles.keys().map(String::as_str)
    }

    /// Every row in aisle order
    pub fn rows(&self) -> impl Iterator<Item = &DisplayRow> {
        self.aisles.values().flatten()
    }

    pub fn aisle_count(&self) -> usize {
        self.aisles.len()
    }

    pub fn row_count(&self) -> usize {
        self.aisles.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.aisles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(aisle: &str, name: &str) -> DisplayRow {
        DisplayRow {
            aisle: aisle.to_string(),
            name: name.to_string(),
            quantity: 1.0,
            unit: String::new(),
            sources: vec!["A".to_string()],
        }
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let mut list = ShoppingList::new();
        list.push_section("Produce".to_string(), vec![]);
        assert!(list.is_empty());
        assert_eq!(list.get("Produce"), None);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut list = ShoppingList::new();
        list.push_section("Produce".to_string(), vec![row("Produce", "onion")]);
        list.push_section("Baking".to_string(), vec![row("Baking", "flour")]);

        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with("{\"Produce\":[{"));
        let produce = json.find("\"Produce\"").unwrap();
        let baking = json.find("\"Baking\"").unwrap();
        assert!(produce < baking);
        assert_eq!(list.row_count(), 2);
        assert_eq!(list.aisle_names().collect::<Vec<_>>(), vec!["Produce", "Baking"]);
    }
}
