//! Display unit selection
//!
//! Picks a human-friendly unit for a summed volume or weight total and
//! rounds the converted quantity for presentation.

use std::collections::BTreeSet;

use super::units::{
    MeasuredUnit, G_PER_KG, G_PER_LB, G_PER_OZ, ML_PER_CUP, ML_PER_LITER, ML_PER_TBSP,
    ML_PER_TSP,
};

/// Smallest total (ml) shown in cups: a quarter cup
pub const CUP_THRESHOLD_ML: f64 = 59.147;
/// Smallest total (ml) shown in tablespoons
pub const TBSP_THRESHOLD_ML: f64 = 14.787;
/// Smallest total (ml) shown in teaspoons
pub const TSP_THRESHOLD_ML: f64 = 4.929;

/// Nudge applied before rounding so 2.9999999 renders as 3
const ROUNDING_EPSILON: f64 = 1e-9;

/// Canonical units seen among the lines contributing to one total
pub type PreferredUnits = BTreeSet<&'static str>;

/// Choose the display unit for a volume total in milliliters
pub fn select_volume_unit(total_ml: f64, preferred: &PreferredUnits) -> MeasuredUnit {
    let (canonical, factor) = if preferred.contains("l") || total_ml >= ML_PER_LITER {
        ("l", ML_PER_LITER)
    } else if preferred.contains("cup") || total_ml >= CUP_THRESHOLD_ML {
        ("cup", ML_PER_CUP)
    } else if preferred.contains("tbsp") || total_ml >= TBSP_THRESHOLD_ML {
        ("tbsp", ML_PER_TBSP)
    } else if preferred.contains("tsp") || total_ml >= TSP_THRESHOLD_ML {
        ("tsp", ML_PER_TSP)
    } else if preferred.contains("ml") {
        ("ml", 1.0)
    } else {
        ("tsp", ML_PER_TSP)
    };
    MeasuredUnit::new(canonical, factor)
}

/// Choose the display unit for a weight total in grams
pub fn select_weight_unit(total_g: f64, preferred: &PreferredUnits) -> MeasuredUnit {
    let (canonical, factor) = if preferred.contains("kg") || total_g >= G_PER_KG {
        ("kg", G_PER_KG)
    } else if preferred.contains("lb") || total_g >= G_PER_LB {
        ("lb", G_PER_LB)
    } else if preferred.contains("oz") || total_g >= G_PER_OZ {
        ("oz", G_PER_OZ)
    } else {
        ("g", 1.0)
    };
    MeasuredUnit::new(canonical, factor)
}

/// Round to two decimals, half away from zero, after an epsilon nudge
pub fn round_quantity(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    ((value + ROUNDING_EPSILON) * 100.0).round() / 100.0
}

/// Convert a base-unit total into the chosen unit and round it
pub fn to_display(base_total: f64, unit: &MeasuredUnit) -> f64 {
    round_quantity(unit.from_base(base_total))
}

/// Render a quantity with at most two decimals and no trailing zeros
pub fn format_quantity(value: f64) -> String {
    let text = format!("{:.2}", round_quantity(value));
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
