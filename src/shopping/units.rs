//! Unit types and conversion constants
//!
//! Classifies free-text unit strings into count, volume, weight or unknown
//! and carries the exact factor to each family's base unit.

use serde::Serialize;

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon (US)
pub const ML_PER_TSP: f64 = 4.92892159375;
/// Milliliters per tablespoon (US)
pub const ML_PER_TBSP: f64 = 14.78676478125;
/// Milliliters per fluid ounce (US)
pub const ML_PER_FL_OZ: f64 = 29.5735295625;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.5882365;
/// Milliliters per pint (US)
pub const ML_PER_PINT: f64 = 473.176473;
/// Milliliters per quart (US)
pub const ML_PER_QUART: f64 = 946.352946;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;
/// Milliliters per gallon (US)
pub const ML_PER_GALLON: f64 = 3785.411784;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce (avoirdupois)
pub const G_PER_OZ: f64 = 28.349523125;
/// Grams per pound
pub const G_PER_LB: f64 = 453.59237;

/// Base unit for count quantities
pub const COUNT_BASE: &str = "each";
/// Base unit for volume quantities
pub const VOLUME_BASE: &str = "ml";
/// Base unit for weight quantities
pub const WEIGHT_BASE: &str = "g";

/// Measurement family of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Count,
    Volume,
    Weight,
    /// Not convertible to anything, including other unknown units
    Unknown,
}

/// A recognized volume or weight unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredUnit {
    /// Canonical spelling, also used for display (e.g. "tbsp")
    pub canonical: &'static str,
    /// Multiplier to the family base unit (ml or g)
    pub factor_to_base: f64,
}

impl MeasuredUnit {
    pub const fn new(canonical: &'static str, factor_to_base: f64) -> Self {
        Self {
            canonical,
            factor_to_base,
        }
    }

    /// Convert a quantity in this unit to the base unit
    pub fn to_base(&self, quantity: f64) -> f64 {
        quantity * self.factor_to_base
    }

    /// Convert a base-unit quantity into this unit
    pub fn from_base(&self, base_quantity: f64) -> f64 {
        base_quantity / self.factor_to_base
    }
}

/// Structured description of a classified unit string
#[derive(Debug, Clone, PartialEq)]
pub enum UnitDescriptor {
    /// Bare counts ("3 eggs") use canonical "", explicit ones ("2 pcs") use "each"
    Count { canonical: &'static str },
    Volume(MeasuredUnit),
    Weight(MeasuredUnit),
    /// Normalized label of an unrecognized unit ("knob", "pinch")
    Unknown { label: String },
}

impl UnitDescriptor {
    pub fn family(&self) -> UnitFamily {
        match self {
            UnitDescriptor::Count { .. } => UnitFamily::Count,
            UnitDescriptor::Volume(_) => UnitFamily::Volume,
            UnitDescriptor::Weight(_) => UnitFamily::Weight,
            UnitDescriptor::Unknown { .. } => UnitFamily::Unknown,
        }
    }

    pub fn canonical_unit(&self) -> &str {
        match self {
            UnitDescriptor::Count { canonical } => *canonical,
            UnitDescriptor::Volume(unit) | UnitDescriptor::Weight(unit) => unit.canonical,
            UnitDescriptor::Unknown { label } => label.as_str(),
        }
    }

    /// Unit string shown next to a quantity
    pub fn display_unit(&self) -> &str {
        self.canonical_unit()
    }

    pub fn base_unit(&self) -> Option<&'static str> {
        match self {
            UnitDescriptor::Count { .. } => Some(COUNT_BASE),
            UnitDescriptor::Volume(_) => Some(VOLUME_BASE),
            UnitDescriptor::Weight(_) => Some(WEIGHT_BASE),
            UnitDescriptor::Unknown { .. } => None,
        }
    }

    pub fn factor_to_base(&self) -> Option<f64> {
        match self {
            UnitDescriptor::Count { .. } => Some(1.0),
            UnitDescriptor::Volume(unit) | UnitDescriptor::Weight(unit) => {
                Some(unit.factor_to_base)
            }
            UnitDescriptor::Unknown { .. } => None,
        }
    }
}

// ============================================================================
// Unit Recognition
// ============================================================================

/// Normalize a unit string: lowercase, trim, collapse whitespace, drop one trailing period
pub fn normalize_unit(raw: &str) -> String {
    let collapsed = raw
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match collapsed.strip_suffix('.') {
        Some(stripped) => stripped.trim_end().to_string(),
        None => collapsed,
    }
}

/// Look up a normalized count alias
pub fn is_count_alias(unit: &str) -> bool {
    matches!(unit, "each" | "ea" | "pc" | "pcs" | "piece" | "pieces")
}

/// Look up a normalized volume alias
pub fn volume_unit(unit: &str) -> Option<MeasuredUnit> {
    let measured = match unit {
        "tsp" | "tsps" | "teaspoon" | "teaspoons" => MeasuredUnit::new("tsp", ML_PER_TSP),
        "tbsp" | "tbsps" | "tbs" | "tbl" | "tablespoon" | "tablespoons" => {
            MeasuredUnit::new("tbsp", ML_PER_TBSP)
        }
        "cup" | "cups" | "c" => MeasuredUnit::new("cup", ML_PER_CUP),
        "ml" | "mls" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
            MeasuredUnit::new("ml", 1.0)
        }
        "l" | "liter" | "liters" | "litre" | "litres" => MeasuredUnit::new("l", ML_PER_LITER),
        "fl oz" | "fl. oz" | "floz" | "fluid ounce" | "fluid ounces" => {
            MeasuredUnit::new("fl oz", ML_PER_FL_OZ)
        }
        "pt" | "pts" | "pint" | "pints" => MeasuredUnit::new("pt", ML_PER_PINT),
        "qt" | "qts" | "quart" | "quarts" => MeasuredUnit::new("qt", ML_PER_QUART),
        "gal" | "gals" | "gallon" | "gallons" => MeasuredUnit::new("gal", ML_PER_GALLON),
        _ => return None,
    };
    Some(measured)
}

/// Look up a normalized weight alias
pub fn weight_unit(unit: &str) -> Option<MeasuredUnit> {
    let measured = match unit {
        "g" | "gs" | "gram" | "grams" | "gramme" | "grammes" => MeasuredUnit::new("g", 1.0),
        "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" | "kilogramme"
        | "kilogrammes" => MeasuredUnit::new("kg", G_PER_KG),
        "oz" | "ounce" | "ounces" => MeasuredUnit::new("oz", G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => MeasuredUnit::new("lb", G_PER_LB),
        _ => return None,
    };
    Some(measured)
}

/// Classify a free-text unit string. Never fails: unmatched input is `Unknown`.
pub fn classify_unit(raw: &str) -> UnitDescriptor {
    let normalized = normalize_unit(raw);

    if normalized.is_empty() {
        return UnitDescriptor::Count { canonical: "" };
    }

    if is_count_alias(&normalized) {
        return UnitDescriptor::Count {
            canonical: COUNT_BASE,
        };
    }

    if let Some(unit) = volume_unit(&normalized) {
        return UnitDescriptor::Volume(unit);
    }

    if let Some(unit) = weight_unit(&normalized) {
        return UnitDescriptor::Weight(unit);
    }

    UnitDescriptor::Unknown { label: normalized }
}
