//! Shopping list engine
//!
//! Quantity parsing, unit classification and aggregation of recipe
//! ingredients into a merged, aisle-grouped shopping list.

pub mod aggregator;
pub mod display;
pub mod normalize;
pub mod quantity;
pub mod units;

pub use aggregator::{aggregate, aggregate_with_stats, Accumulator, AggregationStats};
pub use display::{format_quantity, round_quantity, select_volume_unit, select_weight_unit};
pub use normalize::{normalize_aisle, normalize_name, DEFAULT_AISLE};
pub use quantity::parse_quantity;
pub use units::{classify_unit, MeasuredUnit, UnitDescriptor, UnitFamily};
