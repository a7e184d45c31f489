//! Shopping List Builder Library
//!
//! Merges ingredients from a selection of recipes into one aisle-grouped
//! shopping list, summing compatible quantities and keeping incompatible
//! units apart.

pub mod build_info;
pub mod catalog;
pub mod mcp;
pub mod models;
pub mod shopping;
pub mod tools;
