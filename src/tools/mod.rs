//! Shoplist Tools module
//!
//! MCP tool implementations for the shopping list builder.

pub mod recipes;
pub mod shopping;
pub mod status;
