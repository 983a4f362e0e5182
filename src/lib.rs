//! PlateProfit Library
//!
//! Recipe costing, profit margins, and subscription checkout.

pub mod build_info;
pub mod checkout;
pub mod config;
pub mod costing;
pub mod db;
pub mod mcp;
pub mod models;
pub mod tools;
