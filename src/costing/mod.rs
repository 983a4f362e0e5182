//! Cost calculation module
//!
//! Derives per-serving cost, profit, and margin from recipes and the current
//! ingredient prices, and formats the results for display.

pub mod calculator;
pub mod format;
pub mod overview;

pub use calculator::{calculate_all, calculate_recipe_cost, line_items, LineItem, MarginHealth};
pub use format::{format_currency, format_percent};
pub use overview::{ProfitOverview, RecipeHighlight};
