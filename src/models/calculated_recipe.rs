//! Calculated recipe
//!
//! A recipe plus its derived cost figures. Never persisted.

use serde::Serialize;

use super::Recipe;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub total_cost: f64,
    pub cost_per_serving: f64,
    pub profit_per_serving: f64,
    /// Profit per serving as a percentage of selling price
    pub profit_margin: f64,
}

impl std::ops::Deref for CalculatedRecipe {
    type Target = Recipe;

    fn deref(&self) -> &Recipe {
        &self.recipe
    }
}
