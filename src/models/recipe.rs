//! Recipe model
//!
//! A named combination of ingredient quantities, a serving count, and a
//! selling price.

use serde::{Deserialize, Serialize};

/// One ingredient entry of a recipe, in the ingredient's declared unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub ingredient_id: String,
    pub quantity: f64,
}

/// A saved recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default = "default_servings")]
    pub servings: u32,
    pub selling_price: f64,
}

pub(crate) fn default_servings() -> u32 {
    1
}

impl Recipe {
    /// Whether any entry points at the given ingredient
    pub fn references(&self, ingredient_id: &str) -> bool {
        self.ingredients
            .iter()
            .any(|ri| ri.ingredient_id == ingredient_id)
    }
}
