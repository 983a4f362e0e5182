//! Recipe cost calculator
//!
//! Pure projections from a recipe and the ingredient list. Derived values are
//! recomputed on every call so they always reflect current ingredient prices.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{CalculatedRecipe, Ingredient, Recipe, Unit};

/// Margin thresholds used to classify a recipe's profitability
pub const HEALTHY_MARGIN: f64 = 70.0;
pub const FAIR_MARGIN: f64 = 50.0;

/// How comfortable a profit margin is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginHealth {
    Healthy,
    Fair,
    Poor,
}

impl MarginHealth {
    pub fn from_margin(margin: f64) -> Self {
        if margin >= HEALTHY_MARGIN {
            MarginHealth::Healthy
        } else if margin >= FAIR_MARGIN {
            MarginHealth::Fair
        } else {
            MarginHealth::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarginHealth::Healthy => "healthy",
            MarginHealth::Fair => "fair",
            MarginHealth::Poor => "poor",
        }
    }
}

/// Cost of one recipe entry whose ingredient still exists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub ingredient_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub cost: f64,
}

fn index_ingredients(ingredients: &[Ingredient]) -> HashMap<&str, &Ingredient> {
    ingredients.iter().map(|i| (i.id.as_str(), i)).collect()
}

/// Derive total cost, per-serving cost, profit, and margin for a recipe.
///
/// Entries that reference a missing ingredient contribute nothing. Zero
/// servings give a zero cost per serving and a zero selling price gives a
/// zero margin, so no division ever fails.
pub fn calculate_recipe_cost(recipe: &Recipe, ingredients: &[Ingredient]) -> CalculatedRecipe {
    let by_id = index_ingredients(ingredients);

    let total_cost: f64 = recipe
        .ingredients
        .iter()
        .filter_map(|ri| {
            by_id
                .get(ri.ingredient_id.as_str())
                .map(|ing| ing.line_cost(ri.quantity))
        })
        .sum();

    let cost_per_serving = if recipe.servings > 0 {
        total_cost / f64::from(recipe.servings)
    } else {
        0.0
    };

    let profit_per_serving = recipe.selling_price - cost_per_serving;

    let profit_margin = if recipe.selling_price > 0.0 {
        profit_per_serving / recipe.selling_price * 100.0
    } else {
        0.0
    };

    CalculatedRecipe {
        recipe: recipe.clone(),
        total_cost,
        cost_per_serving,
        profit_per_serving,
        profit_margin,
    }
}

/// Calculate every recipe against the same ingredient list
pub fn calculate_all(recipes: &[Recipe], ingredients: &[Ingredient]) -> Vec<CalculatedRecipe> {
    recipes
        .iter()
        .map(|r| calculate_recipe_cost(r, ingredients))
        .collect()
}

/// Per-entry costs, in recipe order, skipping entries whose ingredient is gone
pub fn line_items(recipe: &Recipe, ingredients: &[Ingredient]) -> Vec<LineItem> {
    let by_id = index_ingredients(ingredients);

    recipe
        .ingredients
        .iter()
        .filter_map(|ri| {
            by_id.get(ri.ingredient_id.as_str()).map(|ing| LineItem {
                ingredient_id: ing.id.clone(),
                name: ing.name.clone(),
                quantity: ri.quantity,
                unit: ing.unit,
                cost: ing.line_cost(ri.quantity),
            })
        })
        .collect()
}
