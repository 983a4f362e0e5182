//! Profit overview
//!
//! Summary figures across every calculated recipe.

use serde::Serialize;

use super::calculator::MarginHealth;
use crate::models::CalculatedRecipe;

/// A recipe singled out by the overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeHighlight {
    pub id: String,
    pub name: String,
    pub profit_margin: f64,
    pub profit_per_serving: f64,
}

impl From<&CalculatedRecipe> for RecipeHighlight {
    fn from(calc: &CalculatedRecipe) -> Self {
        Self {
            id: calc.id.clone(),
            name: calc.name.clone(),
            profit_margin: calc.profit_margin,
            profit_per_serving: calc.profit_per_serving,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitOverview {
    pub recipe_count: usize,
    pub average_margin: f64,
    pub average_cost_per_serving: f64,
    pub health: MarginHealth,
    /// Only set once there are at least two recipes to compare
    pub most_profitable: Option<RecipeHighlight>,
    pub least_profitable: Option<RecipeHighlight>,
}

impl ProfitOverview {
    /// Summarize recipes; `None` when there is nothing to summarize
    pub fn from_recipes(recipes: &[CalculatedRecipe]) -> Option<Self> {
        if recipes.is_empty() {
            return None;
        }

        let count = recipes.len() as f64;
        let average_margin = recipes.iter().map(|r| r.profit_margin).sum::<f64>() / count;
        let average_cost_per_serving =
            recipes.iter().map(|r| r.cost_per_serving).sum::<f64>() / count;

        let (most_profitable, least_profitable) = if recipes.len() >= 2 {
            // Stable sort: ties keep stored order
            let mut by_margin: Vec<&CalculatedRecipe> = recipes.iter().collect();
            by_margin.sort_by(|a, b| b.profit_margin.total_cmp(&a.profit_margin));
            (
                by_margin.first().map(|r| RecipeHighlight::from(*r)),
                by_margin.last().map(|r| RecipeHighlight::from(*r)),
            )
        } else {
            (None, None)
        };

        Some(Self {
            recipe_count: recipes.len(),
            average_margin,
            average_cost_per_serving,
            health: MarginHealth::from_margin(average_margin),
            most_profitable,
            least_profitable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recipe;

    fn calc(id: &str, margin: f64, cost_per_serving: f64) -> CalculatedRecipe {
        CalculatedRecipe {
            recipe: Recipe {
                id: id.to_string(),
                name: format!("Recipe {}", id),
                ingredients: Vec::new(),
                servings: 1,
                selling_price: 10.0,
            },
            total_cost: cost_per_serving,
            cost_per_serving,
            profit_per_serving: 10.0 - cost_per_serving,
            profit_margin: margin,
        }
    }

    #[test]
    fn test_empty_has_no_overview() {
        assert_eq!(ProfitOverview::from_recipes(&[]), None);
    }

    #[test]
    fn test_single_recipe_has_no_highlights() {
        let overview = ProfitOverview::from_recipes(&[calc("a", 80.0, 2.0)]).unwrap();
        assert_eq!(overview.recipe_count, 1);
        assert_eq!(overview.average_margin, 80.0);
        assert_eq!(overview.health, MarginHealth::Healthy);
        assert!(overview.most_profitable.is_none());
        assert!(overview.least_profitable.is_none());
    }

    #[test]
    fn test_averages_and_highlights() {
        let recipes = [calc("a", 60.0, 4.0), calc("b", 80.0, 2.0), calc("c", 40.0, 6.0)];
        let overview = ProfitOverview::from_recipes(&recipes).unwrap();

        assert_eq!(overview.recipe_count, 3);
        assert!((overview.average_margin - 60.0).abs() < 1e-9);
        assert!((overview.average_cost_per_serving - 4.0).abs() < 1e-9);
        assert_eq!(overview.health, MarginHealth::Fair);
        assert_eq!(overview.most_profitable.unwrap().id, "b");
        assert_eq!(overview.least_profitable.unwrap().id, "c");
    }

    #[test]
    fn test_ties_keep_stored_order() {
        let recipes = [calc("a", 50.0, 5.0), calc("b", 50.0, 5.0)];
        let overview = ProfitOverview::from_recipes(&recipes).unwrap();
        assert_eq!(overview.most_profitable.unwrap().id, "a");
        assert_eq!(overview.least_profitable.unwrap().id, "b");
    }
}
