//! Profit overview tool
//!
//! Dashboard-style summary across every recipe.

use serde::Serialize;

use crate::costing::{calculate_all, format_currency, format_percent, ProfitOverview};
use crate::db::Store;

#[derive(Debug, Serialize)]
pub struct OverviewDisplay {
    pub average_margin: String,
    pub average_cost_per_serving: String,
}

/// Response for profit_overview
#[derive(Debug, Serialize)]
pub struct ProfitOverviewResponse {
    pub ingredient_count: usize,
    pub recipe_count: usize,
    /// Absent until at least one recipe exists
    pub overview: Option<ProfitOverview>,
    pub display: Option<OverviewDisplay>,
    pub next_step: Option<&'static str>,
}

pub fn profit_overview(store: &Store) -> Result<ProfitOverviewResponse, String> {
    let ingredients = store
        .get_ingredients()
        .map_err(|e| format!("Failed to load ingredients: {}", e))?;
    let recipes = store
        .get_recipes()
        .map_err(|e| format!("Failed to load recipes: {}", e))?;

    let calculated = calculate_all(&recipes, &ingredients);
    let overview = ProfitOverview::from_recipes(&calculated);

    let display = overview.as_ref().map(|o| OverviewDisplay {
        average_margin: format_percent(o.average_margin),
        average_cost_per_serving: format_currency(o.average_cost_per_serving),
    });

    let next_step = if ingredients.is_empty() {
        Some("Add your first ingredient with its cost per unit.")
    } else if recipes.is_empty() {
        Some("Create your first recipe to see profit analysis.")
    } else {
        None
    };

    Ok(ProfitOverviewResponse {
        ingredient_count: ingredients.len(),
        recipe_count: recipes.len(),
        overview,
        display,
        next_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientCreate, Unit};
    use crate::tools::ingredients::add_ingredient;
    use crate::tools::recipes::{create_recipe, NewRecipe};

    #[test]
    fn test_empty_store() {
        let store = Store::in_memory().unwrap();
        let resp = profit_overview(&store).unwrap();
        assert!(resp.overview.is_none());
        assert!(resp.display.is_none());
        assert_eq!(
            resp.next_step,
            Some("Add your first ingredient with its cost per unit.")
        );
    }

    #[test]
    fn test_overview_with_two_recipes() {
        let store = Store::in_memory().unwrap();
        let beef = add_ingredient(
            &store,
            IngredientCreate {
                name: "Ground Beef".to_string(),
                cost_per_unit: 4.0,
                unit: Unit::Lb,
            },
        )
        .unwrap();
        assert!(profit_overview(&store).unwrap().next_step.is_some());

        for (name, price) in [("Burgers", 10.0), ("Sliders", 4.0)] {
            create_recipe(
                &store,
                NewRecipe {
                    name: name.to_string(),
                    servings: Some(4),
                    selling_price: Some(price),
                    ingredients: vec![(beef.id.clone(), 2.0)],
                },
            )
            .unwrap();
        }

        let resp = profit_overview(&store).unwrap();
        let overview = resp.overview.unwrap();
        assert_eq!(resp.next_step, None);
        assert_eq!(overview.recipe_count, 2);
        // Burgers 80%, Sliders 50%
        assert!((overview.average_margin - 65.0).abs() < 1e-9);
        assert_eq!(overview.most_profitable.unwrap().name, "Burgers");
        assert_eq!(overview.least_profitable.unwrap().name, "Sliders");
        assert_eq!(resp.display.unwrap().average_cost_per_serving, "$2.00");
    }
}
