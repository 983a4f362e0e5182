//! Recipe MCP Tools
//!
//! Create, inspect, list, and delete recipes. Every read recalculates costs
//! from the current ingredient prices.

use serde::Serialize;
use tracing::info;

use crate::costing::{
    calculate_all, calculate_recipe_cost, format_currency, format_percent, line_items, LineItem,
    MarginHealth,
};
use crate::db::Store;
use crate::models::{CalculatedRecipe, Ingredient, RecipeDraft};

/// Formatted cost figures for display
#[derive(Debug, Serialize)]
pub struct DisplayFigures {
    pub total_cost: String,
    pub cost_per_serving: String,
    pub selling_price: String,
    pub profit_per_serving: String,
    pub profit_margin: String,
}

impl From<&CalculatedRecipe> for DisplayFigures {
    fn from(calc: &CalculatedRecipe) -> Self {
        Self {
            total_cost: format_currency(calc.total_cost),
            cost_per_serving: format_currency(calc.cost_per_serving),
            selling_price: format_currency(calc.selling_price),
            profit_per_serving: format_currency(calc.profit_per_serving),
            profit_margin: format_percent(calc.profit_margin),
        }
    }
}

/// Full recipe detail with line items
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: CalculatedRecipe,
    pub health: MarginHealth,
    pub line_items: Vec<LineItem>,
    pub display: DisplayFigures,
}

impl RecipeDetail {
    fn build(calc: CalculatedRecipe, ingredients: &[Ingredient]) -> Self {
        Self {
            health: MarginHealth::from_margin(calc.profit_margin),
            line_items: line_items(&calc.recipe, ingredients),
            display: DisplayFigures::from(&calc),
            recipe: calc,
        }
    }
}

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub servings: u32,
    pub ingredient_count: usize,
    pub selling_price: f64,
    pub cost_per_serving: f64,
    pub profit_per_serving: f64,
    pub profit_margin: f64,
    pub health: MarginHealth,
    pub display: DisplayFigures,
}

impl From<&CalculatedRecipe> for RecipeSummary {
    fn from(calc: &CalculatedRecipe) -> Self {
        Self {
            id: calc.id.clone(),
            name: calc.name.clone(),
            servings: calc.servings,
            ingredient_count: calc.ingredients.len(),
            selling_price: calc.selling_price,
            cost_per_serving: calc.cost_per_serving,
            profit_per_serving: calc.profit_per_serving,
            profit_margin: calc.profit_margin,
            health: MarginHealth::from_margin(calc.profit_margin),
            display: DisplayFigures::from(calc),
        }
    }
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total: usize,
}

/// Response for delete_recipe
#[derive(Debug, Serialize)]
pub struct DeleteRecipeResponse {
    pub success: bool,
    pub deleted_id: String,
}

/// Input for creating a recipe in one call
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub servings: Option<u32>,
    pub selling_price: Option<f64>,
    /// (ingredient id, quantity); repeated ids are summed
    pub ingredients: Vec<(String, f64)>,
}

// ============================================================================
// Recipe Tools
// ============================================================================

/// Create a recipe from ingredients that exist right now
pub fn create_recipe(store: &Store, data: NewRecipe) -> Result<RecipeDetail, String> {
    let ingredients = store
        .get_ingredients()
        .map_err(|e| format!("Failed to load ingredients: {}", e))?;

    let mut draft = RecipeDraft::new(data.name)
        .with_servings(data.servings)
        .with_selling_price(data.selling_price);

    for (ingredient_id, quantity) in &data.ingredients {
        let ingredient_id = ingredient_id.trim();
        if !ingredient_id.is_empty() && !ingredients.iter().any(|i| i.id == ingredient_id) {
            return Err(format!("Ingredient not found with id: {}", ingredient_id));
        }
        draft
            .add_ingredient(ingredient_id, *quantity)
            .map_err(|e| e.to_string())?;
    }

    let recipe = draft.finish().map_err(|e| e.to_string())?;

    let mut recipes = store
        .get_recipes()
        .map_err(|e| format!("Failed to load recipes: {}", e))?;
    recipes.push(recipe.clone());
    store
        .save_recipes(&recipes)
        .map_err(|e| format!("Failed to save recipes: {}", e))?;

    info!(id = %recipe.id, name = %recipe.name, "Recipe created");

    let calc = calculate_recipe_cost(&recipe, &ingredients);
    Ok(RecipeDetail::build(calc, &ingredients))
}

/// Get a recipe with freshly calculated costs
pub fn get_recipe(store: &Store, id: &str) -> Result<Option<RecipeDetail>, String> {
    let recipes = store
        .get_recipes()
        .map_err(|e| format!("Failed to load recipes: {}", e))?;

    let Some(recipe) = recipes.into_iter().find(|r| r.id == id) else {
        return Ok(None);
    };

    let ingredients = store
        .get_ingredients()
        .map_err(|e| format!("Failed to load ingredients: {}", e))?;

    let calc = calculate_recipe_cost(&recipe, &ingredients);
    Ok(Some(RecipeDetail::build(calc, &ingredients)))
}

/// List all recipes with freshly calculated costs
pub fn list_recipes(store: &Store) -> Result<ListRecipesResponse, String> {
    let recipes = store
        .get_recipes()
        .map_err(|e| format!("Failed to load recipes: {}", e))?;
    let ingredients = store
        .get_ingredients()
        .map_err(|e| format!("Failed to load ingredients: {}", e))?;

    let summaries: Vec<RecipeSummary> = calculate_all(&recipes, &ingredients)
        .iter()
        .map(RecipeSummary::from)
        .collect();
    let total = summaries.len();

    Ok(ListRecipesResponse {
        recipes: summaries,
        total,
    })
}

/// Delete a recipe
pub fn delete_recipe(store: &Store, id: &str) -> Result<DeleteRecipeResponse, String> {
    let mut recipes = store
        .get_recipes()
        .map_err(|e| format!("Failed to load recipes: {}", e))?;

    let before = recipes.len();
    recipes.retain(|r| r.id != id);
    if recipes.len() == before {
        return Err(format!("Recipe not found with id: {}", id));
    }

    store
        .save_recipes(&recipes)
        .map_err(|e| format!("Failed to save recipes: {}", e))?;

    info!(id, "Recipe deleted");

    Ok(DeleteRecipeResponse {
        success: true,
        deleted_id: id.to_string(),
    })
}
