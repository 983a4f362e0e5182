//! Ingredient MCP Tools
//!
//! Add, list, and delete priced ingredients.

use serde::Serialize;
use tracing::info;

use crate::costing::format_currency;
use crate::db::Store;
use crate::models::{Ingredient, IngredientCreate, Unit, UnitCategory, ValidationError};

/// Ingredient as shown in lists and after creation
#[derive(Debug, Serialize)]
pub struct IngredientSummary {
    pub id: String,
    pub name: String,
    pub cost_per_unit: f64,
    pub unit: Unit,
    pub unit_category: UnitCategory,
    /// e.g. "$4.00/lb"
    pub display_cost: String,
}

impl From<&Ingredient> for IngredientSummary {
    fn from(ing: &Ingredient) -> Self {
        Self {
            id: ing.id.clone(),
            name: ing.name.clone(),
            cost_per_unit: ing.cost_per_unit,
            unit: ing.unit,
            unit_category: ing.unit.category(),
            display_cost: format!("{}/{}", format_currency(ing.cost_per_unit), ing.unit),
        }
    }
}

/// Response for list_ingredients
#[derive(Debug, Serialize)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<IngredientSummary>,
    pub total: usize,
}

/// Response for delete_ingredient
#[derive(Debug, Serialize)]
pub struct DeleteIngredientResponse {
    pub success: bool,
    pub deleted_id: String,
    /// Recipes that still list this ingredient; it now costs them nothing
    pub still_referenced_by: Vec<String>,
}

/// Parse an optional unit token, defaulting to pounds
pub fn parse_unit(unit: Option<&str>) -> Result<Unit, String> {
    match unit.map(str::trim).filter(|u| !u.is_empty()) {
        None => Ok(Unit::default()),
        Some(token) => Unit::parse(token)
            .ok_or_else(|| ValidationError::UnknownUnit(token.to_string()).to_string()),
    }
}

/// Add a new ingredient
pub fn add_ingredient(store: &Store, data: IngredientCreate) -> Result<IngredientSummary, String> {
    let ingredient = Ingredient::create(&data).map_err(|e| e.to_string())?;

    let mut ingredients = store
        .get_ingredients()
        .map_err(|e| format!("Failed to load ingredients: {}", e))?;
    ingredients.push(ingredient.clone());
    store
        .save_ingredients(&ingredients)
        .map_err(|e| format!("Failed to save ingredients: {}", e))?;

    info!(id = %ingredient.id, name = %ingredient.name, "Ingredient added");
    Ok(IngredientSummary::from(&ingredient))
}

/// List all ingredients in the order they were added
pub fn list_ingredients(store: &Store) -> Result<ListIngredientsResponse, String> {
    let ingredients = store
        .get_ingredients()
        .map_err(|e| format!("Failed to load ingredients: {}", e))?;

    let summaries: Vec<IngredientSummary> = ingredients.iter().map(IngredientSummary::from).collect();
    let total = summaries.len();

    Ok(ListIngredientsResponse {
        ingredients: summaries,
        total,
    })
}

/// Delete an ingredient. Recipes referencing it are left untouched.
pub fn delete_ingredient(store: &Store, id: &str) -> Result<DeleteIngredientResponse, String> {
    let mut ingredients = store
        .get_ingredients()
        .map_err(|e| format!("Failed to load ingredients: {}", e))?;

    let before = ingredients.len();
    ingredients.retain(|i| i.id != id);
    if ingredients.len() == before {
        return Err(format!("Ingredient not found with id: {}", id));
    }

    let still_referenced_by: Vec<String> = store
        .get_recipes()
        .map_err(|e| format!("Failed to load recipes: {}", e))?
        .into_iter()
        .filter(|r| r.references(id))
        .map(|r| r.name)
        .collect();

    store
        .save_ingredients(&ingredients)
        .map_err(|e| format!("Failed to save ingredients: {}", e))?;

    info!(id, referenced_by = still_referenced_by.len(), "Ingredient deleted");

    Ok(DeleteIngredientResponse {
        success: true,
        deleted_id: id.to_string(),
        still_referenced_by,
    })
}
