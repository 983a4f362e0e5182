//! Data models
//!
//! Ingredients, recipes, and the derived view of a recipe's costs.

mod calculated_recipe;
mod ingredient;
mod recipe;
mod recipe_draft;
mod unit;
mod validation;

pub use calculated_recipe::CalculatedRecipe;
pub use ingredient::{Ingredient, IngredientCreate};
pub use recipe::{Recipe, RecipeIngredient};
pub use recipe_draft::RecipeDraft;
pub use unit::{Unit, UnitCategory};
pub use validation::ValidationError;
