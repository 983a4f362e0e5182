//! Input validation errors
//!
//! Raised when form-style input would produce an invalid ingredient or recipe.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} name cannot be empty")]
    EmptyName(&'static str),

    #[error("cost_per_unit must be a non-negative number, got {0}")]
    InvalidCost(f64),

    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("quantity must be greater than 0, got {0}")]
    InvalidQuantity(f64),

    #[error("ingredient_id cannot be empty")]
    EmptyIngredientId,

    #[error("Recipe must contain at least one ingredient")]
    NoIngredients,

    #[error("selling_price is required")]
    MissingSellingPrice,

    #[error("selling_price must be a non-negative number, got {0}")]
    InvalidSellingPrice(f64),
}
