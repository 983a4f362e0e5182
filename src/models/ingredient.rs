//! Ingredient model
//!
//! A priced raw input. Ingredients are created and deleted, never edited.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Unit, ValidationError};

/// An ingredient with its cost per unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub cost_per_unit: f64,
    pub unit: Unit,
}

/// Data for creating a new ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub cost_per_unit: f64,
    #[serde(default)]
    pub unit: Unit,
}

impl Ingredient {
    /// Validate input and assign a fresh identifier
    pub fn create(data: &IngredientCreate) -> Result<Self, ValidationError> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName("Ingredient"));
        }
        if !data.cost_per_unit.is_finite() || data.cost_per_unit < 0.0 {
            return Err(ValidationError::InvalidCost(data.cost_per_unit));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            cost_per_unit: data.cost_per_unit,
            unit: data.unit,
        })
    }

    /// Cost of `quantity` of this ingredient in its own unit
    pub fn line_cost(&self, quantity: f64) -> f64 {
        self.cost_per_unit * quantity
    }
}
