//! Recipe draft
//!
//! An unsaved recipe being assembled ingredient by ingredient. Nothing about a
//! draft is persisted; finishing it produces a complete [`Recipe`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recipe::default_servings;
use super::{Recipe, RecipeIngredient, ValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub servings: Option<u32>,
    pub selling_price: Option<f64>,
    ingredients: Vec<RecipeIngredient>,
}

impl RecipeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_servings(mut self, servings: Option<u32>) -> Self {
        self.servings = servings;
        self
    }

    pub fn with_selling_price(mut self, selling_price: Option<f64>) -> Self {
        self.selling_price = selling_price;
        self
    }

    /// Add an ingredient. Adding one already in the draft sums the quantities.
    pub fn add_ingredient(
        &mut self,
        ingredient_id: &str,
        quantity: f64,
    ) -> Result<(), ValidationError> {
        let ingredient_id = ingredient_id.trim();
        if ingredient_id.is_empty() {
            return Err(ValidationError::EmptyIngredientId);
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(ValidationError::InvalidQuantity(quantity));
        }

        match self
            .ingredients
            .iter_mut()
            .find(|ri| ri.ingredient_id == ingredient_id)
        {
            Some(existing) => {
                let total = existing.quantity + quantity;
                if !total.is_finite() {
                    return Err(ValidationError::InvalidQuantity(total));
                }
                existing.quantity = total;
            }
            None => self.ingredients.push(RecipeIngredient {
                ingredient_id: ingredient_id.to_string(),
                quantity,
            }),
        }
        Ok(())
    }

    /// Drop an ingredient from the draft. Returns false if it wasn't there.
    pub fn remove_ingredient(&mut self, ingredient_id: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|ri| ri.ingredient_id != ingredient_id);
        self.ingredients.len() != before
    }

    pub fn ingredients(&self) -> &[RecipeIngredient] {
        &self.ingredients
    }

    /// Validate the draft and turn it into a recipe with a fresh identifier
    pub fn finish(self) -> Result<Recipe, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName("Recipe"));
        }
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        let selling_price = self
            .selling_price
            .ok_or(ValidationError::MissingSellingPrice)?;
        if !selling_price.is_finite() || selling_price < 0.0 {
            return Err(ValidationError::InvalidSellingPrice(selling_price));
        }

        // Zero servings falls back to the default, same as an empty field
        let servings = match self.servings {
            Some(n) if n > 0 => n,
            _ => default_servings(),
        };

        Ok(Recipe {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            ingredients: self.ingredients,
            servings,
            selling_price,
        })
    }
}
