//! Collection store
//!
//! Ingredients and recipes live as two flat JSON arrays under fixed keys.
//! Every write replaces the whole array; a missing or unreadable value loads
//! as an empty collection.

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::connection::{Database, DbResult};
use super::schema;
use crate::models::{Ingredient, Recipe};

pub const INGREDIENTS_KEY: &str = "plateprofit_ingredients";
pub const RECIPES_KEY: &str = "plateprofit_recipes";

/// Key-value store holding the ingredient and recipe collections
#[derive(Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Wrap a database, creating the key-value table if needed
    pub fn open(db: Database) -> DbResult<Self> {
        db.with_conn(schema::ensure_schema)?;
        Ok(Self { db })
    }

    /// Fresh store backed by an in-memory database
    pub fn in_memory() -> DbResult<Self> {
        Self::open(Database::in_memory()?)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn get_ingredients(&self) -> DbResult<Vec<Ingredient>> {
        self.read_collection(INGREDIENTS_KEY)
    }

    pub fn save_ingredients(&self, ingredients: &[Ingredient]) -> DbResult<()> {
        self.write_collection(INGREDIENTS_KEY, ingredients)
    }

    pub fn get_recipes(&self) -> DbResult<Vec<Recipe>> {
        self.read_collection(RECIPES_KEY)
    }

    pub fn save_recipes(&self, recipes: &[Recipe]) -> DbResult<()> {
        self.write_collection(RECIPES_KEY, recipes)
    }

    /// Raw stored value for a key
    pub fn get_raw(&self, key: &str) -> DbResult<Option<String>> {
        self.db.with_conn(|conn| {
            let value = conn
                .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    /// Replace the stored value for a key
    pub fn set_raw(&self, key: &str, value: &str) -> DbResult<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = datetime('now')
                "#,
                params![key, value],
            )?;
            Ok(())
        })
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> DbResult<Vec<T>> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(key, error = %e, "Stored collection is unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> DbResult<()> {
        let json = serde_json::to_string(items)?;
        self.set_raw(key, &json)?;
        debug!(key, count = items.len(), "Saved collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecipeIngredient, Unit};

    fn flour() -> Ingredient {
        Ingredient {
            id: "flour".to_string(),
            name: "Flour".to_string(),
            cost_per_unit: 0.4,
            unit: Unit::Cup,
        }
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let store = Store::in_memory().unwrap();
        assert!(store.get_ingredients().unwrap().is_empty());
        assert!(store.get_recipes().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_whole_collection() {
        let store = Store::in_memory().unwrap();
        let mut sugar = flour();
        sugar.id = "sugar".to_string();
        sugar.name = "Sugar".to_string();

        store.save_ingredients(&[flour(), sugar.clone()]).unwrap();
        assert_eq!(store.get_ingredients().unwrap().len(), 2);

        store.save_ingredients(&[sugar.clone()]).unwrap();
        assert_eq!(store.get_ingredients().unwrap(), vec![sugar]);
    }

    #[test]
    fn test_collections_are_independent() {
        let store = Store::in_memory().unwrap();
        store.save_ingredients(&[flour()]).unwrap();
        store
            .save_recipes(&[Recipe {
                id: "bread".to_string(),
                name: "Bread".to_string(),
                ingredients: vec![RecipeIngredient {
                    ingredient_id: "flour".to_string(),
                    quantity: 3.0,
                }],
                servings: 8,
                selling_price: 6.0,
            }])
            .unwrap();

        store.save_ingredients(&[]).unwrap();
        assert!(store.get_ingredients().unwrap().is_empty());
        assert_eq!(store.get_recipes().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_value_loads_empty() {
        let store = Store::in_memory().unwrap();
        store.set_raw(INGREDIENTS_KEY, "{not json").unwrap();
        assert!(store.get_ingredients().unwrap().is_empty());

        store.set_raw(RECIPES_KEY, r#"{"id": "not an array"}"#).unwrap();
        assert!(store.get_recipes().unwrap().is_empty());
    }

    #[test]
    fn test_stored_value_is_plain_array() {
        let store = Store::in_memory().unwrap();
        store.save_ingredients(&[flour()]).unwrap();
        let raw = store.get_raw(INGREDIENTS_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"flour","name":"Flour","costPerUnit":0.4,"unit":"cup"}]"#
        );
    }
}
