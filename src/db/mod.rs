//! Database module
//!
//! SQLite-backed key-value store holding the ingredient and recipe collections.

pub mod connection;
pub mod schema;
pub mod store;

pub use connection::{Database, DbError, DbResult};
pub use store::{Store, INGREDIENTS_KEY, RECIPES_KEY};
