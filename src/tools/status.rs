//! PlateProfit Status Tool
//!
//! Provides runtime status information about the PlateProfit service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::{schema, Store};

/// Costing workflow instructions for AI assistants
pub const COSTING_INSTRUCTIONS: &str = r#"
# PlateProfit Costing Instructions

PlateProfit works out what each dish costs to make and how much it earns.

## Workflow

1. **Add ingredients** with `add_ingredient`: a name, the cost per unit, and
   the unit the cost is quoted in (lb, oz, kg, g, each, cup, tbsp, tsp, ml,
   l, gal). Defaults to lb.
2. **Create recipes** with `create_recipe`: a name, the number of servings it
   makes (defaults to 1), the selling price per serving, and a list of
   `{ingredient_id, quantity}` entries. Quantities are in each ingredient's
   own unit. Listing the same ingredient twice adds the quantities together.
3. **Review** with `list_recipes`, `get_recipe`, and `profit_overview`.

## How costs are calculated

- Total cost = sum of (cost per unit x quantity) over the recipe's ingredients
- Cost per serving = total cost / servings
- Profit per serving = selling price - cost per serving
- Margin = profit per serving / selling price x 100

Margins of 70% or more are healthy, 50-70% fair, below 50% poor.

## Things to know

- Ingredients cannot be edited. To change a price, add a new ingredient and
  recreate the recipe.
- Deleting an ingredient does not touch recipes that use it. Those recipes
  simply stop counting its cost, so re-check them afterwards
  (`delete_ingredient` lists them).
- Costs are always recalculated from current ingredient prices.

## Upgrading

`start_checkout` returns a Stripe checkout link for PlateProfit Pro
(monthly $19.00 or yearly $149.00, 7-day trial).
"#;

/// Runtime status of the PlateProfit service
#[derive(Debug, Clone, Serialize)]
pub struct PlateProfitStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub stored_keys: Option<i64>,

    /// Checkout
    pub stripe_configured: bool,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    stripe_configured: bool,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf, stripe_configured: bool) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            stripe_configured,
        }
    }

    /// Get the current status
    pub fn get_status(&self, store: &Store) -> PlateProfitStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let stored_keys = store.database().with_conn(schema::key_count).ok();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        PlateProfitStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            stored_keys,
            stripe_configured: self.stripe_configured,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;

    #[test]
    fn test_status_counts_keys() {
        let store = Store::in_memory().unwrap();
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/plateprofit.db"), false);

        let status = tracker.get_status(&store);
        assert_eq!(status.stored_keys, Some(0));
        assert_eq!(status.database_size_bytes, None);
        assert!(!status.stripe_configured);

        store.save_ingredients(&Vec::<Ingredient>::new()).unwrap();
        assert_eq!(tracker.get_status(&store).stored_keys, Some(1));
    }
}
