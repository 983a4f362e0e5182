//! PlateProfit MCP Server Implementation
//!
//! Exposes ingredient, recipe, overview, and checkout tools over MCP.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::checkout::CheckoutGate;
use crate::config::CheckoutConfig;
use crate::db::Store;
use crate::models::IngredientCreate;
use crate::tools::checkout;
use crate::tools::ingredients;
use crate::tools::overview;
use crate::tools::recipes::{self, NewRecipe};
use crate::tools::status::StatusTracker;

/// PlateProfit MCP Service
#[derive(Clone)]
pub struct PlateProfitService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: Store,
    checkout_config: Arc<CheckoutConfig>,
    checkout_gate: CheckoutGate,
    tool_router: ToolRouter<PlateProfitService>,
}

impl PlateProfitService {
    pub fn new(database_path: PathBuf, store: Store, checkout_config: CheckoutConfig) -> Self {
        let stripe_configured = checkout_config.stripe_secret_key.is_some();
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                database_path,
                stripe_configured,
            ))),
            store,
            checkout_config: Arc::new(checkout_config),
            checkout_gate: CheckoutGate::new(),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Ingredient Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddIngredientParams {
    /// Ingredient name (e.g., "Ground Beef")
    pub name: String,
    /// Cost per unit in dollars (e.g., 4.99)
    pub cost_per_unit: f64,
    /// Unit the cost is quoted in: lb, oz, kg, g, each, cup, tbsp, tsp, ml, l, gal (default lb)
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteIngredientParams {
    /// Ingredient ID to delete
    pub id: String,
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeIngredientParam {
    /// Ingredient ID
    pub ingredient_id: String,
    /// Quantity in the ingredient's own unit
    pub quantity: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRecipeParams {
    /// Name of the recipe
    pub name: String,
    /// Number of servings this recipe makes (default 1)
    pub servings: Option<u32>,
    /// Selling price per serving in dollars
    pub selling_price: f64,
    /// Ingredients and quantities; repeated ingredients are added together
    pub ingredients: Vec<RecipeIngredientParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe ID
    pub id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteRecipeParams {
    /// Recipe ID to delete
    pub id: String,
}

// ============================================================================
// Checkout Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartCheckoutParams {
    /// Plan: monthly or yearly (default monthly)
    pub plan: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl PlateProfitService {
    // --- Status ---

    #[tool(description = "Get the current status of the PlateProfit service including build info, database status, and process information")]
    async fn plateprofit_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.store);
        to_json(&status)
    }

    #[tool(description = "Get instructions for costing recipes with PlateProfit. Call this when starting a session or when unsure how the tools fit together.")]
    fn costing_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::COSTING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(COSTING_INSTRUCTIONS)]))
    }

    // --- Ingredients ---

    #[tool(description = "Add an ingredient with its cost per unit")]
    fn add_ingredient(&self, Parameters(p): Parameters<AddIngredientParams>) -> Result<CallToolResult, McpError> {
        let unit = ingredients::parse_unit(p.unit.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        let data = IngredientCreate {
            name: p.name,
            cost_per_unit: p.cost_per_unit,
            unit,
        };
        let result = ingredients::add_ingredient(&self.store, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List all ingredients with their unit costs")]
    fn list_ingredients(&self) -> Result<CallToolResult, McpError> {
        let result = ingredients::list_ingredients(&self.store)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete an ingredient. Recipes using it are kept but stop counting its cost; the response lists them.")]
    fn delete_ingredient(&self, Parameters(p): Parameters<DeleteIngredientParams>) -> Result<CallToolResult, McpError> {
        let result = ingredients::delete_ingredient(&self.store, &p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Recipes ---

    #[tool(description = "Create a recipe from existing ingredients, with servings and selling price per serving. Returns calculated cost, profit, and margin.")]
    fn create_recipe(&self, Parameters(p): Parameters<CreateRecipeParams>) -> Result<CallToolResult, McpError> {
        let data = NewRecipe {
            name: p.name,
            servings: p.servings,
            selling_price: Some(p.selling_price),
            ingredients: p
                .ingredients
                .into_iter()
                .map(|i| (i.ingredient_id, i.quantity))
                .collect(),
        };
        let result = recipes::create_recipe(&self.store, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a recipe with cost per ingredient, cost per serving, profit, and margin")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.store, &p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => to_json(&serde_json::json!({"error": "Recipe not found", "id": p.id})),
        }
    }

    #[tool(description = "List all recipes with cost per serving, profit, and margin")]
    fn list_recipes(&self) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.store)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a recipe")]
    fn delete_recipe(&self, Parameters(p): Parameters<DeleteRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::delete_recipe(&self.store, &p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Overview ---

    #[tool(description = "Profit overview across all recipes: average margin, average cost per serving, most and least profitable recipes")]
    fn profit_overview(&self) -> Result<CallToolResult, McpError> {
        let result = overview::profit_overview(&self.store)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Checkout ---

    #[tool(description = "Start a PlateProfit Pro subscription checkout and return the Stripe checkout URL")]
    async fn start_checkout(&self, Parameters(p): Parameters<StartCheckoutParams>) -> Result<CallToolResult, McpError> {
        let result = checkout::start_checkout(&self.checkout_config, &self.checkout_gate, p.plan.as_deref())
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PlateProfitService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "plateprofit".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("PlateProfit".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "PlateProfit - recipe costing and profit margins. \
                 Call costing_instructions first if unsure. \
                 Ingredients: add_ingredient/list_ingredients/delete_ingredient. \
                 Recipes: create_recipe/get_recipe/list_recipes/delete_recipe. \
                 Summary: profit_overview. Upgrade: start_checkout. Status: plateprofit_status."
                    .into(),
            ),
        }
    }
}
