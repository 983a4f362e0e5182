//! PlateProfit
//!
//! An MCP server for recipe costing and profit margins.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use plateprofit::build_info;
use plateprofit::config::{self, CheckoutConfig};
use plateprofit::db::{Database, Store};
use plateprofit::mcp::PlateProfitService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("plateprofit=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("MCP Server");
    eprintln!("Starting MCP server on stdio...");

    let db_path = config::database_path();
    eprintln!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = Database::new(&db_path)?;
    let store = Store::open(database)?;

    let checkout_config = CheckoutConfig::from_env();

    let service = PlateProfitService::new(db_path, store, checkout_config);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
