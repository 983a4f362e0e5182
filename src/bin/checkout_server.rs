//! PlateProfit checkout endpoint
//!
//! Serves `POST /api/checkout`, which creates a Stripe subscription
//! checkout session and returns its URL.

use tracing_subscriber::EnvFilter;

use plateprofit::build_info;
use plateprofit::config::CheckoutConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("plateprofit=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("Checkout");

    let config = CheckoutConfig::from_env();
    plateprofit::checkout::serve(config).await?;

    Ok(())
}
