//! Checkout tool
//!
//! Starts a Stripe checkout from the tool surface. Only one request may be
//! outstanding at a time.

use serde::Serialize;

use crate::checkout::{CheckoutError, CheckoutGate, PlanType, StripeClient};
use crate::config::CheckoutConfig;
use crate::costing::format_currency;

/// Response for start_checkout
#[derive(Debug, Serialize)]
pub struct StartCheckoutResponse {
    pub url: String,
    pub plan: PlanType,
    pub price: String,
    pub interval: &'static str,
}

pub async fn start_checkout(
    config: &CheckoutConfig,
    gate: &CheckoutGate,
    plan_token: Option<&str>,
) -> Result<StartCheckoutResponse, String> {
    run_checkout(config, gate, plan_token).await.map_err(|e| {
        tracing::error!(error = %e, "Checkout failed");
        e.public_message().to_string()
    })
}

async fn run_checkout(
    config: &CheckoutConfig,
    gate: &CheckoutGate,
    plan_token: Option<&str>,
) -> Result<StartCheckoutResponse, CheckoutError> {
    let stripe = StripeClient::from_config(config)?;
    let _permit = gate.try_begin().ok_or(CheckoutError::InProgress)?;

    let plan = PlanType::from_token(plan_token);
    let price = plan.price();
    let url = stripe.checkout_url(plan, &config.public_url).await?;

    Ok(StartCheckoutResponse {
        url,
        plan,
        price: format_currency(f64::from(price.amount) / 100.0),
        interval: price.interval.as_str(),
    })
}
