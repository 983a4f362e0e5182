//! Stripe Checkout client
//!
//! Creates hosted checkout sessions through Stripe's form-encoded REST API.

use serde::Deserialize;
use tracing::{debug, info};

use super::error::CheckoutError;
use super::plan::{PlanType, CURRENCY, PRODUCT_DESCRIPTION, PRODUCT_NAME, TRIAL_PERIOD_DAYS};
use crate::config::CheckoutConfig;

/// The parts of a Stripe checkout session we care about
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Client for the Stripe Checkout Sessions API
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }

    /// Build a client, failing if no credential is configured
    pub fn from_config(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        let key = config
            .stripe_secret_key
            .as_deref()
            .ok_or(CheckoutError::NotConfigured)?;
        Ok(Self::new(&config.stripe_api_base, key))
    }

    /// Form fields for a subscription session on the given plan
    pub fn session_params(plan: PlanType, origin: &str) -> Vec<(String, String)> {
        let price = plan.price();
        let origin = origin.trim_end_matches('/');

        [
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price_data][currency]", CURRENCY.to_string()),
            (
                "line_items[0][price_data][product_data][name]",
                PRODUCT_NAME.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                PRODUCT_DESCRIPTION.to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                price.amount.to_string(),
            ),
            (
                "line_items[0][price_data][recurring][interval]",
                price.interval.as_str().to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("mode", "subscription".to_string()),
            ("success_url", format!("{origin}/?success=true")),
            ("cancel_url", format!("{origin}/?canceled=true")),
            (
                "subscription_data[trial_period_days]",
                TRIAL_PERIOD_DAYS.to_string(),
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    /// Create a checkout session and return it
    pub async fn create_checkout_session(
        &self,
        plan: PlanType,
        origin: &str,
    ) -> Result<CheckoutSession, CheckoutError> {
        let url = format!("{}/v1/checkout/sessions", self.api_base);
        debug!(plan = plan.as_str(), origin, "Creating checkout session");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&Self::session_params(plan, origin))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or(body);
            return Err(CheckoutError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response.json().await?;
        info!(session_id = %session.id, plan = plan.as_str(), "Checkout session created");
        Ok(session)
    }

    /// Create a session and return only its redirect URL
    pub async fn checkout_url(&self, plan: PlanType, origin: &str) -> Result<String, CheckoutError> {
        let session = self.create_checkout_session(plan, origin).await?;
        session.url.ok_or(CheckoutError::MissingUrl(session.id))
    }
}
