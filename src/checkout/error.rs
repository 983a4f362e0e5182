//! Checkout errors
//!
//! Callers only ever see one of two fixed messages. The detail goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Stripe is not configured. Please add STRIPE_SECRET_KEY to environment variables.";
pub const FAILED_MESSAGE: &str = "Failed to create checkout session";
pub const IN_PROGRESS_MESSAGE: &str = "A checkout session is already being created";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("STRIPE_SECRET_KEY is not set")]
    NotConfigured,

    #[error("Malformed checkout request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error("Stripe request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Stripe returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Stripe session {0} has no redirect URL")]
    MissingUrl(String),

    #[error("Checkout already in progress")]
    InProgress,
}

impl CheckoutError {
    /// The message shown to the user for this error
    pub fn public_message(&self) -> &'static str {
        match self {
            CheckoutError::NotConfigured => NOT_CONFIGURED_MESSAGE,
            CheckoutError::InProgress => IN_PROGRESS_MESSAGE,
            _ => FAILED_MESSAGE,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::InProgress => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Checkout failed");

        (
            self.status_code(),
            Json(json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_messages() {
        assert_eq!(
            CheckoutError::NotConfigured.public_message(),
            NOT_CONFIGURED_MESSAGE
        );
        let provider = CheckoutError::Provider {
            status: 402,
            message: "card_declined".to_string(),
        };
        assert_eq!(provider.public_message(), FAILED_MESSAGE);
        assert_eq!(provider.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            CheckoutError::MissingUrl("cs_1".to_string()).public_message(),
            FAILED_MESSAGE
        );
    }

    #[test]
    fn test_detail_stays_out_of_public_message() {
        let err = CheckoutError::Provider {
            status: 401,
            message: "Invalid API Key provided: sk_test_****".to_string(),
        };
        assert!(err.to_string().contains("Invalid API Key"));
        assert!(!err.public_message().contains("API Key"));
    }
}
