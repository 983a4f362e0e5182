//! Checkout HTTP endpoint
//!
//! `POST /api/checkout` with `{"priceType": "monthly" | "yearly"}` answers
//! `{"url": ...}` on success and `{"error": ...}` with a 500 otherwise.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::error::CheckoutError;
use super::plan::PlanType;
use super::stripe::StripeClient;
use crate::config::CheckoutConfig;

/// Shared state for the checkout routes
#[derive(Clone)]
pub struct CheckoutState {
    stripe: Option<StripeClient>,
    public_url: Arc<str>,
}

impl CheckoutState {
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            stripe: StripeClient::from_config(config).ok(),
            public_url: Arc::from(config.public_url.as_str()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutBody {
    // Kept loose so a non-string token falls back like an unknown one
    #[serde(default)]
    price_type: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub url: String,
}

pub fn router(state: CheckoutState) -> Router {
    Router::new()
        .route("/api/checkout", post(create_checkout))
        .with_state(state)
}

async fn create_checkout(
    State(state): State<CheckoutState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CheckoutResponse>, CheckoutError> {
    let stripe = state.stripe.as_ref().ok_or(CheckoutError::NotConfigured)?;

    let body: CheckoutBody = serde_json::from_slice(&body)?;
    let plan = PlanType::from_token(body.price_type.as_ref().and_then(|v| v.as_str()));

    let origin = headers
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(state.public_url.as_ref());

    let url = stripe.checkout_url(plan, origin).await?;
    Ok(Json(CheckoutResponse { url }))
}

/// CORS for the site at `public_url`, the only origin allowed to call in
fn cors_layer(public_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    match HeaderValue::from_str(public_url.trim_end_matches('/')) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!(public_url, error = %e, "Public URL is not a valid origin, CORS disabled");
            cors
        }
    }
}

/// The checkout router with CORS and request tracing applied
pub fn app(config: &CheckoutConfig) -> Router {
    router(CheckoutState::new(config))
        .layer(cors_layer(&config.public_url))
        .layer(TraceLayer::new_for_http())
}

/// Run the checkout server until Ctrl+C or SIGTERM
pub async fn serve(config: CheckoutConfig) -> std::io::Result<()> {
    let app = app(&config);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Checkout server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Checkout server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received SIGTERM, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::extract::Form;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::checkout::error::{FAILED_MESSAGE, NOT_CONFIGURED_MESSAGE};

    type Captured = Arc<Mutex<Vec<Vec<(String, String)>>>>;

    /// Stand-in for Stripe that records every form it receives
    async fn spawn_mock_stripe(fail: bool) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let sink = Arc::clone(&captured);

        let app = Router::new().route(
            "/v1/checkout/sessions",
            post(move |headers: HeaderMap, Form(form): Form<Vec<(String, String)>>| {
                let sink = Arc::clone(&sink);
                async move {
                    assert_eq!(
                        headers.get("authorization").and_then(|v| v.to_str().ok()),
                        Some("Bearer sk_test_123")
                    );
                    sink.lock().unwrap().push(form);
                    if fail {
                        (
                            StatusCode::PAYMENT_REQUIRED,
                            Json(json!({"error": {"message": "Your card was declined."}})),
                        )
                            .into_response()
                    } else {
                        Json(json!({
                            "id": "cs_test_123",
                            "url": "https://checkout.stripe.com/c/pay/cs_test_123"
                        }))
                        .into_response()
                    }
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), captured)
    }

    fn configured(api_base: &str) -> CheckoutState {
        CheckoutState::new(&CheckoutConfig {
            stripe_secret_key: Some("sk_test_123".to_string()),
            stripe_api_base: api_base.to_string(),
            ..CheckoutConfig::default()
        })
    }

    fn checkout_request(body: &str, origin: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/checkout")
            .header("content-type", "application/json");
        if let Some(origin) = origin {
            builder = builder.header("origin", origin);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn field<'a>(form: &'a [(String, String)], key: &str) -> &'a str {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[tokio::test]
    async fn test_preflight_allows_public_origin() {
        let config = CheckoutConfig {
            public_url: "https://plate.example/".to_string(),
            ..CheckoutConfig::default()
        };
        let preflight = Request::builder()
            .method("OPTIONS")
            .uri("/api/checkout")
            .header("origin", "https://plate.example")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app(&config).oneshot(preflight).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("https://plate.example")
        );
    }

    #[tokio::test]
    async fn test_missing_credential_returns_500() {
        let app = router(CheckoutState::new(&CheckoutConfig::default()));
        let response = app
            .oneshot(checkout_request(r#"{"priceType": "monthly"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": NOT_CONFIGURED_MESSAGE}));
    }

    #[tokio::test]
    async fn test_yearly_checkout_returns_url() {
        let (base, captured) = spawn_mock_stripe(false).await;
        let response = router(configured(&base))
            .oneshot(checkout_request(
                r#"{"priceType": "yearly"}"#,
                Some("https://plate.example"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"url": "https://checkout.stripe.com/c/pay/cs_test_123"})
        );

        let forms = captured.lock().unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(field(&forms[0], "line_items[0][price_data][unit_amount]"), "14900");
        assert_eq!(field(&forms[0], "line_items[0][price_data][recurring][interval]"), "year");
        assert_eq!(field(&forms[0], "success_url"), "https://plate.example/?success=true");
    }

    #[tokio::test]
    async fn test_unknown_plan_falls_back_to_monthly() {
        let (base, captured) = spawn_mock_stripe(false).await;
        let response = router(configured(&base))
            .oneshot(checkout_request(r#"{"priceType": "lifetime"}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let forms = captured.lock().unwrap();
        assert_eq!(field(&forms[0], "line_items[0][price_data][unit_amount]"), "1900");
        assert_eq!(field(&forms[0], "line_items[0][price_data][recurring][interval]"), "month");
        // No Origin header: redirect to the configured public URL
        assert_eq!(field(&forms[0], "cancel_url"), "http://localhost:3000/?canceled=true");
    }

    #[tokio::test]
    async fn test_missing_or_odd_token_falls_back_to_monthly() {
        let (base, captured) = spawn_mock_stripe(false).await;
        let app = router(configured(&base));

        for body in ["{}", r#"{"priceType": 12}"#] {
            let response = app.clone().oneshot(checkout_request(body, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let forms = captured.lock().unwrap();
        assert_eq!(forms.len(), 2);
        for form in forms.iter() {
            assert_eq!(field(form, "line_items[0][price_data][unit_amount]"), "1900");
        }
    }

    #[tokio::test]
    async fn test_provider_failure_returns_generic_error() {
        let (base, _captured) = spawn_mock_stripe(true).await;
        let response = router(configured(&base))
            .oneshot(checkout_request(r#"{"priceType": "monthly"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": FAILED_MESSAGE}));
    }

    #[tokio::test]
    async fn test_unreadable_body_returns_generic_error() {
        let (base, captured) = spawn_mock_stripe(false).await;
        let response = router(configured(&base))
            .oneshot(checkout_request("not json", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": FAILED_MESSAGE}));
        assert!(captured.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_provider_returns_generic_error() {
        // Nothing listens on the discard port, so the connection is refused
        let response = router(configured("http://127.0.0.1:9"))
            .oneshot(checkout_request(r#"{"priceType": "monthly"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": FAILED_MESSAGE}));
    }
}
