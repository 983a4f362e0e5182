//! Environment configuration
//!
//! Everything is read from environment variables once at startup. Unset
//! variables fall back to defaults; the Stripe credential is optional so its
//! absence can be reported instead of crashing.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";
pub const DEFAULT_CHECKOUT_PORT: u16 = 3001;

/// Get the database path from environment or use `data/plateprofit.db` at the
/// project root
pub fn database_path() -> PathBuf {
    env::var("PLATEPROFIT_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
                    path = grandparent.to_path_buf();
                }
            }

            path.push("data");
            path.push("plateprofit.db");
            path
        })
}

/// Settings for creating checkout sessions
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: String,
    /// Used for redirect URLs when a request carries no `Origin` header
    pub public_url: String,
    pub port: u16,
}

impl CheckoutConfig {
    pub fn from_env() -> Self {
        let stripe_secret_key = env::var("STRIPE_SECRET_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if stripe_secret_key.is_none() {
            warn!("STRIPE_SECRET_KEY not set, checkout requests will fail");
        }

        Self {
            stripe_secret_key,
            stripe_api_base: try_load("STRIPE_API_BASE", DEFAULT_STRIPE_API_BASE.to_string()),
            public_url: try_load("PLATEPROFIT_PUBLIC_URL", DEFAULT_PUBLIC_URL.to_string()),
            port: try_load("PLATEPROFIT_CHECKOUT_PORT", DEFAULT_CHECKOUT_PORT),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_api_base: DEFAULT_STRIPE_API_BASE.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            port: DEFAULT_CHECKOUT_PORT,
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_falls_back_on_garbage() {
        env::set_var("PLATEPROFIT_TEST_PORT_GARBAGE", "not-a-port");
        assert_eq!(try_load("PLATEPROFIT_TEST_PORT_GARBAGE", 8080u16), 8080);
        env::remove_var("PLATEPROFIT_TEST_PORT_GARBAGE");
    }

    #[test]
    fn test_try_load_parses_value() {
        env::set_var("PLATEPROFIT_TEST_PORT_SET", " 4242 ");
        assert_eq!(try_load("PLATEPROFIT_TEST_PORT_SET", 8080u16), 4242);
        env::remove_var("PLATEPROFIT_TEST_PORT_SET");
    }

    #[test]
    fn test_try_load_unset() {
        assert_eq!(
            try_load("PLATEPROFIT_TEST_DEFINITELY_UNSET", "x".to_string()),
            "x"
        );
    }
}
