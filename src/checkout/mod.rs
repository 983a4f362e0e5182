//! Subscription checkout
//!
//! A stateless pass-through to Stripe's hosted checkout. Nothing about a
//! subscription is recorded locally.

pub mod error;
pub mod gate;
pub mod handler;
pub mod plan;
pub mod stripe;

pub use error::CheckoutError;
pub use gate::{CheckoutGate, CheckoutPermit};
pub use handler::{app, router, serve, CheckoutState};
pub use plan::{BillingInterval, PlanPrice, PlanType};
pub use stripe::{CheckoutSession, StripeClient};
