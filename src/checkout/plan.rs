//! Subscription plans and their fixed prices

use serde::{Deserialize, Serialize};

pub const PRODUCT_NAME: &str = "PlateProfit Pro";
pub const PRODUCT_DESCRIPTION: &str = "Full access to recipe costing and profit analysis";
pub const CURRENCY: &str = "usd";
pub const TRIAL_PERIOD_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Month,
    Year,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
        }
    }
}

/// Price of a plan in minor currency units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanPrice {
    pub amount: u32,
    pub interval: BillingInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Monthly,
    Yearly,
}

impl PlanType {
    /// Map a plan token to a plan. Anything unrecognized, including a missing
    /// token, gets the monthly plan.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("monthly") => PlanType::Monthly,
            Some("yearly") => PlanType::Yearly,
            _ => PlanType::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Monthly => "monthly",
            PlanType::Yearly => "yearly",
        }
    }

    pub fn price(&self) -> PlanPrice {
        match self {
            PlanType::Monthly => PlanPrice {
                amount: 1900,
                interval: BillingInterval::Month,
            },
            PlanType::Yearly => PlanPrice {
                amount: 14900,
                interval: BillingInterval::Year,
            },
        }
    }
}
