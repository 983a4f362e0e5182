//! PlateProfit Tools module
//!
//! Tool implementations behind the MCP server. Each returns a serializable
//! response or a user-facing error message.

pub mod checkout;
pub mod ingredients;
pub mod overview;
pub mod recipes;
pub mod status;
