//! Carrier route eligibility.
//!
//! Rules scope a carrier to a company, optionally narrowed by customer,
//! service level and origin/destination geography. For a shipment query the
//! [`matcher`] keeps the compatible rules and scores their specificity, and
//! [`precedence`] picks the one controlling rule. Writes pass through
//! [`normalize`] before reaching storage.

pub mod matcher;
pub mod normalize;
pub mod precedence;
pub mod rule;

pub use precedence::{resolve, EligibilityDecision};
pub use rule::{EligibilityRule, Location, RouteScope, ShipmentQuery};
