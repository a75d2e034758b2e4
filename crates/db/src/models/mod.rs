//! Database row models and DTOs.

pub mod carrier;
pub mod company;
pub mod eligibility_rule;
pub mod service_level;
