//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod carrier_repo;
pub mod company_repo;
pub mod eligibility_rule_repo;
pub mod service_level_repo;

pub use carrier_repo::CarrierRepo;
pub use company_repo::{CompanyRepo, CustomerRepo};
pub use eligibility_rule_repo::EligibilityRuleRepo;
pub use service_level_repo::ServiceLevelRepo;
