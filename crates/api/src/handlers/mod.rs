//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! delegate to the corresponding repository in `freight_db` and map errors
//! via [`AppError`](crate::error::AppError). Reads go through
//! [`retry_read`](freight_db::retry::retry_read); writes never do.

pub mod carriers;
pub mod companies;
pub mod eligibility;
pub mod eligibility_rules;
pub mod service_levels;
