//! Domain types and pure logic for carrier route eligibility.
//!
//! Nothing in this crate touches the database; repositories in `freight-db`
//! load rows and hand them to the matcher here.

pub mod eligibility;
pub mod error;
pub mod reference;
pub mod scope;
pub mod search;
pub mod types;
