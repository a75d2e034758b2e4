//! Eligibility rule and shipment query types.

use serde::{Deserialize, Serialize};

use crate::scope::Scope;
use crate::types::{DbId, Timestamp};

/// A stored eligibility rule for one carrier.
///
/// Countries are always concrete; every other scoping field may be a
/// wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityRule {
    pub id: DbId,
    pub carrier_id: DbId,
    pub company_id: DbId,
    #[serde(serialize_with = "crate::scope::serialize_customer")]
    pub customer_id: Scope<DbId>,
    pub service_code: Scope<String>,
    pub from_country: String,
    pub from_state: Scope<String>,
    pub from_city: Scope<String>,
    pub from_zip_postal: Scope<String>,
    pub to_country: String,
    pub to_state: Scope<String>,
    pub to_city: Scope<String>,
    pub to_zip_postal: Scope<String>,
    /// `true` blocks the carrier for matching shipments.
    pub exclude: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Borrowed view of one side (origin or destination) of a rule's geography.
#[derive(Debug, Clone, Copy)]
pub struct RouteScope<'a> {
    pub country: &'a str,
    pub state: &'a Scope<String>,
    pub city: &'a Scope<String>,
    pub zip_postal: &'a Scope<String>,
}

impl EligibilityRule {
    pub fn origin(&self) -> RouteScope<'_> {
        RouteScope {
            country: &self.from_country,
            state: &self.from_state,
            city: &self.from_city,
            zip_postal: &self.from_zip_postal,
        }
    }

    pub fn destination(&self) -> RouteScope<'_> {
        RouteScope {
            country: &self.to_country,
            state: &self.to_state,
            city: &self.to_city,
            zip_postal: &self.to_zip_postal,
        }
    }
}

/// A concrete shipment endpoint. Only the country is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_postal: Option<String>,
}

/// The shipment a carrier is being evaluated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentQuery {
    pub carrier_id: DbId,
    pub company_id: DbId,
    #[serde(default)]
    pub customer_id: Option<DbId>,
    #[serde(default)]
    pub service_code: Option<String>,
    pub origin: Location,
    pub destination: Location,
}
