//! Shared query parameter types for API handlers.

use freight_core::error::CoreError;
use freight_core::search::{PageRequest, RawRuleFilter, RuleFilter};
use serde::Deserialize;

/// Query string of the rule listing endpoint.
///
/// Filter values arrive as loose strings (`ALL`, `SYSTEM`, `TRUE`...) and are
/// parsed into a typed [`RuleFilter`] before reaching the repository.
#[derive(Debug, Default, Deserialize)]
pub struct RuleListParams {
    pub search_term: Option<String>,
    pub filter_customer: Option<String>,
    pub filter_business: Option<String>,
    pub filter_service: Option<String>,
    pub filter_status: Option<String>,
    /// Zero-based page index.
    pub page: Option<i64>,
    pub rows_per_page: Option<i64>,
}

impl RuleListParams {
    pub fn filter(&self) -> Result<RuleFilter, CoreError> {
        RuleFilter::parse(&RawRuleFilter {
            search_term: self.search_term.as_deref(),
            filter_customer: self.filter_customer.as_deref(),
            filter_business: self.filter_business.as_deref(),
            filter_service: self.filter_service.as_deref(),
            filter_status: self.filter_status.as_deref(),
        })
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.rows_per_page)
    }
}
