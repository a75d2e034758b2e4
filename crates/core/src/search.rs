//! Filter and pagination parsing for rule listings.
//!
//! Listing endpoints receive loosely-typed query strings (`"ALL"`,
//! `"SYSTEM"`, `"TRUE"`...). This module turns them into typed filters where
//! "unset" sentinels become `None` and never reach the SQL layer.

use std::str::FromStr;

use crate::error::CoreError;
use crate::scope::{is_wildcard_sentinel, Scope};
use crate::types::DbId;

/// Default page size when `rows_per_page` is absent.
pub const DEFAULT_ROWS_PER_PAGE: i64 = 10;

/// Largest page a client may request.
pub const MAX_ROWS_PER_PAGE: i64 = 100;

/// Longest search term accepted; longer input is truncated.
pub const MAX_SEARCH_TERM_LEN: usize = 100;

/// Business (company) filter value meaning "no company filter".
pub const BUSINESS_SENTINEL_SYSTEM: &str = "SYSTEM";

/// Filter on the rule's `exclude` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// `"TRUE"`: only excluding rules.
    Excluded,
    /// `"FALSE"`: only allowing rules.
    Allowed,
}

impl StatusFilter {
    /// The `exclude` value to filter on, if any.
    pub fn exclude_value(self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Excluded => Some(true),
            StatusFilter::Allowed => Some(false),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "ALL" => Ok(StatusFilter::All),
            "TRUE" | "EXCLUDED" => Ok(StatusFilter::Excluded),
            "FALSE" | "ALLOWED" => Ok(StatusFilter::Allowed),
            other => Err(CoreError::Validation(format!(
                "Invalid filter_status '{other}'. Must be one of: ALL, TRUE, FALSE"
            ))),
        }
    }
}

/// Typed filters for listing one carrier's rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    pub search_term: Option<String>,
    pub customer_id: Option<DbId>,
    pub company_id: Option<DbId>,
    pub service_code: Option<String>,
    pub status: StatusFilter,
}

/// Raw, string-typed listing parameters as they arrive on the wire.
#[derive(Debug, Clone, Default)]
pub struct RawRuleFilter<'a> {
    pub search_term: Option<&'a str>,
    pub filter_customer: Option<&'a str>,
    pub filter_business: Option<&'a str>,
    pub filter_service: Option<&'a str>,
    pub filter_status: Option<&'a str>,
}

impl RuleFilter {
    /// Parse raw listing parameters; sentinels and blanks become `None`.
    pub fn parse(raw: &RawRuleFilter<'_>) -> Result<Self, CoreError> {
        let search_term = raw
            .search_term
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.chars().take(MAX_SEARCH_TERM_LEN).collect());

        let customer_id = parse_id_filter(raw.filter_customer, "filter_customer")?;

        let company_id = match raw.filter_business {
            Some(v) if v.trim().eq_ignore_ascii_case(BUSINESS_SENTINEL_SYSTEM) => None,
            other => parse_id_filter(other, "filter_business")?,
        };

        let service_code = raw
            .filter_service
            .filter(|s| !is_wildcard_sentinel(s))
            .map(|s| s.trim().to_uppercase());

        let status = raw
            .filter_status
            .map(str::parse::<StatusFilter>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            search_term,
            customer_id,
            company_id,
            service_code,
            status,
        })
    }
}

fn parse_id_filter(raw: Option<&str>, field: &str) -> Result<Option<DbId>, CoreError> {
    match raw {
        None => Ok(None),
        Some(v) => Scope::<DbId>::parse(v)
            .map(Scope::into_option)
            .map_err(|_| CoreError::Validation(format!("{field} must be an id or 'ALL'"))),
    }
}

/// Zero-based page plus page size, clamped to sane bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub rows_per_page: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, rows_per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(0).max(0),
            rows_per_page: rows_per_page
                .unwrap_or(DEFAULT_ROWS_PER_PAGE)
                .clamp(1, MAX_ROWS_PER_PAGE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.rows_per_page
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.rows_per_page)
    }
}
