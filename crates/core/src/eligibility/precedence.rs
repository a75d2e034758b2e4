//! Precedence resolution: picks the one rule that controls a decision.
//!
//! Ordering, strongest first:
//!
//! 1. higher specificity score
//! 2. more recent `updated_at`
//! 3. `exclude == true` (ties fail closed)
//! 4. lower `id`
//!
//! The last key only exists so the result never depends on the order rules
//! were loaded in.

use std::cmp::Ordering;

use serde::Serialize;

use crate::eligibility::matcher::compatible_rules;
use crate::eligibility::rule::{EligibilityRule, ShipmentQuery};
use crate::types::DbId;

/// Outcome of evaluating one carrier for one shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityDecision {
    pub eligible: bool,
    /// The winning rule, or `None` when no rule applied (eligible by default).
    pub controlling_rule: Option<EligibilityRule>,
    /// Specificity score of the controlling rule.
    pub specificity: Option<u32>,
    /// Number of compatible rules considered.
    pub matched_rules: usize,
}

impl EligibilityDecision {
    /// Decision when no rule applies: carriers are allowed unless a rule says
    /// otherwise.
    pub fn open_default() -> Self {
        Self {
            eligible: true,
            controlling_rule: None,
            specificity: None,
            matched_rules: 0,
        }
    }

    pub fn controlling_rule_id(&self) -> Option<DbId> {
        self.controlling_rule.as_ref().map(|r| r.id)
    }
}

/// Compare two scored candidates; `Greater` means `a` takes precedence.
pub fn precedence_order(a: (&EligibilityRule, u32), b: (&EligibilityRule, u32)) -> Ordering {
    let (rule_a, score_a) = a;
    let (rule_b, score_b) = b;
    score_a
        .cmp(&score_b)
        .then_with(|| rule_a.updated_at.cmp(&rule_b.updated_at))
        .then_with(|| rule_a.exclude.cmp(&rule_b.exclude))
        .then_with(|| rule_b.id.cmp(&rule_a.id))
}

/// Decide whether the query's carrier is eligible under `rules`.
///
/// Rules for other carriers or companies are ignored, so callers may pass a
/// broader set than strictly needed.
pub fn resolve(query: &ShipmentQuery, rules: &[EligibilityRule]) -> EligibilityDecision {
    let mut matched_rules = 0;
    let mut best: Option<(&EligibilityRule, u32)> = None;

    for candidate in compatible_rules(rules, query) {
        matched_rules += 1;
        best = match best {
            Some(current) if precedence_order(candidate, current) != Ordering::Greater => {
                Some(current)
            }
            _ => Some(candidate),
        };
    }

    match best {
        Some((rule, score)) => EligibilityDecision {
            eligible: !rule.exclude,
            controlling_rule: Some(rule.clone()),
            specificity: Some(score),
            matched_rules,
        },
        None => EligibilityDecision::open_default(),
    }
}
