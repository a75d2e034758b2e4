//! Validation helpers for reference data (carriers, companies, customers).

use crate::error::CoreError;
use crate::eligibility::normalize::text_key;

/// Maximum length of a carrier, company or customer name.
pub const MAX_NAME_LEN: usize = 200;

/// Validate a display name: non-empty after trimming and within length limit.
pub fn validate_name(kind: &str, name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "{kind} name must not be empty"
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{kind} name too long: {} chars (max {MAX_NAME_LEN})",
            trimmed.chars().count()
        )));
    }
    Ok(trimmed.to_string())
}

/// Canonicalize a list of service level codes: uppercase, no blanks, no
/// duplicates, original order preserved.
pub fn normalize_service_codes(codes: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes.iter().map(|c| text_key(c)).filter(|c| !c.is_empty()) {
        if !out.contains(&code) {
            out.push(code);
        }
    }
    out
}

/// Fail if any requested code is missing from the known service levels.
pub fn ensure_known_service_codes(requested: &[String], known: &[String]) -> Result<(), CoreError> {
    let unknown: Vec<&str> = requested
        .iter()
        .filter(|c| !known.contains(c))
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown service level(s): {}",
            unknown.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert_eq!(validate_name("Carrier", "  Northline  ").unwrap(), "Northline");
        assert_matches!(validate_name("Carrier", "   "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_name("Company", &"x".repeat(MAX_NAME_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn service_codes_are_deduplicated() {
        let codes = vec![
            "ground".to_string(),
            " GROUND ".to_string(),
            "".to_string(),
            "express".to_string(),
        ];
        assert_eq!(normalize_service_codes(&codes), vec!["GROUND", "EXPRESS"]);
    }

    #[test]
    fn unknown_codes_are_reported() {
        let known = vec!["GROUND".to_string(), "EXPRESS".to_string()];
        assert!(ensure_known_service_codes(&["GROUND".to_string()], &known).is_ok());
        assert_matches!(
            ensure_known_service_codes(&["GROUND".to_string(), "ROCKET".to_string()], &known),
            Err(CoreError::Validation(msg)) if msg.contains("ROCKET")
        );
    }
}
