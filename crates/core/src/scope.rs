//! Typed wildcard scopes for rule fields.
//!
//! Rules historically used magic strings (`"ALL"`, `"ANY"`, empty) to mean
//! "matches anything". [`Scope`] makes the wildcard an explicit variant so
//! comparisons never depend on sentinel spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical wire spelling of a wildcard scope.
pub const WILDCARD: &str = "ANY";

/// Wire spelling of a wildcard customer ("all customers of the company").
pub const CUSTOMER_WILDCARD: &str = "ALL";

/// Every spelling accepted as a wildcard on input (compared case-insensitively).
pub const WILDCARD_SENTINELS: &[&str] = &["ANY", "ALL", "*", ""];

/// Returns `true` if `raw` is one of the accepted wildcard spellings.
pub fn is_wildcard_sentinel(raw: &str) -> bool {
    let trimmed = raw.trim();
    WILDCARD_SENTINELS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(trimmed))
}

/// A rule field that either matches anything or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope<T> {
    Any,
    Exact(T),
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Scope::Any
    }
}

impl<T> Scope<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Scope::Any)
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Scope::Exact(_))
    }

    /// The concrete value, if any.
    pub fn as_exact(&self) -> Option<&T> {
        match self {
            Scope::Any => None,
            Scope::Exact(v) => Some(v),
        }
    }

    /// `None` (SQL `NULL`) is the storage form of a wildcard.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Scope::Exact(v),
            None => Scope::Any,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Scope::Any => None,
            Scope::Exact(v) => Some(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scope<U> {
        match self {
            Scope::Any => Scope::Any,
            Scope::Exact(v) => Scope::Exact(f(v)),
        }
    }
}

impl<T: FromStr> Scope<T> {
    /// Parse a raw string, treating wildcard sentinels as [`Scope::Any`].
    pub fn parse(raw: &str) -> Result<Self, T::Err> {
        if is_wildcard_sentinel(raw) {
            Ok(Scope::Any)
        } else {
            raw.trim().parse().map(Scope::Exact)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Scope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Any => f.write_str(WILDCARD),
            Scope::Exact(v) => v.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for Scope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scope::Any => serializer.serialize_str(WILDCARD),
            Scope::Exact(v) => v.serialize(serializer),
        }
    }
}

/// `serialize_with` helper for customer scopes, which go out as `"ALL"`.
pub fn serialize_customer<T, S>(scope: &Scope<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match scope {
        Scope::Any => serializer.serialize_str(CUSTOMER_WILDCARD),
        Scope::Exact(v) => v.serialize(serializer),
    }
}

/// Untagged intermediate: strings are checked for sentinels first, anything
/// else (numbers) is deserialized as `T` directly.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScope<T> {
    Text(String),
    Value(T),
}

impl<'de, T> Deserialize<'de> for Scope<T>
where
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<RawScope<T>>::deserialize(deserializer)? {
            None => Ok(Scope::Any),
            Some(RawScope::Text(s)) => Scope::parse(&s).map_err(serde::de::Error::custom),
            Some(RawScope::Value(v)) => Ok(Scope::Exact(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default)]
        customer: Scope<i64>,
        #[serde(default)]
        state: Scope<String>,
    }

    #[test]
    fn sentinels_parse_as_any() {
        for raw in ["ANY", "all", "*", "", "  Any  "] {
            assert_eq!(Scope::<String>::parse(raw).unwrap(), Scope::Any, "{raw:?}");
        }
    }

    #[test]
    fn concrete_values_parse_as_exact() {
        assert_eq!(Scope::<i64>::parse(" 42 ").unwrap(), Scope::Exact(42));
        assert_eq!(
            Scope::<String>::parse("ON").unwrap(),
            Scope::Exact("ON".to_string())
        );
        assert!(Scope::<i64>::parse("abc").is_err());
    }

    #[test]
    fn deserializes_numbers_strings_and_nulls() {
        let h: Holder = serde_json::from_value(json!({"customer": 7, "state": "NY"})).unwrap();
        assert_eq!(h.customer, Scope::Exact(7));
        assert_eq!(h.state, Scope::Exact("NY".to_string()));

        let h: Holder = serde_json::from_value(json!({"customer": "ALL", "state": null})).unwrap();
        assert!(h.customer.is_any());
        assert!(h.state.is_any());

        let h: Holder = serde_json::from_value(json!({"customer": "12"})).unwrap();
        assert_eq!(h.customer, Scope::Exact(12));
        assert!(h.state.is_any());
    }

    #[test]
    fn serializes_wildcard_as_any() {
        assert_eq!(serde_json::to_value(Scope::<i64>::Any).unwrap(), json!("ANY"));
        assert_eq!(serde_json::to_value(Scope::Exact(3_i64)).unwrap(), json!(3));
    }

    #[test]
    fn customer_wildcard_serializes_as_all() {
        #[derive(Serialize)]
        struct Out {
            #[serde(serialize_with = "serialize_customer")]
            customer: Scope<i64>,
        }
        let out = serde_json::to_value(Out { customer: Scope::Any }).unwrap();
        assert_eq!(out, json!({"customer": "ALL"}));
        let out = serde_json::to_value(Out { customer: Scope::Exact(9) }).unwrap();
        assert_eq!(out, json!({"customer": 9}));

        let back: Holder = serde_json::from_value(json!({"customer": "ALL"})).unwrap();
        assert!(back.customer.is_any());
    }

    #[test]
    fn option_conversion_round_trips() {
        assert_eq!(Scope::from_option(Some(1)).into_option(), Some(1));
        assert_eq!(Scope::<i64>::from_option(None).into_option(), None);
    }
}
