//! Raw JSON payload attributes
//!
//! Some objects carry a caller-supplied JSON document that is passed through
//! to the upstream request. It is only checked for being well-formed.

use serde::Serialize;

use crate::provider::{ProviderError, ProviderResult};

pub fn parse_json(field: &str, raw: &str) -> ProviderResult<serde_json::Value> {
    serde_json::from_str(raw)
        .map_err(|e| ProviderError::configuration(field, format!("invalid JSON document: {}", e)))
}

/// Compact serialization used when writing payloads back into state
pub fn to_json_string<T: Serialize + ?Sized>(field: &str, value: &T) -> ProviderResult<String> {
    serde_json::to_string(value).map_err(|e| ProviderError::StateSet {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Two documents are equivalent when they parse to the same value,
/// ignoring whitespace and key order
pub fn json_equivalent(a: &str, b: &str) -> bool {
    match (
        serde_json::from_str::<serde_json::Value>(a),
        serde_json::from_str::<serde_json::Value>(b),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Keep the caller's spelling of a payload when the server returns an
/// equivalent document, so that reads do not report spurious changes
pub fn preserve_equivalent(current: Option<&str>, fetched: String) -> String {
    match current {
        Some(current) if json_equivalent(current, &fetched) => current.to_string(),
        _ => fetched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_payload_is_configuration_error() {
        match parse_json("match_target", "{\"type\":") {
            Err(ProviderError::Configuration { field, .. }) => assert_eq!(field, "match_target"),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn equivalence_ignores_whitespace_and_key_order() {
        assert!(json_equivalent(r#"{"a": 1, "b": [1, 2]}"#, r#"{"b":[1,2],"a":1}"#));
        assert!(!json_equivalent(r#"{"a": 1}"#, r#"{"a": 2}"#));
        assert!(!json_equivalent(r#"{"b": [1, 2]}"#, r#"{"b": [2, 1]}"#));
    }

    #[test]
    fn preserve_equivalent_keeps_caller_spelling() {
        let current = "{ \"action\": \"deny\" }";
        assert_eq!(
            preserve_equivalent(Some(current), r#"{"action":"deny"}"#.to_string()),
            current
        );
        assert_eq!(
            preserve_equivalent(Some(current), r#"{"action":"alert"}"#.to_string()),
            r#"{"action":"alert"}"#
        );
        assert_eq!(preserve_equivalent(None, "{}".to_string()), "{}");
    }
}
