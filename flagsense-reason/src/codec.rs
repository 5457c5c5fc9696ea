//! JSON encoding of reasons and evaluation details.
//!
//! Thin wrappers over `serde_json` that map failures into [`ReasonError`]
//! and log rejected input.

use crate::error::{ReasonError, Result};
use flagsense_log::debug;
use serde::{Serialize, de::DeserializeOwned};

/// Content type of encoded reasons.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Encode a value as a compact JSON string.
pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| ReasonError::Encode(e.to_string()))
}

/// Encode a value as JSON bytes.
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    to_string(value).map(String::into_bytes)
}

/// Encode a value as a `serde_json::Value`.
pub fn to_value<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ReasonError::Encode(e.to_string()))
}

/// Decode a value from a JSON string.
pub fn from_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(decode_error)
}

/// Decode a value from JSON bytes.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let json = std::str::from_utf8(bytes).map_err(|e| ReasonError::Utf8(e.to_string()))?;
    from_str(json)
}

/// Decode a value from a `serde_json::Value`.
pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(decode_error)
}

fn decode_error(err: serde_json::Error) -> ReasonError {
    debug!(target: "flagsense::codec", "Rejected reason payload: {}", err);
    ReasonError::Decode(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, EvaluationReason};
    use serde_json::json;

    #[test]
    fn test_to_string_is_compact() {
        let json = to_string(&EvaluationReason::off()).unwrap();
        assert_eq!(json, r#"{"kind":"OFF"}"#);
    }

    #[test]
    fn test_from_str_rule_match() {
        let reason: EvaluationReason =
            from_str(r#"{"ruleId":"id","kind":"RULE_MATCH","ruleIndex":1}"#).unwrap();
        assert_eq!(reason, EvaluationReason::rule_match(1, "id"));
    }

    #[test]
    fn test_from_str_unknown_kind_is_decode_error() {
        let err = from_str::<EvaluationReason>(r#"{"kind":"BOGUS"}"#).unwrap_err();
        assert!(matches!(err, ReasonError::Decode(_)));
    }

    #[test]
    fn test_from_str_missing_fields_is_decode_error() {
        let err = from_str::<EvaluationReason>(r#"{"kind":"RULE_MATCH"}"#).unwrap_err();
        assert!(matches!(err, ReasonError::Decode(_)));
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice::<EvaluationReason>(&[b'{', 0xff, b'}']).unwrap_err();
        assert!(matches!(err, ReasonError::Utf8(_)));
    }

    #[test]
    fn test_to_vec_and_from_slice() {
        let reason = EvaluationReason::error(ErrorKind::ClientNotReady);
        let bytes = to_vec(&reason).unwrap();
        assert_eq!(from_slice::<EvaluationReason>(&bytes).unwrap(), reason);
    }

    #[test]
    fn test_value_conversions() {
        let reason = EvaluationReason::prerequisite_failed("checkout-v2");
        let value = to_value(&reason).unwrap();
        assert_eq!(
            value,
            json!({"kind": "PREREQUISITE_FAILED", "prerequisiteKey": "checkout-v2"})
        );
        assert_eq!(from_value::<EvaluationReason>(value).unwrap(), reason);
    }
}
