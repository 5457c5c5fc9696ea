//! Integration tests for common flagsense workflows.
//!
//! These tests play the role of the rule engine and of SDK callers.

use flagsense::prelude::*;
use serde_json::json;

// =============================================================================
// Rule engine side
// =============================================================================

struct Rule {
    id: &'static str,
    attribute: &'static str,
}

/// Stand-in for a targeting engine. Fails abnormally when the matching
/// rule has no id.
fn explain(
    enabled: bool,
    targets: &[&str],
    rules: &[Rule],
    user: &str,
    attribute: &str,
) -> EvaluationResult<EvaluationReason> {
    if !enabled {
        return Ok(EvaluationReason::off());
    }
    if user.is_empty() {
        return Ok(EvaluationReason::error(ErrorKind::UserNotSpecified));
    }
    if targets.contains(&user) {
        return Ok(EvaluationReason::target_match());
    }
    if let Some((index, rule)) = rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.attribute == attribute)
    {
        if rule.id.is_empty() {
            return Err(EvaluationError::new(format!("rule {index} has no id")));
        }
        return Ok(EvaluationReason::rule_match(index, rule.id));
    }
    Ok(EvaluationReason::fallthrough())
}

#[test]
fn test_engine_reports_each_outcome() {
    let rules = [
        Rule { id: "r-admins", attribute: "admin" },
        Rule { id: "r-beta", attribute: "beta" },
    ];

    assert_eq!(
        explain(false, &[], &rules, "u1", "beta").unwrap().to_string(),
        "OFF"
    );
    assert_eq!(
        explain(true, &["u1"], &rules, "u1", "beta").unwrap().to_string(),
        "TARGET_MATCH"
    );
    assert_eq!(
        explain(true, &[], &rules, "u1", "beta").unwrap().to_string(),
        "RULE_MATCH(1,r-beta)"
    );
    assert_eq!(
        explain(true, &[], &rules, "u1", "nobody").unwrap().to_string(),
        "FALLTHROUGH"
    );
    assert_eq!(
        explain(true, &[], &rules, "", "beta").unwrap().to_string(),
        "ERROR(USER_NOT_SPECIFIED)"
    );
}

#[test]
fn test_abnormal_failure_is_separate_from_error_reason() {
    let broken = [Rule { id: "", attribute: "beta" }];

    let result = explain(true, &[], &broken, "u1", "beta");
    let err = result.unwrap_err();
    assert_eq!(err.message(), "rule 0 has no id");

    // an in-band error is still Ok
    let in_band = explain(true, &[], &broken, "", "beta");
    assert!(in_band.unwrap().is_error());
}

// =============================================================================
// SDK caller side
// =============================================================================

fn variation_detail(flag_known: bool, fail: bool) -> EvaluationDetail<bool> {
    let attempt = if fail {
        Err(EvaluationError::new("evaluation aborted"))
    } else if flag_known {
        Ok(EvaluationDetail::new(
            Some(true),
            Some(1),
            EvaluationReason::rule_match(0, "r-beta"),
        ))
    } else {
        Ok(EvaluationDetail::error(ErrorKind::FlagNotFound, Some(false)))
    };
    EvaluationDetail::from_result(attempt, Some(false))
}

#[test]
fn test_caller_falls_back_to_default() {
    let detail = variation_detail(true, true);
    assert_eq!(detail.value, Some(false));
    assert_eq!(detail.reason.to_string(), "ERROR(EXCEPTION)");

    let detail = variation_detail(false, false);
    assert!(!detail.value_or(true));

    let detail = variation_detail(true, false);
    assert_eq!(detail.value, Some(true));
    assert!(!detail.is_default_value());
}

#[test]
fn test_detail_exported_as_analytics_json() {
    let detail = variation_detail(true, false);
    let exported = codec::to_value(&detail).unwrap();
    assert_eq!(
        exported,
        json!({
            "value": true,
            "variationIndex": 1,
            "reason": {"kind": "RULE_MATCH", "ruleIndex": 0, "ruleId": "r-beta"}
        })
    );

    let imported: EvaluationDetail<bool> = codec::from_value(exported).unwrap();
    assert_eq!(imported, detail);
}

#[test]
fn test_detail_exported_as_http_body() {
    let detail = variation_detail(false, false);
    let content_type = codec::JSON_CONTENT_TYPE;
    let body = codec::to_vec(&detail).unwrap();
    assert_eq!(content_type, "application/json");
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
        json!({"value": false, "reason": {"kind": "ERROR", "errorKind": "FLAG_NOT_FOUND"}})
    );

    let received: EvaluationDetail<bool> = codec::from_slice(&body).unwrap();
    assert_eq!(received, detail);
    assert!(received.is_default_value());
}

#[test]
fn test_prerequisite_reason_from_json_event() {
    let event = r#"{"kind":"PREREQUISITE_FAILED","prerequisiteKey":"checkout-v2"}"#;
    let reason: EvaluationReason = codec::from_str(event).unwrap();
    assert_eq!(reason.kind(), ReasonKind::PrerequisiteFailed);
    assert_eq!(reason.prerequisite_key(), Some("checkout-v2"));
    assert_eq!(reason.to_string(), "PREREQUISITE_FAILED(checkout-v2)");
}

#[test]
fn test_malformed_event_is_rejected() {
    let err = codec::from_str::<EvaluationReason>(r#"{"kind":"RULE_MATCH"}"#).unwrap_err();
    assert!(matches!(err, ReasonError::Decode(_)));
}

#[cfg(feature = "log")]
#[test]
fn test_logging_reexport() {
    use flagsense::flagsense_log::{self, Level};

    flagsense_log::init();
    assert!(flagsense_log::is_level_enabled(Level::Error));
}
