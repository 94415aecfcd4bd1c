#![allow(non_snake_case)]

use super::*;

#[test]
fn EnvelopeError___service_mismatch___displays_both_services() {
    let err = EnvelopeError::ServiceMismatch {
        expected: "1.2.3".to_string(),
        actual: "4.5.6".to_string(),
    };

    assert_eq!(err.to_string(), "Service mismatch: expected 1.2.3, got 4.5.6");
}

#[test]
fn EnvelopeError___outside_validity_period___displays_all_dates() {
    let err = EnvelopeError::OutsideValidityPeriod {
        date: "2030-01-01T00:00:00Z".to_string(),
        start: "2029-01-01T00:00:00Z".to_string(),
        expiry: "2029-12-31T00:00:00Z".to_string(),
    };

    let msg = err.to_string();
    assert!(msg.contains("2030-01-01T00:00:00Z"));
    assert!(msg.contains("2029-01-01T00:00:00Z"));
    assert!(msg.contains("2029-12-31T00:00:00Z"));
}

#[test]
fn EnvelopeError___no_trust_anchors___displays_message() {
    assert_eq!(
        EnvelopeError::NoTrustAnchors.to_string(),
        "No trust anchors supplied"
    );
}

#[test]
fn EnvelopeError___from_json_error___converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let err: EnvelopeError = json_err.into();

    assert!(matches!(err, EnvelopeError::Json(_)));
}
