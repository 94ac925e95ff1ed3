use super::*;

#[test]
fn user_message_mapping() {
    assert_eq!(AppError::missing_field("zip").user_message(), "This field is required");
    assert_eq!(
        AppError::pattern_mismatch("ssn", "SSN must be in the format 123-45-6789.").user_message(),
        "SSN must be in the format 123-45-6789."
    );
    assert_eq!(AppError::server_rejection(500).user_message(), "Failed to submit. Please try again.");
    assert_eq!(AppError::transport("network", "connection refused").user_message(), "An error occurred. Please try again later.");
    assert_eq!(AppError::timeout("elapsed").user_message(), "The request timed out. Please try again.");
}

#[test]
fn timeout_message_is_distinct() {
    let t = AppError::timeout("elapsed");
    assert_ne!(t.user_message(), AppError::transport("network", "x").user_message());
    assert_ne!(t.user_message(), AppError::server_rejection(503).user_message());
}

#[test]
fn codes_and_display() {
    let e = AppError::server_rejection(422);
    assert_eq!(e.code_str(), "server_rejection");
    assert_eq!(e.to_string(), "server_rejection: collection endpoint answered HTTP 422");
    assert!(matches!(e, AppError::ServerRejection { status: 422, .. }));

    let m = AppError::missing_field("idFront");
    assert_eq!(m.code_str(), "idFront");
    assert!(m.is_client_side());
    assert!(!e.is_client_side());
}

#[test]
fn serializes_with_type_tag() {
    let v = serde_json::to_value(AppError::timeout("elapsed")).unwrap();
    assert_eq!(v["type"], "timeout");
    assert_eq!(v["message"], "elapsed");
}
