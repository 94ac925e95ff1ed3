use super::*;
use crate::values::FileUpload;

fn valid_values() -> FormValues {
    FormValues::new()
        .with_text("firstName", "Mary-Jane")
        .with_text("middleName", "O'Neil")
        .with_text("lastName", "Smith")
        .with_text("birthDate", "1990-04-12")
        .with_text("gender", "Female")
        .with_text("address1", "12 Elm Street")
        .with_text("city", "Springfield")
        .with_text("state", "IL")
        .with_text("zip", "62704")
        .with_text("mobile", "+12175550123")
        .with_text("ssn", "123-45-6789")
        .with_file("idFront", FileUpload::new("front.png", "image/png", vec![0x89u8, 0x50, 0x4e, 0x47]))
        .with_file("idBack", FileUpload::new("back.pdf", "application/pdf", b"%PDF-1.7".to_vec()))
        .with_text("signature", "Mary-Jane O'Neil Smith")
}

fn only_error(values: &FormValues) -> Option<(String, FieldError)> {
    let errors = validate(values);
    assert!(errors.len() <= 1, "expected at most one error, got {:?}", errors);
    errors.iter_in_schema_order().first().map(|(id, e)| (id.to_string(), (*e).clone()))
}

#[test]
fn valid_form_has_no_errors() {
    assert!(validate(&valid_values()).is_empty());
}

#[test]
fn optional_fields_may_be_empty() {
    let v = valid_values().with_text("address2", "").with_text("home", "");
    assert!(validate(&v).is_empty());
}

#[test]
fn missing_required_field_reports_required_only() {
    let v = valid_values().with_text("zip", "");
    let (id, err) = only_error(&v).unwrap();
    assert_eq!(id, "zip");
    assert_eq!(err.kind, FieldErrorKind::MissingField);
    assert_eq!(err.message, "This field is required");
}

#[test]
fn absent_required_fields_are_all_reported() {
    let errors = validate(&FormValues::new());
    assert_eq!(errors.len(), 14);
    for id in crate::schema::required_ids() {
        assert_eq!(errors.get(id).map(|e| e.kind), Some(FieldErrorKind::MissingField), "{}", id);
    }
    assert!(!errors.has_error("address2"));
    assert!(!errors.has_error("home"));
}

#[test]
fn missing_file_is_required_error() {
    let mut v = valid_values();
    v.remove("idBack");
    let (id, err) = only_error(&v).unwrap();
    assert_eq!(id, "idBack");
    assert_eq!(err.kind, FieldErrorKind::MissingField);
}

#[test]
fn zip_examples() {
    for ok in ["12345", "12345-6789"] {
        assert!(validate(&valid_values().with_text("zip", ok)).is_empty(), "{}", ok);
    }
    for bad in ["1234", "12345-678", "ABCDE", "123456"] {
        let (id, err) = only_error(&valid_values().with_text("zip", bad)).unwrap();
        assert_eq!(id, "zip");
        assert_eq!(err.message, "Postal/Zip Code must be 5 digits (or 5+4).");
    }
}

#[test]
fn ssn_examples() {
    assert!(validate(&valid_values().with_text("ssn", "123-45-6789")).is_empty());
    let (id, err) = only_error(&valid_values().with_text("ssn", "123456789")).unwrap();
    assert_eq!(id, "ssn");
    assert_eq!(err.kind, FieldErrorKind::PatternMismatch);
}

#[test]
fn phone_examples() {
    assert!(validate(&valid_values().with_text("mobile", "+12345678901")).is_empty());
    assert!(validate(&valid_values().with_text("mobile", "123456789012345")).is_empty());
    let (id, _) = only_error(&valid_values().with_text("mobile", "123")).unwrap();
    assert_eq!(id, "mobile");
    let (id, err) = only_error(&valid_values().with_text("home", "1234567890123456")).unwrap();
    assert_eq!(id, "home");
    assert_eq!(err.message, "Home Number must be 10–15 digits, optionally starting with +.");
}

#[test]
fn name_rules() {
    let (id, _) = only_error(&valid_values().with_text("firstName", "J")).unwrap();
    assert_eq!(id, "firstName");
    let (id, _) = only_error(&valid_values().with_text("middleName", "R2D2")).unwrap();
    assert_eq!(id, "middleName");
    assert!(validate(&valid_values().with_text("lastName", "de la Cruz")).is_empty());
}

#[test]
fn file_in_patterned_field_is_a_mismatch() {
    let v = valid_values().with_file("zip", FileUpload::new("zip.png", "image/png", vec![1u8]));
    let (id, err) = only_error(&v).unwrap();
    assert_eq!(id, "zip");
    assert_eq!(err.kind, FieldErrorKind::PatternMismatch);
}

#[test]
fn unknown_ids_are_ignored() {
    assert!(validate(&valid_values().with_text("fullName", "x")).is_empty());
}

#[test]
fn validate_is_pure() {
    let v = valid_values().with_text("zip", "ABCDE").with_text("city", "");
    let before = v.clone();
    let first = validate(&v);
    let second = validate(&v);
    assert_eq!(first, second);
    assert_eq!(v, before);
    assert_eq!(first.len(), 2);
}

#[test]
fn errors_convert_to_taxonomy() {
    let v = valid_values().with_text("city", "").with_text("ssn", "1");
    let errs = validate(&v).to_app_errors();
    assert_eq!(errs.len(), 2);
    assert!(matches!(&errs[0], AppError::MissingField { code, .. } if code == "city"));
    assert!(matches!(&errs[1], AppError::PatternMismatch { code, .. } if code == "ssn"));
    assert!(errs.iter().all(AppError::is_client_side));
}
