//! Static field schema for the registration form.
//! Single source of truth for field ids, labels, input kinds, required-ness and
//! the pattern rules the validation engine applies. Everything else reads it.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Tel,
    Date,
    Select,
    File,
    Multiline,
}

impl FieldKind {
    pub fn is_file(self) -> bool { matches!(self, FieldKind::File) }

    /// HTML input type used when rendering the field.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Tel => "tel",
            FieldKind::Date => "date",
            FieldKind::Select => "select",
            FieldKind::File => "file",
            FieldKind::Multiline => "textarea",
        }
    }
}

/// Regex-based format constraint with the message shown on mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRule {
    pub pattern: &'static str,
    pub message: &'static str,
}

impl ValidationRule {
    pub const fn new(pattern: &'static str, message: &'static str) -> Self { Self { pattern, message } }

    /// Test a value against the rule. A pattern that failed to compile never matches.
    pub fn is_match(&self, value: &str) -> bool {
        match COMPILED.get(self.pattern) {
            Some(re) => re.is_match(value),
            None => {
                tracing::error!(target: "regform::schema", pattern = self.pattern, "validation pattern did not compile");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub rule: Option<ValidationRule>,
    pub placeholder: Option<&'static str>,
    /// Choices for select fields; the empty placeholder choice is implied.
    pub options: &'static [&'static str],
    /// Accept list advertised by file inputs.
    pub accept: Option<&'static str>,
}

impl FieldDefinition {
    const fn new(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { id, label, kind, required: false, rule: None, placeholder: None, options: &[], accept: None }
    }
    const fn required(mut self) -> Self { self.required = true; self }
    const fn rule(mut self, rule: ValidationRule) -> Self { self.rule = Some(rule); self }
    const fn placeholder(mut self, text: &'static str) -> Self { self.placeholder = Some(text); self }
    const fn options(mut self, options: &'static [&'static str]) -> Self { self.options = options; self }
    const fn accept(mut self, accept: &'static str) -> Self { self.accept = Some(accept); self }
}

pub const NAME_PATTERN: &str = r"^[A-Za-z\s'-]{2,}$";
pub const ZIP_PATTERN: &str = r"^[0-9]{5}(?:-[0-9]{4})?$";
pub const PHONE_PATTERN: &str = r"^\+?[0-9]{10,15}$";
pub const SSN_PATTERN: &str = r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$";

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Other"];
pub const ID_UPLOAD_ACCEPT: &str = "image/*,.pdf";

pub static FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new("firstName", "First Name", FieldKind::Text).required().rule(ValidationRule::new(
        NAME_PATTERN,
        "First Name must be at least 2 letters and contain only letters, spaces, apostrophes or hyphens.",
    )),
    FieldDefinition::new("middleName", "Middle Name", FieldKind::Text).required().rule(ValidationRule::new(
        NAME_PATTERN,
        "Middle Name must be at least 2 letters and contain only letters, spaces, apostrophes or hyphens.",
    )),
    FieldDefinition::new("lastName", "Last Name", FieldKind::Text).required().rule(ValidationRule::new(
        NAME_PATTERN,
        "Last Name must be at least 2 letters and contain only letters, spaces, apostrophes or hyphens.",
    )),
    FieldDefinition::new("birthDate", "Birth Date", FieldKind::Date).required(),
    FieldDefinition::new("gender", "Gender", FieldKind::Select).required().options(GENDER_OPTIONS),
    FieldDefinition::new("address1", "Street Address", FieldKind::Text).required(),
    FieldDefinition::new("address2", "Address Line 2", FieldKind::Text),
    FieldDefinition::new("city", "City", FieldKind::Text).required(),
    FieldDefinition::new("state", "State/Province", FieldKind::Text).required(),
    FieldDefinition::new("zip", "Postal/Zip Code", FieldKind::Text)
        .required()
        .rule(ValidationRule::new(ZIP_PATTERN, "Postal/Zip Code must be 5 digits (or 5+4).")),
    FieldDefinition::new("mobile", "Mobile Number", FieldKind::Tel).required().rule(ValidationRule::new(
        PHONE_PATTERN,
        "Mobile Number must be 10–15 digits, optionally starting with +.",
    )),
    FieldDefinition::new("home", "Home Number", FieldKind::Tel).rule(ValidationRule::new(
        PHONE_PATTERN,
        "Home Number must be 10–15 digits, optionally starting with +.",
    )),
    FieldDefinition::new("ssn", "SSN (123-45-6789)", FieldKind::Text)
        .required()
        .rule(ValidationRule::new(SSN_PATTERN, "SSN must be in the format 123-45-6789.")),
    FieldDefinition::new("idFront", "ID Upload (Front)", FieldKind::File).required().accept(ID_UPLOAD_ACCEPT),
    FieldDefinition::new("idBack", "ID Upload (Back)", FieldKind::File).required().accept(ID_UPLOAD_ACCEPT),
    FieldDefinition::new("signature", "Signature", FieldKind::Multiline)
        .required()
        .placeholder("Type your full name"),
];

// Compiled once per distinct pattern; patterns are literals above.
static COMPILED: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    FIELDS
        .iter()
        .filter_map(|f| f.rule)
        .filter_map(|r| Regex::new(r.pattern).ok().map(|re| (r.pattern, re)))
        .collect()
});

pub fn fields() -> &'static [FieldDefinition] { FIELDS }

/// Lookup a field definition by id.
pub fn field(id: &str) -> Option<&'static FieldDefinition> { FIELDS.iter().find(|f| f.id == id) }

pub fn required_ids() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().filter(|f| f.required).map(|f| f.id)
}

/// Position of a field in declaration order; used to order errors and payload parts.
pub fn position(id: &str) -> Option<usize> { FIELDS.iter().position(|f| f.id == id) }
