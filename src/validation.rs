//! Validation engine: a pure function from submitted values to per-field errors.
//! Required fields are checked first; an empty required value is never pattern-tested.
//! Fields with a rule and a non-empty value are tested against the rule's pattern.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, REQUIRED_MESSAGE};
use crate::schema;
use crate::values::{FieldValue, FormValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    MissingField,
    PatternMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn missing() -> Self { Self { kind: FieldErrorKind::MissingField, message: REQUIRED_MESSAGE.to_string() } }
    pub fn mismatch(message: &str) -> Self { Self { kind: FieldErrorKind::PatternMismatch, message: message.to_string() } }

    pub fn to_app_error(&self, field_id: &str) -> AppError {
        match self.kind {
            FieldErrorKind::MissingField => AppError::missing_field(field_id),
            FieldErrorKind::PatternMismatch => AppError::pattern_mismatch(field_id, self.message.as_str()),
        }
    }
}

/// Field id -> single error. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: BTreeMap<String, FieldError>,
}

impl ErrorMap {
    pub fn new() -> Self { Self::default() }

    /// Records an error for a field, replacing any earlier entry for it.
    pub fn insert(&mut self, field_id: &str, error: FieldError) {
        self.entries.insert(field_id.to_string(), error);
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldError> { self.entries.get(field_id) }

    pub fn message(&self, field_id: &str) -> Option<&str> { self.get(field_id).map(|e| e.message.as_str()) }

    pub fn has_error(&self, field_id: &str) -> bool { self.entries.contains_key(field_id) }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn clear(&mut self) { self.entries.clear(); }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> { self.entries.keys().map(String::as_str) }

    /// Entries ordered as the fields are declared in the schema.
    pub fn iter_in_schema_order(&self) -> Vec<(&str, &FieldError)> {
        let mut out: Vec<(&str, &FieldError)> = self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        out.sort_by_key(|(id, _)| schema::position(id).unwrap_or(usize::MAX));
        out
    }

    pub fn to_app_errors(&self) -> Vec<AppError> {
        self.iter_in_schema_order().into_iter().map(|(id, e)| e.to_app_error(id)).collect()
    }
}

pub fn validate(values: &FormValues) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for def in schema::fields() {
        if values.is_blank(def.id) {
            if def.required {
                errors.insert(def.id, FieldError::missing());
            }
            continue;
        }
        let Some(rule) = def.rule else { continue };
        let matches = match values.get(def.id) {
            Some(FieldValue::Text(text)) => rule.is_match(text),
            // a file never satisfies a text pattern
            Some(FieldValue::File(_)) => false,
            None => true,
        };
        if !matches {
            errors.insert(def.id, FieldError::mismatch(rule.message));
        }
    }
    debug!(target: "regform::validate", error_count = errors.len(), fields = ?errors.field_ids().collect::<Vec<_>>(), "validated form");
    errors
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;
