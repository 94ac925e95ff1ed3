//! Submitted field values, keyed by field id.

use std::collections::HashMap;

/// A file chosen in a file input. Binary content travels with the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.into(), bytes: bytes.into() }
    }

    /// True when the content type is any `image/*` type.
    pub fn is_image(&self) -> bool {
        self.content_type.trim().to_ascii_lowercase().starts_with("image/")
    }

    /// A file input with nothing selected: no name and no content.
    pub fn is_empty(&self) -> bool { self.file_name.is_empty() && self.bytes.is_empty() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FileUpload),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::File(f) => f.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileUpload> {
        match self {
            FieldValue::File(f) => Some(f),
            FieldValue::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: HashMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self { Self::default() }

    pub fn with_text(mut self, id: &str, value: impl Into<String>) -> Self {
        self.insert_text(id, value);
        self
    }

    pub fn with_file(mut self, id: &str, file: FileUpload) -> Self {
        self.insert_file(id, file);
        self
    }

    pub fn insert_text(&mut self, id: &str, value: impl Into<String>) {
        self.values.insert(id.to_string(), FieldValue::Text(value.into()));
    }

    pub fn insert_file(&mut self, id: &str, file: FileUpload) {
        self.values.insert(id.to_string(), FieldValue::File(file));
    }

    pub fn remove(&mut self, id: &str) -> Option<FieldValue> { self.values.remove(id) }

    pub fn get(&self, id: &str) -> Option<&FieldValue> { self.values.get(id) }

    pub fn text(&self, id: &str) -> Option<&str> { self.get(id).and_then(FieldValue::as_text) }

    pub fn file(&self, id: &str) -> Option<&FileUpload> { self.get(id).and_then(FieldValue::as_file) }

    /// Absent and empty values are treated alike by the required check.
    pub fn is_blank(&self, id: &str) -> bool { self.get(id).map_or(true, FieldValue::is_empty) }

    pub fn clear(&mut self) { self.values.clear(); }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
