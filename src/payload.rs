//! Outbound multipart payload, one part per present field in schema order.

use crate::schema;
use crate::values::{FieldValue, FormValues};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    Text(String),
    File { file_name: String, content_type: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    pub name: &'static str,
    pub body: PartBody,
}

impl PayloadPart {
    pub fn is_file(&self) -> bool { matches!(self.body, PartBody::File { .. }) }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<PayloadPart>,
}

impl MultipartPayload {
    /// Empty text values are kept, as a browser form would send them; absent values are skipped.
    pub fn from_values(values: &FormValues) -> Self {
        let parts = schema::fields()
            .iter()
            .filter_map(|def| {
                let body = match values.get(def.id)? {
                    FieldValue::Text(s) => PartBody::Text(s.clone()),
                    FieldValue::File(f) => PartBody::File {
                        file_name: f.file_name.clone(),
                        content_type: f.content_type.clone(),
                        bytes: f.bytes.clone(),
                    },
                };
                Some(PayloadPart { name: def.id, body })
            })
            .collect();
        Self { parts }
    }

    pub fn parts(&self) -> &[PayloadPart] { &self.parts }
    pub fn into_parts(self) -> Vec<PayloadPart> { self.parts }
    pub fn len(&self) -> usize { self.parts.len() }
    pub fn is_empty(&self) -> bool { self.parts.is_empty() }
    pub fn part(&self, name: &str) -> Option<&PayloadPart> { self.parts.iter().find(|p| p.name == name) }
    pub fn names(&self) -> Vec<&'static str> { self.parts.iter().map(|p| p.name).collect() }
    pub fn file_count(&self) -> usize { self.parts.iter().filter(|p| p.is_file()).count() }
}
