//! File preview lifecycle.
//!
//! Each file field owns at most one live preview URI at a time. A preview is allocated from
//! the `ObjectUrlRegistry` when an image is chosen and revoked explicitly: when the field gets
//! a new file, when the file is cleared, on successful submission and on teardown. Revoking
//! an unknown or already revoked URI is a no-op, so cleanup paths may overlap freely.

use std::collections::HashMap;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::values::FileUpload;

pub const PREVIEW_URI_SCHEME: &str = "blob:regform/";

/// Allocator of displayable-resource URIs bound to file contents.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    live: HashMap<String, FileUpload>,
    created: u64,
    revoked: u64,
    peak_live: usize,
}

impl ObjectUrlRegistry {
    pub fn create(&mut self, file: &FileUpload) -> String {
        let uri = format!("{}{}", PREVIEW_URI_SCHEME, Uuid::new_v4());
        self.live.insert(uri.clone(), file.clone());
        self.created += 1;
        self.peak_live = self.peak_live.max(self.live.len());
        trace!(target: "regform::preview", live = self.live.len(), "object url created");
        uri
    }

    /// Returns false when the URI was not live.
    pub fn revoke(&mut self, uri: &str) -> bool {
        let removed = self.live.remove(uri).is_some();
        if removed { self.revoked += 1; }
        removed
    }

    pub fn resolve(&self, uri: &str) -> Option<&FileUpload> { self.live.get(uri) }
    pub fn is_live(&self, uri: &str) -> bool { self.live.contains_key(uri) }
    pub fn live_count(&self) -> usize { self.live.len() }
    pub fn created_count(&self) -> u64 { self.created }
    pub fn revoked_count(&self) -> u64 { self.revoked }
    /// Highest number of simultaneously live URIs seen so far.
    pub fn peak_live(&self) -> usize { self.peak_live }
}

/// Binds one file field to its live preview URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    pub field_id: String,
    pub uri: String,
    pub file_name: String,
}

#[derive(Debug, Default)]
pub struct PreviewManager {
    registry: ObjectUrlRegistry,
    handles: HashMap<String, PreviewHandle>,
}

impl PreviewManager {
    pub fn new() -> Self { Self::default() }

    /// Replace the preview for `field_id`. The prior handle is released before a new one is
    /// allocated; non-image files and cleared inputs get no preview.
    pub fn set_file(&mut self, field_id: &str, file: Option<&FileUpload>) -> Option<PreviewHandle> {
        self.release(field_id);
        let file = file.filter(|f| !f.is_empty())?;
        if !file.is_image() {
            debug!(target: "regform::preview", field = field_id, content_type = %file.content_type, "no preview for non-image file");
            return None;
        }
        let uri = self.registry.create(file);
        let handle = PreviewHandle { field_id: field_id.to_string(), uri, file_name: file.file_name.clone() };
        self.handles.insert(field_id.to_string(), handle.clone());
        debug!(target: "regform::preview", field = field_id, "preview created");
        Some(handle)
    }

    /// Release the handle for one field. Returns whether a live handle was released.
    pub fn release(&mut self, field_id: &str) -> bool {
        match self.handles.remove(field_id) {
            Some(handle) => self.registry.revoke(&handle.uri),
            None => false,
        }
    }

    /// Release every held handle; returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let released = self
            .handles
            .drain()
            .filter(|(_, handle)| self.registry.revoke(&handle.uri))
            .count();
        if released > 0 {
            debug!(target: "regform::preview", released, "released all previews");
        }
        released
    }

    pub fn handle(&self, field_id: &str) -> Option<&PreviewHandle> { self.handles.get(field_id) }
    pub fn handle_count(&self) -> usize { self.handles.len() }
    pub fn registry(&self) -> &ObjectUrlRegistry { &self.registry }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> FileUpload { FileUpload::new(name, "image/png", vec![0x89u8, 0x50, 0x4e, 0x47]) }
    fn pdf(name: &str) -> FileUpload { FileUpload::new(name, "application/pdf", b"%PDF-1.7".to_vec()) }

    #[test]
    fn image_gets_a_preview() {
        let mut pm = PreviewManager::new();
        let h = pm.set_file("idFront", Some(&png("front.png"))).unwrap();
        assert_eq!(h.field_id, "idFront");
        assert!(h.uri.starts_with(PREVIEW_URI_SCHEME));
        assert_eq!(pm.registry().resolve(&h.uri).map(|f| f.file_name.as_str()), Some("front.png"));
        assert_eq!(pm.handle("idFront"), Some(&h));
    }

    #[test]
    fn document_gets_no_preview_and_releases_prior() {
        let mut pm = PreviewManager::new();
        let first = pm.set_file("idFront", Some(&png("a.png"))).unwrap();
        assert!(pm.set_file("idFront", Some(&pdf("b.pdf"))).is_none());
        assert!(!pm.registry().is_live(&first.uri));
        assert_eq!(pm.handle_count(), 0);
    }

    #[test]
    fn replacement_releases_before_allocating() {
        let mut pm = PreviewManager::new();
        assert!(pm.set_file("idFront", Some(&pdf("scan.pdf"))).is_none());
        let a = pm.set_file("idFront", Some(&png("a.png"))).unwrap();
        let b = pm.set_file("idFront", Some(&png("b.png"))).unwrap();
        assert_ne!(a.uri, b.uri);
        assert!(!pm.registry().is_live(&a.uri));
        assert!(pm.registry().is_live(&b.uri));
        assert_eq!(pm.registry().live_count(), 1);
        assert_eq!(pm.registry().peak_live(), 1);
    }

    #[test]
    fn clearing_the_input_releases() {
        let mut pm = PreviewManager::new();
        let h = pm.set_file("idBack", Some(&png("b.png"))).unwrap();
        assert!(pm.set_file("idBack", None).is_none());
        assert!(!pm.registry().is_live(&h.uri));
        let empty = FileUpload::new("", "image/png", Vec::<u8>::new());
        assert!(pm.set_file("idBack", Some(&empty)).is_none());
    }

    #[test]
    fn release_all_is_idempotent() {
        let mut pm = PreviewManager::new();
        pm.set_file("idFront", Some(&png("a.png")));
        pm.set_file("idBack", Some(&png("b.png")));
        assert_eq!(pm.registry().live_count(), 2);
        assert_eq!(pm.release_all(), 2);
        assert_eq!(pm.release_all(), 0);
        assert_eq!(pm.registry().live_count(), 0);
        assert_eq!(pm.registry().created_count(), 2);
        assert_eq!(pm.registry().revoked_count(), 2);
        assert!(!pm.release("idFront"));
    }

    #[test]
    fn fields_are_independent() {
        let mut pm = PreviewManager::new();
        let front = pm.set_file("idFront", Some(&png("a.png"))).unwrap();
        pm.set_file("idBack", Some(&png("b.png")));
        pm.set_file("idBack", None);
        assert!(pm.registry().is_live(&front.uri));
    }
}
