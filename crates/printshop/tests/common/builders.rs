//! Builders for upload batches.

#![allow(dead_code)]

use std::sync::Arc;

use printshop::{MemoryJobStore, PrintService, UploadedFile};

/// Builder for a batch of uploaded files.
#[derive(Default)]
pub struct BatchBuilder {
    files: Vec<UploadedFile>,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pdf(self, name: &str, size: u64) -> Self {
        self.file(name, size, "application/pdf")
    }

    pub fn png(self, name: &str, size: u64) -> Self {
        self.file(name, size, "image/png")
    }

    pub fn jpeg(self, name: &str, size: u64) -> Self {
        self.file(name, size, "image/jpeg")
    }

    pub fn doc(self, name: &str, size: u64) -> Self {
        self.file(name, size, "application/msword")
    }

    pub fn docx(self, name: &str, size: u64) -> Self {
        self.file(
            name,
            size,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        )
    }

    pub fn file(mut self, name: &str, size: u64, content_type: &str) -> Self {
        self.files.push(UploadedFile::new(name, size, content_type));
        self
    }

    pub fn build(self) -> Vec<UploadedFile> {
        self.files
    }
}

/// A service over a fresh in-memory store, with the store handle kept for assertions.
pub fn memory_service() -> (PrintService, Arc<MemoryJobStore>) {
    let store = Arc::new(MemoryJobStore::new());
    (PrintService::new(store.clone()), store)
}
