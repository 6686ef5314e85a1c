//! Upload batch validation: allowed content types and the aggregate size ceiling.

use std::path::Path;

use crate::error::UploadError;

/// Largest accepted batch, summed over every file: 10 MiB.
pub const MAX_BATCH_BYTES: u64 = 10 * 1024 * 1024;

/// Content types a print batch may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowedType {
    Pdf,
    Doc,
    Docx,
    Jpeg,
    Png,
}

impl AllowedType {
    pub const ALL: [AllowedType; 5] = [Self::Pdf, Self::Doc, Self::Docx, Self::Jpeg, Self::Png];

    /// Matches a MIME type exactly, ignoring case and any `;` parameters.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.mime() == essence)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl std::fmt::Display for AllowedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Doc => write!(f, "DOC"),
            Self::Docx => write!(f, "DOCX"),
            Self::Jpeg => write!(f, "JPG"),
            Self::Png => write!(f, "PNG"),
        }
    }
}

/// Display names of every allowed type, e.g. `"PDF, DOC, DOCX, JPG, PNG"`.
pub fn allowed_type_names() -> String {
    AllowedType::ALL
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One file of an upload batch, as declared by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared MIME type.
    pub content_type: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size: u64, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: content_type.into(),
        }
    }

    /// Builds a file whose MIME type comes from the declared value, or is
    /// guessed from the filename when the client sent none.
    pub fn with_detected_type(name: impl Into<String>, size: u64, declared: Option<&str>) -> Self {
        let name = name.into();
        let content_type = match declared {
            Some(declared) if !declared.trim().is_empty() => declared.to_string(),
            _ => detect_mime_type(Path::new(&name))
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        };
        Self {
            name,
            size,
            content_type,
        }
    }
}

/// Detects MIME type from a file path using the mime_guess crate.
/// Returns `None` for unknown extensions.
pub fn detect_mime_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path).first().map(|m| m.to_string())
}

/// Accepted batch summary handed to pricing and storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub file_names: Vec<String>,
    pub total_bytes: u64,
}

impl BatchSummary {
    pub fn file_count(&self) -> usize {
        self.file_names.len()
    }

    pub fn joined_names(&self) -> String {
        self.file_names.join(", ")
    }
}

/// Collects a batch file by file, enforcing the size ceiling as bytes arrive.
///
/// A rejected batch stays rejected: [`finish`](Self::finish) never returns the
/// summary of a batch that tripped a check.
#[derive(Debug)]
pub struct BatchAccumulator {
    limit: u64,
    total_bytes: u64,
    file_names: Vec<String>,
}

impl Default for BatchAccumulator {
    fn default() -> Self {
        Self::new(MAX_BATCH_BYTES)
    }
}

impl BatchAccumulator {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            total_bytes: 0,
            file_names: Vec::new(),
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn file_count(&self) -> usize {
        self.file_names.len()
    }

    /// Checks the content type of a file before any of its bytes are counted.
    pub fn begin_file(&mut self, name: &str, content_type: &str) -> Result<(), UploadError> {
        if AllowedType::from_mime(content_type).is_none() {
            tracing::warn!(file = %name, content_type = %content_type, "Rejected upload with disallowed type");
            return Err(UploadError::InvalidFileType(content_type.to_string()));
        }
        self.file_names.push(name.to_string());
        Ok(())
    }

    /// Counts `len` more bytes of the current file.
    pub fn add_bytes(&mut self, len: u64) -> Result<(), UploadError> {
        self.total_bytes = self.total_bytes.saturating_add(len);
        if self.total_bytes > self.limit {
            tracing::warn!(
                total_bytes = self.total_bytes,
                limit = self.limit,
                "Rejected upload over size limit"
            );
            return Err(UploadError::PayloadTooLarge { limit: self.limit });
        }
        Ok(())
    }

    /// Adds a whole file with a known size.
    pub fn push(&mut self, file: &UploadedFile) -> Result<(), UploadError> {
        self.begin_file(&file.name, &file.content_type)?;
        self.add_bytes(file.size)
    }

    pub fn finish(self) -> Result<BatchSummary, UploadError> {
        if self.file_names.is_empty() {
            return Err(UploadError::NoFiles);
        }
        Ok(BatchSummary {
            file_names: self.file_names,
            total_bytes: self.total_bytes,
        })
    }
}

/// Validates a complete batch: non-empty, allowed types only, within `limit`.
pub fn validate_batch(files: &[UploadedFile], limit: u64) -> Result<BatchSummary, UploadError> {
    if files.is_empty() {
        return Err(UploadError::NoFiles);
    }

    // Type errors win over size errors regardless of file order.
    for file in files {
        if AllowedType::from_mime(&file.content_type).is_none() {
            return Err(UploadError::InvalidFileType(file.content_type.clone()));
        }
    }

    let mut accumulator = BatchAccumulator::new(limit);
    for file in files {
        accumulator.push(file)?;
    }
    accumulator.finish()
}
