use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintShopError {
    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Invalid value for environment variable {key}: {reason}")]
    InvalidEnv { key: String, reason: String },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Caller-visible rejections of an upload batch. None of these leave a record behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("No files uploaded")]
    NoFiles,

    #[error(
        "Invalid file type '{0}'. Only {allowed} are allowed.",
        allowed = crate::upload::allowed_type_names()
    )]
    InvalidFileType(String),

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Batch of {file_count} files is too large to price")]
    TooManyFiles { file_count: usize },

    #[error("Price of {base_price} x {file_count} files overflows")]
    Overflow { base_price: u32, file_count: u32 },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Print job store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, PrintShopError>;
