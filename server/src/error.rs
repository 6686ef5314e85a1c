use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use printshop::{PrintShopError, UploadError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("Malformed upload: {0}")]
    MalformedPayload(String),

    #[error("Print job not found")]
    NotFound,

    #[error("Failed to fetch print job")]
    FetchFailed,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Body-limit failures surface as oversized uploads; anything else is a bad body.
    pub fn from_multipart(err: MultipartError, limit: u64) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::Upload(UploadError::PayloadTooLarge { limit })
        } else {
            ApiError::MalformedPayload(err.body_text())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upload(UploadError::PayloadTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upload(_) | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::FetchFailed | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PrintShopError> for ApiError {
    fn from(err: PrintShopError) -> Self {
        match err {
            PrintShopError::Upload(upload) => ApiError::Upload(upload),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
