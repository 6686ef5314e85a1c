//! Print job endpoints.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};

use printshop::{PrintJob, PrintReceipt, UploadError, UploadedFile};

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the uploaded files.
pub const FILES_FIELD: &str = "files";

/// `POST /api/print`: validates, prices and records one batch.
///
/// File bytes are counted chunk by chunk and then dropped; only the record
/// is kept. Parts outside the `files` field, or without a filename, are
/// skipped. A body that is not `multipart/form-data` carries no files.
pub async fn create_print_job(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PrintReceipt>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "Rejected non-multipart upload");
        ApiError::Upload(UploadError::NoFiles)
    })?;
    let limit = state.service.max_batch_bytes();
    let mut batch = state.service.accumulator();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_multipart(e, limit))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let file = UploadedFile::with_detected_type(file_name, 0, field.content_type());
        batch.begin_file(&file.name, &file.content_type)?;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| ApiError::from_multipart(e, limit))?
        {
            batch.add_bytes(chunk.len() as u64)?;
        }
    }

    let summary = batch.finish().inspect_err(|_| {
        tracing::warn!("Rejected upload with no files");
    })?;

    let receipt = state.service.record(summary)?;
    Ok(Json(receipt))
}

/// `GET /api/print/:id`
pub async fn get_print_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PrintJob>, ApiError> {
    match state.service.find(&id) {
        Ok(Some(job)) => Ok(Json(job)),
        Ok(None) => Err(ApiError::NotFound),
        Err(e) => {
            tracing::error!(job_id = %id, error = %e, "Failed to fetch print job");
            Err(ApiError::FetchFailed)
        }
    }
}
