pub mod print;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub use print::{create_print_job, get_print_job, FILES_FIELD};

/// Headroom over the file ceiling for multipart boundaries and part headers.
/// File bytes themselves are counted exactly by the batch accumulator.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.service.max_batch_bytes() as usize + MULTIPART_OVERHEAD_BYTES;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/print", post(create_print_job))
        .route("/api/print/:id", get(get_print_job))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
