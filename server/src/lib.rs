//! HTTP surface of the mock print shop.
//!
//! - `POST /api/print` takes a multipart batch in the `files` field and
//!   answers with the stored job and the file count.
//! - `GET /api/print/:id` returns a stored job.
//!
//! Errors are JSON bodies of the form `{ "message": ... }`.

use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

/// Serves `state` on its configured address until Ctrl+C or SIGTERM.
pub async fn serve(state: std::sync::Arc<AppState>) -> std::io::Result<()> {
    let address = state.config.bind_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
