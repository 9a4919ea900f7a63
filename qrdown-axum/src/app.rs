use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use qrdown_blob::BlobAdapter;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{markdown, upload};
use crate::{ApiError, AppState, ServerConfig};

#[derive(Clone)]
pub struct QrdownApp {
    pub state: AppState,
    pub router: Router<()>,
}

impl QrdownApp {
    pub fn new(state: AppState, config: &ServerConfig) -> Self {
        let router = Router::new()
            .route("/markdown", post(markdown::update_markdown))
            .route("/markdown/{id}", get(markdown::get_markdown))
            .route("/upload", post(upload::upload_file))
            .route("/upload/logo", post(upload::upload_logo))
            .route("/upload/logo/{post_id}", get(upload::get_logo))
            .route("/health", get(|| async { "ok" }))
            .fallback(|| async { ApiError::not_found("Page not found") })
            .with_state(state.clone())
            .layer(DefaultBodyLimit::max(config.max_upload_bytes))
            .layer(CorsLayer::very_permissive())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Self { state, router }
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Wire both repositories onto one adapter and build the router
pub fn build(blobs: BlobAdapter, config: &ServerConfig) -> QrdownApp {
    let state = AppState::new(blobs, config.blob_config());
    QrdownApp::new(state, config)
}
