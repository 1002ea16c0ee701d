//! HTTP wrapper around the extraction pipeline
//!
//! `POST /process` takes a multipart upload with an `image` field and answers
//! with every cut-out as a base64 PNG. `GET /health` reports liveness.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shapes::{Pipeline, ShapeError};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_UPLOAD_LIMIT: usize = 32 * 1024 * 1024;

/// Multipart field carrying the uploaded image
pub const IMAGE_FIELD: &str = "image";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Maximum upload size in bytes
    pub upload_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Get the socket address; `host` may be IPv4 or IPv6
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.host.trim_matches(|c| c == '[' || c == ']').parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Application state shared across handlers
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build the API router
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/process", post(process_image))
        .route("/health", get(health_check))
}

/// Router with CORS and the upload size limit applied.
///
/// Oversize uploads fail inside the multipart reader, so they get the same
/// JSON error body as every other failure.
pub fn build_router(state: Arc<AppState>, upload_limit: usize) -> Router {
    api_routes()
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

/// Bind and serve until the task is cancelled
pub async fn run(config: &ServerConfig, pipeline: Pipeline) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = config.socket_addr()?;
    let router = build_router(Arc::new(AppState::new(pipeline)), config.upload_limit);

    info!(%addr, "starting shape extraction server");
    info!("  POST /process - extract shapes from an uploaded image");
    info!("  GET  /health  - liveness check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    /// Base64-encoded PNG per extracted shape
    pub shapes: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

async fn process_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field.bytes().await.map_err(|e| AppError::Upload(e.to_string()))?;
            upload = Some(bytes);
            break;
        }
    }

    let data = upload.ok_or_else(|| AppError::Upload(format!("missing '{IMAGE_FIELD}' field")))?;
    let pipeline = Arc::clone(&state.pipeline);

    let result = tokio::task::spawn_blocking(move || pipeline.process_bytes(&data))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    let shapes = result.shapes_as_base64_png()?;

    info!(shapes = shapes.len(), "processed upload");
    Ok(Json(ProcessResponse {
        success: true,
        shapes,
    }))
}

#[derive(Debug)]
pub enum AppError {
    Upload(String),
    Shape(ShapeError),
    Internal(String),
}

impl From<ShapeError> for AppError {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let message = match self {
            AppError::Upload(msg) => format!("Invalid upload: {msg}"),
            AppError::Shape(err) => err.to_string(),
            AppError::Internal(msg) => msg,
        };
        error!(error = %message, "request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}
