//! Web server for the LSB steganography API
//!
//! ## Endpoints
//!
//! - `GET  /api/health`
//! - `POST /api/embed`: multipart `image`, `text`, optional `delimiter`
//! - `POST /api/extract`: multipart `image`, optional `delimiter`
//! - `POST /api/visualize`: multipart `image`
//!
//! Images travel back base64-encoded inside JSON.

use axum::{
    extract::{multipart::Multipart, DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use clap::Parser;
use log::{error, info, warn};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use lsb_stego::common::config::{AppConfig, StegoConfig};
use lsb_stego::common::logging::init_logger;
use lsb_stego::processing::{
    embed_text_bytes, extract_text_bytes, visualize_bytes, EmbedReport, Extraction, RandomBits,
};
use lsb_stego::StegoError;

#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP API for LSB steganography", long_about = None)]
struct Args {
    /// Path to the configuration file (TOML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Address to listen on, overrides the config file
    #[arg(short, long)]
    address: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct EmbedResponse {
    success: bool,
    message: String,
    carrier_image_base64: String,
    mime_type: &'static str,
    report: EmbedReport,
}

#[derive(Serialize)]
struct ExtractResponse {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
struct VisualizeResponse {
    bit_plane_base64: String,
    mime_type: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn stego_error(err: StegoError) -> ApiError {
    let status = match &err {
        StegoError::CapacityExceeded { .. } | StegoError::EmptyDelimiter => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StegoError::ImageDecode(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, err.to_string())
}

struct AppState {
    stego: StegoConfig,
}

/// Fields collected from a multipart upload.
#[derive(Default)]
struct UploadForm {
    image: Option<Vec<u8>>,
    filename: Option<String>,
    text: Option<String>,
    delimiter: Option<String>,
}

impl UploadForm {
    fn require_image(&mut self) -> Result<Vec<u8>, ApiError> {
        self.image
            .take()
            .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No image provided"))
    }

    fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or("uploaded_image")
    }
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart data: {}", e),
        )
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                form.filename = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    api_error(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read image data: {}", e),
                    )
                })?;
                form.image = Some(data.to_vec());
            }
            "text" | "delimiter" => {
                let value = field.text().await.map_err(|e| {
                    api_error(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read field {}: {}", name, e),
                    )
                })?;
                if name == "text" {
                    form.text = Some(value);
                } else if !value.is_empty() {
                    form.delimiter = Some(value);
                }
            }
            other => warn!("Ignoring unexpected form field '{}'", other),
        }
    }

    Ok(form)
}

/// Run a codec call off the async runtime.
async fn run_blocking<T, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> lsb_stego::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Worker task failed: {}", e),
            )
        })?
        .map_err(stego_error)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    info!("🚀 Initializing web server...");

    let config = AppConfig::load(args.config.as_deref())?;
    let addr = args.address.unwrap_or_else(|| config.web.address.clone());

    let state = Arc::new(AppState {
        stego: config.stego.clone(),
    });

    let mut app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/embed", post(embed_handler))
        .route("/api/extract", post(extract_handler))
        .route("/api/visualize", post(visualize_handler))
        .layer(DefaultBodyLimit::max(config.web.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state);

    if let Some(dir) = &config.web.static_dir {
        info!("📁 Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    info!("🌐 Web server running on http://{}", addr);
    info!("📡 API endpoints: http://{}/api/{{embed,extract,visualize}}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "lsb-steganography-api",
        "channel": "blue",
        "carrier_format": state.stego.output_format,
    }))
}

async fn embed_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = read_form(multipart).await?;
    let image = form.require_image()?;
    let filename = form.filename().to_string();
    let text = form
        .text
        .take()
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No text provided"))?;
    let delimiter = form
        .delimiter
        .take()
        .unwrap_or_else(|| state.stego.delimiter.clone());
    let format = state.stego.output_format;
    let seed = state.stego.seed;

    info!("📤 Received cover image: {} ({} bytes)", filename, image.len());

    let (carrier, report) = run_blocking(move || {
        let mut padding = RandomBits::from_seed_option(seed);
        embed_text_bytes(&image, &text, &delimiter, format, &mut padding)
    })
    .await
    .map_err(|e| {
        error!("❌ Embedding into {} failed: {}", filename, e.1.error);
        e
    })?;

    info!(
        "✅ Embedded {} payload bits into {} ({} bytes out)",
        report.payload_bits,
        filename,
        carrier.len()
    );

    Ok((
        StatusCode::OK,
        Json(EmbedResponse {
            success: true,
            message: format!("Successfully embedded text into {}", filename),
            carrier_image_base64: general_purpose::STANDARD.encode(&carrier),
            mime_type: format.mime_type(),
            report,
        }),
    ))
}

async fn extract_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = read_form(multipart).await?;
    let image = form.require_image()?;
    let filename = form.filename().to_string();
    let delimiter = form
        .delimiter
        .take()
        .unwrap_or_else(|| state.stego.delimiter.clone());

    let extraction = run_blocking(move || extract_text_bytes(&image, &delimiter)).await?;

    match &extraction {
        Extraction::Found(text) => info!(
            "📥 Extracted {} characters from {}",
            text.chars().count(),
            filename
        ),
        Extraction::NotFound => warn!("No hidden text found in {}", filename),
    }

    Ok(Json(ExtractResponse {
        found: extraction.is_found(),
        text: extraction.into(),
    }))
}

async fn visualize_handler(multipart: Multipart) -> Result<impl IntoResponse, ApiError> {
    let mut form = read_form(multipart).await?;
    let image = form.require_image()?;

    let plane = run_blocking(move || visualize_bytes(&image)).await?;

    Ok(Json(VisualizeResponse {
        bit_plane_base64: general_purpose::STANDARD.encode(&plane),
        mime_type: "image/png",
    }))
}
