//! Browser front end: one page with an upload form and the analysis results

use crate::config::Config;
use crate::error::{Result, TextAnalyzerError};
use crate::input::Document;
use crate::output::formatter::{HtmlFormatter, PageState};
use crate::pipeline::Pipeline;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use log::{error, info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Multipart field carrying the uploaded document
pub const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    html: Arc<HtmlFormatter>,
}

/// Outcome of reading the upload form
enum Upload {
    Missing,
    File { name: String, bytes: Vec<u8> },
}

pub fn router(pipeline: Pipeline, max_upload_mb: usize) -> Router {
    let state = AppState {
        pipeline: Arc::new(pipeline),
        html: Arc::new(HtmlFormatter::new(true)),
    };

    Router::new()
        .route("/", get(index).post(upload))
        .layer(DefaultBodyLimit::max(max_upload_mb.saturating_mul(1024 * 1024)))
        .with_state(state)
}

/// Bind the configured address and serve until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let pipeline = Pipeline::from_config(config, true)?;
    let app = router(pipeline, config.server.max_upload_mb);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| TextAnalyzerError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Serving on http://{}", addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| TextAnalyzerError::Server(e.to_string()))
}

async fn index(State(state): State<AppState>) -> Response {
    render(&state, StatusCode::OK, &PageState::Idle { diagnostic: None })
}

async fn upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    let (name, bytes) = match read_upload(multipart).await {
        Ok(Upload::File { name, bytes }) => (name, bytes),
        Ok(Upload::Missing) => return render(&state, StatusCode::OK, &PageState::Idle { diagnostic: None }),
        Err(e) => {
            warn!("Rejected upload: {}", e);
            let message = e.body_text();
            return render(&state, e.status(), &PageState::Idle { diagnostic: Some(&message) });
        }
    };

    let result = match Document::from_upload(name, bytes) {
        Ok(document) => state.pipeline.run(document).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => render(&state, StatusCode::OK, &PageState::Processed(&report)),
        Err(e) => {
            let status = if e.is_user_error() {
                warn!("Upload could not be analyzed: {}", e);
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                error!("Analysis failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            let message = e.to_string();
            render(&state, status, &PageState::Idle { diagnostic: Some(&message) })
        }
    }
}

async fn read_upload(mut multipart: Multipart) -> std::result::Result<Upload, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        // browsers submit an empty part when no file was chosen
        if name.is_empty() && bytes.is_empty() {
            return Ok(Upload::Missing);
        }
        return Ok(Upload::File { name, bytes: bytes.to_vec() });
    }
    Ok(Upload::Missing)
}

fn render(state: &AppState, status: StatusCode, page: &PageState<'_>) -> Response {
    match state.html.render_page(page, true) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
