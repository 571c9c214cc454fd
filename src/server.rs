//! HTTP surface exposing template fetching and script generation.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::builder::generate_script;
use crate::model::{CustomRequirements, Video};
use crate::providers::LlmProvider;
use crate::sections::ScriptSections;
use crate::sources::RecordSource;
use crate::{fetch_videos, ReelError};

pub const FETCH_VIDEOS_PATH: &str = "/functions/v1/fetch-airtable-videos";
pub const GENERATE_SCRIPT_PATH: &str = "/functions/v1/generate-script-with-claude";

/// Collaborators shared by every request
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RecordSource>,
    pub provider: Arc<dyn LlmProvider>,
}

#[derive(Serialize)]
struct VideosResponse {
    videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    video: Video,
    #[serde(default)]
    custom_requirements: CustomRequirements,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    success: bool,
    generated_script: String,
    sections: ScriptSections,
    usage: Option<Value>,
}

/// Error body sent back to the caller. Generation failures also carry
/// `"success": false`.
struct ApiError {
    status: StatusCode,
    message: String,
    generation: bool,
}

impl ApiError {
    fn from_reel(err: ReelError, generation: bool) -> Self {
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        ApiError {
            status,
            message: err.to_string(),
            generation,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{} {}", self.status, self.message);
        let body = if self.generation {
            json!({ "success": false, "error": self.message })
        } else {
            json!({ "error": self.message })
        };
        (self.status, Json(body)).into_response()
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn fetch_airtable_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VideosResponse>, ApiError> {
    let videos = fetch_videos(state.source.as_ref())
        .await
        .map_err(|e| ApiError::from_reel(e, false))?;

    Ok(Json(VideosResponse { videos }))
}

async fn generate_script_with_claude(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError {
        status: StatusCode::BAD_REQUEST,
        message: rejection.body_text(),
        generation: true,
    })?;

    let script = generate_script(
        state.provider.as_ref(),
        &request.video,
        &request.custom_requirements,
    )
    .await
    .map_err(|e| ApiError::from_reel(e, true))?;

    Ok(Json(GenerateResponse {
        success: true,
        generated_script: script.content,
        sections: script.sections,
        usage: script.usage,
    }))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            FETCH_VIDEOS_PATH,
            get(fetch_airtable_videos).post(fetch_airtable_videos),
        )
        .route(GENERATE_SCRIPT_PATH, post(generate_script_with_claude))
        .layer(cors())
        .with_state(Arc::new(state))
}
