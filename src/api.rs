use crate::config::AppConfig;
use crate::debug::{inspect_course, inspect_ecp, CourseReport, EcpReport};
use crate::error::DeadlineError;
use crate::extract::extract_deadlines;
use crate::offerings::discover::{fetch_listing, fetch_offerings, resolve_profile_url};
use crate::runtime::fetcher::Fetcher;
use crate::runtime::logging::log_extraction;
use crate::types::{DeadlineRecord, DeadlinesRequest, DeadlinesResponse, OfferingsResponse};
use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub fetcher: Arc<dyn Fetcher>,
}

impl AppState {
    pub fn new(config: AppConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/offerings/{course_code}", get(handle_offerings))
        .route("/api/deadlines", post(handle_deadlines))
        .route("/api/course/{course_code}", get(handle_course_deadlines))
        .route("/api/debug/ecp/{*ecp_url}", get(handle_debug_ecp))
        .route("/api/debug/{course_code}", get(handle_debug_course))
        .route("/api/health", get(handle_health))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

impl IntoResponse for DeadlineError {
    fn into_response(self) -> Response {
        let status = match &self {
            DeadlineError::SectionNotFound
            | DeadlineError::CourseNotFound
            | DeadlineError::CourseNotOffered
            | DeadlineError::NoProfileAvailable { .. } => StatusCode::NOT_FOUND,
            DeadlineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DeadlineError::Fetch(_) => StatusCode::BAD_GATEWAY,
            DeadlineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(kind = self.kind(), "[Server] Request failed: {}", self);

        let body = match &self {
            DeadlineError::NoProfileAvailable { course_code } => json!({
                "error": self.to_string(),
                "debug": format!("Try visiting /api/debug/{course_code} to see available links"),
                "suggestion": "The course may not have an ECP published yet, or the HTML structure may have changed",
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

async fn handle_offerings(
    State(state): State<AppState>,
    Path(course_code): Path<String>,
) -> Result<Json<OfferingsResponse>, DeadlineError> {
    let offerings = fetch_offerings(state.fetcher.as_ref(), &state.config, &course_code).await?;
    Ok(Json(OfferingsResponse { offerings }))
}

async fn handle_deadlines(
    State(state): State<AppState>,
    payload: Result<Json<DeadlinesRequest>, JsonRejection>,
) -> Result<Json<DeadlinesResponse>, DeadlineError> {
    let Json(request) =
        payload.map_err(|e| DeadlineError::InvalidRequest(format!("Invalid request body: {e}")))?;
    let ecp_url = request
        .ecp_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| DeadlineError::InvalidRequest("ECP URL is required".to_string()))?;

    let deadlines = deadlines_for_url(&state, &ecp_url).await?;
    Ok(Json(DeadlinesResponse {
        deadlines,
        course_code: request.course_code,
    }))
}

async fn handle_course_deadlines(
    State(state): State<AppState>,
    Path(course_code): Path<String>,
) -> Result<Json<DeadlinesResponse>, DeadlineError> {
    let ecp_url = resolve_profile_url(state.fetcher.as_ref(), &state.config, &course_code).await?;
    let deadlines = deadlines_for_url(&state, &ecp_url).await?;
    Ok(Json(DeadlinesResponse {
        deadlines,
        course_code: Some(course_code),
    }))
}

async fn handle_debug_ecp(
    State(state): State<AppState>,
    Path(ecp_url): Path<String>,
) -> Result<Json<EcpReport>, DeadlineError> {
    let url = if ecp_url.starts_with("http") {
        ecp_url
    } else {
        format!("https://{ecp_url}")
    };
    let page = state
        .fetcher
        .fetch_page(&url)
        .await
        .map_err(DeadlineError::Fetch)?;
    Ok(Json(inspect_ecp(
        &url,
        page.status,
        &page.body,
        &state.config.extraction,
    )))
}

async fn handle_debug_course(
    State(state): State<AppState>,
    Path(course_code): Path<String>,
) -> Result<Json<CourseReport>, DeadlineError> {
    let (url, page) = fetch_listing(state.fetcher.as_ref(), &state.config, &course_code).await?;
    Ok(Json(inspect_course(&course_code, &url, page.status, &page.body)))
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn deadlines_for_url(state: &AppState, ecp_url: &str) -> Result<Vec<DeadlineRecord>, DeadlineError> {
    let html = state
        .fetcher
        .fetch(ecp_url)
        .await
        .map_err(DeadlineError::Fetch)?;
    let extraction = extract_deadlines(&html, &state.config.extraction)?;
    log_extraction(ecp_url, &extraction);
    Ok(extraction.deadlines)
}

/// Lets the browser front end call the API from any origin.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}
