//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::domain::NotFoundError;
use crate::render::{render_day, render_home};
use crate::schedule::{DayView, DirectionFilter, build_day_view, build_day_view_for, local_date};

use super::dto::*;
use super::state::AppState;

/// Links in served pages are absolute.
const ROOT: &str = "/";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &std::path::Path) -> Router {
    let mut router = Router::new()
        .route("/", get(home_page))
        .route("/health", get(health))
        .route("/api/day/:date", get(day_api));

    // Published pages are linked with a trailing slash; accept both forms
    for suffix in ["", "/"] {
        router = router
            .route(&format!("/:date{suffix}"), get(day_page))
            .route(&format!("/:date/arrive{suffix}"), get(arrivals_page))
            .route(&format!("/:date/depart{suffix}"), get(departures_page));
    }

    router
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    s.parse::<NaiveDate>().map_err(|_| AppError::BadRequest {
        message: format!("Invalid date: {s} (expected YYYY-MM-DD)"),
    })
}

/// Landing page listing the next `site.days` days.
///
/// "Today" is taken in the first service's timezone, so the listing does
/// not depend on where the server runs.
async fn home_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let document = state.schedule.snapshot().await;
    let zone = document
        .services()
        .next()
        .map_or(Tz::UTC, |service| service.timezone());
    let today = local_date(&Utc::now(), &zone);

    let dates: Vec<NaiveDate> = (0..u64::from(state.site.days))
        .map_while(|offset| today.checked_add_days(Days::new(offset)))
        .collect();

    Ok(Html(render_home(&dates, &state.site, ROOT)?))
}

async fn day_page(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Html<String>, AppError> {
    cached_page(&state, &date, DirectionFilter::Any).await
}

async fn arrivals_page(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Html<String>, AppError> {
    cached_page(&state, &date, DirectionFilter::ArrivalsOnly).await
}

async fn departures_page(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Html<String>, AppError> {
    cached_page(&state, &date, DirectionFilter::DeparturesOnly).await
}

/// Render a day page, or serve it from the cache.
async fn cached_page(
    state: &AppState,
    date: &str,
    direction: DirectionFilter,
) -> Result<Html<String>, AppError> {
    let date = parse_date(date)?;
    let (generation, document) = state.schedule.versioned().await;
    let key = (generation, date, direction, state.site.use_12h);

    if let Some(page) = state.pages.get(&key).await {
        return Ok(Html(String::clone(&page)));
    }

    let view = build_day_view(&document, date, direction, &state.site.home);
    let page = Arc::new(render_day(&view, &state.site, ROOT)?);
    state.pages.insert(key, Arc::clone(&page)).await;
    debug!(%date, %direction, "rendered page");

    Ok(Html(String::clone(&page)))
}

/// Day view as JSON.
async fn day_api(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let direction = query
        .direction
        .as_deref()
        .unwrap_or_default()
        .parse::<DirectionFilter>()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    let document = state.schedule.snapshot().await;
    let home = &state.site.home;
    let view = match query.service_ids() {
        Some(ids) if !ids.is_empty() => build_day_view_for(&document, &ids, date, direction, home)?,
        _ => build_day_view(&document, date, direction, home),
    };

    Ok(Json(view))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<NotFoundError> for AppError {
    fn from(e: NotFoundError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
