//! HTTP surface of the proxy.
//!
//! All responses carry permissive CORS headers. Handler failures become a
//! 500 with a JSON error body; anything unrouted is a plain-text 404.

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{debug, info};
use wbproxy_core::catalog;
use wbproxy_core::models::{ComparisonRequest, ComparisonResult, Country, IndicatorCatalog, Series};

use crate::error::AppError;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/countries", get(countries_handler).fallback(not_found_handler))
        .route("/api/indicators", get(indicators_handler).fallback(not_found_handler))
        .route(
            "/api/data/:country/:indicator",
            get(series_handler).fallback(not_found_handler),
        )
        .route("/api/compare", post(compare_handler).fallback(not_found_handler))
        .route("/api/health", get(health_handler).fallback(not_found_handler))
        .route("/api/cache/clear", post(clear_cache_handler).fallback(not_found_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

fn put_cors_headers(headers: &mut HeaderMap) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}

fn preflight_response() -> Response {
    let mut resp = StatusCode::OK.into_response();
    put_cors_headers(resp.headers_mut());
    resp
}

async fn cors_middleware(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return preflight_response();
    }

    let mut resp = next.run(req).await;
    put_cors_headers(resp.headers_mut());
    resp
}

async fn not_found_handler(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight_response();
    }
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

async fn countries_handler(State(state): State<AppState>) -> Result<Json<Vec<Country>>, AppError> {
    let countries = state.client.fetch_catalog().await?;
    Ok(Json(countries))
}

async fn indicators_handler() -> Json<IndicatorCatalog> {
    Json(catalog::indicators())
}

async fn series_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Series>, AppError> {
    // Undecodable segments fail like any other handler error
    let Path((country, indicator)) =
        path.map_err(|e| anyhow::anyhow!("Invalid series path: {}", e.body_text()))?;
    let series = state.client.fetch_series(&country, &indicator).await?;
    Ok(Json(series))
}

async fn compare_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ComparisonResult>, AppError> {
    // Parsed by hand so a bad body is a 500 like every other handler failure
    let request: ComparisonRequest =
        serde_json::from_slice(&body).context("Invalid comparison request")?;
    debug!(countries = request.countries.len(), indicator = %request.indicator, "Comparison requested");

    let result = state
        .aggregator
        .compare(&request.countries, &request.indicator)
        .await;
    Ok(Json(result))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn clear_cache_handler(State(state): State<AppState>) -> Json<Value> {
    let cleared = state.cache.clear();
    info!(entries = cleared, "Cache cleared on request");
    Json(json!({ "cleared": cleared }))
}
