//! HTTP surface for the lead-intake backend.
//!
//! This module exposes a compact Axum router with a handful of endpoints:
//!
//! - `GET /` – Liveness text confirming the backend process is up.
//! - `GET /test` – Store connectivity diagnostic. Always answers 200 so the
//!   endpoint stays usable as a liveness signal even when the database is
//!   down; store failures are reported inside the body instead.
//! - `POST /leads` – Validate a contact-form submission and persist it.
//!   Constraint violations are rejected with field-level detail before any
//!   store access.
//! - `GET /locations` – The fixed service-location reference set.

use crate::config::get_config;
use crate::locations::{LOCATIONS, Location};
use crate::schemas::{LeadSubmission, ValidationError};
use crate::store::{StoreApi, StoreError};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Acknowledgement returned for every accepted lead.
const LEAD_ACK_MESSAGE: &str = "Thanks! We'll reach out shortly.";

/// Number of service-area documents sampled to prove store connectivity.
const DIAGNOSTIC_SAMPLE_LIMIT: u32 = 1;

/// Build the HTTP router exposing the lead-intake API surface.
pub fn create_router<S>(store: Arc<S>) -> Router
where
    S: StoreApi + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/test", get(diagnostic::<S>))
        .route("/leads", post(submit_lead::<S>))
        .route("/locations", get(list_locations))
        .with_state(store)
}

/// Build the CORS layer from the configured frontend origin.
///
/// An unset `FRONTEND_URL` (or the literal `*`) allows any caller. An
/// unparseable configured origin degrades to any-origin with a warning rather
/// than failing startup.
pub fn cors_layer() -> CorsLayer {
    let permissive = || {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    match get_config().frontend_origin.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                tracing::warn!(origin, "FRONTEND_URL is not a valid origin; allowing any");
                permissive()
            }
        },
        None => permissive(),
    }
}

/// Liveness check confirming the backend process is up.
async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Backend is running" }))
}

/// Response body for `GET /test`.
///
/// On store failure only `backend`, `database`, and `connection_status` are
/// present, with the error folded into the status string.
#[derive(Serialize)]
struct DiagnosticResponse {
    backend: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_name: Option<String>,
    connection_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    collections: Option<Vec<String>>,
}

/// Report store connectivity without ever failing the request itself.
///
/// Performs a bounded list against the service-area collection; the names of
/// matched documents double as proof that queries work end to end.
async fn diagnostic<S>(State(store): State<Arc<S>>) -> Json<DiagnosticResponse>
where
    S: StoreApi,
{
    let config = get_config();
    match store.service_area_names(DIAGNOSTIC_SAMPLE_LIMIT).await {
        Ok(names) => Json(DiagnosticResponse {
            backend: "ok",
            database: "mongodb",
            database_url: Some(config.database_url.clone()),
            database_name: Some(config.database_name.clone()),
            connection_status: "connected".to_string(),
            collections: Some(names),
        }),
        Err(err) => {
            tracing::warn!(error = %err, "Store diagnostic failed");
            Json(DiagnosticResponse {
                backend: "ok",
                database: "mongodb",
                database_url: None,
                database_name: None,
                connection_status: format!("error: {err}"),
                collections: None,
            })
        }
    }
}

/// Success response for the `POST /leads` endpoint.
#[derive(Serialize)]
struct LeadResponse {
    /// Store-assigned identifier of the new lead.
    id: String,
    /// Fixed acknowledgement shown to the submitter.
    message: &'static str,
}

/// Validate a contact-form submission and persist it as a new lead.
async fn submit_lead<S>(
    State(store): State<Arc<S>>,
    Json(submission): Json<LeadSubmission>,
) -> Result<Json<LeadResponse>, ApiError>
where
    S: StoreApi,
{
    let lead = submission.validate()?;
    let id = store.create_lead(lead).await?;
    tracing::info!(id = %id, "Lead accepted");

    Ok(Json(LeadResponse {
        id,
        message: LEAD_ACK_MESSAGE,
    }))
}

/// Return the fixed service-location set.
async fn list_locations() -> Json<&'static [Location]> {
    Json(&LOCATIONS[..])
}

enum ApiError {
    Validation(ValidationError),
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": err.errors })),
            )
                .into_response(),
            Self::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(inner: ValidationError) -> Self {
        Self::Validation(inner)
    }
}

impl From<StoreError> for ApiError {
    fn from(inner: StoreError) -> Self {
        Self::Store(inner)
    }
}
