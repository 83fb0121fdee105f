//! HTTP request handlers for the shift earnings API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::Local;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Catalog;
use crate::error::EngineError;
use crate::ledger::{Ledger, StateStore};
use crate::models::{
    PeriodSummary, Shift, ShiftDraft, ShiftPreview, ShiftType, ShiftVariable,
};

use super::request::{ReportQuery, ShiftsQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/preview", post(preview_handler))
        .route("/shifts", get(list_shifts_handler).post(create_shift_handler))
        .route(
            "/shifts/:id",
            get(get_shift_handler)
                .put(update_shift_handler)
                .delete(delete_shift_handler),
        )
        .route("/reports", get(report_handler))
        .route("/catalog", get(catalog_handler))
        .route("/catalog/shift-types", put(upsert_shift_type_handler))
        .route("/catalog/shift-types/:id", delete(remove_shift_type_handler))
        .route("/catalog/variables", put(upsert_variable_handler))
        .route("/catalog/variables/:id", delete(remove_variable_handler))
        .route("/recompute", post(recompute_handler))
        .route(
            "/preferences",
            get(preferences_handler).put(update_preferences_handler),
        )
        .route("/export", get(export_handler))
        .route("/import", post(import_handler))
        .with_state(state)
}

/// Handler for POST /preview.
///
/// Resolves the draft against today's date and returns what saving it would
/// store. Nothing is persisted.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftDraft>, JsonRejection>,
) -> ApiResult<Json<ShiftPreview>> {
    let correlation_id = Uuid::new_v4();
    let draft = parse_body(correlation_id, payload)?;
    let input = draft.resolve(Local::now().date_naive());

    let start_time = Instant::now();
    let preview = state.ledger().read().await.preview(&input);
    info!(
        correlation_id = %correlation_id,
        hours = %preview.hours,
        earnings = %preview.earnings,
        duration_us = start_time.elapsed().as_micros(),
        "Preview computed"
    );
    Ok(Json(preview))
}

/// Handler for GET /shifts[?date=YYYY-MM-DD].
async fn list_shifts_handler(
    State(state): State<AppState>,
    query: Result<Query<ShiftsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Shift>>> {
    let Query(query) = query.map_err(|rejection| {
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;
    let ledger = state.ledger().read().await;
    let shifts: Vec<Shift> = match query.date {
        Some(date) => ledger.shifts_on(date).into_iter().cloned().collect(),
        None => ledger.shifts().to_vec(),
    };
    Ok(Json(shifts))
}

/// Handler for GET /shifts/:id.
async fn get_shift_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Shift>> {
    state
        .ledger()
        .read()
        .await
        .shift(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| EngineError::ShiftNotFound { id }.into())
}

/// Handler for POST /shifts.
async fn create_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Shift>)> {
    let correlation_id = Uuid::new_v4();
    let draft = parse_body(correlation_id, payload)?;
    let shift = save_shift(&state, correlation_id, draft, None).await?;
    Ok((StatusCode::CREATED, Json(shift)))
}

/// Handler for PUT /shifts/:id.
async fn update_shift_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ShiftDraft>, JsonRejection>,
) -> ApiResult<Json<Shift>> {
    let correlation_id = Uuid::new_v4();
    let draft = parse_body(correlation_id, payload)?;
    let shift = save_shift(&state, correlation_id, draft, Some(&id)).await?;
    Ok(Json(shift))
}

async fn save_shift(
    state: &AppState,
    correlation_id: Uuid,
    draft: ShiftDraft,
    editing_id: Option<&str>,
) -> ApiResult<Shift> {
    let input = draft.resolve(Local::now().date_naive());
    let mut ledger = state.ledger().write().await;
    let shift = ledger.save_shift(input, editing_id).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Shift rejected");
        ApiErrorResponse::from(err)
    })?;
    state.persist(&ledger).await?;
    info!(
        correlation_id = %correlation_id,
        shift_id = %shift.id,
        earnings = %shift.total_earnings,
        "Shift saved"
    );
    Ok(shift)
}

/// Handler for DELETE /shifts/:id.
async fn delete_shift_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut ledger = state.ledger().write().await;
    if !ledger.delete_shift(&id) {
        return Err(EngineError::ShiftNotFound { id }.into());
    }
    state.persist(&ledger).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /reports?year=YYYY[&month=M].
async fn report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<PeriodSummary>> {
    let Query(query) = query.map_err(|rejection| {
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;
    let period = query
        .into_period()
        .map_err(|message| ApiErrorResponse::bad_request(ApiError::validation_error(message)))?;

    let summary = state.ledger().read().await.summarize(&period);
    info!(
        period = %period,
        shifts = summary.shift_count,
        total_earnings = %summary.total_earnings,
        "Report generated"
    );
    Ok(Json(summary))
}

/// Handler for GET /catalog.
async fn catalog_handler(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.ledger().read().await.catalog().clone())
}

/// Handler for PUT /catalog/shift-types.
async fn upsert_shift_type_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftType>, JsonRejection>,
) -> ApiResult<Json<Catalog>> {
    let shift_type = parse_body(Uuid::new_v4(), payload)?;
    let mut ledger = state.ledger().write().await;
    ledger.upsert_shift_type(shift_type);
    state.persist(&ledger).await?;
    Ok(Json(ledger.catalog().clone()))
}

/// Handler for DELETE /catalog/shift-types/:id.
async fn remove_shift_type_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut ledger = state.ledger().write().await;
    ledger.remove_shift_type(&id).map_err(|err| {
        let mut response = ApiErrorResponse::from(err);
        response.status = StatusCode::NOT_FOUND;
        response
    })?;
    state.persist(&ledger).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PUT /catalog/variables.
async fn upsert_variable_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftVariable>, JsonRejection>,
) -> ApiResult<Json<Catalog>> {
    let variable = parse_body(Uuid::new_v4(), payload)?;
    let mut ledger = state.ledger().write().await;
    ledger.upsert_variable(variable);
    state.persist(&ledger).await?;
    Ok(Json(ledger.catalog().clone()))
}

/// Handler for DELETE /catalog/variables/:id.
async fn remove_variable_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut ledger = state.ledger().write().await;
    match ledger.remove_variable(&id)? {
        Some(_) => {
            state.persist(&ledger).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new("VARIABLE_NOT_FOUND", format!("Variable not found: {}", id)),
        }),
    }
}

/// Handler for POST /recompute.
async fn recompute_handler(State(state): State<AppState>) -> ApiResult<Response> {
    let mut ledger = state.ledger().write().await;
    let changed = ledger.recompute_all();
    state.persist(&ledger).await?;
    Ok(Json(serde_json::json!({ "changed": changed })).into_response())
}

/// Handler for GET /preferences.
async fn preferences_handler(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, serde_json::Value>> {
    Json(state.ledger().read().await.preferences().clone())
}

/// Handler for PUT /preferences.
///
/// Merges the given keys into the saved preferences. Keys naming the
/// document's own sections are rejected before anything is changed.
async fn update_preferences_handler(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Map<String, serde_json::Value>>, JsonRejection>,
) -> ApiResult<Json<BTreeMap<String, serde_json::Value>>> {
    let updates = parse_body(Uuid::new_v4(), payload)?;
    if let Some(key) = updates.keys().find(|key| Ledger::is_reserved_key(key)) {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            format!("'{}' is not a preference", key),
        )));
    }

    let mut ledger = state.ledger().write().await;
    for (key, value) in updates {
        ledger.set_preference(key, value);
    }
    state.persist(&ledger).await?;
    Ok(Json(ledger.preferences().clone()))
}

/// Handler for GET /export.
///
/// Returns the whole saved document as a downloadable backup.
async fn export_handler(State(state): State<AppState>) -> Response {
    let ledger = state.ledger().read().await;
    let file_name = StateStore::backup_file_name(Local::now().date_naive());
    info!(shifts = ledger.shifts().len(), file = %file_name, "Exported backup");
    (
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )],
        Json(&*ledger),
    )
        .into_response()
}

/// Handler for POST /import.
///
/// Replaces everything saved with the backup in the body.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let correlation_id = Uuid::new_v4();
    let backup = parse_body(correlation_id, payload)?;

    let mut ledger = state.ledger().write().await;
    let imported = Ledger::from_backup(backup, ledger.catalog()).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Backup rejected");
        ApiErrorResponse::from(err)
    })?;
    *ledger = imported;
    state.persist(&ledger).await?;
    info!(
        correlation_id = %correlation_id,
        shifts = ledger.shifts().len(),
        "Backup imported"
    );
    Ok(Json(serde_json::json!({ "shifts": ledger.shifts().len() })))
}

/// Unwraps a JSON body, turning extractor rejections into `400` responses.
fn parse_body<T: DeserializeOwned>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}
