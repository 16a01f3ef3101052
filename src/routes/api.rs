// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{SearchEntry, UserDocument, Vehicle, VehicleInput, VehicleSnapshot, VideoResult};
use crate::services::{MechanicMessage, VideoDetails};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile))
        .route("/api/profile/mechanic-email", put(update_mechanic_email))
        .route("/api/profile/display-name", put(update_display_name))
        .route("/api/vehicles", get(list_vehicles).post(add_vehicle))
        .route(
            "/api/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/api/history", get(list_history).delete(clear_history))
        .route(
            "/api/history/{id}",
            get(get_history_entry).delete(delete_history_entry),
        )
        .route(
            "/api/history/{id}/videos/{video_id}/rating",
            post(rate_video),
        )
        .route(
            "/api/history/{id}/mechanic-message",
            get(get_mechanic_message),
        )
        .route("/api/search", get(search_videos).post(search_and_save))
        .route("/api/videos/{id}", get(get_video_details))
}

/// Run `validator` checks, reporting failures as a bad request.
fn validated<T: Validate>(input: T) -> Result<T> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(input)
}

/// Response for delete endpoints.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteResponse {
    pub deleted: bool,
}

// ─── User Profile ────────────────────────────────────────────

/// Get the current user's document, creating it on first access.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserDocument>> {
    let doc = state
        .profiles
        .get_profile(Some(&user.identity()))
        .await?
        .ok_or(AppError::NotAuthenticated)?;
    Ok(Json(doc))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct MechanicEmailRequest {
    #[validate(email, length(max = 254))]
    mechanic_email: String,
}

async fn update_mechanic_email(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<MechanicEmailRequest>,
) -> Result<StatusCode> {
    let body = validated(body)?;
    state
        .profiles
        .update_mechanic_email(&user.identity(), &body.mechanic_email)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct DisplayNameRequest {
    #[validate(length(max = 100))]
    display_name: String,
}

async fn update_display_name(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<DisplayNameRequest>,
) -> Result<StatusCode> {
    let body = validated(body)?;
    state
        .profiles
        .update_display_name(&user.identity(), &body.display_name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Vehicles ────────────────────────────────────────────────

async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Vehicle>>> {
    Ok(Json(state.vehicles.list(&user.identity()).await?))
}

async fn add_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<VehicleInput>,
) -> Result<(StatusCode, Json<Vehicle>)> {
    let input = validated(input)?;
    let vehicle = state.vehicles.add(&user.identity(), input).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>> {
    Ok(Json(state.vehicles.get(&user.identity(), &id).await?))
}

/// Replace year/make/model of a saved vehicle. The path id wins.
async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>> {
    let input = validated(input)?;
    let replacement = Vehicle {
        id,
        ..Vehicle::new(input)
    };
    Ok(Json(
        state.vehicles.update(&user.identity(), &replacement).await?,
    ))
}

async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.vehicles.delete(&user.identity(), &id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

// ─── Search History ──────────────────────────────────────────

/// History, newest first.
async fn list_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<SearchEntry>>> {
    Ok(Json(state.history.list(&user.identity()).await?))
}

async fn clear_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode> {
    state.history.clear(&user.identity()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_history_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SearchEntry>> {
    Ok(Json(state.history.get(&user.identity(), &id).await?))
}

async fn delete_history_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.history.delete(&user.identity(), &id).await?;
    Ok(Json(DeleteResponse { deleted }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingRequest {
    is_helpful: bool,
}

async fn rate_video(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((search_id, video_id)): Path<(String, String)>,
    Json(body): Json<RatingRequest>,
) -> Result<Json<VideoResult>> {
    let rated = state
        .history
        .rate_video(&user.identity(), &search_id, &video_id, body.is_helpful)
        .await?;
    Ok(Json(rated))
}

/// Pre-filled message to the user's mechanic about one past search.
async fn get_mechanic_message(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MechanicMessage>> {
    let identity = user.identity();
    let entry = state.history.get(&identity, &id).await?;
    let profile = state
        .profiles
        .get_profile(Some(&identity))
        .await?
        .ok_or(AppError::NotAuthenticated)?;

    Ok(Json(MechanicMessage::compose(
        &profile.mechanic_email,
        &entry.vehicle,
        &entry.code,
        &entry.results,
    )?))
}

// ─── Search ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    make: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    code: String,
}

/// Search without recording history.
async fn search_videos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<VideoResult>>> {
    let results = state
        .search
        .search_repair_videos(&params.make, &params.model, &params.year, &params.code)
        .await?;
    Ok(Json(results))
}

/// Search for a saved vehicle (by id) or an inline one, and record it.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    vehicle_id: Option<String>,
    #[validate(nested)]
    vehicle: Option<VehicleInput>,
    #[validate(length(max = 20))]
    code: String,
}

async fn search_and_save(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SearchRequest>,
) -> Result<(StatusCode, Json<SearchEntry>)> {
    let body = validated(body)?;
    let identity = user.identity();

    let snapshot = match (body.vehicle_id, body.vehicle) {
        (Some(vehicle_id), _) => {
            VehicleSnapshot::from(&state.vehicles.get(&identity, &vehicle_id).await?)
        }
        (None, Some(vehicle)) => VehicleSnapshot::from(vehicle),
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either vehicleId or vehicle is required".to_string(),
            ))
        }
    };

    let entry = state
        .search
        .search_and_save(&identity, snapshot, &body.code)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Videos ──────────────────────────────────────────────────

async fn get_video_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VideoDetails>> {
    Ok(Json(state.search.index().video_details(&id).await?))
}
