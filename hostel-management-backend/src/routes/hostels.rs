use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_management_records::models::{HostelUpdate, Id, NewHostel};
use hostel_management_records::occupancy;
use hostel_management_records::store::RoomFilter;
use serde_json::{json, Value};

use crate::actor::Admin;
use crate::error::AppError;
use crate::routes::{data, message};
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(data(state.store.hostels().await?))
}

/// The hostel together with its active rooms.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Value>, AppError> {
    let hostel = state
        .store
        .hostel(id)
        .await?
        .filter(|h| h.is_active)
        .ok_or(AppError::NotFound("Hostel"))?;
    let rooms = state
        .store
        .rooms(RoomFilter {
            hostel: Some(id),
            available_only: false,
        })
        .await?;
    Ok(data(json!({ "hostel": hostel, "rooms": rooms })))
}

pub async fn create(
    _admin: Admin,
    State(state): State<AppState>,
    Json(new): Json<NewHostel>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let hostel = occupancy::create_hostel(state.store.as_ref(), new).await?;
    Ok((StatusCode::CREATED, data(hostel)))
}

pub async fn update(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(update): Json<HostelUpdate>,
) -> Result<Json<Value>, AppError> {
    let hostel = occupancy::update_hostel(state.store.as_ref(), id, update).await?;
    Ok(data(hostel))
}

pub async fn remove(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Value>, AppError> {
    occupancy::delete_hostel(state.store.as_ref(), id).await?;
    Ok(message("Hostel deleted successfully"))
}
