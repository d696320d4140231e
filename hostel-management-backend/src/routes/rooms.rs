use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_management_records::models::{Id, NewRoom, RoomUpdate};
use hostel_management_records::occupancy;
use hostel_management_records::store::RoomFilter;
use serde::Deserialize;
use serde_json::Value;

use crate::actor::Admin;
use crate::error::AppError;
use crate::routes::{data, message};
use crate::AppState;

#[derive(Deserialize)]
pub struct RoomsQuery {
    hostel: Option<Id>,
    available: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RoomsQuery>,
) -> Result<Json<Value>, AppError> {
    let rooms = state
        .store
        .rooms(RoomFilter {
            hostel: query.hostel,
            available_only: query.available.unwrap_or(false),
        })
        .await?;
    Ok(data(rooms))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Value>, AppError> {
    let room = state
        .store
        .room(id)
        .await?
        .filter(|r| r.is_active)
        .ok_or(AppError::NotFound("Room"))?;
    Ok(data(room))
}

pub async fn create(
    _admin: Admin,
    State(state): State<AppState>,
    Json(new): Json<NewRoom>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let room = occupancy::create_room(state.store.as_ref(), new).await?;
    Ok((StatusCode::CREATED, data(room)))
}

pub async fn update(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(update): Json<RoomUpdate>,
) -> Result<Json<Value>, AppError> {
    let room = occupancy::update_room(state.store.as_ref(), id, update).await?;
    Ok(data(room))
}

pub async fn remove(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Value>, AppError> {
    occupancy::delete_room(state.store.as_ref(), id).await?;
    Ok(message("Room deleted successfully"))
}
