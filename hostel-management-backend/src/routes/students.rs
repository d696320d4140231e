use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostel_management_records::models::{Id, NewStudent, ProfileUpdate};
use hostel_management_records::store::{ComplaintFilter, Page, RoomFilter, StudentFilter};
use hostel_management_records::{assignment, LedgerError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::actor::{Actor, Admin};
use crate::error::AppError;
use crate::routes::{data, message, paged, resolve_page};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(new): Json<NewStudent>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if state
        .store
        .student_by_identity(&new.student_id, &new.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Student already exists with this ID or email",
        ));
    }
    let student = state.store.insert_student(new).await?;
    Ok((StatusCode::CREATED, data(student)))
}

#[derive(Deserialize)]
pub struct StudentsQuery {
    search: Option<String>,
    hostel: Option<Id>,
    page: Option<u32>,
    limit: Option<u32>,
}

pub async fn admin_list(
    _admin: Admin,
    State(state): State<AppState>,
    Query(query): Query<StudentsQuery>,
) -> Result<Json<Value>, AppError> {
    let page = resolve_page(query.page, query.limit, state.config.default_page_size);
    let result = state
        .store
        .students(
            StudentFilter {
                search: query.search,
                hostel: query.hostel,
            },
            page,
        )
        .await?;
    Ok(paged(&result, page))
}

/// Soft delete; the student's room slot and hostel occupancy are given back
/// first so the counters stay truthful.
pub async fn admin_remove(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Value>, AppError> {
    state
        .store
        .student(id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::NotFound("Student"))?;
    assignment::unassign_student(state.store.as_ref(), id).await?;
    state.store.set_student_active(id, false).await?;
    Ok(message("Student removed successfully"))
}

#[derive(Deserialize)]
pub struct AssignBody {
    #[serde(rename = "roomId")]
    room_id: Id,
}

pub async fn assign_room(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(body): Json<AssignBody>,
) -> Result<Json<Value>, AppError> {
    assignment::assign_room(state.store.as_ref(), id, body.room_id).await?;
    let student = state
        .store
        .student(id)
        .await?
        .ok_or(LedgerError::NotFound("Student"))?;
    Ok(data(student))
}

pub async fn available_hostels(
    _actor: Actor,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    Ok(data(state.store.available_hostels().await?))
}

pub async fn available_rooms(
    _actor: Actor,
    State(state): State<AppState>,
    Path(hostel): Path<Id>,
) -> Result<Json<Value>, AppError> {
    let rooms = state
        .store
        .rooms(RoomFilter {
            hostel: Some(hostel),
            available_only: true,
        })
        .await?;
    Ok(data(rooms))
}

/// The student's landing view: their profile, the hostel and room they live
/// in, and their three most recent complaints.
pub async fn dashboard(
    actor: Actor,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let student = state
        .store
        .student(actor.id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::NotFound("Student"))?;
    let hostel = match student.hostel {
        Some(id) => state.store.hostel(id).await?,
        None => None,
    };
    let room = match student.room {
        Some(id) => state.store.room(id).await?,
        None => None,
    };
    let recent = state
        .store
        .complaints(
            ComplaintFilter {
                student: Some(actor.id),
                ..ComplaintFilter::default()
            },
            Page {
                page: 1,
                per_page: 3,
            },
        )
        .await?;
    Ok(data(json!({
        "student": student,
        "hostel": hostel,
        "room": room,
        "recentComplaints": recent.items,
    })))
}

pub async fn profile(actor: Actor, State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let student = state
        .store
        .student(actor.id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::NotFound("Student"))?;
    Ok(data(student))
}

pub async fn update_profile(
    actor: Actor,
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Value>, AppError> {
    let student = state
        .store
        .update_student_profile(actor.id, update)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::NotFound("Student"))?;
    Ok(data(student))
}
