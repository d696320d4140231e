use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hostel_management_records::complaints;
use hostel_management_records::models::{
    ActorRole, Comment, ComplaintCategory, ComplaintPriority, ComplaintStatus, ComplaintUpdate,
    Id, NewComplaint,
};
use hostel_management_records::store::ComplaintFilter;
use serde::Deserialize;
use serde_json::Value;

use crate::actor::{Actor, Admin};
use crate::error::AppError;
use crate::routes::{data, paged, resolve_page};
use crate::AppState;

#[derive(Deserialize)]
pub struct ComplaintsQuery {
    status: Option<ComplaintStatus>,
    category: Option<ComplaintCategory>,
    priority: Option<ComplaintPriority>,
    page: Option<u32>,
    limit: Option<u32>,
}

/// Students only ever see their own complaints; admins see everything.
pub async fn list(
    actor: Actor,
    State(state): State<AppState>,
    Query(query): Query<ComplaintsQuery>,
) -> Result<Json<Value>, AppError> {
    let student = (actor.role == ActorRole::Student).then_some(actor.id);
    let page = resolve_page(query.page, query.limit, state.config.default_page_size);
    let result = state
        .store
        .complaints(
            ComplaintFilter {
                student,
                status: query.status,
                category: query.category,
                priority: query.priority,
            },
            page,
        )
        .await?;
    Ok(paged(&result, page))
}

pub async fn detail(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<Value>, AppError> {
    let complaint = state
        .store
        .complaint(id)
        .await?
        .ok_or(AppError::NotFound("Complaint"))?;
    actor.ensure_can_access_student(complaint.student)?;
    Ok(data(complaint))
}

/// Filed on the caller's own behalf; the body never names the student.
#[derive(Deserialize)]
pub struct ComplaintBody {
    subject: String,
    description: String,
    category: ComplaintCategory,
    #[serde(default)]
    priority: ComplaintPriority,
}

pub async fn create(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<ComplaintBody>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let complaint = state
        .store
        .insert_complaint(NewComplaint {
            student: actor.id,
            subject: body.subject,
            description: body.description,
            category: body.category,
            priority: body.priority,
        })
        .await?;
    Ok((StatusCode::CREATED, data(complaint)))
}

pub async fn update(
    admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(update): Json<ComplaintUpdate>,
) -> Result<Json<Value>, AppError> {
    let current = state
        .store
        .complaint(id)
        .await?
        .ok_or(AppError::NotFound("Complaint"))?;
    let update = complaints::stamp_resolution(update, &current, admin.0.id, Utc::now());
    let complaint = state
        .store
        .update_complaint(id, update)
        .await?
        .ok_or(AppError::NotFound("Complaint"))?;
    Ok(data(complaint))
}

#[derive(Deserialize)]
pub struct CommentBody {
    message: String,
}

pub async fn comment(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(body): Json<CommentBody>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let complaint = state
        .store
        .complaint(id)
        .await?
        .ok_or(AppError::NotFound("Complaint"))?;
    actor.ensure_can_access_student(complaint.student)?;
    complaints::ensure_commentable(&complaint)?;
    let complaint = state
        .store
        .add_complaint_comment(
            id,
            Comment {
                author: actor.id,
                role: actor.role,
                message: body.message,
                created_at: Utc::now(),
            },
        )
        .await?
        .ok_or(AppError::NotFound("Complaint"))?;
    Ok((StatusCode::CREATED, data(complaint)))
}
