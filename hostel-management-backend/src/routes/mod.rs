//! Handlers grouped the way the URL space is grouped. Every response uses
//! the `{ "success": bool, ... }` envelope; paginated listings add
//! `count`/`total`/`totalPages`/`currentPage` alongside `data`.

pub mod complaints;
pub mod dashboard;
pub mod hostels;
pub mod rooms;
pub mod students;

use axum::Json;
use hostel_management_records::store::{Page, Paged};
use serde::Serialize;
use serde_json::{json, Value};

pub(crate) fn data<T: Serialize>(value: T) -> Json<Value> {
    Json(json!({ "success": true, "data": value }))
}

pub(crate) fn message(text: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": text }))
}

pub(crate) fn paged<T: Serialize>(result: &Paged<T>, page: Page) -> Json<Value> {
    Json(json!({
        "success": true,
        "count": result.items.len(),
        "total": result.total,
        "totalPages": result.total_pages(page.per_page),
        "currentPage": page.page,
        "data": result.items,
    }))
}

/// Turns optional `?page=&limit=` query values into a [`Page`], falling back
/// to the configured default page size.
pub(crate) fn resolve_page(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Page {
    Page {
        page: page.unwrap_or(1).max(1),
        per_page: limit.unwrap_or(default_limit).max(1),
    }
}
