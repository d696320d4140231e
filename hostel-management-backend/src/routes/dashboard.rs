use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::actor::Admin;
use crate::error::AppError;
use crate::routes::data;
use crate::AppState;

pub async fn overview(
    _admin: Admin,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let counts = state.store.dashboard_counts().await?;
    let recent = state.store.recent_complaints(5).await?;
    let hostels = state.store.hostels().await?;
    Ok(data(json!({
        "counts": counts,
        "recentComplaints": recent,
        "hostels": hostels,
    })))
}
