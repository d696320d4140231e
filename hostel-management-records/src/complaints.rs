//! Complaint lifecycle rules shared by the API handlers.
//!
//! Statuses run Open -> In Progress -> Resolved -> Closed, driven by admin
//! updates. The first transition into Resolved stamps who resolved it and
//! when; comments are accepted from either party until the complaint is
//! Closed.

use chrono::{DateTime, Utc};

use crate::error::LedgerError;
use crate::models::{Complaint, ComplaintStatus, ComplaintUpdate, Id};

/// Prepares an admin update for storage: moving into Resolved for the first
/// time records the resolving admin and the timestamp.
#[must_use]
pub fn stamp_resolution(
    mut update: ComplaintUpdate,
    current: &Complaint,
    admin: Id,
    now: DateTime<Utc>,
) -> ComplaintUpdate {
    if update.status == Some(ComplaintStatus::Resolved)
        && current.status != ComplaintStatus::Resolved
    {
        update.resolved_at = Some(now);
        update.resolved_by = Some(admin);
    }
    update
}

/// Closed complaints no longer take comments.
pub fn ensure_commentable(complaint: &Complaint) -> Result<(), LedgerError> {
    if complaint.status == ComplaintStatus::Closed {
        return Err(LedgerError::Conflict(
            "Complaint is closed and no longer accepts comments",
        ));
    }
    Ok(())
}
