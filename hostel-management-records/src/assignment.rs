//! The assignment workflow: moving a student into, between and out of rooms
//! while the ledger counters stay in step with the student's own
//! `hostel`/`room` fields.
//!
//! There is no multi-record transaction here, so the workflow is ordered as
//! a compensating-action sequence: the guarded, refusable steps run first
//! (claim the target slot, raise the target hostel occupancy) and are undone
//! if a later step fails. The trailing steps only free capacity that the
//! student verifiably held, so they cannot be refused by a guard.

use tracing::warn;

use crate::error::LedgerError;
use crate::models::Id;
use crate::store::RecordStore;

/// Assigns `student_id` to `room_id`, transferring between rooms and hostels
/// as needed. Calling it again with the same arguments is a no-op.
pub async fn assign_room(
    store: &dyn RecordStore,
    student_id: Id,
    room_id: Id,
) -> Result<(), LedgerError> {
    let student = store
        .student(student_id)
        .await?
        .filter(|s| s.is_active)
        .ok_or(LedgerError::NotFound("Student or Room"))?;
    let room = store
        .room(room_id)
        .await?
        .filter(|r| r.is_active)
        .ok_or(LedgerError::NotFound("Student or Room"))?;

    if student.room == Some(room.id) {
        return Ok(());
    }

    let hostel_changed = student.hostel != Some(room.hostel_id);

    // Claim first: a full room refuses the transfer before anything about
    // the current assignment has been touched.
    if !store.claim_room_slot(room.id, student.id).await? {
        return Err(LedgerError::Capacity("Room is full"));
    }

    if hostel_changed && !store.adjust_hostel_occupancy(room.hostel_id, 1).await? {
        let _ = store.release_room_slot(room.id, student.id).await;
        return Err(LedgerError::Conflict(
            "Hostel occupancy guard rejected the assignment",
        ));
    }

    if let Err(err) = store
        .set_student_assignment(student.id, Some((room.hostel_id, room.id)))
        .await
    {
        if hostel_changed {
            let _ = store.adjust_hostel_occupancy(room.hostel_id, -1).await;
        }
        let _ = store.release_room_slot(room.id, student.id).await;
        return Err(err.into());
    }

    // The student now holds the new slot; what follows releases the old one.
    if let Some(previous_room) = student.room {
        if !store.release_room_slot(previous_room, student.id).await? {
            warn!(
                student = student.id,
                room = previous_room,
                "previous room did not list the student; counters may have drifted"
            );
        }
    }
    if hostel_changed {
        if let Some(previous_hostel) = student.hostel {
            if !store.adjust_hostel_occupancy(previous_hostel, -1).await? {
                warn!(
                    student = student.id,
                    hostel = previous_hostel,
                    "previous hostel occupancy already at zero"
                );
            }
        }
    }

    Ok(())
}

/// Removes the student's assignment entirely: releases the room slot, lowers
/// the hostel occupancy and clears the student's fields. Invoked when a
/// student is deactivated.
pub async fn unassign_student(store: &dyn RecordStore, student_id: Id) -> Result<(), LedgerError> {
    let student = store
        .student(student_id)
        .await?
        .ok_or(LedgerError::NotFound("Student"))?;

    if let Some(room) = student.room {
        if !store.release_room_slot(room, student.id).await? {
            warn!(
                student = student.id,
                room,
                "room did not list the student; counters may have drifted"
            );
        }
    }
    if let Some(hostel) = student.hostel {
        if !store.adjust_hostel_occupancy(hostel, -1).await? {
            warn!(
                student = student.id,
                hostel, "hostel occupancy already at zero"
            );
        }
    }
    store.set_student_assignment(student.id, None).await?;
    Ok(())
}
