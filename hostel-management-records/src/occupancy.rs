//! The occupancy ledger.
//!
//! `Hostel.total_rooms`, `Hostel.total_capacity` and both `current_occupancy`
//! counters are denormalized caches of the room and assignment facts. Every
//! mutation of those counters goes through the operations here; nothing else
//! in the workspace is allowed to touch them. Each operation checks its
//! guard before acting and leaves state untouched on failure.

use tracing::info;

use crate::error::LedgerError;
use crate::models::{Hostel, HostelUpdate, Id, NewHostel, NewRoom, Room, RoomUpdate};
use crate::store::RecordStore;

/// Hostel creation has no counters to reconcile; both aggregates start at
/// zero and grow as rooms are added.
pub async fn create_hostel(
    store: &dyn RecordStore,
    new: NewHostel,
) -> Result<Hostel, LedgerError> {
    if store.hostel_by_name(&new.name).await?.is_some() {
        return Err(LedgerError::Conflict("Hostel name already in use"));
    }
    Ok(store.insert_hostel(new).await?)
}

/// Renames are refused when another hostel already carries the name.
pub async fn update_hostel(
    store: &dyn RecordStore,
    id: Id,
    update: HostelUpdate,
) -> Result<Hostel, LedgerError> {
    if let Some(name) = &update.name {
        if store.hostel_by_name(name).await?.is_some_and(|h| h.id != id) {
            return Err(LedgerError::Conflict("Hostel name already in use"));
        }
    }
    store
        .update_hostel(id, update)
        .await?
        .filter(|h| h.is_active)
        .ok_or(LedgerError::NotFound("hostel"))
}

/// Deletion is soft and only allowed once every room of the hostel is gone.
pub async fn delete_hostel(store: &dyn RecordStore, id: Id) -> Result<(), LedgerError> {
    let hostel = store
        .hostel(id)
        .await?
        .filter(|h| h.is_active)
        .ok_or(LedgerError::NotFound("hostel"))?;
    if store.active_room_count(hostel.id).await? > 0 {
        return Err(LedgerError::Capacity(
            "Cannot delete hostel with active rooms. Please delete all rooms first.",
        ));
    }
    store.set_hostel_active(hostel.id, false).await?;
    info!(hostel = hostel.id, "hostel retired");
    Ok(())
}

/// Creates the room and rolls `(+1 room, +capacity)` into the owning
/// hostel's usage counters.
pub async fn create_room(store: &dyn RecordStore, new: NewRoom) -> Result<Room, LedgerError> {
    let hostel = store
        .hostel(new.hostel_id)
        .await?
        .filter(|h| h.is_active)
        .ok_or(LedgerError::NotFound("hostel"))?;
    if store
        .room_by_number(hostel.id, &new.room_number)
        .await?
        .is_some()
    {
        return Err(LedgerError::Conflict(
            "Room number already in use in this hostel",
        ));
    }
    let room = store.insert_room(new).await?;
    if !store
        .adjust_hostel_usage(hostel.id, 1, room.kind.capacity())
        .await?
    {
        return Err(LedgerError::Conflict("hostel usage update rejected"));
    }
    info!(room = room.id, hostel = hostel.id, "room added");
    Ok(room)
}

/// Applies a room update; a kind change moves `new - old` beds through the
/// hostel's `total_capacity`, and is refused while the room holds more
/// students than the new kind can sleep.
pub async fn update_room(
    store: &dyn RecordStore,
    id: Id,
    update: RoomUpdate,
) -> Result<Room, LedgerError> {
    let room = store
        .room(id)
        .await?
        .filter(|r| r.is_active)
        .ok_or(LedgerError::NotFound("room"))?;
    if let Some(number) = &update.room_number {
        if *number != room.room_number
            && store.room_by_number(room.hostel_id, number).await?.is_some()
        {
            return Err(LedgerError::Conflict(
                "Room number already in use in this hostel",
            ));
        }
    }
    let capacity_delta = match update.kind {
        Some(kind) => {
            if room.current_occupancy > kind.capacity() {
                return Err(LedgerError::Capacity(
                    "Room holds more students than the new type allows.",
                ));
            }
            kind.capacity() - room.capacity
        }
        None => 0,
    };
    let updated = store
        .update_room(id, update)
        .await?
        .ok_or(LedgerError::NotFound("room"))?;
    if capacity_delta != 0
        && !store
            .adjust_hostel_usage(room.hostel_id, 0, capacity_delta)
            .await?
    {
        return Err(LedgerError::Conflict("hostel usage update rejected"));
    }
    Ok(updated)
}

/// Soft-deletes an empty room and gives its beds back to the hostel
/// aggregates. Occupied rooms are refused; reassign the students first.
pub async fn delete_room(store: &dyn RecordStore, id: Id) -> Result<(), LedgerError> {
    let room = store
        .room(id)
        .await?
        .filter(|r| r.is_active)
        .ok_or(LedgerError::NotFound("room"))?;
    if room.current_occupancy > 0 {
        return Err(LedgerError::Capacity(
            "Cannot delete room with students. Please reassign students first.",
        ));
    }
    store.set_room_active(room.id, false).await?;
    if !store
        .adjust_hostel_usage(room.hostel_id, -1, -room.capacity)
        .await?
    {
        return Err(LedgerError::Conflict("hostel usage update rejected"));
    }
    info!(room = room.id, hostel = room.hostel_id, "room retired");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::{HostelKind, RoomKind};

    fn new_hostel(name: &str) -> NewHostel {
        NewHostel {
            name: name.into(),
            kind: HostelKind::Girls,
            address: "2 College Rd".into(),
        }
    }

    fn new_room(hostel: Id, number: &str, kind: RoomKind) -> NewRoom {
        NewRoom {
            hostel_id: hostel,
            room_number: number.into(),
            kind,
            floor: 2,
            monthly_rent: 5000,
        }
    }

    #[tokio::test]
    async fn room_creation_feeds_the_hostel_aggregates() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, new_hostel("East")).await.unwrap();
        create_room(&store, new_room(hostel.id, "201", RoomKind::Triple))
            .await
            .unwrap();
        create_room(&store, new_room(hostel.id, "202", RoomKind::Single))
            .await
            .unwrap();

        let hostel = store.hostel(hostel.id).await.unwrap().unwrap();
        assert_eq!(hostel.total_rooms, 2);
        assert_eq!(hostel.total_capacity, 4);
    }

    #[tokio::test]
    async fn room_creation_needs_an_active_hostel() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, new_hostel("East")).await.unwrap();
        store.set_hostel_active(hostel.id, false).await.unwrap();

        let err = create_room(&store, new_room(hostel.id, "201", RoomKind::Single))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[tokio::test]
    async fn hostel_names_stay_unique_across_create_and_rename() {
        let store = MemoryStore::new();
        let east = create_hostel(&store, new_hostel("East")).await.unwrap();
        create_hostel(&store, new_hostel("West")).await.unwrap();

        let err = create_hostel(&store, new_hostel("West")).await.unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));

        let err = update_hostel(
            &store,
            east.id,
            HostelUpdate {
                name: Some("West".into()),
                ..HostelUpdate::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));
        assert_eq!(store.hostel(east.id).await.unwrap().unwrap().name, "East");
    }

    #[tokio::test]
    async fn room_numbers_stay_unique_within_a_hostel() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, new_hostel("East")).await.unwrap();
        create_room(&store, new_room(hostel.id, "201", RoomKind::Single))
            .await
            .unwrap();
        let room = create_room(&store, new_room(hostel.id, "202", RoomKind::Single))
            .await
            .unwrap();

        let err = create_room(&store, new_room(hostel.id, "201", RoomKind::Double))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));

        let err = update_room(
            &store,
            room.id,
            RoomUpdate {
                room_number: Some("201".into()),
                ..RoomUpdate::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));
        assert_eq!(
            store.room(room.id).await.unwrap().unwrap().room_number,
            "202"
        );
    }

    #[tokio::test]
    async fn kind_change_moves_the_capacity_delta() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, new_hostel("East")).await.unwrap();
        let room = create_room(&store, new_room(hostel.id, "201", RoomKind::Double))
            .await
            .unwrap();

        let updated = update_room(
            &store,
            room.id,
            RoomUpdate {
                kind: Some(RoomKind::Quadruple),
                ..RoomUpdate::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.capacity, 4);

        let hostel = store.hostel(hostel.id).await.unwrap().unwrap();
        assert_eq!(hostel.total_capacity, 4);
        assert_eq!(hostel.total_rooms, 1);
    }

    #[tokio::test]
    async fn shrinking_below_occupancy_is_refused() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, new_hostel("East")).await.unwrap();
        let room = create_room(&store, new_room(hostel.id, "201", RoomKind::Double))
            .await
            .unwrap();
        store.claim_room_slot(room.id, 41).await.unwrap();
        store.claim_room_slot(room.id, 42).await.unwrap();

        let err = update_room(
            &store,
            room.id,
            RoomUpdate {
                kind: Some(RoomKind::Single),
                ..RoomUpdate::default()
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_capacity());

        let hostel = store.hostel(hostel.id).await.unwrap().unwrap();
        assert_eq!(hostel.total_capacity, 2);
    }

    #[tokio::test]
    async fn occupied_rooms_cannot_be_deleted() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, new_hostel("East")).await.unwrap();
        let room = create_room(&store, new_room(hostel.id, "201", RoomKind::Single))
            .await
            .unwrap();
        store.claim_room_slot(room.id, 41).await.unwrap();

        let err = delete_room(&store, room.id).await.unwrap_err();
        assert!(err.is_capacity());

        let room = store.room(room.id).await.unwrap().unwrap();
        assert!(room.is_active);
    }

    #[tokio::test]
    async fn room_deletion_returns_the_beds() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, new_hostel("East")).await.unwrap();
        let room = create_room(&store, new_room(hostel.id, "201", RoomKind::Triple))
            .await
            .unwrap();

        delete_room(&store, room.id).await.unwrap();

        let hostel = store.hostel(hostel.id).await.unwrap().unwrap();
        assert_eq!(hostel.total_rooms, 0);
        assert_eq!(hostel.total_capacity, 0);
        assert!(!store.room(room.id).await.unwrap().unwrap().is_active);
    }

    #[tokio::test]
    async fn hostel_deletion_waits_for_its_rooms() {
        let store = MemoryStore::new();
        let hostel = create_hostel(&store, new_hostel("East")).await.unwrap();
        let room = create_room(&store, new_room(hostel.id, "201", RoomKind::Single))
            .await
            .unwrap();

        let err = delete_hostel(&store, hostel.id).await.unwrap_err();
        assert!(err.is_capacity());
        assert!(store.hostel(hostel.id).await.unwrap().unwrap().is_active);

        delete_room(&store, room.id).await.unwrap();
        delete_hostel(&store, hostel.id).await.unwrap();
        assert!(!store.hostel(hostel.id).await.unwrap().unwrap().is_active);
    }
}
