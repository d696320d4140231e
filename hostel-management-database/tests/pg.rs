//! Runs against a real, migrated Postgres: set DATABASE_URL and invoke
//! `cargo test -p hostel-management-database -- --ignored`.

use chrono::Utc;
use hostel_management_database::{get_database_connection_from_env, PgStore};
use hostel_management_records::models::{HostelKind, NewHostel, NewRoom, NewStudent, RoomKind};
use hostel_management_records::RecordStore;

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Utc::now().timestamp_nanos_opt().unwrap_or(0))
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at a migrated database"]
async fn claim_respects_capacity_and_release_undoes_it() {
    let pool = get_database_connection_from_env().expect("pool");
    let store = PgStore::new(pool);

    let hostel = store
        .insert_hostel(NewHostel {
            name: unique("pg-test"),
            kind: HostelKind::Boys,
            address: "integration".into(),
        })
        .await
        .expect("hostel");
    let room = store
        .insert_room(NewRoom {
            hostel_id: hostel.id,
            room_number: unique("r"),
            kind: RoomKind::Single,
            floor: 1,
            monthly_rent: 1,
        })
        .await
        .expect("room");
    let suffix = unique("s");
    let first = store
        .insert_student(NewStudent {
            student_id: suffix.clone(),
            name: "First".into(),
            email: format!("{suffix}-a@example.edu"),
            phone: "1".into(),
            course: "None".into(),
            year: 1,
            gender: hostel_management_records::models::Gender::Other,
        })
        .await
        .expect("student");

    assert!(store.claim_room_slot(room.id, first.id).await.expect("claim"));
    // single room, already full
    assert!(!store.claim_room_slot(room.id, first.id + 1).await.expect("claim"));
    let reloaded = store.room(room.id).await.expect("room").expect("exists");
    assert_eq!(reloaded.current_occupancy, 1);
    assert_eq!(reloaded.students, vec![first.id]);

    assert!(store
        .release_room_slot(room.id, first.id)
        .await
        .expect("release"));
    assert!(!store
        .release_room_slot(room.id, first.id)
        .await
        .expect("release"));
    let reloaded = store.room(room.id).await.expect("room").expect("exists");
    assert_eq!(reloaded.current_occupancy, 0);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at a migrated database"]
async fn hostel_usage_guards_refuse_going_negative() {
    let pool = get_database_connection_from_env().expect("pool");
    let store = PgStore::new(pool);

    let hostel = store
        .insert_hostel(NewHostel {
            name: unique("pg-test"),
            kind: HostelKind::Girls,
            address: "integration".into(),
        })
        .await
        .expect("hostel");

    assert!(store
        .adjust_hostel_usage(hostel.id, 1, 2)
        .await
        .expect("usage"));
    assert!(!store
        .adjust_hostel_usage(hostel.id, -2, 0)
        .await
        .expect("usage"));
    assert!(!store
        .adjust_hostel_occupancy(hostel.id, 3)
        .await
        .expect("occupancy"));
    assert!(store
        .adjust_hostel_occupancy(hostel.id, 2)
        .await
        .expect("occupancy"));
}
