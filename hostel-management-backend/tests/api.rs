//! End-to-end exercises of the router against the in-memory store: the
//! response envelope, the role gating and the HTTP status mapping of the
//! ledger's error taxonomy.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use hostel_management_backend::{build_router, AppState};
use hostel_management_config::Config;
use hostel_management_records::memory::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    build_router(AppState {
        store: Arc::new(MemoryStore::new()),
        config: Config::default(),
    })
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    actor: Option<(i32, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some((id, role)) = actor {
        request = request
            .header("x-actor-id", id.to_string())
            .header("x-actor-role", role);
    }
    let request = match body {
        Some(value) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

const ADMIN: Option<(i32, &str)> = Some((1000, "admin"));

async fn create_hostel(app: &Router, name: &str) -> i32 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/hostels",
        ADMIN,
        Some(json!({ "name": name, "type": "Boys", "address": "1 College Rd" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap() as i32
}

async fn create_room(app: &Router, hostel: i32, number: &str, kind: &str) -> i32 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/rooms",
        ADMIN,
        Some(json!({
            "hostelId": hostel,
            "roomNumber": number,
            "type": kind,
            "floor": 1,
            "monthlyRent": 4500,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap() as i32
}

async fn register_student(app: &Router, student_id: &str) -> i32 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/students/register",
        None,
        Some(json!({
            "studentId": student_id,
            "name": "Asha Rao",
            "email": format!("{student_id}@example.edu"),
            "phone": "555-0100",
            "course": "Physics",
            "year": 2,
            "gender": "Female",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap() as i32
}

async fn assign(app: &Router, student: i32, room: i32) -> (StatusCode, Value) {
    send(
        app,
        Method::PUT,
        &format!("/api/admin/students/{student}/assign-room"),
        ADMIN,
        Some(json!({ "roomId": room })),
    )
    .await
}

#[tokio::test]
async fn assignment_updates_room_and_hostel_counters() {
    let app = router();
    let hostel = create_hostel(&app, "North Wing").await;
    let room = create_room(&app, hostel, "101", "Double").await;
    let student = register_student(&app, "S-100").await;

    let (status, body) = assign(&app, student, room).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["room"], json!(room));
    assert_eq!(body["data"]["hostel"], json!(hostel));

    let (_, body) = send(&app, Method::GET, &format!("/api/rooms/{room}"), None, None).await;
    assert_eq!(body["data"]["currentOccupancy"], json!(1));
    assert_eq!(body["data"]["students"], json!([student]));

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/hostels/{hostel}"),
        None,
        None,
    )
    .await;
    assert_eq!(body["data"]["hostel"]["currentOccupancy"], json!(1));
    assert_eq!(body["data"]["hostel"]["totalCapacity"], json!(2));
    assert_eq!(body["data"]["hostel"]["totalRooms"], json!(1));
}

#[tokio::test]
async fn full_room_is_a_bad_request_and_leaves_counters_alone() {
    let app = router();
    let hostel = create_hostel(&app, "North Wing").await;
    let room = create_room(&app, hostel, "101", "Single").await;
    let first = register_student(&app, "S-100").await;
    let second = register_student(&app, "S-200").await;

    let (status, _) = assign(&app, first, room).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = assign(&app, second, room).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Room is full"));

    let (_, body) = send(&app, Method::GET, &format!("/api/rooms/{room}"), None, None).await;
    assert_eq!(body["data"]["currentOccupancy"], json!(1));
}

#[tokio::test]
async fn assigning_a_missing_room_is_not_found() {
    let app = router();
    let student = register_student(&app, "S-100").await;
    let (status, body) = assign(&app, student, 999).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn occupied_room_and_nonempty_hostel_refuse_deletion() {
    let app = router();
    let hostel = create_hostel(&app, "North Wing").await;
    let room = create_room(&app, hostel, "101", "Double").await;
    let student = register_student(&app, "S-100").await;
    let (status, _) = assign(&app, student, room).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/rooms/{room}"),
        ADMIN,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/hostels/{hostel}"),
        ADMIN,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // once the student is gone both deletions go through
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/admin/students/{student}"),
        ADMIN,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/rooms/{room}"),
        ADMIN,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/hostels/{hostel}"),
        ADMIN,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_routes_reject_students_and_anonymous_callers() {
    let app = router();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/hostels",
        Some((5, "student")),
        Some(json!({ "name": "X", "type": "Boys", "address": "Y" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/api/admin/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn student_listing_is_paginated() {
    let app = router();
    for i in 0..3 {
        register_student(&app, &format!("S-{i}")).await;
    }
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/admin/students?page=1&limit=2",
        ADMIN,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["total"], json!(3));
    assert_eq!(body["totalPages"], json!(2));
    assert_eq!(body["currentPage"], json!(1));
}

#[tokio::test]
async fn complaint_lifecycle_stamps_resolution_and_closes_to_comments() {
    let app = router();
    let student = register_student(&app, "S-100").await;
    let student_actor = Some((student, "student"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/complaints",
        student_actor,
        Some(json!({
            "subject": "No hot water",
            "description": "Second floor showers",
            "category": "Maintenance",
            "priority": "High",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let complaint = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], json!("Open"));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/complaints/{complaint}"),
        ADMIN,
        Some(json!({ "status": "Resolved", "resolution": "Boiler replaced" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["resolvedBy"], json!(1000));
    assert!(body["data"]["resolvedAt"].is_string());

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/complaints/{complaint}"),
        ADMIN,
        Some(json!({ "status": "Closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/complaints/{complaint}/comments"),
        student_actor,
        Some(json!({ "message": "Thanks!" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        json!("Complaint is closed and no longer accepts comments")
    );
}

#[tokio::test]
async fn students_cannot_read_each_others_complaints() {
    let app = router();
    let first = register_student(&app, "S-100").await;
    let second = register_student(&app, "S-200").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/complaints",
        Some((first, "student")),
        Some(json!({
            "subject": "Power cuts every evening",
            "description": "Whole block",
            "category": "Electricity Issues",
        })),
    )
    .await;
    let complaint = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/complaints/{complaint}"),
        Some((second, "student")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/complaints/{complaint}"),
        Some((first, "student")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student"], json!(first));
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = router();
    register_student(&app, "S-100").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/students/register",
        None,
        Some(json!({
            "studentId": "S-100",
            "name": "Someone Else",
            "email": "other@example.edu",
            "phone": "555-0101",
            "course": "History",
            "year": 1,
            "gender": "Male",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        json!("Student already exists with this ID or email")
    );
}

#[tokio::test]
async fn dashboard_reports_counts_and_recent_complaints() {
    let app = router();
    let hostel = create_hostel(&app, "North Wing").await;
    create_room(&app, hostel, "101", "Triple").await;
    let student = register_student(&app, "S-100").await;
    send(
        &app,
        Method::POST,
        "/api/complaints",
        Some((student, "student")),
        Some(json!({
            "subject": "Leaky tap",
            "description": "Room 101",
            "category": "Maintenance",
        })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/admin/dashboard", ADMIN, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["counts"]["students"], json!(1));
    assert_eq!(body["data"]["counts"]["hostels"], json!(1));
    assert_eq!(body["data"]["counts"]["rooms"], json!(1));
    assert_eq!(body["data"]["counts"]["openComplaints"], json!(1));
    assert_eq!(body["data"]["recentComplaints"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn student_dashboard_shows_assignment_and_recent_complaints() {
    let app = router();
    let hostel = create_hostel(&app, "North Wing").await;
    let room = create_room(&app, hostel, "101", "Double").await;
    let student = register_student(&app, "S-100").await;
    let student_actor = Some((student, "student"));
    assign(&app, student, room).await;
    for subject in ["Leaky tap", "Broken fan", "Flickering light", "Loose hinge"] {
        send(
            &app,
            Method::POST,
            "/api/complaints",
            student_actor,
            Some(json!({
                "subject": subject,
                "description": "Room 101",
                "category": "Maintenance",
            })),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/student/dashboard", student_actor, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["student"]["id"], json!(student));
    assert_eq!(body["data"]["hostel"]["id"], json!(hostel));
    assert_eq!(body["data"]["room"]["id"], json!(room));
    let recent = body["data"]["recentComplaints"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["subject"], json!("Loose hinge"));

    // An unassigned student still gets their dashboard, just without lodging.
    let other = register_student(&app, "S-200").await;
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/student/dashboard",
        Some((other, "student")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["hostel"].is_null());
    assert!(body["data"]["room"].is_null());
}

#[tokio::test]
async fn duplicate_names_are_conflicts_on_create_and_rename() {
    let app = router();
    create_hostel(&app, "North Wing").await;
    let south = create_hostel(&app, "South Wing").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/hostels",
        ADMIN,
        Some(json!({ "name": "North Wing", "type": "Boys", "address": "1 College Rd" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/hostels/{south}"),
        ADMIN,
        Some(json!({ "name": "North Wing" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("Hostel name already in use"));

    create_room(&app, south, "101", "Single").await;
    let second = create_room(&app, south, "102", "Single").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/rooms",
        ADMIN,
        Some(json!({
            "hostelId": south,
            "roomNumber": "101",
            "type": "Single",
            "floor": 1,
            "monthlyRent": 4500,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/rooms/{second}"),
        ADMIN,
        Some(json!({ "roomNumber": "101" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], json!("Room number already in use in this hostel"));

    let (_, body) = send(&app, Method::GET, &format!("/api/rooms/{second}"), None, None).await;
    assert_eq!(body["data"]["roomNumber"], json!("102"));
}
