//! Row types for the Postgres tables and their conversions into the domain
//! records. Enumerations are stored as their wire spellings; a row with an
//! unknown spelling is a store failure, not a 4xx.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use hostel_management_records::models::{
    ActorRole, Comment, Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus, Gender,
    Hostel, HostelKind, Id, Room, RoomKind, Student,
};
use hostel_management_records::StoreError;

use crate::schema::{complaint_comments, complaints, hostels, room_members, rooms, students};

#[derive(Queryable, Selectable)]
#[diesel(table_name = hostels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HostelRow {
    pub id: Id,
    pub name: String,
    pub kind: String,
    pub address: String,
    pub total_rooms: i32,
    pub total_capacity: i32,
    pub current_occupancy: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<HostelRow> for Hostel {
    type Error = StoreError;

    fn try_from(row: HostelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            kind: HostelKind::try_from(row.kind.as_str()).map_err(StoreError)?,
            address: row.address,
            total_rooms: row.total_rooms,
            total_capacity: row.total_capacity,
            current_occupancy: row.current_occupancy,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = hostels)]
pub struct NewHostelRow<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub address: &'a str,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoomRow {
    pub id: Id,
    pub hostel_id: Id,
    pub room_number: String,
    pub kind: String,
    pub capacity: i32,
    pub floor: i32,
    pub monthly_rent: i32,
    pub current_occupancy: i32,
    pub is_active: bool,
}

impl RoomRow {
    pub fn into_room(self, students: Vec<Id>) -> Result<Room, StoreError> {
        Ok(Room {
            id: self.id,
            hostel_id: self.hostel_id,
            room_number: self.room_number,
            kind: RoomKind::try_from(self.kind.as_str()).map_err(StoreError)?,
            capacity: self.capacity,
            floor: self.floor,
            monthly_rent: self.monthly_rent,
            current_occupancy: self.current_occupancy,
            students,
            is_active: self.is_active,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = rooms)]
pub struct NewRoomRow<'a> {
    pub hostel_id: Id,
    pub room_number: &'a str,
    pub kind: &'a str,
    pub capacity: i32,
    pub floor: i32,
    pub monthly_rent: i32,
}

#[derive(Insertable)]
#[diesel(table_name = room_members)]
pub struct NewRoomMemberRow {
    pub room_id: Id,
    pub student_id: Id,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudentRow {
    pub id: Id,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub year: i32,
    pub gender: String,
    pub hostel_id: Option<Id>,
    pub room_id: Option<Id>,
    pub is_active: bool,
    pub admission_date: DateTime<Utc>,
}

impl TryFrom<StudentRow> for Student {
    type Error = StoreError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            student_id: row.student_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            course: row.course,
            year: row.year,
            gender: Gender::try_from(row.gender.as_str()).map_err(StoreError)?,
            hostel: row.hostel_id,
            room: row.room_id,
            is_active: row.is_active,
            admission_date: row.admission_date,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = students)]
pub struct NewStudentRow<'a> {
    pub student_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub course: &'a str,
    pub year: i32,
    pub gender: &'a str,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ComplaintRow {
    pub id: Id,
    pub student_id: Id,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub resolution: String,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<Id>,
    pub created_at: DateTime<Utc>,
}

impl ComplaintRow {
    pub fn into_complaint(self, comments: Vec<Comment>) -> Result<Complaint, StoreError> {
        Ok(Complaint {
            id: self.id,
            student: self.student_id,
            subject: self.subject,
            description: self.description,
            category: ComplaintCategory::try_from(self.category.as_str()).map_err(StoreError)?,
            priority: ComplaintPriority::try_from(self.priority.as_str()).map_err(StoreError)?,
            status: ComplaintStatus::try_from(self.status.as_str()).map_err(StoreError)?,
            resolution: self.resolution,
            resolved_at: self.resolved_at,
            resolved_by: self.resolved_by,
            comments,
            created_at: self.created_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = complaints)]
pub struct NewComplaintRow<'a> {
    pub student_id: Id,
    pub subject: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub status: &'a str,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = complaint_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    pub id: Id,
    pub complaint_id: Id,
    pub author_id: Id,
    pub author_role: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = StoreError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            author: row.author_id,
            role: ActorRole::try_from(row.author_role.as_str()).map_err(StoreError)?,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = complaint_comments)]
pub struct NewCommentRow<'a> {
    pub complaint_id: Id,
    pub author_id: Id,
    pub author_role: &'a str,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}
