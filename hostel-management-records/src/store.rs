//! The record store collaborator: per-collection CRUD keyed by id plus the
//! atomic guarded counter primitives the occupancy ledger builds on.
//!
//! Everything that writes `current_occupancy`, `total_rooms` or
//! `total_capacity` lives behind this trait, and only the ledger calls those
//! methods. Guarded primitives return `Ok(false)` when the guard rejects the
//! mutation; state is untouched in that case.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    Comment, Complaint, ComplaintCategory, ComplaintPriority, ComplaintStatus, ComplaintUpdate,
    Hostel, HostelUpdate, Id, NewComplaint, NewHostel, NewRoom, NewStudent, ProfileUpdate, Room,
    RoomUpdate, Student,
};

#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// 1-based.
    pub page: u32,
    pub per_page: u32,
}

impl Page {
    #[must_use]
    pub const fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.per_page
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Paged<T> {
    #[must_use]
    pub fn total_pages(&self, per_page: u32) -> u64 {
        if per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(per_page))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    pub hostel: Option<Id>,
    /// Keep only rooms with `current_occupancy < capacity`.
    pub available_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Case-insensitive substring over name, student id and email.
    pub search: Option<String>,
    pub hostel: Option<Id>,
}

#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub student: Option<Id>,
    pub status: Option<ComplaintStatus>,
    pub category: Option<ComplaintCategory>,
    pub priority: Option<ComplaintPriority>,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub students: u64,
    pub hostels: u64,
    pub rooms: u64,
    pub open_complaints: u64,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    // hostels
    async fn insert_hostel(&self, new: NewHostel) -> Result<Hostel, StoreError>;
    async fn hostel(&self, id: Id) -> Result<Option<Hostel>, StoreError>;
    /// Active hostels sorted by name.
    async fn hostels(&self) -> Result<Vec<Hostel>, StoreError>;
    /// Active hostels with spare capacity, sorted by name.
    async fn available_hostels(&self) -> Result<Vec<Hostel>, StoreError>;
    /// Any hostel (active or not) carrying this exact name.
    async fn hostel_by_name(&self, name: &str) -> Result<Option<Hostel>, StoreError>;
    async fn update_hostel(
        &self,
        id: Id,
        update: HostelUpdate,
    ) -> Result<Option<Hostel>, StoreError>;
    async fn set_hostel_active(&self, id: Id, active: bool) -> Result<bool, StoreError>;
    async fn active_room_count(&self, hostel: Id) -> Result<u64, StoreError>;
    /// Applies both usage deltas in one atomic step, guarded so neither
    /// `total_rooms` nor `total_capacity` goes negative.
    async fn adjust_hostel_usage(
        &self,
        id: Id,
        room_delta: i32,
        capacity_delta: i32,
    ) -> Result<bool, StoreError>;
    /// Guarded so occupancy stays within `0..=total_capacity`.
    async fn adjust_hostel_occupancy(&self, id: Id, delta: i32) -> Result<bool, StoreError>;

    // rooms
    async fn insert_room(&self, new: NewRoom) -> Result<Room, StoreError>;
    async fn room(&self, id: Id) -> Result<Option<Room>, StoreError>;
    /// Any room (active or not) with this number inside the hostel.
    async fn room_by_number(&self, hostel: Id, number: &str)
        -> Result<Option<Room>, StoreError>;
    /// Active rooms matching the filter, sorted by hostel then room number.
    async fn rooms(&self, filter: RoomFilter) -> Result<Vec<Room>, StoreError>;
    async fn update_room(&self, id: Id, update: RoomUpdate) -> Result<Option<Room>, StoreError>;
    async fn set_room_active(&self, id: Id, active: bool) -> Result<bool, StoreError>;
    /// Atomic: if the room is active and below capacity, appends the student
    /// to the member set and increments occupancy. `Ok(false)` when full,
    /// inactive or missing.
    async fn claim_room_slot(&self, room: Id, student: Id) -> Result<bool, StoreError>;
    /// Atomic inverse of [`Self::claim_room_slot`]. `Ok(false)` when the
    /// student is not a member.
    async fn release_room_slot(&self, room: Id, student: Id) -> Result<bool, StoreError>;

    // students
    async fn insert_student(&self, new: NewStudent) -> Result<Student, StoreError>;
    async fn student(&self, id: Id) -> Result<Option<Student>, StoreError>;
    /// Any student (active or not) matching either unique identity column.
    async fn student_by_identity(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<Student>, StoreError>;
    /// Active students, newest first.
    async fn students(
        &self,
        filter: StudentFilter,
        page: Page,
    ) -> Result<Paged<Student>, StoreError>;
    async fn update_student_profile(
        &self,
        id: Id,
        update: ProfileUpdate,
    ) -> Result<Option<Student>, StoreError>;
    /// `Some((hostel, room))` assigns, `None` clears both fields.
    async fn set_student_assignment(
        &self,
        id: Id,
        assignment: Option<(Id, Id)>,
    ) -> Result<bool, StoreError>;
    async fn set_student_active(&self, id: Id, active: bool) -> Result<bool, StoreError>;

    // complaints
    async fn insert_complaint(&self, new: NewComplaint) -> Result<Complaint, StoreError>;
    async fn complaint(&self, id: Id) -> Result<Option<Complaint>, StoreError>;
    /// Newest first.
    async fn complaints(
        &self,
        filter: ComplaintFilter,
        page: Page,
    ) -> Result<Paged<Complaint>, StoreError>;
    async fn update_complaint(
        &self,
        id: Id,
        update: ComplaintUpdate,
    ) -> Result<Option<Complaint>, StoreError>;
    async fn add_complaint_comment(
        &self,
        id: Id,
        comment: Comment,
    ) -> Result<Option<Complaint>, StoreError>;
    async fn recent_complaints(&self, limit: u32) -> Result<Vec<Complaint>, StoreError>;

    async fn dashboard_counts(&self) -> Result<DashboardCounts, StoreError>;
}
