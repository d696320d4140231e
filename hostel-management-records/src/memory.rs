//! In-memory [`RecordStore`], the reference semantics for every backend.
//!
//! A single mutex over the whole dataset makes each trait method atomic as a
//! unit, which is exactly the contract the guarded primitives promise. Used
//! by the test suites and handy for running the backend without Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::{
    Comment, Complaint, ComplaintStatus, ComplaintUpdate, Hostel, HostelUpdate, Id, NewComplaint,
    NewHostel, NewRoom, NewStudent, ProfileUpdate, Room, RoomUpdate, Student,
};
use crate::store::{
    ComplaintFilter, DashboardCounts, Page, Paged, RecordStore, RoomFilter, StudentFilter,
};

#[derive(Default)]
struct Inner {
    hostels: HashMap<Id, Hostel>,
    rooms: HashMap<Id, Room>,
    students: HashMap<Id, Student>,
    complaints: HashMap<Id, Complaint>,
    next_id: Id,
}

impl Inner {
    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn page_out<T: Clone>(mut items: Vec<T>, page: Page) -> Paged<T> {
    let total = items.len() as u64;
    let offset = page.offset() as usize;
    let items = if offset >= items.len() {
        Vec::new()
    } else {
        items.drain(offset..).take(page.per_page as usize).collect()
    };
    Paged { items, total }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_hostel(&self, new: NewHostel) -> Result<Hostel, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.hostels.values().any(|h| h.name == new.name) {
            return Err(StoreError(format!(
                "hostel name {:?} already taken",
                new.name
            )));
        }
        let id = inner.next_id();
        let hostel = Hostel {
            id,
            name: new.name,
            kind: new.kind,
            address: new.address,
            total_rooms: 0,
            total_capacity: 0,
            current_occupancy: 0,
            is_active: true,
            created_at: Utc::now(),
        };
        inner.hostels.insert(id, hostel.clone());
        Ok(hostel)
    }

    async fn hostel(&self, id: Id) -> Result<Option<Hostel>, StoreError> {
        Ok(self.inner.lock().await.hostels.get(&id).cloned())
    }

    async fn hostels(&self) -> Result<Vec<Hostel>, StoreError> {
        let inner = self.inner.lock().await;
        let mut items: Vec<_> = inner.hostels.values().filter(|h| h.is_active).cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn available_hostels(&self) -> Result<Vec<Hostel>, StoreError> {
        let mut items = self.hostels().await?;
        items.retain(|h| h.current_occupancy < h.total_capacity);
        Ok(items)
    }

    async fn hostel_by_name(&self, name: &str) -> Result<Option<Hostel>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.hostels.values().find(|h| h.name == name).cloned())
    }

    async fn update_hostel(
        &self,
        id: Id,
        update: HostelUpdate,
    ) -> Result<Option<Hostel>, StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.hostels.contains_key(&id) {
            return Ok(None);
        }
        if let Some(name) = &update.name {
            if inner.hostels.values().any(|h| h.id != id && h.name == *name) {
                return Err(StoreError(format!("hostel name {name:?} already taken")));
            }
        }
        let Some(hostel) = inner.hostels.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            hostel.name = name;
        }
        if let Some(address) = update.address {
            hostel.address = address;
        }
        Ok(Some(hostel.clone()))
    }

    async fn set_hostel_active(&self, id: Id, active: bool) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.hostels.get_mut(&id).map(|h| h.is_active = active).is_some())
    }

    async fn active_room_count(&self, hostel: Id) -> Result<u64, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rooms
            .values()
            .filter(|r| r.hostel_id == hostel && r.is_active)
            .count() as u64)
    }

    async fn adjust_hostel_usage(
        &self,
        id: Id,
        room_delta: i32,
        capacity_delta: i32,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(hostel) = inner.hostels.get_mut(&id) else {
            return Ok(false);
        };
        let rooms = hostel.total_rooms + room_delta;
        let capacity = hostel.total_capacity + capacity_delta;
        if rooms < 0 || capacity < 0 {
            return Ok(false);
        }
        hostel.total_rooms = rooms;
        hostel.total_capacity = capacity;
        Ok(true)
    }

    async fn adjust_hostel_occupancy(&self, id: Id, delta: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(hostel) = inner.hostels.get_mut(&id) else {
            return Ok(false);
        };
        let next = hostel.current_occupancy + delta;
        if next < 0 || next > hostel.total_capacity {
            return Ok(false);
        }
        hostel.current_occupancy = next;
        Ok(true)
    }

    async fn insert_room(&self, new: NewRoom) -> Result<Room, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner
            .rooms
            .values()
            .any(|r| r.hostel_id == new.hostel_id && r.room_number == new.room_number)
        {
            return Err(StoreError(format!(
                "room {:?} already exists in hostel {}",
                new.room_number, new.hostel_id
            )));
        }
        let id = inner.next_id();
        let room = Room {
            id,
            hostel_id: new.hostel_id,
            room_number: new.room_number,
            kind: new.kind,
            capacity: new.kind.capacity(),
            floor: new.floor,
            monthly_rent: new.monthly_rent,
            current_occupancy: 0,
            students: Vec::new(),
            is_active: true,
        };
        inner.rooms.insert(id, room.clone());
        Ok(room)
    }

    async fn room(&self, id: Id) -> Result<Option<Room>, StoreError> {
        Ok(self.inner.lock().await.rooms.get(&id).cloned())
    }

    async fn rooms(&self, filter: RoomFilter) -> Result<Vec<Room>, StoreError> {
        let inner = self.inner.lock().await;
        let mut items: Vec<_> = inner
            .rooms
            .values()
            .filter(|r| r.is_active)
            .filter(|r| filter.hostel.is_none_or(|h| r.hostel_id == h))
            .filter(|r| !filter.available_only || r.current_occupancy < r.capacity)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            (a.hostel_id, &a.room_number).cmp(&(b.hostel_id, &b.room_number))
        });
        Ok(items)
    }

    async fn room_by_number(
        &self,
        hostel: Id,
        number: &str,
    ) -> Result<Option<Room>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rooms
            .values()
            .find(|r| r.hostel_id == hostel && r.room_number == number)
            .cloned())
    }

    async fn update_room(&self, id: Id, update: RoomUpdate) -> Result<Option<Room>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(hostel_id) = inner.rooms.get(&id).map(|r| r.hostel_id) else {
            return Ok(None);
        };
        if let Some(number) = &update.room_number {
            if inner
                .rooms
                .values()
                .any(|r| r.id != id && r.hostel_id == hostel_id && r.room_number == *number)
            {
                return Err(StoreError(format!(
                    "room {number:?} already exists in hostel {hostel_id}"
                )));
            }
        }
        let Some(room) = inner.rooms.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(room_number) = update.room_number {
            room.room_number = room_number;
        }
        if let Some(kind) = update.kind {
            room.kind = kind;
            room.capacity = kind.capacity();
        }
        if let Some(floor) = update.floor {
            room.floor = floor;
        }
        if let Some(monthly_rent) = update.monthly_rent {
            room.monthly_rent = monthly_rent;
        }
        Ok(Some(room.clone()))
    }

    async fn set_room_active(&self, id: Id, active: bool) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.rooms.get_mut(&id).map(|r| r.is_active = active).is_some())
    }

    async fn claim_room_slot(&self, room: Id, student: Id) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(room) = inner.rooms.get_mut(&room) else {
            return Ok(false);
        };
        if !room.is_active || room.current_occupancy >= room.capacity {
            return Ok(false);
        }
        if room.students.contains(&student) {
            return Ok(false);
        }
        room.students.push(student);
        room.current_occupancy += 1;
        Ok(true)
    }

    async fn release_room_slot(&self, room: Id, student: Id) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(room) = inner.rooms.get_mut(&room) else {
            return Ok(false);
        };
        let Some(pos) = room.students.iter().position(|s| *s == student) else {
            return Ok(false);
        };
        room.students.remove(pos);
        room.current_occupancy -= 1;
        Ok(true)
    }

    async fn insert_student(&self, new: NewStudent) -> Result<Student, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner
            .students
            .values()
            .any(|s| s.student_id == new.student_id || s.email == new.email)
        {
            return Err(StoreError(format!(
                "student {:?} / {:?} already registered",
                new.student_id, new.email
            )));
        }
        let id = inner.next_id();
        let student = Student {
            id,
            student_id: new.student_id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            course: new.course,
            year: new.year,
            gender: new.gender,
            hostel: None,
            room: None,
            is_active: true,
            admission_date: Utc::now(),
        };
        inner.students.insert(id, student.clone());
        Ok(student)
    }

    async fn student(&self, id: Id) -> Result<Option<Student>, StoreError> {
        Ok(self.inner.lock().await.students.get(&id).cloned())
    }

    async fn student_by_identity(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<Student>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .students
            .values()
            .find(|s| s.student_id == student_id || s.email == email)
            .cloned())
    }

    async fn students(
        &self,
        filter: StudentFilter,
        page: Page,
    ) -> Result<Paged<Student>, StoreError> {
        let inner = self.inner.lock().await;
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut items: Vec<_> = inner
            .students
            .values()
            .filter(|s| s.is_active)
            .filter(|s| filter.hostel.is_none_or(|h| s.hostel == Some(h)))
            .filter(|s| {
                needle.as_deref().is_none_or(|needle| {
                    s.name.to_lowercase().contains(needle)
                        || s.student_id.to_lowercase().contains(needle)
                        || s.email.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(page_out(items, page))
    }

    async fn update_student_profile(
        &self,
        id: Id,
        update: ProfileUpdate,
    ) -> Result<Option<Student>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(student) = inner.students.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            student.name = name;
        }
        if let Some(phone) = update.phone {
            student.phone = phone;
        }
        Ok(Some(student.clone()))
    }

    async fn set_student_assignment(
        &self,
        id: Id,
        assignment: Option<(Id, Id)>,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(student) = inner.students.get_mut(&id) else {
            return Ok(false);
        };
        match assignment {
            Some((hostel, room)) => {
                student.hostel = Some(hostel);
                student.room = Some(room);
            }
            None => {
                student.hostel = None;
                student.room = None;
            }
        }
        Ok(true)
    }

    async fn set_student_active(&self, id: Id, active: bool) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        Ok(inner
            .students
            .get_mut(&id)
            .map(|s| s.is_active = active)
            .is_some())
    }

    async fn insert_complaint(&self, new: NewComplaint) -> Result<Complaint, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let complaint = Complaint {
            id,
            student: new.student,
            subject: new.subject,
            description: new.description,
            category: new.category,
            priority: new.priority,
            status: ComplaintStatus::Open,
            resolution: String::new(),
            resolved_at: None,
            resolved_by: None,
            comments: Vec::new(),
            created_at: Utc::now(),
        };
        inner.complaints.insert(id, complaint.clone());
        Ok(complaint)
    }

    async fn complaint(&self, id: Id) -> Result<Option<Complaint>, StoreError> {
        Ok(self.inner.lock().await.complaints.get(&id).cloned())
    }

    async fn complaints(
        &self,
        filter: ComplaintFilter,
        page: Page,
    ) -> Result<Paged<Complaint>, StoreError> {
        let inner = self.inner.lock().await;
        let mut items: Vec<_> = inner
            .complaints
            .values()
            .filter(|c| filter.student.is_none_or(|s| c.student == s))
            .filter(|c| filter.status.is_none_or(|s| c.status == s))
            .filter(|c| filter.category.is_none_or(|cat| c.category == cat))
            .filter(|c| filter.priority.is_none_or(|p| c.priority == p))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(page_out(items, page))
    }

    async fn update_complaint(
        &self,
        id: Id,
        update: ComplaintUpdate,
    ) -> Result<Option<Complaint>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(complaint) = inner.complaints.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(status) = update.status {
            complaint.status = status;
        }
        if let Some(priority) = update.priority {
            complaint.priority = priority;
        }
        if let Some(resolution) = update.resolution {
            complaint.resolution = resolution;
        }
        if update.resolved_at.is_some() {
            complaint.resolved_at = update.resolved_at;
            complaint.resolved_by = update.resolved_by;
        }
        Ok(Some(complaint.clone()))
    }

    async fn add_complaint_comment(
        &self,
        id: Id,
        comment: Comment,
    ) -> Result<Option<Complaint>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(complaint) = inner.complaints.get_mut(&id) else {
            return Ok(None);
        };
        complaint.comments.push(comment);
        Ok(Some(complaint.clone()))
    }

    async fn recent_complaints(&self, limit: u32) -> Result<Vec<Complaint>, StoreError> {
        let inner = self.inner.lock().await;
        let mut items: Vec<_> = inner.complaints.values().cloned().collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn dashboard_counts(&self) -> Result<DashboardCounts, StoreError> {
        let inner = self.inner.lock().await;
        Ok(DashboardCounts {
            students: inner.students.values().filter(|s| s.is_active).count() as u64,
            hostels: inner.hostels.values().filter(|h| h.is_active).count() as u64,
            rooms: inner.rooms.values().filter(|r| r.is_active).count() as u64,
            open_complaints: inner
                .complaints
                .values()
                .filter(|c| !c.status.is_settled())
                .count() as u64,
        })
    }
}
