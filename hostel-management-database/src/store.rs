//! Postgres-backed [`RecordStore`].
//!
//! Every guarded counter primitive is a single conditional `UPDATE` whose
//! affected-row count decides the outcome, so concurrent requests can never
//! both get past a capacity check. The two membership primitives pair the
//! counter update with the `room_members` write inside a transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::deadpool;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use hostel_management_records::models::{
    Comment, Complaint, ComplaintStatus, ComplaintUpdate, Hostel, HostelUpdate, Id, NewComplaint,
    NewHostel, NewRoom, NewStudent, ProfileUpdate, Room, RoomUpdate, Student,
};
use hostel_management_records::store::{
    ComplaintFilter, DashboardCounts, Page, Paged, RecordStore, RoomFilter, StudentFilter,
};
use hostel_management_records::StoreError;

use crate::rows::{
    CommentRow, ComplaintRow, HostelRow, NewCommentRow, NewComplaintRow, NewHostelRow,
    NewRoomMemberRow, NewRoomRow, NewStudentRow, RoomRow, StudentRow,
};
use crate::schema::{complaint_comments, complaints, hostels, room_members, rooms, students};
use crate::{Pool, PooledConnection};

pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<PooledConnection, StoreError> {
        self.pool.get().await.map_err(pool_err)
    }
}

fn pool_err(err: deadpool::PoolError) -> StoreError {
    StoreError(format!("connection pool: {err}"))
}

fn query_err(err: diesel::result::Error) -> StoreError {
    StoreError(format!("query failed: {err}"))
}

/// Member lists for a batch of rooms, in assignment order.
async fn room_member_map(
    conn: &mut PooledConnection,
    room_ids: &[Id],
) -> Result<HashMap<Id, Vec<Id>>, diesel::result::Error> {
    let rows: Vec<(Id, Id)> = room_members::table
        .filter(room_members::room_id.eq_any(room_ids.iter().copied()))
        .order(room_members::id.asc())
        .select((room_members::room_id, room_members::student_id))
        .load(conn)
        .await?;
    let mut map: HashMap<Id, Vec<Id>> = HashMap::new();
    for (room, student) in rows {
        map.entry(room).or_default().push(student);
    }
    Ok(map)
}

async fn assemble_rooms(
    conn: &mut PooledConnection,
    rows: Vec<RoomRow>,
) -> Result<Vec<Room>, StoreError> {
    let ids: Vec<Id> = rows.iter().map(|r| r.id).collect();
    let mut members = room_member_map(conn, &ids).await.map_err(query_err)?;
    rows.into_iter()
        .map(|row| {
            let students = members.remove(&row.id).unwrap_or_default();
            row.into_room(students)
        })
        .collect()
}

async fn comment_map(
    conn: &mut PooledConnection,
    complaint_ids: &[Id],
) -> Result<HashMap<Id, Vec<Comment>>, StoreError> {
    let rows: Vec<CommentRow> = complaint_comments::table
        .filter(complaint_comments::complaint_id.eq_any(complaint_ids.iter().copied()))
        .order(complaint_comments::id.asc())
        .select(CommentRow::as_select())
        .load(conn)
        .await
        .map_err(query_err)?;
    let mut map: HashMap<Id, Vec<Comment>> = HashMap::new();
    for row in rows {
        let complaint = row.complaint_id;
        map.entry(complaint).or_default().push(row.try_into()?);
    }
    Ok(map)
}

async fn assemble_complaints(
    conn: &mut PooledConnection,
    rows: Vec<ComplaintRow>,
) -> Result<Vec<Complaint>, StoreError> {
    let ids: Vec<Id> = rows.iter().map(|r| r.id).collect();
    let mut comments = comment_map(conn, &ids).await?;
    rows.into_iter()
        .map(|row| {
            let list = comments.remove(&row.id).unwrap_or_default();
            row.into_complaint(list)
        })
        .collect()
}

fn student_query(filter: &StudentFilter) -> students::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = students::table
        .filter(students::is_active.eq(true))
        .into_boxed();
    if let Some(hostel) = filter.hostel {
        query = query.filter(students::hostel_id.eq(hostel));
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query = query.filter(
            students::name
                .ilike(pattern.clone())
                .or(students::student_id.ilike(pattern.clone()))
                .or(students::email.ilike(pattern)),
        );
    }
    query
}

fn complaint_query(filter: &ComplaintFilter) -> complaints::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = complaints::table.into_boxed();
    if let Some(student) = filter.student {
        query = query.filter(complaints::student_id.eq(student));
    }
    if let Some(status) = filter.status {
        query = query.filter(complaints::status.eq(status.as_str()));
    }
    if let Some(category) = filter.category {
        query = query.filter(complaints::category.eq(category.as_str()));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(complaints::priority.eq(priority.as_str()));
    }
    query
}

#[derive(AsChangeset)]
#[diesel(table_name = hostels)]
struct HostelChanges<'a> {
    name: Option<&'a str>,
    address: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = rooms)]
struct RoomChanges<'a> {
    room_number: Option<&'a str>,
    kind: Option<&'a str>,
    capacity: Option<i32>,
    floor: Option<i32>,
    monthly_rent: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = students)]
struct ProfileChanges<'a> {
    name: Option<&'a str>,
    phone: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = complaints)]
struct ComplaintChanges<'a> {
    status: Option<&'a str>,
    priority: Option<&'a str>,
    resolution: Option<&'a str>,
    resolved_at: Option<chrono::DateTime<chrono::Utc>>,
    resolved_by: Option<Id>,
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert_hostel(&self, new: NewHostel) -> Result<Hostel, StoreError> {
        let mut conn = self.conn().await?;
        let row: HostelRow = diesel::insert_into(hostels::table)
            .values(NewHostelRow {
                name: &new.name,
                kind: new.kind.as_str(),
                address: &new.address,
            })
            .returning(HostelRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        row.try_into()
    }

    async fn hostel(&self, id: Id) -> Result<Option<Hostel>, StoreError> {
        let mut conn = self.conn().await?;
        let row: Option<HostelRow> = hostels::table
            .find(id)
            .select(HostelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn hostels(&self) -> Result<Vec<Hostel>, StoreError> {
        let mut conn = self.conn().await?;
        let rows: Vec<HostelRow> = hostels::table
            .filter(hostels::is_active.eq(true))
            .order(hostels::name.asc())
            .select(HostelRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn available_hostels(&self) -> Result<Vec<Hostel>, StoreError> {
        let mut conn = self.conn().await?;
        let rows: Vec<HostelRow> = hostels::table
            .filter(hostels::is_active.eq(true))
            .filter(hostels::current_occupancy.lt(hostels::total_capacity))
            .order(hostels::name.asc())
            .select(HostelRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_err)?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn hostel_by_name(&self, name: &str) -> Result<Option<Hostel>, StoreError> {
        let mut conn = self.conn().await?;
        let row: Option<HostelRow> = hostels::table
            .filter(hostels::name.eq(name))
            .select(HostelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn update_hostel(
        &self,
        id: Id,
        update: HostelUpdate,
    ) -> Result<Option<Hostel>, StoreError> {
        if update.name.is_none() && update.address.is_none() {
            return self.hostel(id).await;
        }
        let mut conn = self.conn().await?;
        let row: Option<HostelRow> = diesel::update(hostels::table.find(id))
            .set(HostelChanges {
                name: update.name.as_deref(),
                address: update.address.as_deref(),
            })
            .returning(HostelRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn set_hostel_active(&self, id: Id, active: bool) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        let updated = diesel::update(hostels::table.find(id))
            .set(hostels::is_active.eq(active))
            .execute(&mut conn)
            .await
            .map_err(query_err)?;
        Ok(updated > 0)
    }

    async fn active_room_count(&self, hostel: Id) -> Result<u64, StoreError> {
        let mut conn = self.conn().await?;
        let count: i64 = rooms::table
            .filter(rooms::hostel_id.eq(hostel))
            .filter(rooms::is_active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        Ok(count.unsigned_abs())
    }

    async fn adjust_hostel_usage(
        &self,
        id: Id,
        room_delta: i32,
        capacity_delta: i32,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        let updated = diesel::update(
            hostels::table
                .find(id)
                .filter(hostels::total_rooms.ge(-room_delta))
                .filter(hostels::total_capacity.ge(-capacity_delta)),
        )
        .set((
            hostels::total_rooms.eq(hostels::total_rooms + room_delta),
            hostels::total_capacity.eq(hostels::total_capacity + capacity_delta),
        ))
        .execute(&mut conn)
        .await
        .map_err(query_err)?;
        Ok(updated > 0)
    }

    async fn adjust_hostel_occupancy(&self, id: Id, delta: i32) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        let updated = diesel::update(
            hostels::table
                .find(id)
                .filter(hostels::current_occupancy.ge(-delta))
                .filter((hostels::current_occupancy + delta).le(hostels::total_capacity)),
        )
        .set(hostels::current_occupancy.eq(hostels::current_occupancy + delta))
        .execute(&mut conn)
        .await
        .map_err(query_err)?;
        Ok(updated > 0)
    }

    async fn insert_room(&self, new: NewRoom) -> Result<Room, StoreError> {
        let mut conn = self.conn().await?;
        let row: RoomRow = diesel::insert_into(rooms::table)
            .values(NewRoomRow {
                hostel_id: new.hostel_id,
                room_number: &new.room_number,
                kind: new.kind.as_str(),
                capacity: new.kind.capacity(),
                floor: new.floor,
                monthly_rent: new.monthly_rent,
            })
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        row.into_room(Vec::new())
    }

    async fn room(&self, id: Id) -> Result<Option<Room>, StoreError> {
        let mut conn = self.conn().await?;
        let row: Option<RoomRow> = rooms::table
            .find(id)
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        let Some(row) = row else { return Ok(None) };
        Ok(assemble_rooms(&mut conn, vec![row]).await?.pop())
    }

    async fn room_by_number(
        &self,
        hostel: Id,
        number: &str,
    ) -> Result<Option<Room>, StoreError> {
        let mut conn = self.conn().await?;
        let row: Option<RoomRow> = rooms::table
            .filter(rooms::hostel_id.eq(hostel))
            .filter(rooms::room_number.eq(number))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        let Some(row) = row else { return Ok(None) };
        Ok(assemble_rooms(&mut conn, vec![row]).await?.pop())
    }

    async fn rooms(&self, filter: RoomFilter) -> Result<Vec<Room>, StoreError> {
        let mut conn = self.conn().await?;
        let mut query = rooms::table.filter(rooms::is_active.eq(true)).into_boxed();
        if let Some(hostel) = filter.hostel {
            query = query.filter(rooms::hostel_id.eq(hostel));
        }
        if filter.available_only {
            query = query.filter(rooms::current_occupancy.lt(rooms::capacity));
        }
        let rows: Vec<RoomRow> = query
            .order((rooms::hostel_id.asc(), rooms::room_number.asc()))
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_err)?;
        assemble_rooms(&mut conn, rows).await
    }

    async fn update_room(&self, id: Id, update: RoomUpdate) -> Result<Option<Room>, StoreError> {
        if update.room_number.is_none()
            && update.kind.is_none()
            && update.floor.is_none()
            && update.monthly_rent.is_none()
        {
            return self.room(id).await;
        }
        let mut conn = self.conn().await?;
        let row: Option<RoomRow> = diesel::update(rooms::table.find(id))
            .set(RoomChanges {
                room_number: update.room_number.as_deref(),
                kind: update.kind.map(|k| k.as_str()),
                capacity: update.kind.map(|k| k.capacity()),
                floor: update.floor,
                monthly_rent: update.monthly_rent,
            })
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        let Some(row) = row else { return Ok(None) };
        Ok(assemble_rooms(&mut conn, vec![row]).await?.pop())
    }

    async fn set_room_active(&self, id: Id, active: bool) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        let updated = diesel::update(rooms::table.find(id))
            .set(rooms::is_active.eq(active))
            .execute(&mut conn)
            .await
            .map_err(query_err)?;
        Ok(updated > 0)
    }

    async fn claim_room_slot(&self, room: Id, student: Id) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        conn.transaction::<bool, diesel::result::Error, _>(|conn| {
            async move {
                let already: i64 = room_members::table
                    .filter(room_members::room_id.eq(room))
                    .filter(room_members::student_id.eq(student))
                    .count()
                    .get_result(conn)
                    .await?;
                if already > 0 {
                    return Ok(false);
                }
                let updated = diesel::update(
                    rooms::table
                        .find(room)
                        .filter(rooms::is_active.eq(true))
                        .filter(rooms::current_occupancy.lt(rooms::capacity)),
                )
                .set(rooms::current_occupancy.eq(rooms::current_occupancy + 1))
                .execute(conn)
                .await?;
                if updated == 0 {
                    return Ok(false);
                }
                diesel::insert_into(room_members::table)
                    .values(NewRoomMemberRow {
                        room_id: room,
                        student_id: student,
                    })
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(query_err)
    }

    async fn release_room_slot(&self, room: Id, student: Id) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        conn.transaction::<bool, diesel::result::Error, _>(|conn| {
            async move {
                let removed = diesel::delete(
                    room_members::table
                        .filter(room_members::room_id.eq(room))
                        .filter(room_members::student_id.eq(student)),
                )
                .execute(conn)
                .await?;
                if removed == 0 {
                    return Ok(false);
                }
                diesel::update(rooms::table.find(room).filter(rooms::current_occupancy.gt(0)))
                    .set(rooms::current_occupancy.eq(rooms::current_occupancy - 1))
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(query_err)
    }

    async fn insert_student(&self, new: NewStudent) -> Result<Student, StoreError> {
        let mut conn = self.conn().await?;
        let row: StudentRow = diesel::insert_into(students::table)
            .values(NewStudentRow {
                student_id: &new.student_id,
                name: &new.name,
                email: &new.email,
                phone: &new.phone,
                course: &new.course,
                year: new.year,
                gender: new.gender.as_str(),
            })
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        row.try_into()
    }

    async fn student(&self, id: Id) -> Result<Option<Student>, StoreError> {
        let mut conn = self.conn().await?;
        let row: Option<StudentRow> = students::table
            .find(id)
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn student_by_identity(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<Student>, StoreError> {
        let mut conn = self.conn().await?;
        let row: Option<StudentRow> = students::table
            .filter(
                students::student_id
                    .eq(student_id)
                    .or(students::email.eq(email)),
            )
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn students(
        &self,
        filter: StudentFilter,
        page: Page,
    ) -> Result<Paged<Student>, StoreError> {
        let mut conn = self.conn().await?;
        let total: i64 = student_query(&filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        let rows: Vec<StudentRow> = student_query(&filter)
            .order(students::id.desc())
            .limit(i64::from(page.per_page))
            .offset(i64::from(page.offset()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_err)?;
        let items: Vec<Student> = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<_, _>>()?;
        Ok(Paged {
            items,
            total: total.unsigned_abs(),
        })
    }

    async fn update_student_profile(
        &self,
        id: Id,
        update: ProfileUpdate,
    ) -> Result<Option<Student>, StoreError> {
        if update.name.is_none() && update.phone.is_none() {
            return self.student(id).await;
        }
        let mut conn = self.conn().await?;
        let row: Option<StudentRow> = diesel::update(students::table.find(id))
            .set(ProfileChanges {
                name: update.name.as_deref(),
                phone: update.phone.as_deref(),
            })
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn set_student_assignment(
        &self,
        id: Id,
        assignment: Option<(Id, Id)>,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        let (hostel, room) = match assignment {
            Some((hostel, room)) => (Some(hostel), Some(room)),
            None => (None, None),
        };
        let updated = diesel::update(students::table.find(id))
            .set((students::hostel_id.eq(hostel), students::room_id.eq(room)))
            .execute(&mut conn)
            .await
            .map_err(query_err)?;
        Ok(updated > 0)
    }

    async fn set_student_active(&self, id: Id, active: bool) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        let updated = diesel::update(students::table.find(id))
            .set(students::is_active.eq(active))
            .execute(&mut conn)
            .await
            .map_err(query_err)?;
        Ok(updated > 0)
    }

    async fn insert_complaint(&self, new: NewComplaint) -> Result<Complaint, StoreError> {
        let mut conn = self.conn().await?;
        let row: ComplaintRow = diesel::insert_into(complaints::table)
            .values(NewComplaintRow {
                student_id: new.student,
                subject: &new.subject,
                description: &new.description,
                category: new.category.as_str(),
                priority: new.priority.as_str(),
                status: ComplaintStatus::Open.as_str(),
            })
            .returning(ComplaintRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        row.into_complaint(Vec::new())
    }

    async fn complaint(&self, id: Id) -> Result<Option<Complaint>, StoreError> {
        let mut conn = self.conn().await?;
        let row: Option<ComplaintRow> = complaints::table
            .find(id)
            .select(ComplaintRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        let Some(row) = row else { return Ok(None) };
        Ok(assemble_complaints(&mut conn, vec![row]).await?.pop())
    }

    async fn complaints(
        &self,
        filter: ComplaintFilter,
        page: Page,
    ) -> Result<Paged<Complaint>, StoreError> {
        let mut conn = self.conn().await?;
        let total: i64 = complaint_query(&filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        let rows: Vec<ComplaintRow> = complaint_query(&filter)
            .order(complaints::id.desc())
            .limit(i64::from(page.per_page))
            .offset(i64::from(page.offset()))
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_err)?;
        let items = assemble_complaints(&mut conn, rows).await?;
        Ok(Paged {
            items,
            total: total.unsigned_abs(),
        })
    }

    async fn update_complaint(
        &self,
        id: Id,
        update: ComplaintUpdate,
    ) -> Result<Option<Complaint>, StoreError> {
        if update.status.is_none()
            && update.priority.is_none()
            && update.resolution.is_none()
            && update.resolved_at.is_none()
        {
            return self.complaint(id).await;
        }
        let mut conn = self.conn().await?;
        let row: Option<ComplaintRow> = diesel::update(complaints::table.find(id))
            .set(ComplaintChanges {
                status: update.status.map(ComplaintStatus::as_str),
                priority: update.priority.map(|p| p.as_str()),
                resolution: update.resolution.as_deref(),
                resolved_at: update.resolved_at,
                resolved_by: update.resolved_by,
            })
            .returning(ComplaintRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(query_err)?;
        let Some(row) = row else { return Ok(None) };
        Ok(assemble_complaints(&mut conn, vec![row]).await?.pop())
    }

    async fn add_complaint_comment(
        &self,
        id: Id,
        comment: Comment,
    ) -> Result<Option<Complaint>, StoreError> {
        let mut conn = self.conn().await?;
        let inserted = diesel::insert_into(complaint_comments::table)
            .values(NewCommentRow {
                complaint_id: id,
                author_id: comment.author,
                author_role: comment.role.as_str(),
                message: &comment.message,
                created_at: comment.created_at,
            })
            .execute(&mut conn)
            .await
            .map_err(query_err)?;
        if inserted == 0 {
            return Ok(None);
        }
        drop(conn);
        self.complaint(id).await
    }

    async fn recent_complaints(&self, limit: u32) -> Result<Vec<Complaint>, StoreError> {
        let mut conn = self.conn().await?;
        let rows: Vec<ComplaintRow> = complaints::table
            .order(complaints::id.desc())
            .limit(i64::from(limit))
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(query_err)?;
        assemble_complaints(&mut conn, rows).await
    }

    async fn dashboard_counts(&self) -> Result<DashboardCounts, StoreError> {
        let mut conn = self.conn().await?;
        let students_count: i64 = students::table
            .filter(students::is_active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        let hostels_count: i64 = hostels::table
            .filter(hostels::is_active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        let rooms_count: i64 = rooms::table
            .filter(rooms::is_active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        let open_count: i64 = complaints::table
            .filter(complaints::status.ne_all(vec![
                ComplaintStatus::Resolved.as_str(),
                ComplaintStatus::Closed.as_str(),
            ]))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(query_err)?;
        Ok(DashboardCounts {
            students: students_count.unsigned_abs(),
            hostels: hostels_count.unsigned_abs(),
            rooms: rooms_count.unsigned_abs(),
            open_complaints: open_count.unsigned_abs(),
        })
    }
}
