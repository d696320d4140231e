//! Domain records shared by every store implementation.
//!
//! The wire spellings (serde renames) match what the administrative frontend
//! already sends, e.g. `"In Progress"` and `"Food Quality"`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Id = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostelKind {
    Boys,
    Girls,
}

impl HostelKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boys => "Boys",
            Self::Girls => "Girls",
        }
    }
}

impl TryFrom<&str> for HostelKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Boys" => Ok(Self::Boys),
            "Girls" => Ok(Self::Girls),
            other => Err(format!("unknown hostel kind {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomKind {
    Single,
    Double,
    Triple,
    Quadruple,
}

impl RoomKind {
    /// Beds per room; the `capacity` counters are always derived from this.
    #[must_use]
    pub const fn capacity(self) -> i32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quadruple => 4,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Triple => "Triple",
            Self::Quadruple => "Quadruple",
        }
    }
}

impl TryFrom<&str> for RoomKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Single" => Ok(Self::Single),
            "Double" => Ok(Self::Double),
            "Triple" => Ok(Self::Triple),
            "Quadruple" => Ok(Self::Quadruple),
            other => Err(format!("unknown room kind {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for Gender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Other" => Ok(Self::Other),
            other => Err(format!("unknown gender {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    Admin,
    Student,
}

impl ActorRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Student => "Student",
        }
    }
}

impl TryFrom<&str> for ActorRole {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Admin" | "admin" => Ok(Self::Admin),
            "Student" | "student" => Ok(Self::Student),
            other => Err(format!("unknown actor role {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hostel {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HostelKind,
    pub address: String,
    pub total_rooms: i32,
    pub total_capacity: i32,
    pub current_occupancy: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewHostel {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HostelKind,
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostelUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Id,
    pub hostel_id: Id,
    pub room_number: String,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    pub capacity: i32,
    pub floor: i32,
    pub monthly_rent: i32,
    pub current_occupancy: i32,
    /// Ordered by assignment time; its length always equals `current_occupancy`.
    pub students: Vec<Id>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub hostel_id: Id,
    pub room_number: String,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    pub floor: i32,
    pub monthly_rent: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<RoomKind>,
    pub floor: Option<i32>,
    pub monthly_rent: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Id,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub year: i32,
    pub gender: Gender,
    pub hostel: Option<Id>,
    pub room: Option<Id>,
    pub is_active: bool,
    pub admission_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub year: i32,
    pub gender: Gender,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintCategory {
    #[serde(rename = "Food Quality")]
    FoodQuality,
    #[serde(rename = "Electricity Issues")]
    ElectricityIssues,
    #[serde(rename = "Laundry Services")]
    LaundryServices,
    Ragging,
    Maintenance,
    Other,
}

impl ComplaintCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FoodQuality => "Food Quality",
            Self::ElectricityIssues => "Electricity Issues",
            Self::LaundryServices => "Laundry Services",
            Self::Ragging => "Ragging",
            Self::Maintenance => "Maintenance",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for ComplaintCategory {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Food Quality" => Ok(Self::FoodQuality),
            "Electricity Issues" => Ok(Self::ElectricityIssues),
            "Laundry Services" => Ok(Self::LaundryServices),
            "Ragging" => Ok(Self::Ragging),
            "Maintenance" => Ok(Self::Maintenance),
            "Other" => Ok(Self::Other),
            other => Err(format!("unknown complaint category {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ComplaintPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl ComplaintPriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl TryFrom<&str> for ComplaintPriority {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            "Critical" => Ok(Self::Critical),
            other => Err(format!("unknown complaint priority {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ComplaintStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

impl TryFrom<&str> for ComplaintStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Open" => Ok(Self::Open),
            "In Progress" => Ok(Self::InProgress),
            "Resolved" => Ok(Self::Resolved),
            "Closed" => Ok(Self::Closed),
            other => Err(format!("unknown complaint status {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author: Id,
    pub role: ActorRole,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Id,
    pub student: Id,
    pub subject: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,
    pub resolution: String,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<Id>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComplaint {
    pub student: Id,
    pub subject: String,
    pub description: String,
    pub category: ComplaintCategory,
    #[serde(default)]
    pub priority: ComplaintPriority,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintUpdate {
    pub status: Option<ComplaintStatus>,
    pub priority: Option<ComplaintPriority>,
    pub resolution: Option<String>,
    #[serde(skip)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub resolved_by: Option<Id>,
}
