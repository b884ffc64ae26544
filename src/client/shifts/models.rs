use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::dates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftScheduleSummary {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub id: i64,
    pub personnel_id: i64,
    pub shift_schedule_id: i64,
    #[serde(with = "dates")]
    pub assignment_date: NaiveDate,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub shift_schedule: Option<ShiftScheduleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffDay {
    pub id: i64,
    pub personnel_id: i64,
    #[serde(with = "dates")]
    pub assignment_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub personnel_id: i64,
    #[serde(with = "dates")]
    pub leave_date: NaiveDate,
    pub status: LeaveStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personnel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Personnel {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSchedule {
    pub id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShiftSchedule {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub personnel_ids: Vec<i64>,
}

/// One day of a rotation template: a shift schedule, or rest when `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDay {
    pub day_offset: u32,
    pub shift_schedule_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub pattern: Vec<TemplateDay>,
}

/// Query shared by the three week endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeQuery {
    #[serde(with = "dates")]
    pub start_date: NaiveDate,
    #[serde(with = "dates")]
    pub end_date: NaiveDate,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewShiftAssignment {
    pub personnel_id: i64,
    pub shift_schedule_id: i64,
    #[serde(with = "dates")]
    pub assignment_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOffDay {
    pub personnel_id: i64,
    #[serde(with = "dates")]
    pub assignment_date: NaiveDate,
}

/// Body of the PUT issued when a card is dropped on another cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryMove {
    #[serde(with = "dates")]
    pub assignment_date: NaiveDate,
    pub personnel_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveStatusUpdate {
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLeaveRequest {
    pub personnel_id: i64,
    #[serde(with = "dates")]
    pub leave_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyWeekRequest {
    #[serde(with = "dates")]
    pub start_date: NaiveDate,
    #[serde(with = "dates")]
    pub end_date: NaiveDate,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignRequest {
    #[serde(with = "dates")]
    pub start_date: NaiveDate,
    #[serde(with = "dates")]
    pub end_date: NaiveDate,
    pub department_id: i64,
    pub personnel_ids: Vec<i64>,
    pub shift_schedule_id: i64,
    /// ISO weekday numbers, Monday = 1.
    pub days_off: Vec<u32>,
    pub include_weekends: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyTemplateRequest {
    #[serde(rename = "templateId")]
    pub template_id: i64,
    #[serde(rename = "startDate", with = "dates")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate", with = "dates")]
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personnel_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,
}

/// Summary the server returns for bulk operations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkResult {
    #[serde(default)]
    pub created: Option<u32>,
    #[serde(default)]
    pub skipped: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}
