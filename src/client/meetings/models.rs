use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::dates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    #[serde(with = "dates::timestamp")]
    pub meeting_date: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
    pub status: MeetingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeeting {
    pub title: String,
    #[serde(with = "dates::timestamp")]
    pub meeting_date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeetingStatusUpdate {
    pub status: MeetingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: i64,
    pub meeting_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub order_index: i32,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAgendaItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgendaOrder {
    pub id: i64,
    pub order_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaReorder {
    pub items: Vec<AgendaOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgendaPostpone {
    pub target_meeting_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinutesStatus {
    Draft,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minutes {
    pub id: i64,
    pub meeting_id: i64,
    pub content: String,
    pub status: MinutesStatus,
    #[serde(default)]
    pub approved_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinutesBody {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeetingDocument {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub url: Option<String>,
}
