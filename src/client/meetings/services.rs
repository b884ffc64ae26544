use reqwest::multipart::{Form, Part};

use crate::client::http::ApiClient;
use crate::client::meetings::models::{
    AgendaItem, AgendaOrder, AgendaPostpone, AgendaReorder, Meeting, MeetingDocument,
    MeetingStatus, MeetingStatusUpdate, Minutes, MinutesBody, NewAgendaItem, NewMeeting,
};
use crate::error::ApiResult;

pub async fn list_meetings(client: &ApiClient) -> ApiResult<Vec<Meeting>> {
    client.get("meetings").await
}

pub async fn get_meeting(client: &ApiClient, id: i64) -> ApiResult<Meeting> {
    client.get(&format!("meetings/{}", id)).await
}

pub async fn create_meeting(client: &ApiClient, body: &NewMeeting) -> ApiResult<Meeting> {
    client.post("meetings", body).await
}

pub async fn update_meeting(client: &ApiClient, id: i64, body: &NewMeeting) -> ApiResult<Meeting> {
    client.put(&format!("meetings/{}", id), body).await
}

pub async fn delete_meeting(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.delete(&format!("meetings/{}", id)).await
}

/// The server decides whether the transition is allowed.
pub async fn set_meeting_status(client: &ApiClient, id: i64, status: MeetingStatus) -> ApiResult<()> {
    client
        .put::<_, serde_json::Value>(&format!("meetings/{}/status", id), &MeetingStatusUpdate { status })
        .await
        .map(|_| ())
}

pub async fn agenda(client: &ApiClient, meeting_id: i64) -> ApiResult<Vec<AgendaItem>> {
    client.get(&format!("meetings/{}/agenda", meeting_id)).await
}

pub async fn add_agenda_item(client: &ApiClient, meeting_id: i64, body: &NewAgendaItem) -> ApiResult<AgendaItem> {
    client.post(&format!("meetings/{}/agenda", meeting_id), body).await
}

pub async fn update_agenda_item(
    client: &ApiClient,
    meeting_id: i64,
    item_id: i64,
    body: &NewAgendaItem,
) -> ApiResult<AgendaItem> {
    client
        .put(&format!("meetings/{}/agenda/{}", meeting_id, item_id), body)
        .await
}

pub async fn reorder_agenda(client: &ApiClient, meeting_id: i64, items: Vec<AgendaOrder>) -> ApiResult<()> {
    client
        .put::<_, serde_json::Value>(
            &format!("meetings/{}/agenda/reorder", meeting_id),
            &AgendaReorder { items },
        )
        .await
        .map(|_| ())
}

pub async fn postpone_agenda_item(
    client: &ApiClient,
    meeting_id: i64,
    item_id: i64,
    target_meeting_id: i64,
) -> ApiResult<()> {
    client
        .put::<_, serde_json::Value>(
            &format!("meetings/{}/agenda/{}/postpone", meeting_id, item_id),
            &AgendaPostpone { target_meeting_id },
        )
        .await
        .map(|_| ())
}

pub async fn minutes(client: &ApiClient, meeting_id: i64) -> ApiResult<Vec<Minutes>> {
    client.get(&format!("meetings/{}/minutes", meeting_id)).await
}

pub async fn create_minutes(client: &ApiClient, meeting_id: i64, content: &str) -> ApiResult<Minutes> {
    let body = MinutesBody { content: content.to_string() };
    client.post(&format!("meetings/{}/minutes", meeting_id), &body).await
}

pub async fn update_minutes(
    client: &ApiClient,
    meeting_id: i64,
    minutes_id: i64,
    content: &str,
) -> ApiResult<Minutes> {
    let body = MinutesBody { content: content.to_string() };
    client
        .put(&format!("meetings/{}/minutes/{}", meeting_id, minutes_id), &body)
        .await
}

pub async fn approve_minutes(client: &ApiClient, meeting_id: i64, minutes_id: i64) -> ApiResult<Minutes> {
    client
        .put(
            &format!("meetings/{}/minutes/{}/approve", meeting_id, minutes_id),
            &serde_json::json!({}),
        )
        .await
}

/// Uploads a generated minutes or agenda PDF.
pub async fn upload_meeting_pdf(
    client: &ApiClient,
    meeting_id: i64,
    kind: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> ApiResult<MeetingDocument> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str("application/pdf")?;
    let form = Form::new().text("kind", kind.to_string()).part("file", part);
    client
        .post_multipart(&format!("meetings/{}/documents", meeting_id), form)
        .await
}
