use reqwest::multipart::{Form, Part};

use crate::client::http::ApiClient;
use crate::client::workflow::models::{
    NewComment, NewSubtask, NewTask, Subtask, Task, TaskAttachment, TaskComment, TaskFilter,
    TaskHistoryEntry, TaskUpdate,
};
use crate::error::ApiResult;

pub async fn list_tasks(client: &ApiClient, filter: &TaskFilter) -> ApiResult<Vec<Task>> {
    client.get_with_query("workflow/tasks", filter).await
}

pub async fn get_task(client: &ApiClient, id: i64) -> ApiResult<Task> {
    client.get(&format!("workflow/tasks/{}", id)).await
}

pub async fn create_task(client: &ApiClient, body: &NewTask) -> ApiResult<Task> {
    client.post("workflow/tasks", body).await
}

pub async fn update_task(client: &ApiClient, id: i64, body: &TaskUpdate) -> ApiResult<Task> {
    client.put(&format!("workflow/tasks/{}", id), body).await
}

pub async fn subtasks(client: &ApiClient, task_id: i64) -> ApiResult<Vec<Subtask>> {
    client.get(&format!("workflow/tasks/{}/subtasks", task_id)).await
}

pub async fn add_subtask(client: &ApiClient, task_id: i64, title: &str) -> ApiResult<Subtask> {
    let body = NewSubtask { title: title.to_string() };
    client.post(&format!("workflow/tasks/{}/subtasks", task_id), &body).await
}

pub async fn comments(client: &ApiClient, task_id: i64) -> ApiResult<Vec<TaskComment>> {
    client.get(&format!("workflow/tasks/{}/comments", task_id)).await
}

pub async fn add_comment(client: &ApiClient, task_id: i64, body: &str) -> ApiResult<TaskComment> {
    let body = NewComment { body: body.to_string() };
    client.post(&format!("workflow/tasks/{}/comments", task_id), &body).await
}

pub async fn history(client: &ApiClient, task_id: i64) -> ApiResult<Vec<TaskHistoryEntry>> {
    client.get(&format!("workflow/tasks/{}/history", task_id)).await
}

pub async fn upload_attachment(
    client: &ApiClient,
    task_id: i64,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> ApiResult<TaskAttachment> {
    let part = Part::bytes(bytes).file_name(file_name.to_string()).mime_str(mime)?;
    let form = Form::new().part("file", part);
    client
        .post_multipart(&format!("workflow/tasks/{}/attachments", task_id), form)
        .await
}
