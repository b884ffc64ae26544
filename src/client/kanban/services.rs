use std::future::Future;

use reqwest::multipart::{Form, Part};

use crate::client::http::ApiClient;
use crate::client::kanban::models::{
    ApplyChecklistTemplate, Attachment, Board, Card, CardPosition, CardUpdate, Checklist,
    ChecklistItemToggle, NewCard,
};
use crate::error::ApiResult;

pub trait KanbanApi: Clone + Send + Sync + 'static {
    fn boards(&self) -> impl Future<Output = ApiResult<Vec<Board>>> + Send;
    fn create_card(&self, body: &NewCard) -> impl Future<Output = ApiResult<Option<Card>>> + Send;
    fn update_card(&self, id: i64, body: &CardUpdate) -> impl Future<Output = ApiResult<()>> + Send;
    fn move_card(&self, id: i64, position: CardPosition) -> impl Future<Output = ApiResult<()>> + Send;
    fn delete_card(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send;
    fn apply_checklist_template(
        &self,
        card_id: i64,
        template_id: i64,
    ) -> impl Future<Output = ApiResult<Checklist>> + Send;
    fn toggle_checklist_item(&self, item_id: i64, completed: bool) -> impl Future<Output = ApiResult<()>> + Send;
}

impl KanbanApi for ApiClient {
    async fn boards(&self) -> ApiResult<Vec<Board>> {
        self.get("kanban").await
    }

    async fn create_card(&self, body: &NewCard) -> ApiResult<Option<Card>> {
        self.post_created("kanban/cards", body).await
    }

    async fn update_card(&self, id: i64, body: &CardUpdate) -> ApiResult<()> {
        self.put::<_, serde_json::Value>(&format!("kanban/cards/{}", id), body)
            .await
            .map(|_| ())
    }

    async fn move_card(&self, id: i64, position: CardPosition) -> ApiResult<()> {
        self.put::<_, serde_json::Value>(&format!("kanban/cards/{}/position", id), &position)
            .await
            .map(|_| ())
    }

    async fn delete_card(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("kanban/cards/{}", id)).await
    }

    async fn apply_checklist_template(&self, card_id: i64, template_id: i64) -> ApiResult<Checklist> {
        self.post(
            &format!("kanban/cards/{}/checklists", card_id),
            &ApplyChecklistTemplate { template_id },
        )
        .await
    }

    async fn toggle_checklist_item(&self, item_id: i64, completed: bool) -> ApiResult<()> {
        self.put::<_, serde_json::Value>(
            &format!("kanban/checklist-items/{}", item_id),
            &ChecklistItemToggle { is_completed: completed },
        )
        .await
        .map(|_| ())
    }
}

pub async fn card_checklists(client: &ApiClient, card_id: i64) -> ApiResult<Vec<Checklist>> {
    client.get(&format!("kanban/cards/{}/checklists", card_id)).await
}

pub async fn upload_card_attachment(
    client: &ApiClient,
    card_id: i64,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> ApiResult<Attachment> {
    let part = Part::bytes(bytes).file_name(file_name.to_string()).mime_str(mime)?;
    let form = Form::new().part("file", part);
    client
        .post_multipart(&format!("kanban/cards/{}/attachments", card_id), form)
        .await
}
