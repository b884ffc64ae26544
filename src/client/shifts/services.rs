use std::future::Future;

use serde::Serialize;

use crate::client::http::ApiClient;
use crate::client::shifts::models::{
    ApplyTemplateRequest, AutoAssignRequest, BulkResult, CopyWeekRequest, DateRangeQuery, Department,
    EntryMove, LeaveRequest, LeaveStatus, LeaveStatusUpdate, NewLeaveRequest, NewOffDay,
    NewShiftAssignment, NewShiftSchedule, OffDay, Personnel, PersonnelGroup, ShiftAssignment,
    ShiftSchedule, ShiftTemplate,
};
use crate::error::ApiResult;

/// Shift-scheduling endpoints. View-models are generic over this so they can
/// run against the real backend or an in-memory stand-in.
pub trait ShiftsApi: Clone + Send + Sync + 'static {
    fn weekly_shifts(&self, query: &DateRangeQuery) -> impl Future<Output = ApiResult<Vec<ShiftAssignment>>> + Send;
    fn off_days(&self, query: &DateRangeQuery) -> impl Future<Output = ApiResult<Vec<OffDay>>> + Send;
    fn leave_requests(&self, query: &DateRangeQuery) -> impl Future<Output = ApiResult<Vec<LeaveRequest>>> + Send;
    fn personnel(&self, department_id: i64) -> impl Future<Output = ApiResult<Vec<Personnel>>> + Send;

    fn create_assignment(
        &self,
        body: &NewShiftAssignment,
    ) -> impl Future<Output = ApiResult<Option<ShiftAssignment>>> + Send;
    fn move_assignment(&self, id: i64, body: &EntryMove) -> impl Future<Output = ApiResult<()>> + Send;
    fn delete_assignment(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send;

    fn create_off_day(&self, body: &NewOffDay) -> impl Future<Output = ApiResult<Option<OffDay>>> + Send;
    fn move_off_day(&self, id: i64, body: &EntryMove) -> impl Future<Output = ApiResult<()>> + Send;
    fn delete_off_day(&self, id: i64) -> impl Future<Output = ApiResult<()>> + Send;

    fn create_leave_request(
        &self,
        body: &NewLeaveRequest,
    ) -> impl Future<Output = ApiResult<Option<LeaveRequest>>> + Send;
    fn set_leave_status(&self, id: i64, status: LeaveStatus) -> impl Future<Output = ApiResult<()>> + Send;

    fn shift_schedules(&self) -> impl Future<Output = ApiResult<Vec<ShiftSchedule>>> + Send;

    fn copy_last_week(&self, body: &CopyWeekRequest) -> impl Future<Output = ApiResult<BulkResult>> + Send;
    fn auto_assign(&self, body: &AutoAssignRequest) -> impl Future<Output = ApiResult<BulkResult>> + Send;
    fn apply_template(&self, body: &ApplyTemplateRequest) -> impl Future<Output = ApiResult<BulkResult>> + Send;
}

impl ShiftsApi for ApiClient {
    async fn weekly_shifts(&self, query: &DateRangeQuery) -> ApiResult<Vec<ShiftAssignment>> {
        self.get_with_query("shifts/weekly-shifts", query).await
    }

    async fn off_days(&self, query: &DateRangeQuery) -> ApiResult<Vec<OffDay>> {
        self.get_with_query("shifts/off-days", query).await
    }

    async fn leave_requests(&self, query: &DateRangeQuery) -> ApiResult<Vec<LeaveRequest>> {
        self.get_with_query("shifts/leave-requests", query).await
    }

    async fn personnel(&self, department_id: i64) -> ApiResult<Vec<Personnel>> {
        self.get_with_query("personnel", &[("department_id", department_id)]).await
    }

    async fn create_assignment(&self, body: &NewShiftAssignment) -> ApiResult<Option<ShiftAssignment>> {
        self.post_created("shifts/assignments", body).await
    }

    async fn move_assignment(&self, id: i64, body: &EntryMove) -> ApiResult<()> {
        self.put::<_, serde_json::Value>(&format!("shifts/assignments/{}", id), body)
            .await
            .map(|_| ())
    }

    async fn delete_assignment(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("shifts/assignments/{}", id)).await
    }

    async fn create_off_day(&self, body: &NewOffDay) -> ApiResult<Option<OffDay>> {
        self.post_created("shifts/off-days", body).await
    }

    async fn move_off_day(&self, id: i64, body: &EntryMove) -> ApiResult<()> {
        self.put::<_, serde_json::Value>(&format!("shifts/off-days/{}", id), body)
            .await
            .map(|_| ())
    }

    async fn delete_off_day(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("shifts/off-days/{}", id)).await
    }

    async fn create_leave_request(&self, body: &NewLeaveRequest) -> ApiResult<Option<LeaveRequest>> {
        self.post_created("shifts/leave-requests", body).await
    }

    async fn set_leave_status(&self, id: i64, status: LeaveStatus) -> ApiResult<()> {
        self.put::<_, serde_json::Value>(
            &format!("shifts/leave-requests/{}", id),
            &LeaveStatusUpdate { status },
        )
        .await
        .map(|_| ())
    }

    async fn shift_schedules(&self) -> ApiResult<Vec<ShiftSchedule>> {
        self.get("shifts/schedules").await
    }

    async fn copy_last_week(&self, body: &CopyWeekRequest) -> ApiResult<BulkResult> {
        post_bulk(self, "shifts/copy-last-week", body).await
    }

    async fn auto_assign(&self, body: &AutoAssignRequest) -> ApiResult<BulkResult> {
        post_bulk(self, "shifts/auto-assign", body).await
    }

    async fn apply_template(&self, body: &ApplyTemplateRequest) -> ApiResult<BulkResult> {
        let path = format!("shifts/templates/{}/apply", body.template_id);
        post_bulk(self, &path, body).await
    }
}

/// Bulk endpoints may answer with an empty body; that counts as success.
async fn post_bulk<B: Serialize>(client: &ApiClient, path: &str, body: &B) -> ApiResult<BulkResult> {
    let value: serde_json::Value = client.post(path, body).await?;
    if value.is_null() {
        return Ok(BulkResult::default());
    }
    Ok(serde_json::from_value(value)?)
}

// Settings screens: reference data that the grid and bulk forms select from.

pub async fn departments(client: &ApiClient) -> ApiResult<Vec<Department>> {
    client.get("departments").await
}

pub async fn personnel_groups(client: &ApiClient) -> ApiResult<Vec<PersonnelGroup>> {
    client.get("shifts/groups").await
}

pub async fn shift_templates(client: &ApiClient) -> ApiResult<Vec<ShiftTemplate>> {
    client.get("shifts/templates").await
}

pub async fn create_shift_schedule(client: &ApiClient, body: &NewShiftSchedule) -> ApiResult<ShiftSchedule> {
    client.post("shifts/schedules", body).await
}

pub async fn update_shift_schedule(
    client: &ApiClient,
    id: i64,
    body: &NewShiftSchedule,
) -> ApiResult<ShiftSchedule> {
    client.put(&format!("shifts/schedules/{}", id), body).await
}

pub async fn delete_shift_schedule(client: &ApiClient, id: i64) -> ApiResult<()> {
    client.delete(&format!("shifts/schedules/{}", id)).await
}
