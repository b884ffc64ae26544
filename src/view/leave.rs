use chrono::NaiveDate;

use crate::client::shifts::models::{DateRangeQuery, LeaveRequest, LeaveStatus, NewLeaveRequest};
use crate::client::shifts::services::ShiftsApi;
use crate::error::{ApiError, ApiResult, SubmitError, ValidationError};
use crate::notify::{Notice, Notifier};

/// Leave-management list: fetch, filter by status, approve or reject.
pub struct LeaveRequestsView<A: ShiftsApi, N: Notifier> {
    api: A,
    notifier: N,
    query: DateRangeQuery,
    filter: Option<LeaveStatus>,
    requests: Vec<LeaveRequest>,
}

impl<A: ShiftsApi, N: Notifier> LeaveRequestsView<A, N> {
    pub fn new(api: A, notifier: N, query: DateRangeQuery) -> Self {
        LeaveRequestsView {
            api,
            notifier,
            query,
            filter: None,
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[LeaveRequest] {
        &self.requests
    }

    pub fn set_filter(&mut self, filter: Option<LeaveStatus>) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&LeaveRequest> {
        self.requests
            .iter()
            .filter(|r| self.filter.is_none_or(|status| r.status == status))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.requests.iter().filter(|r| r.status == LeaveStatus::Pending).count()
    }

    pub async fn refresh(&mut self) -> ApiResult<()> {
        match self.api.leave_requests(&self.query).await {
            Ok(requests) => {
                self.requests = requests;
                Ok(())
            }
            Err(e) => Err(self.report("loading leave requests", e)),
        }
    }

    pub async fn set_range(&mut self, start: NaiveDate, end: NaiveDate) -> ApiResult<()> {
        self.query.start_date = start;
        self.query.end_date = end;
        self.refresh().await
    }

    pub async fn approve(&mut self, id: i64) -> ApiResult<()> {
        self.set_status(id, LeaveStatus::Approved).await
    }

    pub async fn reject(&mut self, id: i64) -> ApiResult<()> {
        self.set_status(id, LeaveStatus::Rejected).await
    }

    /// Sends the target status; whether the transition is legal is decided
    /// by the server.
    pub async fn set_status(&mut self, id: i64, status: LeaveStatus) -> ApiResult<()> {
        if let Err(e) = self.api.set_leave_status(id, status).await {
            return Err(self.report("updating the leave request", e));
        }
        tracing::info!("leave request {} set to {}", id, status);
        self.notifier.notify(Notice::Success(format!("leave request {}", status)));
        self.reload_after_write().await;
        Ok(())
    }

    /// Returns the created request when the server echoes it back.
    pub async fn create(
        &mut self,
        personnel_id: Option<i64>,
        leave_date: Option<NaiveDate>,
        reason: Option<String>,
    ) -> Result<Option<LeaveRequest>, SubmitError> {
        let (personnel_id, leave_date) = match (personnel_id, leave_date) {
            (Some(p), Some(d)) => (p, d),
            (None, _) => return Err(self.reject_form(ValidationError::Required("personnel"))),
            (_, None) => return Err(self.reject_form(ValidationError::Required("leave date"))),
        };
        let body = NewLeaveRequest {
            personnel_id,
            leave_date,
            reason: reason.filter(|r| !r.trim().is_empty()),
        };

        let created = match self.api.create_leave_request(&body).await {
            Ok(created) => created,
            Err(e) => return Err(self.report("creating the leave request", e).into()),
        };
        self.notifier.notify(Notice::Success("leave request created".to_string()));
        self.reload_after_write().await;
        Ok(created)
    }

    /// The write already went through; a failed reload has been reported and
    /// leaves the previous state on screen.
    async fn reload_after_write(&mut self) {
        let _ = self.refresh().await;
    }

    fn reject_form(&self, err: ValidationError) -> SubmitError {
        self.notifier.notify(Notice::Error(err.to_string()));
        err.into()
    }

    fn report(&self, context: &str, err: ApiError) -> ApiError {
        tracing::error!("{} failed: {}", context, err);
        self.notifier.notify(Notice::from_api_error(context, &err));
        err
    }
}
