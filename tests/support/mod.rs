#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use reqwest::StatusCode;
use tokio::sync::oneshot;

use hr_dashboard_client::client::kanban::models::{Board, BoardList, Card, CardPosition, CardUpdate, Checklist, NewCard};
use hr_dashboard_client::client::kanban::services::KanbanApi;
use hr_dashboard_client::client::shifts::models::{
    ApplyTemplateRequest, AutoAssignRequest, BulkResult, CopyWeekRequest, DateRangeQuery, EntryMove, LeaveRequest,
    LeaveStatus, NewLeaveRequest, NewOffDay, NewShiftAssignment, OffDay, Personnel, ShiftAssignment, ShiftSchedule,
};
use hr_dashboard_client::client::shifts::services::ShiftsApi;
use hr_dashboard_client::error::{ApiError, ApiResult};

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ============================================================================
// Recording HTTP server
// ============================================================================

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    method: String,
    path: String,
    status: u16,
    body: String,
}

impl Route {
    pub fn new(method: &str, path: &str, status: u16, body: serde_json::Value) -> Self {
        Route {
            method: method.to_string(),
            path: format!("/api/{}", path.trim_start_matches('/')),
            status,
            body: body.to_string(),
        }
    }

    pub fn empty(method: &str, path: &str, status: u16) -> Self {
        Route {
            body: String::new(),
            ..Route::new(method, path, status, serde_json::Value::Null)
        }
    }
}

struct ServerState {
    routes: Vec<Route>,
    requests: Mutex<Vec<Recorded>>,
}

/// In-process backend answering canned JSON per `(method, path)`.
/// Unknown routes answer 404.
pub struct TestServer {
    pub base_url: String,
    state: Arc<ServerState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let state = Arc::new(ServerState {
            routes,
            requests: Mutex::new(Vec::new()),
        });

        let svc_state = state.clone();
        let make_svc = make_service_fn(move |_conn| {
            let state = svc_state.clone();
            async move { Ok::<_, Infallible>(service_fn(move |req| handle(state.clone(), req))) }
        });

        let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
        let server = Server::bind(&addr).serve(make_svc);
        let local = server.local_addr();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(server.with_graceful_shutdown(async {
            rx.await.ok();
        }));

        TestServer {
            base_url: format!("http://{}/api", local),
            state,
            shutdown: Some(tx),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        let full = format!("/api/{}", path.trim_start_matches('/'));
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == full)
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(state: Arc<ServerState>, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let authorization = req
        .headers()
        .get(hyper::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = hyper::body::to_bytes(req.into_body()).await.unwrap_or_default();

    state.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query,
        authorization,
        body: String::from_utf8_lossy(&bytes).to_string(),
    });

    let (status, body) = match state.routes.iter().find(|r| r.method == method && r.path == path) {
        Some(route) => (route.status, route.body.clone()),
        None => (404, r#"{"error":"not found"}"#.to_string()),
    };

    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap())
}

// ============================================================================
// In-memory shifts backend
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Failure {
    Server,
    Unauthorized,
}

impl Failure {
    fn error(self) -> ApiError {
        match self {
            Failure::Server => ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "database unavailable".to_string(),
            },
            Failure::Unauthorized => ApiError::Unauthorized,
        }
    }
}

#[derive(Debug, Default)]
pub struct ShiftsData {
    pub shifts: Vec<ShiftAssignment>,
    pub off_days: Vec<OffDay>,
    pub leaves: Vec<LeaveRequest>,
    pub personnel: Vec<Personnel>,
    pub schedules: Vec<ShiftSchedule>,
    pub calls: Vec<String>,
    pub failure: Option<Failure>,
    pub read_failure: Option<Failure>,
    next_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct FakeShiftsApi {
    pub data: Arc<Mutex<ShiftsData>>,
}

impl FakeShiftsApi {
    pub fn new() -> Self {
        let fake = FakeShiftsApi::default();
        fake.data.lock().unwrap().next_id = 1000;
        fake
    }

    pub fn with_personnel(self, people: &[(i64, &str, &str)]) -> Self {
        self.data.lock().unwrap().personnel = people
            .iter()
            .map(|(id, first, last)| Personnel {
                id: *id,
                first_name: first.to_string(),
                last_name: last.to_string(),
                department_id: Some(3),
                photo_url: None,
            })
            .collect();
        self
    }

    pub fn add_shift(&self, id: i64, personnel_id: i64, date: &str) {
        self.data.lock().unwrap().shifts.push(ShiftAssignment {
            id,
            personnel_id,
            shift_schedule_id: 1,
            assignment_date: day(date),
            status: None,
            shift_schedule: None,
        });
    }

    pub fn add_off_day(&self, id: i64, personnel_id: i64, date: &str) {
        self.data.lock().unwrap().off_days.push(OffDay {
            id,
            personnel_id,
            assignment_date: day(date),
        });
    }

    pub fn add_leave(&self, id: i64, personnel_id: i64, date: &str, status: LeaveStatus) {
        self.data.lock().unwrap().leaves.push(LeaveRequest {
            id,
            personnel_id,
            leave_date: day(date),
            status,
            reason: None,
        });
    }

    pub fn fail_with(&self, failure: Option<Failure>) {
        self.data.lock().unwrap().failure = failure;
    }

    /// Fails only the GETs, so writes still land.
    pub fn fail_reads_with(&self, failure: Option<Failure>) {
        self.data.lock().unwrap().read_failure = failure;
    }

    pub fn calls(&self) -> Vec<String> {
        self.data.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.data.lock().unwrap().calls.clear();
    }

    /// Calls that change server state, i.e. everything but reads.
    pub fn writes(&self) -> Vec<String> {
        self.calls().into_iter().filter(|c| !c.starts_with("GET")).collect()
    }

    fn record(&self, call: String) -> ApiResult<std::sync::MutexGuard<'_, ShiftsData>> {
        let mut data = self.data.lock().unwrap();
        let failure = match data.read_failure {
            Some(failure) if call.starts_with("GET") => Some(failure),
            _ => data.failure,
        };
        data.calls.push(call);
        match failure {
            Some(failure) => Err(failure.error()),
            None => Ok(data),
        }
    }
}

fn in_range(date: NaiveDate, q: &DateRangeQuery) -> bool {
    date >= q.start_date && date <= q.end_date
}

impl ShiftsApi for FakeShiftsApi {
    async fn weekly_shifts(&self, query: &DateRangeQuery) -> ApiResult<Vec<ShiftAssignment>> {
        let data = self.record(format!("GET weekly-shifts {} {}", query.start_date, query.department_id))?;
        Ok(data.shifts.iter().filter(|s| in_range(s.assignment_date, query)).cloned().collect())
    }

    async fn off_days(&self, query: &DateRangeQuery) -> ApiResult<Vec<OffDay>> {
        let data = self.record(format!("GET off-days {} {}", query.start_date, query.department_id))?;
        Ok(data.off_days.iter().filter(|o| in_range(o.assignment_date, query)).cloned().collect())
    }

    async fn leave_requests(&self, query: &DateRangeQuery) -> ApiResult<Vec<LeaveRequest>> {
        let data = self.record(format!("GET leave-requests {} {}", query.start_date, query.department_id))?;
        Ok(data.leaves.iter().filter(|l| in_range(l.leave_date, query)).cloned().collect())
    }

    async fn personnel(&self, department_id: i64) -> ApiResult<Vec<Personnel>> {
        let data = self.record(format!("GET personnel {}", department_id))?;
        Ok(data.personnel.clone())
    }

    async fn create_assignment(&self, body: &NewShiftAssignment) -> ApiResult<Option<ShiftAssignment>> {
        let mut data = self.record(format!(
            "POST assignments {} {} {}",
            body.personnel_id, body.assignment_date, body.shift_schedule_id
        ))?;
        data.next_id += 1;
        let created = ShiftAssignment {
            id: data.next_id,
            personnel_id: body.personnel_id,
            shift_schedule_id: body.shift_schedule_id,
            assignment_date: body.assignment_date,
            status: None,
            shift_schedule: None,
        };
        data.shifts.push(created.clone());
        Ok(Some(created))
    }

    async fn move_assignment(&self, id: i64, body: &EntryMove) -> ApiResult<()> {
        let mut data = self.record(format!("PUT assignments/{} {} {}", id, body.personnel_id, body.assignment_date))?;
        if let Some(shift) = data.shifts.iter_mut().find(|s| s.id == id) {
            shift.personnel_id = body.personnel_id;
            shift.assignment_date = body.assignment_date;
        }
        Ok(())
    }

    async fn delete_assignment(&self, id: i64) -> ApiResult<()> {
        let mut data = self.record(format!("DELETE assignments/{}", id))?;
        data.shifts.retain(|s| s.id != id);
        Ok(())
    }

    async fn create_off_day(&self, body: &NewOffDay) -> ApiResult<Option<OffDay>> {
        let mut data = self.record(format!("POST off-days {} {}", body.personnel_id, body.assignment_date))?;
        data.next_id += 1;
        let created = OffDay {
            id: data.next_id,
            personnel_id: body.personnel_id,
            assignment_date: body.assignment_date,
        };
        data.off_days.push(created.clone());
        Ok(Some(created))
    }

    async fn move_off_day(&self, id: i64, body: &EntryMove) -> ApiResult<()> {
        let mut data = self.record(format!("PUT off-days/{} {} {}", id, body.personnel_id, body.assignment_date))?;
        if let Some(off) = data.off_days.iter_mut().find(|o| o.id == id) {
            off.personnel_id = body.personnel_id;
            off.assignment_date = body.assignment_date;
        }
        Ok(())
    }

    async fn delete_off_day(&self, id: i64) -> ApiResult<()> {
        let mut data = self.record(format!("DELETE off-days/{}", id))?;
        data.off_days.retain(|o| o.id != id);
        Ok(())
    }

    async fn create_leave_request(&self, body: &NewLeaveRequest) -> ApiResult<Option<LeaveRequest>> {
        let mut data = self.record(format!("POST leave-requests {} {}", body.personnel_id, body.leave_date))?;
        data.next_id += 1;
        let created = LeaveRequest {
            id: data.next_id,
            personnel_id: body.personnel_id,
            leave_date: body.leave_date,
            status: LeaveStatus::Pending,
            reason: body.reason.clone(),
        };
        data.leaves.push(created.clone());
        Ok(Some(created))
    }

    async fn set_leave_status(&self, id: i64, status: LeaveStatus) -> ApiResult<()> {
        let mut data = self.record(format!("PUT leave-requests/{} {}", id, status))?;
        if let Some(leave) = data.leaves.iter_mut().find(|l| l.id == id) {
            leave.status = status;
        }
        Ok(())
    }

    async fn shift_schedules(&self) -> ApiResult<Vec<ShiftSchedule>> {
        let data = self.record("GET schedules".to_string())?;
        Ok(data.schedules.clone())
    }

    async fn copy_last_week(&self, body: &CopyWeekRequest) -> ApiResult<BulkResult> {
        self.record(format!("POST copy-last-week {}", body.start_date))?;
        Ok(BulkResult::default())
    }

    async fn auto_assign(&self, body: &AutoAssignRequest) -> ApiResult<BulkResult> {
        self.record(format!("POST auto-assign {:?}", body.personnel_ids))?;
        Ok(BulkResult {
            created: Some(body.personnel_ids.len() as u32),
            skipped: None,
            message: Some("auto-assign done".to_string()),
        })
    }

    async fn apply_template(&self, body: &ApplyTemplateRequest) -> ApiResult<BulkResult> {
        self.record(format!("POST templates/{}/apply", body.template_id))?;
        Ok(BulkResult::default())
    }
}

// ============================================================================
// In-memory kanban backend
// ============================================================================

#[derive(Debug, Default)]
pub struct KanbanData {
    pub boards: Vec<Board>,
    pub calls: Vec<String>,
    pub failure: Option<Failure>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeKanbanApi {
    pub data: Arc<Mutex<KanbanData>>,
    fetches: Arc<AtomicUsize>,
}

impl FakeKanbanApi {
    /// One board with "To do" (list 1) and "Done" (list 2); card 7 sits in list 1.
    pub fn with_board() -> Self {
        let fake = FakeKanbanApi::default();
        fake.data.lock().unwrap().boards = vec![Board {
            id: 1,
            name: "HR".to_string(),
            lists: vec![
                BoardList {
                    id: 1,
                    title: "To do".to_string(),
                    position: 0,
                    cards: vec![card(7, 1, 0)],
                },
                BoardList {
                    id: 2,
                    title: "Done".to_string(),
                    position: 1,
                    cards: Vec::new(),
                },
            ],
        }];
        fake
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.data.lock().unwrap().calls.clone()
    }

    pub fn fail_with(&self, failure: Option<Failure>) {
        self.data.lock().unwrap().failure = failure;
    }

    fn record(&self, call: String) -> ApiResult<std::sync::MutexGuard<'_, KanbanData>> {
        let mut data = self.data.lock().unwrap();
        data.calls.push(call);
        match data.failure {
            Some(failure) => Err(failure.error()),
            None => Ok(data),
        }
    }
}

pub fn card(id: i64, list_id: i64, position: i64) -> Card {
    Card {
        id,
        list_id,
        title: format!("card {}", id),
        description: None,
        position,
        due_date: None,
        checklists: Vec::new(),
    }
}

impl KanbanApi for FakeKanbanApi {
    async fn boards(&self) -> ApiResult<Vec<Board>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let data = self.record("GET kanban".to_string())?;
        Ok(data.boards.clone())
    }

    async fn create_card(&self, body: &NewCard) -> ApiResult<Option<Card>> {
        let mut data = self.record(format!("POST cards {}", body.list_id))?;
        let created = card(100, body.list_id, 0);
        if let Some(list) = data.boards.iter_mut().flat_map(|b| b.lists.iter_mut()).find(|l| l.id == body.list_id) {
            list.cards.push(created.clone());
        }
        Ok(Some(created))
    }

    async fn update_card(&self, id: i64, _body: &CardUpdate) -> ApiResult<()> {
        self.record(format!("PUT cards/{}", id))?;
        Ok(())
    }

    async fn move_card(&self, id: i64, position: CardPosition) -> ApiResult<()> {
        let mut data = self.record(format!("PUT cards/{}/position {} {}", id, position.list_id, position.position))?;
        let mut moved = None;
        for list in data.boards.iter_mut().flat_map(|b| b.lists.iter_mut()) {
            if let Some(idx) = list.cards.iter().position(|c| c.id == id) {
                moved = Some(list.cards.remove(idx));
            }
        }
        if let Some(mut moved) = moved {
            moved.list_id = position.list_id;
            moved.position = position.position;
            if let Some(list) = data
                .boards
                .iter_mut()
                .flat_map(|b| b.lists.iter_mut())
                .find(|l| l.id == position.list_id)
            {
                list.cards.push(moved);
            }
        }
        Ok(())
    }

    async fn delete_card(&self, id: i64) -> ApiResult<()> {
        let mut data = self.record(format!("DELETE cards/{}", id))?;
        for list in data.boards.iter_mut().flat_map(|b| b.lists.iter_mut()) {
            list.cards.retain(|c| c.id != id);
        }
        Ok(())
    }

    async fn apply_checklist_template(&self, card_id: i64, template_id: i64) -> ApiResult<Checklist> {
        self.record(format!("POST cards/{}/checklists {}", card_id, template_id))?;
        Ok(Checklist {
            id: 1,
            title: "Onboarding".to_string(),
            items: Vec::new(),
        })
    }

    async fn toggle_checklist_item(&self, item_id: i64, completed: bool) -> ApiResult<()> {
        self.record(format!("PUT checklist-items/{} {}", item_id, completed))?;
        Ok(())
    }
}
