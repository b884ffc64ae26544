use chrono::NaiveDate;

use crate::client::shifts::models::{BulkResult, Personnel, ShiftSchedule};
use crate::client::shifts::services::ShiftsApi;
use crate::error::{ApiError, ApiResult, DragError, SubmitError};
use crate::notify::{Notice, Notifier};
use crate::view::bulk::{BulkForm, BulkMode, BulkRequest};
use crate::view::create::{CreateFlow, CreateRequest};
use crate::view::drag::{Cell, DragState, MoveRequest};
use crate::view::week::{CalendarEntry, EntryKind, Week, cell_entries, merge_entries};

/// One personnel row of the grid, Monday first.
#[derive(Debug)]
pub struct GridRow<'a> {
    pub person: &'a Personnel,
    pub days: [Vec<&'a CalendarEntry>; 7],
}

/// View-model behind the weekly shift calendar.
///
/// All data is server-owned: every mutation is sent, then the whole week is
/// fetched again. Failures raise a notice and leave the loaded week as it was.
pub struct WeeklyCalendar<A: ShiftsApi, N: Notifier> {
    api: A,
    notifier: N,
    department_id: i64,
    week: Week,
    personnel: Vec<Personnel>,
    entries: Vec<CalendarEntry>,
    schedules: Vec<ShiftSchedule>,
    drag: DragState,
    create: CreateFlow,
    bulk: BulkForm,
    loading: bool,
}

impl<A: ShiftsApi, N: Notifier> WeeklyCalendar<A, N> {
    pub fn new(api: A, notifier: N, department_id: i64, anchor: NaiveDate) -> Self {
        WeeklyCalendar {
            api,
            notifier,
            department_id,
            week: Week::containing(anchor),
            personnel: Vec::new(),
            entries: Vec::new(),
            schedules: Vec::new(),
            drag: DragState::Idle,
            create: CreateFlow::Closed,
            bulk: BulkForm::default(),
            loading: false,
        }
    }

    pub fn week(&self) -> Week {
        self.week
    }

    pub fn department_id(&self) -> i64 {
        self.department_id
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn personnel(&self) -> &[Personnel] {
        &self.personnel
    }

    pub fn schedules(&self) -> &[ShiftSchedule] {
        &self.schedules
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn create_flow(&self) -> CreateFlow {
        self.create
    }

    /// Loads the week and the shift schedules offered by the create flow.
    pub async fn open(&mut self) -> ApiResult<()> {
        self.refresh().await?;
        match self.api.shift_schedules().await {
            Ok(schedules) => {
                self.schedules = schedules;
                Ok(())
            }
            Err(e) => Err(self.report("loading shift schedules", e)),
        }
    }

    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.load(self.week, self.department_id).await
    }

    pub async fn go_to(&mut self, anchor: NaiveDate) -> ApiResult<()> {
        self.load(Week::containing(anchor), self.department_id).await
    }

    pub async fn next_week(&mut self) -> ApiResult<()> {
        self.load(self.week.next(), self.department_id).await
    }

    pub async fn previous_week(&mut self) -> ApiResult<()> {
        self.load(self.week.previous(), self.department_id).await
    }

    pub async fn set_department(&mut self, department_id: i64) -> ApiResult<()> {
        self.load(self.week, department_id).await
    }

    /// The merge only happens once every fetch has succeeded, so a failure
    /// never shows a partial week.
    async fn load(&mut self, week: Week, department_id: i64) -> ApiResult<()> {
        let query = week.query(department_id);
        self.loading = true;
        let fetched = futures::try_join!(
            self.api.weekly_shifts(&query),
            self.api.off_days(&query),
            self.api.leave_requests(&query),
            self.api.personnel(department_id),
        );
        self.loading = false;

        match fetched {
            Ok((shifts, off_days, leaves, personnel)) => {
                tracing::debug!(
                    "week {} dept {}: {} shifts, {} off-days, {} leave requests",
                    week.start(),
                    department_id,
                    shifts.len(),
                    off_days.len(),
                    leaves.len()
                );
                self.week = week;
                self.department_id = department_id;
                self.entries = merge_entries(shifts, off_days, leaves);
                self.personnel = personnel;
                Ok(())
            }
            Err(e) => Err(self.report("loading the week", e)),
        }
    }

    pub fn cell(&self, personnel_id: i64, day: NaiveDate) -> Vec<&CalendarEntry> {
        cell_entries(&self.entries, personnel_id, day)
    }

    pub fn rows(&self) -> Vec<GridRow<'_>> {
        let days = self.week.days();
        self.personnel
            .iter()
            .map(|person| GridRow {
                person,
                days: std::array::from_fn(|i| self.cell(person.id, days[i])),
            })
            .collect()
    }

    fn find(&self, kind: EntryKind, id: i64) -> Option<&CalendarEntry> {
        self.entries.iter().find(|e| e.key() == (kind, id))
    }

    pub fn begin_drag(&mut self, kind: EntryKind, id: i64) -> Result<(), DragError> {
        let entry = self.find(kind, id).ok_or(DragError::UnknownEntry(kind_name(kind), id))?;
        let next = self.drag.begin(entry)?;
        self.drag = next;
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        self.drag = self.drag.cancel();
    }

    /// Returns `true` once the move is accepted by the server, `false` when
    /// the drop landed outside the grid.
    pub async fn drop_on(&mut self, target: Option<Cell>) -> Result<bool, SubmitError> {
        let dropped = self.drag.drop_on(target).inspect_err(|_| self.drag = DragState::Idle)?;
        let (state, request) = dropped.settle();
        self.drag = state;

        let Some(request) = request else {
            return Ok(false);
        };
        let sent = match &request {
            MoveRequest::Shift { id, body } => self.api.move_assignment(*id, body).await,
            MoveRequest::OffDay { id, body } => self.api.move_off_day(*id, body).await,
        };
        if let Err(e) = sent {
            return Err(self.report("moving the entry", e).into());
        }

        self.notifier.notify(Notice::Success("entry moved".to_string()));
        self.reload_after_write().await;
        Ok(true)
    }

    pub fn click_cell(&mut self, cell: Cell) {
        self.create = CreateFlow::open(cell);
    }

    pub fn choose_shift(&mut self) {
        self.create = self.create.choose_shift();
    }

    pub fn select_schedule(&mut self, shift_schedule_id: i64) {
        self.create = self.create.select_schedule(shift_schedule_id);
    }

    pub fn close_create(&mut self) {
        self.create = self.create.close();
    }

    pub async fn choose_off_day(&mut self) -> Result<bool, SubmitError> {
        let (flow, request) = self.create.choose_off_day();
        self.create = flow;
        match request {
            Some(request) => self.submit_create(request).await.map(|_| true),
            None => Ok(false),
        }
    }

    pub async fn confirm_shift(&mut self) -> Result<(), SubmitError> {
        let (flow, request) = match self.create.confirm_shift() {
            Ok(done) => done,
            Err(e) => {
                self.notifier.notify(Notice::Error(e.to_string()));
                return Err(e.into());
            }
        };
        self.create = flow;
        self.submit_create(request).await
    }

    async fn submit_create(&mut self, request: CreateRequest) -> Result<(), SubmitError> {
        let sent = match &request {
            CreateRequest::Shift(body) => self.api.create_assignment(body).await.map(|_| ()),
            CreateRequest::OffDay(body) => self.api.create_off_day(body).await.map(|_| ()),
        };
        if let Err(e) = sent {
            return Err(self.report("creating the entry", e).into());
        }
        self.notifier.notify(Notice::Success("entry created".to_string()));
        self.reload_after_write().await;
        Ok(())
    }

    pub async fn delete_entry(&mut self, kind: EntryKind, id: i64) -> Result<(), SubmitError> {
        let sent = match kind {
            EntryKind::Shift => self.api.delete_assignment(id).await,
            EntryKind::OffDay => self.api.delete_off_day(id).await,
            EntryKind::LeaveRequest => return Err(DragError::NotDraggable(id).into()),
        };
        if let Err(e) = sent {
            return Err(self.report("deleting the entry", e).into());
        }
        self.reload_after_write().await;
        Ok(())
    }

    pub fn bulk_form(&self) -> &BulkForm {
        &self.bulk
    }

    pub fn bulk_form_mut(&mut self) -> &mut BulkForm {
        &mut self.bulk
    }

    /// Opens the bulk dialog pre-filled with the current week and department.
    pub fn open_bulk(&mut self, mode: BulkMode) {
        let mut form = BulkForm::new(mode).with_range(self.week.start(), self.week.end());
        form.department_id = Some(self.department_id);
        self.bulk = form;
    }

    pub async fn submit_bulk(&mut self) -> Result<BulkResult, SubmitError> {
        let request = match self.bulk.validate() {
            Ok(request) => request,
            Err(e) => {
                self.notifier.notify(Notice::Error(e.to_string()));
                return Err(e.into());
            }
        };

        let sent = match &request {
            BulkRequest::CopyLastWeek(body) => self.api.copy_last_week(body).await,
            BulkRequest::AutoAssign(body) => self.api.auto_assign(body).await,
            BulkRequest::ApplyTemplate(body) => self.api.apply_template(body).await,
        };
        let result = match sent {
            Ok(result) => result,
            Err(e) => return Err(self.report("bulk assignment", e).into()),
        };

        let message = result
            .message
            .clone()
            .unwrap_or_else(|| "bulk assignment completed".to_string());
        self.notifier.notify(Notice::Success(message));
        self.reload_after_write().await;
        Ok(result)
    }

    /// The write already went through; a failed reload has been reported and
    /// leaves the previous state on screen.
    async fn reload_after_write(&mut self) {
        let _ = self.refresh().await;
    }

    fn report(&self, context: &str, err: ApiError) -> ApiError {
        tracing::error!("{} failed: {}", context, err);
        self.notifier.notify(Notice::from_api_error(context, &err));
        err
    }
}

fn kind_name(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Shift => "shift",
        EntryKind::OffDay => "off-day",
        EntryKind::LeaveRequest => "leave request",
    }
}
