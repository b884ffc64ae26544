use chrono::NaiveDate;

use crate::client::shifts::models::{ApplyTemplateRequest, AutoAssignRequest, CopyWeekRequest};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkMode {
    #[default]
    CopyLastWeek,
    AutoAssign,
    ApplyTemplate,
}

/// Which tab of the template target selector is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateTarget {
    #[default]
    Personnel,
    Groups,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BulkRequest {
    CopyLastWeek(CopyWeekRequest),
    AutoAssign(AutoAssignRequest),
    ApplyTemplate(ApplyTemplateRequest),
}

/// State of the bulk-assignment dialog. Every mode reads the shared date
/// range; the other fields are used only by the modes that need them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkForm {
    pub mode: BulkMode,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub department_id: Option<i64>,
    pub personnel_ids: Vec<i64>,
    pub group_ids: Vec<i64>,
    pub shift_schedule_id: Option<i64>,
    /// ISO weekday numbers, Monday = 1.
    pub days_off: Vec<u32>,
    pub include_weekends: bool,
    pub template_id: Option<i64>,
    pub target: TemplateTarget,
}

impl BulkForm {
    pub fn new(mode: BulkMode) -> Self {
        BulkForm {
            mode,
            ..Default::default()
        }
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn toggle_person(&mut self, personnel_id: i64) {
        toggle(&mut self.personnel_ids, personnel_id);
    }

    pub fn toggle_group(&mut self, group_id: i64) {
        toggle(&mut self.group_ids, group_id);
    }

    pub fn toggle_day_off(&mut self, iso_weekday: u32) {
        toggle(&mut self.days_off, iso_weekday);
        self.days_off.sort_unstable();
    }

    fn range(&self) -> Result<(NaiveDate, NaiveDate), ValidationError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end < start => {
                Err(ValidationError::InvertedDateRange { start, end })
            }
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(ValidationError::MissingDateRange),
        }
    }

    /// Required-field checks only; conflicts are the server's business.
    pub fn validate(&self) -> Result<BulkRequest, ValidationError> {
        match self.mode {
            BulkMode::CopyLastWeek => {
                let (start_date, end_date) = self.range()?;
                let department_id = self.department_id.ok_or(ValidationError::MissingDepartment)?;
                Ok(BulkRequest::CopyLastWeek(CopyWeekRequest {
                    start_date,
                    end_date,
                    department_id,
                }))
            }
            BulkMode::AutoAssign => {
                let (start_date, end_date) = self.range()?;
                let department_id = self.department_id.ok_or(ValidationError::MissingDepartment)?;
                if self.personnel_ids.is_empty() {
                    return Err(ValidationError::NoPersonnel);
                }
                let shift_schedule_id = self
                    .shift_schedule_id
                    .ok_or(ValidationError::MissingShiftSchedule)?;
                Ok(BulkRequest::AutoAssign(AutoAssignRequest {
                    start_date,
                    end_date,
                    department_id,
                    personnel_ids: self.personnel_ids.clone(),
                    shift_schedule_id,
                    days_off: self.days_off.clone(),
                    include_weekends: self.include_weekends,
                }))
            }
            BulkMode::ApplyTemplate => {
                let template_id = self.template_id.ok_or(ValidationError::MissingTemplate)?;
                let (start_date, end_date) = self.range()?;
                let (personnel_ids, group_ids) = match self.target {
                    TemplateTarget::Personnel if self.personnel_ids.is_empty() => {
                        return Err(ValidationError::NoPersonnel);
                    }
                    TemplateTarget::Groups if self.group_ids.is_empty() => {
                        return Err(ValidationError::NoGroups);
                    }
                    TemplateTarget::Personnel => (Some(self.personnel_ids.clone()), None),
                    TemplateTarget::Groups => (None, Some(self.group_ids.clone())),
                };
                Ok(BulkRequest::ApplyTemplate(ApplyTemplateRequest {
                    template_id,
                    start_date,
                    end_date,
                    personnel_ids,
                    group_ids,
                }))
            }
        }
    }
}

fn toggle<T: PartialEq>(ids: &mut Vec<T>, id: T) {
    match ids.iter().position(|x| *x == id) {
        Some(index) => {
            ids.remove(index);
        }
        None => ids.push(id),
    }
}
