use crate::client::shifts::models::{NewOffDay, NewShiftAssignment};
use crate::error::ValidationError;
use crate::view::drag::Cell;

/// Click-to-create flow for an empty grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateFlow {
    #[default]
    Closed,
    /// "Add shift" or "add off-day"?
    Choosing(Cell),
    /// Shift chosen; waiting for a shift schedule.
    PickingSchedule {
        cell: Cell,
        shift_schedule_id: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CreateRequest {
    Shift(NewShiftAssignment),
    OffDay(NewOffDay),
}

impl CreateFlow {
    pub fn open(cell: Cell) -> Self {
        CreateFlow::Choosing(cell)
    }

    pub fn cell(&self) -> Option<Cell> {
        match self {
            CreateFlow::Closed => None,
            CreateFlow::Choosing(cell) | CreateFlow::PickingSchedule { cell, .. } => Some(*cell),
        }
    }

    pub fn choose_shift(self) -> Self {
        match self {
            CreateFlow::Choosing(cell) => CreateFlow::PickingSchedule {
                cell,
                shift_schedule_id: None,
            },
            other => other,
        }
    }

    /// Off-days need no further input: the request is ready immediately.
    pub fn choose_off_day(self) -> (Self, Option<CreateRequest>) {
        match self {
            CreateFlow::Choosing(cell) => (
                CreateFlow::Closed,
                Some(CreateRequest::OffDay(NewOffDay {
                    personnel_id: cell.personnel_id,
                    assignment_date: cell.date,
                })),
            ),
            other => (other, None),
        }
    }

    pub fn select_schedule(self, shift_schedule_id: i64) -> Self {
        match self {
            CreateFlow::PickingSchedule { cell, .. } => CreateFlow::PickingSchedule {
                cell,
                shift_schedule_id: Some(shift_schedule_id),
            },
            other => other,
        }
    }

    pub fn confirm_shift(self) -> Result<(Self, CreateRequest), ValidationError> {
        match self {
            CreateFlow::PickingSchedule {
                cell,
                shift_schedule_id: Some(shift_schedule_id),
            } => Ok((
                CreateFlow::Closed,
                CreateRequest::Shift(NewShiftAssignment {
                    personnel_id: cell.personnel_id,
                    shift_schedule_id,
                    assignment_date: cell.date,
                }),
            )),
            _ => Err(ValidationError::MissingShiftSchedule),
        }
    }

    pub fn close(self) -> Self {
        CreateFlow::Closed
    }
}
