use chrono::NaiveDate;

use crate::client::shifts::models::EntryMove;
use crate::error::DragError;
use crate::view::week::CalendarEntry;

/// A grid cell: one person on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub personnel_id: i64,
    pub date: NaiveDate,
}

impl Cell {
    pub fn new(personnel_id: i64, date: NaiveDate) -> Self {
        Cell { personnel_id, date }
    }
}

/// What can be picked up. Leave requests have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragItem {
    Shift { id: i64, from: Cell },
    OffDay { id: i64, from: Cell },
}

impl DragItem {
    pub fn from_entry(entry: &CalendarEntry) -> Result<Self, DragError> {
        let from = Cell::new(entry.personnel_id(), entry.date());
        match entry {
            CalendarEntry::Shift(s) => Ok(DragItem::Shift { id: s.id, from }),
            CalendarEntry::OffDay(o) => Ok(DragItem::OffDay { id: o.id, from }),
            CalendarEntry::Leave(l) => Err(DragError::NotDraggable(l.id)),
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            DragItem::Shift { id, .. } | DragItem::OffDay { id, .. } => *id,
        }
    }

    pub fn origin(&self) -> Cell {
        match self {
            DragItem::Shift { from, .. } | DragItem::OffDay { from, .. } => *from,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragItem),
    Dropped { item: DragItem, target: Cell },
}

/// The single request a completed drop turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveRequest {
    Shift { id: i64, body: EntryMove },
    OffDay { id: i64, body: EntryMove },
}

impl DragState {
    pub fn begin(self, entry: &CalendarEntry) -> Result<DragState, DragError> {
        match self {
            DragState::Dragging(_) => Err(DragError::AlreadyDragging),
            DragState::Idle | DragState::Dropped { .. } => {
                Ok(DragState::Dragging(DragItem::from_entry(entry)?))
            }
        }
    }

    /// `None` means the pointer was released outside any cell: the drag is
    /// cancelled and nothing is sent.
    pub fn drop_on(self, target: Option<Cell>) -> Result<DragState, DragError> {
        match (self, target) {
            (DragState::Dragging(item), Some(target)) => Ok(DragState::Dropped { item, target }),
            (DragState::Dragging(_), None) => Ok(DragState::Idle),
            _ => Err(DragError::NotDragging),
        }
    }

    pub fn cancel(self) -> DragState {
        DragState::Idle
    }

    pub fn dragging(&self) -> Option<&DragItem> {
        match self {
            DragState::Dragging(item) => Some(item),
            _ => None,
        }
    }

    /// Consumes a `Dropped` state into its request and resets to `Idle`.
    pub fn settle(self) -> (DragState, Option<MoveRequest>) {
        match self {
            DragState::Dropped { item, target } => {
                let body = EntryMove {
                    assignment_date: target.date,
                    personnel_id: target.personnel_id,
                };
                let request = match item {
                    DragItem::Shift { id, .. } => MoveRequest::Shift { id, body },
                    DragItem::OffDay { id, .. } => MoveRequest::OffDay { id, body },
                };
                (DragState::Idle, Some(request))
            }
            other => (other, None),
        }
    }
}
