use chrono::{Datelike, Duration, NaiveDate};

use crate::client::shifts::models::{DateRangeQuery, LeaveRequest, OffDay, ShiftAssignment};

pub fn start_of_week(anchor: NaiveDate) -> NaiveDate {
    anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64)
}

pub fn end_of_week(anchor: NaiveDate) -> NaiveDate {
    start_of_week(anchor) + Duration::days(6)
}

/// A Monday–Sunday week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    pub fn containing(anchor: NaiveDate) -> Self {
        Week {
            start: start_of_week(anchor),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| self.start + Duration::days(i as i64))
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end()
    }

    pub fn next(&self) -> Self {
        Week {
            start: self.start + Duration::days(7),
        }
    }

    pub fn previous(&self) -> Self {
        Week {
            start: self.start - Duration::days(7),
        }
    }

    pub fn query(&self, department_id: i64) -> DateRangeQuery {
        DateRangeQuery {
            start_date: self.start(),
            end_date: self.end(),
            department_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Shift,
    OffDay,
    LeaveRequest,
}

/// One record shown in the grid, tagged by where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEntry {
    Shift(ShiftAssignment),
    OffDay(OffDay),
    Leave(LeaveRequest),
}

impl CalendarEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            CalendarEntry::Shift(_) => EntryKind::Shift,
            CalendarEntry::OffDay(_) => EntryKind::OffDay,
            CalendarEntry::Leave(_) => EntryKind::LeaveRequest,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            CalendarEntry::Shift(s) => s.id,
            CalendarEntry::OffDay(o) => o.id,
            CalendarEntry::Leave(l) => l.id,
        }
    }

    /// Ids are only unique within one kind.
    pub fn key(&self) -> (EntryKind, i64) {
        (self.kind(), self.id())
    }

    pub fn personnel_id(&self) -> i64 {
        match self {
            CalendarEntry::Shift(s) => s.personnel_id,
            CalendarEntry::OffDay(o) => o.personnel_id,
            CalendarEntry::Leave(l) => l.personnel_id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarEntry::Shift(s) => s.assignment_date,
            CalendarEntry::OffDay(o) => o.assignment_date,
            CalendarEntry::Leave(l) => l.leave_date,
        }
    }

    pub fn is_off_day(&self) -> bool {
        matches!(self, CalendarEntry::OffDay(_))
    }

    pub fn is_leave_request(&self) -> bool {
        matches!(self, CalendarEntry::Leave(_))
    }

    pub fn is_draggable(&self) -> bool {
        !self.is_leave_request()
    }

    pub fn at(&self, personnel_id: i64, day: NaiveDate) -> bool {
        self.personnel_id() == personnel_id && self.date() == day
    }
}

/// Concatenates the three week lists: shifts, then off-days, then leave.
pub fn merge_entries(
    shifts: Vec<ShiftAssignment>,
    off_days: Vec<OffDay>,
    leaves: Vec<LeaveRequest>,
) -> Vec<CalendarEntry> {
    let mut entries = Vec::with_capacity(shifts.len() + off_days.len() + leaves.len());
    entries.extend(shifts.into_iter().map(CalendarEntry::Shift));
    entries.extend(off_days.into_iter().map(CalendarEntry::OffDay));
    entries.extend(leaves.into_iter().map(CalendarEntry::Leave));
    entries
}

pub fn cell_entries(entries: &[CalendarEntry], personnel_id: i64, day: NaiveDate) -> Vec<&CalendarEntry> {
    entries.iter().filter(|e| e.at(personnel_id, day)).collect()
}
