pub mod bulk;
pub mod calendar;
pub mod create;
pub mod drag;
pub mod kanban;
pub mod leave;
pub mod meetings;
pub mod week;
