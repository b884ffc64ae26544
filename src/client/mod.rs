pub mod auth;
pub mod dates;
pub mod http;
pub mod kanban;
pub mod meetings;
pub mod shifts;
pub mod workflow;

pub use http::ApiClient;
