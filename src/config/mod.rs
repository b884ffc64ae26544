#[allow(clippy::module_inception)]
pub mod config;
pub mod session;

pub use config::Config;
pub use session::Session;
