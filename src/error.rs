use reqwest::StatusCode;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures of a single REST call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session token rejected by the server")]
    Unauthorized,

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Required-field checks run before a form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("select a date range")]
    MissingDateRange,

    #[error("end date {end} is before start date {start}")]
    InvertedDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("select a department")]
    MissingDepartment,

    #[error("select at least one person")]
    NoPersonnel,

    #[error("select at least one group")]
    NoGroups,

    #[error("select a shift schedule")]
    MissingShiftSchedule,

    #[error("select at least one template")]
    MissingTemplate,

    #[error("{0} is required")]
    Required(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("could not decrypt API_TOKEN_ENC: {0}")]
    Decrypt(String),

    #[error("session file error: {0}")]
    Session(#[from] std::io::Error),

    #[error("session file is not valid JSON: {0}")]
    SessionFormat(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    #[error("leave request {0} cannot be moved from the calendar")]
    NotDraggable(i64),

    #[error("another item is already being dragged")]
    AlreadyDragging,

    #[error("nothing is being dragged")]
    NotDragging,

    #[error("no {0} with id {1} in the loaded week")]
    UnknownEntry(&'static str, i64),
}

/// Returned by view-model operations: either the form was rejected locally
/// or the request failed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Drag(#[from] DragError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
