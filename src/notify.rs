use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ApiError, SubmitError};

/// A transient, user-facing message raised by a view-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    /// The server answered 401; the shell should send the user to login.
    SessionExpired,
}

impl Notice {
    pub fn from_api_error(context: &str, err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized => Notice::SessionExpired,
            other => Notice::Error(format!("{}: {}", context, other)),
        }
    }

    pub fn from_submit_error(context: &str, err: &SubmitError) -> Self {
        match err {
            SubmitError::Api(api) => Notice::from_api_error(context, api),
            SubmitError::Validation(v) => Notice::Error(v.to_string()),
            SubmitError::Drag(d) => Notice::Error(d.to_string()),
        }
    }
}

pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Sends notices to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(msg) => tracing::info!("{}", msg),
            Notice::Error(msg) => tracing::error!("{}", msg),
            Notice::SessionExpired => tracing::warn!("session expired, login required"),
        }
    }
}

/// Keeps notices in memory for a shell to drain and display.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    inner: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic while the lock was held leaves the notices intact, so a
    /// poisoned lock is recovered rather than dropping them.
    fn notices(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices())
    }

    pub fn len(&self) -> usize {
        self.notices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NoticeQueue {
    fn notify(&self, notice: Notice) {
        LogNotifier.notify(notice.clone());
        self.notices().push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn unauthorized_maps_to_session_expired() {
        let notice = Notice::from_api_error("loading week", &ApiError::Unauthorized);
        assert_eq!(notice, Notice::SessionExpired);
    }

    #[test]
    fn other_errors_keep_context() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        match Notice::from_api_error("loading week", &err) {
            Notice::Error(msg) => assert!(msg.starts_with("loading week: unexpected status 500")),
            other => panic!("unexpected notice {:?}", other),
        }
    }

    #[test]
    fn queue_drains_in_order() {
        let queue = NoticeQueue::new();
        queue.notify(Notice::Success("saved".into()));
        queue.notify(Notice::SessionExpired);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![Notice::Success("saved".into()), Notice::SessionExpired]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn poisoned_queue_still_collects() {
        let queue = NoticeQueue::new();
        queue.notify(Notice::Success("before".into()));

        let shared = queue.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.inner.lock().unwrap();
            panic!("poison the queue");
        })
        .join();
        assert!(queue.inner.is_poisoned());

        queue.notify(Notice::SessionExpired);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![Notice::Success("before".into()), Notice::SessionExpired]
        );
    }
}
