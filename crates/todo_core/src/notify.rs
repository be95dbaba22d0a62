//! Notification sink for presentational notices.
//!
//! # Responsibility
//! - Carry informational/warning messages produced by empty query results.
//!
//! # Invariants
//! - Notices never change returned data or control flow.
//! - Sinks must not fail; delivery is best-effort.

use log::{info, warn};
use std::cell::RefCell;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// One message raised for the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Receives non-blocking notices from service operations.
pub trait NotificationSink {
    fn inform(&self, message: &str);
    fn warn(&self, message: &str);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn inform(&self, message: &str) {
        (**self).inform(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}

/// Forwards notices to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn inform(&self, message: &str) {
        info!("event=user_notice module=notify level=info message={message}");
    }

    fn warn(&self, message: &str) {
        warn!("event=user_notice module=notify level=warn message={message}");
    }
}

/// Records notices in memory, for callers that render them later.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the recorded notices.
    pub fn take(&self) -> Vec<Notice> {
        self.notices.take()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }

    fn push(&self, level: NoticeLevel, message: &str) {
        self.notices.borrow_mut().push(Notice {
            level,
            message: message.to_string(),
        });
    }
}

impl NotificationSink for CollectingNotifier {
    fn inform(&self, message: &str) {
        self.push(NoticeLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(NoticeLevel::Warning, message);
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectingNotifier, NoticeLevel, NotificationSink};

    #[test]
    fn collecting_notifier_records_in_order_and_drains() {
        let sink = CollectingNotifier::new();
        sink.inform("first");
        sink.warn("second");

        let notices = sink.take();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(notices[1].message, "second");
        assert!(sink.is_empty());
    }
}
