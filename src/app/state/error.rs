use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

/// A transient notification shown over the footer.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub severity: ErrorSeverity,
}

impl ErrorState {
    pub fn new(message: impl Into<String>, severity: ErrorSeverity) -> Self {
        Self {
            message: message.into(),
            timestamp: Local::now(),
            severity,
        }
    }

    /// Errors stay until dismissed; lesser notices fade after `secs`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Local>, secs: i64) -> bool {
        self.severity < ErrorSeverity::Error && (now - self.timestamp).num_seconds() >= secs
    }
}
