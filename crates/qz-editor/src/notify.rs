use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the author. The front end shows it for
/// `duration_ms` and then drops it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub duration_ms: u64,
}

impl Notification {
    pub fn success(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            duration_ms,
        }
    }

    pub fn error(message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            duration_ms,
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        write!(f, "[{tag}] {} ({}ms)", self.message, self.duration_ms)
    }
}
