//! Transient toast notifications.

use std::time::{Duration, Instant};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NotificationLevel {
    Info,
    Success,
    Warn,
    Error,
}

impl NotificationLevel {
    /// Popup title for the level.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warn => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A toast waiting to be shown or on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown to the operator.
    pub message: String,
    /// When the toast was raised.
    pub created_at: Instant,
    /// First time the toast was drawn.
    pub displayed_at: Option<Instant>,
    /// How long the toast stays visible once drawn.
    pub duration: Duration,
}

impl Notification {
    /// Creates a toast with the default five second duration.
    #[must_use]
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
            displayed_at: None,
            duration: Duration::from_secs(5),
        }
    }

    /// Creates success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    /// Creates error toast.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    /// Overrides the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Expiry counts from the moment the toast is first shown.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    /// Starts the expiry clock. Later calls keep the first timestamp.
    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::success("Changes saved!");
        assert_eq!(n.level, NotificationLevel::Success);
        assert_eq!(n.message, "Changes saved!");
        assert_eq!(n.duration, Duration::from_secs(5));
        assert!(!n.is_expired());
    }

    #[test]
    fn test_notification_expiry() {
        let mut n = Notification::error("Something went wrong")
            .with_duration(Duration::from_nanos(1));
        n.mark_displayed();
        std::thread::sleep(Duration::from_millis(1));
        assert!(n.is_expired());
    }
}
