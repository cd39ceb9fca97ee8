//! Toast queue shown by the notification popup.

use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::notification::{Notification, NotificationLevel};

/// Queue of toasts shown one at a time.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl NotificationManager {
    /// Creates an empty queue.
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    /// Queues a toast. An identical message already waiting is not queued twice.
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        if self
            .queue
            .iter()
            .any(|n| n.level == level && n.message == message && n.displayed_at.is_none())
        {
            return;
        }
        let notification = Notification::new(level, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    /// Queues an info toast.
    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, message);
    }

    /// Queues a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, message);
    }

    /// Queues a warning toast.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Warn, message);
    }

    /// Queues an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message);
    }

    /// Starts the front toast's timer and drops it once expired.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    /// Drops the front toast immediately.
    pub fn dismiss(&mut self) {
        self.queue.pop_front();
        if let Some(next) = self.queue.front_mut() {
            next.mark_displayed();
        }
    }

    /// Toast at the front of the queue.
    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    /// Whether any toast is waiting or shown.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }
}
