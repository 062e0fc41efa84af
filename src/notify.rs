//! Transient user notifications ("toasts").

use std::fmt;
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Queue of toasts, each expiring `lifetime` after it was pushed.
#[derive(Debug)]
pub struct Toasts {
    lifetime: Duration,
    items: Vec<(Instant, Notification)>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(TOAST_LIFETIME)
    }
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, now: Instant, n: Notification) {
        log::debug!("toast: {n}");
        self.items.push((now, n));
    }

    /// Drop expired toasts and return the rest, oldest first.
    pub fn active(&mut self, now: Instant) -> Vec<&Notification> {
        let lifetime = self.lifetime;
        self.items
            .retain(|(at, _)| now.saturating_duration_since(*at) < lifetime);
        self.items.iter().map(|(_, n)| n).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
