//! Transient notices shown in the window title

use std::time::{Duration, Instant};

/// How long a notice replaces the title
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Title-bar notice with expiry
#[derive(Debug, Default)]
pub struct TitleNotice {
    current: Option<(String, Instant)>,
    applied: Option<String>,
}

impl TitleNotice {
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!("Notice: {}", message);
        self.current = Some((message, now));
    }

    /// Title that should be visible at `now`
    pub fn title<'a>(&'a mut self, base: &'a str, now: Instant) -> &'a str {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|(_, shown_at)| now.duration_since(*shown_at) >= NOTICE_DURATION);
        if expired {
            self.current = None;
        }
        match &self.current {
            Some((message, _)) => message,
            None => base,
        }
    }

    /// The new title when it differs from the one last applied
    pub fn title_change(&mut self, base: &str, now: Instant) -> Option<String> {
        let title = self.title(base, now).to_string();
        if self.applied.as_deref() == Some(title.as_str()) {
            return None;
        }
        self.applied = Some(title.clone());
        Some(title)
    }
}
