//! Cooperative single-shot timers.
//!
//! Both timers in this system (the 600 ms idle-commit timer in key capture
//! and the 200 ms search debounce) are deadline checks serviced by the host
//! event loop rather than background threads. The host calls `fire` on its
//! tick; nothing here blocks or runs concurrent work.

use std::time::{Duration, Instant};

/// A restartable single-shot timer driven by explicit polling.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    duration: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Creates a stopped timer with the given timeout.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadline: None,
        }
    }

    /// Arms the timer, restarting it if already armed.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
    }

    /// Disarms the timer without firing.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// True while a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true (and disarms) if the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
