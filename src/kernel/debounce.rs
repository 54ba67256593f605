//! Trailing-edge debounce driven by an injected clock.
//!
//! The owner calls [`Debouncer::push`] on every new value and [`Debouncer::poll`] on every
//! tick. A value is emitted once it has been the latest one for a full `delay`; a newer push
//! moves the deadline. Dropping the debouncer drops whatever was pending.

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let deadline = self.pending.as_ref()?.deadline;
        if now < deadline {
            return None;
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 50 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "debounce overshoot"
            );
        }

        self.pending.take().map(|p| p.value)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_DELAY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/debounce.rs"]
mod tests;
