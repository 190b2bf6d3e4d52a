//! Staggered entrance timing for page elements.
//!
//! Elements registered against a [`RevealScope`] appear one after
//! another: each entry is granted a time no earlier than the previous
//! entry's time plus that entry's exclusive duration.

use std::time::{Duration, Instant};

/// Hands out staggered entry times in registration order.
#[derive(Debug)]
pub struct RevealScope {
    default_exclusive: Duration,
    next_entry_time: Instant,
}

impl RevealScope {
    /// Create a scope whose first entry appears after `initial_delay`.
    pub fn new(initial_delay: Duration, default_exclusive: Duration) -> Self {
        Self {
            default_exclusive,
            next_entry_time: Instant::now() + initial_delay,
        }
    }

    /// Claim the next entry slot with the scope's default exclusive
    /// duration.
    pub fn register(&mut self) -> RevealEntry {
        self.register_at(Instant::now(), Duration::ZERO, self.default_exclusive)
    }

    /// Claim the next entry slot with an extra delay and an explicit
    /// exclusive duration.
    pub fn register_with(&mut self, delay: Duration, exclusive_duration: Duration) -> RevealEntry {
        self.register_at(Instant::now(), delay, exclusive_duration)
    }

    fn register_at(&mut self, now: Instant, delay: Duration, exclusive: Duration) -> RevealEntry {
        let entry_time = if self.next_entry_time <= now {
            now + delay
        } else {
            self.next_entry_time + delay
        };

        self.next_entry_time = entry_time + exclusive;

        RevealEntry { entry_time }
    }
}

/// A scheduled entrance of one page element.
#[derive(Debug, Clone, Copy)]
pub struct RevealEntry {
    entry_time: Instant,
}

impl RevealEntry {
    /// Whether the element has entered at `now`.
    pub fn visible(&self, now: Instant) -> bool {
        now >= self.entry_time
    }

    /// Entrance fade progress in `[0.0, 1.0]`.
    pub fn fade_progress(&self, now: Instant, fade: Duration) -> f64 {
        if now < self.entry_time {
            return 0.0;
        }

        let elapsed = now - self.entry_time;
        if fade.is_zero() || elapsed >= fade {
            1.0
        } else {
            elapsed.as_secs_f64() / fade.as_secs_f64()
        }
    }
}
