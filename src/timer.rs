//! Single-deadline timers polled from the frame loop.

/// A one-shot timer with at most one pending deadline.
///
/// Arming an armed timer replaces its deadline, so a component can never have
/// two pending timers of the same kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    deadline: Option<f64>,
}

impl Timer {
    /// Creates a disarmed timer.
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Schedules the timer to fire `delay_ms` after `now`.
    pub fn arm(&mut self, now: f64, delay_ms: f64) {
        self.deadline = Some(now + delay_ms);
    }

    /// Clears any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Returns `true` and disarms the timer if its deadline has passed.
    pub fn fire(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
