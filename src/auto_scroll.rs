//! Idle auto-scroll that cycles focus across the cards.
//!
//! The controller owns one [`Timer`]. While cycling it holds the interval
//! deadline; while suspended it holds the resume deadline. Every state change
//! cancels the timer before arming a new one.

use crate::timer::Timer;

/// Auto-scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollState {
    /// Not running; either too few cards or every card is already on screen
    Stopped,
    /// Focusing the next card every interval
    Cycling,
    /// Paused after user interaction, waiting for the quiet period to pass
    Suspended,
}

/// Timing and eligibility settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollSettings {
    /// Delay between focus changes
    pub interval_ms: f64,
    /// Quiet period after interaction before cycling resumes
    pub resume_ms: f64,
    /// Cycling requires strictly more cards than this
    pub min_cards: usize,
}

/// Cycles focus across the cards on a timer when the board is idle.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    settings: AutoScrollSettings,
    state: AutoScrollState,
    next_index: usize,
    card_count: usize,
    timer: Timer,
}

impl AutoScroll {
    /// Creates a stopped controller.
    pub fn new(settings: AutoScrollSettings) -> Self {
        Self {
            settings,
            state: AutoScrollState::Stopped,
            next_index: 0,
            card_count: 0,
            timer: Timer::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> AutoScrollState {
        self.state
    }

    /// Index of the card the next interval will focus.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Pending deadline of the interval or resume timer.
    pub fn deadline(&self) -> Option<f64> {
        self.timer.deadline()
    }

    fn eligible(&self) -> bool {
        self.card_count > self.settings.min_cards
    }

    fn start_cycling(&mut self, now: f64) {
        self.state = AutoScrollState::Cycling;
        self.next_index = 0;
        self.timer.cancel();
        self.timer.arm(now, self.settings.interval_ms);
    }

    /// Re-evaluates eligibility for a freshly generated layout of `card_count`
    /// cards. Restarts the cycle from the first card when eligible.
    pub fn evaluate(&mut self, card_count: usize, now: f64) {
        self.timer.cancel();
        self.card_count = card_count;
        if self.eligible() {
            self.start_cycling(now);
        } else {
            self.state = AutoScrollState::Stopped;
            self.next_index = 0;
        }
    }

    /// Pauses cycling after a user interaction and (re)starts the quiet period.
    pub fn suspend(&mut self, now: f64) {
        self.timer.cancel();
        if !self.eligible() {
            self.state = AutoScrollState::Stopped;
            return;
        }
        self.state = AutoScrollState::Suspended;
        self.timer.arm(now, self.settings.resume_ms);
    }

    /// Stops cycling until the next [`AutoScroll::evaluate`] or [`AutoScroll::suspend`].
    pub fn stop(&mut self) {
        self.timer.cancel();
        self.state = AutoScrollState::Stopped;
    }

    /// Advances the controller to `now`.
    ///
    /// Returns the index of the card to focus when an interval elapsed.
    /// `all_visible` is only consulted when an interval elapses; if it reports
    /// that every card is already on screen the controller stops instead.
    pub fn poll(&mut self, now: f64, all_visible: impl FnOnce() -> bool) -> Option<usize> {
        if !self.timer.fire(now) {
            return None;
        }
        match self.state {
            AutoScrollState::Stopped => None,
            AutoScrollState::Suspended => {
                log::debug!("auto-scroll resuming after quiet period");
                self.start_cycling(now);
                None
            }
            AutoScrollState::Cycling => {
                if self.card_count == 0 || all_visible() {
                    log::debug!("auto-scroll stopping, all cards visible");
                    self.state = AutoScrollState::Stopped;
                    return None;
                }
                let index = self.next_index % self.card_count;
                self.next_index = (index + 1) % self.card_count;
                self.timer.arm(now, self.settings.interval_ms);
                Some(index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AutoScrollSettings {
        AutoScrollSettings {
            interval_ms: 4000.0,
            resume_ms: 5000.0,
            min_cards: 2,
        }
    }

    #[test]
    fn cycles_through_cards_in_order() {
        let mut auto = AutoScroll::new(settings());
        auto.evaluate(5, 0.0);
        assert_eq!(auto.state(), AutoScrollState::Cycling);

        let mut focused = Vec::new();
        for n in 1..=7 {
            let now = n as f64 * 4000.0;
            assert_eq!(auto.poll(now - 1.0, || false), None);
            focused.extend(auto.poll(now, || false));
        }
        assert_eq!(focused, [0, 1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn too_few_cards_stays_stopped() {
        let mut auto = AutoScroll::new(settings());
        auto.evaluate(2, 0.0);
        assert_eq!(auto.state(), AutoScrollState::Stopped);
        assert_eq!(auto.deadline(), None);

        auto.suspend(10.0);
        assert_eq!(auto.state(), AutoScrollState::Stopped);
        assert_eq!(auto.poll(100_000.0, || false), None);
    }

    #[test]
    fn stops_when_everything_is_visible() {
        let mut auto = AutoScroll::new(settings());
        auto.evaluate(3, 0.0);
        assert_eq!(auto.poll(4000.0, || true), None);
        assert_eq!(auto.state(), AutoScrollState::Stopped);
        assert_eq!(auto.poll(8000.0, || false), None);
    }

    #[test]
    fn suspension_resumes_from_first_card() {
        let mut auto = AutoScroll::new(settings());
        auto.evaluate(5, 0.0);
        assert_eq!(auto.poll(4000.0, || false), Some(0));
        assert_eq!(auto.poll(8000.0, || false), Some(1));

        auto.suspend(9000.0);
        assert_eq!(auto.state(), AutoScrollState::Suspended);
        // Old interval deadline (12000) is gone.
        assert_eq!(auto.poll(12_000.0, || false), None);
        assert_eq!(auto.state(), AutoScrollState::Suspended);

        // Resume at 14000, first focus one interval later.
        assert_eq!(auto.poll(14_000.0, || false), None);
        assert_eq!(auto.state(), AutoScrollState::Cycling);
        assert_eq!(auto.poll(18_000.0, || false), Some(0));
    }

    #[test]
    fn repeated_interaction_extends_quiet_period() {
        let mut auto = AutoScroll::new(settings());
        auto.evaluate(4, 0.0);
        auto.suspend(1000.0);
        auto.suspend(4000.0);
        assert_eq!(auto.poll(6000.0, || false), None);
        assert_eq!(auto.state(), AutoScrollState::Suspended);
        assert_eq!(auto.deadline(), Some(9000.0));
    }

    #[test]
    fn evaluate_resets_pending_timers() {
        let mut auto = AutoScroll::new(settings());
        auto.evaluate(5, 0.0);
        auto.suspend(100.0);
        auto.evaluate(1, 200.0);
        assert_eq!(auto.state(), AutoScrollState::Stopped);
        assert_eq!(auto.poll(10_000.0, || false), None);
    }
}
