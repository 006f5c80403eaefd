//! Timed transitions between two values

use std::fmt;
use std::rc::Rc;

use crate::duration::{DurationTracker, TimerCore};

/// Interpolates between `start` and `end` following a [`DurationTracker`]
///
/// The transition observes the tracker's live timing state; the value is
/// recomputed on every read. Cloning a transition keeps it bound to the same
/// tracker.
#[derive(Clone)]
pub struct TimedTransition {
    duration: Rc<TimerCore>,
    start: f64,
    end: f64,
}

impl TimedTransition {
    pub fn new(duration: &DurationTracker, start: f64, end: f64) -> Self {
        Self {
            duration: duration.core.clone(),
            start,
            end,
        }
    }

    /// Follow another tracker from now on
    pub fn rebind(&mut self, duration: &DurationTracker) {
        self.duration = duration.core.clone();
    }

    /// Whether this transition follows `duration`
    pub fn is_bound_to(&self, duration: &DurationTracker) -> bool {
        Rc::ptr_eq(&self.duration, &duration.core)
    }

    pub fn set(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Current interpolated value
    pub fn value(&self) -> f64 {
        let alpha = self.duration.progress();
        (1.0 - alpha) * self.start + alpha * self.end
    }

    /// Head for a new end, starting from wherever the value is now
    pub fn restart_with_end(&mut self, new_end: f64) {
        self.start = self.value();
        self.end = new_end;
    }

    /// Keep the end, starting from wherever the value is now
    pub fn restart_same_end(&mut self) {
        self.start = self.value();
    }

    /// Swap start and end
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }
}

impl From<&TimedTransition> for f64 {
    fn from(transition: &TimedTransition) -> Self {
        transition.value()
    }
}

impl fmt::Debug for TimedTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedTransition")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("value", &self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::smoothing::Smoothing;
    use glide_core::ConfigOption;

    fn tracker(length_ms: i32) -> (DurationTracker, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        let length = ConfigOption::shared("duration", length_ms);
        let tracker = DurationTracker::new(length, Smoothing::Linear).with_clock(clock.clone());
        (tracker, clock)
    }

    #[test]
    fn test_value_follows_tracker() {
        let (mut duration, clock) = tracker(100);
        let transition = TimedTransition::new(&duration, 10.0, 20.0);

        duration.start();
        assert_eq!(transition.value(), 10.0);
        clock.advance_ms(50);
        assert_eq!(transition.value(), 15.0);
        clock.advance_ms(50);
        assert_eq!(f64::from(&transition), 20.0);
    }

    #[test]
    fn test_restart_with_end_has_no_jump() {
        let (mut duration, clock) = tracker(100);
        let mut transition = TimedTransition::new(&duration, 0.0, 100.0);
        duration.start();
        clock.advance_ms(40);

        let before = transition.value();
        transition.restart_with_end(-50.0);
        assert_eq!(transition.start(), before);
        assert_eq!(transition.end(), -50.0);

        duration.start();
        assert_eq!(transition.value(), before);
        clock.advance_ms(100);
        assert_eq!(transition.value(), -50.0);
    }

    #[test]
    fn test_restart_same_end() {
        let (mut duration, clock) = tracker(200);
        let mut transition = TimedTransition::new(&duration, 0.0, 1.0);
        duration.start();
        clock.advance_ms(50);

        transition.restart_same_end();
        assert_eq!(transition.start(), 0.25);
        assert_eq!(transition.end(), 1.0);
    }

    #[test]
    fn test_reverse_keeps_value() {
        let (mut duration, clock) = tracker(1000);
        let transition = TimedTransition::new(&duration, 0.0, 80.0);
        duration.start();
        clock.advance_ms(250);

        let before = transition.value();
        duration.reverse_direction();
        assert_eq!(transition.value(), before);

        clock.advance_ms(125);
        assert_eq!(transition.value(), 10.0);
        clock.advance_ms(1000);
        assert_eq!(transition.value(), 0.0);
    }

    #[test]
    fn test_flip_swaps_endpoints() {
        let (duration, _) = tracker(100);
        let mut transition = TimedTransition::new(&duration, 1.0, 2.0);
        transition.flip();
        assert_eq!((transition.start(), transition.end()), (2.0, 1.0));
        // An idle tracker rests at the end.
        assert_eq!(transition.value(), 1.0);
    }

    #[test]
    fn test_rebind_follows_new_tracker() {
        let (mut first, clock) = tracker(100);
        let mut transition = TimedTransition::new(&first, 0.0, 10.0);
        first.start();
        clock.advance_ms(50);

        let second = first.clone();
        assert!(!transition.is_bound_to(&second));
        first.start();
        assert_eq!(transition.value(), 0.0);

        transition.rebind(&second);
        assert!(transition.is_bound_to(&second));
        assert_eq!(transition.value(), 5.0);
    }
}
