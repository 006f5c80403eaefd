//! Simple animations
//!
//! A [`DurationTracker`] and a [`TimedTransition`] bound to it, for the
//! common case of animating one value.

use std::rc::Rc;

use glide_core::ConfigOption;

use crate::clock::Clock;
use crate::description::AnimationDescription;
use crate::duration::{Direction, DurationTracker};
use crate::smoothing::Smoothing;
use crate::transition::TimedTransition;

/// One animated value with its own timer
#[derive(Debug)]
pub struct SimpleAnimation {
    duration: DurationTracker,
    transition: TimedTransition,
}

impl SimpleAnimation {
    /// Animate over a plain millisecond length, eased with `smoothing`
    pub fn new(length: Rc<ConfigOption<i32>>, smoothing: Smoothing) -> Self {
        Self::from_tracker(DurationTracker::new(length, smoothing))
    }

    /// Animate with the length and easing of an animation description
    pub fn from_description(description: Rc<ConfigOption<AnimationDescription>>) -> Self {
        Self::from_tracker(DurationTracker::from_description(description))
    }

    pub fn from_tracker(duration: DurationTracker) -> Self {
        let transition = TimedTransition::new(&duration, 0.0, 0.0);
        Self {
            duration,
            transition,
        }
    }

    /// Read time from `clock`; the transition stays bound to the same tracker
    pub fn with_clock(self, clock: Rc<dyn Clock>) -> Self {
        self.duration.set_clock(clock);
        self
    }

    /// Animate from `start` to `end`, starting now
    pub fn animate_between(&mut self, start: f64, end: f64) {
        self.transition.set(start, end);
        self.duration.start();
    }

    /// Animate from the current value to `end`, starting now
    pub fn animate_to(&mut self, end: f64) {
        self.transition.restart_with_end(end);
        self.duration.start();
    }

    /// Restart from the current value towards the same end
    pub fn animate(&mut self) {
        self.transition.restart_same_end();
        self.duration.start();
    }

    pub fn value(&self) -> f64 {
        self.transition.value()
    }

    /// See [`DurationTracker::running`]
    pub fn running(&mut self) -> bool {
        self.duration.running()
    }

    pub fn progress(&self) -> f64 {
        self.duration.progress()
    }

    pub fn reverse_direction(&mut self) {
        self.duration.reverse_direction();
    }

    pub fn direction(&self) -> Direction {
        self.duration.direction()
    }

    pub fn start_value(&self) -> f64 {
        self.transition.start()
    }

    pub fn end_value(&self) -> f64 {
        self.transition.end()
    }

    pub fn set(&mut self, start: f64, end: f64) {
        self.transition.set(start, end);
    }

    pub fn flip(&mut self) {
        self.transition.flip();
    }

    pub fn duration(&self) -> &DurationTracker {
        &self.duration
    }

    pub fn transition(&self) -> &TimedTransition {
        &self.transition
    }
}

impl Clone for SimpleAnimation {
    fn clone(&self) -> Self {
        let duration = self.duration.clone();
        let mut transition = self.transition.clone();
        transition.rebind(&duration);
        Self {
            duration,
            transition,
        }
    }
}
