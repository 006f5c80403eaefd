//! Duration tracking
//!
//! A [`DurationTracker`] measures time against a configured length and turns
//! it into eased progress. The length is re-read from its option on every
//! query, so configuration changes apply to running animations.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use glide_core::ConfigOption;

use crate::clock::{Clock, MonotonicClock};
use crate::description::AnimationDescription;
use crate::smoothing::Smoothing;

/// Where a tracker reads its length (and easing) from
#[derive(Clone)]
enum DurationSource {
    Unbound,
    /// Plain millisecond length with a caller supplied easing
    Length {
        option: Rc<ConfigOption<i32>>,
        smoothing: Smoothing,
    },
    Description(Rc<ConfigOption<AnimationDescription>>),
}

/// Whether completion has been reported for the current run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
}

/// Direction a tracker is currently running in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// 1 when running forward, 0 when reversed
    pub fn as_i32(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => 0,
        }
    }
}

#[derive(Clone, Debug)]
struct TimerState {
    /// Unset until the first `start()`
    start_point: Option<Instant>,
    /// Time already elapsed at `start_point`, set when reversing
    head_start: Duration,
    run_state: RunState,
    reverse: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            start_point: None,
            head_start: Duration::ZERO,
            run_state: RunState::Idle,
            reverse: false,
        }
    }
}

/// Timing state shared between a tracker and the transitions bound to it
pub(crate) struct TimerCore {
    source: DurationSource,
    clock: RefCell<Rc<dyn Clock>>,
    state: RefCell<TimerState>,
}

impl TimerCore {
    fn new(source: DurationSource, clock: Rc<dyn Clock>, state: TimerState) -> Rc<Self> {
        Rc::new(Self {
            source,
            clock: RefCell::new(clock),
            state: RefCell::new(state),
        })
    }

    /// Milliseconds since start; saturates to `u64::MAX` before the first start
    fn elapsed_ms(&self) -> u64 {
        let state = self.state.borrow();
        let Some(start_point) = state.start_point else {
            return u64::MAX;
        };
        let now = self.clock.borrow().now();
        let elapsed = now.saturating_duration_since(start_point) + state.head_start;
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    fn total_duration_ms(&self) -> u64 {
        let length = match &self.source {
            DurationSource::Description(option) => option.with_value(|d| d.duration_ms),
            DurationSource::Length { option, .. } => option.get_value(),
            DurationSource::Unbound => {
                tracing::warn!("querying the length of a duration tracker without a length option");
                return 1;
            }
        };
        // Clamped to avoid dividing by zero.
        length.max(1) as u64
    }

    fn is_elapsed(&self) -> bool {
        self.elapsed_ms() >= self.total_duration_ms()
    }

    fn progress_fraction(&self) -> f64 {
        if matches!(self.source, DurationSource::Unbound) || self.is_elapsed() {
            return 1.0;
        }

        let total = self.total_duration_ms();
        let mut elapsed = self.elapsed_ms();
        if self.state.borrow().reverse {
            // Same as 1 - elapsed / total, without the rounding step.
            elapsed = total.saturating_sub(elapsed);
        }
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub(crate) fn progress(&self) -> f64 {
        if self.is_elapsed() {
            return if self.state.borrow().reverse { 0.0 } else { 1.0 };
        }

        let fraction = self.progress_fraction();
        match &self.source {
            DurationSource::Description(option) => option.with_value(|d| d.easing.apply(fraction)),
            DurationSource::Length { smoothing, .. } => smoothing.apply(fraction),
            DurationSource::Unbound => Smoothing::default().apply(fraction),
        }
    }
}

/// Tracks a running animation's time against its configured length
///
/// Cloning produces an independent tracker (own start point and flags) that
/// still reads the same configuration options.
pub struct DurationTracker {
    pub(crate) core: Rc<TimerCore>,
}

impl DurationTracker {
    /// Track a plain millisecond length, eased with `smoothing`
    pub fn new(length: Rc<ConfigOption<i32>>, smoothing: Smoothing) -> Self {
        Self::from_source(DurationSource::Length {
            option: length,
            smoothing,
        })
    }

    /// Track the length and easing of an animation description
    pub fn from_description(description: Rc<ConfigOption<AnimationDescription>>) -> Self {
        Self::from_source(DurationSource::Description(description))
    }

    /// A tracker without a length; every query treats it as 1ms long
    pub fn unbound() -> Self {
        Self::from_source(DurationSource::Unbound)
    }

    fn from_source(source: DurationSource) -> Self {
        Self {
            core: TimerCore::new(source, Rc::new(MonotonicClock), TimerState::default()),
        }
    }

    /// Use another time source
    ///
    /// Transitions already bound to this tracker follow the new clock too.
    pub fn with_clock(self, clock: Rc<dyn Clock>) -> Self {
        self.set_clock(clock);
        self
    }

    pub fn set_clock(&self, clock: Rc<dyn Clock>) {
        *self.core.clock.borrow_mut() = clock;
    }

    /// Start (or restart) the animation from now
    pub fn start(&mut self) {
        let now = self.core.clock.borrow().now();
        let mut state = self.core.state.borrow_mut();
        state.start_point = Some(now);
        state.head_start = Duration::ZERO;
        state.run_state = RunState::Running;
        tracing::trace!(reverse = state.reverse, "duration tracker started");
    }

    /// Milliseconds since the last start
    ///
    /// A tracker that was never started reports `u64::MAX`, i.e. it is at rest.
    pub fn elapsed(&self) -> u64 {
        self.core.elapsed_ms()
    }

    /// Configured length in milliseconds, at least 1
    pub fn total_duration(&self) -> u64 {
        self.core.total_duration_ms()
    }

    pub fn is_elapsed(&self) -> bool {
        self.core.is_elapsed()
    }

    /// Linear progress in `[0, 1]`, counting down when reversed
    pub fn progress_fraction(&self) -> f64 {
        self.core.progress_fraction()
    }

    /// Eased progress; snaps to the resting end once elapsed
    pub fn progress(&self) -> f64 {
        self.core.progress()
    }

    /// Whether the animation is still running.
    ///
    /// Meant to be polled once per frame: while time remains this is always
    /// true, the first poll after the time ran out is still true (so the
    /// final frame gets drawn), every poll after that is false until the
    /// next `start()`.
    pub fn running(&mut self) -> bool {
        if !self.core.is_elapsed() {
            return true;
        }

        let mut state = self.core.state.borrow_mut();
        match state.run_state {
            RunState::Running => {
                state.run_state = RunState::Idle;
                true
            }
            RunState::Idle => false,
        }
    }

    /// Turn around mid-flight, continuing from the current progress
    pub fn reverse_direction(&mut self) {
        let total = self.core.total_duration_ms();
        let remaining = total - self.core.elapsed_ms().min(total);
        let now = self.core.clock.borrow().now();

        let mut state = self.core.state.borrow_mut();
        state.start_point = Some(now);
        state.head_start = Duration::from_millis(remaining);
        state.reverse = !state.reverse;
        tracing::trace!(
            remaining_ms = remaining,
            reverse = state.reverse,
            "duration tracker reversed"
        );
    }

    pub fn direction(&self) -> Direction {
        if self.core.state.borrow().reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }
}

impl Default for DurationTracker {
    fn default() -> Self {
        Self::unbound()
    }
}

impl Clone for DurationTracker {
    fn clone(&self) -> Self {
        let state = self.core.state.borrow().clone();
        Self {
            core: TimerCore::new(
                self.core.source.clone(),
                self.core.clock.borrow().clone(),
                state,
            ),
        }
    }
}

impl fmt::Debug for DurationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.core.source {
            DurationSource::Unbound => "unbound",
            DurationSource::Length { .. } => "length",
            DurationSource::Description(_) => "description",
        };
        f.debug_struct("DurationTracker")
            .field("source", &source)
            .field("state", &*self.core.state.borrow())
            .finish()
    }
}
