//! Glide Animation Engine
//!
//! Time driven interpolation of scalar properties (position, opacity, scale).
//!
//! # Features
//!
//! - **Smoothing**: named easing curves and CSS style cubic-bezier curves
//! - **Descriptions**: `"300ms sigmoid"` style configuration strings with a
//!   canonical serialized form and float tolerant equality
//! - **Duration Tracking**: start, reverse mid-flight and detect completion
//!   exactly once per run
//! - **Transitions**: interpolate between two values following a tracker,
//!   redirectable without visual jumps

pub mod clock;
pub mod description;
pub mod duration;
pub mod simple;
pub mod smoothing;
pub mod transition;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use description::{AnimationDescription, DescriptionParseError};
pub use duration::{Direction, DurationTracker};
pub use simple::SimpleAnimation;
pub use smoothing::{available_smoothings, CubicBezier, Smoothing};
pub use transition::TimedTransition;
