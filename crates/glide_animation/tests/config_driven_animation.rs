//! Integration tests for configuration options driving animations
//!
//! These tests verify that:
//! - Animation descriptions stored in options are re-read by running animations
//! - Option sections route raw configuration text to typed animation options
//! - Update handlers can react to reconfiguration of an animation
//! - Frame-by-frame polling sees exactly one final frame

use std::cell::Cell;
use std::rc::Rc;

use glide_animation::{
    AnimationDescription, Direction, DurationTracker, ManualClock, SimpleAnimation, Smoothing,
    TimedTransition,
};
use glide_core::{ConfigError, ConfigOption, OptionSection};
use pretty_assertions::assert_eq;

const FRAME_MS: u64 = 16;

fn description(text: &str) -> AnimationDescription {
    text.parse().expect("valid description")
}

/// Test that a section holding an animation description feeds a live animation
#[test]
fn test_section_configures_running_animation() {
    let clock = Rc::new(ManualClock::new());
    let open = ConfigOption::shared("open_animation", description("300ms linear"));

    let mut section = OptionSection::new("window-rules");
    section.register(open.clone());

    let mut anim = SimpleAnimation::from_description(open.clone()).with_clock(clock.clone());
    anim.animate_between(0.0, 1.0);
    clock.advance_ms(150);
    assert_eq!(anim.value(), 0.5);

    section.set_value_str("open_animation", "0.6 s linear").unwrap();
    assert_eq!(open.get_value().duration_ms, 600);
    assert_eq!(anim.value(), 0.25);

    assert_eq!(
        section.get_value_str("open_animation").as_deref(),
        Some("600ms linear")
    );
}

/// Test that rejected configuration keeps the animation on its previous settings
#[test]
fn test_invalid_configuration_keeps_previous_description() {
    let mut section = OptionSection::new("animate");
    let option = ConfigOption::shared("duration", description("200ms sigmoid"));
    section.register(option.clone());

    let err = section
        .set_value_str("duration", "200 ms bounce")
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert_eq!(option.get_value(), description("200ms sigmoid"));

    let tracker = DurationTracker::from_description(option);
    assert_eq!(tracker.total_duration(), 200);
}

/// Test that float noise in a rewritten bezier does not count as a change
#[test]
fn test_equivalent_bezier_does_not_notify() {
    let option = ConfigOption::shared(
        "minimize",
        description("250ms cubic-bezier 0.3 0.5 0.25 1"),
    );
    let notified = Rc::new(Cell::new(0));
    let notified_clone = notified.clone();
    option.add_updated_handler(move || notified_clone.set(notified_clone.get() + 1));

    option
        .set_value_str("0.25 s cubic-bezier 0.30000000000000004 0.5 0.25 1")
        .unwrap();
    assert_eq!(notified.get(), 0);

    option
        .set_value_str("250ms cubic-bezier 0.35 0.5 0.25 1")
        .unwrap();
    assert_eq!(notified.get(), 1);
}

/// Test that an update handler can restart an animation after reconfiguration
#[test]
fn test_handler_restarts_animation_on_change() {
    let clock = Rc::new(ManualClock::new());
    let length = ConfigOption::shared("fade_duration", 100);
    let anim = Rc::new(std::cell::RefCell::new(
        SimpleAnimation::new(length.clone(), Smoothing::Linear).with_clock(clock.clone()),
    ));
    anim.borrow_mut().animate_between(0.0, 1.0);
    clock.advance_ms(200);
    assert!(anim.borrow_mut().running());
    assert!(!anim.borrow_mut().running());

    let anim_clone = anim.clone();
    length.add_updated_handler(move || anim_clone.borrow_mut().animate_between(1.0, 0.0));

    length.set_value_str("400").unwrap();
    assert!(anim.borrow_mut().running());
    clock.advance_ms(100);
    assert_eq!(anim.borrow().value(), 0.75);
}

/// Test that polling once per frame sees the final frame exactly once
#[test]
fn test_frame_loop_sees_final_frame_once() {
    let clock = Rc::new(ManualClock::new());
    let length = ConfigOption::shared("slide", 100);
    let mut anim = SimpleAnimation::new(length, Smoothing::Circle).with_clock(clock.clone());
    anim.animate_between(-40.0, 0.0);

    let mut frames = Vec::new();
    while anim.running() {
        frames.push(anim.value());
        clock.advance_ms(FRAME_MS);
    }

    // 0, 16, ..., 96 in flight, then the final frame at 112.
    assert_eq!(frames.len(), 8);
    assert_eq!(frames.first().copied(), Some(-40.0));
    assert_eq!(frames.last().copied(), Some(0.0));
    assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    assert!(!anim.running());
}

/// Test that several transitions can share one tracker
#[test]
fn test_transitions_share_tracker() {
    let clock = Rc::new(ManualClock::new());
    let option = ConfigOption::shared("zoom", description("1 s linear"));
    let mut duration = DurationTracker::from_description(option).with_clock(clock.clone());

    let scale = TimedTransition::new(&duration, 0.0, 2.0);
    let alpha = TimedTransition::new(&duration, 0.0, 1.0);

    duration.start();
    clock.advance_ms(400);
    assert_eq!(scale.value(), 0.8);
    assert_eq!(alpha.value(), 0.4);

    duration.reverse_direction();
    assert_eq!(duration.direction(), Direction::Reverse);
    assert_eq!(scale.value(), 0.8);
    assert_eq!(alpha.value(), 0.4);

    clock.advance_ms(400);
    assert_eq!(alpha.value(), 0.0);
    assert_eq!(scale.value(), 0.0);
}
