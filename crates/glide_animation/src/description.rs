//! Animation descriptions
//!
//! Textual form:
//!
//! ```text
//! <integer>                                       legacy: milliseconds, circle easing
//! <number> (s|ms) [<easing-name>]                 named easing, circle by default
//! <number> (s|ms) cubic-bezier <x1> <y1> <x2> <y2>
//! ```
//!
//! The canonical (serialized) form is always `<duration>ms <easing-name>`.

use std::fmt;
use std::str::FromStr;

use glide_core::{OptionValue, ValueParseError};
use thiserror::Error;

use crate::smoothing::{CubicBezier, Smoothing, CUBIC_BEZIER};

/// Easing used when a description does not name one
const DEFAULT_EASING: &str = "circle";

/// Errors produced while parsing an animation description
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptionParseError {
    #[error("missing animation duration")]
    MissingDuration,

    #[error("missing duration unit (expected `s` or `ms`)")]
    MissingUnit,

    #[error("unknown duration unit `{0}` (expected `s` or `ms`)")]
    UnknownUnit(String),

    #[error("unknown easing `{0}`")]
    UnknownEasing(String),

    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}

/// Duration and easing of an animation
#[derive(Clone, Debug)]
pub struct AnimationDescription {
    /// Configured length; trackers treat anything below 1 as 1ms
    pub duration_ms: i32,
    pub easing: Smoothing,
    /// Canonical easing name, written back when serializing
    pub easing_name: String,
}

impl AnimationDescription {
    /// Describe an animation with the given smoothing function
    ///
    /// Custom smoothing functions have no textual form and are named
    /// `custom`, which does not parse back.
    pub fn new(duration_ms: i32, easing: Smoothing) -> Self {
        let easing_name = easing
            .easing_name()
            .unwrap_or_else(|| "custom".to_string());
        Self {
            duration_ms,
            easing,
            easing_name,
        }
    }

    /// Parse the textual form; see the module docs for the grammar
    pub fn parse(text: &str) -> Result<Self, DescriptionParseError> {
        // Plain integers predate units and easings.
        if let Ok(duration_ms) = text.trim().parse::<i32>() {
            return Ok(Self::new(duration_ms, Smoothing::Circle));
        }

        let mut scanner = Scanner::new(text);
        let length = scanner
            .number()
            .ok_or(DescriptionParseError::MissingDuration)?;
        let unit = scanner.word().ok_or(DescriptionParseError::MissingUnit)?;
        let scale = match unit {
            "ms" => 1.0,
            "s" => 1000.0,
            other => return Err(DescriptionParseError::UnknownUnit(other.to_string())),
        };

        let name = scanner.word().unwrap_or(DEFAULT_EASING);
        let easing = if let Some(smoothing) = Smoothing::from_name(name) {
            smoothing
        } else if name == CUBIC_BEZIER {
            let (curve, complete) = scanner.bezier_params();
            if !complete {
                // An unreadable parameter ends the description.
                scanner.skip_rest();
            }
            Smoothing::CubicBezier(curve)
        } else {
            return Err(DescriptionParseError::UnknownEasing(name.to_string()));
        };

        if let Some(rest) = scanner.remaining() {
            return Err(DescriptionParseError::TrailingInput(rest.to_string()));
        }

        // Saturating float to int conversion, fractions of a millisecond truncate.
        Ok(Self::new((length * scale) as i32, easing))
    }
}

impl FromStr for AnimationDescription {
    type Err = DescriptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AnimationDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms {}", self.duration_ms, self.easing_name)
    }
}

/// Durations must match; easings match by name, or for cubic-bezier
/// easings by control points within floating point noise.
impl PartialEq for AnimationDescription {
    fn eq(&self, other: &Self) -> bool {
        if self.duration_ms != other.duration_ms {
            return false;
        }
        if self.easing_name == other.easing_name {
            return true;
        }

        match (
            bezier_from_easing_name(&self.easing_name),
            bezier_from_easing_name(&other.easing_name),
        ) {
            (Some(a), Some(b)) => a.approx_eq(&b),
            _ => false,
        }
    }
}

impl OptionValue for AnimationDescription {
    fn from_config_str(text: &str) -> Result<Self, ValueParseError> {
        Self::parse(text)
            .map_err(|e| ValueParseError::new(text, "animation description", e.to_string()))
    }

    fn to_config_string(&self) -> String {
        self.to_string()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AnimationDescription {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AnimationDescription {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Control points of a complete `cubic-bezier x1 y1 x2 y2` name
///
/// Unlike parsing, no defaults fill in: a missing, unreadable or extra token
/// means the name is not a comparable curve.
fn bezier_from_easing_name(name: &str) -> Option<CubicBezier> {
    let mut scanner = Scanner::new(name);
    if scanner.word()? != CUBIC_BEZIER {
        return None;
    }
    let (curve, complete) = scanner.bezier_params();
    (complete && scanner.remaining().is_none()).then_some(curve)
}

/// Whitespace separated reader over a description.
///
/// Numbers may be glued to the following word (`300ms`), a number ends where
/// its textual form ends.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn number(&mut self) -> Option<f64> {
        self.rest = self.rest.trim_start();
        let len = numeric_prefix_len(self.rest);
        if len == 0 {
            return None;
        }
        let value = self.rest[..len]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())?;
        self.rest = &self.rest[len..];
        Some(value)
    }

    fn word(&mut self) -> Option<&'a str> {
        self.rest = self.rest.trim_start();
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(word)
    }

    /// Read up to four control point coordinates.
    ///
    /// Stops at the first missing or unreadable coordinate; it and all later
    /// ones keep their identity-curve defaults. The flag reports whether all
    /// four were read.
    fn bezier_params(&mut self) -> (CubicBezier, bool) {
        let CubicBezier { x1, y1, x2, y2 } = CubicBezier::IDENTITY;
        let mut coords = [x1, y1, x2, y2];
        let mut complete = true;
        for coord in coords.iter_mut() {
            match self.number() {
                Some(value) => *coord = value,
                None => {
                    complete = false;
                    break;
                }
            }
        }

        let [x1, y1, x2, y2] = coords;
        (CubicBezier::new(x1, y1, x2, y2), complete)
    }

    fn skip_rest(&mut self) {
        self.rest = "";
    }

    /// Unconsumed non-whitespace input, if any
    fn remaining(&self) -> Option<&'a str> {
        let rest = self.rest.trim();
        (!rest.is_empty()).then_some(rest)
    }
}

/// Length of the leading decimal number in `s`: optional sign, digits with
/// an optional fraction, optional exponent. Zero if there is none.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}
