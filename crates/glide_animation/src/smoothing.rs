//! Smoothing (easing) functions
//!
//! Map linear progress in `[0, 1]` to eased progress. Output is not bounded
//! to `[0, 1]`: elastic curves overshoot before settling.

use std::f64::consts::TAU;

/// Keyword used for cubic-bezier easings in descriptions
pub const CUBIC_BEZIER: &str = "cubic-bezier";

/// Named smoothing functions that can be referenced from configuration
const NAMED_SMOOTHINGS: [(&str, Smoothing); 4] = [
    ("linear", Smoothing::Linear),
    ("circle", Smoothing::Circle),
    ("sigmoid", Smoothing::Sigmoid),
    ("easeOutElastic", Smoothing::EaseOutElastic),
];

/// Normalizes the sigmoid so that `sigmoid(1) == 1`
fn sigmoid_max() -> f64 {
    1.0 + (-6.0f64).exp()
}

/// Smoothing function type
#[derive(Clone, Copy, Debug, Default)]
pub enum Smoothing {
    Linear,
    /// Quarter circle ease-out
    #[default]
    Circle,
    Sigmoid,
    EaseOutElastic,
    CubicBezier(CubicBezier),
    /// Externally supplied function
    Custom(fn(f64) -> f64),
}

impl Smoothing {
    /// Apply the smoothing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Smoothing::Linear => x,
            Smoothing::Circle => (2.0 * x - x * x).sqrt(),
            Smoothing::Sigmoid => sigmoid_max() / (1.0 + (-12.0 * x + 6.0).exp()),
            Smoothing::EaseOutElastic => ease_out_elastic(x),
            Smoothing::CubicBezier(curve) => curve.solve(x),
            Smoothing::Custom(f) => f(x),
        }
    }

    /// Look up a named smoothing function
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_SMOOTHINGS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, smoothing)| *smoothing)
    }

    /// The registry name, for named smoothing functions only
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Smoothing::Linear => Some("linear"),
            Smoothing::Circle => Some("circle"),
            Smoothing::Sigmoid => Some("sigmoid"),
            Smoothing::EaseOutElastic => Some("easeOutElastic"),
            Smoothing::CubicBezier(_) | Smoothing::Custom(_) => None,
        }
    }

    /// Canonical easing name as written in animation descriptions
    ///
    /// `None` for custom functions, which have no textual form.
    pub fn easing_name(&self) -> Option<String> {
        match self {
            Smoothing::CubicBezier(curve) => Some(curve.easing_name()),
            other => other.name().map(str::to_string),
        }
    }
}

/// Names of all registered smoothing functions
pub fn available_smoothings() -> Vec<&'static str> {
    NAMED_SMOOTHINGS.iter().map(|(name, _)| *name).collect()
}

/// Elastic ease-out with period 0.6 and unit amplitude.
///
/// Constants are single precision so the curve matches existing
/// configurations bit for bit.
fn ease_out_elastic(x: f64) -> f64 {
    const PERIOD: f32 = 0.6;
    const SHIFT: f32 = PERIOD * 0.25;

    if x == 0.0 {
        return 0.0;
    }
    if x == 1.0 {
        return 1.0;
    }

    let period = f64::from(PERIOD);
    let shift = f64::from(SHIFT);
    2f64.powf(-10.0 * x) * ((x - shift) * TAU / period).sin() + 1.0
}

/// A cubic-bezier curve from (0, 0) to (1, 1) with two control points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// Control points of the straight line, used when none are given
    pub const IDENTITY: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

    const MAX_ITERATIONS: usize = 10;
    const TOLERANCE: f64 = 1e-6;

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Evaluate the curve's y for a given x progress.
    ///
    /// Finds the curve parameter with Newton's method, starting from `x` and
    /// giving up after a fixed number of steps; the last estimate is used
    /// even if it did not converge.
    pub fn solve(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..Self::MAX_ITERATIONS {
            let err = bezier_sample(t, self.x1, self.x2) - x;
            if err.abs() < Self::TOLERANCE {
                break;
            }

            let slope = bezier_slope(t, self.x1, self.x2);
            let next = t - err / slope;
            if !next.is_finite() {
                break;
            }
            t = next;
        }

        bezier_sample(t, self.y1, self.y2)
    }

    /// `cubic-bezier x1 y1 x2 y2`, each coordinate in shortest round-trip form
    pub fn easing_name(&self) -> String {
        format!(
            "{CUBIC_BEZIER} {} {} {} {}",
            self.x1, self.y1, self.x2, self.y2
        )
    }

    /// Coordinate-wise comparison within floating point noise
    pub fn approx_eq(&self, other: &CubicBezier) -> bool {
        epsilon_eq(self.x1, other.x1)
            && epsilon_eq(self.y1, other.y1)
            && epsilon_eq(self.x2, other.x2)
            && epsilon_eq(self.y2, other.y2)
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<CubicBezier> for Smoothing {
    fn from(curve: CubicBezier) -> Self {
        Smoothing::CubicBezier(curve)
    }
}

#[inline]
fn epsilon_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * (a + b).abs()
}

/// Evaluate one coordinate of the curve at parameter t:
/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

/// Derivative of one coordinate: B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
