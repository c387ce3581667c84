//! Animation timing: easing curves, transitions, and tweens.
//!
//! The engine never drives frames itself. It hands the host `Tween`s and
//! `Transition`s, and the host samples them against its own clock.

use kurbo::Point;
use serde::{Deserialize, Serialize};

// ─── Easing ──────────────────────────────────────────────────────────────

/// Easing function (CSS `transition-timing-function` semantics).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Control points `(x1, y1, x2, y2)`.
    pub fn control_points(&self) -> (f64, f64, f64, f64) {
        match *self {
            Easing::Linear => (0.0, 0.0, 1.0, 1.0),
            Easing::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        }
    }

    /// Map linear progress `t ∈ [0, 1]` to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn | Easing::EaseOut | Easing::EaseInOut | Easing::CubicBezier(..) => {
                let (x1, y1, x2, y2) = self.control_points();
                cubic_bezier(x1, y1, x2, y2, t)
            }
        }
    }
}

/// One coordinate of a cubic Bézier with endpoints 0 and 1.
fn bezier_coord(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solve `x(s) = x` for the curve parameter, then return `y(s)`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    // Newton first; falls back to bisection when the slope flattens.
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - x;
        if err.abs() < EPSILON {
            return bezier_coord(y1, y2, s);
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    while hi - lo > EPSILON {
        let v = bezier_coord(x1, x2, s);
        if (v - x).abs() < EPSILON {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_coord(y1, y2, s)
}

// ─── Transition ──────────────────────────────────────────────────────────

/// When and how fast a property animates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            delay_ms: 0,
            duration_ms,
            easing,
        }
    }

    pub const fn delayed(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Eased progress after `elapsed_ms`: 0 during the delay, 1 once finished.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let t = elapsed_ms - f64::from(self.delay_ms);
        if t <= 0.0 {
            return if self.duration_ms == 0 && t == 0.0 { 1.0 } else { 0.0 };
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.easing.apply(t / f64::from(self.duration_ms))
    }
}

// ─── Tween ───────────────────────────────────────────────────────────────

/// Linear interpolation between two values.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f64) -> Self {
        Point::lerp(self, to, t)
    }
}

/// A value animating from `from` to `to` along a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub transition: Transition,
}

impl<T: Lerp> Tween<T> {
    pub const fn new(from: T, to: T, transition: Transition) -> Self {
        Self {
            from,
            to,
            transition,
        }
    }

    /// Value at `elapsed_ms` since the tween was mounted.
    pub fn sample(&self, elapsed_ms: f64) -> T {
        self.from.lerp(self.to, self.transition.progress(elapsed_ms))
    }
}
