//! Easing curves for the progress sweep.
//!
//! The two ring presets each use one curve: the pausable ring sweeps at
//! constant speed ([`TimingFunction::Linear`]) so that a resumed transition
//! keeps the pace it was paused at, and the circular preset uses the
//! in-out quad curve ([`TimingFunction::EaseInOut`]). The remaining variants
//! are there for hosts that want a different feel:
//!
//! - [`TimingFunction::EaseIn`] / [`TimingFunction::EaseOut`] - quadratic
//!   halves of the in-out curve
//! - [`TimingFunction::CubicBezier`] - CSS-style `cubic-bezier(..)`
//! - [`TimingFunction::Custom`] - any `Fn(f64) -> f64`
//!
//! ```ignore
//! let config = AnimationConfig::ring().easing(TimingFunction::EaseOut);
//! ```
//!
//! Curves map elapsed fraction to progress fraction. Duration rescaling
//! after a pause assumes a linear curve; with any other curve a resumed
//! sweep restarts its easing from the paused value.

use std::sync::Arc;

/// Shape of a progress sweep over its duration.
#[derive(Clone)]
pub enum TimingFunction {
    /// Constant sweep speed; the pausable ring's curve
    Linear,
    /// `t²`
    EaseIn,
    /// `t(2 - t)`
    EaseOut,
    /// In-out quad; the circular preset's curve
    EaseInOut,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f64, f64, f64, f64),
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl TimingFunction {
    /// Progress fraction reached after elapsed fraction `t` (0.0 to 1.0).
    /// Custom and bezier curves may leave `[0, 1]`; the sweep then overshoots.
    pub fn evaluate(&self, t: f64) -> f64 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => ease_in(t),
            TimingFunction::EaseOut => ease_out(t),
            TimingFunction::EaseInOut => ease_in_out(t),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseIn => write!(f, "EaseIn"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::EaseInOut => write!(f, "EaseInOut"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

// Easing functions

fn ease_in(t: f64) -> f64 {
    t * t
}

fn ease_out(t: f64) -> f64 {
    t * (2.0 - t)
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Cubic bezier curve evaluation
/// Simplified implementation assuming x1, x2 are in [0, 1]
fn cubic_bezier(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Newton-Raphson: find the curve parameter whose x equals t
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = cubic_bezier_x(current_t, x1, x2);
        let current_slope = cubic_bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-9 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    cubic_bezier_y(current_t, y1, y2)
}

fn cubic_bezier_x(t: f64, x1: f64, x2: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3
}

fn cubic_bezier_y(t: f64, y1: f64, y2: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3
}

fn cubic_bezier_slope(t: f64, x1: f64, x2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}
