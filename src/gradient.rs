//! Progress-driven color ramps.
//!
//! A [`GradientRamp`] maps a progress percentage to a color by piecewise-linear
//! interpolation between [`ColorStop`]s. Stops are sorted once on construction,
//! so lookups during animation only do a binary search and one lerp.

use crate::animation::Animatable;
use crate::color::Color;
use crate::error::ColorParseError;

/// One point of a color ramp: at `value` percent progress the track is `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub value: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(value: f64, color: impl Into<Color>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }

    /// Build a stop from a color string such as `"#ff0000"` or `"tomato"`.
    pub fn parse(value: f64, color: &str) -> Result<Self, ColorParseError> {
        Ok(Self {
            value,
            color: color.parse()?,
        })
    }
}

/// Space in which neighbouring stops are blended.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorSpace {
    /// Straight per-channel lerp of the stored RGB values.
    #[default]
    Rgb,
    /// Channels are raised to `gamma` before blending and back afterwards.
    /// `Gamma(2.2)` matches the `pow(2.2)` RGB blend of animation runtimes
    /// that interpolate colors this way; it is not the piecewise sRGB curve.
    Gamma(f32),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradientRamp {
    stops: Vec<ColorStop>,
    space: ColorSpace,
}

impl GradientRamp {
    /// Create a ramp; stops are stably sorted by value, so equal values keep
    /// their original order.
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by(|a, b| a.value.total_cmp(&b.value));
        Self {
            stops,
            space: ColorSpace::Rgb,
        }
    }

    pub fn color_space(mut self, space: ColorSpace) -> Self {
        self.space = space;
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Color for `progress_percent`, or `None` if the ramp has no stops.
    ///
    /// Values outside the first/last stop clamp to the end colors. At a value
    /// shared by several stops the last of them wins.
    pub fn color_at(&self, progress_percent: f64) -> Option<Color> {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return None,
        };
        if progress_percent.is_nan() || progress_percent <= first.value {
            return Some(first.color);
        }
        if progress_percent >= last.value {
            return Some(last.color);
        }

        // first.value < p < last.value, so 1 <= idx < len and upper.value > p >= lower.value.
        let idx = self.stops.partition_point(|s| s.value <= progress_percent);
        let lower = &self.stops[idx - 1];
        let upper = &self.stops[idx];
        let t = (progress_percent - lower.value) / (upper.value - lower.value);
        Some(self.blend(&lower.color, &upper.color, t))
    }

    /// Like [`color_at`](Self::color_at) but falls back to `default` for an empty ramp.
    pub fn color_at_or(&self, progress_percent: f64, default: Color) -> Color {
        self.color_at(progress_percent).unwrap_or(default)
    }

    fn blend(&self, from: &Color, to: &Color, t: f64) -> Color {
        match self.space {
            ColorSpace::Rgb => Color::lerp(from, to, t),
            ColorSpace::Gamma(gamma) if gamma > 0.0 && gamma.is_finite() => {
                let t = t as f32;
                let mix = |a: f32, b: f32| {
                    let a = a.max(0.0).powf(gamma);
                    let b = b.max(0.0).powf(gamma);
                    (a + (b - a) * t).powf(1.0 / gamma)
                };
                Color {
                    r: mix(from.r, to.r),
                    g: mix(from.g, to.g),
                    b: mix(from.b, to.b),
                    a: from.a + (to.a - from.a) * t,
                }
            }
            ColorSpace::Gamma(_) => Color::lerp(from, to, t),
        }
    }
}

impl From<Vec<ColorStop>> for GradientRamp {
    fn from(stops: Vec<ColorStop>) -> Self {
        GradientRamp::new(stops)
    }
}

/// How the active track is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackColor {
    Solid(Color),
    Gradient(GradientRamp),
}

impl From<Color> for TrackColor {
    fn from(color: Color) -> Self {
        TrackColor::Solid(color)
    }
}

impl From<Vec<ColorStop>> for TrackColor {
    fn from(stops: Vec<ColorStop>) -> Self {
        TrackColor::Gradient(GradientRamp::new(stops))
    }
}

impl From<GradientRamp> for TrackColor {
    fn from(ramp: GradientRamp) -> Self {
        TrackColor::Gradient(ramp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_to_white() -> GradientRamp {
        GradientRamp::new(vec![
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(100.0, Color::WHITE),
        ])
    }

    #[test]
    fn test_midpoint_is_half_grey() {
        let mid = black_to_white().color_at(50.0).unwrap();
        assert_eq!(mid.r, 0.5);
        assert_eq!(mid.g, 0.5);
        assert_eq!(mid.b, 0.5);
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_endpoints_and_clamping() {
        let ramp = black_to_white();
        assert_eq!(ramp.color_at(0.0), Some(Color::BLACK));
        assert_eq!(ramp.color_at(100.0), Some(Color::WHITE));
        assert_eq!(ramp.color_at(-20.0), Some(Color::BLACK));
        assert_eq!(ramp.color_at(250.0), Some(Color::WHITE));
    }

    #[test]
    fn test_unsorted_stops_are_sorted() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let ramp = GradientRamp::new(vec![
            ColorStop::new(100.0, blue),
            ColorStop::new(0.0, red),
        ]);
        assert_eq!(ramp.stops()[0].value, 0.0);
        let quarter = ramp.color_at(25.0).unwrap();
        assert_eq!(quarter.r, 0.75);
        assert_eq!(quarter.b, 0.25);
    }

    #[test]
    fn test_three_stops_pick_bounding_segment() {
        let ramp = GradientRamp::new(vec![
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(50.0, Color::rgb(1.0, 0.0, 0.0)),
            ColorStop::new(100.0, Color::rgb(1.0, 1.0, 0.0)),
        ]);
        let c = ramp.color_at(75.0).unwrap();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.5);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn test_duplicate_values_last_wins() {
        let a = Color::rgb(1.0, 0.0, 0.0);
        let b = Color::rgb(0.0, 1.0, 0.0);
        let ramp = GradientRamp::new(vec![
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(50.0, a),
            ColorStop::new(50.0, b),
            ColorStop::new(100.0, Color::WHITE),
        ]);
        assert_eq!(ramp.color_at(50.0), Some(b));
    }

    #[test]
    fn test_degenerate_ramps() {
        assert_eq!(GradientRamp::default().color_at(40.0), None);
        assert_eq!(
            GradientRamp::default().color_at_or(40.0, Color::TOMATO),
            Color::TOMATO
        );
        let single = GradientRamp::new(vec![ColorStop::new(30.0, Color::WHITE)]);
        assert_eq!(single.color_at(0.0), Some(Color::WHITE));
        assert_eq!(single.color_at(90.0), Some(Color::WHITE));
    }

    #[test]
    fn test_gamma_midpoint_is_brighter() {
        let ramp = black_to_white().color_space(ColorSpace::Gamma(2.2));
        let mid = ramp.color_at(50.0).unwrap();
        assert!(mid.r > 0.7 && mid.r < 0.75, "got {}", mid.r);
    }

    #[test]
    fn test_parse_stop() {
        let stop = ColorStop::parse(10.0, "#fff").unwrap();
        assert_eq!(stop.color, Color::WHITE);
        assert!(ColorStop::parse(10.0, "nope").is_err());
    }
}
