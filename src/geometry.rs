//! Static layout of the ring.
//!
//! The active arc is faked with two half-discs that rotate about the ring
//! center, a half-disc mask that hides the right half-disc while it is still
//! swinging through the left side, and two concentric discs that punch the
//! hole back into the middle. [`RingLayout::compute`] turns a [`RingConfig`]
//! into the rectangles, radii and colors of all of those pieces. It has no
//! time dependency; the renderer only rotates, shows and hides them.

use crate::color::{Color, Theme};
use crate::error::ConfigError;
use crate::gradient::{ColorStop, TrackColor};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` with its top-left corner at `(offset, offset)`.
    pub fn square(offset: f32, size: f32) -> Self {
        Self::new(offset, offset, size, size)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Per-corner radii, clockwise from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub fn all(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Rounded on the right edge only, as for a right half-disc.
    pub fn right(radius: f32) -> Self {
        Self {
            top_right: radius,
            bottom_right: radius,
            ..Self::default()
        }
    }

    /// Rounded on the left edge only, as for a left half-disc.
    pub fn left(radius: f32) -> Self {
        Self {
            top_left: radius,
            bottom_left: radius,
            ..Self::default()
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

/// Border definition for shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Border width in logical pixels
    pub width: f32,
    /// Border color
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// A filled rounded rectangle in ring-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub fill: Color,
    pub border: Option<Border>,
}

impl Shape {
    pub fn new(rect: Rect, radii: CornerRadii, fill: Color) -> Self {
        Self {
            rect,
            radii,
            fill,
            border: None,
        }
    }

    /// A full disc inscribed in a square.
    pub fn disc(offset: f32, diameter: f32, fill: Color) -> Self {
        Self::new(
            Rect::square(offset, diameter),
            CornerRadii::all(diameter / 2.0),
            fill,
        )
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }
}

/// Which middle radius the end tip travels on.
///
/// The two published variants of the ring disagree here, so both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TipVariant {
    /// `radius - track_width / 1.5`, used by the circular variant.
    TrackRelative,
    /// `radius - inactive_track_width / 2`, the center line of the inactive track.
    #[default]
    InactiveCentered,
}

/// Geometry and colors of one ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RingConfig {
    pub radius: f32,
    pub track_width: f32,
    pub inactive_track_width: f32,
    pub theme: Theme,
    /// Active track color; the theme's track color when unset
    pub track_color: Option<TrackColor>,
    pub inactive_track_color: Option<Color>,
    pub background_color: Option<Color>,
    /// Fill direction; counter-clockwise mirrors the whole ring
    pub clockwise: bool,
    /// Rotation of the start point, in degrees clockwise from the top
    pub rotate_start_point_by: f32,
    pub use_rounded_tip: bool,
    pub tip_variant: TipVariant,
}

impl RingConfig {
    /// Defaults of the pausable ring: 300px across, tip on the inactive track's center line.
    pub fn ring() -> Self {
        Self {
            radius: 150.0,
            track_width: 30.0,
            inactive_track_width: 40.0,
            theme: Theme::Light,
            track_color: None,
            inactive_track_color: None,
            background_color: None,
            clockwise: true,
            rotate_start_point_by: 0.0,
            use_rounded_tip: true,
            tip_variant: TipVariant::InactiveCentered,
        }
    }

    /// Defaults of the circular variant: radius 150, track-relative tip.
    pub fn circular() -> Self {
        Self {
            tip_variant: TipVariant::TrackRelative,
            ..Self::ring()
        }
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the outer diameter.
    pub fn size(mut self, size: f32) -> Self {
        self.radius = size / 2.0;
        self
    }

    pub fn track_width(mut self, width: f32) -> Self {
        self.track_width = width;
        self
    }

    pub fn inactive_track_width(mut self, width: f32) -> Self {
        self.inactive_track_width = width;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn track_color(mut self, color: impl Into<TrackColor>) -> Self {
        self.track_color = Some(color.into());
        self
    }

    /// Color the track along progress with gradient stops.
    pub fn track_gradient(mut self, stops: Vec<ColorStop>) -> Self {
        self.track_color = Some(TrackColor::from(stops));
        self
    }

    pub fn inactive_track_color(mut self, color: impl Into<Color>) -> Self {
        self.inactive_track_color = Some(color.into());
        self
    }

    pub fn background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    pub fn rotate_start_point_by(mut self, degrees: f32) -> Self {
        self.rotate_start_point_by = degrees;
        self
    }

    pub fn use_rounded_tip(mut self, rounded: bool) -> Self {
        self.use_rounded_tip = rounded;
        self
    }

    pub fn tip_variant(mut self, variant: TipVariant) -> Self {
        self.tip_variant = variant;
        self
    }

    /// Check the constraints the layout relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("radius", self.radius),
            ("track_width", self.track_width),
            ("inactive_track_width", self.inactive_track_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        if !self.rotate_start_point_by.is_finite() {
            return Err(ConfigError::InvalidDimension {
                name: "rotate_start_point_by",
                value: self.rotate_start_point_by,
            });
        }
        if self.inactive_track_width < self.track_width {
            return Err(ConfigError::TrackWiderThanInactive {
                track: self.track_width,
                inactive: self.inactive_track_width,
            });
        }
        if self.radius < self.inactive_track_width {
            return Err(ConfigError::RadiusTooSmall {
                radius: self.radius,
                inactive: self.inactive_track_width,
            });
        }
        Ok(())
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self::ring()
    }
}

/// Every static piece of the ring, positioned in a `2r x 2r` box.
#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    pub radius: f32,
    pub track_width: f32,
    pub inactive_track_width: f32,
    /// Gap between the inactive and active track edges
    pub ring_padding: f32,
    /// Outer radius of the active track
    pub active_ring_radius: f32,
    /// Radius of the inner inactive overlay
    pub inner_active_ring_radius: f32,
    pub bounds: Rect,
    /// Point both half-discs rotate about
    pub center: (f32, f32),
    pub inactive_track: Shape,
    pub right_half_container: Rect,
    pub right_half: Shape,
    pub overshoot_mask: Shape,
    pub left_half_container: Rect,
    pub left_half: Shape,
    pub start_tip: Shape,
    /// End tip at the origin; the renderer translates it to the live tip position
    pub end_tip: Shape,
    pub inner_overlay: Shape,
    pub inner_mask: Shape,
    pub tip_variant: TipVariant,
}

impl RingLayout {
    pub fn compute(config: &RingConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let palette = config.theme.palette();
        let track = match &config.track_color {
            Some(TrackColor::Solid(color)) => *color,
            Some(TrackColor::Gradient(ramp)) => ramp.color_at_or(0.0, palette.track),
            None => palette.track,
        };
        let inactive = config.inactive_track_color.unwrap_or(palette.inactive_track);
        let background = config.background_color.unwrap_or(palette.background);

        let radius = config.radius;
        let track_width = config.track_width;
        let inactive_width = config.inactive_track_width;

        let ring_padding = (inactive_width - track_width) / 2.0;
        let active_ring_radius = radius - ring_padding;
        let inner_active_ring_radius = radius - inactive_width + ring_padding;

        let active_box = Rect::square(ring_padding, active_ring_radius * 2.0);

        let inactive_track = Shape::new(
            Rect::square(0.0, radius * 2.0),
            CornerRadii::all(radius),
            Color::TRANSPARENT,
        )
        .with_border(Border::new(inactive_width, inactive));

        let right_half = Shape::new(
            Rect::new(
                active_box.x + active_ring_radius,
                active_box.y,
                active_ring_radius,
                active_ring_radius * 2.0,
            ),
            CornerRadii::right(active_ring_radius),
            track,
        );
        let left_half = Shape::new(
            Rect::new(
                active_box.x,
                active_box.y,
                active_ring_radius,
                active_ring_radius * 2.0,
            ),
            CornerRadii::left(active_ring_radius),
            track,
        );

        // Covers the left side of the box, where the right half-disc sits
        // before it has swung past 50%.
        let overshoot_mask = Shape::new(
            Rect::new(0.0, 0.0, radius, radius * 2.0),
            CornerRadii::left(radius),
            inactive,
        );

        let start_tip = Shape::new(
            Rect::new(
                radius - track_width / 2.0,
                ring_padding,
                track_width,
                track_width,
            ),
            CornerRadii::all(track_width / 2.0),
            track,
        );
        let end_tip = Shape::new(
            Rect::new(0.0, 0.0, track_width, track_width),
            CornerRadii::all(track_width / 2.0),
            track,
        );

        let inner_overlay = Shape::disc(
            inactive_width - ring_padding,
            inner_active_ring_radius * 2.0,
            inactive,
        );
        let inner_mask = Shape::disc(inactive_width, (radius - inactive_width) * 2.0, background);

        Ok(Self {
            radius,
            track_width,
            inactive_track_width: inactive_width,
            ring_padding,
            active_ring_radius,
            inner_active_ring_radius,
            bounds: Rect::square(0.0, radius * 2.0),
            center: (radius, radius),
            inactive_track,
            right_half_container: active_box,
            right_half,
            overshoot_mask,
            left_half_container: active_box,
            left_half,
            start_tip,
            end_tip,
            inner_overlay,
            inner_mask,
            tip_variant: config.tip_variant,
        })
    }

    /// Radius of the circle the end tip's center travels on.
    pub fn middle_radius(&self) -> f32 {
        match self.tip_variant {
            TipVariant::TrackRelative => self.radius - self.track_width / 1.5,
            TipVariant::InactiveCentered => self.radius - self.inactive_track_width / 2.0,
        }
    }

    /// Top-left corner of the end tip for a sweep angle in radians.
    pub fn tip_position(&self, angle: f64) -> (f32, f32) {
        let middle = f64::from(self.middle_radius());
        let offset = f64::from(self.radius - self.track_width / 2.0);
        (
            (middle * angle.cos() + offset) as f32,
            (middle * angle.sin() + offset) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{} != {}", a, b);
    }

    #[test]
    fn test_default_constants() {
        let layout = RingLayout::compute(&RingConfig::default()).unwrap();
        assert_eq!(layout.ring_padding, 5.0);
        assert_eq!(layout.active_ring_radius, 145.0);
        assert_eq!(layout.inner_active_ring_radius, 115.0);
        assert_eq!(layout.bounds, Rect::square(0.0, 300.0));
        assert_eq!(layout.center, (150.0, 150.0));
    }

    #[test]
    fn test_half_discs_share_the_active_box() {
        let layout = RingLayout::compute(&RingConfig::default()).unwrap();
        assert_eq!(layout.right_half_container, Rect::square(5.0, 290.0));
        assert_eq!(layout.right_half.rect, Rect::new(150.0, 5.0, 145.0, 290.0));
        assert_eq!(layout.right_half.radii, CornerRadii::right(145.0));
        assert_eq!(layout.left_half.rect, Rect::new(5.0, 5.0, 145.0, 290.0));
        assert_eq!(layout.left_half.radii, CornerRadii::left(145.0));
        assert_eq!(layout.right_half_container.center(), layout.center);
    }

    #[test]
    fn test_overlays_are_concentric() {
        let layout = RingLayout::compute(&RingConfig::default()).unwrap();
        assert_eq!(layout.inner_overlay.rect, Rect::square(35.0, 230.0));
        assert_eq!(layout.inner_mask.rect, Rect::square(40.0, 220.0));
        assert_eq!(layout.inner_overlay.rect.center(), layout.center);
        assert_eq!(layout.inner_mask.rect.center(), layout.center);
        assert_eq!(layout.inner_mask.fill, Color::WHITE);
        assert_eq!(layout.overshoot_mask.rect, Rect::new(0.0, 0.0, 150.0, 300.0));
    }

    #[test]
    fn test_theme_and_explicit_colors() {
        let dark = RingLayout::compute(&RingConfig::default().theme(Theme::Dark)).unwrap();
        assert_eq!(dark.inner_mask.fill, Color::BLACK);
        assert_eq!(dark.right_half.fill, Color::TOMATO);

        let custom = RingConfig::default()
            .track_color(Color::from_hex(0x3366ff))
            .inactive_track_color(0x222222u32)
            .background_color(Color::TRANSPARENT);
        let layout = RingLayout::compute(&custom).unwrap();
        assert_eq!(layout.left_half.fill, Color::from_hex(0x3366ff));
        assert_eq!(layout.overshoot_mask.fill, Color::from_hex(0x222222));
        assert_eq!(
            layout.inactive_track.border,
            Some(Border::new(40.0, Color::from_hex(0x222222)))
        );
        assert_eq!(layout.inner_mask.fill, Color::TRANSPARENT);
    }

    #[test]
    fn test_rejects_track_wider_than_inactive() {
        let config = RingConfig::default().track_width(50.0).inactive_track_width(40.0);
        assert_eq!(
            RingLayout::compute(&config),
            Err(ConfigError::TrackWiderThanInactive {
                track: 50.0,
                inactive: 40.0
            })
        );
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            RingConfig::default().track_width(-1.0).validate(),
            Err(ConfigError::InvalidDimension { name: "track_width", .. })
        ));
        assert!(matches!(
            RingConfig::default().radius(f32::NAN).validate(),
            Err(ConfigError::InvalidDimension { name: "radius", .. })
        ));
        assert!(matches!(
            RingConfig::default().radius(30.0).validate(),
            Err(ConfigError::RadiusTooSmall { .. })
        ));
    }

    #[test]
    fn test_equal_widths_have_no_padding() {
        let config = RingConfig::default().track_width(40.0);
        let layout = RingLayout::compute(&config).unwrap();
        assert_eq!(layout.ring_padding, 0.0);
        assert_eq!(layout.active_ring_radius, 150.0);
    }

    #[test]
    fn test_size_sets_radius() {
        assert_eq!(RingConfig::default().size(120.0).radius, 60.0);
    }

    #[test]
    fn test_tip_variants() {
        let inactive = RingLayout::compute(&RingConfig::ring()).unwrap();
        assert_close(inactive.middle_radius(), 130.0);
        let track = RingLayout::compute(&RingConfig::circular()).unwrap();
        assert_close(track.middle_radius(), 130.0);

        // The variants diverge once the widths differ from the defaults
        let config = RingConfig::ring().track_width(12.0).inactive_track_width(20.0);
        let a = RingLayout::compute(&config.clone().tip_variant(TipVariant::TrackRelative)).unwrap();
        let b = RingLayout::compute(&config).unwrap();
        assert_close(a.middle_radius(), 142.0);
        assert_close(b.middle_radius(), 140.0);
    }

    #[test]
    fn test_tip_at_start_sits_on_start_tip() {
        let layout = RingLayout::compute(&RingConfig::ring()).unwrap();
        let (x, y) = layout.tip_position(-FRAC_PI_2);
        assert_close(x, layout.start_tip.rect.x);
        assert_close(y, layout.start_tip.rect.y);
    }

    #[test]
    fn test_tip_at_half_is_at_bottom() {
        let layout = RingLayout::compute(&RingConfig::ring()).unwrap();
        let (x, y) = layout.tip_position(PI / 2.0);
        assert_close(x, 135.0);
        assert_close(y, 130.0 + 135.0);
    }
}
