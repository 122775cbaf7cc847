//! Turns a progress snapshot into the shapes of one frame.
//!
//! The ring is never stroked as an arc. Two half-discs rotate about the
//! center; before 50% the right half sweeps in from behind a mask covering
//! the left side, after 50% it stays put and the left half sweeps in. Two
//! concentric discs on top punch out the middle, leaving a ring.
//!
//! ```ignore
//! let renderer = RingRenderer::new(&RingConfig::default())?;
//! let frame = renderer.frame(&ProgressSnapshot::at(0.75));
//! assert!(frame.visibility.contains(Visibility::LEFT_HALF));
//! ```

mod frame;
mod instance;

pub use frame::{Layer, LayerKind, RingFrame, Visibility};
pub use instance::{QuadVertex, ShapeInstance, QUAD_INDICES, QUAD_VERTICES};

use crate::color::Color;
use crate::controller::ProgressSnapshot;
use crate::error::ConfigError;
use crate::geometry::{RingConfig, RingLayout, Shape};
use crate::gradient::{GradientRamp, TrackColor};
use crate::transform::Transform;

/// Rotation of the right half-disc in degrees.
pub fn right_half_rotation(progress: f64) -> f32 {
    if progress <= 0.5 {
        (progress * 360.0 - 180.0) as f32
    } else {
        0.0
    }
}

/// Rotation of the left half-disc in degrees.
pub fn left_half_rotation(progress: f64) -> f32 {
    if progress > 0.5 {
        ((progress - 0.5) * 360.0 - 180.0) as f32
    } else {
        0.0
    }
}

/// Moving parts shown at `progress`.
pub fn visibility(progress: f64, rounded_tip: bool) -> Visibility {
    let mut flags = Visibility::empty();
    flags.set(Visibility::RIGHT_HALF, progress > 0.0);
    flags.set(Visibility::OVERSHOOT_MASK, progress < 0.5);
    flags.set(Visibility::LEFT_HALF, progress > 0.5);
    flags.set(Visibility::START_TIP, rounded_tip && progress > 0.0);
    flags.set(Visibility::END_TIP, rounded_tip && progress > 0.0);
    flags
}

#[derive(Debug, Clone, PartialEq)]
enum TrackPaint {
    Solid(Color),
    Gradient { ramp: GradientRamp, fallback: Color },
}

/// Renders frames for one [`RingConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct RingRenderer {
    layout: RingLayout,
    paint: TrackPaint,
    transform: Transform,
    use_rounded_tip: bool,
}

impl RingRenderer {
    pub fn new(config: &RingConfig) -> Result<Self, ConfigError> {
        let layout = RingLayout::compute(config)?;
        let fallback = config.theme.palette().track;
        let paint = match &config.track_color {
            Some(TrackColor::Solid(color)) => TrackPaint::Solid(*color),
            Some(TrackColor::Gradient(ramp)) => TrackPaint::Gradient {
                ramp: ramp.clone(),
                fallback,
            },
            None => TrackPaint::Solid(fallback),
        };
        let transform = Transform::ring(
            config.rotate_start_point_by,
            config.clockwise,
            layout.center,
        );
        Ok(Self {
            layout,
            paint,
            transform,
            use_rounded_tip: config.use_rounded_tip,
        })
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Active track color at `progress` (a fraction).
    pub fn track_color_at(&self, progress: f64) -> Color {
        match &self.paint {
            TrackPaint::Solid(color) => *color,
            TrackPaint::Gradient { ramp, fallback } => {
                ramp.color_at_or(progress * 100.0, *fallback)
            }
        }
    }

    pub fn frame(&self, snapshot: &ProgressSnapshot) -> RingFrame {
        let layout = &self.layout;
        let progress = snapshot.progress;
        let flags = visibility(progress, self.use_rounded_tip);
        let track = self.track_color_at(progress);
        let center = layout.center;
        let shown = |flag: Visibility| if flags.contains(flag) { 1.0 } else { 0.0 };
        let tinted = |shape: &Shape| Shape {
            fill: track,
            ..*shape
        };

        let mut layers = Vec::with_capacity(8);
        layers.push(Layer::fixed(
            LayerKind::InactiveTrack,
            layout.inactive_track,
            center,
        ));
        layers.push(Layer {
            opacity: shown(Visibility::RIGHT_HALF),
            rotation_deg: right_half_rotation(progress),
            ..Layer::fixed(LayerKind::RightHalf, tinted(&layout.right_half), center)
        });
        layers.push(Layer {
            opacity: shown(Visibility::OVERSHOOT_MASK),
            ..Layer::fixed(LayerKind::OvershootMask, layout.overshoot_mask, center)
        });
        layers.push(Layer {
            opacity: shown(Visibility::LEFT_HALF),
            rotation_deg: left_half_rotation(progress),
            ..Layer::fixed(LayerKind::LeftHalf, tinted(&layout.left_half), center)
        });
        if self.use_rounded_tip {
            layers.push(Layer {
                opacity: shown(Visibility::START_TIP),
                ..Layer::fixed(LayerKind::StartTip, tinted(&layout.start_tip), center)
            });
            layers.push(Layer {
                opacity: shown(Visibility::END_TIP),
                translate: layout.tip_position(snapshot.angle),
                ..Layer::fixed(LayerKind::EndTip, tinted(&layout.end_tip), center)
            });
        }
        layers.push(Layer::fixed(
            LayerKind::InnerOverlay,
            layout.inner_overlay,
            center,
        ));
        layers.push(Layer::fixed(LayerKind::InnerMask, layout.inner_mask, center));

        log::trace!(
            "ring frame: progress={:.4} visibility={:?}",
            progress,
            flags
        );

        RingFrame {
            progress,
            angle: snapshot.angle,
            phase: snapshot.phase,
            track_color: track,
            visibility: flags,
            transform: self.transform,
            layers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::ColorStop;
    use crate::transform::apply_affine;

    fn renderer() -> RingRenderer {
        RingRenderer::new(&RingConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_ring_shows_only_static_layers() {
        let frame = renderer().frame(&ProgressSnapshot::at(0.0));
        assert_eq!(frame.visibility, Visibility::OVERSHOOT_MASK);
        assert!(!frame.is_visible(LayerKind::RightHalf));
        assert!(!frame.is_visible(LayerKind::EndTip));
        assert!(frame.is_visible(LayerKind::InactiveTrack));
        assert!(frame.is_visible(LayerKind::InnerMask));
        // inactive track, overshoot mask, inner overlay, inner mask
        assert_eq!(frame.instances().len(), 4);
    }

    #[test]
    fn test_first_half_rotates_right_half() {
        let frame = renderer().frame(&ProgressSnapshot::at(0.25));
        let right = frame.layer(LayerKind::RightHalf).unwrap();
        assert_eq!(right.rotation_deg, -90.0);
        assert_eq!(right.pivot, (150.0, 150.0));
        assert!(frame.is_visible(LayerKind::OvershootMask));
        assert!(!frame.is_visible(LayerKind::LeftHalf));
    }

    #[test]
    fn test_half_way_boundary() {
        let frame = renderer().frame(&ProgressSnapshot::at(0.5));
        assert!(frame.is_visible(LayerKind::RightHalf));
        assert!(!frame.is_visible(LayerKind::OvershootMask));
        assert!(!frame.is_visible(LayerKind::LeftHalf));
        assert_eq!(frame.layer(LayerKind::RightHalf).unwrap().rotation_deg, 0.0);
        assert_eq!(frame.layer(LayerKind::LeftHalf).unwrap().rotation_deg, 0.0);
    }

    #[test]
    fn test_second_half_rotates_left_half() {
        let frame = renderer().frame(&ProgressSnapshot::at(0.75));
        assert_eq!(frame.layer(LayerKind::RightHalf).unwrap().rotation_deg, 0.0);
        assert_eq!(frame.layer(LayerKind::LeftHalf).unwrap().rotation_deg, -90.0);
        assert!(frame.visibility.contains(Visibility::LEFT_HALF | Visibility::RIGHT_HALF));
        assert_eq!(left_half_rotation(1.0), 0.0);
    }

    #[test]
    fn test_layer_order() {
        let kinds: Vec<_> = renderer()
            .frame(&ProgressSnapshot::at(0.3))
            .layers
            .iter()
            .map(|l| l.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                LayerKind::InactiveTrack,
                LayerKind::RightHalf,
                LayerKind::OvershootMask,
                LayerKind::LeftHalf,
                LayerKind::StartTip,
                LayerKind::EndTip,
                LayerKind::InnerOverlay,
                LayerKind::InnerMask,
            ]
        );
    }

    #[test]
    fn test_tips_disabled() {
        let r = RingRenderer::new(&RingConfig::default().use_rounded_tip(false)).unwrap();
        let frame = r.frame(&ProgressSnapshot::at(0.6));
        assert!(frame.layer(LayerKind::StartTip).is_none());
        assert!(!frame.visibility.intersects(Visibility::START_TIP | Visibility::END_TIP));
    }

    #[test]
    fn test_end_tip_follows_angle() {
        let r = renderer();
        // Quarter progress: angle 0, tip sits on the right at the middle radius
        let frame = r.frame(&ProgressSnapshot::at(0.25));
        let tip = frame.layer(LayerKind::EndTip).unwrap();
        let (x, y) = tip.translate;
        assert!((x - (130.0 + 135.0)).abs() < 1e-3, "x = {}", x);
        assert!((y - 135.0).abs() < 1e-3, "y = {}", y);
    }

    #[test]
    fn test_gradient_track_color() {
        let config = RingConfig::default().track_gradient(vec![
            ColorStop::new(0.0, Color::BLACK),
            ColorStop::new(100.0, Color::WHITE),
        ]);
        let r = RingRenderer::new(&config).unwrap();
        let frame = r.frame(&ProgressSnapshot::at(0.5));
        assert_eq!(frame.track_color, Color::rgb(0.5, 0.5, 0.5));
        assert_eq!(frame.layer(LayerKind::LeftHalf).unwrap().shape.fill, frame.track_color);

        let empty = RingRenderer::new(&RingConfig::default().track_gradient(vec![])).unwrap();
        assert_eq!(empty.track_color_at(0.4), Color::TOMATO);
    }

    #[test]
    fn test_counter_clockwise_instances_are_mirrored() {
        let r = RingRenderer::new(&RingConfig::default().clockwise(false)).unwrap();
        let frame = r.frame(&ProgressSnapshot::at(0.25));
        let right = frame.instances()[1];
        // The right half's outer edge midpoint, rotated -90deg, lands at the top;
        // mirroring keeps it there.
        let (x, y) = apply_affine(&right.transform, 295.0, 150.0);
        assert!((x - 150.0).abs() < 1e-3 && (y - 5.0).abs() < 1e-3, "({}, {})", x, y);
        assert!(!frame.transform.is_identity());
    }
}
