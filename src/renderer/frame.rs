use bitflags::bitflags;

use super::instance::ShapeInstance;
use crate::color::Color;
use crate::controller::Phase;
use crate::geometry::Shape;
use crate::transform::{compose, Transform};

bitflags! {
    /// Which of the moving parts are shown in a frame
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Visibility: u8 {
        const RIGHT_HALF     = 0b0_0001;
        const OVERSHOOT_MASK = 0b0_0010;
        const LEFT_HALF      = 0b0_0100;
        const START_TIP      = 0b0_1000;
        const END_TIP        = 0b1_0000;
    }
}

/// Identifies a layer of the ring, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    InactiveTrack,
    RightHalf,
    OvershootMask,
    LeftHalf,
    StartTip,
    EndTip,
    InnerOverlay,
    InnerMask,
}

/// One shape of a frame with its per-frame animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub shape: Shape,
    /// 0.0 (hidden) or 1.0
    pub opacity: f32,
    /// Clockwise rotation in degrees about `pivot`
    pub rotation_deg: f32,
    pub pivot: (f32, f32),
    pub translate: (f32, f32),
}

impl Layer {
    pub(crate) fn fixed(kind: LayerKind, shape: Shape, pivot: (f32, f32)) -> Self {
        Self {
            kind,
            shape,
            opacity: 1.0,
            rotation_deg: 0.0,
            pivot,
            translate: (0.0, 0.0),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Transform of this layer inside the ring, before the ring transform.
    pub fn local_transform(&self) -> Transform {
        Transform {
            translate: self.translate,
            rotate: self.rotation_deg.to_radians(),
            origin: self.pivot,
            ..Transform::IDENTITY
        }
    }
}

/// Everything a host needs to paint the ring once.
#[derive(Debug, Clone, PartialEq)]
pub struct RingFrame {
    /// Progress fraction in `0.0..=1.0`
    pub progress: f64,
    /// Sweep angle in radians
    pub angle: f64,
    pub phase: Phase,
    /// Color of the active track at this progress
    pub track_color: Color,
    pub visibility: Visibility,
    /// Start-point rotation and direction, applied to every layer
    pub transform: Transform,
    /// Layers in paint order
    pub layers: Vec<Layer>,
}

impl RingFrame {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn is_visible(&self, kind: LayerKind) -> bool {
        self.layer(kind).is_some_and(Layer::is_visible)
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.is_visible())
    }

    /// Flatten visible layers into GPU instances, in paint order.
    pub fn instances(&self) -> Vec<ShapeInstance> {
        let ring = self.transform.to_affine();
        self.visible_layers()
            .map(|layer| {
                let local = layer.local_transform().to_affine();
                ShapeInstance::new(&layer.shape, layer.opacity, compose(&ring, &local))
            })
            .collect()
    }
}
