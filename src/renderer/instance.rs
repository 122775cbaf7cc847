//! GPU-ready records for hosts that draw the ring with instanced quads.

use crate::geometry::Shape;
use crate::transform::Affine;

/// Vertex of the unit quad every instance is stretched over.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

/// The shared unit quad vertices.
pub const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex {
        position: [0.0, 0.0],
    }, // top-left
    QuadVertex {
        position: [1.0, 0.0],
    }, // top-right
    QuadVertex {
        position: [0.0, 1.0],
    }, // bottom-left
    QuadVertex {
        position: [1.0, 1.0],
    }, // bottom-right
];

/// Index buffer for the unit quad (two triangles).
pub const QUAD_INDICES: &[u16] = &[
    0, 1, 2, // top-left, top-right, bottom-left
    1, 3, 2, // top-right, bottom-right, bottom-left
];

/// Per-instance data for one rounded rectangle of the ring.
///
/// Every field is `f32`, so the struct has no implicit padding and is 112
/// bytes, a multiple of 16 as uniform/storage layouts require.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeInstance {
    /// Rectangle bounds before transformation: [x, y, width, height]
    pub rect: [f32; 4],
    /// Corner radii: [top_left, top_right, bottom_right, bottom_left]
    pub corner_radii: [f32; 4],
    /// Fill color RGBA, alpha already multiplied by the layer opacity
    pub fill_color: [f32; 4],
    /// Border color RGBA
    pub border_color: [f32; 4],
    pub border_width: f32,
    pub opacity: f32,
    pub _pad0: [f32; 2],
    /// Transform matrix `[a, b, c, d, e, f]`, see [`Affine`]
    pub transform: Affine,
    pub _pad1: [f32; 2],
}

impl ShapeInstance {
    pub fn new(shape: &Shape, opacity: f32, transform: Affine) -> Self {
        let fill = shape.fill;
        let (border_width, border_color) = match shape.border {
            Some(border) => (border.width, border.color.to_array()),
            None => (0.0, [0.0; 4]),
        };
        Self {
            rect: [shape.rect.x, shape.rect.y, shape.rect.width, shape.rect.height],
            corner_radii: shape.radii.to_array(),
            fill_color: fill.with_alpha(fill.a * opacity).to_array(),
            border_color,
            border_width,
            opacity,
            _pad0: [0.0; 2],
            transform,
            _pad1: [0.0; 2],
        }
    }
}

impl Default for ShapeInstance {
    fn default() -> Self {
        Self {
            rect: [0.0; 4],
            corner_radii: [0.0; 4],
            fill_color: [0.0; 4],
            border_color: [0.0; 4],
            border_width: 0.0,
            opacity: 1.0,
            _pad0: [0.0; 2],
            transform: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0], // identity
            _pad1: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::{Border, CornerRadii, Rect};

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), 112);
        assert_eq!(std::mem::size_of::<ShapeInstance>() % 16, 0);
        let instance = ShapeInstance::default();
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 112);
    }

    #[test]
    fn test_instance_from_shape() {
        let shape = Shape::new(
            Rect::new(1.0, 2.0, 3.0, 4.0),
            CornerRadii::all(1.5),
            Color::rgba(1.0, 0.0, 0.0, 0.8),
        )
        .with_border(Border::new(2.0, Color::BLACK));
        let inst = ShapeInstance::new(&shape, 0.5, [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(inst.rect, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(inst.corner_radii, [1.5; 4]);
        assert!((inst.fill_color[3] - 0.4).abs() < 1e-6);
        assert_eq!(inst.border_width, 2.0);
        assert_eq!(inst.border_color, [0.0, 0.0, 0.0, 1.0]);
    }
}
