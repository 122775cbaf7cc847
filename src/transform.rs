/// 2D affine transform applied to a whole shape at paint time.
///
/// Points are scaled, then rotated, about `origin`, then translated. This is
/// the order CSS uses for `translate(..) rotate(..) scale(..)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation in x and y
    pub translate: (f32, f32),
    /// Scale in x and y (1.0 = no scale, -1.0 mirrors)
    pub scale: (f32, f32),
    /// Rotation in radians (clockwise, y axis pointing down)
    pub rotate: f32,
    /// Pivot for scale and rotation, in the same coordinates as the points
    pub origin: (f32, f32),
}

impl Transform {
    /// Identity transform (no transformation)
    pub const IDENTITY: Self = Self {
        translate: (0.0, 0.0),
        scale: (1.0, 1.0),
        rotate: 0.0,
        origin: (0.0, 0.0),
    };

    /// Create a translation transform
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate: (x, y),
            ..Self::IDENTITY
        }
    }

    /// Create a rotation transform (in radians)
    pub fn rotate(radians: f32) -> Self {
        Self {
            rotate: radians,
            ..Self::IDENTITY
        }
    }

    /// Create a rotation transform from degrees
    pub fn rotate_degrees(degrees: f32) -> Self {
        Self::rotate(degrees.to_radians())
    }

    /// Set the scale
    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = (x, y);
        self
    }

    /// Set the pivot point
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Rigid transform placing a ring's start point and direction: rotated
    /// by `rotate_start_point_by` degrees and mirrored horizontally when
    /// filling counter-clockwise, both about `center`.
    pub fn ring(rotate_start_point_by: f32, clockwise: bool, center: (f32, f32)) -> Self {
        let mirror = if clockwise { 1.0 } else { -1.0 };
        Self::rotate_degrees(rotate_start_point_by)
            .with_scale(mirror, 1.0)
            .with_origin(center.0, center.1)
    }

    pub fn is_identity(&self) -> bool {
        self.translate == (0.0, 0.0) && self.scale == (1.0, 1.0) && self.rotate.abs() <= 1e-6
    }

    /// Apply this transform to a point
    pub fn apply_to_point(&self, x: f32, y: f32) -> (f32, f32) {
        // Translate to origin
        let mut tx = x - self.origin.0;
        let mut ty = y - self.origin.1;

        // Apply scale
        tx *= self.scale.0;
        ty *= self.scale.1;

        // Apply rotation
        if self.rotate.abs() > 1e-6 {
            let cos = self.rotate.cos();
            let sin = self.rotate.sin();
            let rx = tx * cos - ty * sin;
            let ry = tx * sin + ty * cos;
            tx = rx;
            ty = ry;
        }

        // Translate back from origin, then apply translation
        (
            tx + self.origin.0 + self.translate.0,
            ty + self.origin.1 + self.translate.1,
        )
    }
}

/// Row-major 2x3 affine matrix `[a, b, c, d, e, f]` mapping
/// `(x, y)` to `(a·x + b·y + e, c·x + d·y + f)`.
pub type Affine = [f32; 6];

impl Transform {
    /// The transform as an affine matrix, for uploading to a shader.
    pub fn to_affine(&self) -> Affine {
        let (sin, cos) = if self.rotate.abs() > 1e-6 {
            self.rotate.sin_cos()
        } else {
            (0.0, 1.0)
        };
        let (sx, sy) = self.scale;
        let (a, b, c, d) = (cos * sx, -sin * sy, sin * sx, cos * sy);
        let (ox, oy) = self.origin;
        [
            a,
            b,
            c,
            d,
            ox + self.translate.0 - (a * ox + b * oy),
            oy + self.translate.1 - (c * ox + d * oy),
        ]
    }
}

/// Matrix applying `inner` first, then `outer`.
pub fn compose(outer: &Affine, inner: &Affine) -> Affine {
    let [a1, b1, c1, d1, e1, f1] = *outer;
    let [a2, b2, c2, d2, e2, f2] = *inner;
    [
        a1 * a2 + b1 * c2,
        a1 * b2 + b1 * d2,
        c1 * a2 + d1 * c2,
        c1 * b2 + d1 * d2,
        a1 * e2 + b1 * f2 + e1,
        c1 * e2 + d1 * f2 + f1,
    ]
}

/// Apply an affine matrix to a point.
pub fn apply_affine(m: &Affine, x: f32, y: f32) -> (f32, f32) {
    (m[0] * x + m[1] * y + m[4], m[2] * x + m[3] * y + m[5])
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
