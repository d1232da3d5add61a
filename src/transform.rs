//! 2D affine transformation matrices for surface transform stacks.

use crate::units::*;
use pdf_writer::Content;

/// An affine transformation matrix.
///
/// The matrix is represented as [a, b, c, d, e, f] corresponding to:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
/// and points are treated as row vectors, `[x y 1] × M`. This is the same layout
/// used by PDF content streams and by the HTML canvas `setTransform` call.
///
/// # Composing transforms
///
/// [`then`](Transform::then) applies `other` after `self`. Surfaces keep a
/// current transform and apply canvas-style local operations with
/// [`pre_translate`](Transform::pre_translate) and
/// [`pre_rotate`](Transform::pre_rotate), which act in the current local frame.
///
/// ```
/// use stamp_gen::{Transform, Px};
///
/// // move to the stamp centre, then walk up the radius
/// let t = Transform::translate(Px(150.0), Px(150.0)).pre_translate(Px(0.0), Px(-134.0));
/// let (x, y) = t.apply(Px(0.0), Px(0.0));
/// assert_eq!((x, y), (Px(150.0), Px(16.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform
    pub fn translate(x: Px, y: Px) -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: *x,
            f: *y,
        }
    }

    /// Create a rotation transform (angle in radians). On a y-down surface a
    /// positive angle turns clockwise
    pub fn rotate(angle: f32) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a scaling transform
    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Combine this transform with another (self * other)
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Translate within the current local frame, like `ctx.translate`
    pub fn pre_translate(self, x: Px, y: Px) -> Self {
        Transform::translate(x, y).then(self)
    }

    /// Rotate the current local frame, like `ctx.rotate`
    pub fn pre_rotate(self, angle: f32) -> Self {
        Transform::rotate(angle).then(self)
    }

    /// Map a point in local coordinates to surface coordinates
    pub fn apply(&self, x: Px, y: Px) -> (Px, Px) {
        (
            Px(*x * self.a + *y * self.c + self.e),
            Px(*x * self.b + *y * self.d + self.f),
        )
    }

    /// The rotation of the local x-axis relative to the surface, in radians (-π, π]
    pub fn rotation(&self) -> f32 {
        self.b.atan2(self.a)
    }

    /// Write the transform to a PDF content stream
    pub fn write_to_content(&self, content: &mut Content) {
        content.transform([self.a, self.b, self.c, self.d, self.e, self.f]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: (Px, Px), b: (f32, f32)) -> bool {
        (*a.0 - b.0).abs() < 1e-4 && (*a.1 - b.1).abs() < 1e-4
    }

    #[test]
    fn rotating_a_quarter_turn_is_clockwise_on_y_down_surfaces() {
        let t = Transform::rotate(FRAC_PI_2);
        // the local "up" vector (0, -1) ends up pointing right
        assert!(close(t.apply(Px(0.0), Px(-1.0)), (1.0, 0.0)));
    }

    #[test]
    fn local_operations_compose_like_a_canvas() {
        let t = Transform::translate(Px(150.0), Px(150.0))
            .pre_rotate(FRAC_PI_2)
            .pre_translate(Px(0.0), Px(-100.0));
        assert!(close(t.apply(Px(0.0), Px(0.0)), (250.0, 150.0)));
        assert!((t.rotation() - FRAC_PI_2).abs() < 1e-5);

        let flipped = t.pre_rotate(PI);
        assert!(close(flipped.apply(Px(0.0), Px(0.0)), (250.0, 150.0)));
        assert!((flipped.rotation() + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn identity_is_neutral() {
        let t = Transform::translate(Px(3.0), Px(4.0)).then(Transform::scale(2.0, 2.0));
        assert_eq!(t.then(Transform::identity()), t);
        assert_eq!(Transform::identity().then(t), t);
        assert!(close(t.apply(Px(1.0), Px(1.0)), (8.0, 10.0)));
    }
}
