//! 2D affine transforms and the transform stack.
//!
//! [`Matrix`] is a 2×3 affine map expressed directly in canvas clip space.
//! The identity carries a 1/64 base scale: the 128-pixel canvas spans clip
//! space [-1, 1], so one canvas pixel is 1/64 of a clip unit. Scaling the
//! identity by a sprite's pixel size therefore maps the unit quad exactly to
//! the sprite's on-canvas footprint.
//!
//! [`TransformStack`] holds the matrices the scene callback composes through
//! `push`/`pop`. The stack always keeps its root matrix; draws read the top
//! by value and never mutate the stack.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One canvas pixel in clip units (128 pixels across [-1, 1]).
pub const BASE_SCALE: f32 = 1.0 / 64.0;

/// A 2×3 affine matrix. Row 0 produces the x output (x basis, y basis,
/// translation), row 1 the y output. The layout matches the two `Float32x3`
/// instance attributes the sprite shader consumes, so matrices upload as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
}

impl Matrix {
    /// The base-scale identity: `1/64` on the diagonal, zero elsewhere.
    pub const IDENTITY: Self = Self {
        m00: BASE_SCALE,
        m01: 0.0,
        m02: 0.0,
        m10: 0.0,
        m11: BASE_SCALE,
        m12: 0.0,
    };

    /// Add `(dx, dy)` to the translation column.
    ///
    /// The offset is added as-is, not multiplied through the linear part,
    /// so a later [`scale`](Self::scale) rescales it while an earlier one
    /// does not. Call order matters.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.m02 += dx;
        self.m12 += dy;
    }

    /// Scale the x output row by `sx` and the y output row by `sy`,
    /// translation included.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.m00 *= sx;
        self.m01 *= sx;
        self.m02 *= sx;
        self.m10 *= sy;
        self.m11 *= sy;
        self.m12 *= sy;
    }

    /// Left-multiply by a counter-clockwise rotation of `degrees`.
    ///
    /// Both output rows are computed from the pre-rotation matrix, so the
    /// linear part and the translation rotate together as one 2×3 multiply.
    pub fn rotate(&mut self, degrees: f32) {
        let (s, c) = degrees.to_radians().sin_cos();
        let m = *self;
        self.m00 = m.m00 * c - m.m10 * s;
        self.m01 = m.m01 * c - m.m11 * s;
        self.m02 = m.m02 * c - m.m12 * s;
        self.m10 = m.m00 * s + m.m10 * c;
        self.m11 = m.m01 * s + m.m11 * c;
        self.m12 = m.m02 * s + m.m12 * c;
    }

    /// The matrix used to draw a `w`×`h` sprite: the unit quad is scaled to
    /// the sprite's pixel footprint before the composed transform applies.
    /// The translation column is untouched.
    pub fn sized(&self, w: f32, h: f32) -> Self {
        Self {
            m00: self.m00 * w,
            m01: self.m01 * h,
            m02: self.m02,
            m10: self.m10 * w,
            m11: self.m11 * h,
            m12: self.m12,
        }
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.m00 * p.x + self.m01 * p.y + self.m02,
            self.m10 * p.x + self.m11 * p.y + self.m12,
        )
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A growable stack of [`Matrix`] values with at least one element (the
/// root) at all times.
///
/// `push` duplicates the top so mutations stay isolated until the matching
/// `pop`. Popping the root is a contract violation: debug builds panic,
/// release builds keep the root in place.
pub struct TransformStack {
    stack: Vec<Matrix>,
}

impl TransformStack {
    /// A one-element stack holding the base-scale identity.
    pub fn new() -> Self {
        Self {
            stack: vec![Matrix::IDENTITY],
        }
    }

    /// The active matrix.
    pub fn current(&self) -> &Matrix {
        self.stack.last().expect("transform stack is never empty")
    }

    /// The active matrix, for in-place mutation.
    pub fn current_mut(&mut self) -> &mut Matrix {
        self.stack
            .last_mut()
            .expect("transform stack is never empty")
    }

    /// Duplicate the top matrix.
    pub fn push(&mut self) {
        let top = *self.current();
        self.stack.push(top);
    }

    /// Discard the top matrix, restoring the one below.
    pub fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "transform stack underflow");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// How many matrices are on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-6
    }

    #[test]
    fn identity_has_base_scale_diagonal() {
        let m = Matrix::IDENTITY;
        assert_eq!(m.m00, BASE_SCALE);
        assert_eq!(m.m11, BASE_SCALE);
        assert_eq!((m.m01, m.m02, m.m10, m.m12), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn reset_restores_identity_after_mutation() {
        let mut stack = TransformStack::new();
        stack.current_mut().translate(3.0, -2.0);
        stack.current_mut().rotate(45.0);
        *stack.current_mut() = Matrix::IDENTITY;
        assert_eq!(*stack.current(), Matrix::IDENTITY);
    }

    #[test]
    fn push_pop_round_trips_any_prior_state() {
        let mut stack = TransformStack::new();
        stack.current_mut().translate(0.25, -0.5);
        stack.current_mut().scale(2.0, 3.0);
        stack.current_mut().rotate(30.0);
        let saved = *stack.current();

        stack.push();
        stack.current_mut().rotate(90.0);
        stack.current_mut().translate(1.0, 1.0);
        assert_ne!(*stack.current(), saved);

        stack.pop();
        assert_eq!(*stack.current(), saved);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_isolates_mutation_from_the_matrix_below() {
        let mut stack = TransformStack::new();
        stack.push();
        stack.current_mut().scale(5.0, 5.0);
        stack.pop();
        assert_eq!(*stack.current(), Matrix::IDENTITY);
    }

    #[test]
    fn rotate_90_maps_x_basis_onto_y() {
        let mut m = Matrix::IDENTITY;
        m.rotate(90.0);
        let p = m.transform_point(Vec2::X);
        assert!(approx(p, Vec2::new(0.0, BASE_SCALE)), "got {p:?}");
    }

    #[test]
    fn two_quarter_turns_equal_a_half_turn() {
        let mut twice = Matrix::IDENTITY;
        twice.translate(0.5, 0.0);
        twice.rotate(90.0);
        twice.rotate(90.0);

        let mut once = Matrix::IDENTITY;
        once.translate(0.5, 0.0);
        once.rotate(180.0);

        let p = Vec2::new(1.0, 2.0);
        assert!(approx(twice.transform_point(p), once.transform_point(p)));
    }

    #[test]
    fn rotation_carries_the_translation_column() {
        let mut m = Matrix::IDENTITY;
        m.translate(0.5, 0.0);
        m.rotate(90.0);
        // The offset itself rotates onto +y.
        let origin = m.transform_point(Vec2::ZERO);
        assert!(approx(origin, Vec2::new(0.0, 0.5)), "got {origin:?}");
    }

    #[test]
    fn scale_rescales_translation_but_translate_adds_raw() {
        let mut m = Matrix::IDENTITY;
        m.translate(4.0, 2.0);
        m.scale(2.0, 3.0);
        assert_eq!((m.m02, m.m12), (8.0, 6.0));
        m.translate(1.0, 1.0);
        assert_eq!((m.m02, m.m12), (9.0, 7.0));
    }

    #[test]
    fn sized_scales_basis_columns_only() {
        let mut m = Matrix::IDENTITY;
        m.translate(0.25, 0.75);
        m.rotate(30.0);
        let s = m.sized(8.0, 16.0);
        assert_eq!(s.m00, m.m00 * 8.0);
        assert_eq!(s.m10, m.m10 * 8.0);
        assert_eq!(s.m01, m.m01 * 16.0);
        assert_eq!(s.m11, m.m11 * 16.0);
        assert_eq!((s.m02, s.m12), (m.m02, m.m12));
    }
}
