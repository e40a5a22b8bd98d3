//! Vector algebra on `glam::DVec3`.
//!
//! Two operation families exist and are never mixed:
//! - pure operations take `self` by value and return a new vector
//!   (glam's operators plus [`VectorExt`]);
//! - in-place operations are named `*_in_place`, take `&mut self` and
//!   mutate the receiver.
//!
//! `DVec3` is `Copy`, so a value returned by a pure operation can never alias
//! the state it was computed from.

use glam::DVec3;

/// The vector type used by the whole kernel.
pub type Vector = DVec3;

/// Vector operations beyond glam's arithmetic.
pub trait VectorExt: Sized {
    /// `self / |self|`. Unguarded: a zero vector yields NaN components.
    fn unit(self) -> Self;

    /// Part of `self` parallel to `axis`. Returns zero when `axis` has zero
    /// length.
    fn projection_on(self, axis: Self) -> Self;

    /// Component-wise sign test: true when the projection of `self` onto
    /// `axis` shares the sign of `axis` on at least one coordinate.
    ///
    /// For a finite, nonzero `axis` this agrees with `self · axis > 0`, but
    /// it is kept as its own primitive; see [`VectorExt::same_direction`].
    fn sharp_angle(self, axis: Self) -> bool;

    /// Conventional test: `self · other > 0`.
    fn same_direction(self, other: Self) -> bool;

    /// In-place `self *= k`.
    fn scale_in_place(&mut self, k: f64);

    /// In-place [`VectorExt::unit`]. Unguarded like its pure counterpart.
    fn normalize_in_place(&mut self);

    /// In-place [`VectorExt::projection_on`], with the same zero-axis guard.
    fn projection_on_in_place(&mut self, axis: Self);
}

impl VectorExt for DVec3 {
    fn unit(self) -> Self {
        self / self.length()
    }

    fn projection_on(self, axis: Self) -> Self {
        let axis_len_sq = axis.dot(axis);
        if axis_len_sq == 0.0 {
            return DVec3::ZERO;
        }
        axis * (self.dot(axis) / axis_len_sq)
    }

    fn sharp_angle(self, axis: Self) -> bool {
        let w = self.projection_on(axis);
        w.x * axis.x > 0.0 || w.y * axis.y > 0.0 || w.z * axis.z > 0.0
    }

    fn same_direction(self, other: Self) -> bool {
        self.dot(other) > 0.0
    }

    fn scale_in_place(&mut self, k: f64) {
        *self *= k;
    }

    fn normalize_in_place(&mut self) {
        let len = self.length();
        *self /= len;
    }

    fn projection_on_in_place(&mut self, axis: Self) {
        *self = self.projection_on(axis);
    }
}

/// Operations that read a vector as a position.
pub trait PointExt: Sized {
    /// Vector from `self` to `other`.
    fn connecting_vector_to(self, other: Self) -> Self;

    fn distance_to(self, other: Self) -> f64;

    /// Unit vector from `self` towards `other`. NaN when the points coincide.
    fn direction_to(self, other: Self) -> Self;
}

impl PointExt for DVec3 {
    fn connecting_vector_to(self, other: Self) -> Self {
        other - self
    }

    fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }

    fn direction_to(self, other: Self) -> Self {
        (other - self).unit()
    }
}
