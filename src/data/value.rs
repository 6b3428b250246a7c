//! Element types a field can hold.

use crate::geometry::vector::{self, Vec3};

/// A value that can be differenced, summed and scaled: the minimum a field
/// element needs for the finite-volume operators.
pub trait FieldValue: Copy + Send + Sync + 'static {
    const ZERO: Self;

    fn add(self, other: Self) -> Self;
    fn sub(self, other: Self) -> Self;
    fn scale(self, k: f64) -> Self;
}

impl FieldValue for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn add(self, other: Self) -> Self {
        self + other
    }
    #[inline]
    fn sub(self, other: Self) -> Self {
        self - other
    }
    #[inline]
    fn scale(self, k: f64) -> Self {
        self * k
    }
}

impl FieldValue for Vec3 {
    const ZERO: Self = vector::ZERO;

    #[inline]
    fn add(self, other: Self) -> Self {
        vector::add(self, other)
    }
    #[inline]
    fn sub(self, other: Self) -> Self {
        vector::sub(self, other)
    }
    #[inline]
    fn scale(self, k: f64) -> Self {
        vector::scale(self, k)
    }
}
