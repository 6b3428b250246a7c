//! Small fixed-size vector helpers on `[f64; 3]`.

/// A 3-vector of `f64`.
pub type Vec3 = [f64; 3];

/// The zero vector.
pub const ZERO: Vec3 = [0.0; 3];

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: Vec3, k: f64) -> Vec3 {
    [a[0] * k, a[1] * k, a[2] * k]
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    norm(sub(a, b))
}

#[inline]
pub fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    scale(add(a, b), 0.5)
}

/// Unit vector along `a`, or the zero vector when `a` has zero length.
#[inline]
pub fn normalize(a: Vec3) -> Vec3 {
    let len = norm(a);
    if len > 0.0 { scale(a, 1.0 / len) } else { ZERO }
}

/// Arithmetic mean of a set of points (zero for an empty set).
pub fn mean(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return ZERO;
    }
    let sum = points.iter().fold(ZERO, |acc, &p| add(acc, p));
    scale(sum, 1.0 / points.len() as f64)
}
