//! Tolerant comparisons for `f32`.

/// Tolerance used by every approximate comparison in the engine.
pub const EPSILON: f32 = 1e-6;

#[inline]
pub fn are_equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

#[inline]
pub fn are_not_equal(a: f32, b: f32) -> bool {
    !are_equal(a, b)
}

#[inline]
pub fn is_zero(value: f32) -> bool {
    value.abs() <= EPSILON
}

#[inline]
pub fn is_not_zero(value: f32) -> bool {
    !is_zero(value)
}

/// `value > reference` by more than the tolerance.
#[inline]
pub fn is_greater_than(value: f32, reference: f32) -> bool {
    value - reference > EPSILON
}

/// `value < reference` by more than the tolerance.
#[inline]
pub fn is_less_than(value: f32, reference: f32) -> bool {
    reference - value > EPSILON
}

/// Gives `target` the sign of `source`.
#[inline]
pub fn copy_sign(source: f32, target: f32) -> f32 {
    target.copysign(source)
}

/// Drops the fractional part, keeping the sign.
#[inline]
pub fn truncate(value: f32) -> f32 {
    value.trunc()
}
