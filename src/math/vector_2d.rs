//! Small 2D vector helpers on top of nalgebra.
use std::f64::consts::TAU;

use nalgebra::Rotation2;

use super::{Point2, Vector2};
use crate::error::{GeometryError, Result};

/// Scalar 2D cross product (`a.x * b.y - a.y * b.x`).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Left-pointing perpendicular of `v`, normalized.
#[must_use]
pub fn unit_orthogonal(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x).normalize()
}

/// Rotates `v` counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate(v: &Vector2, angle: f64) -> Vector2 {
    Rotation2::new(angle) * v
}

/// Unsigned angle between two vectors, in `[0, π]`.
#[must_use]
pub fn angle_between(a: &Vector2, b: &Vector2) -> f64 {
    let cos = a.dot(b) / (a.norm() * b.norm());
    cos.clamp(-1.0, 1.0).acos()
}

/// Angle between the position vectors `a` and `b`, measured in the sense
/// given by `a_direction`.
///
/// If moving from `a` towards `b` goes against `a_direction`, the reflex
/// angle `2π - angle` is returned instead.
#[must_use]
pub fn angle_between_with_direction(a: &Vector2, a_direction: &Vector2, b: &Vector2) -> f64 {
    let simple = angle_between(a, b);
    if a_direction.dot(&(b - a)) >= 0.0 {
        simple
    } else {
        TAU - simple
    }
}

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Polar angle of `point` around `center`, in `[0, 2π)`.
#[must_use]
pub fn polar_angle(center: &Point2, point: &Point2) -> f64 {
    let d = point - center;
    normalize_angle(d.y.atan2(d.x))
}

/// Normalizes a direction vector.
///
/// # Errors
///
/// Returns `GeometryError::NonFinite` for NaN/infinite components and
/// `GeometryError::ZeroVector` for a zero vector.
pub fn unit(v: &Vector2) -> Result<Vector2> {
    if !v.x.is_finite() || !v.y.is_finite() {
        return Err(GeometryError::NonFinite.into());
    }
    let len = v.norm();
    if len == 0.0 {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(v / len)
}

/// Checks that both coordinates of a point are finite.
///
/// # Errors
///
/// Returns `GeometryError::NonFinite` otherwise.
pub fn finite_point(p: &Point2) -> Result<Point2> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(*p)
    } else {
        Err(GeometryError::NonFinite.into())
    }
}
