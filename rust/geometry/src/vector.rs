// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vector and orientation kernel
//!
//! Cross/dot/norm come straight from nalgebra. This module adds the
//! epsilon-aware pieces the triangulator relies on: normalization with a
//! degeneracy signal, a signed orientation test against a reference normal,
//! and the same-side point-in-triangle test built on top of it.

use crate::{Point3, Vector3};

/// Magnitude below which normals and orientations are treated as zero
pub const EPSILON: f64 = 1e-6;

/// Normalize a vector, returning `None` when its norm is below [`EPSILON`]
#[inline]
pub fn try_normalize(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let norm = v.norm();
    if norm < EPSILON {
        None
    } else {
        Some(v / norm)
    }
}

/// Signed turn of `a -> b -> c` seen along `normal`
///
/// Computes `dot(cross(b - a, c - b), normal)`. Values with magnitude below
/// [`EPSILON`] are clamped to exactly `0.0`, so near-collinear triples are
/// neither convex nor reflex.
#[inline]
pub fn orientation(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    normal: &Vector3<f64>,
) -> f64 {
    let value = (b - a).cross(&(c - b)).dot(normal);
    if value.abs() < EPSILON {
        0.0
    } else {
        value
    }
}

/// Rotational direction of a polygon relative to its reference normal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

impl Winding {
    /// Winding implied by the sign of an orientation value; `None` for zero
    #[inline]
    pub fn from_orientation(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Winding::CounterClockwise)
        } else if value < 0.0 {
            Some(Winding::Clockwise)
        } else {
            None
        }
    }

    /// True if a corner with this orientation turns the same way as the polygon
    #[inline]
    pub fn is_convex(self, value: f64) -> bool {
        match self {
            Winding::CounterClockwise => value > 0.0,
            Winding::Clockwise => value < 0.0,
        }
    }
}

/// True if `p` and `q` lie on the same side of the line `a -> b`
///
/// A point exactly on the line counts as being on either side.
#[inline]
pub fn same_side(
    p: &Point3<f64>,
    q: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    normal: &Vector3<f64>,
) -> bool {
    orientation(a, b, p, normal) * orientation(a, b, q, normal) >= 0.0
}

/// Same-side containment test in the plane of `normal`
///
/// Points on an edge of the triangle are reported as inside.
#[inline]
pub fn point_in_triangle(
    p: &Point3<f64>,
    t1: &Point3<f64>,
    t2: &Point3<f64>,
    t3: &Point3<f64>,
    normal: &Vector3<f64>,
) -> bool {
    same_side(p, t1, t2, t3, normal)
        && same_side(p, t2, t1, t3, normal)
        && same_side(p, t3, t1, t2, normal)
}

/// Area of the triangle `a, b, c`
#[inline]
pub fn triangle_area(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    (b - a).cross(&(c - a)).norm() * 0.5
}
