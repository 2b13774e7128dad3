// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Ear clipping for planar polygons embedded in 3D. The polygon is never
//! projected to 2D: convexity and containment are decided with the signed
//! orientation test against a reference normal taken from the first three
//! vertices. Floor plan faces are small (a handful to a few dozen vertices),
//! so the O(n³) worst case is not a concern.

use smallvec::SmallVec;

use crate::vector::{orientation, point_in_triangle, try_normalize, Winding};
use crate::{Error, Point3, Result, Vector3};

/// How a single polygon triangulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangulationStatus {
    /// Every vertex was clipped; `n - 2` triangles were produced
    Complete,
    /// Fewer than three indices, or no usable plane normal; nothing produced
    Degenerate,
    /// No ear could be found with `remaining` vertices left in the ring.
    /// Triangles clipped before that point are kept.
    Partial { remaining: usize },
}

/// Triangle indices produced for one polygon
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    /// Flat triangle list in the vertex buffer's index space
    pub indices: Vec<u32>,
    pub status: TriangulationStatus,
}

impl Triangulation {
    #[inline]
    fn degenerate() -> Self {
        Self {
            indices: Vec::new(),
            status: TriangulationStatus::Degenerate,
        }
    }

    /// Number of triangles produced
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status == TriangulationStatus::Complete
    }
}

/// Triangulate one polygon given as indices into `vertices`
///
/// The polygon may be concave but must be planar and simple. Winding is
/// taken from the first three vertices; emitted triangles keep that winding.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] if the polygon references a vertex that
/// does not exist. Degenerate or malformed polygons are not errors: they show
/// up in [`Triangulation::status`].
pub fn triangulate_polygon(vertices: &[Point3<f64>], polygon: &[u32]) -> Result<Triangulation> {
    if polygon.len() < 3 {
        return Ok(Triangulation::degenerate());
    }

    if let Some(&index) = polygon.iter().find(|&&i| i as usize >= vertices.len()) {
        return Err(Error::IndexOutOfRange {
            index,
            vertex_count: vertices.len(),
        });
    }

    let point = |i: u32| &vertices[i as usize];

    let (v0, v1, v2) = (point(polygon[0]), point(polygon[1]), point(polygon[2]));
    let normal = match try_normalize(&(v1 - v0).cross(&(v2 - v0))) {
        Some(n) => n,
        None => return Ok(Triangulation::degenerate()),
    };

    let winding = match Winding::from_orientation(orientation(v0, v1, v2, &normal)) {
        Some(w) => w,
        None => return Ok(Triangulation::degenerate()),
    };

    let mut ring: SmallVec<[u32; 16]> = SmallVec::from_slice(polygon);
    let mut indices = Vec::with_capacity((polygon.len() - 2) * 3);

    while ring.len() > 3 {
        let Some(curr) = find_ear(vertices, &ring, &normal, winding) else {
            tracing::warn!(
                vertices = polygon.len(),
                remaining = ring.len(),
                clipped = indices.len() / 3,
                "Failed to find an ear; polygon may be non-simple or non-planar"
            );
            return Ok(Triangulation {
                indices,
                status: TriangulationStatus::Partial {
                    remaining: ring.len(),
                },
            });
        };

        let n = ring.len();
        let prev = (curr + n - 1) % n;
        let next = (curr + 1) % n;
        indices.extend_from_slice(&[ring[prev], ring[curr], ring[next]]);
        ring.remove(curr);
    }

    indices.extend_from_slice(&ring);

    Ok(Triangulation {
        indices,
        status: TriangulationStatus::Complete,
    })
}

/// Position in `ring` of the first vertex that can be clipped
fn find_ear(
    vertices: &[Point3<f64>],
    ring: &[u32],
    normal: &Vector3<f64>,
    winding: Winding,
) -> Option<usize> {
    let n = ring.len();
    let point = |slot: usize| &vertices[ring[slot] as usize];

    (0..n).find(|&curr| {
        let prev = (curr + n - 1) % n;
        let next = (curr + 1) % n;
        let (a, b, c) = (point(prev), point(curr), point(next));

        if !winding.is_convex(orientation(a, b, c, normal)) {
            return false;
        }

        !(0..n)
            .filter(|&j| j != prev && j != curr && j != next)
            .any(|j| point_in_triangle(point(j), a, b, c, normal))
    })
}
