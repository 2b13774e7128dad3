// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::Point3;

use crate::triangulation::{triangulate_polygon, TriangulationStatus};
use crate::{Error, Result};

/// Per-face outcome counts collected while building a mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceReport {
    /// Faces fully triangulated
    pub complete: usize,
    /// Faces where ear search ran dry; their partial output is kept
    pub partial: usize,
    /// Faces that produced nothing (too few vertices, no plane normal)
    pub degenerate: usize,
}

impl FaceReport {
    /// Total number of faces seen
    #[inline]
    pub fn total(&self) -> usize {
        self.complete + self.partial + self.degenerate
    }

    /// Accumulate another report into this one
    #[inline]
    pub fn absorb(&mut self, other: &FaceReport) {
        self.complete += other.complete;
        self.partial += other.partial;
        self.degenerate += other.degenerate;
    }
}

/// Triangle mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Triangulate every face against one shared vertex buffer
    ///
    /// Faces are triangulated independently and their index lists appended
    /// in order. With `invert` the complete index sequence is reversed
    /// afterwards, flipping which side of every triangle faces forward.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IndexOutOfRange`] if any face references a vertex
    /// outside `vertices`; such a mesh cannot be emitted.
    pub fn from_polygons(
        vertices: &[Point3<f64>],
        faces: &[Vec<u32>],
        invert: bool,
    ) -> Result<(Self, FaceReport)> {
        let mut mesh = Mesh::with_capacity(vertices.len(), faces.len() * 6);
        let mut report = FaceReport::default();

        for vertex in vertices {
            mesh.add_vertex(vertex);
        }

        for face in faces {
            let triangulation = triangulate_polygon(vertices, face)?;
            match triangulation.status {
                TriangulationStatus::Complete => report.complete += 1,
                TriangulationStatus::Partial { .. } => report.partial += 1,
                TriangulationStatus::Degenerate => report.degenerate += 1,
            }
            mesh.indices.extend_from_slice(&triangulation.indices);
        }

        if invert {
            mesh.invert_winding();
        }

        Ok((mesh, report))
    }

    /// Add a vertex
    #[inline]
    pub fn add_vertex(&mut self, position: &Point3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Reverse the index sequence in place
    ///
    /// Every triangle's winding flips; positions are untouched.
    #[inline]
    pub fn invert_winding(&mut self) {
        self.indices.reverse();
    }

    /// Check that the index list forms whole triangles within the vertex range
    pub fn validate_indices(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(Error::IncompleteTriangle(self.indices.len()));
        }
        let vertex_count = self.vertex_count();
        match self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            Some(&index) => Err(Error::IndexOutOfRange {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max) - optimized with chunk iteration
    #[inline]
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        // Use chunks for better cache locality
        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
