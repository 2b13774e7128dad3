// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh buffer builder.
//!
//! Turns one named mesh into the byte blob and view/accessor layout that the
//! assembler registers. Blob layout (little endian):
//!
//! ```text
//! [0, 12 * vertex_count)                     f32 x, y, z per vertex
//! [12 * vertex_count, + 2 * index_count)     u16 triangle indices
//! ```
//!
//! The position region is always a multiple of 4 bytes long, so the index
//! region starts right after it without padding.

use floorplan_glb_geometry::{FaceReport, Mesh, Point3};

use crate::document::BufferTarget;
use crate::{Error, Result};

/// Largest vertex count for `u16` indices. Index 65535 is the primitive
/// restart value and may not appear in an index accessor.
pub const MAX_VERTICES: usize = u16::MAX as usize;

const POSITION_STRIDE: usize = 3 * std::mem::size_of::<f32>();
const INDEX_SIZE: usize = std::mem::size_of::<u16>();

/// Byte window of one region inside a mesh blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub byte_offset: usize,
    pub byte_length: usize,
    pub target: BufferTarget,
}

/// Packed binary data and layout for a single mesh.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    pub name: String,
    /// Positions followed by indices.
    pub blob: Vec<u8>,
    pub position_view: ViewLayout,
    pub index_view: ViewLayout,
    pub vertex_count: usize,
    pub index_count: usize,
    /// Per-axis minimum over all vertices.
    pub min: [f32; 3],
    /// Per-axis maximum over all vertices.
    pub max: [f32; 3],
    /// How the source faces triangulated.
    pub faces: FaceReport,
}

impl MeshBuffers {
    /// Triangulate `faces` over `vertices` and pack the result.
    ///
    /// More than one face is accepted and triangulated face by face, but it
    /// is logged since upstream entities normally carry a single face.
    pub fn build(
        name: &str,
        vertices: &[Point3<f64>],
        faces: &[Vec<u32>],
        invert: bool,
    ) -> Result<Self> {
        if faces.len() > 1 {
            tracing::warn!(mesh = name, faces = faces.len(), "Mesh has more than one face");
        }

        let (mesh, report) =
            Mesh::from_polygons(vertices, faces, invert).map_err(|source| Error::Geometry {
                mesh: name.to_string(),
                source,
            })?;

        Self::pack(name, &mesh, report)
    }

    /// Pack an already triangulated mesh.
    ///
    /// # Errors
    ///
    /// Rejects meshes whose indices fall outside the vertex range or that
    /// have more vertices than `u16` indices can reach. Nothing is truncated.
    pub fn pack(name: &str, mesh: &Mesh, faces: FaceReport) -> Result<Self> {
        mesh.validate_indices().map_err(|source| Error::Geometry {
            mesh: name.to_string(),
            source,
        })?;

        let vertex_count = mesh.vertex_count();
        if vertex_count > MAX_VERTICES {
            return Err(Error::TooManyVertices {
                mesh: name.to_string(),
                vertex_count,
            });
        }

        let index_count = mesh.indices.len();
        let position_length = vertex_count * POSITION_STRIDE;
        let index_length = index_count * INDEX_SIZE;

        let mut blob = Vec::with_capacity(position_length + index_length);
        for value in &mesh.positions {
            blob.extend_from_slice(&value.to_le_bytes());
        }
        // validate_indices + MAX_VERTICES guarantee every index fits in u16
        for &index in &mesh.indices {
            blob.extend_from_slice(&(index as u16).to_le_bytes());
        }

        let (min, max) = mesh.bounds();

        Ok(Self {
            name: name.to_string(),
            blob,
            position_view: ViewLayout {
                byte_offset: 0,
                byte_length: position_length,
                target: BufferTarget::ArrayBuffer,
            },
            index_view: ViewLayout {
                byte_offset: position_length,
                byte_length: index_length,
                target: BufferTarget::ElementArrayBuffer,
            },
            vertex_count,
            index_count,
            min: [min.x, min.y, min.z],
            max: [max.x, max.y, max.z],
            faces,
        })
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.index_count / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }
}
