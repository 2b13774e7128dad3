// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for packing and writing scene assets.

use thiserror::Error;

/// Result type alias for asset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while packing or writing an asset.
#[derive(Debug, Error)]
pub enum Error {
    /// Triangulation or index validation failed for a mesh.
    #[error("geometry error in mesh '{mesh}': {source}")]
    Geometry {
        mesh: String,
        #[source]
        source: floorplan_glb_geometry::Error,
    },

    /// A mesh has more vertices than 16-bit indices can address.
    #[error("mesh '{mesh}' has {vertex_count} vertices; 16-bit indices address at most 65535")]
    TooManyVertices { mesh: String, vertex_count: usize },

    /// The binary payload does not fit the 32-bit lengths of the GLB container.
    #[error("GLB payload of {0} bytes exceeds the 4 GiB container limit")]
    ContainerTooLarge(usize),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing an output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
