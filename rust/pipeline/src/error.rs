// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the export pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an export.
///
/// Problems confined to one geometry group or one mesh are logged and
/// counted in the export summary instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not name an existing data directory.
    #[error("data directory not found: {}", .0.display())]
    DataDirNotFound(PathBuf),

    /// `transform.txt` exists but is not valid JSON.
    #[error("invalid transform file {}: {source}", path.display())]
    Transform {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A resource could not be parsed into the expected shape.
    #[error("invalid resource {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Assembling or writing the asset failed.
    #[error(transparent)]
    Asset(#[from] floorplan_glb_gltf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
