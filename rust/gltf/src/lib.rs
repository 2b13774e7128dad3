//! Floorplan-GLB scene assembly
//!
//! Packs triangulated floor plan meshes into glTF 2.0 buffers, buffer views
//! and accessors, registers them as nodes of a single scene, and writes the
//! result either as `.gltf` + sibling `.bin` files or as one `.glb` file.

pub mod assembler;
pub mod buffer;
pub mod container;
pub mod document;
pub mod error;
pub mod registry;

pub use assembler::{Asset, AssetAssembler, BinaryResource};
pub use buffer::{MeshBuffers, ViewLayout};
pub use container::OutputFormat;
pub use document::Root;
pub use error::{Error, Result};
pub use registry::{Index, Registry};
