//! Floorplan-GLB export pipeline
//!
//! Reads the wall, window, door, floor and room geometry that floor plan
//! extraction leaves in a data directory and writes it as one glTF 2.0 scene.
//!
//! ```no_run
//! use std::path::Path;
//! use floorplan_glb_pipeline::{create_glb, ExportConfig};
//!
//! let summary = create_glb(Path::new("Data/0"), Path::new("out/plan.glb"), &ExportConfig::from_env())?;
//! println!("{} nodes", summary.stats.nodes);
//! # Ok::<(), floorplan_glb_pipeline::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod groups;
pub mod input;
pub mod pipeline;

pub use config::ExportConfig;
pub use error::{Error, Result};
pub use groups::{GroupKind, GroupLayout};
pub use input::{GroupData, MeshSource};
pub use pipeline::{assemble, create_glb, ExportStats, ExportSummary};

pub use floorplan_glb_gltf::OutputFormat;
