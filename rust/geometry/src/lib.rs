//! Floorplan-GLB Geometry Processing
//!
//! Planar polygon triangulation for floor plan geometry using ear clipping
//! in 3D, and nalgebra for vector math.

pub mod error;
pub mod mesh;
pub mod triangulation;
pub mod vector;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use mesh::{FaceReport, Mesh};
pub use triangulation::{triangulate_polygon, Triangulation, TriangulationStatus};
pub use vector::{orientation, triangle_area, try_normalize, Winding, EPSILON};
