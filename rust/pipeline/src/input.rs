// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reading extracted geometry from a data directory.
//!
//! Each group is stored as two JSON files, `<stem>_verts.txt` and
//! `<stem>_faces.txt`. Their nesting depth depends on the group layout and
//! is not always consistent between extraction runs, so the raw JSON is
//! matched against every accepted shape and resolved once into
//! [`GroupData`]. Nothing past this module sees the loose shapes.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use floorplan_glb_geometry::Point3;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::groups::{GroupKind, GroupLayout};
use crate::{Error, Result};

/// Optional redirect file inside the data directory.
pub const TRANSFORM_FILE: &str = "transform.txt";

type RawPoint = [f64; 3];
type RawPolygon = Vec<u32>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSegmentedVertices {
    Instances(Vec<Vec<Vec<RawPoint>>>),
    Segments(Vec<Vec<RawPoint>>),
    Points(Vec<RawPoint>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPolygons {
    List(Vec<RawPolygon>),
    Single(RawPolygon),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawInstanceFaces {
    Lists(Vec<Vec<RawPolygon>>),
    Singles(Vec<RawPolygon>),
}

#[derive(Debug, Default, Deserialize)]
struct Transform {
    #[serde(default)]
    origin_path: Option<String>,
}

impl From<RawPolygons> for Vec<RawPolygon> {
    fn from(raw: RawPolygons) -> Self {
        match raw {
            RawPolygons::List(polygons) => polygons,
            RawPolygons::Single(polygon) => vec![polygon],
        }
    }
}

fn points(raw: Vec<RawPoint>) -> Vec<Point3<f64>> {
    raw.into_iter().map(|[x, y, z]| Point3::new(x, y, z)).collect()
}

/// One mesh ready for triangulation.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSource {
    pub name: String,
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Vec<u32>>,
    pub invert: bool,
}

/// Group contents resolved from the raw JSON shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupData {
    /// Segment point lists per instance; every segment uses the same faces.
    Segmented {
        instances: Vec<Vec<Vec<Point3<f64>>>>,
        faces: Vec<Vec<u32>>,
    },
    /// Point list and faces per instance.
    Instanced {
        instances: Vec<(Vec<Point3<f64>>, Vec<Vec<u32>>)>,
    },
    /// One point list and its faces.
    Single {
        vertices: Vec<Point3<f64>>,
        faces: Vec<Vec<u32>>,
    },
}

impl GroupData {
    /// Resolve the two resource texts of `kind`.
    ///
    /// `verts_path`/`faces_path` only label parse errors.
    pub fn parse(
        kind: GroupKind,
        verts: &str,
        faces: &str,
        verts_path: &Path,
        faces_path: &Path,
    ) -> Result<Self> {
        match kind.layout() {
            GroupLayout::Segmented => {
                let raw: RawSegmentedVertices = parse_json(verts, verts_path)?;
                let faces: RawPolygons = parse_json(faces, faces_path)?;

                let instances = match raw {
                    RawSegmentedVertices::Instances(instances) => instances,
                    RawSegmentedVertices::Segments(segments) => vec![segments],
                    RawSegmentedVertices::Points(points) => vec![vec![points]],
                };

                Ok(GroupData::Segmented {
                    instances: instances
                        .into_iter()
                        .map(|segments| segments.into_iter().map(points).collect())
                        .collect(),
                    faces: faces.into(),
                })
            }
            GroupLayout::Instanced => {
                let raw: Vec<Vec<RawPoint>> = parse_json(verts, verts_path)?;
                let faces: Vec<Vec<RawPolygon>> = match parse_json(faces, faces_path)? {
                    RawInstanceFaces::Lists(lists) => lists,
                    RawInstanceFaces::Singles(singles) => {
                        singles.into_iter().map(|polygon| vec![polygon]).collect()
                    }
                };

                if raw.len() != faces.len() {
                    tracing::warn!(
                        group = %kind,
                        vertex_instances = raw.len(),
                        face_instances = faces.len(),
                        "Instance count mismatch, extra instances ignored"
                    );
                }

                Ok(GroupData::Instanced {
                    instances: raw.into_iter().map(points).zip(faces).collect(),
                })
            }
            GroupLayout::Single => {
                let raw: Vec<RawPoint> = parse_json(verts, verts_path)?;
                let faces: RawPolygons = parse_json(faces, faces_path)?;

                Ok(GroupData::Single {
                    vertices: points(raw),
                    faces: faces.into(),
                })
            }
        }
    }

    /// Whether the group has nothing to export.
    pub fn is_empty(&self) -> bool {
        match self {
            GroupData::Segmented { instances, faces } => instances.is_empty() || faces.is_empty(),
            GroupData::Instanced { instances } => instances.is_empty(),
            GroupData::Single { vertices, faces } => vertices.is_empty() || faces.is_empty(),
        }
    }

    /// Split into named meshes, in node order.
    pub fn into_sources(self, kind: GroupKind) -> Vec<MeshSource> {
        let prefix = kind.name_prefix();
        let invert = kind.inverts_winding();

        match self {
            GroupData::Segmented { instances, faces } => instances
                .into_iter()
                .enumerate()
                .flat_map(|(i, segments)| {
                    let faces = &faces;
                    segments
                        .into_iter()
                        .enumerate()
                        .map(move |(j, vertices)| MeshSource {
                            name: format!("{}_{}_{}", prefix, i, j),
                            vertices,
                            faces: faces.clone(),
                            invert,
                        })
                })
                .collect(),
            GroupData::Instanced { instances } => instances
                .into_iter()
                .enumerate()
                .map(|(i, (vertices, faces))| MeshSource {
                    name: format!("{}_{}", prefix, i),
                    vertices,
                    faces,
                    invert,
                })
                .collect(),
            GroupData::Single { vertices, faces } => vec![MeshSource {
                name: format!("{}_0", prefix),
                vertices,
                faces,
                invert,
            }],
        }
    }
}

fn parse_json<T: DeserializeOwned>(text: &str, path: &Path) -> Result<T> {
    serde_json::from_str(text).map_err(|source| Error::Resource {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a text file, `None` when it does not exist.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Data directory named by an export input.
///
/// A path ending in `.txt` names a file inside the data directory; anything
/// else is the directory itself.
pub fn resolve_data_dir(input: &Path) -> Result<PathBuf> {
    let is_file_hint = input
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"));

    let dir = if is_file_hint {
        match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        input.to_path_buf()
    };

    if !dir.is_dir() {
        return Err(Error::DataDirNotFound(dir));
    }
    Ok(dir)
}

/// Directory the group resources are read from.
///
/// `transform.txt` in the data directory may redirect reads through its
/// `origin_path`; relative redirects resolve against the working directory.
pub fn resource_dir(data_dir: &Path) -> Result<PathBuf> {
    let path = data_dir.join(TRANSFORM_FILE);
    let Some(text) = read_optional(&path)? else {
        return Ok(data_dir.to_path_buf());
    };

    let transform: Transform =
        serde_json::from_str(&text).map_err(|source| Error::Transform { path, source })?;

    match transform.origin_path {
        Some(origin) if !origin.trim().is_empty() => {
            let origin = PathBuf::from(origin.trim());
            tracing::info!(origin = %origin.display(), "Reading resources from transform origin");
            Ok(origin)
        }
        _ => Ok(data_dir.to_path_buf()),
    }
}

/// Load one group from `dir`.
///
/// Returns `None` when the group is absent, empty, or unreadable; each case
/// is logged and the export carries on without it.
pub fn read_group(dir: &Path, kind: GroupKind) -> Option<GroupData> {
    let verts_path = dir.join(kind.verts_file());
    let faces_path = dir.join(kind.faces_file());

    let texts = read_optional(&verts_path).and_then(|verts| {
        read_optional(&faces_path).map(|faces| verts.zip(faces))
    });

    let (verts, faces) = match texts {
        Ok(Some(texts)) => texts,
        Ok(None) => {
            tracing::info!(group = %kind, dir = %dir.display(), "Group resources not found, skipping");
            return None;
        }
        Err(err) => {
            tracing::warn!(group = %kind, error = %err, "Cannot read group resources, skipping");
            return None;
        }
    };

    match GroupData::parse(kind, &verts, &faces, &verts_path, &faces_path) {
        Ok(data) if data.is_empty() => {
            tracing::info!(group = %kind, "Group is empty, skipping");
            None
        }
        Ok(data) => Some(data),
        Err(err) => {
            tracing::warn!(group = %kind, error = %err, "Cannot parse group resources, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(kind: GroupKind, verts: &str, faces: &str) -> Result<GroupData> {
        GroupData::parse(kind, verts, faces, Path::new("v.txt"), Path::new("f.txt"))
    }

    #[test]
    fn segmented_nested_shape() {
        let verts = r#"[
            [[[0,0,0],[1,0,0],[1,0,1],[0,0,1]], [[1,0,0],[2,0,0],[2,0,1],[1,0,1]]],
            [[[0,1,0],[1,1,0],[1,1,1],[0,1,1]]]
        ]"#;
        let data = parse(GroupKind::WallVertical, verts, "[[0,1,2,3]]").unwrap();
        let sources = data.into_sources(GroupKind::WallVertical);

        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Wall_0_0", "Wall_0_1", "Wall_1_0"]);
        assert!(sources.iter().all(|s| s.faces == vec![vec![0, 1, 2, 3]]));
        assert_eq!(sources[1].vertices[1], Point3::new(2.0, 0.0, 0.0));
        assert!(!sources[0].invert);
    }

    #[test]
    fn segmented_shallow_shapes() {
        let one_instance = parse(
            GroupKind::WindowVertical,
            "[[[0,0,0],[1,0,0],[1,0,1]], [[2,0,0],[3,0,0],[3,0,1]]]",
            "[0,1,2]",
        )
        .unwrap();
        let sources = one_instance.into_sources(GroupKind::WindowVertical);
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Window_0_0", "Window_0_1"]);
        assert!(sources.iter().all(|s| s.invert));

        let one_segment =
            parse(GroupKind::DoorVertical, "[[0,0,0],[1,0,0],[1,0,1]]", "[[0,1,2]]").unwrap();
        let sources = one_segment.into_sources(GroupKind::DoorVertical);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "Door_0_0");
    }

    #[test]
    fn instanced_faces_accept_both_depths() {
        let verts = "[[[0,0,0],[1,0,0],[0,1,0]], [[0,0,1],[1,0,1],[0,1,1]]]";

        let lists = parse(GroupKind::Room, verts, "[[[0,1,2]], [[2,1,0]]]").unwrap();
        let singles = parse(GroupKind::Room, verts, "[[0,1,2], [2,1,0]]").unwrap();
        assert_eq!(lists, singles);

        let sources = lists.into_sources(GroupKind::Room);
        assert_eq!(sources[1].name, "Room_1");
        assert_eq!(sources[1].faces, vec![vec![2, 1, 0]]);
    }

    #[test]
    fn instance_count_mismatch_uses_shorter() {
        let verts = "[[[0,0,0],[1,0,0],[0,1,0]], [[0,0,1],[1,0,1],[0,1,1]]]";
        let data = parse(GroupKind::WallHorizontal, verts, "[[[0,1,2]]]").unwrap();

        let sources = data.into_sources(GroupKind::WallHorizontal);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "WallTop_0");
    }

    #[test]
    fn floor_accepts_flat_polygon() {
        let verts = "[[0,0,0],[4,0,0],[4,3,0],[0,3,0]]";
        let flat = parse(GroupKind::Floor, verts, "[0,1,2,3]").unwrap();
        let listed = parse(GroupKind::Floor, verts, "[[0,1,2,3]]").unwrap();
        assert_eq!(flat, listed);

        let sources = flat.into_sources(GroupKind::Floor);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "Floor_0");
        assert_eq!(sources[0].vertices.len(), 4);
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let err = parse(GroupKind::Floor, r#"{"x": 1}"#, "[0,1,2]").unwrap_err();
        assert!(matches!(err, Error::Resource { ref path, .. } if path == Path::new("v.txt")));

        assert!(parse(GroupKind::Room, "[[[0,0]]]", "[[0,1,2]]").is_err());
    }

    #[test]
    fn empty_lists_are_empty_groups() {
        assert!(parse(GroupKind::Room, "[]", "[]").unwrap().is_empty());
        assert!(parse(GroupKind::Floor, "[[0,0,0]]", "[]").unwrap().is_empty());
        assert!(parse(GroupKind::WallVertical, "[]", "[[0,1,2]]").unwrap().is_empty());
    }
}
