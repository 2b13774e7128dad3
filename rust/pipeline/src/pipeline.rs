// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export driver: data directory in, one scene asset out.

use std::fs;
use std::path::{Path, PathBuf};

use floorplan_glb_geometry::FaceReport;
use floorplan_glb_gltf::{Asset, AssetAssembler, MeshBuffers, OutputFormat};

use crate::config::ExportConfig;
use crate::groups::GroupKind;
use crate::input::{self, GroupData, MeshSource};
use crate::Result;

/// Counters collected while assembling a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Groups that contributed at least one source mesh.
    pub groups_loaded: usize,
    /// Groups missing, empty or unreadable.
    pub groups_skipped: usize,
    /// Nodes written to the scene.
    pub nodes: usize,
    pub triangles: usize,
    /// Meshes whose faces all triangulated to nothing.
    pub meshes_empty: usize,
    /// Meshes rejected for bad indices or too many vertices.
    pub meshes_rejected: usize,
    /// Per-face triangulation outcomes over every packed mesh.
    pub faces: FaceReport,
}

/// Result of a finished export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Data directory the input named, as given.
    pub data_dir: PathBuf,
    /// Directory the resources were actually read from.
    pub resource_dir: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub stats: ExportStats,
}

/// Assemble every group found in `dir` into one asset.
pub fn assemble(dir: &Path, config: &ExportConfig) -> (Asset, ExportStats) {
    let mut assembler = AssetAssembler::new();
    let mut stats = ExportStats::default();

    for kind in GroupKind::ALL {
        match input::read_group(dir, kind) {
            Some(data) => {
                stats.groups_loaded += 1;
                add_group(&mut assembler, &mut stats, kind, data, config);
            }
            None => stats.groups_skipped += 1,
        }
    }

    stats.nodes = assembler.node_count();
    (assembler.finish(config.generator.clone()), stats)
}

fn add_group(
    assembler: &mut AssetAssembler,
    stats: &mut ExportStats,
    kind: GroupKind,
    data: GroupData,
    config: &ExportConfig,
) {
    let mut material = None;
    let mut added = 0usize;

    for MeshSource {
        name,
        vertices,
        faces,
        invert,
    } in data.into_sources(kind)
    {
        let packed = match MeshBuffers::build(&name, &vertices, &faces, invert) {
            Ok(packed) => packed,
            Err(err) => {
                tracing::error!(mesh = %name, error = %err, "Mesh rejected");
                stats.meshes_rejected += 1;
                continue;
            }
        };

        stats.faces.absorb(&packed.faces);
        if packed.faces.partial > 0 {
            tracing::warn!(
                mesh = %name,
                faces = packed.faces.partial,
                "Mesh kept with partially triangulated faces"
            );
        }

        // glTF accessors need at least one element
        if packed.is_empty() {
            tracing::warn!(mesh = %name, "Mesh produced no triangles, skipping");
            stats.meshes_empty += 1;
            continue;
        }

        if config.materials && material.is_none() {
            let (material_name, color) = kind.material();
            material = Some(assembler.material(material_name, color));
        }

        assembler.add_mesh(&packed, material);
        stats.triangles += packed.triangle_count();
        added += 1;
    }

    tracing::info!(group = %kind, meshes = added, "Group exported");
}

/// Export the geometry in `input` to `output`.
///
/// `input` is a data directory or a `.txt` file inside one. The output
/// form comes from the config, else from the extension of `output`.
/// Missing parent directories of `output` are created.
pub fn create_glb(input: &Path, output: &Path, config: &ExportConfig) -> Result<ExportSummary> {
    let data_dir = input::resolve_data_dir(input)?;
    let resource_dir = input::resource_dir(&data_dir)?;
    let format = config.format_for(output);

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        format = %format,
        "Starting export"
    );

    let (asset, stats) = assemble(&resource_dir, config);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    asset.write(output, format)?;

    tracing::info!(
        nodes = stats.nodes,
        triangles = stats.triangles,
        groups_skipped = stats.groups_skipped,
        meshes_rejected = stats.meshes_rejected,
        partial_faces = stats.faces.partial,
        "Export complete"
    );

    Ok(ExportSummary {
        data_dir,
        resource_dir,
        output: output.to_path_buf(),
        format,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "floorplan-glb-pipeline-{}-{}-{}",
            tag,
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_group(dir: &Path, kind: GroupKind, verts: &str, faces: &str) {
        fs::write(dir.join(kind.verts_file()), verts).unwrap();
        fs::write(dir.join(kind.faces_file()), faces).unwrap();
    }

    #[test]
    fn missing_groups_are_skipped() {
        let dir = scratch_dir("missing");
        write_group(&dir, GroupKind::Floor, "[[0,0,0],[2,0,0],[2,2,0],[0,2,0]]", "[0,1,2,3]");

        let (asset, stats) = assemble(&dir, &ExportConfig::default());

        assert_eq!(stats.groups_loaded, 1);
        assert_eq!(stats.groups_skipped, 7);
        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.triangles, 2);
        assert_eq!(asset.root.nodes[0].name.as_deref(), Some("Floor_0"));
        assert_eq!(asset.root.materials.len(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn bad_meshes_do_not_stop_the_group() {
        let dir = scratch_dir("rejected");
        write_group(
            &dir,
            GroupKind::Room,
            "[[[0,0,0],[1,0,0],[0,1,0]], [[0,0,0],[1,0,0]], [[0,0,0],[1,0,0],[2,0,0]], [[0,0,1],[1,0,1],[0,1,1]]]",
            "[[[0,1,2]], [[0,1,2]], [[0,1,2]], [[0,1,2]]]",
        );

        let (asset, stats) = assemble(&dir, &ExportConfig::default());

        assert_eq!(stats.meshes_rejected, 1);
        assert_eq!(stats.meshes_empty, 1);
        assert_eq!(stats.faces.degenerate, 1);
        assert_eq!(stats.nodes, 2);

        let names: Vec<&str> = asset
            .root
            .nodes
            .iter()
            .filter_map(|n| n.name.as_deref())
            .collect();
        assert_eq!(names, vec!["Room_0", "Room_3"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unparseable_group_is_skipped() {
        let dir = scratch_dir("garbage");
        write_group(&dir, GroupKind::Floor, "not json", "[0,1,2]");
        write_group(&dir, GroupKind::Room, "[[[0,0,0],[1,0,0],[0,1,0]]]", "[[0,1,2]]");

        let (_, stats) = assemble(&dir, &ExportConfig::default());
        assert_eq!(stats.groups_loaded, 1);
        assert_eq!(stats.nodes, 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn materials_can_be_disabled() {
        let dir = scratch_dir("plain");
        write_group(&dir, GroupKind::Floor, "[[0,0,0],[1,0,0],[0,1,0]]", "[0,1,2]");

        let config = ExportConfig {
            materials: false,
            ..ExportConfig::default()
        };
        let (asset, _) = assemble(&dir, &config);

        assert!(asset.root.materials.is_empty());
        assert!(asset.root.meshes[0].primitives[0].material.is_none());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_data_dir_is_an_error() {
        let dir = scratch_dir("gone").join("nope");
        let err = create_glb(&dir, &dir.join("out.glb"), &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, crate::Error::DataDirNotFound(_)));
    }
}
