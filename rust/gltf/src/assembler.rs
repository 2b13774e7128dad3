// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Asset assembler.
//!
//! Owns the append-only registries of a glTF document under construction and
//! the binary resource backing each buffer. Every mesh handed in becomes
//! exactly one buffer, two buffer views, two accessors, one mesh and one
//! node; [`AssetAssembler::finish`] then adds the single scene listing every
//! node in registration order. No geometry is computed here.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::buffer::{MeshBuffers, ViewLayout};
use crate::document::{
    Accessor, AccessorType, AssetInfo, Buffer, BufferView, ComponentType, Material, Mesh, Node,
    PbrMetallicRoughness, Primitive, PrimitiveMode, Root, Scene, POSITION,
};
use crate::registry::{Index, Registry};

/// Bytes backing one buffer, plus the file name it is written under.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryResource {
    pub uri: String,
    pub data: Vec<u8>,
}

/// Finished scene graph with its binary resources.
///
/// `resources[i]` holds the bytes of `root.buffers[i]`.
#[derive(Debug, Clone)]
pub struct Asset {
    pub root: Root,
    pub resources: Vec<BinaryResource>,
}

/// Builder for a single-scene glTF asset.
#[derive(Debug, Default)]
pub struct AssetAssembler {
    buffers: Registry<Buffer>,
    buffer_views: Registry<BufferView>,
    accessors: Registry<Accessor>,
    meshes: Registry<Mesh>,
    nodes: Registry<Node>,
    materials: Registry<Material>,
    material_lookup: FxHashMap<String, Index<Material>>,
    resources: Vec<BinaryResource>,
}

impl AssetAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flat-color material, reusing an existing one with the same name.
    pub fn material(&mut self, name: &str, base_color: [f32; 4]) -> Index<Material> {
        if let Some(&index) = self.material_lookup.get(name) {
            return index;
        }

        let index = self.materials.push(Material {
            name: Some(name.to_string()),
            pbr_metallic_roughness: PbrMetallicRoughness {
                base_color_factor: base_color,
                metallic_factor: 0.0,
                roughness_factor: 1.0,
            },
            double_sided: true,
        });
        self.material_lookup.insert(name.to_string(), index);
        index
    }

    /// Register a packed mesh and the node that shows it.
    pub fn add_mesh(
        &mut self,
        packed: &MeshBuffers,
        material: Option<Index<Material>>,
    ) -> Index<Node> {
        let uri = format!("{}.bin", packed.name);
        let buffer = self.buffers.push(Buffer {
            byte_length: packed.blob.len() as u64,
            uri: Some(uri.clone()),
        });
        self.resources.push(BinaryResource {
            uri,
            data: packed.blob.clone(),
        });

        let position_view = self.push_view(buffer, &packed.position_view);
        let index_view = self.push_view(buffer, &packed.index_view);

        let position_accessor = self.accessors.push(Accessor {
            buffer_view: position_view,
            byte_offset: 0,
            component_type: ComponentType::Float,
            count: packed.vertex_count as u64,
            type_: AccessorType::Vec3,
            min: Some(packed.min.to_vec()),
            max: Some(packed.max.to_vec()),
        });

        let index_accessor = self.accessors.push(Accessor {
            buffer_view: index_view,
            byte_offset: 0,
            component_type: ComponentType::UnsignedShort,
            count: packed.index_count as u64,
            type_: AccessorType::Scalar,
            min: None,
            max: None,
        });

        let mut attributes = BTreeMap::new();
        attributes.insert(POSITION.to_string(), position_accessor);

        let mesh = self.meshes.push(Mesh {
            primitives: vec![Primitive {
                attributes,
                indices: Some(index_accessor),
                material,
                mode: PrimitiveMode::Triangles,
            }],
            name: Some(packed.name.clone()),
        });

        let node = self.nodes.push(Node {
            mesh,
            name: Some(packed.name.clone()),
        });

        tracing::debug!(
            node = %node,
            name = %packed.name,
            vertices = packed.vertex_count,
            triangles = packed.triangle_count(),
            bytes = packed.blob.len(),
            "Registered mesh node"
        );

        node
    }

    fn push_view(&mut self, buffer: Index<Buffer>, layout: &ViewLayout) -> Index<BufferView> {
        self.buffer_views.push(BufferView {
            buffer,
            byte_offset: layout.byte_offset as u64,
            byte_length: layout.byte_length as u64,
            target: Some(layout.target),
        })
    }

    /// Number of nodes registered so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Close the graph: one scene referencing every node, in order.
    pub fn finish(self, generator: Option<String>) -> Asset {
        let scene = Scene {
            nodes: self.nodes.indices().collect(),
        };
        let mut scenes = Registry::new();
        let scene_index = scenes.push(scene);

        let root = Root {
            asset: AssetInfo {
                version: "2.0".to_string(),
                generator,
            },
            scene: Some(scene_index),
            scenes: scenes.into_vec(),
            nodes: self.nodes.into_vec(),
            meshes: self.meshes.into_vec(),
            materials: self.materials.into_vec(),
            accessors: self.accessors.into_vec(),
            buffer_views: self.buffer_views.into_vec(),
            buffers: self.buffers.into_vec(),
        };

        Asset {
            root,
            resources: self.resources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BufferTarget;
    use floorplan_glb_geometry::Point3;

    fn quad(name: &str, z: f64) -> MeshBuffers {
        let vertices = vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(1.0, 1.0, z),
            Point3::new(0.0, 1.0, z),
        ];
        MeshBuffers::build(name, &vertices, &[vec![0, 1, 2, 3]], false).unwrap()
    }

    #[test]
    fn one_mesh_registers_full_chain() {
        let mut assembler = AssetAssembler::new();
        let node = assembler.add_mesh(&quad("Floor_0", 0.0), None);
        assert_eq!(node.value(), 0);

        let asset = assembler.finish(None);
        let root = &asset.root;

        assert_eq!(root.buffers.len(), 1);
        assert_eq!(root.buffer_views.len(), 2);
        assert_eq!(root.accessors.len(), 2);
        assert_eq!(root.meshes.len(), 1);
        assert_eq!(root.nodes.len(), 1);
        assert_eq!(root.scenes.len(), 1);
        assert_eq!(root.scene, Some(Index::new(0)));

        assert_eq!(root.buffers[0].uri.as_deref(), Some("Floor_0.bin"));
        assert_eq!(root.buffers[0].byte_length, 4 * 12 + 6 * 2);
        assert_eq!(asset.resources[0].data.len(), 60);

        let positions = &root.accessors[0];
        assert_eq!(positions.component_type, ComponentType::Float);
        assert_eq!(positions.type_, AccessorType::Vec3);
        assert_eq!(positions.count, 4);
        assert_eq!(positions.min, Some(vec![0.0, 0.0, 0.0]));
        assert_eq!(positions.max, Some(vec![1.0, 1.0, 0.0]));

        let indices = &root.accessors[1];
        assert_eq!(indices.component_type, ComponentType::UnsignedShort);
        assert_eq!(indices.type_, AccessorType::Scalar);
        assert_eq!(indices.count, 6);
        assert!(indices.min.is_none());

        assert_eq!(root.buffer_views[0].target, Some(BufferTarget::ArrayBuffer));
        assert_eq!(root.buffer_views[1].target, Some(BufferTarget::ElementArrayBuffer));
        assert_eq!(root.buffer_views[1].byte_offset, 48);

        let primitive = &root.meshes[0].primitives[0];
        assert_eq!(primitive.attributes[POSITION], Index::new(0));
        assert_eq!(primitive.indices, Some(Index::new(1)));
        assert_eq!(primitive.mode, PrimitiveMode::Triangles);
    }

    #[test]
    fn handles_increase_per_mesh() {
        let mut assembler = AssetAssembler::new();
        assembler.add_mesh(&quad("Wall_0_0", 0.0), None);
        assembler.add_mesh(&quad("Wall_0_1", 1.0), None);
        let third = assembler.add_mesh(&quad("Room_0", 2.0), None);
        assert_eq!(third.value(), 2);

        let asset = assembler.finish(Some("test".to_string()));
        let root = &asset.root;

        // One buffer per mesh, no merging
        assert_eq!(root.buffers.len(), 3);
        assert_eq!(asset.resources.len(), 3);
        assert_eq!(root.buffer_views[4].buffer, Index::new(2));
        assert_eq!(root.accessors[5].buffer_view, Index::new(5));
        assert_eq!(root.meshes[2].primitives[0].indices, Some(Index::new(5)));
        assert_eq!(root.nodes[1].mesh, Index::new(1));

        let scene_nodes: Vec<u32> = root.scenes[0].nodes.iter().map(|n| n.value()).collect();
        assert_eq!(scene_nodes, vec![0, 1, 2]);
        assert_eq!(root.asset.generator.as_deref(), Some("test"));
    }

    #[test]
    fn materials_are_deduplicated_by_name() {
        let mut assembler = AssetAssembler::new();
        let wall = assembler.material("Wall", [0.9, 0.9, 0.9, 1.0]);
        let again = assembler.material("Wall", [0.0, 0.0, 0.0, 1.0]);
        let floor = assembler.material("Floor", [0.5, 0.4, 0.3, 1.0]);

        assert_eq!(wall, again);
        assert_ne!(wall, floor);

        assembler.add_mesh(&quad("Wall_0_0", 0.0), Some(wall));
        let asset = assembler.finish(None);

        assert_eq!(asset.root.materials.len(), 2);
        assert_eq!(
            asset.root.materials[0].pbr_metallic_roughness.base_color_factor,
            [0.9, 0.9, 0.9, 1.0]
        );
        assert_eq!(asset.root.meshes[0].primitives[0].material, Some(wall));
    }

    #[test]
    fn empty_assembler_still_has_one_scene() {
        let asset = AssetAssembler::new().finish(None);
        assert_eq!(asset.root.scenes.len(), 1);
        assert!(asset.root.scenes[0].nodes.is_empty());
        assert!(asset.resources.is_empty());
    }
}
