// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! glTF 2.0 JSON document model.
//!
//! Only the subset written by this crate is modelled: one scene of mesh
//! nodes, single-primitive triangle meshes, flat-color materials, and the
//! buffer/view/accessor chain feeding them. Field names follow the glTF
//! schema via serde renames; empty top-level arrays are omitted because the
//! schema requires them to be non-empty when present.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::Index;

/// Attribute name the position accessor is bound to.
pub const POSITION: &str = "POSITION";

/// Root glTF object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    pub asset: AssetInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Index<Scene>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meshes: Vec<Mesh>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<Accessor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffer_views: Vec<BufferView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffers: Vec<Buffer>,
}

/// `asset` metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

impl Default for AssetInfo {
    fn default() -> Self {
        Self {
            version: "2.0".to_string(),
            generator: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Index<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub mesh: Index<Mesh>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub attributes: BTreeMap<String, Index<Accessor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indices: Option<Index<Accessor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Index<Material>>,
    pub mode: PrimitiveMode,
}

/// Primitive topology, serialized as the glTF integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum PrimitiveMode {
    Triangles,
}

impl From<PrimitiveMode> for u32 {
    fn from(mode: PrimitiveMode) -> u32 {
        match mode {
            PrimitiveMode::Triangles => 4,
        }
    }
}

impl TryFrom<u32> for PrimitiveMode {
    type Error = String;

    fn try_from(code: u32) -> std::result::Result<Self, Self::Error> {
        match code {
            4 => Ok(PrimitiveMode::Triangles),
            other => Err(format!("unsupported primitive mode {}", other)),
        }
    }
}

/// Flat-color metallic/roughness material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pbr_metallic_roughness: PbrMetallicRoughness,
    #[serde(default)]
    pub double_sided: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    pub base_color_factor: [f32; 4],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    pub buffer_view: Index<BufferView>,
    pub byte_offset: u64,
    pub component_type: ComponentType,
    pub count: u64,
    #[serde(rename = "type")]
    pub type_: AccessorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f32>>,
}

/// Accessor component type, serialized as the GL enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum ComponentType {
    UnsignedShort,
    Float,
}

impl From<ComponentType> for u32 {
    fn from(ty: ComponentType) -> u32 {
        match ty {
            ComponentType::UnsignedShort => 5123,
            ComponentType::Float => 5126,
        }
    }
}

impl TryFrom<u32> for ComponentType {
    type Error = String;

    fn try_from(code: u32) -> std::result::Result<Self, Self::Error> {
        match code {
            5123 => Ok(ComponentType::UnsignedShort),
            5126 => Ok(ComponentType::Float),
            other => Err(format!("unsupported component type {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessorType {
    #[serde(rename = "SCALAR")]
    Scalar,
    #[serde(rename = "VEC3")]
    Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: Index<Buffer>,
    pub byte_offset: u64,
    pub byte_length: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<BufferTarget>,
}

/// Intended GPU binding of a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum BufferTarget {
    /// Vertex attribute data.
    ArrayBuffer,
    /// Index data.
    ElementArrayBuffer,
}

impl From<BufferTarget> for u32 {
    fn from(target: BufferTarget) -> u32 {
        match target {
            BufferTarget::ArrayBuffer => 34962,
            BufferTarget::ElementArrayBuffer => 34963,
        }
    }
}

impl TryFrom<u32> for BufferTarget {
    type Error = String;

    fn try_from(code: u32) -> std::result::Result<Self, Self::Error> {
        match code {
            34962 => Ok(BufferTarget::ArrayBuffer),
            34963 => Ok(BufferTarget::ElementArrayBuffer),
            other => Err(format!("unsupported buffer target {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    pub byte_length: u64,
    /// Sibling file name; `None` for the GLB-embedded buffer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}
