// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output containers: `.gltf` with sibling `.bin` files, or a single `.glb`.
//!
//! Both forms serialize the same in-memory [`Asset`]. The GLB container can
//! only embed one buffer, so its JSON chunk describes the per-mesh buffers
//! laid out back to back inside the BIN chunk (each starting on a 4-byte
//! boundary) with buffer view offsets shifted accordingly.

use std::fs;
use std::path::Path;

use crate::assembler::Asset;
use crate::document::{Buffer, Root};
use crate::registry::Index;
use crate::{Error, Result};

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const GLB_HEADER_LENGTH: usize = 12;
const CHUNK_HEADER_LENGTH: usize = 8;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

/// Serialization form of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON document plus one sibling binary file per buffer
    Gltf,
    /// Self-contained binary container
    Glb,
}

impl OutputFormat {
    /// Pick the format from the file extension; anything but `.gltf` is GLB.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gltf") => OutputFormat::Gltf,
            _ => OutputFormat::Glb,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Gltf => "gltf",
            OutputFormat::Glb => "glb",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gltf" => Ok(OutputFormat::Gltf),
            "glb" => Ok(OutputFormat::Glb),
            other => Err(format!("unknown output format '{}' (expected glb or gltf)", other)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
fn align4(n: usize) -> usize {
    (n + 3) & !3
}

impl Asset {
    /// Pretty-printed glTF JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Write the JSON document to `path` and every buffer next to it.
    pub fn write_gltf(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        for resource in &self.resources {
            fs::write(dir.join(&resource.uri), &resource.data)?;
        }

        tracing::debug!(
            path = %path.display(),
            resources = self.resources.len(),
            "Wrote glTF document"
        );
        Ok(())
    }

    /// Root describing the GLB layout: one embedded buffer.
    fn glb_root(&self, bases: &[usize], total: usize) -> Root {
        let mut root = self.root.clone();
        if self.resources.is_empty() {
            root.buffers.clear();
            return root;
        }

        for view in &mut root.buffer_views {
            view.byte_offset += bases[view.buffer.as_usize()] as u64;
            view.buffer = Index::new(0);
        }
        root.buffers = vec![Buffer {
            byte_length: total as u64,
            uri: None,
        }];
        root
    }

    /// Encode as a GLB container.
    pub fn to_glb(&self) -> Result<Vec<u8>> {
        let mut bases = Vec::with_capacity(self.resources.len());
        let mut bin = Vec::new();
        for resource in &self.resources {
            bin.resize(align4(bin.len()), 0);
            bases.push(bin.len());
            bin.extend_from_slice(&resource.data);
        }
        let bin_length = bin.len();
        bin.resize(align4(bin_length), 0);

        let root = self.glb_root(&bases, bin_length);
        let mut json = serde_json::to_vec(&root)?;
        json.resize(align4(json.len()), b' ');

        let mut total = GLB_HEADER_LENGTH + CHUNK_HEADER_LENGTH + json.len();
        if !bin.is_empty() {
            total += CHUNK_HEADER_LENGTH + bin.len();
        }
        let total_u32 = u32::try_from(total).map_err(|_| Error::ContainerTooLarge(total))?;

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(GLB_MAGIC);
        out.extend_from_slice(&GLB_VERSION.to_le_bytes());
        out.extend_from_slice(&total_u32.to_le_bytes());

        out.extend_from_slice(&(json.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
        out.extend_from_slice(&json);

        if !bin.is_empty() {
            out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
            out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
            out.extend_from_slice(&bin);
        }

        Ok(out)
    }

    /// Write the GLB container to `path`.
    pub fn write_glb(&self, path: &Path) -> Result<()> {
        let bytes = self.to_glb()?;
        fs::write(path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote GLB container");
        Ok(())
    }

    /// Write in the requested form.
    pub fn write(&self, path: &Path, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Gltf => self.write_gltf(path),
            OutputFormat::Glb => self.write_glb(path),
        }
    }
}
