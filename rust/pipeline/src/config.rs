// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export configuration loaded from environment variables.

use std::path::Path;

use floorplan_glb_gltf::OutputFormat;

/// Default value of `asset.generator`.
pub const DEFAULT_GENERATOR: &str = concat!("floorplan-glb ", env!("CARGO_PKG_VERSION"));

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Container form; `None` infers it from the output file extension.
    pub format: Option<OutputFormat>,
    /// Attach one flat-color material per geometry family.
    pub materials: bool,
    /// Written to `asset.generator`.
    pub generator: Option<String>,
}

impl ExportConfig {
    /// Load configuration from environment variables.
    ///
    /// - `FLOORPLAN_GLB_FORMAT`: `glb` or `gltf`
    /// - `FLOORPLAN_GLB_MATERIALS`: `true`/`false` (default `true`)
    /// - `FLOORPLAN_GLB_GENERATOR`: generator string
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to
    /// the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let format = lookup("FLOORPLAN_GLB_FORMAT").and_then(|value| {
            value
                .parse::<OutputFormat>()
                .map_err(|err: String| tracing::warn!(error = %err, "Ignoring FLOORPLAN_GLB_FORMAT"))
                .ok()
        });

        let materials = lookup("FLOORPLAN_GLB_MATERIALS")
            .and_then(|value| parse_bool(&value))
            .unwrap_or(defaults.materials);

        let generator = lookup("FLOORPLAN_GLB_GENERATOR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or(defaults.generator);

        Self {
            format,
            materials,
            generator,
        }
    }

    /// Container form for `output`: the configured one, else by extension.
    pub fn format_for(&self, output: &Path) -> OutputFormat {
        self.format.unwrap_or_else(|| OutputFormat::from_path(output))
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: None,
            materials: true,
            generator: Some(DEFAULT_GENERATOR.to_string()),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
