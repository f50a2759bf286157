// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable pipeline configuration.

use std::path::PathBuf;

/// Read-only configuration for the baking pipeline, constructed once and
/// passed explicitly to the components that need it.
#[derive(Debug, Clone)]
pub struct BakeConfig {
    /// Naming prefix of static meshes coming out of the modeling tool.
    pub static_mesh_prefix: String,
    /// Prefix substituted for the static-mesh prefix when deriving material
    /// names.
    pub material_prefix: String,
    /// Naming prefix of the editor collections the pipeline operates on.
    pub custom_collections_prefix: String,
    pub default_texture_res: u32,
    pub min_texture_res: u32,
    pub max_texture_res: u32,
    /// Raster format the baking tool writes.
    pub output_format: String,
    pub antialiasing: u32,
    /// Pinned baking-tool executable; skips filesystem discovery when set.
    pub tool_path_override: Option<PathBuf>,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            static_mesh_prefix: "SM_".to_string(),
            material_prefix: "M_".to_string(),
            custom_collections_prefix: "MY_".to_string(),
            default_texture_res: 2048,
            min_texture_res: 32,
            max_texture_res: 8192,
            output_format: "tga".to_string(),
            antialiasing: 2,
            tool_path_override: None,
        }
    }
}
