// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binding baked maps onto a host texture set.
//!
//! The painting host owns resource import and texture-set slots; this module
//! owns the seam and the pure naming logic. Unlike the tolerant bake loop,
//! the import loop is fail-fast: the first host error aborts and propagates.

use std::path::Path;

use thiserror::Error;

use crate::config::BakeConfig;
use crate::job::MeshMapResult;

/// Texture-set slots a baked map can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshMapUsage {
    AmbientOcclusion,
    Curvature,
    Normal,
    WorldSpaceNormal,
    Position,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid mesh_file_path: {path}")]
    InvalidMeshPath { path: std::path::PathBuf },

    /// Mesh stem does not carry the static-mesh prefix.
    #[error("invalid static mesh name: {stem}")]
    InvalidStaticMeshName { stem: String },

    /// Failure reported by the host resource store.
    #[error("host import failed: {message}")]
    Host { message: String },
}

/// Host-side resource store. Implemented by the painting application's
/// plugin layer; mocked in tests.
pub trait ResourceImporter {
    /// Import a texture file into the project, returning its resource id.
    fn import_texture(&mut self, path: &Path) -> Result<String, ImportError>;

    /// Bind an imported resource into a texture-set slot.
    fn bind_mesh_map(
        &mut self,
        material: &str,
        usage: MeshMapUsage,
        resource: &str,
    ) -> Result<(), ImportError>;
}

/// Material name for a static mesh: the static-mesh prefix swapped for the
/// material prefix (`SM_Wall` → `M_Wall`).
pub fn material_name(mesh_file_path: &Path, config: &BakeConfig) -> Result<String, ImportError> {
    let stem = mesh_file_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if stem.starts_with(&config.static_mesh_prefix) {
        Ok(stem.replacen(&config.static_mesh_prefix, &config.material_prefix, 1))
    } else {
        Err(ImportError::InvalidStaticMeshName { stem })
    }
}

/// Import every baked map and bind it under its usage slot.
pub fn import_mesh_maps(
    mesh_file_path: &Path,
    maps: &MeshMapResult,
    importer: &mut dyn ResourceImporter,
    config: &BakeConfig,
) -> Result<(), ImportError> {
    if !mesh_file_path.exists() {
        return fail_import(ImportError::InvalidMeshPath {
            path: mesh_file_path.to_path_buf(),
        });
    }
    let material = match material_name(mesh_file_path, config) {
        Ok(material) => material,
        Err(err) => return fail_import(err),
    };
    tracing::info!(target: "shapeshift", "Import Baked Maps...");
    for (kind, path) in maps {
        tracing::info!(target: "shapeshift", map = %kind, "Importing Map");
        let resource = match importer.import_texture(path) {
            Ok(resource) => resource,
            Err(err) => return fail_import(err),
        };
        if let Err(err) = importer.bind_mesh_map(&material, kind.usage(), &resource) {
            return fail_import(err);
        }
    }
    tracing::info!(target: "shapeshift", "Import Baked Maps Done.");
    Ok(())
}

/// Log at error severity and fail in one step.
fn fail_import<T>(err: ImportError) -> Result<T, ImportError> {
    tracing::error!(target: "shapeshift", error = %err, "Import Error");
    Err(err)
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
