// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bake error taxonomy.
//!
//! Everything here is fatal to job setup. Per-map failures during the bake
//! loop are logged and skipped instead; see [`crate::job::BakeJob::run`].

use std::path::PathBuf;

use shapeshift_shell::RunnerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BakeError {
    #[error("invalid mesh_file_path: {path}")]
    InvalidMeshPath { path: PathBuf },

    /// Resolution outside [min, max] or not a power of two.
    #[error("invalid texture_res: {res}")]
    InvalidResolution { res: u32 },

    /// Tool discovery is implemented for macOS only.
    #[error("baking tool discovery is not supported on this platform")]
    UnsupportedPlatform,

    /// The designer application metadata query came back empty or stale.
    #[error("designer installation not found (query returned `{output}`)")]
    DesignerNotFound { output: String },

    /// No baker executable anywhere under the installation root.
    #[error("baking tool not found under `{searched}`")]
    ToolNotFound { searched: PathBuf },

    #[error("failed to create scratch directory `{path}`: {source}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// Log at error severity and fail in one step.
pub(crate) fn fail<T>(err: BakeError) -> Result<T, BakeError> {
    tracing::error!(target: "shapeshift", error = %err, "Bake Error");
    Err(err)
}
