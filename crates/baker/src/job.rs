// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bake-job orchestration over the external baking tool.
//!
//! A [`BakeJob`] is constructed once per bake request. Construction is
//! fail-fast: mesh path, resolution, tool discovery, and scratch-directory
//! creation all error out immediately. The bake loop itself is tolerant:
//! a map kind that fails to bake is logged and skipped, and the remaining
//! kinds still run. A partial [`MeshMapResult`] is a normal outcome.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use shapeshift_shell::{RunnerError, ShellRunner};

use crate::config::BakeConfig;
use crate::discover;
use crate::error::{fail, BakeError};
use crate::kind::MeshMapKind;

/// Map kind → output file path, for kinds that baked without diagnostics.
///
/// The paths are where the tool was told to write; their existence on disk
/// is not verified here.
pub type MeshMapResult = BTreeMap<MeshMapKind, PathBuf>;

/// Progress payloads pushed onto a host notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BakeStatus {
    /// One map kind is about to bake.
    Pending { log: String },
    /// The whole job finished; `maps` is the aggregated result.
    Completed { maps: MeshMapResult },
}

/// A diagnostic parsed out of the baking tool's stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDiagnostic {
    pub channel: String,
    pub message: String,
}

#[allow(clippy::expect_used)]
fn diagnostic_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[ERROR\]\[(.*)\](.*)").expect("diagnostic pattern"))
}

/// Scan tool stderr for `[ERROR][<channel>]<message>` lines.
pub(crate) fn parse_diagnostics(stderr: &str) -> Vec<ToolDiagnostic> {
    stderr
        .lines()
        .filter_map(|line| {
            diagnostic_pattern().captures(line).map(|caps| ToolDiagnostic {
                channel: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
                message: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
            })
        })
        .collect()
}

/// One bake request over a single mesh file.
#[derive(Debug)]
pub struct BakeJob {
    mesh_file_path: PathBuf,
    texture_res: u32,
    tool_path: PathBuf,
    scratch_dir: PathBuf,
    runner: ShellRunner,
    config: BakeConfig,
}

impl BakeJob {
    /// Validate inputs, locate the baking tool, and create the scratch
    /// directory. Any failure here is fatal to the job.
    pub async fn new(
        mesh_file_path: impl Into<PathBuf>,
        texture_res: u32,
        config: BakeConfig,
        runner: ShellRunner,
    ) -> Result<Self, BakeError> {
        let mesh_file_path = mesh_file_path.into();
        if !mesh_file_path.exists() {
            return fail(BakeError::InvalidMeshPath {
                path: mesh_file_path,
            });
        }
        if !valid_resolution(texture_res, &config) {
            return fail(BakeError::InvalidResolution { res: texture_res });
        }
        let tool_path = match &config.tool_path_override {
            Some(path) if path.exists() => path.clone(),
            Some(path) => {
                return fail(BakeError::ToolNotFound {
                    searched: path.clone(),
                })
            }
            None => discover::discover_baker(&runner).await?,
        };
        let scratch_dir = create_scratch_dir()?;
        Ok(Self {
            mesh_file_path,
            texture_res,
            tool_path,
            scratch_dir,
            runner,
            config,
        })
    }

    pub fn mesh_file_path(&self) -> &Path {
        &self.mesh_file_path
    }

    pub fn texture_res(&self) -> u32 {
        self.texture_res
    }

    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Bake all map kinds, returning whatever subset succeeded.
    ///
    /// Fails only on a caller-initiated interrupt; every other per-map
    /// failure is logged and the loop moves on.
    pub async fn run(&self) -> Result<MeshMapResult, BakeError> {
        self.run_inner(None).await
    }

    /// As [`BakeJob::run`], pushing a [`BakeStatus`] before each map kind
    /// and a final `Completed` carrying the aggregated result. A closed
    /// receiver does not alter bake behavior.
    pub async fn run_with_progress(
        &self,
        progress: mpsc::UnboundedSender<BakeStatus>,
    ) -> Result<MeshMapResult, BakeError> {
        self.run_inner(Some(progress)).await
    }

    async fn run_inner(
        &self,
        progress: Option<mpsc::UnboundedSender<BakeStatus>>,
    ) -> Result<MeshMapResult, BakeError> {
        let mut baked = MeshMapResult::new();
        tracing::info!(target: "shapeshift", "Bake Mesh Maps...");
        for kind in MeshMapKind::ALL {
            tracing::info!(target: "shapeshift", map = %kind, "Baking Map");
            if let Some(tx) = &progress {
                let _ = tx.send(BakeStatus::Pending {
                    log: format!("Baking Map: {kind}"),
                });
            }
            let cmd = self.bake_command(kind);
            tracing::debug!(target: "shapeshift", %cmd);
            let output = match self.runner.run_capturing(&cmd).await {
                Ok(output) => output,
                Err(err @ RunnerError::Interrupted { .. }) => return Err(BakeError::Runner(err)),
                Err(err) => {
                    tracing::error!(target: "shapeshift", map = %kind, error = %err, "Bake Error");
                    continue;
                }
            };
            if output.stderr.is_empty() {
                baked.insert(kind, self.expected_output(kind));
            } else {
                for diag in parse_diagnostics(&output.stderr) {
                    tracing::error!(target: "shapeshift", channel = %diag.channel, "{}", diag.message);
                }
            }
        }
        tracing::info!(target: "shapeshift", "Bake Mesh Maps Done.");
        if let Some(tx) = &progress {
            let _ = tx.send(BakeStatus::Completed {
                maps: baked.clone(),
            });
        }
        Ok(baked)
    }

    /// Command line for one map kind.
    ///
    /// `--output-size` carries log2 of the texture resolution; that is what
    /// the tool invocation this pipeline was built against expects.
    fn bake_command(&self, kind: MeshMapKind) -> String {
        let size = self.texture_res.ilog2();
        let mut cmd = vec![
            format!("\"{}\" {}", self.tool_path.display(), kind.subcommand()),
            format!("--inputs \"{}\"", self.mesh_file_path.display()),
            format!("--output-path \"{}\"", self.scratch_dir.display()),
            format!("--output-name {{inputName}}.{kind}"),
            format!("--output-format {}", self.config.output_format),
            format!("--output-size {size},{size}"),
        ];
        if kind.refines_detail() {
            cmd.push(format!("--antialiasing {}", self.config.antialiasing));
            cmd.push("--use-lowdef-as-highdef true".to_string());
        }
        cmd.join(" ")
    }

    /// Where the tool was told to write this kind's raster.
    fn expected_output(&self, kind: MeshMapKind) -> PathBuf {
        let stem = self
            .mesh_file_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.scratch_dir
            .join(format!("{stem}.{kind}.{}", self.config.output_format))
    }
}

fn valid_resolution(res: u32, config: &BakeConfig) -> bool {
    res.is_power_of_two() && res >= config.min_texture_res && res <= config.max_texture_res
}

/// Fresh, timestamp-qualified directory under the OS temp root. One per job,
/// never reused, never removed automatically.
fn create_scratch_dir() -> Result<PathBuf, BakeError> {
    let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f");
    let path = std::env::temp_dir().join(format!("shapeshift-{stamp}"));
    match std::fs::create_dir_all(&path) {
        Ok(()) => {
            tracing::debug!(target: "shapeshift", scratch = %path.display(), "scratch directory created");
            Ok(path)
        }
        Err(source) => fail(BakeError::Scratch { path, source }),
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
