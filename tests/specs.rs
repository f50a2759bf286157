// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level scenarios: the runner and baker working together against
//! a faked baking tool, end to end.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::sync::mpsc;

use shapeshift_baker::{
    import_mesh_maps, spawn_bake_with_progress, BakeConfig, BakeJob, BakeStatus, ImportError,
    MeshMapKind, MeshMapUsage, ResourceImporter,
};
use shapeshift_shell::{RunnerConfig, ShellRunner, TolerancePolicy};

fn write_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("sbsbaker");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

async fn wall_job(dir: &TempDir, tool_body: &str) -> BakeJob {
    let mesh = dir.path().join("SM_Wall.fbx");
    fs::write(&mesh, "fbx").unwrap();
    let config = BakeConfig {
        tool_path_override: Some(write_tool(dir.path(), tool_body)),
        ..BakeConfig::default()
    };
    BakeJob::new(mesh, 2048, config, ShellRunner::default())
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Runner scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pipeline_with_tolerated_grep_miss() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "bar\nbaz\n").unwrap();
    let runner = ShellRunner::new(RunnerConfig {
        cwd: Some(dir.path().to_path_buf()),
        tolerance: TolerancePolicy::empty().tolerate("grep", 1),
        ..RunnerConfig::default()
    });

    // grep finds nothing and exits 1; the policy turns that into a normal
    // result instead of an error.
    let result = runner.run_capturing("cat a.txt | grep foo").await.unwrap();

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.stdout, "");
}

// ---------------------------------------------------------------------------
// Bake scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_bake_records_every_map_kind() {
    let dir = TempDir::new().unwrap();
    let job = wall_job(&dir, "exit 0").await;

    let maps = job.run().await.unwrap();

    assert_eq!(maps.len(), 5);
    for kind in MeshMapKind::ALL {
        let path = &maps[&kind];
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            format!("SM_Wall.{kind}.tga")
        );
        assert!(path.starts_with(job.scratch_dir()));
    }
}

#[tokio::test]
async fn one_bad_map_leaves_the_other_four() {
    let dir = TempDir::new().unwrap();
    let job = wall_job(
        &dir,
        concat!(
            "if [ \"$1\" = \"ambient-occlusion-from-mesh\" ]; then\n",
            "  echo \"[ERROR][BakerTool] no uv set\" 1>&2\n",
            "fi\n",
            "exit 0",
        ),
    )
    .await;

    let maps = job.run().await.unwrap();

    assert_eq!(maps.len(), 4);
    assert!(!maps.contains_key(&MeshMapKind::AmbientOcclusion));
}

#[tokio::test]
async fn worker_hands_off_result_and_progress() {
    let dir = TempDir::new().unwrap();
    let job = wall_job(&dir, "exit 0").await;
    let (tx, mut rx) = mpsc::unbounded_channel();

    let receiver = spawn_bake_with_progress(job, tx);
    let mut statuses = Vec::new();
    while let Some(status) = rx.recv().await {
        statuses.push(status);
    }
    let maps = receiver.await.unwrap();

    assert_eq!(statuses.len(), 6);
    let pending: Vec<String> = statuses
        .iter()
        .filter_map(|status| match status {
            BakeStatus::Pending { log } => Some(log.clone()),
            BakeStatus::Completed { .. } => None,
        })
        .collect();
    assert_eq!(pending[0], "Baking Map: normal");
    assert_eq!(pending[4], "Baking Map: position");
    let payload = serde_json::to_value(statuses.last().unwrap()).unwrap();
    assert_eq!(payload["status"], "COMPLETED");
    assert_eq!(maps.len(), 5);
}

// ---------------------------------------------------------------------------
// Bake → import
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingImporter {
    bound: Vec<(String, MeshMapUsage)>,
}

impl ResourceImporter for RecordingImporter {
    fn import_texture(&mut self, path: &Path) -> Result<String, ImportError> {
        Ok(path.display().to_string())
    }

    fn bind_mesh_map(
        &mut self,
        material: &str,
        usage: MeshMapUsage,
        _resource: &str,
    ) -> Result<(), ImportError> {
        self.bound.push((material.to_string(), usage));
        Ok(())
    }
}

#[tokio::test]
async fn baked_maps_bind_to_the_material() {
    let dir = TempDir::new().unwrap();
    let job = wall_job(&dir, "exit 0").await;
    let maps = job.run().await.unwrap();

    let mut importer = RecordingImporter::default();
    import_mesh_maps(
        job.mesh_file_path(),
        &maps,
        &mut importer,
        &BakeConfig::default(),
    )
    .unwrap();

    assert_eq!(importer.bound.len(), 5);
    assert!(importer
        .bound
        .iter()
        .all(|(material, _)| material == "M_Wall"));
    assert!(importer
        .bound
        .iter()
        .any(|(_, usage)| *usage == MeshMapUsage::WorldSpaceNormal));
}
