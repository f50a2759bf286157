// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background bake execution with a one-shot completion hand-off.
//!
//! Hosts keep their UI thread responsive by running the whole bake on a
//! spawned task. The aggregated result is the only shared state, and it is
//! moved through the one-shot channel exactly once at completion.

use tokio::sync::{mpsc, oneshot};

use crate::job::{BakeJob, BakeStatus, MeshMapResult};

/// Run `job` on a background task.
///
/// An abandoned job (interrupt) drops the sender; the host observes that as
/// a closed channel.
pub fn spawn_bake(job: BakeJob) -> oneshot::Receiver<MeshMapResult> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        match job.run().await {
            Ok(maps) => {
                let _ = tx.send(maps);
            }
            Err(err) => tracing::error!(target: "shapeshift", error = %err, "Bake Error"),
        }
    });
    rx
}

/// As [`spawn_bake`], pushing per-map progress onto `progress`.
pub fn spawn_bake_with_progress(
    job: BakeJob,
    progress: mpsc::UnboundedSender<BakeStatus>,
) -> oneshot::Receiver<MeshMapResult> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        match job.run_with_progress(progress).await {
            Ok(maps) => {
                let _ = tx.send(maps);
            }
            Err(err) => tracing::error!(target: "shapeshift", error = %err, "Bake Error"),
        }
    });
    rx
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
