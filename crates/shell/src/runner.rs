// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process execution for free-text commands.
//!
//! [`ShellRunner::run_capturing`] executes a command (or `|`-pipeline),
//! feeding each stage's stdout into the next stage's stdin and capturing the
//! final stage's output. [`ShellRunner::run_detached`] discards output into
//! the null sink. Both apply the configured [`TolerancePolicy`] and both
//! terminate the in-flight child when the configured cancellation token
//! fires; a child is never left orphaned.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use crate::command::Pipeline;
use crate::error::{fail, RunnerError};
use crate::expand::expand_stage;
use crate::lexer;
use crate::policy::TolerancePolicy;
use crate::token::TokenKind;

/// How long a SIGTERM'd child gets to exit before SIGKILL.
const TERM_GRACE: Duration = Duration::from_secs(2);

/// Runner configuration. Every field has a usable default.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Working directory for spawned processes and relative glob patterns.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables layered over the inherited environment.
    pub env: Vec<(String, String)>,
    pub tolerance: TolerancePolicy,
    /// Pause after a detached command completes, so the host application
    /// observes freshly written files before the call returns. Callers rely
    /// on this; it is contract, not tuning.
    pub settle_delay: Duration,
    /// Caller-initiated interrupt for in-flight commands.
    pub cancel: CancellationToken,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            cwd: None,
            env: Vec::new(),
            tolerance: TolerancePolicy::default(),
            settle_delay: Duration::from_secs(1),
            cancel: CancellationToken::new(),
        }
    }
}

/// Captured output of the final pipeline stage.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CaptureOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Executes free-text commands as OS processes.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    config: RunnerConfig,
}

impl ShellRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Execute `cmd`, piping stage into stage, and capture the final stage's
    /// output.
    ///
    /// Stages run in order; stage 1 gets no stdin, stage *i>1* receives the
    /// captured stdout of stage *i-1*. Each stage's exit status is checked
    /// against the tolerance policy as soon as the stage finishes; the first
    /// intolerable status fails the call and later stages never run. The
    /// final stage's exit status is the canonical one reported in the result.
    pub async fn run_capturing(&self, cmd: &str) -> Result<CaptureOutput, RunnerError> {
        let pipeline = Pipeline::parse(cmd)?;
        let cwd = self.effective_cwd();
        let stage_count = pipeline.stages.len();
        let mut stdin_data: Option<Vec<u8>> = None;
        let mut last: Option<CaptureOutput> = None;

        for (i, stage) in pipeline.stages.iter().enumerate() {
            let argv = expand_stage(&stage.tokens, &cwd)?;
            let Some((program, args)) = argv.split_first() else {
                return fail(RunnerError::EmptyCommand);
            };
            let rendered = argv.join(" ");
            tracing::debug!(target: "shapeshift", cmd = %rendered, "running stage");

            let mut process = Command::new(program);
            process
                .args(args)
                .stdin(if i == 0 { Stdio::null() } else { Stdio::piped() })
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            self.apply_config(&mut process);

            let output = self
                .wait_captured(process, stdin_data.take(), &rendered)
                .await?;
            if !self.config.tolerance.is_acceptable(&rendered, output.exit_code) {
                return fail(RunnerError::Rejected {
                    command: rendered,
                    exit_code: output.exit_code,
                });
            }
            if i + 1 == stage_count {
                last = Some(output);
            } else {
                stdin_data = Some(output.stdout.into_bytes());
            }
        }

        last.ok_or(RunnerError::EmptyCommand)
    }

    /// Execute `cmd` with stdout and stderr discarded into the null sink.
    ///
    /// Commands containing `|`, `*`, or `?` are delegated wholesale to
    /// `sh -c`; everything else is tokenized and spawned directly. No
    /// pipeline chaining of our own happens here. After the process exits
    /// (and passes the tolerance policy) the call sleeps `settle_delay`
    /// before returning.
    pub async fn run_detached(&self, cmd: &str) -> Result<(), RunnerError> {
        let (mut process, rendered) = if cmd.contains('|') || cmd.contains('*') || cmd.contains('?')
        {
            let mut process = Command::new("sh");
            process.arg("-c").arg(cmd);
            (process, cmd.to_string())
        } else {
            let argv: Vec<String> = lexer::tokenize(cmd)?
                .into_iter()
                .filter_map(|token| match token.kind {
                    TokenKind::Word(word) => Some(word),
                    TokenKind::Pipe => None,
                })
                .collect();
            let Some((program, args)) = argv.split_first() else {
                return fail(RunnerError::EmptyCommand);
            };
            let mut process = Command::new(program);
            process.args(args);
            (process, argv.join(" "))
        };
        process
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        self.apply_config(&mut process);

        let mut child = match process.spawn() {
            Ok(child) => child,
            Err(source) => {
                return fail(RunnerError::SpawnFailed {
                    command: rendered,
                    source,
                })
            }
        };
        let status = tokio::select! {
            status = child.wait() => match status {
                Ok(status) => status,
                Err(source) => {
                    return fail(RunnerError::SpawnFailed { command: rendered, source })
                }
            },
            () = self.config.cancel.cancelled() => {
                terminate(&mut child).await;
                return fail(RunnerError::Interrupted { command: rendered });
            }
        };
        let exit_code = status.code().unwrap_or(-1);
        if !self.config.tolerance.is_acceptable(&rendered, exit_code) {
            return fail(RunnerError::Rejected {
                command: rendered,
                exit_code,
            });
        }
        tokio::time::sleep(self.config.settle_delay).await;
        Ok(())
    }

    /// Spawn one stage, feed it `stdin_data`, and capture its output.
    async fn wait_captured(
        &self,
        mut process: Command,
        stdin_data: Option<Vec<u8>>,
        rendered: &str,
    ) -> Result<CaptureOutput, RunnerError> {
        let mut child = match process.spawn() {
            Ok(child) => child,
            Err(source) => {
                return fail(RunnerError::SpawnFailed {
                    command: rendered.to_string(),
                    source,
                })
            }
        };

        // Writer runs concurrently with the output readers so a child that
        // streams while we feed it cannot wedge either pipe.
        if let (Some(data), Some(mut stdin)) = (stdin_data, child.stdin.take()) {
            tokio::spawn(async move {
                let _ = stdin.write_all(&data).await;
                // dropping stdin closes the pipe to signal EOF
            });
        }
        let stdout_task = read_pipe(child.stdout.take());
        let stderr_task = read_pipe(child.stderr.take());

        let status = tokio::select! {
            status = child.wait() => match status {
                Ok(status) => status,
                Err(source) => {
                    return fail(RunnerError::SpawnFailed {
                        command: rendered.to_string(),
                        source,
                    })
                }
            },
            () = self.config.cancel.cancelled() => {
                terminate(&mut child).await;
                return fail(RunnerError::Interrupted { command: rendered.to_string() });
            }
        };

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();
        Ok(CaptureOutput {
            exit_code: status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }

    fn apply_config(&self, process: &mut Command) {
        if let Some(cwd) = &self.config.cwd {
            process.current_dir(cwd);
        }
        for (key, value) in &self.config.env {
            process.env(key, value);
        }
    }

    fn effective_cwd(&self) -> PathBuf {
        self.config
            .cwd
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Drain a pipe to a byte buffer on a background task.
fn read_pipe<R>(pipe: Option<R>) -> tokio::task::JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    })
}

/// SIGTERM, a grace window, then SIGKILL. The child is reaped before return.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;
        let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
        if tokio::time::timeout(TERM_GRACE, child.wait()).await.is_ok() {
            return;
        }
    }
    let _ = child.kill().await;
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
