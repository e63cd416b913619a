//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with guaranteed timeout and kill.

use std::io::Read;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProcessOutput};
use crate::domain::{EnvironmentOverrides, ProcessError};

/// Production `CommandRunner`.
///
/// stdout and stderr share one pipe so the captured stream keeps the
/// child's interleaving. The child is killed when the timeout fires.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        env: &EnvironmentOverrides,
    ) -> Result<ProcessOutput> {
        let (mut reader, writer) = std::io::pipe().context("failed to create output pipe")?;
        let stderr_writer = writer
            .try_clone()
            .context("failed to duplicate output pipe")?;

        let mut command = tokio::process::Command::new(program);
        command
            .args(args)
            .envs(env)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .kill_on_drop(true);

        tracing::debug!(
            program,
            ?args,
            overrides = ?env.keys().collect::<Vec<_>>(),
            "running command"
        );
        let mut child = command
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;
        // Release our copies of the write end, otherwise the reader never sees EOF.
        drop(command);

        let read_output = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });

        tokio::select! {
            result = async {
                let status = child
                    .wait()
                    .await
                    .with_context(|| format!("waiting for {program}"))?;
                let output = read_output
                    .await
                    .context("output reader task failed")?
                    .with_context(|| format!("reading output of {program}"))?;
                Ok::<_, anyhow::Error>((status, output))
            } => {
                let (status, output) = result?;
                tracing::debug!(program, %status, bytes = output.len(), "command finished");
                if status.success() {
                    Ok(ProcessOutput { output })
                } else {
                    Err(ProcessError::Failed {
                        program: program.to_string(),
                        code: status.code(),
                        output: String::from_utf8_lossy(&output).into_owned(),
                    }
                    .into())
                }
            }
            () = tokio::time::sleep(self.timeout) => {
                let _ = child.kill().await;
                tracing::warn!(program, secs = self.timeout.as_secs(), "command timed out");
                Err(ProcessError::TimedOut {
                    program: program.to_string(),
                    secs: self.timeout.as_secs(),
                }
                .into())
            }
        }
    }
}
