//! kubectl process runner
//!
//! Spawns exactly one process per call with an explicit argument vector.
//! Nothing is ever interpolated through a shell.

use crate::models::envelope::INTERNAL_FAILURE;
use crate::models::{CommandResult, display_command};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command as TokioCommand;
use tokio::task::JoinHandle;

/// Stderr text used when a process hits its deadline without saying anything
pub const TIMEOUT_MESSAGE: &str = "command timed out";

/// How long to wait for output pipes to close after the process is gone
const PIPE_DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Output captured so far, readable even if the reader never finishes
type CapturedOutput = Arc<Mutex<Vec<u8>>>;

/// Executes kubectl argument vectors
///
/// Implementations must not retry and must always return a well-formed
/// envelope, whatever happens to the process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `args` and wait at most `timeout` for the process to finish
    async fn run(&self, args: &[String], timeout: Duration) -> CommandResult;
}

/// Runner backed by a real kubectl binary
#[derive(Debug, Clone)]
pub struct KubectlRunner {
    binary: PathBuf,
}

impl KubectlRunner {
    /// Runner for `kubectl` resolved from `PATH`
    pub fn new() -> Self {
        Self::with_binary("kubectl")
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Program actually spawned; the displayed command always says `kubectl`
    pub fn binary(&self) -> &std::path::Path {
        &self.binary
    }
}

impl Default for KubectlRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for KubectlRunner {
    async fn run(&self, args: &[String], timeout: Duration) -> CommandResult {
        let command = display_command(args);
        let start = Instant::now();

        tracing::debug!(command = %command, ?timeout, "Running kubectl");

        let mut cmd = TokioCommand::new(self.binary());
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("Failed to start {}: {}", self.binary.display(), e);
                return CommandResult {
                    command,
                    stdout: String::new(),
                    stderr: format!("failed to start {}: {}", self.binary.display(), e),
                    exit_code: INTERNAL_FAILURE,
                    duration_ms: elapsed_ms(start),
                    parsed_data: None,
                };
            }
        };

        let stdout_buf = CapturedOutput::default();
        let stderr_buf = CapturedOutput::default();
        let stdout_task = drain(child.stdout.take(), Arc::clone(&stdout_buf));
        let stderr_task = drain(child.stderr.take(), Arc::clone(&stderr_buf));

        let mut timed_out = false;
        let mut wait_error = None;
        let outcome = tokio::time::timeout(timeout, child.wait()).await;
        let exit_code = match outcome {
            Ok(Ok(status)) => status.code().unwrap_or(INTERNAL_FAILURE),
            Ok(Err(e)) => {
                wait_error = Some(e.to_string());
                INTERNAL_FAILURE
            }
            Err(_) => {
                timed_out = true;
                if let Err(e) = child.kill().await {
                    tracing::warn!("Failed to kill timed out kubectl process: {}", e);
                }
                INTERNAL_FAILURE
            }
        };

        // A grandchild (e.g. an exec credential plugin) can keep the pipes open
        settle(stdout_task, stderr_task).await;
        let stdout = captured_text(&stdout_buf);
        let mut stderr = captured_text(&stderr_buf);

        if let Some(e) = wait_error {
            if !stderr.is_empty() {
                stderr.push('\n');
            }
            stderr.push_str(&format!("failed to wait for kubectl: {}", e));
        }
        if timed_out {
            tracing::warn!(command = %command, "kubectl timed out after {:?}", timeout);
            if stderr.is_empty() {
                stderr.push_str(TIMEOUT_MESSAGE);
            }
        }

        let duration_ms = elapsed_ms(start);
        tracing::debug!(command = %command, exit_code, duration_ms, "kubectl finished");

        CommandResult {
            command,
            stdout,
            stderr,
            exit_code,
            duration_ms,
            parsed_data: None,
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Read a pipe to the end on its own task so a chatty process cannot block on a full pipe
fn drain<R>(pipe: Option<R>, sink: CapturedOutput) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let Some(mut pipe) = pipe else {
            return;
        };
        let mut chunk = [0u8; 8192];
        loop {
            match pipe.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => sink
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(&chunk[..n]),
                Err(e) => {
                    tracing::debug!("Stopped reading kubectl output: {}", e);
                    break;
                }
            }
        }
    })
}

/// Wait for both readers under one shared grace period, then stop them
async fn settle(stdout: JoinHandle<()>, stderr: JoinHandle<()>) {
    let stdout_abort = stdout.abort_handle();
    let stderr_abort = stderr.abort_handle();

    match tokio::time::timeout(PIPE_DRAIN_GRACE, async { tokio::join!(stdout, stderr) }).await {
        Ok((out, err)) => {
            for joined in [out, err] {
                if let Err(e) = joined {
                    tracing::warn!("Output reader task failed: {}", e);
                }
            }
        }
        Err(_) => {
            tracing::warn!(
                "Output pipe still open {:?} after exit, keeping partial output",
                PIPE_DRAIN_GRACE
            );
            stdout_abort.abort();
            stderr_abort.abort();
        }
    }
}

fn captured_text(buf: &CapturedOutput) -> String {
    let bytes = buf.lock().unwrap_or_else(PoisonError::into_inner);
    String::from_utf8_lossy(&bytes).into_owned()
}
