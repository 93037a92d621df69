//! kubectl command service
//!
//! One method per supported cluster operation. Each method validates its
//! inputs, builds the fixed argument vector, runs it, decodes structured
//! output, and records the resulting envelope in the transcript. Every path,
//! including rejected input, ends in a recorded `CommandResult`.
//!
//! Concurrent calls run their processes in parallel; only the transcript
//! append is serialized. Nothing is retried here, and concurrent deletes of the
//! same pod are passed through as-is.

use crate::config::schema::Config;
use crate::kubectl::{
    CommandRunner, KubectlRunner, ValidationError, validate_context, validate_namespace,
    validate_pod_name, validate_required_context,
};
use crate::models::{CommandResult, ParsedData};
use crate::parse::{ParseResult, parse_contexts, parse_namespaces, parse_pods};
use crate::services::transcript::Transcript;
use std::sync::Arc;
use std::time::Duration;

/// Timeout for everything except log retrieval
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Log volume is unbounded, so logs get a longer deadline
pub const LOGS_TIMEOUT: Duration = Duration::from_secs(30);

/// Tail length used when a caller asks for zero or fewer lines
pub const DEFAULT_TAIL_LINES: u32 = 100;

type Decoder = fn(&str) -> ParseResult<ParsedData>;

/// Per-operation deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTimeouts {
    pub default: Duration,
    pub logs: Duration,
}

impl Default for CommandTimeouts {
    fn default() -> Self {
        Self {
            default: DEFAULT_TIMEOUT,
            logs: LOGS_TIMEOUT,
        }
    }
}

/// Orchestrates kubectl operations and owns the transcript
pub struct KubectlService {
    runner: Arc<dyn CommandRunner>,
    transcript: Transcript,
    timeouts: CommandTimeouts,
    default_tail: u32,
}

impl KubectlService {
    pub fn new(runner: Arc<dyn CommandRunner>, transcript: Transcript) -> Self {
        Self {
            runner,
            transcript,
            timeouts: CommandTimeouts::default(),
            default_tail: DEFAULT_TAIL_LINES,
        }
    }

    /// Service backed by the configured kubectl binary
    pub fn from_config(config: &Config) -> Self {
        let runner = KubectlRunner::with_binary(&config.kubectl);
        Self::new(
            Arc::new(runner),
            Transcript::with_capacity(config.transcript.capacity),
        )
        .with_timeouts(CommandTimeouts {
            default: Duration::from_secs(config.timeouts.default_seconds),
            logs: Duration::from_secs(config.timeouts.logs_seconds),
        })
        .with_default_tail(config.logs.default_tail)
    }

    pub fn with_timeouts(mut self, timeouts: CommandTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_default_tail(mut self, tail: u32) -> Self {
        self.default_tail = tail.max(1);
        self
    }

    pub fn timeouts(&self) -> CommandTimeouts {
        self.timeouts
    }

    /// `kubectl config view -o json`
    pub async fn list_contexts(&self) -> CommandResult {
        let args = argv(&["config", "view", "-o", "json"]);
        self.execute(args, self.timeouts.default, Some(decode_contexts))
            .await
    }

    /// `kubectl config current-context`
    pub async fn current_context(&self) -> CommandResult {
        let args = argv(&["config", "current-context"]);
        self.execute(args, self.timeouts.default, Some(decode_current_context))
            .await
    }

    /// `kubectl config use-context <name>`
    pub async fn set_context(&self, context: &str) -> CommandResult {
        let args = argv(&["config", "use-context", context]);
        if let Err(e) = validate_required_context(context) {
            return self.reject(&args, e);
        }
        self.execute(args, self.timeouts.default, None).await
    }

    /// `kubectl [--context <ctx>] get ns -o json`
    pub async fn list_namespaces(&self, context: &str) -> CommandResult {
        let args = with_context(context, argv(&["get", "ns", "-o", "json"]));
        if let Err(e) = validate_context(context) {
            return self.reject(&args, e);
        }
        self.execute(args, self.timeouts.default, Some(decode_namespaces))
            .await
    }

    /// `kubectl [--context <ctx>] get pods -n <ns> -o json`
    pub async fn list_pods(&self, context: &str, namespace: &str) -> CommandResult {
        let args = with_context(
            context,
            argv(&["get", "pods", "-n", namespace, "-o", "json"]),
        );
        if let Err(e) = validate_namespace(namespace).and_then(|_| validate_context(context)) {
            return self.reject(&args, e);
        }
        self.execute(args, self.timeouts.default, Some(decode_pods))
            .await
    }

    /// `kubectl [--context <ctx>] delete pod <pod> -n <ns>`
    ///
    /// Not idempotent. Never retried.
    pub async fn delete_pod(&self, context: &str, namespace: &str, pod: &str) -> CommandResult {
        let args = with_context(context, argv(&["delete", "pod", pod, "-n", namespace]));
        if let Err(e) = validate_pod_target(context, namespace, pod) {
            return self.reject(&args, e);
        }
        tracing::info!("Deleting pod {}/{}", namespace, pod);
        self.execute(args, self.timeouts.default, None).await
    }

    /// `kubectl [--context <ctx>] logs <pod> -n <ns> --tail=<n>`
    ///
    /// A `tail_lines` of zero or less falls back to the default tail.
    pub async fn pod_logs(
        &self,
        context: &str,
        namespace: &str,
        pod: &str,
        tail_lines: i64,
    ) -> CommandResult {
        let tail = if tail_lines <= 0 {
            i64::from(self.default_tail)
        } else {
            tail_lines
        };
        let tail_arg = format!("--tail={}", tail);
        let args = with_context(context, argv(&["logs", pod, "-n", namespace, &tail_arg]));
        if let Err(e) = validate_pod_target(context, namespace, pod) {
            return self.reject(&args, e);
        }
        self.execute(args, self.timeouts.logs, None).await
    }

    /// `kubectl [--context <ctx>] describe pod <pod> -n <ns>`
    pub async fn describe_pod(&self, context: &str, namespace: &str, pod: &str) -> CommandResult {
        let args = with_context(context, argv(&["describe", "pod", pod, "-n", namespace]));
        if let Err(e) = validate_pod_target(context, namespace, pod) {
            return self.reject(&args, e);
        }
        self.execute(args, self.timeouts.default, None).await
    }

    /// Copy of the transcript, oldest first
    pub fn transcript(&self) -> Vec<CommandResult> {
        self.transcript.snapshot()
    }

    pub fn clear_transcript(&self) {
        self.transcript.clear();
    }

    async fn execute(
        &self,
        args: Vec<String>,
        timeout: Duration,
        decoder: Option<Decoder>,
    ) -> CommandResult {
        let mut result = self.runner.run(&args, timeout).await;

        if result.success() {
            if let Some(decode) = decoder {
                result = match decode(&result.stdout) {
                    Ok(data) => result.with_parsed(data),
                    Err(e) => {
                        tracing::warn!("Failed to decode output of '{}': {}", result.command, e);
                        result.with_parse_error(e)
                    }
                };
            }
        } else {
            tracing::debug!(
                "'{}' exited with {}: {}",
                result.command,
                result.exit_code,
                result.stderr.trim()
            );
        }

        self.record(result)
    }

    fn reject(&self, args: &[String], error: ValidationError) -> CommandResult {
        tracing::debug!("Rejected input: {}", error);
        self.record(CommandResult::rejected(args, error))
    }

    fn record(&self, result: CommandResult) -> CommandResult {
        self.transcript.append(result.clone());
        result
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Prefix `--context <name>` when a context was supplied
fn with_context(context: &str, args: Vec<String>) -> Vec<String> {
    if context.is_empty() {
        return args;
    }
    let mut out = Vec::with_capacity(args.len() + 2);
    out.push("--context".to_string());
    out.push(context.to_string());
    out.extend(args);
    out
}

fn validate_pod_target(context: &str, namespace: &str, pod: &str) -> Result<(), ValidationError> {
    validate_namespace(namespace)?;
    validate_pod_name(pod)?;
    validate_context(context)
}

fn decode_contexts(stdout: &str) -> ParseResult<ParsedData> {
    parse_contexts(stdout).map(ParsedData::Contexts)
}

fn decode_current_context(stdout: &str) -> ParseResult<ParsedData> {
    Ok(ParsedData::CurrentContext(stdout.trim().to_string()))
}

fn decode_namespaces(stdout: &str) -> ParseResult<ParsedData> {
    parse_namespaces(stdout).map(ParsedData::Namespaces)
}

fn decode_pods(stdout: &str) -> ParseResult<ParsedData> {
    parse_pods(stdout).map(ParsedData::Pods)
}
