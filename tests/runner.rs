//! Process runner tests
//!
//! These spawn small standard Unix utilities in place of kubectl.

#![cfg(unix)]

use kubescribe::kubectl::TIMEOUT_MESSAGE;
use kubescribe::{CommandRunner, KubectlRunner};
use std::path::Path;
use std::time::Duration;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

const GENEROUS: Duration = Duration::from_secs(10);

#[tokio::test]
async fn test_clean_exit() {
    let runner = KubectlRunner::with_binary("echo");
    let result = runner.run(&args(&["get", "pods"]), GENEROUS).await;

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "get pods\n");
    assert!(result.stderr.is_empty());
    assert_eq!(result.command, "kubectl get pods");
    assert!(result.parsed_data.is_none());
}

#[tokio::test]
async fn test_arguments_are_not_shell_interpreted() {
    let runner = KubectlRunner::with_binary("echo");
    let hostile = "$(id); echo pwned | cat > /dev/null";
    let result = runner.run(&args(&[hostile]), GENEROUS).await;

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, format!("{}\n", hostile));
}

#[tokio::test]
async fn test_nonzero_exit_code_is_preserved() {
    let runner = KubectlRunner::with_binary("sh");
    let result = runner
        .run(&args(&["-c", "echo out; echo err >&2; exit 3"]), GENEROUS)
        .await;

    assert_eq!(result.exit_code, 3);
    assert_eq!(result.stdout, "out\n");
    assert_eq!(result.stderr, "err\n");
}

#[tokio::test]
async fn test_timeout_without_stderr_is_synthesized() {
    let runner = KubectlRunner::with_binary("sleep");
    let result = runner
        .run(&args(&["5"]), Duration::from_millis(200))
        .await;

    assert_eq!(result.exit_code, -1);
    assert_eq!(result.stderr, TIMEOUT_MESSAGE);
    assert_eq!(result.stderr, "command timed out");
    assert!(result.duration_ms >= 200);
    assert!(result.duration_ms < 5000);
}

#[tokio::test]
async fn test_timeout_keeps_process_stderr() {
    let runner = KubectlRunner::with_binary("sh");
    let result = runner
        .run(
            &args(&["-c", "echo still connecting >&2; exec sleep 5"]),
            Duration::from_millis(500),
        )
        .await;

    assert_eq!(result.exit_code, -1);
    assert_eq!(result.stderr, "still connecting\n");
}

#[tokio::test]
async fn test_timeout_keeps_stderr_when_grandchild_holds_pipe() {
    // the shell is killed but its sleeping child still owns the pipes
    let runner = KubectlRunner::with_binary("sh");
    let result = runner
        .run(
            &args(&["-c", "echo still connecting >&2; sleep 6"]),
            Duration::from_millis(500),
        )
        .await;

    assert_eq!(result.exit_code, -1);
    assert_eq!(result.stderr, "still connecting\n");
    assert!(
        result.duration_ms < 4000,
        "drain grace should be shared, took {}ms",
        result.duration_ms
    );
}

#[test]
fn test_binary_defaults_to_kubectl() {
    assert_eq!(KubectlRunner::new().binary(), Path::new("kubectl"));
    assert_eq!(
        KubectlRunner::with_binary("/opt/k8s/bin/kubectl").binary(),
        Path::new("/opt/k8s/bin/kubectl")
    );
}

#[tokio::test]
async fn test_missing_binary_reports_launch_failure() {
    let runner = KubectlRunner::with_binary("/nonexistent/kubectl");
    let result = runner.run(&args(&["version"]), GENEROUS).await;

    assert_eq!(result.exit_code, -1);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.starts_with("failed to start /nonexistent/kubectl"));
    assert_eq!(result.command, "kubectl version");
}

#[tokio::test]
async fn test_large_output_does_not_block() {
    let runner = KubectlRunner::with_binary("sh");
    let result = runner
        .run(
            &args(&["-c", "i=0; while [ $i -lt 20000 ]; do echo line-$i; i=$((i+1)); done"]),
            GENEROUS,
        )
        .await;

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout.lines().count(), 20000);
}
