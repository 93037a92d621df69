//! Shared test doubles

#![allow(dead_code)]

use async_trait::async_trait;
use kubescribe::models::display_command;
use kubescribe::{CommandResult, CommandRunner};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Box<dyn Fn(&[String]) -> CommandResult + Send + Sync>;

/// Runner that records every call instead of spawning kubectl
pub struct RecordingRunner {
    calls: Mutex<Vec<(Vec<String>, Duration)>>,
    respond: Responder,
}

impl RecordingRunner {
    /// Always succeeds with the given stdout
    pub fn ok(stdout: &str) -> Arc<Self> {
        let stdout = stdout.to_string();
        Self::with(move |args| success(args, &stdout))
    }

    pub fn with<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&[String]) -> CommandResult + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    pub fn calls(&self) -> Vec<(Vec<String>, Duration)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Argument vector of the only call made so far
    pub fn only_args(&self) -> Vec<String> {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one runner call");
        calls[0].0.clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, args: &[String], timeout: Duration) -> CommandResult {
        self.calls.lock().unwrap().push((args.to_vec(), timeout));
        (self.respond)(args)
    }
}

pub fn success(args: &[String], stdout: &str) -> CommandResult {
    CommandResult {
        command: display_command(args),
        stdout: stdout.to_string(),
        stderr: String::new(),
        exit_code: 0,
        duration_ms: 4,
        parsed_data: None,
    }
}

pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
