//! Result envelope shared by every core operation
//!
//! A `CommandResult` is what the runner produces, what the service decorates
//! with decoded data, and what the transcript records. Once recorded it is only
//! ever handed out as a clone.

use super::resources::{Namespace, Pod};
use serde::{Deserialize, Serialize};

/// Program name shown in command transcripts
pub const DISPLAY_PROGRAM: &str = "kubectl";

/// Exit code used for validation failures and processes that could not be observed
pub const INTERNAL_FAILURE: i32 = -1;

/// Decoded payload, keyed by the operation that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ParsedData {
    Contexts(Vec<String>),
    CurrentContext(String),
    Namespaces(Vec<Namespace>),
    Pods(Vec<Pod>),
}

/// Outcome of a single kubectl invocation (or a rejected one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    /// Reconstructed command line, for display only
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    /// 0 on success, -1 for validation or launch failures, otherwise the process status
    pub exit_code: i32,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_data: Option<ParsedData>,
}

impl CommandResult {
    /// Envelope for input that was rejected before any process was spawned
    pub fn rejected(args: &[String], error: impl std::fmt::Display) -> Self {
        Self {
            command: display_command(args),
            stdout: String::new(),
            stderr: error.to_string(),
            exit_code: INTERNAL_FAILURE,
            duration_ms: 0,
            parsed_data: None,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn with_parsed(mut self, data: ParsedData) -> Self {
        self.parsed_data = Some(data);
        self
    }

    /// Append a `parse error:` line to stderr; exit code and stdout are left alone
    pub fn with_parse_error(mut self, error: impl std::fmt::Display) -> Self {
        if !self.stderr.is_empty() {
            self.stderr.push('\n');
        }
        self.stderr.push_str(&format!("parse error: {}", error));
        self
    }
}

/// Render an argument vector the way a user would type it
pub fn display_command(args: &[String]) -> String {
    if args.is_empty() {
        return DISPLAY_PROGRAM.to_string();
    }
    format!("{} {}", DISPLAY_PROGRAM, args.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_display_command() {
        assert_eq!(
            display_command(&args(&["get", "ns", "-o", "json"])),
            "kubectl get ns -o json"
        );
        assert_eq!(display_command(&[]), "kubectl");
    }

    #[test]
    fn test_rejected_envelope() {
        let result = CommandResult::rejected(&args(&["logs", "Bad"]), "invalid pod name");
        assert_eq!(result.exit_code, -1);
        assert_eq!(result.stderr, "invalid pod name");
        assert!(result.stdout.is_empty());
        assert_eq!(result.command, "kubectl logs Bad");
        assert!(result.parsed_data.is_none());
    }

    #[test]
    fn test_parse_error_joins_existing_stderr() {
        let result = CommandResult {
            command: "kubectl get ns -o json".to_string(),
            stdout: "{".to_string(),
            stderr: "warning: deprecated".to_string(),
            exit_code: 0,
            duration_ms: 5,
            parsed_data: None,
        }
        .with_parse_error("EOF while parsing");

        assert_eq!(
            result.stderr,
            "warning: deprecated\nparse error: EOF while parsing"
        );
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "{");
    }

    #[test]
    fn test_envelope_serializes_camel_case() {
        let result = CommandResult::rejected(&args(&["get", "ns"]), "nope");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["exitCode"], -1);
        assert_eq!(json["durationMs"], 0);
        assert!(json.get("parsedData").is_none());

        let ok = result.with_parsed(ParsedData::CurrentContext("kind-dev".to_string()));
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["parsedData"]["kind"], "currentContext");
        assert_eq!(json["parsedData"]["data"], "kind-dev");
    }
}
