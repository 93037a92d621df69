//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// kubectl binary, either a bare name resolved from PATH or a full path
    #[serde(default = "default_kubectl")]
    pub kubectl: String,

    /// Per-operation deadlines
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Command transcript settings
    #[serde(default)]
    pub transcript: TranscriptConfig,

    /// Log retrieval settings
    #[serde(default)]
    pub logs: LogsConfig,
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeoutConfig {
    /// Deadline for every operation except logs
    #[serde(default = "default_timeout_seconds")]
    pub default_seconds: u64,

    /// Deadline for log retrieval
    #[serde(default = "default_logs_timeout_seconds")]
    pub logs_seconds: u64,
}

/// Transcript configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptConfig {
    /// Number of commands kept before the oldest is dropped
    #[serde(default = "default_transcript_capacity")]
    pub capacity: usize,
}

/// Logs configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogsConfig {
    /// Tail length used when no positive tail is requested
    #[serde(default = "default_tail")]
    pub default_tail: u32,
}

// Default value functions
fn default_kubectl() -> String {
    "kubectl".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_logs_timeout_seconds() -> u64 {
    30
}

fn default_transcript_capacity() -> usize {
    200
}

fn default_tail() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kubectl: default_kubectl(),
            timeouts: TimeoutConfig::default(),
            transcript: TranscriptConfig::default(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_seconds: default_timeout_seconds(),
            logs_seconds: default_logs_timeout_seconds(),
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            capacity: default_transcript_capacity(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            default_tail: default_tail(),
        }
    }
}
