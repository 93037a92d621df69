//! View records for cluster resources
//!
//! These are point-in-time snapshots rebuilt on every fetch. They carry only
//! what the pod table and pickers display.

use serde::{Deserialize, Serialize};

/// Placeholder shown for absent node names and unknown ages
pub const PLACEHOLDER: &str = "-";

/// A namespace in the active cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub name: String,
}

/// A pod row as shown in the pod table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub name: String,
    /// Phase, or the most specific reason reported by the pod or its containers
    pub status: String,
    /// `<ready containers>/<total containers>`
    pub ready: String,
    pub restarts: u32,
    pub age: String,
    pub node: String,
    /// True when a controller owns this pod
    pub has_owner: bool,
}
