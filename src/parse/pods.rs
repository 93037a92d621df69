//! Pod list decoder

use super::{ParseError, ParseResult, format_age, null_as_default};
use crate::models::Pod;
use crate::models::resources::PLACEHOLDER;
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PodList {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<PodItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodItem {
    #[serde(default, deserialize_with = "null_as_default")]
    metadata: PodMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    status: PodStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default)]
    creation_timestamp: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    owner_references: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    phase: String,
    #[serde(default, deserialize_with = "null_as_default")]
    reason: String,
    #[serde(default, deserialize_with = "null_as_default")]
    node_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    container_statuses: Vec<ContainerStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContainerStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    ready: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    restart_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    state: ContainerState,
}

#[derive(Debug, Default, Deserialize)]
struct ContainerState {
    #[serde(default)]
    waiting: Option<StateReason>,
    #[serde(default)]
    terminated: Option<StateReason>,
}

#[derive(Debug, Default, Deserialize)]
struct StateReason {
    #[serde(default, deserialize_with = "null_as_default")]
    reason: String,
}

/// Decode `kubectl get pods -o json`, computing ages against the current time
pub fn parse_pods(stdout: &str) -> ParseResult<Vec<Pod>> {
    parse_pods_at(stdout, Utc::now())
}

/// Decode a pod list with ages measured from `now`
pub fn parse_pods_at(stdout: &str, now: DateTime<Utc>) -> ParseResult<Vec<Pod>> {
    let list: PodList = serde_json::from_str(stdout).map_err(ParseError::malformed("pod list"))?;

    Ok(list
        .items
        .into_iter()
        .map(|item| pod_row(item, now))
        .collect())
}

fn pod_row(item: PodItem, now: DateTime<Utc>) -> Pod {
    let containers = &item.status.container_statuses;

    let ready_count = containers.iter().filter(|cs| cs.ready).count();
    let restarts = containers
        .iter()
        .fold(0u32, |acc, cs| acc.saturating_add(cs.restart_count));

    let age = item
        .metadata
        .creation_timestamp
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        // zero-valued timestamps serialize as year 1
        .filter(|created| created.year() > 1)
        .map(|created| format_age(now - created.with_timezone(&Utc)))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let node = if item.status.node_name.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        item.status.node_name.clone()
    };

    Pod {
        status: derive_status(&item.status),
        ready: format!("{}/{}", ready_count, containers.len()),
        restarts,
        age,
        node,
        has_owner: !item.metadata.owner_references.is_empty(),
        name: item.metadata.name,
    }
}

/// Phase, overridden by the pod reason, then by every non-empty container
/// waiting or terminated reason in listed order. The last one seen wins.
fn derive_status(status: &PodStatus) -> String {
    let mut current = status.phase.as_str();
    if !status.reason.is_empty() {
        current = status.reason.as_str();
    }

    for cs in &status.container_statuses {
        if let Some(waiting) = cs.state.waiting.as_ref().filter(|w| !w.reason.is_empty()) {
            current = waiting.reason.as_str();
        }
        if let Some(terminated) = cs
            .state
            .terminated
            .as_ref()
            .filter(|t| !t.reason.is_empty())
        {
            current = terminated.reason.as_str();
        }
    }

    current.to_string()
}
