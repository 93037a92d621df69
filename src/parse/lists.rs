//! Namespace and context list decoders

use super::{ParseError, ParseResult, null_as_default};
use crate::models::Namespace;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ObjectMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct NamespaceItem {
    #[serde(default, deserialize_with = "null_as_default")]
    metadata: ObjectMeta,
}

#[derive(Debug, Deserialize)]
struct NamespaceList {
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<NamespaceItem>,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct KubeConfigView {
    #[serde(default, deserialize_with = "null_as_default")]
    contexts: Vec<NamedContext>,
}

/// Decode `kubectl get ns -o json`, keeping API order and skipping unnamed items
pub fn parse_namespaces(stdout: &str) -> ParseResult<Vec<Namespace>> {
    let list: NamespaceList =
        serde_json::from_str(stdout).map_err(ParseError::malformed("namespace list"))?;

    Ok(list
        .items
        .into_iter()
        .filter(|item| !item.metadata.name.is_empty())
        .map(|item| Namespace {
            name: item.metadata.name,
        })
        .collect())
}

/// Decode `kubectl config view -o json` into context names
pub fn parse_contexts(stdout: &str) -> ParseResult<Vec<String>> {
    let view: KubeConfigView =
        serde_json::from_str(stdout).map_err(ParseError::malformed("kubeconfig"))?;

    Ok(view
        .contexts
        .into_iter()
        .map(|ctx| ctx.name)
        .filter(|name| !name.is_empty())
        .collect())
}
