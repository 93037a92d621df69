//! JSON-lines RPC surface for front-ends
//!
//! Each input line is one request:
//!
//! ```json
//! {"id": 1, "method": "listPods", "contextName": "kind-dev", "namespace": "default"}
//! ```
//!
//! Each output line is `{"id": ..., "result": ...}` or `{"id": ..., "error": "..."}`.
//! Requests are dispatched concurrently, so responses may arrive out of order;
//! callers correlate them by `id`.

use crate::models::CommandResult;
use crate::services::KubectlService;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// The fixed set of operations a front-end can call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    tag = "method",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    ListContexts,
    GetCurrentContext,
    SetContext {
        context_name: String,
    },
    ListNamespaces {
        #[serde(default)]
        context_name: String,
    },
    ListPods {
        #[serde(default)]
        context_name: String,
        namespace: String,
    },
    DeletePod {
        #[serde(default)]
        context_name: String,
        namespace: String,
        pod_name: String,
    },
    GetPodLogs {
        #[serde(default)]
        context_name: String,
        namespace: String,
        pod_name: String,
        #[serde(default)]
        tail_lines: i64,
    },
    DescribePod {
        #[serde(default)]
        context_name: String,
        namespace: String,
        pod_name: String,
    },
    GetTranscript,
    ClearTranscript,
}

/// A request line with its correlation id
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Value,
    #[serde(flatten)]
    pub request: Request,
}

/// Successful payloads
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Command(CommandResult),
    Transcript(Vec<CommandResult>),
    Cleared { cleared: bool },
}

/// A response line
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Reply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RpcResponse {
    pub fn ok(id: Value, reply: Reply) -> Self {
        Self {
            id,
            result: Some(reply),
            error: None,
        }
    }

    pub fn error(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(message.into()),
        }
    }
}

/// Run one request against the service
pub async fn dispatch(service: &KubectlService, request: Request) -> Reply {
    match request {
        Request::ListContexts => Reply::Command(service.list_contexts().await),
        Request::GetCurrentContext => Reply::Command(service.current_context().await),
        Request::SetContext { context_name } => {
            Reply::Command(service.set_context(&context_name).await)
        }
        Request::ListNamespaces { context_name } => {
            Reply::Command(service.list_namespaces(&context_name).await)
        }
        Request::ListPods {
            context_name,
            namespace,
        } => Reply::Command(service.list_pods(&context_name, &namespace).await),
        Request::DeletePod {
            context_name,
            namespace,
            pod_name,
        } => Reply::Command(
            service
                .delete_pod(&context_name, &namespace, &pod_name)
                .await,
        ),
        Request::GetPodLogs {
            context_name,
            namespace,
            pod_name,
            tail_lines,
        } => Reply::Command(
            service
                .pod_logs(&context_name, &namespace, &pod_name, tail_lines)
                .await,
        ),
        Request::DescribePod {
            context_name,
            namespace,
            pod_name,
        } => Reply::Command(
            service
                .describe_pod(&context_name, &namespace, &pod_name)
                .await,
        ),
        Request::GetTranscript => Reply::Transcript(service.transcript()),
        Request::ClearTranscript => {
            service.clear_transcript();
            Reply::Cleared { cleared: true }
        }
    }
}

/// Serve requests from `reader` until EOF, writing responses to `writer`
///
/// Lines that are not UTF-8 or not a valid request get an error response and
/// the loop keeps going. Returns the writer once every in-flight request has
/// been answered.
pub async fn serve<R, W>(service: Arc<KubectlService>, mut reader: R, writer: W) -> Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<RpcResponse>();

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(response) = rx.recv().await {
            let mut line =
                serde_json::to_vec(&response).context("Failed to serialize response")?;
            line.push(b'\n');
            writer
                .write_all(&line)
                .await
                .context("Failed to write response")?;
            writer.flush().await.context("Failed to flush response")?;
        }
        Ok::<W, anyhow::Error>(writer)
    });

    let mut tasks = JoinSet::new();
    let mut buf = Vec::new();
    let read_result: Result<()> = loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(anyhow::Error::new(e).context("Failed to read request")),
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                tracing::warn!("Request line is not UTF-8: {}", e);
                let response = RpcResponse::error(Value::Null, format!("invalid request: {}", e));
                if tx.send(response).is_err() {
                    tracing::warn!("Response writer closed before error was sent");
                }
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<RpcRequest>(line) {
            Ok(rpc) => {
                tracing::debug!("Dispatching {:?}", rpc.request);
                let service = Arc::clone(&service);
                let tx = tx.clone();
                tasks.spawn(async move {
                    let reply = dispatch(&service, rpc.request).await;
                    if tx.send(RpcResponse::ok(rpc.id, reply)).is_err() {
                        tracing::warn!("Response writer closed before reply was sent");
                    }
                });
            }
            Err(e) => {
                tracing::warn!("Invalid request line: {}", e);
                let response = RpcResponse::error(request_id(line), format!("invalid request: {}", e));
                if tx.send(response).is_err() {
                    tracing::warn!("Response writer closed before error was sent");
                }
            }
        }
    };

    // In-flight requests always finish and are answered, even after a read error
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Request task failed: {}", e);
        }
    }
    drop(tx);

    let writer = writer_task.await.context("Response writer task failed")??;
    read_result?;
    Ok(writer)
}

/// Best-effort id from a line that did not parse as a request
fn request_id(line: &str) -> Value {
    serde_json::from_str::<Value>(line)
        .ok()
        .and_then(|v| v.get("id").cloned())
        .unwrap_or(Value::Null)
}
