//! Jupyter server REST adapter.
//!
//! Reads `/api` and `/api/sessions` from a running Jupyter server and
//! mirrors the result into a [`MemoryTracker`], so the rest of the tracer
//! sees the server through the same host traits as any other host.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    ConnectionStatus, HostInfo, KernelInfo, MemoryDocument, MemoryTracker, NotebookDocument,
    SessionHandle,
};

/// Kernel entry of a `/api/sessions` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerKernel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub execution_state: Option<String>,
    #[serde(default)]
    pub connections: u32,
}

impl ServerKernel {
    pub fn connection_status(&self) -> ConnectionStatus {
        if self.execution_state.as_deref() == Some("starting") {
            ConnectionStatus::Connecting
        } else if self.connections > 0 {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }
}

/// One entry of a `/api/sessions` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSession {
    pub id: String,
    pub path: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub kernel: Option<ServerKernel>,
}

impl ServerSession {
    fn handle(&self) -> SessionHandle {
        SessionHandle {
            name: self.name.clone(),
            kernel: self.kernel.as_ref().map(|k| KernelInfo {
                id: k.id.clone(),
                name: k.name.clone(),
                connection_status: k.connection_status(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServerStatus {
    version: String,
}

pub struct JupyterServerClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl JupyterServerClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Build an API URL. Unlike notebook paths, API routes always get a separator.
    fn endpoint(&self, route: &str) -> String {
        format!("{}/api{}", self.base_url.trim_end_matches('/'), route)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, route: &str) -> Result<T> {
        let url = self.endpoint(route);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach Jupyter server at {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Jupyter server error ({}) for {}: {}", status, url, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Invalid response from {}", url))
    }

    /// Fetch the server version and pair it with the base URL.
    pub async fn host_info(&self) -> Result<HostInfo> {
        let status: ServerStatus = self.get_json("").await?;
        Ok(HostInfo {
            version: status.version,
            base_url: self.base_url.clone(),
        })
    }

    pub async fn sessions(&self) -> Result<Vec<ServerSession>> {
        self.get_json("/sessions").await
    }
}

/// Mirror server sessions into `tracker`.
///
/// New paths are opened, known paths get their session replaced (which
/// emits kernel changes), and paths no longer on the server are closed.
/// The active document becomes `preferred_path` when it is tracked,
/// otherwise the document whose kernel was active most recently.
pub fn sync_tracker(
    tracker: &MemoryTracker,
    sessions: &[ServerSession],
    preferred_path: Option<&str>,
) {
    for session in sessions {
        let document = match tracker.get(&session.path) {
            Some(document) => document,
            None => {
                let document = MemoryDocument::new(session.path.clone());
                tracker.open(document.clone());
                document
            }
        };
        let handle = Some(session.handle());
        if document.session() != handle {
            document.set_session(handle);
        }
    }

    for document in tracker.documents() {
        let path = document.path();
        if !sessions.iter().any(|s| s.path == path) {
            tracing::debug!(path = %path, "Session closed on server");
            tracker.close(&path);
        }
    }

    let target = preferred_path
        .filter(|path| tracker.get(path).is_some())
        .map(str::to_string)
        .or_else(|| most_recent(sessions).map(|s| s.path.clone()));

    match target {
        Some(path) => {
            tracker.activate(Some(&path));
        }
        None => {
            tracker.activate(None);
        }
    }
}

fn most_recent(sessions: &[ServerSession]) -> Option<&ServerSession> {
    sessions
        .iter()
        .max_by_key(|s| s.kernel.as_ref().and_then(|k| k.last_activity))
}
