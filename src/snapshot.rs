//! Point-in-time capture of the notebook session.
//!
//! `SessionSnapshotBuilder` reads the injected host state on every call and
//! produces a fresh `Snapshot`. Nothing is cached: two calls a millisecond
//! apart may legitimately differ.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::host::{DocumentTracker, HostInfo};

/// Immutable session record.
///
/// Field order is the serialized key order. Absent optional values are
/// omitted from JSON rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// ISO-8601 UTC instant, millisecond precision
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_name: Option<String>,
    /// Reserved; never populated by the builder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub host_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_widget_title: Option<String>,
}

impl Snapshot {
    /// Pretty JSON with 2-space indentation, keys in declaration order.
    pub fn to_pretty_json(&self) -> String {
        // Only strings and options of strings: serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

pub struct SessionSnapshotBuilder {
    host: HostInfo,
    tracker: Arc<dyn DocumentTracker>,
}

impl SessionSnapshotBuilder {
    pub fn new(host: HostInfo, tracker: Arc<dyn DocumentTracker>) -> Self {
        Self { host, tracker }
    }

    /// Read the host state as it is right now.
    pub fn current_session_info(&self) -> Snapshot {
        let current = self.tracker.current_document();

        let mut snapshot = Snapshot {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            notebook_path: None,
            kernel_id: None,
            kernel_name: None,
            kernel_state: None,
            session_name: None,
            user_id: None,
            host_version: self.host.version.clone(),
            active_widget_title: current.as_ref().map(|d| d.title()),
        };

        let Some(document) = current else {
            return snapshot;
        };

        // Plain concatenation: a missing separator is carried through as-is
        snapshot.notebook_path = Some(format!("{}{}", self.host.base_url, document.path()));

        if let Some(session) = document.session() {
            snapshot.session_name = Some(session.name);
            if let Some(kernel) = session.kernel {
                snapshot.kernel_id = Some(kernel.id);
                snapshot.kernel_name = Some(kernel.name);
                snapshot.kernel_state = Some(kernel.connection_status.to_string());
            }
        }

        snapshot
    }

    /// The current snapshot as pretty-printed JSON.
    pub fn formatted_session_info(&self) -> String {
        self.current_session_info().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{
        ConnectionStatus, KernelInfo, MemoryDocument, MemoryTracker, SessionHandle,
    };
    use chrono::DateTime;

    fn host(base_url: &str) -> HostInfo {
        HostInfo {
            version: "4.2.5".to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn open_active(tracker: &MemoryTracker, path: &str) -> Arc<MemoryDocument> {
        let doc = MemoryDocument::new(path);
        tracker.open(doc.clone());
        tracker.activate(Some(path));
        doc
    }

    fn connected_session() -> SessionHandle {
        SessionHandle {
            name: "analysis.ipynb".to_string(),
            kernel: Some(KernelInfo {
                id: "abc123".to_string(),
                name: "python3".to_string(),
                connection_status: ConnectionStatus::Connected,
            }),
        }
    }

    #[test]
    fn test_no_active_document() {
        let tracker = MemoryTracker::new();
        let builder = SessionSnapshotBuilder::new(host("http://localhost:8888/"), tracker);

        let start = Utc::now();
        let snapshot = builder.current_session_info();

        let parsed = DateTime::parse_from_rfc3339(&snapshot.timestamp).unwrap();
        assert!(parsed.timestamp_millis() >= start.timestamp_millis());
        assert_eq!(snapshot.host_version, "4.2.5");
        assert!(snapshot.notebook_path.is_none());
        assert!(snapshot.kernel_id.is_none());
        assert!(snapshot.kernel_name.is_none());
        assert!(snapshot.kernel_state.is_none());
        assert!(snapshot.session_name.is_none());
        assert!(snapshot.active_widget_title.is_none());

        let json: serde_json::Value =
            serde_json::from_str(&builder.formatted_session_info()).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(json.get("timestamp").is_some());
        assert_eq!(json["hostVersion"], "4.2.5");
    }

    #[test]
    fn test_document_without_session() {
        let tracker = MemoryTracker::new();
        open_active(&tracker, "proj/x.ipynb");
        let builder = SessionSnapshotBuilder::new(host("http://localhost:8888/"), tracker);

        let snapshot = builder.current_session_info();
        assert_eq!(
            snapshot.notebook_path.as_deref(),
            Some("http://localhost:8888/proj/x.ipynb")
        );
        assert_eq!(snapshot.active_widget_title.as_deref(), Some("x.ipynb"));
        assert!(snapshot.session_name.is_none());
        assert!(snapshot.kernel_id.is_none());
    }

    #[test]
    fn test_session_without_kernel() {
        let tracker = MemoryTracker::new();
        let doc = open_active(&tracker, "proj/x.ipynb");
        doc.set_session(Some(SessionHandle {
            name: "x.ipynb".to_string(),
            kernel: None,
        }));
        let builder = SessionSnapshotBuilder::new(host("http://localhost:8888/"), tracker);

        let snapshot = builder.current_session_info();
        assert_eq!(snapshot.session_name.as_deref(), Some("x.ipynb"));
        assert!(snapshot.kernel_id.is_none());
        assert!(snapshot.kernel_name.is_none());
        assert!(snapshot.kernel_state.is_none());
    }

    #[test]
    fn test_connected_kernel() {
        let tracker = MemoryTracker::new();
        let doc = open_active(&tracker, "proj/analysis.ipynb");
        doc.set_session(Some(connected_session()));
        let builder = SessionSnapshotBuilder::new(host("http://localhost:8888/"), tracker);

        let snapshot = builder.current_session_info();
        assert_eq!(
            snapshot.notebook_path.as_deref(),
            Some("http://localhost:8888/proj/analysis.ipynb")
        );
        assert_eq!(snapshot.kernel_id.as_deref(), Some("abc123"));
        assert_eq!(snapshot.kernel_name.as_deref(), Some("python3"));
        assert_eq!(snapshot.kernel_state.as_deref(), Some("connected"));
        assert_eq!(snapshot.session_name.as_deref(), Some("analysis.ipynb"));
        assert!(snapshot.user_id.is_none());
    }

    #[test]
    fn test_base_url_without_trailing_slash_is_not_corrected() {
        let tracker = MemoryTracker::new();
        open_active(&tracker, "proj/x.ipynb");
        let builder = SessionSnapshotBuilder::new(host("http://localhost:8888"), tracker);

        let snapshot = builder.current_session_info();
        assert_eq!(
            snapshot.notebook_path.as_deref(),
            Some("http://localhost:8888proj/x.ipynb")
        );
    }

    #[test]
    fn test_reads_fresh_state_each_call() {
        let tracker = MemoryTracker::new();
        let doc = open_active(&tracker, "proj/analysis.ipynb");
        let builder = SessionSnapshotBuilder::new(host("http://localhost:8888/"), tracker.clone());

        assert!(builder.current_session_info().kernel_id.is_none());

        doc.set_session(Some(connected_session()));
        assert_eq!(
            builder.current_session_info().kernel_id.as_deref(),
            Some("abc123")
        );

        tracker.activate(None);
        assert!(builder.current_session_info().notebook_path.is_none());
    }

    #[test]
    fn test_formatted_key_order_and_indent() {
        let snapshot = Snapshot {
            timestamp: "2026-10-18T09:41:07.123Z".to_string(),
            notebook_path: Some("http://localhost:8888/a.ipynb".to_string()),
            kernel_id: Some("abc123".to_string()),
            kernel_name: Some("python3".to_string()),
            kernel_state: Some("connected".to_string()),
            session_name: Some("a.ipynb".to_string()),
            user_id: Some("alice".to_string()),
            host_version: "4.2.5".to_string(),
            active_widget_title: Some("a.ipynb".to_string()),
        };

        let expected = r#"{
  "timestamp": "2026-10-18T09:41:07.123Z",
  "notebookPath": "http://localhost:8888/a.ipynb",
  "kernelId": "abc123",
  "kernelName": "python3",
  "kernelState": "connected",
  "sessionName": "a.ipynb",
  "userId": "alice",
  "hostVersion": "4.2.5",
  "activeWidgetTitle": "a.ipynb"
}"#;
        assert_eq!(snapshot.to_pretty_json(), expected);
        assert_eq!(snapshot.to_pretty_json(), snapshot.clone().to_pretty_json());
    }

    #[test]
    fn test_formatted_round_trip() {
        let tracker = MemoryTracker::new();
        let doc = open_active(&tracker, "proj/analysis.ipynb");
        doc.set_session(Some(connected_session()));
        let builder = SessionSnapshotBuilder::new(host("http://localhost:8888/"), tracker);

        let snapshot = builder.current_session_info();
        let parsed: Snapshot = serde_json::from_str(&snapshot.to_pretty_json()).unwrap();
        assert_eq!(parsed, snapshot);

        let parsed: Snapshot = serde_json::from_str(&builder.formatted_session_info()).unwrap();
        assert_eq!(parsed.kernel_id.as_deref(), Some("abc123"));
    }
}
