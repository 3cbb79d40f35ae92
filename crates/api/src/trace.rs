//! Agent trace events shown in the client's trace panel.

use serde::Serialize;

/// Name reported by the annotation-intent agent.
pub const INTENT_LENS_AGENT: &str = "IntentLens";

/// Lifecycle stage of an agent trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStatus {
    Started,
    Completed,
    Error,
}

/// One entry of an agent's trace timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEvent {
    pub agent: &'static str,
    pub status: TraceStatus,
    pub message: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TraceEvent {
    /// Create an event stamped with the current time.
    pub fn now(agent: &'static str, status: TraceStatus, message: impl Into<String>) -> Self {
        Self {
            agent,
            status,
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
