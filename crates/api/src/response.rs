//! Shared response envelope types for API handlers.
//!
//! Catalog endpoints use the `{ "data": ... }` envelope ([`DataResponse`]).
//! Agent endpoints additionally report their trace events and use
//! [`AgentResponse`], or [`AgentFailure`] when the agent run fails.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::trace::TraceEvent;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "success": true, "output": T, "traces": [...] }` envelope returned by
/// agent endpoints, so the client can render the agent's trace timeline next
/// to its output.
#[derive(Debug, Serialize)]
pub struct AgentResponse<T: Serialize> {
    pub success: bool,
    pub output: T,
    pub traces: Vec<TraceEvent>,
}

impl<T: Serialize> AgentResponse<T> {
    pub fn success(output: T, traces: Vec<TraceEvent>) -> Self {
        Self {
            success: true,
            output,
            traces,
        }
    }
}

/// `{ "success": false, "error", "code", "traces": [...] }` returned when an
/// agent run fails after it started, so the trace timeline ends with the
/// error event instead of being dropped.
///
/// Sent with the status of the underlying [`AppError`].
#[derive(Debug, Serialize)]
pub struct AgentFailure {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
    pub traces: Vec<TraceEvent>,
    #[serde(skip)]
    status: StatusCode,
}

impl AgentFailure {
    pub fn new(err: &AppError, traces: Vec<TraceEvent>) -> Self {
        let (status, code, error) = err.parts();
        Self {
            success: false,
            error,
            code,
            traces,
            status,
        }
    }
}

impl IntoResponse for AgentFailure {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
