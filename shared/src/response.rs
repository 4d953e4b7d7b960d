//! API response types
//!
//! Standardized response structures shared by every marketplace endpoint.

use serde::{Deserialize, Serialize};

/// Envelope code the backend's result helper emits on success.
pub const API_CODE_OK: i32 = 0;

/// Legacy success code still emitted by several endpoints.
pub const API_CODE_OK_LEGACY: i32 = 200;

/// Unified response envelope
///
/// All API responses follow this format:
/// ```json
/// {
///     "code": 0,
///     "message": "success",
///     "data": { ... },
///     "traceId": "7f3b..."
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Response code (`0` or `200` = success, others = error codes)
    pub code: i32,
    /// Human-readable message (absent on a few legacy endpoints)
    #[serde(default)]
    pub message: String,
    /// Response payload (absent on errors and void replies)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Request trace ID for debugging (server-assigned)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: API_CODE_OK,
            message: "success".to_string(),
            data: Some(data),
            trace_id: None,
        }
    }

    /// Create a successful response without payload
    pub fn ok_empty() -> Self {
        Self {
            code: API_CODE_OK,
            message: "success".to_string(),
            data: None,
            trace_id: None,
        }
    }

    /// Create an error response
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            trace_id: None,
        }
    }

    /// Whether the envelope code encodes success.
    ///
    /// The backend emits `0` from its common result helper while several
    /// endpoints still reply `200`; both encodings must be accepted.
    pub fn is_success(&self) -> bool {
        self.code == API_CODE_OK || self.code == API_CODE_OK_LEGACY
    }

    /// Add a trace ID to the response
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Items on this page
    pub list: Vec<T>,
    /// Total number of matching items
    pub total: i64,
    /// Current page number (1-based)
    pub page_num: i32,
    /// Items per page
    pub page_size: i32,
}

impl<T> PageResult<T> {
    /// Create a new page
    pub fn new(list: Vec<T>, total: i64, page_num: i32, page_size: i32) -> Self {
        Self {
            list,
            total,
            page_num,
            page_size,
        }
    }
}
