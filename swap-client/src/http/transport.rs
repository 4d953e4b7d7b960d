//! Transport seam between the gateway and the wire

use async_trait::async_trait;
use http::{Method, StatusCode};

use crate::error::ClientResult;

/// A fully-assembled outbound request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// URL-encoded query string, without the leading `?`
    pub query: Option<String>,
    /// JSON body
    pub body: Option<serde_json::Value>,
    /// Bearer credential, attached when a session token is present
    pub token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            token: None,
        }
    }
}

/// The raw reply a transport hands back to the gateway
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// HTTP transport trait
///
/// Implementations only move bytes. Envelope handling and session policy
/// live in the gateway, so every transport gets identical semantics.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ClientResult<RawReply>;
}
