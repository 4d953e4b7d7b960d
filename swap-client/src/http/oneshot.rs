//! Oneshot transport - in-memory calls against an axum Router
//!
//! Uses Tower's oneshot pattern to drive a Router directly, for
//! same-process server-client communication with zero network overhead.
//! Integration tests and local demos run the whole gateway through this.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::error::{ClientError, ClientResult};
use crate::http::transport::{ApiRequest, HttpTransport, RawReply};

/// Oneshot transport (in-memory calls)
#[derive(Debug, Clone)]
pub struct OneshotTransport {
    router: Arc<RwLock<Router>>,
}

impl OneshotTransport {
    /// Create a transport over an already-initialized Router
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(RwLock::new(router)),
        }
    }
}

#[async_trait]
impl HttpTransport for OneshotTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<RawReply> {
        let uri = match &request.query {
            Some(query) => format!("{}?{}", request.path, query),
            None => request.path.clone(),
        };

        let mut builder = Request::builder().method(request.method).uri(uri);
        if let Some(token) = &request.token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match &request.body {
            Some(value) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(value)?)
            }
            None => Body::empty(),
        };

        let req = builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("failed to build request: {e}")))?;

        let router = self.router.read().await.clone();
        let response = router
            .oneshot(req)
            .await
            .map_err(|e| ClientError::Internal(format!("oneshot call failed: {e}")))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(RawReply { status, body })
    }
}
