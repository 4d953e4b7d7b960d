//! Request gateway
//!
//! Wraps every outbound call in a uniform request/response contract:
//! bearer attachment, envelope unwrapping, failure classification, and
//! authentication teardown.

use std::sync::Arc;

use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ApiResponse;

use crate::error::{ClientError, ClientResult};
use crate::event::{ClientEvent, EventBus, NoticeLevel};
use crate::http::transport::{ApiRequest, HttpTransport, RawReply};
use crate::session::SessionStore;

/// Notification shown when the session is torn down
const SESSION_EXPIRED_NOTICE: &str = "Session expired, please log in again";

/// Fallback notice when the server rejects without a message
const REQUEST_FAILED_NOTICE: &str = "Request failed";

/// The single outbound request gateway.
///
/// Every service method goes through here, so token attachment, envelope
/// unwrapping, and the authentication-failure reaction are identical for
/// all of them. Cloning is cheap and shares the session and event bus.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: SessionStore,
    events: EventBus,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: SessionStore, events: EventBus) -> Self {
        Self {
            transport,
            session,
            events,
        }
    }

    /// The session this gateway reads tokens from (and tears down)
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The bus UI-facing events are emitted on
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// GET without query parameters
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch(Method::GET, path, None, None).await
    }

    /// GET with typed query parameters
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.dispatch(Method::GET, path, encode_query(query)?, None)
            .await
    }

    /// POST with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.dispatch(Method::POST, path, None, Some(body)).await
    }

    /// POST without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch(Method::POST, path, None, None).await
    }

    /// PUT with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.dispatch(Method::PUT, path, None, Some(body)).await
    }

    /// PUT without body
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch(Method::PUT, path, None, None).await
    }

    /// PUT with typed query parameters and no body
    pub async fn put_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.dispatch(Method::PUT, path, encode_query(query)?, None)
            .await
    }

    /// DELETE
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch(Method::DELETE, path, None, None).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<String>,
        body: Option<Value>,
    ) -> ClientResult<T> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query,
            body,
            token: self.session.token(),
        };

        let reply = match self.transport.execute(request).await {
            Ok(reply) => reply,
            Err(err) => {
                // no response received; the session is left untouched
                self.events.notice(NoticeLevel::Error, err.to_string());
                return Err(err);
            }
        };

        self.unwrap_reply(reply)
    }

    fn unwrap_reply<T: DeserializeOwned>(&self, reply: RawReply) -> ClientResult<T> {
        if reply.status == StatusCode::UNAUTHORIZED {
            return Err(self.expire_session());
        }

        let envelope: ApiResponse<Value> = match serde_json::from_slice(&reply.body) {
            Ok(envelope) => envelope,
            Err(err) if reply.status.is_success() => {
                return Err(ClientError::InvalidResponse(err.to_string()));
            }
            Err(_) => {
                // non-envelope error body, fall back to the transport status
                let text = String::from_utf8_lossy(&reply.body).into_owned();
                let err = ClientError::from_status(reply.status, text);
                self.events.notice(NoticeLevel::Error, err.to_string());
                return Err(err);
            }
        };

        if envelope.is_success() {
            // void replies carry `data: null`, which deserializes into `()`
            let data = envelope.data.unwrap_or(Value::Null);
            return serde_json::from_value(data)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()));
        }

        if envelope.code == 401 {
            return Err(self.expire_session());
        }

        let message = if envelope.message.is_empty() {
            REQUEST_FAILED_NOTICE.to_string()
        } else {
            envelope.message
        };
        tracing::debug!(code = envelope.code, message = %message, "api call rejected");
        self.events.notice(NoticeLevel::Error, message.clone());
        Err(ClientError::from_envelope(envelope.code, message))
    }

    /// Authentication failure: tear the session down exactly once.
    ///
    /// Concurrent in-flight requests may all fail at the same time; only
    /// the call that actually empties the session emits the redirect
    /// signal and the notice. Teardown of an already-empty session is a
    /// no-op, so repeated triggers are harmless.
    fn expire_session(&self) -> ClientError {
        if self.session.clear() {
            tracing::warn!("authentication failure, session cleared");
            self.events.notice(NoticeLevel::Error, SESSION_EXPIRED_NOTICE);
            self.events.emit(ClientEvent::SessionExpired);
        }
        ClientError::Authentication(SESSION_EXPIRED_NOTICE.to_string())
    }
}

fn encode_query<Q: Serialize>(query: &Q) -> ClientResult<Option<String>> {
    let encoded = serde_urlencoded::to_string(query)
        .map_err(|e| ClientError::Internal(format!("failed to encode query: {e}")))?;
    Ok((!encoded.is_empty()).then_some(encoded))
}
