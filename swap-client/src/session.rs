//! Session store
//!
//! Holds the current authentication token and user identity for the whole
//! process. The session is persisted to two durable entries under fixed
//! keys so it survives restarts; memory and disk are updated together on
//! every mutation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use shared::models::{UserInfo, UserRole};
use thiserror::Error;

/// Durable key for the bearer token
const TOKEN_KEY: &str = "token";
/// Durable key for the serialized user identity
const USER_KEY: &str = "user.json";
/// Subdirectory holding the session entries: `{data_dir}/auth/`
const AUTH_DIR: &str = "auth";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserInfo>,
}

#[derive(Debug)]
struct Inner {
    /// `None` disables persistence (ephemeral store)
    dir: Option<PathBuf>,
    state: Mutex<SessionState>,
}

/// Process-wide session store.
///
/// Cloning yields another handle to the same session. Mutations are
/// synchronous and immediately visible to every handle; writes are
/// last-write-wins, and destroying the session is idempotent.
///
/// Invariant: a clear never leaves a token without a user or a user
/// without a token (clearing either side clears both). Fresh sessions are
/// issued atomically through [`SessionStore::set_login`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Open the store persisted under `data_dir`, rehydrating any cached
    /// session.
    ///
    /// A half-written pair (a lone token or lone user entry) and sessions
    /// whose JWT `exp` has already passed are discarded.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, SessionStoreError> {
        let dir = data_dir.as_ref().join(AUTH_DIR);
        std::fs::create_dir_all(&dir)?;

        let token_path = dir.join(TOKEN_KEY);
        let user_path = dir.join(USER_KEY);

        let mut state = SessionState::default();
        if token_path.exists() && user_path.exists() {
            let token = std::fs::read_to_string(&token_path)?.trim().to_string();
            match serde_json::from_str::<UserInfo>(&std::fs::read_to_string(&user_path)?) {
                Ok(user) if !token.is_empty() => {
                    if jwt_is_expired(&token) {
                        tracing::info!(username = %user.username, "cached session expired, discarding");
                    } else {
                        tracing::debug!(username = %user.username, "loaded cached session");
                        state.token = Some(token);
                        state.user = Some(user);
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!("discarding unreadable session entry: {err}");
                }
            }
        }

        if state.token.is_none() {
            let _ = remove_if_exists(&token_path);
            let _ = remove_if_exists(&user_path);
        }

        Ok(Self {
            inner: Arc::new(Inner {
                dir: Some(dir),
                state: Mutex::new(state),
            }),
        })
    }

    /// Create a store with persistence disabled.
    pub fn ephemeral() -> Self {
        Self {
            inner: Arc::new(Inner {
                dir: None,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.state().token.clone()
    }

    /// Current user identity, if any
    pub fn user(&self) -> Option<UserInfo> {
        self.state().user.clone()
    }

    /// Whether a session is present
    pub fn is_authenticated(&self) -> bool {
        self.state().token.is_some()
    }

    /// Derived role; defaults to the least-privileged role when logged out
    pub fn role(&self) -> UserRole {
        self.state()
            .user
            .as_ref()
            .map(|user| user.role)
            .unwrap_or_default()
    }

    /// Replace the token. `None` destroys the whole session.
    ///
    /// The token is opaque to the client; no format validation happens here.
    pub fn set_token(&self, value: Option<String>) {
        match value {
            Some(token) => {
                let mut state = self.state();
                state.token = Some(token.clone());
                self.persist_token(Some(&token));
            }
            None => {
                self.clear();
            }
        }
    }

    /// Replace the user identity. `None` destroys the whole session.
    pub fn set_user(&self, value: Option<UserInfo>) {
        match value {
            Some(user) => {
                let mut state = self.state();
                state.user = Some(user.clone());
                self.persist_user(Some(&user));
            }
            None => {
                self.clear();
            }
        }
    }

    /// Atomically issue a fresh session after a successful login.
    pub fn set_login(&self, token: impl Into<String>, user: UserInfo) {
        let token = token.into();
        let mut state = self.state();
        state.token = Some(token.clone());
        state.user = Some(user.clone());
        self.persist_token(Some(&token));
        self.persist_user(Some(&user));
    }

    /// Destroy the session. Idempotent: a second call is a no-op.
    pub fn logout(&self) {
        self.clear();
    }

    /// Destroy the session, reporting whether anything was actually cleared.
    ///
    /// The request gateway uses the return value as its exactly-once
    /// trigger when concurrent in-flight requests all hit an
    /// authentication failure.
    pub(crate) fn clear(&self) -> bool {
        let mut state = self.state();
        if state.token.is_none() && state.user.is_none() {
            return false;
        }
        state.token = None;
        state.user = None;
        self.persist_token(None);
        self.persist_user(None);
        tracing::debug!("session cleared");
        true
    }

    fn persist_token(&self, token: Option<&str>) {
        let Some(dir) = &self.inner.dir else { return };
        let path = dir.join(TOKEN_KEY);
        let result = match token {
            Some(value) => std::fs::write(&path, value),
            None => remove_if_exists(&path),
        };
        if let Err(err) = result {
            tracing::warn!("failed to persist session token: {err}");
        }
    }

    fn persist_user(&self, user: Option<&UserInfo>) {
        let Some(dir) = &self.inner.dir else { return };
        let path = dir.join(USER_KEY);
        let result = match user {
            Some(value) => serde_json::to_string_pretty(value)
                .map_err(std::io::Error::other)
                .and_then(|content| std::fs::write(&path, content)),
            None => remove_if_exists(&path),
        };
        if let Err(err) = result {
            tracing::warn!("failed to persist session user: {err}");
        }
    }
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

/// Extract the `exp` claim (Unix seconds) from a JWT without verifying it.
///
/// Returns `None` for tokens that are not JWTs; those never expire locally.
pub fn parse_jwt_exp(token: &str) -> Option<u64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload).ok()?;
    payload.get("exp")?.as_u64()
}

fn jwt_is_expired(token: &str) -> bool {
    match parse_jwt_exp(token) {
        Some(exp) => now_secs() > exp,
        None => false,
    }
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
