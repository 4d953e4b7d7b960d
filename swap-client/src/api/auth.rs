//! Account operations: login, registration, profile

use shared::client::{
    LoginRequest, LoginResponse, RegisterRequest, UpdatePasswordRequest, UpdateUserInfoRequest,
};
use shared::models::UserInfo;

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Authentication and account operations
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in and store the issued session (token + user, atomically).
    pub async fn login(&self, account: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            account: account.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.api.post("/api/user/login", &request).await?;
        self.api
            .session()
            .set_login(response.token.clone(), response.user.clone());
        tracing::debug!(username = %response.user.username, "logged in");
        Ok(response)
    }

    /// Register a new account. Registration does not log in; callers
    /// follow up with [`AuthService::login`].
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        self.api.post("/api/user/register", request).await
    }

    /// Fetch the current user and refresh the stored identity.
    pub async fn fetch_user_info(&self) -> ClientResult<UserInfo> {
        let user: UserInfo = self.api.get("/api/user/info").await?;
        self.api.session().set_user(Some(user.clone()));
        Ok(user)
    }

    /// Update the current user's profile.
    pub async fn update_user_info(&self, request: &UpdateUserInfoRequest) -> ClientResult<()> {
        self.api.put("/api/user/info", request).await
    }

    /// Change the login password.
    pub async fn update_password(&self, old_password: &str, new_password: &str) -> ClientResult<()> {
        let request = UpdatePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.api.put("/api/user/password", &request).await
    }

    /// Delete the account, then destroy the local session.
    pub async fn delete_account(&self) -> ClientResult<()> {
        self.api.delete::<()>("/api/user").await?;
        self.api.session().logout();
        Ok(())
    }

    /// Log out.
    ///
    /// The API has no logout endpoint; teardown is purely client-side and
    /// idempotent.
    pub fn logout(&self) {
        self.api.session().logout();
    }
}
