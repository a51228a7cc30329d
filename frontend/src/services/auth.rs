use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::session::Authenticator;
use async_trait::async_trait;
use hrms_shared::protocol::endpoints;
use hrms_shared::{
    ApiResponse, ChangePasswordRequest, LoginRequest, LoginResponse, SetInitialPasswordRequest,
};
use log::warn;

/// 认证服务
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<ApiResponse<LoginResponse>> {
        self.client.post(endpoints::AUTH_LOGIN, request).await
    }

    pub async fn logout(&self, token: &str) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.client
            .post_with_token(endpoints::AUTH_LOGOUT, token)
            .await
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.client
            .post(endpoints::AUTH_CHANGE_PASSWORD, request)
            .await
    }

    pub async fn set_initial_password(
        &self,
        request: &SetInitialPasswordRequest,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.client
            .post(endpoints::AUTH_SET_INITIAL_PASSWORD, request)
            .await
    }
}

#[async_trait(?Send)]
impl Authenticator for AuthService {
    async fn authenticate(&self, request: &LoginRequest) -> ApiResult<ApiResponse<LoginResponse>> {
        self.login(request).await
    }

    async fn sign_out(&self, token: &str) -> ApiResult<()> {
        let envelope = self.logout(token).await?;
        if !envelope.success {
            warn!("[Auth] Logout rejected by server: {}", envelope.message);
        }
        Ok(())
    }
}
