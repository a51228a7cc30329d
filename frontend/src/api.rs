//! API 客户端
//!
//! 负责：
//! - 拼接 URL 与查询串
//! - 会话存在时自动附加 `Authorization: Bearer <token>`
//! - 区分响应信封（返回值）与传输层失败（`ApiError`）
//! - 集中处理 401：清除本地会话，路由服务随后重定向到登录页

use crate::error::{ApiError, ApiResult, extract_error_message};
use crate::session::SessionStore;
use async_trait::async_trait;
use hrms_shared::query::encode_pairs;
use hrms_shared::{
    ApiResponse, CONTENT_TYPE_JSON, HEADER_ACCEPT, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE,
    HttpMethod,
};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::rc::Rc;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;

#[cfg(test)]
mod tests;

const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 底层传输（浏览器中为 fetch）
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// ApiClient
// =========================================================

/// 带会话的 REST 客户端
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn HttpTransport>, base_url: &str, session: SessionStore) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str, query: &str) -> String {
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiResult<ApiResponse<R>> {
        self.execute(HttpMethod::Get, path, query, None, self.session.token())
            .await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> ApiResult<ApiResponse<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_string(body)?;
        self.execute(HttpMethod::Post, path, &[], Some(body), self.session.token())
            .await
    }

    /// 无请求体的 POST（如签到）
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<R>> {
        self.execute(HttpMethod::Post, path, &[], None, self.session.token())
            .await
    }

    /// 使用显式 token 的 POST（注销时本地会话已清除）
    pub async fn post_with_token<R: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> ApiResult<ApiResponse<R>> {
        self.execute(HttpMethod::Post, path, &[], None, Some(token.to_string()))
            .await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> ApiResult<ApiResponse<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_string(body)?;
        self.execute(HttpMethod::Put, path, &[], Some(body), self.session.token())
            .await
    }

    pub async fn patch_empty<R: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<R>> {
        self.execute(HttpMethod::Patch, path, &[], None, self.session.token())
            .await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<R>> {
        self.execute(HttpMethod::Delete, path, &[], None, self.session.token())
            .await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
        token: Option<String>,
    ) -> ApiResult<ApiResponse<R>> {
        let url = self.url(path, &encode_pairs(query));
        let mut req =
            HttpRequest::new(&url, method).with_header(HEADER_ACCEPT, CONTENT_TYPE_JSON);

        if let Some(body) = body {
            req = req
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(body);
        }
        if let Some(token) = &token {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        debug!("[Api] {} {}", method.as_str(), path);
        let resp = self.transport.send(req).await.inspect_err(|e| {
            warn!("[Api] {} {} failed: {}", method.as_str(), path, e);
        })?;

        if resp.status == 401 {
            if let Some(token) = token {
                return Err(self.unauthorized(&token, &resp));
            }
        }

        decode_response(resp)
    }

    /// 401：清除本地会话（仅当 token 仍是当前会话的 token）
    fn unauthorized(&self, token: &str, resp: &HttpResponse) -> ApiError {
        if self.session.token().as_deref() == Some(token) {
            self.session.expire();
        }

        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&resp.body)
            .ok()
            .map(|env| env.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string());
        ApiError::Unauthorized(message)
    }
}

/// 解析响应体
///
/// - 可解析的信封无论状态码都作为返回值
/// - 2xx 空响应体视为不带数据的成功
/// - 其余情况转换为 `ApiError`
fn decode_response<R: DeserializeOwned>(resp: HttpResponse) -> ApiResult<ApiResponse<R>> {
    if resp.body.trim().is_empty() {
        return if resp.is_success() {
            Ok(ApiResponse::empty())
        } else {
            Err(ApiError::Status {
                status: resp.status,
                message: extract_error_message(&resp.body),
            })
        };
    }

    match serde_json::from_str::<ApiResponse<R>>(&resp.body) {
        Ok(envelope) => Ok(envelope),
        Err(e) => {
            // 失败信封的 data 形状可能与 R 不同（例如字段错误表）
            if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&resp.body)
            {
                if !envelope.success {
                    return Ok(ApiResponse {
                        success: false,
                        message: envelope.message,
                        data: None,
                        timestamp: envelope.timestamp,
                    });
                }
            }

            if resp.is_success() {
                Err(ApiError::Decode(e.to_string()))
            } else {
                Err(ApiError::Status {
                    status: resp.status,
                    message: extract_error_message(&resp.body),
                })
            }
        }
    }
}

// =========================================================
// Mock Transport
// =========================================================

#[cfg(test)]
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: RefCell<VecDeque<ApiResult<HttpResponse>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_error(&self, err: ApiError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[cfg(test)]
#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(req);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no mock response queued".to_string())))
    }
}
