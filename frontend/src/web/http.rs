//! HTTP 传输模块
//!
//! 使用 `web_sys::fetch` 实现 `HttpTransport`，替代 `gloo-net`。
//! 请求 future 被丢弃时（列表控制器取消旧请求、组件卸载）
//! 通过 `AbortController` 同时中止底层 fetch。

use crate::api::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

/// drop 时中止 fetch
struct AbortOnDrop {
    controller: Option<AbortController>,
}

impl AbortOnDrop {
    fn new() -> Self {
        Self {
            controller: AbortController::new().ok(),
        }
    }

    fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.controller.as_ref().map(AbortController::signal)
    }

    /// 请求已完成，不再需要中止
    fn disarm(mut self) {
        self.controller = None;
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.abort();
        }
    }
}

/// 浏览器异常只写日志，给用户的是固定文案
fn network_error(message: &'static str) -> impl FnOnce(JsValue) -> ApiError {
    move |raw| describe_failure(message, &raw)
}

fn describe_failure(message: &'static str, raw: &dyn Debug) -> ApiError {
    warn!("[Http] {}: {:?}", message, raw);
    ApiError::Network(message.to_string())
}

/// 基于浏览器 fetch 的传输层
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTransport;

impl BrowserTransport {
    pub fn new() -> Self {
        Self
    }

    fn build_request(req: &HttpRequest, guard: &AbortOnDrop) -> ApiResult<Request> {
        let headers = Headers::new()
            .map_err(network_error("Could not prepare the request"))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(network_error("Could not prepare the request"))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }
        if let Some(signal) = guard.signal() {
            opts.set_signal(Some(&signal));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(network_error("Could not prepare the request"))
    }

    async fn read_text(response: &Response) -> ApiResult<String> {
        let promise = response
            .text()
            .map_err(network_error("The response could not be read"))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(network_error("The response could not be read"))?;

        text.as_string()
            .ok_or_else(|| ApiError::Decode("Response body is not text".to_string()))
    }
}

#[async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let guard = AbortOnDrop::new();
        let request = Self::build_request(&req, &guard)?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Network("No window object available".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network_error("Could not reach the server"))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(network_error("Unexpected response from the browser"))?;

        let body = Self::read_text(&response).await?;
        guard.disarm();

        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_hides_raw_error() {
        let error = describe_failure(
            "Could not reach the server",
            &"JsValue(TypeError: Failed to fetch)",
        );
        assert_eq!(error.to_string(), "Network error: Could not reach the server");
        assert!(!error.to_string().contains("JsValue"));
    }
}
