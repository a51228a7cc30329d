//! 传输层错误
//!
//! 只有无法得到合法响应信封的情况才会成为 `ApiError`；
//! `success: false` 的信封是正常返回值。

use thiserror::Error;

/// 无法从响应中提取消息时使用的兜底文案
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 网络不可达、请求被浏览器拒绝等
    #[error("Network error: {0}")]
    Network(String),

    /// 非 2xx 且响应体不是合法信封
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx 但响应体无法解析
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// 携带 token 的请求返回 401，本地会话已被清除
    #[error("{0}")]
    Unauthorized(String),

    /// 请求体序列化失败
    #[error("Could not encode request: {0}")]
    Serialization(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// 展示给用户的消息
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Serialization(e.to_string())
    }
}

/// 从非信封的错误响应体中尽力提取消息
///
/// 依次尝试 JSON 的 `message` / `error` 字段，最后使用兜底文案。
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"].iter().find_map(|key| {
                v.get(key)
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.trim().is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_field() {
        assert_eq!(
            extract_error_message(r#"{"message": "Email already in use"}"#),
            "Email already in use"
        );
        assert_eq!(
            extract_error_message(r#"{"status": 500, "error": "Internal Server Error"}"#),
            "Internal Server Error"
        );
    }

    #[test]
    fn test_extract_falls_back_to_generic() {
        assert_eq!(extract_error_message("<html>502</html>"), GENERIC_ERROR_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message": ""}"#), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_status_display_is_message() {
        let err = ApiError::Status {
            status: 409,
            message: "Department name already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Department name already exists");
        assert_eq!(err.status(), Some(409));
    }
}
