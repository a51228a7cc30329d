//! 响应信封模块
//!
//! 后端所有响应都包裹在 `{ success, message, data, timestamp }` 中。
//! 非成功的信封是一个值而不是错误，调用方必须显式检查 `success`。

use serde::{Deserialize, Serialize};

/// 统一响应信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// 构造成功信封
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data: Some(data),
            timestamp: String::new(),
        }
    }

    /// 构造失败信封
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            timestamp: String::new(),
        }
    }

    /// 不带数据的成功信封（例如 204 或空响应体）
    pub fn empty() -> Self {
        Self {
            success: true,
            message: String::new(),
            data: None,
            timestamp: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// 拆出数据
    ///
    /// - `success == false` 时返回信封消息
    /// - 成功但缺少数据时返回说明性消息
    pub fn into_result(self) -> Result<T, String> {
        if !self.success {
            return Err(self.message);
        }
        self.data
            .ok_or_else(|| "Response did not contain any data".to_string())
    }

    /// 仅关心是否成功的调用（如删除）
    pub fn into_unit(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.message)
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            timestamp: self.timestamp,
        }
    }
}

/// 分页载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    /// 从 0 开始的页码
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 最后一个有效页码；没有任何数据时为 0
    pub fn last_page(&self) -> u32 {
        self.total_pages.saturating_sub(1)
    }

    /// 分页不变量：`data.len() <= size`，且有数据时 `page < total_pages`
    ///
    /// `total_pages` 以后端计算为准，这里只检查两者是否自洽。
    pub fn is_consistent(&self) -> bool {
        if self.data.len() as u64 > u64::from(self.size) {
            return false;
        }
        if self.total > 0 && self.page >= self.total_pages {
            return false;
        }
        if self.size > 0 {
            let expected = self.total.div_ceil(u64::from(self.size));
            if expected != u64::from(self.total_pages) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_envelope_with_page() {
        let body = r#"{
            "success": true,
            "message": "OK",
            "data": {
                "data": [1, 2, 3],
                "total": 13,
                "page": 1,
                "size": 3,
                "totalPages": 5,
                "hasNext": true,
                "hasPrevious": true
            },
            "timestamp": "2024-05-01T10:00:00"
        }"#;

        let envelope: ApiResponse<Page<i32>> = serde_json::from_str(body).unwrap();
        assert!(envelope.success);
        let page = envelope.into_result().unwrap();
        assert_eq!(page.data, vec![1, 2, 3]);
        assert_eq!(page.total_pages, 5);
        assert!(page.has_next);
        assert!(page.is_consistent());
    }

    #[test]
    fn test_failure_envelope_without_data() {
        let body = r#"{"success": false, "message": "Department not found"}"#;
        let envelope: ApiResponse<Page<i32>> = serde_json::from_str(body).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.timestamp, "");
        assert_eq!(
            envelope.into_result().unwrap_err(),
            "Department not found".to_string()
        );
    }

    #[test]
    fn test_success_without_data_is_reported() {
        let envelope: ApiResponse<i32> = ApiResponse::empty();
        assert!(envelope.clone().into_unit().is_ok());
        assert!(envelope.into_result().is_err());
    }

    #[test]
    fn test_empty_page_is_consistent() {
        let body = r#"{"data": [], "total": 0, "page": 0, "size": 10, "totalPages": 0}"#;
        let page: Page<i32> = serde_json::from_str(body).unwrap();
        assert!(page.is_empty());
        assert!(page.is_consistent());
        assert_eq!(page.last_page(), 0);
    }

    #[test]
    fn test_inconsistent_pages_are_flagged() {
        let mut page = Page {
            data: vec![1, 2, 3],
            total: 3,
            page: 0,
            size: 2,
            total_pages: 2,
            has_next: true,
            has_previous: false,
        };
        // 条数超过 size
        assert!(!page.is_consistent());

        page.data = vec![1, 2];
        page.page = 2;
        // 页码越界
        assert!(!page.is_consistent());

        page.page = 1;
        page.total_pages = 7;
        // total_pages 与 total/size 不符
        assert!(!page.is_consistent());
    }
}
