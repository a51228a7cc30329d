//! HRMS 前后端共享的传输类型与纯逻辑
//!
//! 本 crate 不依赖浏览器 API，所有内容都可以在宿主机上直接测试：
//! - `model`: 与后端 DTO 一一对应的视图模型
//! - `envelope`: 统一响应信封与分页载荷
//! - `query`: 列表视图的搜索 / 过滤 / 排序 / 分页状态及其查询串编码
//! - `protocol`: 资源端点定义
//! - `validation`: 提交前的表单校验

pub mod date;
pub mod envelope;
pub mod model;
pub mod protocol;
pub mod query;
pub mod validation;

pub use envelope::{ApiResponse, Page};
pub use model::*;
pub use protocol::{HttpMethod, Resource};
pub use query::{ListQuery, SortDirection};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存 bearer token 的键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// LocalStorage 中保存会话身份 JSON 的键
pub const STORAGE_USER_KEY: &str = "user";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_ACCEPT: &str = "Accept";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 列表视图默认每页条数
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 后端要求始终存在的过滤命名空间前缀
pub const FILTER_PREFIX: &str = "filterRequest.";
