//! 测试辅助
//!
//! 组装内存会话、模拟传输与 API 客户端。

use crate::api::{ApiClient, MockTransport};
use crate::session::{KeyValueStore, MemoryStore, SessionStore};
use hrms_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY};
use std::rc::Rc;

pub const TEST_BASE_URL: &str = "https://hr.example.com/api/";
pub const TEST_TOKEN: &str = "header.payload.signature";

pub fn user_json(employee_id: i64, role: &str, must_change_password: bool) -> String {
    format!(
        r#"{{"employeeId":{},"email":"user{}@example.com","firstName":"Ayşe","lastName":"Yılmaz","role":"{}","mustChangePassword":{}}}"#,
        employee_id, employee_id, role, must_change_password
    )
}

/// 已登录（HR）的内存会话
pub fn signed_in_session() -> (SessionStore, Rc<MemoryStore>) {
    let storage = Rc::new(MemoryStore::new());
    storage.set(STORAGE_TOKEN_KEY, TEST_TOKEN);
    storage.set(STORAGE_USER_KEY, &user_json(1, "HR", false));
    (SessionStore::restore(storage.clone()), storage)
}

pub fn signed_out_session() -> (SessionStore, Rc<MemoryStore>) {
    let storage = Rc::new(MemoryStore::new());
    (SessionStore::restore(storage.clone()), storage)
}

pub fn client_with(session: &SessionStore) -> (ApiClient, Rc<MockTransport>) {
    let transport = Rc::new(MockTransport::new());
    let client = ApiClient::new(transport.clone(), TEST_BASE_URL, session.clone());
    (client, transport)
}

/// 构造一个分页响应体
pub fn page_body(items: &str, total: u64, page: u32, size: u32, total_pages: u32) -> String {
    format!(
        r#"{{"success":true,"message":"OK","data":{{"data":[{}],"total":{},"page":{},"size":{},"totalPages":{},"hasNext":{},"hasPrevious":{}}},"timestamp":"2024-05-01T09:00:00"}}"#,
        items,
        total,
        page,
        size,
        total_pages,
        page + 1 < total_pages,
        page > 0
    )
}
