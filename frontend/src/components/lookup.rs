//! 表单下拉框的关联记录（员工、部门、职位）

use crate::auth::use_auth;
use hrms_shared::{ApiResponse, Department, Employee, ListQuery, Position, Resource, SortDirection};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

/// 下拉框一次最多加载的条数
const LOOKUP_PAGE_SIZE: u32 = 200;

/// 加载某个资源的 (id, 显示名) 列表
///
/// 加载失败时下拉框保持为空，只记录警告，不打断表单。
pub fn use_options<R>(sort_by: &'static str, label: fn(&R) -> String) -> Signal<Vec<(String, String)>>
where
    R: Resource + Send + Sync,
{
    let auth = use_auth();
    let options = RwSignal::new(Vec::new());

    spawn_local(async move {
        let query = ListQuery::new(LOOKUP_PAGE_SIZE).with_sort(sort_by, SortDirection::Asc);
        let service = auth.services().resource::<R>();
        match service.list(&query).await.map(ApiResponse::into_result) {
            Ok(Ok(page)) => options.set(
                page.data
                    .iter()
                    .map(|item| (item.id().to_string(), label(item)))
                    .collect(),
            ),
            Ok(Err(message)) => warn!("[Lookup] {} options rejected: {}", R::NAME, message),
            Err(e) => warn!("[Lookup] {} options failed: {}", R::NAME, e),
        }
    });

    options.into()
}

pub fn employee_options() -> Signal<Vec<(String, String)>> {
    use_options::<Employee>("lastName", Employee::full_name)
}

pub fn department_options() -> Signal<Vec<(String, String)>> {
    use_options::<Department>("name", |d| d.name.clone())
}

pub fn position_options() -> Signal<Vec<(String, String)>> {
    use_options::<Position>("title", |p| p.title.clone())
}

/// 下拉框的值 -> 可选 id
pub fn selected_id(value: &str) -> Option<hrms_shared::Id> {
    value.trim().parse().ok().filter(|id| *id > 0)
}

/// 可选 id -> 下拉框的值
pub fn id_value(id: Option<hrms_shared::Id>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}
