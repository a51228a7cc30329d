//! 资源服务
//!
//! 每种实体一个服务，把列表视图的查询意图翻译成后端的查询串约定，
//! 并把响应原样以信封返回。调用方必须检查 `success`。

use crate::api::ApiClient;
use crate::error::ApiResult;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use hrms_shared::protocol::Writable;
use hrms_shared::{
    Announcement, ApiResponse, Attendance, Department, Employee, Id, LeaveRequest, ListQuery,
    Notification, Page, PerformanceReview, Position, Resource, Salary,
};
use log::debug;
use std::marker::PhantomData;
use std::rc::Rc;

mod attendance;
mod auth;
mod dashboard;
mod employee;
mod leave;
mod notification;

#[cfg(test)]
mod tests;

pub use auth::AuthService;
pub use dashboard::DashboardService;

/// 列表控制器使用的取数函数
pub type FetchFuture<T> = LocalBoxFuture<'static, ApiResult<ApiResponse<Page<T>>>>;
pub type PageFetcher<T> = Rc<dyn Fn(ListQuery) -> FetchFuture<T>>;

/// 通用 REST 资源服务
pub struct ResourceService<R> {
    client: ApiClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    /// 分页列表
    pub async fn list(&self, query: &ListQuery) -> ApiResult<ApiResponse<Page<R>>> {
        self.list_at(R::PATH, query).await
    }

    /// 指定路径的分页列表（如“我的请假”）
    pub(crate) async fn list_at(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ApiResult<ApiResponse<Page<R>>> {
        debug!("[Service] list {} page={}", R::NAME, query.page);
        self.client.get(path, &query.to_query_pairs()).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<ApiResponse<R>> {
        self.client.get(&R::item_path(id), &[]).await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<ApiResponse<()>> {
        debug!("[Service] delete {} #{}", R::NAME, id);
        let envelope: ApiResponse<serde_json::Value> =
            self.client.delete(&R::item_path(id)).await?;
        Ok(envelope.map(|_| ()))
    }

    /// 列表控制器的取数函数
    pub fn page_source(&self) -> PageFetcher<R> {
        self.page_source_at(R::PATH)
    }

    pub(crate) fn page_source_at(&self, path: &'static str) -> PageFetcher<R> {
        let service = self.clone();
        Rc::new(move |query: ListQuery| {
            let service = service.clone();
            async move { service.list_at(path, &query).await }.boxed_local()
        })
    }
}

impl<R: Writable> ResourceService<R> {
    pub async fn create(&self, request: &R::Request) -> ApiResult<ApiResponse<R>> {
        debug!("[Service] create {}", R::NAME);
        self.client.post(R::PATH, request).await
    }

    pub async fn update(&self, id: Id, request: &R::Request) -> ApiResult<ApiResponse<R>> {
        debug!("[Service] update {} #{}", R::NAME, id);
        self.client.put(&R::item_path(id), request).await
    }
}

/// 所有服务的集合，共享同一个 `ApiClient`
#[derive(Clone)]
pub struct Services {
    client: ApiClient,
    pub auth: AuthService,
    pub employees: ResourceService<Employee>,
    pub departments: ResourceService<Department>,
    pub positions: ResourceService<Position>,
    pub leaves: ResourceService<LeaveRequest>,
    pub salaries: ResourceService<Salary>,
    pub performance: ResourceService<PerformanceReview>,
    pub attendance: ResourceService<Attendance>,
    pub announcements: ResourceService<Announcement>,
    pub notifications: ResourceService<Notification>,
    pub dashboard: DashboardService,
}

impl Services {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthService::new(client.clone()),
            employees: ResourceService::new(client.clone()),
            departments: ResourceService::new(client.clone()),
            positions: ResourceService::new(client.clone()),
            leaves: ResourceService::new(client.clone()),
            salaries: ResourceService::new(client.clone()),
            performance: ResourceService::new(client.clone()),
            attendance: ResourceService::new(client.clone()),
            announcements: ResourceService::new(client.clone()),
            notifications: ResourceService::new(client.clone()),
            dashboard: DashboardService::new(client.clone()),
            client,
        }
    }

    /// 按类型取得资源服务（供通用列表 / 表单组件使用）
    pub fn resource<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(self.client.clone())
    }
}
