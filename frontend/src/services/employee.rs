use super::ResourceService;
use crate::error::ApiResult;
use hrms_shared::protocol::endpoints;
use hrms_shared::{ApiResponse, Employee};

impl ResourceService<Employee> {
    /// 当前登录用户自己的员工记录
    pub async fn me(&self) -> ApiResult<ApiResponse<Employee>> {
        self.client.get(endpoints::EMPLOYEE_ME, &[]).await
    }
}
