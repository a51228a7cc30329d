use crate::api::ApiClient;
use crate::error::ApiResult;
use hrms_shared::protocol::endpoints;
use hrms_shared::{ApiResponse, DashboardStats};

#[derive(Clone)]
pub struct DashboardService {
    client: ApiClient,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> ApiResult<ApiResponse<DashboardStats>> {
        self.client.get(endpoints::DASHBOARD_STATS, &[]).await
    }
}
