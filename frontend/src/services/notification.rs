use super::ResourceService;
use crate::error::ApiResult;
use hrms_shared::protocol::endpoints;
use hrms_shared::{ApiResponse, Id, Notification};

impl ResourceService<Notification> {
    pub async fn mark_read(&self, id: Id) -> ApiResult<ApiResponse<()>> {
        let envelope: ApiResponse<serde_json::Value> = self
            .client
            .patch_empty(&endpoints::notification_read(id))
            .await?;
        Ok(envelope.map(|_| ()))
    }

    pub async fn mark_all_read(&self) -> ApiResult<ApiResponse<()>> {
        let envelope: ApiResponse<serde_json::Value> = self
            .client
            .patch_empty(endpoints::NOTIFICATIONS_READ_ALL)
            .await?;
        Ok(envelope.map(|_| ()))
    }

    pub async fn unread_count(&self) -> ApiResult<ApiResponse<u64>> {
        self.client
            .get(endpoints::NOTIFICATIONS_UNREAD_COUNT, &[])
            .await
    }
}
