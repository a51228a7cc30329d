use super::{PageFetcher, ResourceService};
use crate::error::ApiResult;
use hrms_shared::protocol::endpoints;
use hrms_shared::{ApiResponse, Id, LeaveDecision, LeaveRequest};

impl ResourceService<LeaveRequest> {
    pub async fn approve(
        &self,
        id: Id,
        decision: &LeaveDecision,
    ) -> ApiResult<ApiResponse<LeaveRequest>> {
        self.client
            .post(&endpoints::leave_approve(id), decision)
            .await
    }

    pub async fn reject(
        &self,
        id: Id,
        decision: &LeaveDecision,
    ) -> ApiResult<ApiResponse<LeaveRequest>> {
        self.client.post(&endpoints::leave_reject(id), decision).await
    }

    /// 申请人撤销仍在待审批的请假
    pub async fn cancel(&self, id: Id) -> ApiResult<ApiResponse<LeaveRequest>> {
        self.client.post_empty(&endpoints::leave_cancel(id)).await
    }

    /// 当前用户自己的记录
    pub fn mine_source(&self) -> PageFetcher<LeaveRequest> {
        self.page_source_at(endpoints::LEAVES_MINE)
    }
}
