use super::{PageFetcher, ResourceService};
use crate::error::ApiResult;
use hrms_shared::protocol::endpoints;
use hrms_shared::{ApiResponse, Attendance};

impl ResourceService<Attendance> {
    pub async fn check_in(&self) -> ApiResult<ApiResponse<Attendance>> {
        self.client.post_empty(endpoints::ATTENDANCE_CHECK_IN).await
    }

    pub async fn check_out(&self) -> ApiResult<ApiResponse<Attendance>> {
        self.client.post_empty(endpoints::ATTENDANCE_CHECK_OUT).await
    }

    /// 今天的考勤记录；尚未签到时信封成功但 `data` 为空
    pub async fn today(&self) -> ApiResult<ApiResponse<Attendance>> {
        self.client.get(endpoints::ATTENDANCE_TODAY, &[]).await
    }

    /// 当前用户自己的记录
    pub fn mine_source(&self) -> PageFetcher<Attendance> {
        self.page_source_at(endpoints::ATTENDANCE_MINE)
    }
}
