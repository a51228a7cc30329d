use super::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    Annual,
    Sick,
    Unpaid,
    Maternity,
    Paternity,
    Other,
}

impl LeaveType {
    pub const ALL: [LeaveType; 6] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Unpaid,
        LeaveType::Maternity,
        LeaveType::Paternity,
        LeaveType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "ANNUAL",
            LeaveType::Sick => "SICK",
            LeaveType::Unpaid => "UNPAID",
            LeaveType::Maternity => "MATERNITY",
            LeaveType::Paternity => "PATERNITY",
            LeaveType::Other => "OTHER",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
            LeaveStatus::Cancelled => "CANCELLED",
        }
    }

    /// 只有待审批的申请可以被审批、驳回或撤销
    pub fn is_open(&self) -> bool {
        matches!(self, LeaveStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: Id,
    pub employee_id: Id,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(default)]
    pub approver_id: Option<Id>,
    #[serde(default)]
    pub approver_comment: Option<String>,
}

impl LeaveRequest {
    /// 含首尾两天的自然日天数
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_leave_dates"))]
pub struct LeaveRequestPayload {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

fn validate_leave_dates(req: &LeaveRequestPayload) -> Result<(), ValidationError> {
    if req.end_date < req.start_date {
        return Err(ValidationError::new("date_range")
            .with_message("End date cannot be before start date".into()));
    }
    Ok(())
}

impl From<&LeaveRequest> for LeaveRequestPayload {
    fn from(l: &LeaveRequest) -> Self {
        Self {
            leave_type: l.leave_type,
            start_date: l.start_date,
            end_date: l.end_date,
            reason: l.reason.clone(),
        }
    }
}

/// 审批 / 驳回时附带的意见
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LeaveDecision {
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub comment: Option<String>,
}
