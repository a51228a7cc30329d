use super::Id;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    OnLeave,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Late => "LATE",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::OnLeave => "ON_LEAVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Id,
    pub employee_id: Id,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Attendance {
    /// 签到与签退之间的时长；未签退时为 None
    pub fn worked_duration(&self) -> Option<Duration> {
        match (self.check_in, self.check_out) {
            (Some(start), Some(end)) if end >= start => Some(end - start),
            _ => None,
        }
    }

    pub fn is_checked_in(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_check_times"))]
pub struct AttendanceRequest {
    #[validate(range(min = 1, message = "Employee is required"))]
    pub employee_id: Id,
    pub date: NaiveDate,
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

fn validate_check_times(req: &AttendanceRequest) -> Result<(), ValidationError> {
    match (req.check_in, req.check_out) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::new("check_times")
            .with_message("Check-out cannot be before check-in".into())),
        (None, Some(_)) => Err(ValidationError::new("check_times")
            .with_message("Check-out requires a check-in time".into())),
        _ => Ok(()),
    }
}

impl From<&Attendance> for AttendanceRequest {
    fn from(a: &Attendance) -> Self {
        Self {
            employee_id: a.employee_id,
            date: a.date,
            check_in: a.check_in,
            check_out: a.check_out,
            status: a.status,
            notes: a.notes.clone(),
        }
    }
}
