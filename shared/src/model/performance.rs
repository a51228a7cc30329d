use super::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReview {
    pub id: Id,
    pub employee_id: Id,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub reviewer_id: Id,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    pub review_date: NaiveDate,
    #[serde(default)]
    pub period: Option<String>,
    /// 1 ~ 5 分
    pub rating: u8,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReviewRequest {
    #[validate(range(min = 1, message = "Employee is required"))]
    pub employee_id: Id,
    #[validate(range(min = 1, message = "Reviewer is required"))]
    pub reviewer_id: Id,
    pub review_date: NaiveDate,
    #[validate(length(max = 50, message = "Period must be at most 50 characters"))]
    pub period: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(max = 2000, message = "Comments must be at most 2000 characters"))]
    pub comments: Option<String>,
}

impl From<&PerformanceReview> for PerformanceReviewRequest {
    fn from(r: &PerformanceReview) -> Self {
        Self {
            employee_id: r.employee_id,
            reviewer_id: r.reviewer_id,
            review_date: r.review_date,
            period: r.period.clone(),
            rating: r.rating,
            comments: r.comments.clone(),
        }
    }
}
