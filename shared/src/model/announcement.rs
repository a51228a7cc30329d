use super::Id;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl AnnouncementPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementPriority::Low => "LOW",
            AnnouncementPriority::Normal => "NORMAL",
            AnnouncementPriority::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Id,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub priority: AnnouncementPriority,
    pub publish_date: NaiveDate,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub author_name: Option<String>,
}

impl Announcement {
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.publish_date <= day && self.expiry_date.is_none_or(|end| day <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_announcement_dates"))]
pub struct AnnouncementRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3 to 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "Content is required (max 5000 characters)"))]
    pub content: String,
    pub priority: AnnouncementPriority,
    pub publish_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
}

fn validate_announcement_dates(req: &AnnouncementRequest) -> Result<(), ValidationError> {
    match req.expiry_date {
        Some(end) if end < req.publish_date => Err(ValidationError::new("date_range")
            .with_message("Expiry date cannot be before publish date".into())),
        _ => Ok(()),
    }
}

impl From<&Announcement> for AnnouncementRequest {
    fn from(a: &Announcement) -> Self {
        Self {
            title: a.title.clone(),
            content: a.content.clone(),
            priority: a.priority,
            publish_date: a.publish_date,
            expiry_date: a.expiry_date,
        }
    }
}

// =========================================================
// Notification
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Id,
    pub title: String,
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub read: bool,
    pub created_at: NaiveDateTime,
    /// 点击通知后跳转的站内路径
    #[serde(default)]
    pub link: Option<String>,
}

// =========================================================
// Dashboard
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_employees: u64,
    pub active_employees: u64,
    pub total_departments: u64,
    pub pending_leaves: u64,
    pub today_present: u64,
    pub unread_notifications: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcement(publish: &str, expiry: Option<&str>) -> Announcement {
        let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        Announcement {
            id: 1,
            title: "Office move".to_string(),
            content: "We move on Monday".to_string(),
            priority: AnnouncementPriority::Normal,
            publish_date: date(publish),
            expiry_date: expiry.map(date),
            author_name: None,
        }
    }

    #[test]
    fn test_active_window_is_inclusive() {
        let day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let a = announcement("2024-03-01", Some("2024-03-10"));
        assert!(!a.is_active_on(day("2024-02-29")));
        assert!(a.is_active_on(day("2024-03-01")));
        assert!(a.is_active_on(day("2024-03-10")));
        assert!(!a.is_active_on(day("2024-03-11")));

        let open_ended = announcement("2024-03-01", None);
        assert!(open_ended.is_active_on(day("2030-01-01")));
    }
}
