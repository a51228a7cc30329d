use crate::{
    Announcement, AnnouncementRequest, Attendance, AttendanceRequest, Department,
    DepartmentRequest, Employee, EmployeeRequest, Id, LeaveRequest, LeaveRequestPayload,
    Notification, PerformanceReview, PerformanceReviewRequest, Position, PositionRequest, Salary,
    SalaryRequest,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A REST collection exposed by the backend.
///
/// The collection follows the uniform shape:
/// `GET PATH` (paginated list), `GET PATH/{id}`, `DELETE PATH/{id}`.
pub trait Resource: DeserializeOwned + Clone + 'static {
    /// The collection path, relative to the API base URL.
    const PATH: &'static str;
    /// Human readable name used in logs.
    const NAME: &'static str;

    /// Primary key of a single item.
    fn id(&self) -> Id;

    fn item_path(id: Id) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// A collection the client can also write to:
/// `POST PATH` and `PUT PATH/{id}` with `Self::Request` as body.
pub trait Writable: Resource {
    type Request: Serialize + validator::Validate + Clone + 'static;
}

macro_rules! resource {
    ($ty:ty, $path:literal, $name:literal) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;

            fn id(&self) -> Id {
                self.id
            }
        }
    };
    ($ty:ty, $path:literal, $name:literal, $req:ty) => {
        resource!($ty, $path, $name);

        impl Writable for $ty {
            type Request = $req;
        }
    };
}

resource!(Employee, "/employees", "employee", EmployeeRequest);
resource!(Department, "/departments", "department", DepartmentRequest);
resource!(Position, "/positions", "position", PositionRequest);
resource!(LeaveRequest, "/leaves", "leave", LeaveRequestPayload);
resource!(Salary, "/salaries", "salary", SalaryRequest);
resource!(
    PerformanceReview,
    "/performance-reviews",
    "performance review",
    PerformanceReviewRequest
);
resource!(Attendance, "/attendance", "attendance", AttendanceRequest);
resource!(Announcement, "/announcements", "announcement", AnnouncementRequest);
resource!(Notification, "/notifications", "notification");

// =========================================================
// Non-CRUD endpoints
// =========================================================

pub mod endpoints {
    use crate::Id;

    pub const AUTH_LOGIN: &str = "/auth/login";
    pub const AUTH_LOGOUT: &str = "/auth/logout";
    pub const AUTH_CHANGE_PASSWORD: &str = "/auth/change-password";
    pub const AUTH_SET_INITIAL_PASSWORD: &str = "/auth/set-initial-password";

    pub const EMPLOYEE_ME: &str = "/employees/me";

    pub const LEAVES_MINE: &str = "/leaves/my";

    pub fn leave_approve(id: Id) -> String {
        format!("/leaves/{}/approve", id)
    }

    pub fn leave_reject(id: Id) -> String {
        format!("/leaves/{}/reject", id)
    }

    pub fn leave_cancel(id: Id) -> String {
        format!("/leaves/{}/cancel", id)
    }

    pub const ATTENDANCE_CHECK_IN: &str = "/attendance/check-in";
    pub const ATTENDANCE_CHECK_OUT: &str = "/attendance/check-out";
    pub const ATTENDANCE_TODAY: &str = "/attendance/today";
    pub const ATTENDANCE_MINE: &str = "/attendance/my";

    pub const NOTIFICATIONS_READ_ALL: &str = "/notifications/read-all";
    pub const NOTIFICATIONS_UNREAD_COUNT: &str = "/notifications/unread-count";

    pub fn notification_read(id: Id) -> String {
        format!("/notifications/{}/read", id)
    }

    pub const DASHBOARD_STATS: &str = "/dashboard/stats";
}
