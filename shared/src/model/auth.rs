use super::Id;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Hr,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Hr, Role::Manager, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hr => "HR",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Hr => "Human Resources",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 持久化在 `user` 键下的会话身份
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub employee_id: Id,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub must_change_password: bool,
}

impl SessionUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// 当前浏览器上下文中唯一的已认证会话
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn must_change_password(&self) -> bool {
        self.user.must_change_password
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub employee_id: Id,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub must_change_password: bool,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Session {
            token: resp.token,
            user: SessionUser {
                employee_id: resp.employee_id,
                email: resp.email,
                first_name: resp.first_name,
                last_name: resp.last_name,
                role: resp.role,
                must_change_password: resp.must_change_password,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(
        min = 8,
        max = 64,
        message = "Password must be between 8 and 64 characters"
    ))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetInitialPasswordRequest {
    #[validate(length(
        min = 8,
        max = 64,
        message = "Password must be between 8 and 64 characters"
    ))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}
