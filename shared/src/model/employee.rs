use super::{Id, Role};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub department_id: Option<Id>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub position_id: Option<Id>,
    #[serde(default)]
    pub position_title: Option<String>,
    #[serde(default)]
    pub manager_id: Option<Id>,
    #[serde(default)]
    pub manager_name: Option<String>,
    pub role: Role,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[validate(length(min = 1, max = 50, message = "First name is required (max 50 characters)"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name is required (max 50 characters)"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "Phone number must be 7 to 20 characters"))]
    pub phone: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub department_id: Option<Id>,
    pub position_id: Option<Id>,
    pub manager_id: Option<Id>,
    pub role: Role,
    pub active: bool,
}

impl Default for EmployeeRequest {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: None,
            hire_date: None,
            department_id: None,
            position_id: None,
            manager_id: None,
            role: Role::Employee,
            active: true,
        }
    }
}

impl From<&Employee> for EmployeeRequest {
    fn from(e: &Employee) -> Self {
        Self {
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            phone: e.phone.clone(),
            hire_date: e.hire_date,
            department_id: e.department_id,
            position_id: e.position_id,
            manager_id: e.manager_id,
            role: e.role,
            active: e.active,
        }
    }
}
