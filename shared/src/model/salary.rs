use super::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: Id,
    pub employee_id: Id,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub base_salary: f64,
    #[serde(default)]
    pub bonus: f64,
    #[serde(default)]
    pub deductions: f64,
    pub effective_date: NaiveDate,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Salary {
    pub fn net(&self) -> f64 {
        self.base_salary + self.bonus - self.deductions
    }
}

fn default_currency() -> String {
    "TRY".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRequest {
    #[validate(range(min = 1, message = "Employee is required"))]
    pub employee_id: Id,
    #[validate(range(min = 0.0, message = "Base salary cannot be negative"))]
    pub base_salary: f64,
    #[validate(range(min = 0.0, message = "Bonus cannot be negative"))]
    pub bonus: f64,
    #[validate(range(min = 0.0, message = "Deductions cannot be negative"))]
    pub deductions: f64,
    pub effective_date: NaiveDate,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,
}

impl From<&Salary> for SalaryRequest {
    fn from(s: &Salary) -> Self {
        Self {
            employee_id: s.employee_id,
            base_salary: s.base_salary,
            bonus: s.bonus,
            deductions: s.deductions,
            effective_date: s.effective_date,
            currency: s.currency.clone(),
        }
    }
}
