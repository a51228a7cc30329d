use super::Id;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// =========================================================
// Department
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manager_id: Option<Id>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub employee_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRequest {
    #[validate(length(min = 2, max = 100, message = "Department name must be 2 to 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub manager_id: Option<Id>,
}

impl From<&Department> for DepartmentRequest {
    fn from(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            description: d.description.clone(),
            manager_id: d.manager_id,
        }
    }
}

// =========================================================
// Position
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department_id: Option<Id>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub min_salary: Option<f64>,
    #[serde(default)]
    pub max_salary: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_salary_range"))]
pub struct PositionRequest {
    #[validate(length(min = 2, max = 100, message = "Position title must be 2 to 100 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub department_id: Option<Id>,
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub min_salary: Option<f64>,
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub max_salary: Option<f64>,
}

fn validate_salary_range(req: &PositionRequest) -> Result<(), ValidationError> {
    match (req.min_salary, req.max_salary) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::new("salary_range")
            .with_message("Minimum salary cannot exceed maximum salary".into())),
        _ => Ok(()),
    }
}

impl From<&Position> for PositionRequest {
    fn from(p: &Position) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            department_id: p.department_id,
            min_salary: p.min_salary,
            max_salary: p.max_salary,
        }
    }
}
