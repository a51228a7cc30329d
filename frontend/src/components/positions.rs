//! 职位

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::detail::DetailPage;
use crate::components::feedback::PageHeader;
use crate::components::form::{
    EntityForm, FormPage, SelectField, TextAreaField, TextField, optional_text,
    parse_optional_number,
};
use crate::components::list_view::{Column, ListView};
use crate::components::lookup::{department_options, id_value, selected_id};
use crate::list::use_list_controller;
use crate::web::route::ResourceRoute;
use hrms_shared::validation::FieldErrors;
use hrms_shared::{ListQuery, Position, PositionRequest, SortDirection};
use leptos::prelude::*;

pub fn view(route: ResourceRoute) -> AnyView {
    match route {
        ResourceRoute::List => view! { <PositionList /> }.into_any(),
        ResourceRoute::New => view! { <FormPage form=PositionForm::new() id=None /> }.into_any(),
        ResourceRoute::View(id) => {
            view! { <DetailPage<Position> id=id area=Area::Positions fields=fields /> }.into_any()
        }
        ResourceRoute::Edit(id) => view! { <FormPage form=PositionForm::new() id=Some(id) /> }.into_any(),
    }
}

/// 工资区间的显示文本
pub(crate) fn salary_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{:.2} - {:.2}", min, max),
        (Some(min), None) => format!("from {:.2}", min),
        (None, Some(max)) => format!("up to {:.2}", max),
        (None, None) => String::new(),
    }
}

fn columns() -> Vec<Column<Position>> {
    vec![
        Column::sortable("Title", "title", |p: &Position| p.title.clone().into_any()),
        Column::new("Department", |p: &Position| {
            p.department_name.clone().unwrap_or_default().into_any()
        }),
        Column::sortable("Salary range", "minSalary", |p: &Position| {
            salary_range(p.min_salary, p.max_salary).into_any()
        }),
    ]
}

fn fields(p: &Position) -> Vec<(&'static str, String)> {
    vec![
        ("Title", p.title.clone()),
        ("Department", p.department_name.clone().unwrap_or_default()),
        ("Salary range", salary_range(p.min_salary, p.max_salary)),
        ("Description", p.description.clone().unwrap_or_default()),
    ]
}

#[component]
fn PositionList() -> impl IntoView {
    let auth = use_auth();
    let query = ListQuery::new(auth.config().page_size).with_sort("title", SortDirection::Asc);
    let handle = use_list_controller(query, auth.services().positions.page_source());

    view! {
        <div class="space-y-6">
            <PageHeader title="Positions" />
            <ListView<Position> handle=handle columns=columns() area=Area::Positions />
        </div>
    }
}

#[derive(Clone, Copy)]
pub struct PositionForm {
    title: RwSignal<String>,
    description: RwSignal<String>,
    department: RwSignal<String>,
    min_salary: RwSignal<String>,
    max_salary: RwSignal<String>,
}

impl EntityForm for PositionForm {
    type Entity = Position;

    const AREA: Area = Area::Positions;

    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            department: RwSignal::new(String::new()),
            min_salary: RwSignal::new(String::new()),
            max_salary: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, p: &Position) {
        self.title.set(p.title.clone());
        self.description.set(p.description.clone().unwrap_or_default());
        self.department.set(id_value(p.department_id));
        self.min_salary.set(p.min_salary.map(|v| v.to_string()).unwrap_or_default());
        self.max_salary.set(p.max_salary.map(|v| v.to_string()).unwrap_or_default());
    }

    fn to_request(&self) -> Result<PositionRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let min_salary = parse_optional_number(
            &mut errors,
            "min_salary",
            &self.min_salary.get_untracked(),
            "Please enter a number",
        );
        let max_salary = parse_optional_number(
            &mut errors,
            "max_salary",
            &self.max_salary.get_untracked(),
            "Please enter a number",
        );
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PositionRequest {
            title: self.title.get_untracked().trim().to_string(),
            description: optional_text(&self.description.get_untracked()),
            department_id: selected_id(&self.department.get_untracked()),
            min_salary,
            max_salary,
        })
    }

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView {
        view! {
            <TextField label="Title" field="title" value=self.title errors=errors required=true />
            <SelectField label="Department" field="department_id" value=self.department errors=errors options=department_options() empty_label="No department" />
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                <TextField label="Minimum salary" field="min_salary" value=self.min_salary errors=errors input_type="number" />
                <TextField label="Maximum salary" field="max_salary" value=self.max_salary errors=errors input_type="number" />
            </div>
            <TextAreaField label="Description" field="description" value=self.description errors=errors />
        }
        .into_any()
    }
}

#[cfg(test)]
mod tests {
    use super::salary_range;

    #[test]
    fn test_salary_range_text() {
        assert_eq!(salary_range(Some(1000.0), Some(2500.5)), "1000.00 - 2500.50");
        assert_eq!(salary_range(Some(1000.0), None), "from 1000.00");
        assert_eq!(salary_range(None, Some(10.0)), "up to 10.00");
        assert_eq!(salary_range(None, None), "");
    }
}
