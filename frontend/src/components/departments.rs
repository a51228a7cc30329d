//! 部门

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::detail::DetailPage;
use crate::components::feedback::PageHeader;
use crate::components::form::{EntityForm, FormPage, SelectField, TextAreaField, TextField, optional_text};
use crate::components::list_view::{Column, ListView};
use crate::components::lookup::{employee_options, id_value, selected_id};
use crate::list::use_list_controller;
use crate::web::route::ResourceRoute;
use hrms_shared::validation::FieldErrors;
use hrms_shared::{Department, DepartmentRequest, ListQuery, SortDirection};
use leptos::prelude::*;

pub fn view(route: ResourceRoute) -> AnyView {
    match route {
        ResourceRoute::List => view! { <DepartmentList /> }.into_any(),
        ResourceRoute::New => view! { <FormPage form=DepartmentForm::new() id=None /> }.into_any(),
        ResourceRoute::View(id) => {
            view! { <DetailPage<Department> id=id area=Area::Departments fields=fields /> }.into_any()
        }
        ResourceRoute::Edit(id) => view! { <FormPage form=DepartmentForm::new() id=Some(id) /> }.into_any(),
    }
}

fn columns() -> Vec<Column<Department>> {
    vec![
        Column::sortable("Name", "name", |d: &Department| d.name.clone().into_any()),
        Column::new("Manager", |d: &Department| {
            d.manager_name.clone().unwrap_or_default().into_any()
        }),
        Column::sortable("Employees", "employeeCount", |d: &Department| {
            d.employee_count.into_any()
        }),
        Column::new("Description", |d: &Department| {
            let text = d.description.clone().unwrap_or_default();
            view! { <span class="line-clamp-1 max-w-xs">{text}</span> }.into_any()
        }),
    ]
}

fn fields(d: &Department) -> Vec<(&'static str, String)> {
    vec![
        ("Name", d.name.clone()),
        ("Description", d.description.clone().unwrap_or_default()),
        ("Manager", d.manager_name.clone().unwrap_or_default()),
        ("Employees", d.employee_count.to_string()),
    ]
}

#[component]
fn DepartmentList() -> impl IntoView {
    let auth = use_auth();
    let query = ListQuery::new(auth.config().page_size).with_sort("name", SortDirection::Asc);
    let handle = use_list_controller(query, auth.services().departments.page_source());

    view! {
        <div class="space-y-6">
            <PageHeader title="Departments" />
            <ListView<Department> handle=handle columns=columns() area=Area::Departments />
        </div>
    }
}

#[derive(Clone, Copy)]
pub struct DepartmentForm {
    name: RwSignal<String>,
    description: RwSignal<String>,
    manager: RwSignal<String>,
}

impl EntityForm for DepartmentForm {
    type Entity = Department;

    const AREA: Area = Area::Departments;

    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            manager: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, d: &Department) {
        self.name.set(d.name.clone());
        self.description.set(d.description.clone().unwrap_or_default());
        self.manager.set(id_value(d.manager_id));
    }

    fn to_request(&self) -> Result<DepartmentRequest, FieldErrors> {
        Ok(DepartmentRequest {
            name: self.name.get_untracked().trim().to_string(),
            description: optional_text(&self.description.get_untracked()),
            manager_id: selected_id(&self.manager.get_untracked()),
        })
    }

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView {
        view! {
            <TextField label="Name" field="name" value=self.name errors=errors required=true />
            <SelectField label="Manager" field="manager_id" value=self.manager errors=errors options=employee_options() empty_label="No manager" />
            <TextAreaField label="Description" field="description" value=self.description errors=errors />
        }
        .into_any()
    }
}
