//! 员工

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::detail::DetailPage;
use crate::components::form::{
    CheckboxField, EntityForm, FormPage, SelectField, TextField, optional_text,
};
use crate::components::list_view::{Column, ListFilter, ListView};
use crate::components::lookup::{department_options, employee_options, id_value, position_options, selected_id};
use crate::components::feedback::PageHeader;
use crate::list::use_list_controller;
use crate::web::route::ResourceRoute;
use hrms_shared::date::{display_opt_date, parse_form_date, to_form_date};
use hrms_shared::validation::FieldErrors;
use hrms_shared::{Employee, EmployeeRequest, Id, ListQuery, Role, SortDirection};
use leptos::prelude::*;

pub fn view(route: ResourceRoute) -> AnyView {
    match route {
        ResourceRoute::List => view! { <EmployeeList /> }.into_any(),
        ResourceRoute::New => view! { <FormPage form=EmployeeForm::new() id=None /> }.into_any(),
        ResourceRoute::View(id) => view! {
            <DetailPage<Employee> id=id area=Area::Employees fields=fields owner=owner />
        }
        .into_any(),
        ResourceRoute::Edit(id) => view! { <FormPage form=EmployeeForm::new() id=Some(id) /> }.into_any(),
    }
}

fn owner(employee: &Employee) -> Option<Id> {
    Some(employee.id)
}

fn status_badge(active: bool) -> AnyView {
    if active {
        view! { <span class="badge badge-success badge-sm">"Active"</span> }.into_any()
    } else {
        view! { <span class="badge badge-ghost badge-sm">"Inactive"</span> }.into_any()
    }
}

fn columns() -> Vec<Column<Employee>> {
    vec![
        Column::sortable("Name", "lastName", |e: &Employee| e.full_name().into_any()),
        Column::sortable("Email", "email", |e: &Employee| e.email.clone().into_any()),
        Column::new("Department", |e: &Employee| {
            e.department_name.clone().unwrap_or_default().into_any()
        }),
        Column::new("Position", |e: &Employee| {
            e.position_title.clone().unwrap_or_default().into_any()
        }),
        Column::sortable("Role", "role", |e: &Employee| {
            let label = e.role.label();
            view! { <span class="badge badge-outline badge-sm">{label}</span> }.into_any()
        }),
        Column::new("Status", |e: &Employee| status_badge(e.active)),
    ]
}

fn filters() -> Vec<ListFilter> {
    vec![
        ListFilter {
            field: "role",
            label: "roles",
            options: Role::ALL
                .iter()
                .map(|r| (r.as_str().to_string(), r.label().to_string()))
                .collect(),
        },
        ListFilter {
            field: "active",
            label: "statuses",
            options: vec![
                ("true".to_string(), "Active".to_string()),
                ("false".to_string(), "Inactive".to_string()),
            ],
        },
    ]
}

fn fields(e: &Employee) -> Vec<(&'static str, String)> {
    vec![
        ("Name", e.full_name()),
        ("Email", e.email.clone()),
        ("Phone", e.phone.clone().unwrap_or_default()),
        ("Hire date", display_opt_date(e.hire_date)),
        ("Department", e.department_name.clone().unwrap_or_default()),
        ("Position", e.position_title.clone().unwrap_or_default()),
        ("Manager", e.manager_name.clone().unwrap_or_default()),
        ("Role", e.role.label().to_string()),
        ("Status", if e.active { "Active" } else { "Inactive" }.to_string()),
    ]
}

#[component]
fn EmployeeList() -> impl IntoView {
    let auth = use_auth();
    let query = ListQuery::new(auth.config().page_size).with_sort("lastName", SortDirection::Asc);
    let handle = use_list_controller(query, auth.services().employees.page_source());

    view! {
        <div class="space-y-6">
            <PageHeader title="Employees" subtitle="Everyone in the organization" />
            <ListView<Employee>
                handle=handle
                columns=columns()
                area=Area::Employees
                filters=filters()
                owner=owner
            />
        </div>
    }
}

#[derive(Clone, Copy)]
pub struct EmployeeForm {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    hire_date: RwSignal<String>,
    department: RwSignal<String>,
    position: RwSignal<String>,
    manager: RwSignal<String>,
    role: RwSignal<String>,
    active: RwSignal<bool>,
}

impl EntityForm for EmployeeForm {
    type Entity = Employee;

    const AREA: Area = Area::Employees;

    fn new() -> Self {
        Self {
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            hire_date: RwSignal::new(String::new()),
            department: RwSignal::new(String::new()),
            position: RwSignal::new(String::new()),
            manager: RwSignal::new(String::new()),
            role: RwSignal::new(Role::Employee.as_str().to_string()),
            active: RwSignal::new(true),
        }
    }

    fn fill(&self, e: &Employee) {
        self.first_name.set(e.first_name.clone());
        self.last_name.set(e.last_name.clone());
        self.email.set(e.email.clone());
        self.phone.set(e.phone.clone().unwrap_or_default());
        self.hire_date.set(to_form_date(e.hire_date));
        self.department.set(id_value(e.department_id));
        self.position.set(id_value(e.position_id));
        self.manager.set(id_value(e.manager_id));
        self.role.set(e.role.as_str().to_string());
        self.active.set(e.active);
    }

    fn to_request(&self) -> Result<EmployeeRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let hire_date_input = self.hire_date.get_untracked();
        let hire_date = parse_form_date(&hire_date_input);
        if hire_date.is_none() && !hire_date_input.trim().is_empty() {
            errors.add("hire_date", "Please enter a valid date");
        }

        let Some(role) = Role::from_str_opt(&self.role.get_untracked()) else {
            errors.add("role", "Please select a role");
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(EmployeeRequest {
            first_name: self.first_name.get_untracked().trim().to_string(),
            last_name: self.last_name.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            phone: optional_text(&self.phone.get_untracked()),
            hire_date,
            department_id: selected_id(&self.department.get_untracked()),
            position_id: selected_id(&self.position.get_untracked()),
            manager_id: selected_id(&self.manager.get_untracked()),
            role,
            active: self.active.get_untracked(),
        })
    }

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView {
        let roles = Signal::stored(
            Role::ALL
                .iter()
                .map(|r| (r.as_str().to_string(), r.label().to_string()))
                .collect::<Vec<_>>(),
        );

        view! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                <TextField label="First name" field="first_name" value=self.first_name errors=errors required=true />
                <TextField label="Last name" field="last_name" value=self.last_name errors=errors required=true />
                <TextField label="Email" field="email" value=self.email errors=errors input_type="email" required=true />
                <TextField label="Phone" field="phone" value=self.phone errors=errors input_type="tel" />
                <TextField label="Hire date" field="hire_date" value=self.hire_date errors=errors input_type="date" />
                <SelectField label="Role" field="role" value=self.role errors=errors options=roles />
                <SelectField label="Department" field="department_id" value=self.department errors=errors options=department_options() empty_label="No department" />
                <SelectField label="Position" field="position_id" value=self.position errors=errors options=position_options() empty_label="No position" />
                <SelectField label="Manager" field="manager_id" value=self.manager errors=errors options=employee_options() empty_label="No manager" />
            </div>
            <CheckboxField label="Active" value=self.active />
        }
        .into_any()
    }

    fn owner(entity: &Employee) -> Option<Id> {
        Some(entity.id)
    }
}
