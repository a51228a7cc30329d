//! 工资
//!
//! 列表仅 HR 可见；员工可以打开自己的工资详情。

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::detail::DetailPage;
use crate::components::feedback::PageHeader;
use crate::components::form::{EntityForm, FormPage, SelectField, TextField, parse_number};
use crate::components::list_view::{Column, ListView};
use crate::components::lookup::{employee_options, selected_id};
use crate::list::use_list_controller;
use crate::web::route::ResourceRoute;
use hrms_shared::date::{display_date, parse_form_date, to_form_date};
use hrms_shared::validation::FieldErrors;
use hrms_shared::{Id, ListQuery, Salary, SalaryRequest, SortDirection};
use leptos::prelude::*;

const DEFAULT_CURRENCY: &str = "TRY";

pub fn view(route: ResourceRoute) -> AnyView {
    match route {
        ResourceRoute::List => view! { <SalaryList /> }.into_any(),
        ResourceRoute::New => view! { <FormPage form=SalaryForm::new() id=None /> }.into_any(),
        ResourceRoute::View(id) => view! {
            <DetailPage<Salary> id=id area=Area::Salaries fields=fields owner=owner />
        }
        .into_any(),
        ResourceRoute::Edit(id) => view! { <FormPage form=SalaryForm::new() id=Some(id) /> }.into_any(),
    }
}

fn owner(salary: &Salary) -> Option<Id> {
    Some(salary.employee_id)
}

fn money(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

fn columns() -> Vec<Column<Salary>> {
    vec![
        Column::new("Employee", |s: &Salary| {
            s.employee_name.clone().unwrap_or_default().into_any()
        }),
        Column::sortable("Base", "baseSalary", |s: &Salary| {
            money(s.base_salary, &s.currency).into_any()
        }),
        Column::new("Bonus", |s: &Salary| money(s.bonus, &s.currency).into_any()),
        Column::new("Deductions", |s: &Salary| money(s.deductions, &s.currency).into_any()),
        Column::new("Net", |s: &Salary| {
            let net = money(s.net(), &s.currency);
            view! { <span class="font-semibold">{net}</span> }.into_any()
        }),
        Column::sortable("Effective", "effectiveDate", |s: &Salary| {
            display_date(s.effective_date).into_any()
        }),
    ]
}

fn fields(s: &Salary) -> Vec<(&'static str, String)> {
    vec![
        ("Employee", s.employee_name.clone().unwrap_or_default()),
        ("Base salary", money(s.base_salary, &s.currency)),
        ("Bonus", money(s.bonus, &s.currency)),
        ("Deductions", money(s.deductions, &s.currency)),
        ("Net", money(s.net(), &s.currency)),
        ("Effective date", display_date(s.effective_date)),
    ]
}

#[component]
fn SalaryList() -> impl IntoView {
    let auth = use_auth();
    let query =
        ListQuery::new(auth.config().page_size).with_sort("effectiveDate", SortDirection::Desc);
    let handle = use_list_controller(query, auth.services().salaries.page_source());

    view! {
        <div class="space-y-6">
            <PageHeader title="Salaries" />
            <ListView<Salary> handle=handle columns=columns() area=Area::Salaries owner=owner />
        </div>
    }
}

#[derive(Clone, Copy)]
pub struct SalaryForm {
    employee: RwSignal<String>,
    base_salary: RwSignal<String>,
    bonus: RwSignal<String>,
    deductions: RwSignal<String>,
    effective_date: RwSignal<String>,
    currency: RwSignal<String>,
}

impl EntityForm for SalaryForm {
    type Entity = Salary;

    const AREA: Area = Area::Salaries;

    fn new() -> Self {
        Self {
            employee: RwSignal::new(String::new()),
            base_salary: RwSignal::new(String::new()),
            bonus: RwSignal::new("0".to_string()),
            deductions: RwSignal::new("0".to_string()),
            effective_date: RwSignal::new(String::new()),
            currency: RwSignal::new(DEFAULT_CURRENCY.to_string()),
        }
    }

    fn fill(&self, s: &Salary) {
        self.employee.set(s.employee_id.to_string());
        self.base_salary.set(s.base_salary.to_string());
        self.bonus.set(s.bonus.to_string());
        self.deductions.set(s.deductions.to_string());
        self.effective_date.set(to_form_date(Some(s.effective_date)));
        self.currency.set(s.currency.clone());
    }

    fn to_request(&self) -> Result<SalaryRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let number = "Please enter a number";
        let base_salary =
            parse_number(&mut errors, "base_salary", &self.base_salary.get_untracked(), number);
        let bonus = parse_number(&mut errors, "bonus", &self.bonus.get_untracked(), number);
        let deductions =
            parse_number(&mut errors, "deductions", &self.deductions.get_untracked(), number);
        let effective_date = parse_form_date(&self.effective_date.get_untracked());
        if effective_date.is_none() {
            errors.add("effective_date", "Effective date is required");
        }

        match (base_salary, bonus, deductions, effective_date) {
            (Some(base_salary), Some(bonus), Some(deductions), Some(effective_date)) => {
                Ok(SalaryRequest {
                    // 未选择员工时为 0，由校验报出
                    employee_id: selected_id(&self.employee.get_untracked()).unwrap_or_default(),
                    base_salary,
                    bonus,
                    deductions,
                    effective_date,
                    currency: self.currency.get_untracked().trim().to_uppercase(),
                })
            }
            _ => Err(errors),
        }
    }

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView {
        view! {
            <SelectField label="Employee" field="employee_id" value=self.employee errors=errors options=employee_options() empty_label="Select an employee" />
            <div class="grid grid-cols-1 md:grid-cols-3 gap-x-4">
                <TextField label="Base salary" field="base_salary" value=self.base_salary errors=errors input_type="number" required=true />
                <TextField label="Bonus" field="bonus" value=self.bonus errors=errors input_type="number" />
                <TextField label="Deductions" field="deductions" value=self.deductions errors=errors input_type="number" />
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                <TextField label="Effective date" field="effective_date" value=self.effective_date errors=errors input_type="date" required=true />
                <TextField label="Currency" field="currency" value=self.currency errors=errors placeholder="TRY" />
            </div>
        }
        .into_any()
    }

    fn owner(entity: &Salary) -> Option<Id> {
        Some(entity.employee_id)
    }
}
