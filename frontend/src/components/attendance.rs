//! 考勤记录
//!
//! HR 查看并维护全部记录，其他角色只看到自己的考勤。

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::detail::DetailPage;
use crate::components::feedback::PageHeader;
use crate::components::form::{
    EntityForm, FormPage, SelectField, TextAreaField, TextField, enum_label, enum_options,
    optional_text,
};
use crate::components::list_view::{Column, ListFilter, ListView};
use crate::components::lookup::{employee_options, selected_id};
use crate::list::use_list_controller;
use crate::web::route::ResourceRoute;
use chrono::Duration;
use hrms_shared::date::{
    display_date, parse_form_date, parse_form_datetime, to_form_date, to_form_datetime,
};
use hrms_shared::validation::FieldErrors;
use hrms_shared::{Attendance, AttendanceRequest, AttendanceStatus, Id, ListQuery, SortDirection};
use leptos::prelude::*;

const ATTENDANCE_STATUSES: [AttendanceStatus; 4] = [
    AttendanceStatus::Present,
    AttendanceStatus::Late,
    AttendanceStatus::Absent,
    AttendanceStatus::OnLeave,
];

pub fn view(route: ResourceRoute) -> AnyView {
    match route {
        ResourceRoute::List => view! { <AttendanceList /> }.into_any(),
        ResourceRoute::New => view! { <FormPage form=AttendanceForm::new() id=None /> }.into_any(),
        ResourceRoute::View(id) => view! {
            <DetailPage<Attendance> id=id area=Area::Attendance fields=fields owner=owner />
        }
        .into_any(),
        ResourceRoute::Edit(id) => view! { <FormPage form=AttendanceForm::new() id=Some(id) /> }.into_any(),
    }
}

fn owner(record: &Attendance) -> Option<Id> {
    Some(record.employee_id)
}

/// 时长显示为 `8h 05m`
pub(crate) fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

fn clock(record: Option<chrono::NaiveDateTime>) -> String {
    record
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn status_from_str(raw: &str) -> Option<AttendanceStatus> {
    ATTENDANCE_STATUSES.into_iter().find(|s| s.as_str() == raw)
}

fn columns() -> Vec<Column<Attendance>> {
    vec![
        Column::new("Employee", |a: &Attendance| {
            a.employee_name.clone().unwrap_or_default().into_any()
        }),
        Column::sortable("Date", "date", |a: &Attendance| display_date(a.date).into_any()),
        Column::new("Check-in", |a: &Attendance| clock(a.check_in).into_any()),
        Column::new("Check-out", |a: &Attendance| clock(a.check_out).into_any()),
        Column::new("Worked", |a: &Attendance| {
            a.worked_duration()
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string())
                .into_any()
        }),
        Column::sortable("Status", "status", |a: &Attendance| {
            enum_label(a.status.as_str()).into_any()
        }),
    ]
}

fn filters() -> Vec<ListFilter> {
    vec![ListFilter {
        field: "status",
        label: "statuses",
        options: enum_options(ATTENDANCE_STATUSES.iter().map(AttendanceStatus::as_str)),
    }]
}

fn fields(a: &Attendance) -> Vec<(&'static str, String)> {
    vec![
        ("Employee", a.employee_name.clone().unwrap_or_default()),
        ("Date", display_date(a.date)),
        ("Check-in", clock(a.check_in)),
        ("Check-out", clock(a.check_out)),
        (
            "Worked",
            a.worked_duration().map(format_duration).unwrap_or_default(),
        ),
        ("Status", enum_label(a.status.as_str())),
        ("Notes", a.notes.clone().unwrap_or_default()),
    ]
}

#[component]
fn AttendanceList() -> impl IntoView {
    let auth = use_auth();
    let services = auth.services();
    let query = ListQuery::new(auth.config().page_size).with_sort("date", SortDirection::Desc);
    let source = if auth.capabilities_untracked().is_hr() {
        services.attendance.page_source()
    } else {
        services.attendance.mine_source()
    };
    let handle = use_list_controller(query, source);

    view! {
        <div class="space-y-6">
            <PageHeader title="Attendance" />
            <ListView<Attendance>
                handle=handle
                columns=columns()
                area=Area::Attendance
                filters=filters()
                owner=owner
                searchable=false
            />
        </div>
    }
}

#[derive(Clone, Copy)]
pub struct AttendanceForm {
    employee: RwSignal<String>,
    date: RwSignal<String>,
    check_in: RwSignal<String>,
    check_out: RwSignal<String>,
    status: RwSignal<String>,
    notes: RwSignal<String>,
}

impl EntityForm for AttendanceForm {
    type Entity = Attendance;

    const AREA: Area = Area::Attendance;

    fn new() -> Self {
        Self {
            employee: RwSignal::new(String::new()),
            date: RwSignal::new(String::new()),
            check_in: RwSignal::new(String::new()),
            check_out: RwSignal::new(String::new()),
            status: RwSignal::new(AttendanceStatus::Present.as_str().to_string()),
            notes: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, a: &Attendance) {
        self.employee.set(a.employee_id.to_string());
        self.date.set(to_form_date(Some(a.date)));
        self.check_in.set(to_form_datetime(a.check_in));
        self.check_out.set(to_form_datetime(a.check_out));
        self.status.set(a.status.as_str().to_string());
        self.notes.set(a.notes.clone().unwrap_or_default());
    }

    fn to_request(&self) -> Result<AttendanceRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let date = parse_form_date(&self.date.get_untracked());
        if date.is_none() {
            errors.add("date", "Date is required");
        }
        let mut optional_time = |field: &str, raw: String| {
            let parsed = parse_form_datetime(&raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                errors.add(field, "Please enter a valid date and time");
            }
            parsed
        };
        let check_in = optional_time("check_in", self.check_in.get_untracked());
        let check_out = optional_time("check_out", self.check_out.get_untracked());
        let status = status_from_str(&self.status.get_untracked());
        if status.is_none() {
            errors.add("status", "Please select a status");
        }

        match (date, status) {
            (Some(date), Some(status)) if errors.is_empty() => Ok(AttendanceRequest {
                employee_id: selected_id(&self.employee.get_untracked()).unwrap_or_default(),
                date,
                check_in,
                check_out,
                status,
                notes: optional_text(&self.notes.get_untracked()),
            }),
            _ => Err(errors),
        }
    }

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView {
        let statuses = Signal::stored(enum_options(
            ATTENDANCE_STATUSES.iter().map(AttendanceStatus::as_str),
        ));

        view! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                <SelectField label="Employee" field="employee_id" value=self.employee errors=errors options=employee_options() empty_label="Select an employee" />
                <TextField label="Date" field="date" value=self.date errors=errors input_type="date" required=true />
                <TextField label="Check-in" field="check_in" value=self.check_in errors=errors input_type="datetime-local" />
                <TextField label="Check-out" field="check_out" value=self.check_out errors=errors input_type="datetime-local" />
            </div>
            <SelectField label="Status" field="status" value=self.status errors=errors options=statuses />
            <TextAreaField label="Notes" field="notes" value=self.notes errors=errors />
        }
        .into_any()
    }

    fn owner(entity: &Attendance) -> Option<Id> {
        Some(entity.employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(485)), "8h 05m");
        assert_eq!(format_duration(Duration::minutes(-3)), "0h 00m");
    }

    #[test]
    fn test_status_from_wire_value() {
        assert_eq!(status_from_str("ON_LEAVE"), Some(AttendanceStatus::OnLeave));
        assert_eq!(status_from_str("on_leave"), None);
    }
}
