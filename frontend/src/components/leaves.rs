//! 请假
//!
//! HR / 经理看到全部申请并可以审批，普通员工只看到自己的申请。
//! 审批和撤销都只对待审批（PENDING）的申请开放。

use crate::access::Area;
use crate::auth::{AuthContext, use_auth};
use crate::components::detail::DetailPage;
use crate::components::feedback::{Notice, PageHeader, confirm, use_notice};
use crate::components::form::{
    EntityForm, FormPage, SelectField, TextAreaField, TextField, enum_label, enum_options,
    optional_text,
};
use crate::components::list_view::{Column, ListFilter, ListView};
use crate::error::ApiResult;
use crate::list::{ListHandle, use_list_controller};
use crate::web::route::{AppRoute, ResourceRoute};
use crate::web::router::use_router;
use hrms_shared::date::{display_date, parse_form_date, to_form_date};
use hrms_shared::validation::FieldErrors;
use hrms_shared::{
    ApiResponse, Id, LeaveDecision, LeaveRequest, LeaveRequestPayload, LeaveStatus, LeaveType,
    ListQuery, SortDirection,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

const LEAVE_STATUSES: [LeaveStatus; 4] = [
    LeaveStatus::Pending,
    LeaveStatus::Approved,
    LeaveStatus::Rejected,
    LeaveStatus::Cancelled,
];

pub fn view(route: ResourceRoute) -> AnyView {
    match route {
        ResourceRoute::List => view! { <LeaveList /> }.into_any(),
        ResourceRoute::New => view! { <FormPage form=LeaveForm::new() id=None /> }.into_any(),
        ResourceRoute::View(id) => view! {
            <DetailPage<LeaveRequest>
                id=id
                area=Area::Leaves
                fields=fields
                owner=owner
                extra=decision_panel
            />
        }
        .into_any(),
        ResourceRoute::Edit(id) => view! { <FormPage form=LeaveForm::new() id=Some(id) /> }.into_any(),
    }
}

fn owner(leave: &LeaveRequest) -> Option<Id> {
    Some(leave.employee_id)
}

fn status_badge(status: LeaveStatus) -> AnyView {
    let class = match status {
        LeaveStatus::Pending => "badge badge-warning badge-sm",
        LeaveStatus::Approved => "badge badge-success badge-sm",
        LeaveStatus::Rejected => "badge badge-error badge-sm",
        LeaveStatus::Cancelled => "badge badge-ghost badge-sm",
    };
    let text = enum_label(status.as_str());
    view! { <span class=class>{text}</span> }.into_any()
}

fn columns() -> Vec<Column<LeaveRequest>> {
    vec![
        Column::new("Employee", |l: &LeaveRequest| {
            l.employee_name.clone().unwrap_or_default().into_any()
        }),
        Column::sortable("Type", "leaveType", |l: &LeaveRequest| {
            enum_label(l.leave_type.as_str()).into_any()
        }),
        Column::sortable("From", "startDate", |l: &LeaveRequest| {
            display_date(l.start_date).into_any()
        }),
        Column::sortable("To", "endDate", |l: &LeaveRequest| display_date(l.end_date).into_any()),
        Column::new("Days", |l: &LeaveRequest| l.days().into_any()),
        Column::sortable("Status", "status", |l: &LeaveRequest| status_badge(l.status)),
    ]
}

fn filters() -> Vec<ListFilter> {
    vec![
        ListFilter {
            field: "status",
            label: "statuses",
            options: enum_options(LEAVE_STATUSES.iter().map(LeaveStatus::as_str)),
        },
        ListFilter {
            field: "leaveType",
            label: "types",
            options: enum_options(LeaveType::ALL.iter().map(LeaveType::as_str)),
        },
    ]
}

fn fields(l: &LeaveRequest) -> Vec<(&'static str, String)> {
    vec![
        ("Employee", l.employee_name.clone().unwrap_or_default()),
        ("Type", enum_label(l.leave_type.as_str())),
        ("From", display_date(l.start_date)),
        ("To", display_date(l.end_date)),
        ("Days", l.days().to_string()),
        ("Reason", l.reason.clone().unwrap_or_default()),
        ("Status", enum_label(l.status.as_str())),
        ("Approver comment", l.approver_comment.clone().unwrap_or_default()),
    ]
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Decision {
    Approve,
    Reject,
    Cancel,
}

impl Decision {
    fn done_message(self) -> &'static str {
        match self {
            Decision::Approve => "Leave approved",
            Decision::Reject => "Leave rejected",
            Decision::Cancel => "Leave cancelled",
        }
    }
}

/// 执行审批 / 驳回 / 撤销，成功时返回 true
async fn decide(
    auth: AuthContext,
    notice: Notice,
    id: Id,
    decision: Decision,
    comment: Option<String>,
) -> bool {
    let service = auth.services().leaves;
    let body = LeaveDecision { comment };

    let result: ApiResult<ApiResponse<LeaveRequest>> = match decision {
        Decision::Approve => service.approve(id, &body).await,
        Decision::Reject => service.reject(id, &body).await,
        Decision::Cancel => service.cancel(id).await,
    };

    match result {
        Ok(envelope) if envelope.success => {
            info!("[Leaves] {} #{}", decision.done_message(), id);
            notice.success(decision.done_message());
            true
        }
        Ok(envelope) => {
            notice.error(envelope.message);
            false
        }
        Err(e) => {
            notice.error(e.user_message());
            false
        }
    }
}

/// 列表行内的审批 / 撤销按钮
fn row_actions(leave: &LeaveRequest, handle: ListHandle<LeaveRequest>) -> AnyView {
    let auth = use_auth();
    let notice = use_notice();
    let caps = auth.capabilities_untracked();
    let id = leave.id;
    let open = leave.status.is_open();
    let can_decide = open && caps.can_decide_leave(leave.employee_id);
    let can_cancel = open && caps.can_cancel_leave(leave.employee_id);

    let run = move |decision: Decision| {
        if decision == Decision::Cancel && !confirm("Cancel this leave request?") {
            return;
        }
        spawn_local(async move {
            if decide(auth, notice, id, decision, None).await {
                handle.reload();
            }
        });
    };

    view! {
        {can_decide.then(|| view! {
            <button class="btn btn-success btn-xs mr-1" on:click=move |_| run(Decision::Approve)>"Approve"</button>
            <button class="btn btn-error btn-outline btn-xs mr-1" on:click=move |_| run(Decision::Reject)>"Reject"</button>
        })}
        {can_cancel.then(|| view! {
            <button class="btn btn-ghost btn-xs mr-1" on:click=move |_| run(Decision::Cancel)>"Cancel"</button>
        })}
    }
    .into_any()
}

fn decision_panel(leave: LeaveRequest) -> AnyView {
    view! { <LeaveDecisionPanel leave=leave /> }.into_any()
}

/// 详情页下方的审批区域，可附带意见
#[component]
fn LeaveDecisionPanel(leave: LeaveRequest) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let router = use_router();
    let caps = auth.capabilities_untracked();
    let id = leave.id;
    let open = leave.status.is_open();
    let can_decide = open && caps.can_decide_leave(leave.employee_id);
    let can_cancel = open && caps.can_cancel_leave(leave.employee_id);

    let comment = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = move |decision: Decision| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let text = optional_text(&comment.get_untracked());
        spawn_local(async move {
            if decide(auth, notice, id, decision, text).await {
                router.navigate_to(AppRoute::list(Area::Leaves));
            }
            busy.set(false);
        });
    };

    (can_decide || can_cancel).then(|| view! {
        <div class="mt-6 space-y-3">
            {can_decide.then(|| view! {
                <textarea
                    class="textarea textarea-bordered w-full"
                    placeholder="Comment (optional)"
                    prop:value=move || comment.get()
                    on:input=move |ev| comment.set(event_target_value(&ev))
                ></textarea>
            })}
            <div class="flex gap-2 justify-end">
                {can_cancel.then(|| view! {
                    <button class="btn btn-ghost" disabled=move || busy.get() on:click=move |_| submit(Decision::Cancel)>
                        "Cancel request"
                    </button>
                })}
                {can_decide.then(|| view! {
                    <button class="btn btn-error btn-outline" disabled=move || busy.get() on:click=move |_| submit(Decision::Reject)>
                        "Reject"
                    </button>
                    <button class="btn btn-success" disabled=move || busy.get() on:click=move |_| submit(Decision::Approve)>
                        "Approve"
                    </button>
                })}
            </div>
        </div>
    })
}

#[component]
fn LeaveList() -> impl IntoView {
    let auth = use_auth();
    let services = auth.services();
    let query = ListQuery::new(auth.config().page_size).with_sort("startDate", SortDirection::Desc);
    let source = if auth.capabilities_untracked().is_hr_or_manager() {
        services.leaves.page_source()
    } else {
        services.leaves.mine_source()
    };
    let handle = use_list_controller(query, source);

    view! {
        <div class="space-y-6">
            <PageHeader title="Leave requests" />
            <ListView<LeaveRequest>
                handle=handle
                columns=columns()
                area=Area::Leaves
                filters=filters()
                owner=owner
                actions=row_actions
                searchable=false
            />
        </div>
    }
}

#[derive(Clone, Copy)]
pub struct LeaveForm {
    leave_type: RwSignal<String>,
    start_date: RwSignal<String>,
    end_date: RwSignal<String>,
    reason: RwSignal<String>,
}

impl EntityForm for LeaveForm {
    type Entity = LeaveRequest;

    const AREA: Area = Area::Leaves;

    fn new() -> Self {
        Self {
            leave_type: RwSignal::new(LeaveType::Annual.as_str().to_string()),
            start_date: RwSignal::new(String::new()),
            end_date: RwSignal::new(String::new()),
            reason: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, l: &LeaveRequest) {
        self.leave_type.set(l.leave_type.as_str().to_string());
        self.start_date.set(to_form_date(Some(l.start_date)));
        self.end_date.set(to_form_date(Some(l.end_date)));
        self.reason.set(l.reason.clone().unwrap_or_default());
    }

    fn to_request(&self) -> Result<LeaveRequestPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let leave_type = LeaveType::from_str_opt(&self.leave_type.get_untracked());
        if leave_type.is_none() {
            errors.add("leave_type", "Please select a leave type");
        }
        let start_date = parse_form_date(&self.start_date.get_untracked());
        if start_date.is_none() {
            errors.add("start_date", "Start date is required");
        }
        let end_date = parse_form_date(&self.end_date.get_untracked());
        if end_date.is_none() {
            errors.add("end_date", "End date is required");
        }

        match (leave_type, start_date, end_date) {
            (Some(leave_type), Some(start_date), Some(end_date)) => Ok(LeaveRequestPayload {
                leave_type,
                start_date,
                end_date,
                reason: optional_text(&self.reason.get_untracked()),
            }),
            _ => Err(errors),
        }
    }

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView {
        let types = Signal::stored(enum_options(LeaveType::ALL.iter().map(LeaveType::as_str)));

        view! {
            <SelectField label="Leave type" field="leave_type" value=self.leave_type errors=errors options=types />
            <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
                <TextField label="From" field="start_date" value=self.start_date errors=errors input_type="date" required=true />
                <TextField label="To" field="end_date" value=self.end_date errors=errors input_type="date" required=true />
            </div>
            <TextAreaField label="Reason" field="reason" value=self.reason errors=errors />
        }
        .into_any()
    }

    fn owner(entity: &LeaveRequest) -> Option<Id> {
        Some(entity.employee_id)
    }
}
