use crate::auth::use_auth;
use crate::components::feedback::{ErrorBanner, PageHeader, Spinner};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use hrms_shared::date::display_opt_date;
use hrms_shared::{ApiResponse, Employee};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn profile_rows(e: &Employee) -> Vec<(&'static str, String)> {
    vec![
        ("Email", e.email.clone()),
        ("Phone", e.phone.clone().unwrap_or_else(|| "-".to_string())),
        ("Department", e.department_name.clone().unwrap_or_else(|| "-".to_string())),
        ("Position", e.position_title.clone().unwrap_or_else(|| "-".to_string())),
        ("Manager", e.manager_name.clone().unwrap_or_else(|| "-".to_string())),
        ("Hire date", display_opt_date(e.hire_date)),
        ("Role", e.role.label().to_string()),
    ]
}

/// 当前用户自己的员工档案
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let (employee, set_employee) = signal(None::<Employee>);
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        match auth.services().employees.me().await.map(ApiResponse::into_result) {
            Ok(Ok(me)) => set_employee.set(Some(me)),
            Ok(Err(message)) => set_error_msg.set(Some(message)),
            Err(e) => set_error_msg.set(Some(e.user_message())),
        }
        set_loading.set(false);
    });

    let details = move || {
        employee.with(|e| {
            e.as_ref().map(|e| {
                let name = e.full_name();
                let rows = profile_rows(e)
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="grid grid-cols-3 gap-4 py-2 border-b border-base-200">
                            <dt class="font-medium text-base-content/70">{label}</dt>
                            <dd class="col-span-2">{value}</dd>
                        </div>
                    })
                    .collect_view();
                view! {
                    <h2 class="card-title text-2xl">{name}</h2>
                    <dl>{rows}</dl>
                }
            })
        })
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="My profile">
                <Link to=AppRoute::ChangePassword.to_path() class="btn btn-outline btn-sm">"Change password"</Link>
            </PageHeader>
            <div class="card bg-base-100 shadow-xl max-w-3xl">
                <div class="card-body">
                    <ErrorBanner message=error_msg />
                    <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                        {details}
                    </Show>
                </div>
            </div>
        </div>
    }
}
