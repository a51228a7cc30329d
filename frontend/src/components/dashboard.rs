use crate::access::Area;
use crate::auth::use_auth;
use crate::components::feedback::{ErrorBanner, PageHeader};
use crate::components::icons::{self, Icon};
use crate::task::spawn_scoped;
use crate::web::route::{AppRoute, ResourceRoute};
use crate::web::router::use_router;
use hrms_shared::{ApiResponse, DashboardStats};
use leptos::prelude::*;

#[component]
fn StatCard(
    title: &'static str,
    value: Signal<u64>,
    #[prop(optional)] description: &'static str,
    #[prop(default = "text-primary")] tone: &'static str,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value {}", tone)>{move || value.get()}</div>
            {(!description.is_empty()).then(|| view! { <div class="stat-desc">{description}</div> })}
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (stats, set_stats) = signal(DashboardStats::default());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_stats = move || {
        set_loading.set(true);
        spawn_scoped(async move {
            match auth.services().dashboard.stats().await.map(ApiResponse::into_result) {
                Ok(Ok(data)) => {
                    set_stats.set(data);
                    set_error_msg.set(None);
                }
                Ok(Err(message)) => set_error_msg.set(Some(message)),
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    load_stats();

    let stat = move |f: fn(&DashboardStats) -> u64| Signal::derive(move || stats.with(f));
    let greeting = move || {
        auth.session.with(|s| {
            s.as_ref()
                .map(|s| format!("Welcome back, {}", s.user.first_name))
                .unwrap_or_default()
        })
    };
    let can_list_employees = move || auth.capabilities().can_list(Area::Employees);

    view! {
        <div class="space-y-8">
            <PageHeader title="Dashboard" subtitle=greeting()>
                <button on:click=move |_| load_stats() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                    <span class="inline-flex" class=("animate-spin", move || loading.get())>
                        <Icon paths=icons::REFRESH class="h-5 w-5" />
                    </span>
                </button>
            </PageHeader>

            <ErrorBanner message=error_msg />

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <Show when=can_list_employees>
                    <StatCard title="Employees" value=stat(|s| s.total_employees) description="Total headcount" />
                    <StatCard title="Active" value=stat(|s| s.active_employees) tone="text-success" />
                </Show>
                <StatCard title="Departments" value=stat(|s| s.total_departments) tone="text-secondary" />
                <StatCard title="Pending leaves" value=stat(|s| s.pending_leaves) tone="text-warning" description="Waiting for a decision" />
                <StatCard title="Present today" value=stat(|s| s.today_present) tone="text-info" />
                <StatCard title="Unread" value=stat(|s| s.unread_notifications) tone="text-accent" description="Notifications" />
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Quick actions"</h3>
                    <div class="flex flex-wrap gap-2">
                        <button class="btn btn-primary btn-sm gap-2" on:click=move |_| router.navigate_to(AppRoute::CheckInOut)>
                            <Icon paths=icons::CLOCK class="h-4 w-4" />
                            "Check in / out"
                        </button>
                        <button class="btn btn-outline btn-sm gap-2" on:click=move |_| router.navigate_to(AppRoute::Resource(Area::Leaves, ResourceRoute::New))>
                            <Icon paths=icons::PLUS class="h-4 w-4" />
                            "Request leave"
                        </button>
                        <button class="btn btn-outline btn-sm" on:click=move |_| router.navigate_to(AppRoute::list(Area::Announcements))>
                            "Announcements"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
