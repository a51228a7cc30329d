//! 已登录页面的外壳：导航栏、未读通知徽标、注销

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::feedback::NoticeToast;
use crate::components::icons::{self, Icon};
use crate::components::notifications::UnreadCount;
use crate::web::PollTimer;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

/// 两个路由是否属于同一导航分区（资源区域内的子页面算同一分区）
fn same_section(current: AppRoute, item: AppRoute) -> bool {
    match (current, item) {
        (AppRoute::Resource(a, _), AppRoute::Resource(b, _)) => a == b,
        _ => current == item,
    }
}

#[component]
fn NavItem(
    route: AppRoute,
    label: &'static str,
    #[prop(optional, into)] badge: Option<Signal<u64>>,
) -> impl IntoView {
    let router = use_router();
    let current = router.current_route();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(route);
    };

    view! {
        <li>
            <a href=route.to_path() class=("active", move || same_section(current.get(), route)) on:click=on_click>
                {label}
                {badge.map(|count| view! {
                    <Show when=move || { count.get() > 0 }>
                        <span class="badge badge-secondary badge-sm">{move || count.get()}</span>
                    </Show>
                })}
            </a>
        </li>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let unread = UnreadCount::new(auth);
    provide_context(unread);

    // 首次加载后按配置的间隔轮询；定时器随组件一起释放
    unread.refresh();
    let poll = auth
        .config()
        .notification_poll_interval()
        .and_then(|period| PollTimer::start(period, move || unread.refresh()));
    let _poll = StoredValue::new_local(poll);

    let user_name = move || {
        auth.session
            .with(|s| s.as_ref().map(|s| s.user.full_name()).unwrap_or_default())
    };
    let role_label = move || {
        auth.capabilities()
            .role()
            .map(|r| r.label())
            .unwrap_or_default()
    };
    let areas = move || {
        auth.capabilities()
            .navigable_areas()
            .into_iter()
            .map(|area: Area| view! { <NavItem route=AppRoute::list(area) label=area.label() /> })
            .collect_view()
    };

    let on_logout = move |_| {
        info!("[Layout] Logout requested");
        spawn_local(async move { auth.logout().await });
    };

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <NoticeToast />
            <div class="navbar bg-base-100 shadow-xl px-4">
                <div class="flex-1 gap-2">
                    <Icon paths=icons::SHIELD_CHECK class="text-primary h-6 w-6" />
                    <Link to=AppRoute::Dashboard.to_path() class="btn btn-ghost text-xl">"HRMS"</Link>
                </div>
                <div class="flex-none gap-2">
                    <Link to=AppRoute::Notifications.to_path() class="btn btn-ghost btn-circle">
                        <div class="indicator">
                            <Icon paths=icons::BELL class="h-5 w-5" />
                            <Show when=move || { unread.get() > 0 }>
                                <span class="badge badge-secondary badge-xs indicator-item">{move || unread.get()}</span>
                            </Show>
                        </div>
                    </Link>
                    <div class="hidden md:flex flex-col items-end leading-tight">
                        <span class="font-semibold">{user_name}</span>
                        <span class="text-xs text-base-content/60">{role_label}</span>
                    </div>
                    <Link to=AppRoute::ChangePassword.to_path() class="btn btn-ghost btn-sm">"Password"</Link>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                        <Icon paths=icons::LOG_OUT class="h-4 w-4" />
                        "Sign out"
                    </button>
                </div>
            </div>

            <div class="flex flex-col md:flex-row max-w-7xl mx-auto gap-6 p-4 md:p-8">
                <aside class="md:w-56 shrink-0">
                    <ul class="menu bg-base-100 rounded-box shadow-xl w-full">
                        <NavItem route=AppRoute::Dashboard label="Dashboard" />
                        {areas}
                        <li class="menu-title">"Me"</li>
                        <NavItem route=AppRoute::CheckInOut label="Check in / out" />
                        <NavItem route=AppRoute::Notifications label="Notifications" badge=Signal::derive(move || unread.get()) />
                        <NavItem route=AppRoute::Profile label="Profile" />
                    </ul>
                </aside>
                <main class="flex-1 min-w-0">{children()}</main>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::same_section;
    use crate::access::Area;
    use crate::web::route::{AppRoute, ResourceRoute};

    #[test]
    fn test_resource_subpages_share_a_section() {
        let list = AppRoute::list(Area::Leaves);
        assert!(same_section(AppRoute::Resource(Area::Leaves, ResourceRoute::Edit(4)), list));
        assert!(!same_section(AppRoute::list(Area::Salaries), list));
        assert!(same_section(AppRoute::Profile, AppRoute::Profile));
        assert!(!same_section(AppRoute::Dashboard, AppRoute::Profile));
    }
}
