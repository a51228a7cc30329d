//! 通知中心与未读计数

use crate::auth::{AuthContext, use_auth};
use crate::components::feedback::{ErrorBanner, PageHeader, use_notice};
use crate::components::icons::{self, Icon};
use crate::list::{ListHandle, use_list_controller};
use crate::web::router::use_router;
use hrms_shared::date::display_datetime;
use hrms_shared::{ApiResponse, Id, ListQuery, Notification, SortDirection};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

/// 导航栏上的未读通知数
///
/// 由 `Layout` 提供并定时刷新；通知页面在标记已读后主动刷新。
#[derive(Clone, Copy)]
pub struct UnreadCount {
    count: RwSignal<u64>,
    auth: AuthContext,
}

impl UnreadCount {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            count: RwSignal::new(0),
            auth,
        }
    }

    pub fn get(&self) -> u64 {
        self.count.get()
    }

    /// 重新查询未读数；失败时保留旧值
    pub fn refresh(&self) {
        let this = *self;
        spawn_local(async move {
            if !this.auth.capabilities_untracked().is_signed_in() {
                return;
            }
            let service = this.auth.services().notifications;
            match service.unread_count().await.map(ApiResponse::into_result) {
                Ok(Ok(count)) => this.count.set(count),
                Ok(Err(message)) => debug!("[Notifications] unread count rejected: {}", message),
                Err(e) => debug!("[Notifications] unread count failed: {}", e),
            }
        });
    }
}

pub fn use_unread_count() -> UnreadCount {
    use_context::<UnreadCount>().expect("UnreadCount should be provided by Layout")
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let unread = use_unread_count();
    let query = ListQuery::new(auth.config().page_size).with_sort("createdAt", SortDirection::Desc);
    let handle = use_list_controller(query, auth.services().notifications.page_source());
    let state = handle.state;

    let mark_all = move |_| {
        spawn_local(async move {
            match auth.services().notifications.mark_all_read().await {
                Ok(envelope) if envelope.success => {
                    notice.success("All notifications marked as read");
                    unread.refresh();
                    handle.reload();
                }
                Ok(envelope) => notice.error(envelope.message),
                Err(e) => notice.error(e.user_message()),
            }
        });
    };

    let items = move || {
        state.with(|s| {
            s.rows
                .iter()
                .map(|n| view! { <NotificationItem notification=n.clone() handle=handle /> })
                .collect_view()
        })
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="Notifications">
                <button class="btn btn-ghost btn-sm" on:click=move |_| handle.reload()>
                    <Icon paths=icons::REFRESH class="h-4 w-4" />
                </button>
                <button class="btn btn-primary btn-sm" on:click=mark_all>"Mark all as read"</button>
            </PageHeader>

            <ErrorBanner message=Signal::derive(move || state.with(|s| s.error.clone())) />

            <div class="card bg-base-100 shadow-xl">
                <ul class="divide-y divide-base-200">
                    <Show when=move || state.with(|s| s.is_loading() && s.rows.is_empty())>
                        <li class="p-6 text-center text-base-content/50">
                            <span class="loading loading-spinner loading-md"></span>
                        </li>
                    </Show>
                    <Show when=move || state.with(|s| s.shows_no_results())>
                        <li class="p-6 text-center text-base-content/50">"No notifications."</li>
                    </Show>
                    {items}
                </ul>
            </div>

            <div class="flex justify-end join">
                <button class="join-item btn btn-sm" disabled=move || state.with(|s| !s.has_previous) on:click=move |_| handle.previous_page()>
                    <Icon paths=icons::CHEVRON_LEFT class="h-4 w-4" />
                </button>
                <button class="join-item btn btn-sm btn-disabled">
                    {move || state.with(|s| format!("{} / {}", s.display_page(), s.total_pages.max(1)))}
                </button>
                <button class="join-item btn btn-sm" disabled=move || state.with(|s| !s.has_next) on:click=move |_| handle.next_page()>
                    <Icon paths=icons::CHEVRON_RIGHT class="h-4 w-4" />
                </button>
            </div>
        </div>
    }
}

#[component]
fn NotificationItem(notification: Notification, handle: ListHandle<Notification>) -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();
    let unread = use_unread_count();
    let router = use_router();

    let id: Id = notification.id;
    let read = notification.read;
    let link = notification.link.clone();

    let mark_read = move || {
        spawn_local(async move {
            match auth.services().notifications.mark_read(id).await {
                Ok(envelope) if envelope.success => {
                    unread.refresh();
                    handle.reload();
                }
                Ok(envelope) => notice.error(envelope.message),
                Err(e) => notice.error(e.user_message()),
            }
        });
    };

    // 点击标题：先标记已读，再跳转到关联页面
    let open = move |_| {
        if !read {
            mark_read();
        }
        if let Some(path) = link.as_deref() {
            router.navigate(path);
        }
    };

    view! {
        <li class="p-4 flex items-start gap-4" class=("bg-base-200", !read)>
            <div class="pt-1">
                <Icon paths=icons::BELL class={if read { "h-5 w-5 text-base-content/40" } else { "h-5 w-5 text-primary" }} />
            </div>
            <div class="flex-1 space-y-1">
                <button class="font-semibold hover:underline text-left" on:click=open>
                    {notification.title}
                </button>
                <p class="text-sm text-base-content/80">{notification.message}</p>
                <p class="text-xs text-base-content/50">{display_datetime(notification.created_at)}</p>
            </div>
            {(!read).then(|| view! {
                <button class="btn btn-ghost btn-xs" on:click=move |_| mark_read()>"Mark as read"</button>
            })}
        </li>
    }
}
