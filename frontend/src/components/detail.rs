//! 通用详情页

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::feedback::{ErrorBanner, PageHeader, Spinner, confirm, use_notice};
use crate::components::icons::{self, Icon};
use crate::task::spawn_scoped;
use crate::web::route::{AppRoute, ResourceRoute};
use crate::web::router::use_router;
use hrms_shared::{ApiResponse, Id, Resource};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 详情字段：(标签, 显示值)
pub type DetailFields<T> = fn(&T) -> Vec<(&'static str, String)>;

/// 加载单条记录
pub struct ItemResource<R: Send + Sync + 'static> {
    pub item: RwSignal<Option<R>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
}

impl<R: Send + Sync + 'static> Clone for ItemResource<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Send + Sync + 'static> Copy for ItemResource<R> {}

pub fn use_item<R: Resource + Send + Sync>(id: Id) -> ItemResource<R> {
    let auth = use_auth();
    let resource = ItemResource {
        item: RwSignal::new(None),
        error: RwSignal::new(None),
        loading: RwSignal::new(true),
    };

    spawn_scoped(async move {
        let service = auth.services().resource::<R>();
        match service.get(id).await.map(ApiResponse::into_result) {
            Ok(Ok(item)) => resource.item.set(Some(item)),
            Ok(Err(message)) => resource.error.set(Some(message)),
            Err(e) => resource.error.set(Some(e.user_message())),
        }
        resource.loading.set(false);
    });

    resource
}

#[component]
pub fn DetailPage<R>(
    id: Id,
    area: Area,
    fields: DetailFields<R>,
    #[prop(optional)] owner: Option<fn(&R) -> Option<Id>>,
    /// 详情下方的附加区域（如请假审批）
    #[prop(optional)]
    extra: Option<fn(R) -> AnyView>,
) -> impl IntoView
where
    R: Resource + Send + Sync,
{
    let auth = use_auth();
    let router = use_router();
    let notice = use_notice();
    let resource = use_item::<R>(id);

    let row_owner = move || resource.item.with(|i| i.as_ref().and_then(|r| owner.and_then(|f| f(r))));
    let can_view = move || auth.capabilities().can_view(area, row_owner());
    let can_edit = move || resource.item.with(Option::is_some) && auth.capabilities().can_edit(area, row_owner());
    let can_delete = move || resource.item.with(Option::is_some) && auth.capabilities().can_delete(area);

    let on_delete = move |_| {
        if !confirm(&format!("Delete this {}?", R::NAME)) {
            return;
        }
        spawn_local(async move {
            let service = auth.services().resource::<R>();
            match service.delete(id).await {
                Ok(envelope) if envelope.success => {
                    notice.success(format!("Deleted {}", R::NAME));
                    router.navigate_to(AppRoute::list(area));
                }
                Ok(envelope) => notice.error(envelope.message),
                Err(e) => notice.error(e.user_message()),
            }
        });
    };

    let body = move || {
        if resource.loading.get() {
            return view! { <Spinner /> }.into_any();
        }
        if !can_view() {
            return view! {
                <div class="alert alert-warning">"You do not have access to this record."</div>
            }
            .into_any();
        }
        resource.item.with(|item| match item {
            Some(item) => {
                let rows = fields(item)
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="grid grid-cols-3 gap-4 py-2 border-b border-base-200">
                            <dt class="font-medium text-base-content/70">{label}</dt>
                            <dd class="col-span-2">{if value.is_empty() { "-".to_string() } else { value }}</dd>
                        </div>
                    })
                    .collect_view();
                let more = extra.map(|f| f(item.clone()));
                view! {
                    <dl>{rows}</dl>
                    {more}
                }
                .into_any()
            }
            None => ().into_any(),
        })
    };

    view! {
        <div class="space-y-6">
            <PageHeader title=format!("{} #{}", area.label(), id)>
                <button class="btn btn-ghost btn-sm" on:click=move |_| router.navigate_to(AppRoute::list(area))>
                    "Back"
                </button>
                <Show when=can_edit>
                    <button class="btn btn-primary btn-sm gap-1" on:click=move |_| router.navigate_to(AppRoute::Resource(area, ResourceRoute::Edit(id)))>
                        <Icon paths=icons::PENCIL class="h-4 w-4" />
                        "Edit"
                    </button>
                </Show>
                <Show when=can_delete>
                    <button class="btn btn-error btn-outline btn-sm gap-1" on:click=on_delete>
                        <Icon paths=icons::TRASH class="h-4 w-4" />
                        "Delete"
                    </button>
                </Show>
            </PageHeader>
            <div class="card bg-base-100 shadow-xl max-w-3xl">
                <div class="card-body">
                    <ErrorBanner message=resource.error />
                    {body}
                </div>
            </div>
        </div>
    }
}
