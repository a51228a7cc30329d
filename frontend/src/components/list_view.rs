//! 通用分页列表视图
//!
//! 搜索框 + 提交、清除筛选、可排序表头、翻页、错误横幅、加载指示、
//! “无结果”行，以及按角色显示的行操作（查看 / 编辑 / 删除）。

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::feedback::{ErrorBanner, confirm, use_notice};
use crate::components::icons::{self, Icon};
use crate::list::ListHandle;
use crate::web::route::{AppRoute, ResourceRoute};
use crate::web::router::use_router;
use hrms_shared::{Id, Resource, SortDirection};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

/// 表格列
pub struct Column<T> {
    pub header: &'static str,
    /// 可排序列对应的后端字段
    pub sort_key: Option<&'static str>,
    pub cell: fn(&T) -> AnyView,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> Column<T> {
    pub fn new(header: &'static str, cell: fn(&T) -> AnyView) -> Self {
        Self {
            header,
            sort_key: None,
            cell,
        }
    }

    pub fn sortable(header: &'static str, sort_key: &'static str, cell: fn(&T) -> AnyView) -> Self {
        Self {
            header,
            sort_key: Some(sort_key),
            cell,
        }
    }
}

/// 下拉筛选
#[derive(Clone)]
pub struct ListFilter {
    pub field: &'static str,
    pub label: &'static str,
    pub options: Vec<(String, String)>,
}

/// 行内附加操作（如审批请假）
pub type RowActions<T> = fn(&T, ListHandle<T>) -> AnyView;

#[component]
pub fn ListView<R>(
    handle: ListHandle<R>,
    columns: Vec<Column<R>>,
    area: Area,
    #[prop(optional)] filters: Vec<ListFilter>,
    /// 记录所属员工，用于判断查看 / 编辑权限
    #[prop(optional)]
    owner: Option<fn(&R) -> Option<Id>>,
    #[prop(optional)] actions: Option<RowActions<R>>,
    #[prop(default = true)] searchable: bool,
) -> impl IntoView
where
    R: Resource + Send + Sync,
{
    let auth = use_auth();
    let router = use_router();
    let notice = use_notice();
    let state = handle.state;
    let column_count = columns.len() + 1;
    let columns = StoredValue::new(columns);

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        handle.submit_search();
    };

    let delete_row = move |id: Id| {
        if !confirm(&format!("Delete this {}?", R::NAME)) {
            return;
        }
        spawn_local(async move {
            let service = auth.services().resource::<R>();
            match service.delete(id).await {
                Ok(envelope) if envelope.success => {
                    info!("[List] Deleted {} #{}", R::NAME, id);
                    notice.success(format!("Deleted {}", R::NAME));
                    handle.refresh_after_mutation();
                }
                Ok(envelope) => notice.error(envelope.message),
                Err(e) => notice.error(e.user_message()),
            }
        });
    };

    let sort_indicator = move |key: &'static str| {
        state.with(|s| {
            (s.query.sort_by.as_deref() == Some(key)).then(|| match s.query.sort_direction {
                SortDirection::Asc => icons::ARROW_UP,
                SortDirection::Desc => icons::ARROW_DOWN,
            })
        })
    };

    let header_row = move || {
        columns.with_value(|cols| {
            cols.iter()
                .map(|col| match col.sort_key {
                    Some(key) => view! {
                        <th>
                            <button class="flex items-center gap-1 hover:text-primary" on:click=move |_| handle.sort_by(key)>
                                {col.header}
                                {move || sort_indicator(key).map(|paths| view! { <Icon paths=paths class="h-3 w-3" /> })}
                            </button>
                        </th>
                    }
                    .into_any(),
                    None => view! { <th>{col.header}</th> }.into_any(),
                })
                .collect_view()
        })
    };

    let body_rows = move || {
        let caps = auth.capabilities();
        state.with(|s| {
            s.rows
                .iter()
                .map(|row| {
                    let id = row.id();
                    let row_owner = owner.and_then(|f| f(row));
                    let cells = columns.with_value(|cols| {
                        cols.iter()
                            .map(|col| view! { <td>{(col.cell)(row)}</td> })
                            .collect_view()
                    });
                    let extra = actions.map(|f| f(row, handle));
                    let can_view = caps.can_view(area, row_owner);
                    let can_edit = caps.can_edit(area, row_owner);
                    let can_delete = caps.can_delete(area);

                    view! {
                        <tr class="hover">
                            {cells}
                            <td class="text-right whitespace-nowrap">
                                {extra}
                                {can_view.then(|| view! {
                                    <button class="btn btn-ghost btn-xs" on:click=move |_| router.navigate_to(AppRoute::Resource(area, ResourceRoute::View(id)))>
                                        "View"
                                    </button>
                                })}
                                {can_edit.then(|| view! {
                                    <button class="btn btn-ghost btn-xs" title="Edit" on:click=move |_| router.navigate_to(AppRoute::Resource(area, ResourceRoute::Edit(id)))>
                                        <Icon paths=icons::PENCIL class="h-4 w-4" />
                                    </button>
                                })}
                                {can_delete.then(|| view! {
                                    <button class="btn btn-ghost btn-xs text-error" title="Delete" on:click=move |_| delete_row(id)>
                                        <Icon paths=icons::TRASH class="h-4 w-4" />
                                    </button>
                                })}
                            </td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    let filter_controls = filters
        .into_iter()
        .map(|filter| {
            let field = filter.field;
            view! {
                <select
                    class="select select-bordered select-sm"
                    prop:value=move || state.with(|s| s.query.filter(field).unwrap_or_default().to_string())
                    on:change=move |ev| handle.set_filter(field, event_target_value(&ev))
                >
                    <option value="">{format!("All {}", filter.label)}</option>
                    {filter
                        .options
                        .into_iter()
                        .map(|(value, text)| view! { <option value=value>{text}</option> })
                        .collect_view()}
                </select>
            }
        })
        .collect_view();

    let page_buttons = move || {
        state.with(|s| {
            s.page_numbers(5)
                .into_iter()
                .map(|page| {
                    let active = page == s.query.page;
                    view! {
                        <button
                            class={if active { "join-item btn btn-sm btn-active" } else { "join-item btn btn-sm" }}
                            on:click=move |_| handle.go_to_page(page)
                        >
                            {page + 1}
                        </button>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex flex-wrap items-center justify-between gap-2 p-6 pb-2">
                    <div class="flex flex-wrap items-center gap-2">
                        {searchable.then(|| view! {
                            <form class="join" on:submit=on_search>
                                <input
                                    type="search"
                                    class="input input-bordered input-sm join-item"
                                    placeholder="Search..."
                                    prop:value=move || state.with(|s| s.search_draft.clone())
                                    on:input=move |ev| handle.set_search_draft(event_target_value(&ev))
                                />
                                <button type="submit" class="btn btn-sm btn-primary join-item">
                                    <Icon paths=icons::SEARCH class="h-4 w-4" />
                                </button>
                            </form>
                        })}
                        {filter_controls}
                        <Show when=move || state.with(|s| s.query.has_active_filters() || !s.search_draft.is_empty())>
                            <button class="btn btn-sm btn-ghost" on:click=move |_| handle.clear_filters()>
                                "Clear filters"
                            </button>
                        </Show>
                    </div>
                    <div class="flex items-center gap-2">
                        <button class="btn btn-ghost btn-circle btn-sm" title="Reload" on:click=move |_| handle.reload() disabled=move || state.with(|s| s.is_loading())>
                            <span class="inline-flex" class=("animate-spin", move || state.with(|s| s.is_loading()))>
                                <Icon paths=icons::REFRESH class="h-4 w-4" />
                            </span>
                        </button>
                        <Show when=move || auth.capabilities().can_create(area)>
                            <button class="btn btn-primary btn-sm gap-1" on:click=move |_| router.navigate_to(AppRoute::Resource(area, ResourceRoute::New))>
                                <Icon paths=icons::PLUS class="h-4 w-4" />
                                "New"
                            </button>
                        </Show>
                    </div>
                </div>

                <div class="px-6">
                    <ErrorBanner message=Signal::derive(move || state.with(|s| s.error.clone())) />
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                {header_row}
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || state.with(|s| s.is_loading() && s.rows.is_empty())>
                                <tr>
                                    <td colspan=column_count class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || state.with(|s| s.shows_no_results())>
                                <tr>
                                    <td colspan=column_count class="text-center py-8 text-base-content/50">
                                        "No results found."
                                    </td>
                                </tr>
                            </Show>
                            {body_rows}
                        </tbody>
                    </table>
                </div>

                <div class="flex flex-wrap items-center justify-between gap-2 p-4">
                    <span class="text-sm text-base-content/70">
                        {move || state.with(|s| format!("{} record(s) · page {} of {}", s.total, s.display_page(), s.total_pages.max(1)))}
                    </span>
                    <div class="join">
                        <button class="join-item btn btn-sm" disabled=move || state.with(|s| !s.has_previous) on:click=move |_| handle.previous_page()>
                            <Icon paths=icons::CHEVRON_LEFT class="h-4 w-4" />
                        </button>
                        {page_buttons}
                        <button class="join-item btn btn-sm" disabled=move || state.with(|s| !s.has_next) on:click=move |_| handle.next_page()>
                            <Icon paths=icons::CHEVRON_RIGHT class="h-4 w-4" />
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
