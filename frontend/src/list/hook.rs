use super::controller::ListController;
use super::state::ListState;
use crate::services::PageFetcher;
use hrms_shared::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

/// 组件侧的列表句柄
///
/// `Copy`，可以直接移入事件闭包。控制器本身保存在本地 `StoredValue` 中。
pub struct ListHandle<T: Send + Sync + 'static> {
    pub state: ReadSignal<ListState<T>>,
    controller: StoredValue<ListController<T>, LocalStorage>,
}

impl<T: Send + Sync + 'static> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListHandle<T> {}

impl<T: Clone + Send + Sync + 'static> ListHandle<T> {
    fn run<F, Fut>(&self, action: F)
    where
        F: FnOnce(ListController<T>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        if let Some(controller) = self.controller.try_get_value() {
            spawn_local(action(controller));
        }
    }

    pub fn set_search_draft(&self, text: String) {
        self.controller.with_value(|c| c.set_search_draft(&text));
    }

    pub fn submit_search(&self) {
        self.run(|c| async move { c.submit_search().await });
    }

    pub fn set_filter(&self, field: &'static str, value: String) {
        self.run(move |c| async move { c.set_filter(field, &value).await });
    }

    pub fn clear_filters(&self) {
        self.run(|c| async move { c.clear_filters().await });
    }

    pub fn sort_by(&self, field: &'static str) {
        self.run(move |c| async move { c.sort_by(field).await });
    }

    pub fn go_to_page(&self, page: u32) {
        self.run(move |c| async move { c.go_to_page(page).await });
    }

    pub fn next_page(&self) {
        self.run(|c| async move { c.next_page().await });
    }

    pub fn previous_page(&self) {
        self.run(|c| async move { c.previous_page().await });
    }

    pub fn reload(&self) {
        self.run(|c| async move { c.reload().await });
    }

    pub fn refresh_after_mutation(&self) {
        self.run(|c| async move { c.refresh_after_mutation().await });
    }
}

/// 创建列表控制器并立即加载第一页
///
/// 组件卸载时控制器被 `dispose`，未完成的请求被中止。
pub fn use_list_controller<T>(query: ListQuery, fetch: PageFetcher<T>) -> ListHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    let controller = ListController::new(query, fetch);
    let (state, set_state) = signal(controller.state());
    controller.subscribe(move |s| set_state.set(s.clone()));

    let stored = StoredValue::new_local(controller.clone());
    on_cleanup(move || {
        stored.try_with_value(|c| c.dispose());
    });

    spawn_local(async move { controller.mount().await });

    ListHandle {
        state,
        controller: stored,
    }
}
