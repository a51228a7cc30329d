use super::state::{ListState, LoadStatus};
use crate::error::{ApiResult, GENERIC_ERROR_MESSAGE};
use crate::services::PageFetcher;
use futures::future::{AbortHandle, Abortable};
use hrms_shared::{ApiResponse, ListQuery, Page};
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Observer<T> = Rc<dyn Fn(&ListState<T>)>;

/// 一次取数的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Applied,
    /// 页码越界（如删除了最后一页的唯一一行），已回退到最后一页并需要重新取数
    Clamped,
    /// 已被更新的触发取代，或控制器已卸载
    Stale,
}

struct ControllerInner<T> {
    state: RefCell<ListState<T>>,
    fetch: PageFetcher<T>,
    generation: Cell<u64>,
    in_flight: RefCell<Option<AbortHandle>>,
    disposed: Cell<bool>,
    observers: RefCell<Vec<Observer<T>>>,
}

/// 分页列表控制器
///
/// 每次触发（挂载、搜索、筛选、排序、翻页、刷新）：
/// 1. 中止上一次未完成的请求，代数 +1
/// 2. 状态置为 `Loading` 并清除错误
/// 3. 用组合后的查询取数
/// 4. 只有代数仍为最新时才写回结果
///
/// 失败时保留之前的行，只设置错误消息。
pub struct ListController<T> {
    inner: Rc<ControllerInner<T>>,
}

impl<T> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> ListController<T> {
    pub fn new(query: ListQuery, fetch: PageFetcher<T>) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                state: RefCell::new(ListState::new(query)),
                fetch,
                generation: Cell::new(0),
                in_flight: RefCell::new(None),
                disposed: Cell::new(false),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// 当前状态快照
    pub fn state(&self) -> ListState<T> {
        self.inner.state.borrow().clone()
    }

    /// 注册状态变化观察者
    pub fn subscribe(&self, observer: impl Fn(&ListState<T>) + 'static) {
        self.inner.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    // =========================================================
    // 触发
    // =========================================================

    /// 首次加载
    pub async fn mount(&self) {
        self.fetch_current().await;
    }

    /// 以当前查询重新加载
    pub async fn reload(&self) {
        self.fetch_current().await;
    }

    /// 增删改成功后刷新，保留搜索 / 筛选 / 排序 / 页码
    pub async fn refresh_after_mutation(&self) {
        self.fetch_current().await;
    }

    /// 更新搜索框内容（不触发取数）
    pub fn set_search_draft(&self, text: &str) {
        self.inner.state.borrow_mut().search_draft = text.to_string();
        self.notify();
    }

    /// 提交搜索框内容，回到第一页
    pub async fn submit_search(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            let draft = state.search_draft.clone();
            state.query.set_search_term(draft);
        }
        self.fetch_current().await;
    }

    /// 设置搜索词并立即提交
    pub async fn search(&self, term: &str) {
        self.inner.state.borrow_mut().search_draft = term.to_string();
        self.submit_search().await;
    }

    /// 设置单个筛选条件（空值表示移除）
    pub async fn set_filter(&self, field: &str, value: &str) {
        let changed = self
            .inner
            .state
            .borrow_mut()
            .query
            .set_filter(field, value);
        if changed {
            self.fetch_current().await;
        }
    }

    /// 清除搜索词与所有筛选条件，排序保持不变
    pub async fn clear_filters(&self) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            state.search_draft.clear();
            state.query.clear_filters()
        };
        if changed {
            self.fetch_current().await;
        } else {
            self.notify();
        }
    }

    /// 点击表头：同一字段切换方向，新字段从升序开始
    pub async fn sort_by(&self, field: &str) {
        self.inner.state.borrow_mut().query.toggle_sort(field);
        self.fetch_current().await;
    }

    /// 跳转到指定页（从 0 开始），超出范围时取最后一页
    pub async fn go_to_page(&self, page: u32) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let last = state.total_pages.saturating_sub(1);
            state.query.set_page(page.min(last))
        };
        if changed {
            self.fetch_current().await;
        }
    }

    pub async fn next_page(&self) {
        let changed = {
            let mut state = self.inner.state.borrow_mut();
            let total_pages = state.total_pages;
            state.query.next_page(total_pages)
        };
        if changed {
            self.fetch_current().await;
        }
    }

    pub async fn previous_page(&self) {
        let changed = self.inner.state.borrow_mut().query.previous_page();
        if changed {
            self.fetch_current().await;
        }
    }

    /// 卸载：中止未完成的请求，之后的结果全部丢弃
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        if let Some(handle) = self.inner.in_flight.borrow_mut().take() {
            handle.abort();
        }
        self.inner.observers.borrow_mut().clear();
        debug!("[List] Controller disposed");
    }

    // =========================================================
    // 取数
    // =========================================================

    async fn fetch_current(&self) {
        loop {
            if self.is_disposed() {
                return;
            }

            let (generation, query, handle) = self.begin();
            let request = (self.inner.fetch)(query.clone());
            let Ok(result) = Abortable::new(request, handle).await else {
                debug!("[List] Request #{} aborted", generation);
                return;
            };

            match self.finish(generation, &query, result) {
                Outcome::Clamped => continue,
                Outcome::Applied | Outcome::Stale => return,
            }
        }
    }

    fn begin(&self) -> (u64, ListQuery, futures::future::AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.inner.in_flight.replace(Some(handle)) {
            previous.abort();
        }

        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);

        let query = {
            let mut state = self.inner.state.borrow_mut();
            state.status = LoadStatus::Loading;
            state.error = None;
            state.query.clone()
        };
        self.notify();
        (generation, query, registration)
    }

    fn finish(
        &self,
        generation: u64,
        query: &ListQuery,
        result: ApiResult<ApiResponse<Page<T>>>,
    ) -> Outcome {
        if self.is_disposed() || generation != self.inner.generation.get() {
            debug!("[List] Dropping stale response #{}", generation);
            return Outcome::Stale;
        }
        self.inner.in_flight.borrow_mut().take();

        let outcome = {
            let mut state = self.inner.state.borrow_mut();
            match result.map(ApiResponse::into_result) {
                Ok(Ok(page)) => {
                    if !page.is_consistent() {
                        warn!(
                            "[List] Inconsistent page metadata: page={} size={} total={} totalPages={} rows={}",
                            page.page,
                            page.size,
                            page.total,
                            page.total_pages,
                            page.data.len()
                        );
                    }

                    if query.page > 0 && page.data.is_empty() && query.page >= page.total_pages {
                        let last = page.total_pages.saturating_sub(1);
                        debug!("[List] Page {} out of range, moving to {}", query.page, last);
                        state.query.page = last;
                        Outcome::Clamped
                    } else {
                        state.apply_page(page);
                        state.status = LoadStatus::Success;
                        Outcome::Applied
                    }
                }
                Ok(Err(message)) => {
                    state.status = LoadStatus::Error;
                    state.error = Some(if message.trim().is_empty() {
                        GENERIC_ERROR_MESSAGE.to_string()
                    } else {
                        message
                    });
                    Outcome::Applied
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        // 会话已被清除，路由随后跳转到登录页
                        debug!("[List] Fetch rejected, session expired");
                    } else {
                        warn!("[List] Fetch failed (status {:?}): {}", e.status(), e);
                    }
                    state.status = LoadStatus::Error;
                    state.error = Some(e.user_message());
                    Outcome::Applied
                }
            }
        };

        if outcome == Outcome::Applied {
            self.notify();
        }
        outcome
    }

    fn notify(&self) {
        // 复制观察者列表，允许回调中再次访问控制器
        let observers = self.inner.observers.borrow().clone();
        if observers.is_empty() {
            return;
        }
        let snapshot = self.state();
        for observer in observers {
            observer(&snapshot);
        }
    }
}
