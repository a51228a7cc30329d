use hrms_shared::{ListQuery, Page};

/// 列表加载状态
///
/// 初始为 `Loading`，之后 `Loading -> {Success | Error}`，每次触发回到 `Loading`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Success,
    Error,
}

/// 列表视图的展示状态
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// 最近一次触发使用的查询
    pub query: ListQuery,
    /// 搜索框中尚未提交的内容
    pub search_draft: String,
    pub rows: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl<T> ListState<T> {
    pub fn new(query: ListQuery) -> Self {
        Self {
            search_draft: query.search_term.clone(),
            query,
            rows: Vec::new(),
            total: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
            status: LoadStatus::Loading,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// 成功加载且没有任何行：视图必须显示“无结果”，而不是空白
    pub fn shows_no_results(&self) -> bool {
        self.status == LoadStatus::Success && self.rows.is_empty()
    }

    /// 当前页（从 1 开始，用于显示）
    pub fn display_page(&self) -> u32 {
        self.query.page + 1
    }

    /// 分页条上显示的页码（从 0 开始），以当前页为中心最多 `window` 个
    pub fn page_numbers(&self, window: u32) -> Vec<u32> {
        if self.total_pages == 0 || window == 0 {
            return Vec::new();
        }
        let window = window.min(self.total_pages);
        let half = window / 2;
        let start = self
            .query
            .page
            .saturating_sub(half)
            .min(self.total_pages - window);
        (start..start + window).collect()
    }

    pub(crate) fn apply_page(&mut self, page: Page<T>) {
        self.rows = page.data;
        self.total = page.total;
        self.total_pages = page.total_pages;
        self.has_next = page.has_next;
        self.has_previous = page.has_previous;
    }
}
