//! 列表查询状态模块
//!
//! 每个列表视图持有一个 `ListQuery`：搜索词、字段过滤、排序与分页。
//! 所有修改都遵守同一套规则：
//! - 搜索词、过滤字段、排序发生变化时页码归零
//! - 单纯翻页不会改动任何过滤条件
//!
//! 后端查询串约定（`filterRequest.searchTerm` 必须始终存在）只在
//! `to_query_pairs` 中体现，视图层感知不到。

use crate::{DEFAULT_PAGE_SIZE, FILTER_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个列表视图的搜索 / 过滤 / 排序 / 分页状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search_term: String,
    /// 字段名 -> 值；空值不会出现在这里
    pub filters: BTreeMap<String, String>,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
    /// 从 0 开始
    pub page: u32,
    pub size: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(size: u32) -> Self {
        Self {
            search_term: String::new(),
            filters: BTreeMap::new(),
            sort_by: None,
            sort_direction: SortDirection::Asc,
            page: 0,
            size: size.max(1),
        }
    }

    /// 初始排序
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_direction = direction;
        self
    }

    /// 初始过滤
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(field, value);
        self
    }

    pub fn filter(&self, field: &str) -> Option<&str> {
        self.filters.get(field).map(String::as_str)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty() || !self.filters.is_empty()
    }

    /// 设置搜索词并回到第一页
    ///
    /// 返回查询是否发生了变化。
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into().trim().to_string();
        let changed = term != self.search_term || self.page != 0;
        self.search_term = term;
        self.page = 0;
        changed
    }

    /// 设置单个字段过滤，空白值表示移除该过滤
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) -> bool {
        let field = field.into();
        let value = value.into().trim().to_string();

        let changed = if value.is_empty() {
            self.filters.remove(&field).is_some()
        } else {
            self.filters.insert(field, value.clone()).as_ref() != Some(&value)
        };

        if changed {
            self.page = 0;
        }
        changed
    }

    /// 清空搜索词与所有过滤，保留排序
    pub fn clear_filters(&mut self) -> bool {
        let changed = self.has_active_filters() || self.page != 0;
        self.search_term.clear();
        self.filters.clear();
        self.page = 0;
        changed
    }

    /// 点击列头
    ///
    /// - 同一列：切换方向
    /// - 不同列：选中该列并重置为升序
    ///
    /// 两种情况都回到第一页。
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_by.as_deref() == Some(field) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_by = Some(field.to_string());
            self.sort_direction = SortDirection::Asc;
        }
        self.page = 0;
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// 下一页；已在最后一页时不变
    pub fn next_page(&mut self, total_pages: u32) -> bool {
        if self.page + 1 < total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// 按后端约定渲染查询参数
    ///
    /// `filterRequest.searchTerm` 即使为空也必须出现。
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];

        if let Some(field) = &self.sort_by {
            pairs.push(("sortBy".to_string(), field.clone()));
            pairs.push((
                "sortDirection".to_string(),
                self.sort_direction.as_str().to_string(),
            ));
        }

        pairs.push((
            format!("{}searchTerm", FILTER_PREFIX),
            self.search_term.clone(),
        ));

        for (field, value) in &self.filters {
            if field == "searchTerm" {
                continue;
            }
            pairs.push((format!("{}{}", FILTER_PREFIX, field), value.clone()));
        }

        pairs
    }

    pub fn to_query_string(&self) -> String {
        encode_pairs(&self.to_query_pairs())
    }
}

/// 将键值对编码为 `a=1&b=2` 形式
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs_of(query: &ListQuery) -> BTreeMap<String, String> {
        query.to_query_pairs().into_iter().collect()
    }

    #[test]
    fn test_search_term_always_present() {
        let query = ListQuery::new(10);
        let pairs = pairs_of(&query);
        assert_eq!(pairs.get("filterRequest.searchTerm"), Some(&String::new()));
        assert_eq!(pairs.get("page"), Some(&"0".to_string()));
        assert_eq!(pairs.get("size"), Some(&"10".to_string()));
        assert!(!pairs.contains_key("sortBy"));
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = ListQuery::new(10);
        query.set_page(3);

        assert!(query.set_filter("departmentId", "4"));
        assert_eq!(query.page, 0);

        query.set_page(2);
        // 相同值不算变化，页码保持
        assert!(!query.set_filter("departmentId", "4"));
        assert_eq!(query.page, 2);

        // 清空值即移除过滤，同样归零
        assert!(query.set_filter("departmentId", "  "));
        assert_eq!(query.page, 0);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_sort_toggle_law() {
        let mut query = ListQuery::new(10);
        query.set_page(4);

        query.toggle_sort("lastName");
        assert_eq!(query.sort_by.as_deref(), Some("lastName"));
        assert_eq!(query.sort_direction, SortDirection::Asc);
        assert_eq!(query.page, 0);

        query.toggle_sort("lastName");
        assert_eq!(query.sort_direction, SortDirection::Desc);

        query.toggle_sort("lastName");
        assert_eq!(query.sort_direction, SortDirection::Asc);

        // 换列时无论之前方向如何都重置为升序
        query.toggle_sort("lastName");
        assert_eq!(query.sort_direction, SortDirection::Desc);
        query.set_page(1);
        query.toggle_sort("hireDate");
        assert_eq!(query.sort_by.as_deref(), Some("hireDate"));
        assert_eq!(query.sort_direction, SortDirection::Asc);
        assert_eq!(query.page, 0);
    }

    #[test]
    fn test_page_navigation_keeps_filters() {
        let mut query = ListQuery::new(10)
            .with_filter("status", "PENDING")
            .with_sort("startDate", SortDirection::Desc);
        query.set_search_term("Mehmet");

        assert!(query.next_page(3));
        assert!(query.next_page(3));
        assert!(!query.next_page(3));
        assert_eq!(query.page, 2);
        assert!(query.previous_page());
        assert_eq!(query.page, 1);

        assert_eq!(query.search_term, "Mehmet");
        assert_eq!(query.filter("status"), Some("PENDING"));
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_search_submit_goes_to_first_page() {
        let mut query = ListQuery::new(10);
        query.set_page(5);
        query.set_search_term("Ayşe");

        let pairs = pairs_of(&query);
        assert_eq!(pairs.get("filterRequest.searchTerm"), Some(&"Ayşe".to_string()));
        assert_eq!(pairs.get("page"), Some(&"0".to_string()));
    }

    #[test]
    fn test_clear_filters_keeps_sort() {
        let mut query = ListQuery::new(10)
            .with_filter("role", "HR")
            .with_sort("email", SortDirection::Desc);
        query.set_search_term("ali");
        query.set_page(2);

        assert!(query.clear_filters());
        assert_eq!(query.search_term, "");
        assert!(query.filters.is_empty());
        assert_eq!(query.page, 0);
        assert_eq!(query.sort_by.as_deref(), Some("email"));
        assert_eq!(query.sort_direction, SortDirection::Desc);

        assert!(!query.clear_filters());
    }

    #[test]
    fn test_query_string_encoding() {
        let query = ListQuery::new(20)
            .with_sort("firstName", SortDirection::Desc)
            .with_filter("departmentId", "3");
        let mut query = query;
        query.set_search_term("Ayşe Yılmaz");

        assert_eq!(
            query.to_query_string(),
            "page=0&size=20&sortBy=firstName&sortDirection=desc\
             &filterRequest.searchTerm=Ay%C5%9Fe%20Y%C4%B1lmaz\
             &filterRequest.departmentId=3"
        );
    }
}
