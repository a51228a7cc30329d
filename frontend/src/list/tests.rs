use super::*;
use crate::error::{ApiError, ApiResult};
use crate::services::{PageFetcher, Services};
use crate::testing::{client_with, page_body, signed_in_session};
use futures::FutureExt;
use futures::channel::oneshot;
use hrms_shared::{ApiResponse, ListQuery, Page, SortDirection};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

type Reply = ApiResult<ApiResponse<Page<i32>>>;
type Log = Rc<RefCell<Vec<ListQuery>>>;

fn page(items: Vec<i32>, total: u64, page: u32, size: u32) -> Page<i32> {
    let total_pages = total.div_ceil(u64::from(size)) as u32;
    Page {
        data: items,
        total,
        page,
        size,
        total_pages,
        has_next: page + 1 < total_pages,
        has_previous: page > 0,
    }
}

fn ok(p: Page<i32>) -> Reply {
    Ok(ApiResponse::ok(p))
}

/// 按顺序返回预设响应，并记录每次请求的查询
fn scripted(replies: Vec<Reply>) -> (PageFetcher<i32>, Log) {
    let replies = Rc::new(RefCell::new(VecDeque::from(replies)));
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let recorded = log.clone();
    let fetcher: PageFetcher<i32> = Rc::new(move |query: ListQuery| {
        recorded.borrow_mut().push(query);
        let reply = replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no reply queued".to_string())));
        async move { reply }.boxed_local()
    });
    (fetcher, log)
}

/// 每次请求都等待测试显式放行
fn gated(gates: Vec<oneshot::Receiver<Reply>>) -> (PageFetcher<i32>, Log) {
    let gates = Rc::new(RefCell::new(VecDeque::from(gates)));
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let recorded = log.clone();
    let fetcher: PageFetcher<i32> = Rc::new(move |query: ListQuery| {
        recorded.borrow_mut().push(query);
        let gate = gates.borrow_mut().pop_front().expect("no gate queued");
        async move {
            gate.await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_string())))
        }
        .boxed_local()
    });
    (fetcher, log)
}

#[tokio::test]
async fn test_mount_loads_first_page() {
    let (fetcher, log) = scripted(vec![ok(page(vec![1, 2, 3], 23, 0, 10))]);
    let controller = ListController::new(ListQuery::new(10), fetcher);
    // 首次渲染即显示加载中
    assert!(controller.state().is_loading());
    assert!(!controller.state().shows_no_results());

    controller.mount().await;

    let state = controller.state();
    assert_eq!(state.status, LoadStatus::Success);
    assert_eq!(state.rows, vec![1, 2, 3]);
    assert_eq!(state.total, 23);
    assert_eq!(state.total_pages, 3);
    assert!(state.has_next);
    assert!(!state.has_previous);
    assert_eq!(state.error, None);
    assert_eq!(log.borrow().len(), 1);
}

#[tokio::test]
async fn test_later_trigger_supersedes_earlier_one() {
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    let (fetcher, log) = gated(vec![rx_first, rx_second]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    futures::join!(controller.mount(), controller.search("Ayşe"), async {
        // 后发的请求先返回，先发的请求后返回
        let _ = tx_second.send(ok(page(vec![42], 1, 0, 10)));
        let _ = tx_first.send(ok(page(vec![1, 2, 3], 3, 0, 10)));
    });

    let state = controller.state();
    assert_eq!(state.rows, vec![42]);
    assert_eq!(state.status, LoadStatus::Success);
    assert_eq!(state.query.search_term, "Ayşe");
    assert_eq!(log.borrow().len(), 2);
}

#[tokio::test]
async fn test_dispose_discards_pending_response() {
    let (tx, rx) = oneshot::channel();
    let (fetcher, _) = gated(vec![rx]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    let notified = Rc::new(Cell::new(0));
    let counter = notified.clone();
    controller.subscribe(move |_| counter.set(counter.get() + 1));

    futures::join!(controller.mount(), async {
        controller.dispose();
        let _ = tx.send(ok(page(vec![7], 1, 0, 10)));
    });

    assert!(controller.is_disposed());
    assert!(controller.state().rows.is_empty());
    // 只有进入 Loading 时的一次通知
    assert_eq!(notified.get(), 1);

    // 卸载后的触发不再取数
    controller.reload().await;
    assert_eq!(notified.get(), 1);
}

#[tokio::test]
async fn test_transport_error_keeps_previous_rows() {
    let (fetcher, _) = scripted(vec![
        ok(page(vec![1, 2], 2, 0, 10)),
        Err(ApiError::Network("connection reset".to_string())),
    ]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    controller.mount().await;
    controller.reload().await;

    let state = controller.state();
    assert_eq!(state.status, LoadStatus::Error);
    assert_eq!(state.rows, vec![1, 2]);
    assert_eq!(
        state.error.as_deref(),
        Some("Network error: connection reset")
    );
    assert!(!state.shows_no_results());
}

#[tokio::test]
async fn test_failure_envelope_surfaces_backend_message() {
    let (fetcher, _) = scripted(vec![
        ok(page(vec![5], 1, 0, 10)),
        Ok(ApiResponse::failure("Access denied")),
    ]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    controller.mount().await;
    controller.sort_by("lastName").await;

    let state = controller.state();
    assert_eq!(state.status, LoadStatus::Error);
    assert_eq!(state.error.as_deref(), Some("Access denied"));
    assert_eq!(state.rows, vec![5]);
}

#[tokio::test]
async fn test_next_trigger_clears_error() {
    let (fetcher, _) = scripted(vec![
        Err(ApiError::Network("offline".to_string())),
        ok(page(vec![1], 1, 0, 10)),
    ]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    controller.mount().await;
    assert!(controller.state().error.is_some());

    controller.reload().await;
    let state = controller.state();
    assert_eq!(state.error, None);
    assert_eq!(state.status, LoadStatus::Success);
}

#[tokio::test]
async fn test_empty_result_shows_no_results() {
    let (fetcher, _) = scripted(vec![ok(page(vec![], 0, 0, 10))]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    controller.mount().await;

    let state = controller.state();
    assert!(state.shows_no_results());
    assert_eq!(state.total_pages, 0);
    assert!(!state.has_next);
}

#[tokio::test]
async fn test_refresh_after_delete_keeps_query_and_clamps_page() {
    let (fetcher, log) = scripted(vec![
        ok(page(vec![1; 10], 11, 0, 10)),
        ok(page(vec![1; 10], 11, 0, 10)),
        ok(page(vec![11], 11, 1, 10)),
        // 删除了第二页的唯一一行
        ok(page(vec![], 10, 1, 10)),
        ok(page(vec![1; 10], 10, 0, 10)),
    ]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    controller.mount().await;
    controller.set_filter("status", "ACTIVE").await;
    controller.next_page().await;
    assert_eq!(controller.state().rows, vec![11]);

    controller.refresh_after_mutation().await;

    let pages: Vec<u32> = log.borrow().iter().map(|q| q.page).collect();
    assert_eq!(pages, vec![0, 0, 1, 1, 0]);
    for query in log.borrow().iter().skip(1) {
        assert_eq!(query.filter("status"), Some("ACTIVE"));
    }

    let state = controller.state();
    assert_eq!(state.query.page, 0);
    assert_eq!(state.rows.len(), 10);
    assert_eq!(state.total_pages, 1);
    assert_eq!(state.status, LoadStatus::Success);
}

#[tokio::test]
async fn test_filter_change_returns_to_first_page() {
    let (fetcher, log) = scripted(vec![
        ok(page(vec![1], 30, 0, 10)),
        ok(page(vec![2], 30, 2, 10)),
        ok(page(vec![3], 5, 0, 10)),
    ]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    controller.mount().await;
    controller.go_to_page(2).await;
    controller.set_filter("departmentId", "4").await;

    let log = log.borrow();
    assert_eq!(log[1].page, 2);
    assert_eq!(log[2].page, 0);
    assert_eq!(log[2].filter("departmentId"), Some("4"));
}

#[tokio::test]
async fn test_unchanged_filter_does_not_refetch() {
    let (fetcher, log) = scripted(vec![
        ok(page(vec![1], 1, 0, 10)),
        ok(page(vec![1], 1, 0, 10)),
    ]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    controller.mount().await;
    controller.set_filter("status", "PENDING").await;
    controller.set_filter("status", "PENDING").await;
    controller.previous_page().await;
    controller.next_page().await;

    assert_eq!(log.borrow().len(), 2);
}

#[tokio::test]
async fn test_sort_header_toggles_direction() {
    let (fetcher, log) = scripted(vec![
        ok(page(vec![1], 1, 0, 10)),
        ok(page(vec![1], 1, 0, 10)),
        ok(page(vec![1], 1, 0, 10)),
        ok(page(vec![1], 1, 0, 10)),
    ]);
    let controller = ListController::new(ListQuery::new(10), fetcher);

    controller.mount().await;
    controller.sort_by("lastName").await;
    controller.sort_by("lastName").await;
    controller.sort_by("hireDate").await;

    let log = log.borrow();
    assert_eq!(log[1].sort_by.as_deref(), Some("lastName"));
    assert_eq!(log[1].sort_direction, SortDirection::Asc);
    assert_eq!(log[2].sort_direction, SortDirection::Desc);
    assert_eq!(log[3].sort_by.as_deref(), Some("hireDate"));
    assert_eq!(log[3].sort_direction, SortDirection::Asc);
}

#[tokio::test]
async fn test_clear_filters_keeps_sort_and_empties_draft() {
    let (fetcher, log) = scripted(vec![
        ok(page(vec![1], 1, 0, 10)),
        ok(page(vec![1], 1, 0, 10)),
        ok(page(vec![1], 1, 0, 10)),
    ]);
    let query = ListQuery::new(10).with_sort("email", SortDirection::Desc);
    let controller = ListController::new(query, fetcher);

    controller.mount().await;
    controller.search("mehmet").await;
    controller.clear_filters().await;

    let state = controller.state();
    assert_eq!(state.search_draft, "");
    assert_eq!(state.query.search_term, "");
    assert_eq!(state.query.sort_by.as_deref(), Some("email"));
    assert_eq!(state.query.sort_direction, SortDirection::Desc);
    assert_eq!(log.borrow().len(), 3);
}

#[tokio::test]
async fn test_search_submit_sends_one_request() {
    let (session, _) = signed_in_session();
    let (client, transport) = client_with(&session);
    let services = Services::new(client);
    transport.push_json(200, &page_body("", 0, 0, 10, 0));
    transport.push_json(200, &page_body("", 0, 0, 10, 0));

    let controller = ListController::new(ListQuery::new(10), services.employees.page_source());
    controller.mount().await;
    assert_eq!(transport.requests.borrow().len(), 1);

    // 输入本身不发请求
    controller.set_search_draft("Ayşe");
    assert_eq!(transport.requests.borrow().len(), 1);

    controller.submit_search().await;
    assert_eq!(transport.requests.borrow().len(), 2);

    let url = transport.last_request().url;
    assert!(url.contains("filterRequest.searchTerm=Ay%C5%9Fe"));
    assert!(url.contains("page=0"));
    assert!(controller.state().shows_no_results());
}

#[test]
fn test_page_numbers_window() {
    let mut state: ListState<i32> = ListState::new(ListQuery::new(10));
    assert!(state.page_numbers(5).is_empty());

    state.total_pages = 3;
    assert_eq!(state.page_numbers(5), vec![0, 1, 2]);

    state.total_pages = 20;
    state.query.page = 0;
    assert_eq!(state.page_numbers(5), vec![0, 1, 2, 3, 4]);
    state.query.page = 10;
    assert_eq!(state.page_numbers(5), vec![8, 9, 10, 11, 12]);
    state.query.page = 19;
    assert_eq!(state.page_numbers(5), vec![15, 16, 17, 18, 19]);
    assert_eq!(state.display_page(), 20);
}
