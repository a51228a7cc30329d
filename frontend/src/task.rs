//! 组件作用域内的异步任务
//!
//! 页面一次性加载（详情、编辑表单回填、仪表盘统计、今日考勤）随组件卸载一起取消，
//! 与列表控制器的 `dispose` 行为一致。

use futures::future::{AbortHandle, Abortable};
use leptos::prelude::on_cleanup;
use leptos::task::spawn_local;
use log::debug;
use std::future::Future;

/// 包装为可中止的 future，返回中止句柄
fn scoped<Fut>(future: Fut) -> (impl Future<Output = ()>, AbortHandle)
where
    Fut: Future<Output = ()>,
{
    let (handle, registration) = AbortHandle::new_pair();
    let task = async move {
        if Abortable::new(future, registration).await.is_err() {
            debug!("[Task] Load cancelled on unmount");
        }
    };
    (task, handle)
}

/// 启动任务，当前组件清理时中止
///
/// 在事件回调中调用时没有所属组件，任务照常运行到结束。
pub fn spawn_scoped<Fut>(future: Fut)
where
    Fut: Future<Output = ()> + 'static,
{
    let (task, handle) = scoped(future);
    on_cleanup(move || handle.abort());
    spawn_local(task);
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_aborted_task_never_writes() {
        let (tx, rx) = oneshot::channel::<u32>();
        let written = Rc::new(Cell::new(None));
        let sink = written.clone();
        let (task, handle) = scoped(async move {
            if let Ok(value) = rx.await {
                sink.set(Some(value));
            }
        });

        handle.abort();
        let _ = tx.send(7);
        task.await;

        assert_eq!(written.get(), None);
    }

    #[tokio::test]
    async fn test_task_completes_when_not_aborted() {
        let written = Rc::new(Cell::new(None));
        let sink = written.clone();
        let (task, _handle) = scoped(async move { sink.set(Some(3)) });

        task.await;

        assert_eq!(written.get(), Some(3));
    }
}
