//! 轮询定时器
//!
//! 布局用它定期刷新未读通知数。标签页在后台时跳过本次轮询，
//! 切回前台后由下一次触发补上。

use std::time::Duration;
use wasm_bindgen::prelude::*;

/// `setInterval` 的延迟参数为 i32 毫秒，超出时截断
fn interval_millis(period: Duration) -> i32 {
    i32::try_from(period.as_millis()).unwrap_or(i32::MAX).max(1)
}

fn document_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .is_some_and(|d| d.hidden())
}

/// 周期轮询，drop 时清除
pub struct PollTimer {
    handle: i32,
    _tick: Closure<dyn Fn()>,
}

impl PollTimer {
    /// 无 window 或注册失败时返回 `None`，调用方视为不轮询
    pub fn start<F>(period: Duration, tick: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let window = web_sys::window()?;
        let tick = Closure::<dyn Fn()>::new(move || {
            if !document_hidden() {
                tick();
            }
        });

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                interval_millis(period),
            )
            .ok()?;

        Some(Self {
            handle,
            _tick: tick,
        })
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_millis_clamps() {
        assert_eq!(interval_millis(Duration::from_secs(60)), 60_000);
        assert_eq!(interval_millis(Duration::from_secs(u64::MAX)), i32::MAX);
        assert_eq!(interval_millis(Duration::ZERO), 1);
    }
}
