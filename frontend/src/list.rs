//! 分页列表控制器
//!
//! 所有列表页共用同一个控制器，而不是各自维护一份状态机：
//! - `state`: 展示状态（行、分页元数据、加载 / 错误标记）
//! - `controller`: 触发、取数、请求取代与卸载取消
//! - `hook`: 与 Leptos 信号的绑定

mod controller;
mod hook;
mod state;

#[cfg(test)]
mod tests;

pub use controller::ListController;
pub use hook::{ListHandle, use_list_controller};
pub use state::{ListState, LoadStatus};
