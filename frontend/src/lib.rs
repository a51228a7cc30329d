//! HRMS 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session` / `auth`: 会话存储及其 Leptos 绑定
//! - `api` / `services`: HTTP 客户端与资源服务
//! - `list`: 所有列表页共用的分页控制器
//! - `components`: UI 组件层

mod access;
mod api;
mod auth;
pub mod config;
mod error;
mod list;
mod services;
mod session;
mod task;
#[cfg(test)]
mod testing;

mod components {
    pub mod announcements;
    pub mod attendance;
    pub mod check_in_out;
    pub mod dashboard;
    pub mod departments;
    pub mod detail;
    pub mod employees;
    pub mod feedback;
    pub mod form;
    pub mod icons;
    pub mod layout;
    pub mod leaves;
    pub mod list_view;
    pub mod login;
    pub mod lookup;
    pub mod notifications;
    pub mod password;
    pub mod performance;
    pub mod positions;
    pub mod profile;
    pub mod salaries;
}

use crate::access::Area;
use crate::auth::AuthContext;
use crate::components::check_in_out::CheckInOutPage;
use crate::components::dashboard::DashboardPage;
use crate::components::feedback::{NoticeToast, provide_notice};
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::notifications::NotificationsPage;
use crate::components::password::{ChangePasswordPage, SetInitialPasswordPage};
use crate::components::profile::ProfilePage;
use crate::config::AppConfig;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::BrowserTransport;
    pub use storage::BrowserStorage;
    pub use timer::PollTimer;
}

use web::route::{AppRoute, ResourceRoute};
use web::router::{Link, Router, RouterOutlet};

fn resource_view(area: Area, route: ResourceRoute) -> AnyView {
    use crate::components::*;

    match area {
        Area::Employees => employees::view(route),
        Area::Departments => departments::view(route),
        Area::Positions => positions::view(route),
        Area::Leaves => leaves::view(route),
        Area::Salaries => salaries::view(route),
        Area::Performance => performance::view(route),
        Area::Attendance => attendance::view(route),
        Area::Announcements => announcements::view(route),
    }
}

/// 已登录页面的内容
fn page_view(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::ChangePassword => view! { <ChangePasswordPage /> }.into_any(),
        AppRoute::Resource(area, sub) => resource_view(area, sub),
        AppRoute::Notifications => view! { <NotificationsPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::CheckInOut => view! { <CheckInOutPage /> }.into_any(),
        AppRoute::Login | AppRoute::SetInitialPassword | AppRoute::NotFound => ().into_any(),
    }
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。守卫已经在路由服务中执行，
/// 这里只负责渲染；已登录页面统一包在 `Layout` 中，页面在 `Layout`
/// 提供的上下文里创建。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <NoticeToast /> <LoginPage /> }.into_any(),
        AppRoute::SetInitialPassword => {
            view! { <NoticeToast /> <SetInitialPasswordPage /> }.into_any()
        }
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to="/" class="btn btn-primary mt-6">"Back to dashboard"</Link>
                </div>
            </div>
        }
        .into_any(),
        _ => view! { <Layout>{page_view(route)}</Layout> }.into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 创建认证上下文（从 LocalStorage 恢复会话）
    let auth_ctx = AuthContext::new(config);
    provide_context(auth_ctx);

    // 2. 全局提示
    provide_notice();

    // 3. 获取会话信号，用于注入路由服务（解耦！）
    let session = auth_ctx.session_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
