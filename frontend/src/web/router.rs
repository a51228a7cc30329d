//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程。

use hrms_shared::Session;
use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardDecision, guard};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 同步标签页标题
fn set_document_title(route: AppRoute) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&format!("{} - HRMS", route.title()));
    }
}

/// 对目标路由执行守卫，返回最终应显示的路由
fn resolve(target: AppRoute, session: Option<&Session>) -> AppRoute {
    match guard(target, session) {
        GuardDecision::Allow => target,
        GuardDecision::Redirect(redirect) => {
            info!("[Router] {} -> {}", target, redirect);
            redirect
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前会话（注入的信号，实现解耦）
    session: Signal<Option<Session>>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由同样经过守卫，刷新页面时不会短暂显示受保护页面。
    fn new(session: Signal<Option<Session>>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial_route = session.with_untracked(|s| resolve(requested, s.as_ref()));
        if initial_route != requested {
            replace_history_state(&initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 守卫 -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        self.navigate_to(AppRoute::from_path(path));
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 替换当前历史记录（不产生新的后退项）
    pub fn replace(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), false);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let route = self
            .session
            .with_untracked(|s| resolve(target_route, s.as_ref()));

        let path = route.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // popstate 时也执行守卫逻辑
            let route = session.with_untracked(|s| resolve(target_route, s.as_ref()));
            if route != target_route {
                replace_history_state(&route.to_path());
            }
            set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话变化（登录、注销、401 过期、完成改密）时重新守卫当前路由
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let route = current_route.get_untracked();
            let resolved = session.with(|s| resolve(route, s.as_ref()));
            if resolved != route {
                push_history_state(&resolved.to_path());
                set_route.set(resolved);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Option<Session>>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号
    session: Signal<Option<Session>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        set_document_title(current);
        matcher(current)
    }
}

/// 站内链接：拦截点击，走路由服务而不是整页跳转
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
