//! 通用反馈组件：错误横幅、加载指示、全局提示

use leptos::prelude::*;

/// 全局提示（消息内容, 是否出错），3 秒后自动消失
#[derive(Clone, Copy)]
pub struct Notice {
    current: RwSignal<Option<(String, bool)>>,
}

impl Notice {
    pub fn success(&self, message: impl Into<String>) {
        self.current.set(Some((message.into(), false)));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.current.set(Some((message.into(), true)));
    }
}

pub fn provide_notice() -> Notice {
    let notice = Notice {
        current: RwSignal::new(None),
    };
    provide_context(notice);
    notice
}

pub fn use_notice() -> Notice {
    use_context::<Notice>().expect("Notice should be provided")
}

/// 浏览器确认框；无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn NoticeToast() -> impl IntoView {
    let notice = use_notice();
    let current = notice.current;

    // 3秒后清除通知
    Effect::new(move |_| {
        if current.with(Option::is_some) {
            set_timeout(
                move || current.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || current.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let is_err = current.with(|c| c.as_ref().is_some_and(|(_, e)| *e));
                    if is_err { "alert alert-error shadow-lg" } else { "alert alert-success shadow-lg" }
                }>
                    <span>{move || current.with(|c| c.as_ref().map(|(m, _)| m.clone()).unwrap_or_default())}</span>
                </div>
            </div>
        </Show>
    }
}

/// 行内错误横幅，消息原样显示
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn Spinner(#[prop(optional, into)] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-8 text-base-content/60">
            <span class="loading loading-spinner loading-md"></span>
            {label}
        </div>
    }
}

/// 页面标题栏
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap items-center justify-between gap-4">
            <div>
                <h1 class="text-2xl font-bold">{title}</h1>
                {(!subtitle.is_empty()).then(|| view! { <p class="text-base-content/70 text-sm">{subtitle}</p> })}
            </div>
            <div class="flex gap-2">{children.map(|c| c())}</div>
        </div>
    }
}
