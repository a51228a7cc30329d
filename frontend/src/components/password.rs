//! 修改密码 / 首次登录设置密码

use crate::auth::use_auth;
use crate::components::feedback::{ErrorBanner, PageHeader, use_notice};
use crate::components::form::TextField;
use crate::session::SessionError;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use hrms_shared::validation::{FORM_FIELD, FieldErrors};
use hrms_shared::{ChangePasswordRequest, SetInitialPasswordRequest};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 把认证操作的失败分配到字段错误或顶部横幅
fn show_error(error: SessionError, errors: RwSignal<FieldErrors>, message: RwSignal<Option<String>>) {
    match error {
        SessionError::Invalid(field_errors) => {
            // 跨字段规则没有对应输入框，放到横幅里
            message.set(field_errors.message_for(FORM_FIELD).map(str::to_string));
            errors.set(field_errors);
        }
        other => message.set(Some(other.to_string())),
    }
}

#[component]
fn SubmitButton(busy: RwSignal<bool>, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
            {move || if busy.get() {
                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
            } else {
                label.clone().into_any()
            }}
        </button>
    }
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notice = use_notice();

    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let message = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        message.set(None);
        errors.set(FieldErrors::new());

        let request = ChangePasswordRequest {
            current_password: current.get_untracked(),
            new_password: new_password.get_untracked(),
            confirm_password: confirm.get_untracked(),
        };
        spawn_local(async move {
            match auth.change_password(request).await {
                Ok(()) => {
                    notice.success("Password changed");
                    router.navigate_to(AppRoute::Profile);
                }
                Err(e) => show_error(e, errors, message),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="Change password" />
            <div class="card bg-base-100 shadow-xl max-w-lg">
                <form class="card-body gap-2" on:submit=on_submit>
                    <ErrorBanner message=message />
                    <TextField label="Current password" field="current_password" value=current errors=errors input_type="password" required=true />
                    <TextField label="New password" field="new_password" value=new_password errors=errors input_type="password" required=true />
                    <TextField label="Confirm new password" field="confirm_password" value=confirm errors=errors input_type="password" required=true />
                    <div class="card-actions justify-end mt-4">
                        <SubmitButton busy=busy label="Change password" />
                    </div>
                </form>
            </div>
        </div>
    }
}

/// 首次登录必须先设置新密码，守卫会把其他页面都重定向到这里
#[component]
pub fn SetInitialPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let message = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        message.set(None);
        errors.set(FieldErrors::new());

        let request = SetInitialPasswordRequest {
            new_password: new_password.get_untracked(),
            confirm_password: confirm.get_untracked(),
        };
        spawn_local(async move {
            match auth.set_initial_password(request).await {
                Ok(()) => router.replace(&AppRoute::Dashboard.to_path()),
                Err(e) => show_error(e, errors, message),
            }
            busy.set(false);
        });
    };

    let on_logout = move |_| spawn_local(async move { auth.logout().await });

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Set your password"</h1>
                    <p class="text-base-content/70">"Choose a new password before continuing."</p>
                </div>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorBanner message=message />
                        <TextField label="New password" field="new_password" value=new_password errors=errors input_type="password" required=true />
                        <TextField label="Confirm new password" field="confirm_password" value=confirm errors=errors input_type="password" required=true />
                        <div class="card-actions justify-between mt-4">
                            <button type="button" class="btn btn-ghost" on:click=on_logout>"Sign out"</button>
                            <SubmitButton busy=busy label="Save password" />
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
