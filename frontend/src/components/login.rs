use crate::auth::use_auth;
use crate::components::feedback::ErrorBanner;
use crate::components::form::TextField;
use crate::components::icons::{self, Icon};
use crate::session::SessionError;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use hrms_shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        errors.set(FieldErrors::new());

        spawn_local(async move {
            let result = auth
                .login(email.get_untracked(), password.get_untracked())
                .await;
            match result {
                // 守卫决定最终落点（首次登录会被带到设置密码页），登录页不留在历史中
                Ok(_) => router.replace(&AppRoute::Dashboard.to_path()),
                Err(SessionError::Invalid(field_errors)) => errors.set(field_errors),
                Err(e) => {
                    password.set(String::new());
                    set_error_msg.set(Some(e.to_string()));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Icon paths=icons::SHIELD_CHECK class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"HRMS"</h1>
                        <p class="text-base-content/70">"Sign in with your company account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorBanner message=error_msg />
                        <TextField label="Email" field="email" value=email errors=errors input_type="email" placeholder="name@company.com" />
                        <TextField label="Password" field="password" value=password errors=errors input_type="password" placeholder="••••••••" />
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
