//! 表单组件
//!
//! 每个资源区域定义一个 `EntityForm`：用 `RwSignal` 持有输入，
//! 负责回填、转换为请求对象与渲染字段。`FormPage` 处理其余流程：
//! 编辑时加载记录 -> 本地校验 -> 创建 / 更新 -> 成功后返回列表。

use crate::access::Area;
use crate::auth::use_auth;
use crate::components::feedback::{ErrorBanner, PageHeader, Spinner, use_notice};
use crate::task::spawn_scoped;
use crate::web::route::{AppRoute, ResourceRoute};
use crate::web::router::use_router;
use hrms_shared::protocol::Writable;
use hrms_shared::validation::{FORM_FIELD, FieldErrors, validate_form};
use hrms_shared::{ApiResponse, Id};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

pub trait EntityForm: Copy + Send + Sync + 'static {
    type Entity: Writable + Send + Sync;

    const AREA: Area;

    /// 空表单（新建）
    fn new() -> Self;

    /// 用已有记录回填（编辑）
    fn fill(&self, entity: &Self::Entity);

    /// 表单输入 -> 请求对象；无法解析的输入作为字段错误返回
    fn to_request(&self) -> Result<<Self::Entity as Writable>::Request, FieldErrors>;

    fn render(&self, errors: RwSignal<FieldErrors>) -> AnyView;

    /// 记录所属员工，用于判断是否可编辑
    fn owner(_entity: &Self::Entity) -> Option<Id> {
        None
    }
}

/// 把表单中可选的文本转换为 `Option<String>`
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 解析数字输入，失败时记录字段错误
pub fn parse_number<T: std::str::FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    message: &str,
) -> Option<T> {
    let parsed = value.trim().parse::<T>().ok();
    if parsed.is_none() {
        errors.add(field, message);
    }
    parsed
}

/// 可选数字：空值为 `None`，非空但无法解析时记录字段错误
pub fn parse_optional_number<T: std::str::FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    message: &str,
) -> Option<T> {
    if value.trim().is_empty() {
        None
    } else {
        parse_number(errors, field, value, message)
    }
}

// =========================================================
// 字段组件
// =========================================================

fn field_error(errors: RwSignal<FieldErrors>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.message_for(field).map(str::to_string)))
}

#[component]
fn FieldError(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <span class="label-text-alt text-error">{move || message.get().unwrap_or_default()}</span>
        </Show>
    }
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    field: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let error = field_error(errors, field);
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label} {required.then_some(" *")}</span>
            </div>
            <input
                id=field
                type=input_type
                placeholder=placeholder
                class=move || if error.with(Option::is_some) { "input input-bordered input-error" } else { "input input-bordered" }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <div class="label"><FieldError message=error /></div>
        </label>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    field: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
) -> impl IntoView {
    let error = field_error(errors, field);
    view! {
        <label class="form-control w-full">
            <div class="label"><span class="label-text">{label}</span></div>
            <textarea
                id=field
                class="textarea textarea-bordered h-24"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
            <div class="label"><FieldError message=error /></div>
        </label>
    }
}

/// 下拉选择；`options` 为 (值, 显示文本)
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    field: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional, into)] empty_label: Option<String>,
) -> impl IntoView {
    let error = field_error(errors, field);
    view! {
        <label class="form-control w-full">
            <div class="label"><span class="label-text">{label}</span></div>
            <select
                id=field
                class="select select-bordered"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {empty_label.map(|l| view! { <option value="">{l}</option> })}
                {move || {
                    let selected = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(v, text)| {
                            let is_selected = v == selected;
                            view! { <option value=v selected=is_selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <div class="label"><FieldError message=error /></div>
        </label>
    }
}

#[component]
pub fn CheckboxField(#[prop(into)] label: String, value: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="label cursor-pointer justify-start gap-3">
            <input
                type="checkbox"
                class="checkbox checkbox-primary"
                prop:checked=move || value.get()
                on:change=move |ev| value.set(event_target_checked(&ev))
            />
            <span class="label-text">{label}</span>
        </label>
    }
}

/// 枚举线上值的显示文本，如 `ON_LEAVE` -> `On Leave`
pub fn enum_label(raw: &str) -> String {
    raw.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// 枚举下拉选项：(线上值, 显示文本)
pub fn enum_options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, String)> {
    values.map(|v| (v.to_string(), enum_label(v))).collect()
}

// =========================================================
// FormPage
// =========================================================

/// 新建 / 编辑页面
#[component]
pub fn FormPage<F: EntityForm>(
    /// 空表单，编辑时由页面回填
    form: F,
    /// `None` 为新建
    id: Option<Id>,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let notice = use_notice();

    let errors = RwSignal::new(FieldErrors::new());
    let message = RwSignal::new(None::<String>);
    let loading = RwSignal::new(id.is_some());
    let allowed = RwSignal::new(true);
    let submitting = RwSignal::new(false);

    if let Some(id) = id {
        spawn_scoped(async move {
            let service = auth.services().resource::<F::Entity>();
            match service.get(id).await.map(ApiResponse::into_result) {
                Ok(Ok(entity)) => {
                    if !auth.capabilities_untracked().can_edit(F::AREA, F::owner(&entity)) {
                        allowed.set(false);
                        message.set(Some("You are not allowed to edit this record.".to_string()));
                    }
                    form.fill(&entity);
                }
                Ok(Err(m)) => message.set(Some(m)),
                Err(e) => message.set(Some(e.user_message())),
            }
            loading.set(false);
        });
    }

    let back = move || match id {
        Some(id) => AppRoute::Resource(F::AREA, ResourceRoute::View(id)),
        None => AppRoute::list(F::AREA),
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() || !allowed.get_untracked() {
            return;
        }
        message.set(None);

        // 本地校验失败时不发请求
        let request = match form
            .to_request()
            .and_then(|r| validate_form(&r).map(|_| r))
        {
            Ok(request) => request,
            Err(e) => {
                debug!("[Form] {} has {} invalid field(s)", F::AREA.label(), e.len());
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::new());
        submitting.set(true);

        spawn_local(async move {
            let service = auth.services().resource::<F::Entity>();
            let result = match id {
                Some(id) => service.update(id, &request).await,
                None => service.create(&request).await,
            };
            match result {
                Ok(envelope) if envelope.success => {
                    notice.success(if id.is_some() { "Saved" } else { "Created" });
                    router.navigate_to(back());
                }
                Ok(envelope) => message.set(Some(envelope.message)),
                Err(e) => message.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    let title = format!(
        "{} {}",
        if id.is_some() { "Edit" } else { "New" },
        <F::Entity as hrms_shared::Resource>::NAME
    );

    view! {
        <div class="space-y-6">
            <PageHeader title=title />
            <div class="card bg-base-100 shadow-xl max-w-3xl">
                <form class="card-body gap-2" on:submit=on_submit>
                    <ErrorBanner message=Signal::derive(move || message.get()) />
                    <ErrorBanner message=field_error(errors, FORM_FIELD) />
                    <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                        {form.render(errors)}
                    </Show>
                    <div class="card-actions justify-end mt-4">
                        <button type="button" class="btn btn-ghost" on:click=move |_| router.navigate_to(back())>
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || submitting.get() || loading.get() || !allowed.get()
                        >
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_label() {
        assert_eq!(enum_label("ANNUAL"), "Annual");
        assert_eq!(enum_label("ON_LEAVE"), "On Leave");
        assert_eq!(enum_label(""), "");
    }

    #[test]
    fn test_optional_text_trims_blank_to_none() {
        assert_eq!(optional_text("   "), None);
        assert_eq!(optional_text(" note "), Some("note".to_string()));
    }

    #[test]
    fn test_unparseable_number_is_a_field_error() {
        let mut errors = FieldErrors::new();
        let parsed: Option<f64> = parse_number(&mut errors, "base_salary", "12,5x", "Please enter a number");
        assert_eq!(parsed, None);
        assert_eq!(errors.message_for("base_salary"), Some("Please enter a number"));

        let empty: Option<f64> =
            parse_optional_number(&mut errors, "bonus", "  ", "Please enter a number");
        assert_eq!(empty, None);
        assert_eq!(errors.message_for("bonus"), None);
    }
}
