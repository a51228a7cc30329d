//! 签到 / 签退

use crate::auth::use_auth;
use crate::components::attendance::format_duration;
use crate::components::feedback::{ErrorBanner, PageHeader, Spinner, use_notice};
use crate::components::icons::{self, Icon};
use crate::task::spawn_scoped;
use hrms_shared::date::display_opt_datetime;
use hrms_shared::{ApiResponse, Attendance};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 今天的打卡进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayStage {
    NotCheckedIn,
    CheckedIn,
    Done,
}

fn stage_of(today: Option<&Attendance>) -> DayStage {
    match today {
        None => DayStage::NotCheckedIn,
        Some(a) if a.check_in.is_none() => DayStage::NotCheckedIn,
        Some(a) if a.is_checked_in() => DayStage::CheckedIn,
        Some(_) => DayStage::Done,
    }
}

#[component]
pub fn CheckInOutPage() -> impl IntoView {
    let auth = use_auth();
    let notice = use_notice();

    let (today, set_today) = signal(None::<Attendance>);
    let (loading, set_loading) = signal(true);
    let (busy, set_busy) = signal(false);
    let (error_msg, set_error_msg) = signal(None::<String>);

    let load_today = move || {
        spawn_scoped(async move {
            match auth.services().attendance.today().await {
                // 今天尚未签到时信封成功但没有数据
                Ok(envelope) if envelope.success => set_today.set(envelope.data),
                Ok(envelope) => set_error_msg.set(Some(envelope.message)),
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            set_loading.set(false);
        });
    };
    load_today();

    let punch = move |check_in: bool| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            let service = auth.services().attendance;
            let result = if check_in {
                service.check_in().await
            } else {
                service.check_out().await
            };
            match result.map(ApiResponse::into_result) {
                Ok(Ok(record)) => {
                    notice.success(if check_in { "Checked in" } else { "Checked out" });
                    set_today.set(Some(record));
                }
                Ok(Err(message)) => set_error_msg.set(Some(message)),
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
            set_busy.set(false);
        });
    };

    let stage = move || today.with(|t| stage_of(t.as_ref()));
    let summary = move || {
        today.with(|t| {
            let check_in = display_opt_datetime(t.as_ref().and_then(|a| a.check_in));
            let check_out = display_opt_datetime(t.as_ref().and_then(|a| a.check_out));
            let worked = t
                .as_ref()
                .and_then(Attendance::worked_duration)
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string());
            view! {
                <div class="stats stats-vertical md:stats-horizontal shadow w-full">
                    <div class="stat">
                        <div class="stat-title">"Check-in"</div>
                        <div class="stat-value text-lg">{check_in}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Check-out"</div>
                        <div class="stat-value text-lg">{check_out}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Worked"</div>
                        <div class="stat-value text-lg">{worked}</div>
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="space-y-6">
            <PageHeader title="Check in / out" subtitle="Record today's attendance" />
            <div class="card bg-base-100 shadow-xl max-w-3xl">
                <div class="card-body gap-6">
                    <ErrorBanner message=error_msg />
                    <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                        {summary}
                        <div class="card-actions justify-center">
                            {move || match stage() {
                                DayStage::NotCheckedIn => view! {
                                    <button class="btn btn-primary btn-lg gap-2" disabled=move || busy.get() on:click=move |_| punch(true)>
                                        <Icon paths=icons::CLOCK class="h-5 w-5" />
                                        "Check in"
                                    </button>
                                }
                                .into_any(),
                                DayStage::CheckedIn => view! {
                                    <button class="btn btn-secondary btn-lg gap-2" disabled=move || busy.get() on:click=move |_| punch(false)>
                                        <Icon paths=icons::CLOCK class="h-5 w-5" />
                                        "Check out"
                                    </button>
                                }
                                .into_any(),
                                DayStage::Done => view! {
                                    <div class="alert alert-success">"You are done for today."</div>
                                }
                                .into_any(),
                            }}
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hrms_shared::AttendanceStatus;

    fn record(check_in: Option<&str>, check_out: Option<&str>) -> Attendance {
        let at = |s: &str| {
            NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_time(s.parse().unwrap())
        };
        Attendance {
            id: 1,
            employee_id: 7,
            employee_name: None,
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            check_in: check_in.map(at),
            check_out: check_out.map(at),
            status: AttendanceStatus::Present,
            notes: None,
        }
    }

    #[test]
    fn test_day_stage() {
        assert_eq!(stage_of(None), DayStage::NotCheckedIn);
        assert_eq!(stage_of(Some(&record(None, None))), DayStage::NotCheckedIn);
        assert_eq!(stage_of(Some(&record(Some("08:30:00"), None))), DayStage::CheckedIn);
        assert_eq!(
            stage_of(Some(&record(Some("08:30:00"), Some("17:00:00")))),
            DayStage::Done
        );
    }
}
