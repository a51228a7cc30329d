//! 内联 SVG 图标（lucide 线条风格）

use leptos::prelude::*;

pub type IconPaths = &'static [&'static str];

pub const SHIELD_CHECK: IconPaths = &["M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z", "m9 12 2 2 4-4"];
pub const LOG_OUT: IconPaths = &["M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "m16 17 5-5-5-5", "M21 12H9"];
pub const REFRESH: IconPaths = &[
    "M3 12a9 9 0 0 1 15-6.7L21 8",
    "M21 3v5h-5",
    "M21 12a9 9 0 0 1-15 6.7L3 16",
    "M8 16H3v5",
];
pub const TRASH: IconPaths = &[
    "M3 6h18",
    "M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6",
    "M8 6V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2",
];
pub const PENCIL: IconPaths = &["M17 3a2.85 2.85 0 1 1 4 4L7.5 20.5 2 22l1.5-5.5Z"];
pub const PLUS: IconPaths = &["M5 12h14", "M12 5v14"];
pub const SEARCH: IconPaths = &["m21 21-4.3-4.3", "M11 19a8 8 0 1 0 0-16 8 8 0 0 0 0 16z"];
pub const BELL: IconPaths = &["M6 8a6 6 0 0 1 12 0c0 7 3 9 3 9H3s3-2 3-9", "M10.3 21a1.94 1.94 0 0 0 3.4 0"];
pub const CHEVRON_LEFT: IconPaths = &["m15 18-6-6 6-6"];
pub const CHEVRON_RIGHT: IconPaths = &["m9 18 6-6-6-6"];
pub const ARROW_UP: IconPaths = &["m5 12 7-7 7 7", "M12 19V5"];
pub const ARROW_DOWN: IconPaths = &["M12 5v14", "m19 12-7 7-7-7"];
pub const CLOCK: IconPaths = &["M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20z", "M12 6v6l4 2"];

#[component]
pub fn Icon(
    paths: IconPaths,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class=class
        >
            {paths.iter().map(|d| view! { <path d={*d} /> }).collect_view()}
        </svg>
    }
}
