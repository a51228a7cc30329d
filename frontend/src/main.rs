use hrms_frontend::App;
use hrms_frontend::config::AppConfig;
use leptos::prelude::*;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    // 日志只能初始化一次，失败时继续运行
    let _ = console_log::init_with_level(config.log_level);
    config.log_warnings();

    mount_to_body(move || view! { <App config=config /> });
}
