//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，为会话存储提供 `KeyValueStore` 实现。

use crate::session::KeyValueStore;

/// 浏览器 LocalStorage
///
/// 名称避开 Leptos 的 `LocalStorage` 存储类型。
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    ///
    /// 隐私模式等情况下不可用时返回 `None`，调用方降级为内存存储。
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    /// 获取存储的字符串值
    ///
    /// 键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok()?
    }

    /// 设置存储值，配额用尽等失败时返回 `false`
    fn set(&self, key: &str, value: &str) -> bool {
        self.storage.set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        self.storage.remove_item(key).is_ok()
    }
}
