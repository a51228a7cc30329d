//! 应用配置
//!
//! 前端没有运行时配置文件，所有配置在编译期通过环境变量注入
//! （`HRMS_API_BASE_URL=https://hr.example.com/api trunk build`）。

use hrms_shared::DEFAULT_PAGE_SIZE;
use log::{Level, warn};
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_BASE_URL: &str = "HRMS_API_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "HRMS_PAGE_SIZE";
pub const ENV_LOG_LEVEL: &str = "HRMS_LOG_LEVEL";
pub const ENV_NOTIFICATION_POLL_SECS: &str = "HRMS_NOTIFICATION_POLL_SECS";

const DEFAULT_API_BASE_URL: &str = "/api";
const DEFAULT_NOTIFICATION_POLL_SECS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub log_level: Level,
    /// 未读通知轮询间隔，0 表示关闭
    pub notification_poll_secs: u32,
    /// 解析失败而回退到默认值的配置项，日志初始化后输出
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: default_log_level(),
            notification_poll_secs: DEFAULT_NOTIFICATION_POLL_SECS,
            warnings: Vec::new(),
        }
    }
}

fn default_log_level() -> Level {
    if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    }
}

impl AppConfig {
    /// 读取编译期注入的环境变量
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                ENV_API_BASE_URL => option_env!("HRMS_API_BASE_URL"),
                ENV_PAGE_SIZE => option_env!("HRMS_PAGE_SIZE"),
                ENV_LOG_LEVEL => option_env!("HRMS_LOG_LEVEL"),
                ENV_NOTIFICATION_POLL_SECS => option_env!("HRMS_NOTIFICATION_POLL_SECS"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = get(ENV_API_BASE_URL) {
            config.api_base_url = url;
        }

        if let Some(raw) = get(ENV_PAGE_SIZE) {
            match raw.parse::<u32>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => config.reject(ENV_PAGE_SIZE, &raw),
            }
        }

        if let Some(raw) = get(ENV_LOG_LEVEL) {
            match Level::from_str(&raw) {
                Ok(level) => config.log_level = level,
                Err(_) => config.reject(ENV_LOG_LEVEL, &raw),
            }
        }

        if let Some(raw) = get(ENV_NOTIFICATION_POLL_SECS) {
            match raw.parse::<u32>() {
                Ok(secs) => config.notification_poll_secs = secs,
                Err(_) => config.reject(ENV_NOTIFICATION_POLL_SECS, &raw),
            }
        }

        config
    }

    fn reject(&mut self, key: &str, raw: &str) {
        self.warnings
            .push(format!("Ignoring invalid {}={:?}, using default", key, raw));
    }

    /// 输出解析阶段积累的警告（需在日志初始化之后调用）
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("[Config] {}", warning);
        }
    }

    pub fn notification_poll_interval(&self) -> Option<Duration> {
        (self.notification_poll_secs > 0)
            .then(|| Duration::from_secs(u64::from(self.notification_poll_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.notification_poll_secs, 60);
        assert_eq!(
            config.notification_poll_interval(),
            Some(Duration::from_secs(60))
        );
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_API_BASE_URL, "https://hr.example.com/api"),
            (ENV_PAGE_SIZE, "25"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_NOTIFICATION_POLL_SECS, "0"),
        ]);
        assert_eq!(config.api_base_url, "https://hr.example.com/api");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log_level, Level::Warn);
        assert_eq!(config.notification_poll_interval(), None);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            (ENV_PAGE_SIZE, "0"),
            (ENV_LOG_LEVEL, "loud"),
            (ENV_NOTIFICATION_POLL_SECS, "soon"),
            (ENV_API_BASE_URL, "   "),
        ]);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.notification_poll_secs, 60);
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.warnings.len(), 3);
    }
}
