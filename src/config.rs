//! 客户端配置
//!
//! 所有配置项都通过一个键查找函数读取，读不到或值无效时使用默认值。
//! 原生环境读取进程环境变量，浏览器端在编译期通过 `option_env!` 注入。

use std::time::Duration;

// =========================================================
// 默认值
// =========================================================

pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const REDIRECT_DELAY_VAR: &str = "REDIRECT_DELAY_MS";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// 登录/注册成功后跳转前的停留时间，让用户看到确认信息
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端基础 URL（不含末尾 `/`）
    pub base_url: String,
    pub redirect_delay: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// 从任意键值来源构建配置
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BACKEND_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let delay_ms = lookup(REDIRECT_DELAY_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_REDIRECT_DELAY_MS);

        Self::new(base_url).with_redirect_delay(Duration::from_millis(delay_ms))
    }

    /// 从进程环境变量构建配置
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
