//! 浏览器令牌存储
//!
//! 直接使用 `web_sys::Storage`（LocalStorage），替代 `gloo-storage`。
//! 令牌保存在固定键下，同一浏览器配置内跨页面刷新保留。

use sentimeter::shared::TOKEN_STORAGE_KEY;
use sentimeter::token::{TokenStore, non_empty};
use web_sys::Storage;

/// LocalStorage 不可用（隐私模式、被禁用等）时返回 `None`
fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<String> {
        let raw = local_storage()?.get_item(TOKEN_STORAGE_KEY).ok()?;
        non_empty(raw)
    }

    fn set(&self, token: &str) {
        let stored = local_storage().map(|s| s.set_item(TOKEN_STORAGE_KEY, token));
        if !matches!(stored, Some(Ok(()))) {
            log::warn!("could not persist session token (storage unavailable)");
        }
    }

    fn clear(&self) {
        let removed = local_storage().map(|s| s.remove_item(TOKEN_STORAGE_KEY));
        if !matches!(removed, Some(Ok(()))) {
            log::warn!("could not remove session token (storage unavailable)");
        }
    }
}
