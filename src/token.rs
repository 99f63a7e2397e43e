//! 令牌存储
//!
//! 会话令牌的唯一读写入口。其他组件只能通过 [`TokenStore`] 访问令牌，
//! 具体实现（浏览器 LocalStorage、内存）以 `Arc<dyn TokenStore>` 注入。

use std::sync::{Arc, Mutex, PoisonError};

/// 令牌存储接口
///
/// 不校验令牌内容：任何非空字符串都视为"存在"。
/// 写入是单值整体替换，读取得到的是某一时刻的完整快照。
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);

    fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

pub type SharedTokenStore = Arc<dyn TokenStore>;

/// 空字符串视为缺失
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|t| !t.is_empty())
}

/// 内存令牌存储
///
/// 进程内有效，供测试和非浏览器环境使用。
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(token.to_string())),
        }
    }

    pub fn shared(self) -> SharedTokenStore {
        Arc::new(self)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        non_empty(slot.clone())
    }

    fn set(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
