//! 会话状态解析
//!
//! 把"读取令牌 -> 得出认证状态"做成纯计算，跳转由调用方显式发出：
//! [`SessionGate::take_redirect`] 在一次页面挂载内最多返回一次跳转目标。

use crate::route::AppRoute;
use crate::token::TokenStore;

/// 认证状态
///
/// `Unknown` 是唯一合法的初始值，表示"尚未检查存储"，
/// 既不能当作已认证也不能当作未认证。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

impl AuthStatus {
    /// 根据令牌是否存在得出状态
    pub fn resolve(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.is_empty() => Self::Authenticated,
            _ => Self::Unauthenticated,
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

/// 读取一次存储并得出状态
pub fn resolve_status(store: &dyn TokenStore) -> AuthStatus {
    AuthStatus::resolve(store.get().as_deref())
}

/// 受保护页面应该渲染什么
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// 状态未定：显示加载指示，不发起认证请求
    Loading,
    Content,
    /// 等待跳转：不渲染任何受保护内容
    Nothing,
}

/// 页面级会话守卫
///
/// 每次页面挂载创建一个。`mount` 只在第一次调用时读取存储，
/// 之后的调用（例如每次重新渲染）直接返回缓存的状态。
#[derive(Debug, Default)]
pub struct SessionGate {
    status: AuthStatus,
    redirect_issued: bool,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    pub fn mount(&mut self, store: &dyn TokenStore) -> AuthStatus {
        if !self.status.is_decided() {
            self.status = resolve_status(store);
            log::debug!("session resolved at mount: {:?}", self.status);
        }
        self.status
    }

    /// 取出待执行的跳转
    ///
    /// 未认证时第一次调用返回登录页，之后返回 `None`。
    pub fn take_redirect(&mut self) -> Option<AppRoute> {
        if self.status.is_unauthenticated() && !self.redirect_issued {
            self.redirect_issued = true;
            Some(AppRoute::auth_failure_redirect())
        } else {
            None
        }
    }

    /// 后端拒绝令牌或用户注销
    ///
    /// 只有 `Authenticated -> Unauthenticated` 会重新允许一次跳转。
    pub fn invalidate(&mut self) {
        if self.status.is_authenticated() {
            self.status = AuthStatus::Unauthenticated;
            self.redirect_issued = false;
        }
    }

    pub fn view(&self) -> PageView {
        match self.status {
            AuthStatus::Unknown => PageView::Loading,
            AuthStatus::Authenticated => PageView::Content,
            AuthStatus::Unauthenticated => PageView::Nothing,
        }
    }
}
