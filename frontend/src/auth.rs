//! 认证模块
//!
//! 管理全局认证状态，与路由系统解耦。
//! 路由服务通过注入的状态信号检查认证状态；受保护页面各自挂载 `SessionGate`。

use std::sync::Arc;

use crate::web::router::RouterService;
use crate::web::{BrowserTokenStore, FetchClient};
use leptos::prelude::*;
use sentimeter::config::{BACKEND_URL_VAR, REDIRECT_DELAY_VAR};
use sentimeter::form::Banner;
use sentimeter::session::resolve_status;
use sentimeter::{ApiError, AppRoute, AuthStatus, ClientConfig, SentimentApi};

/// 浏览器端使用的 API 客户端
pub type Api = SentimentApi<FetchClient>;

/// 编译期注入的配置
fn build_config() -> ClientConfig {
    ClientConfig::from_source(|key| match key {
        BACKEND_URL_VAR => option_env!("BACKEND_URL").map(str::to_string),
        REDIRECT_DELAY_VAR => option_env!("REDIRECT_DELAY_MS").map(str::to_string),
        _ => None,
    })
}

/// 认证上下文
///
/// 通过 Context 在组件间共享。令牌本身只存在于令牌存储中，这里只保存派生状态。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 导航栏级别的认证状态
    pub status: RwSignal<AuthStatus>,
    api: StoredValue<Api>,
    /// 跨页面的一次性提示（例如会话过期）
    pub notice: RwSignal<Option<Banner>>,
}

impl AuthContext {
    pub fn new() -> Self {
        let config = build_config();
        log::debug!("backend: {}", config.base_url);
        let api = SentimentApi::new(config, FetchClient, Arc::new(BrowserTokenStore));

        Self {
            status: RwSignal::new(AuthStatus::Unknown),
            api: StoredValue::new(api),
            notice: RwSignal::new(None),
        }
    }

    /// 获取 API 客户端（克隆句柄）
    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn status_signal(&self) -> Signal<AuthStatus> {
        self.status.into()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status.get().is_authenticated()
    }

    /// 取走一次性提示
    pub fn take_notice(&self) -> Option<Banner> {
        let notice = self.notice.get_untracked();
        if notice.is_some() {
            self.notice.set(None);
        }
        notice
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 启动时读取一次令牌存储。
pub fn init_auth(ctx: &AuthContext) {
    let api = ctx.api();
    let status = resolve_status(api.token_store().as_ref());
    log::debug!("initial auth status: {:?}", status);
    ctx.status.set(status);
}

/// 登录成功后更新状态（令牌已由 API 写入存储）
pub fn mark_authenticated(ctx: &AuthContext) {
    let _ = ctx.status.try_set(AuthStatus::Authenticated);
    let _ = ctx.notice.try_set(None);
}

/// 注销并清除状态，返回应跳转的页面
pub fn logout(ctx: &AuthContext) -> AppRoute {
    let route = ctx.api().logout();
    ctx.status.set(AuthStatus::Unauthenticated);
    route
}

/// 后端拒绝令牌：令牌已被网关清除，这里同步状态并留下提示
pub fn expire_session(ctx: &AuthContext, error: &ApiError) {
    let _ = ctx.status.try_set(AuthStatus::Unauthenticated);
    let _ = ctx.notice.try_set(Some(Banner::error(error.user_message())));
}

/// 检查请求错误是否表示会话被后端拒绝，是则同步状态
///
/// 仍挂载的受保护页面由自己的守卫跳转到登录页；已卸载的页面不会触发跳转。
pub fn check_session(ctx: &AuthContext, error: &ApiError) -> bool {
    if error.is_session_expired() {
        log::info!("session rejected by backend");
        expire_session(ctx, error);
        true
    } else {
        false
    }
}

/// 用户主动注销
///
/// 当前在受保护页面时跳转由页面守卫完成，避免重复导航。
pub fn sign_out(ctx: &AuthContext, router: &RouterService) {
    let route = logout(ctx);
    if !router.current_route().get_untracked().requires_auth() {
        router.navigate_to(route);
    }
}
