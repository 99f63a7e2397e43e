//! 路由服务
//!
//! 所有对 `window.history` / `window.location` 的访问都集中在这里。
//! 导航流程：目标路由 -> 认证守卫 -> 写入 History -> 更新路由信号。
//!
//! 守卫只在认证状态明确为未认证时拦截受保护页面；
//! 状态未定时交给页面自己的 `SessionGate` 决定。

use leptos::prelude::*;
use sentimeter::{AppRoute, AuthStatus};
use wasm_bindgen::prelude::*;

/// 写入 History 的方式
#[derive(Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    /// 普通导航，留下后退记录
    Push,
    /// 重定向，替换当前记录
    Replace,
}

fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| AppRoute::Home.to_path().to_string())
}

fn write_history(route: AppRoute, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let url = Some(route.to_path());
    let written = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", url),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", url),
    };
    if written.is_err() {
        log::warn!("[Router] history update for {} failed", route);
    }
}

/// 守卫：返回实际应该进入的路由
fn guard(target: AppRoute, status: AuthStatus) -> AppRoute {
    if target.requires_auth() && status.is_unauthenticated() {
        log::info!("[Router] {} requires a session, sending to login", target);
        return AppRoute::auth_failure_redirect();
    }
    if target.should_redirect_when_authenticated() && status.is_authenticated() {
        log::info!("[Router] already signed in, skipping {}", target);
        return AppRoute::auth_success_redirect();
    }
    target
}

/// 路由服务
///
/// `Copy` 句柄，通过 Context 共享。认证状态以信号形式注入，与认证模块解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    route: RwSignal<AppRoute>,
    auth_status: Signal<AuthStatus>,
}

impl RouterService {
    fn new(auth_status: Signal<AuthStatus>) -> Self {
        // 首次进入时 URL 也要经过守卫
        let requested = AppRoute::from_path(&location_path());
        let allowed = guard(requested, auth_status.get_untracked());
        if allowed != requested {
            write_history(allowed, HistoryMode::Replace);
        }

        Self {
            route: RwSignal::new(allowed),
            auth_status,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.route.read_only()
    }

    /// 导航到目标路由（pushState）
    pub fn navigate_to(&self, target: AppRoute) {
        self.go(target, HistoryMode::Push);
    }

    /// 重定向（replaceState），不留下后退记录
    pub fn redirect_to(&self, target: AppRoute) {
        self.go(target, HistoryMode::Replace);
    }

    fn go(&self, target: AppRoute, mode: HistoryMode) {
        let route = guard(target, self.auth_status.get_untracked());
        write_history(route, mode);
        // 应用卸载后路由信号已销毁，忽略
        let _ = self.route.try_set(route);
    }

    /// 浏览器后退/前进：URL 已经变化，只需过守卫并同步信号
    fn listen_popstate(&self) {
        let route = self.route;
        let auth_status = self.auth_status;

        let on_popstate = Closure::<dyn Fn()>::new(move || {
            let requested = AppRoute::from_path(&location_path());
            let allowed = guard(requested, auth_status.get_untracked());
            if allowed != requested {
                write_history(allowed, HistoryMode::Replace);
            }
            let _ = route.try_set(allowed);
        });

        let registered = web_sys::window().map(|w| {
            w.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
        });
        if !matches!(registered, Some(Ok(()))) {
            log::warn!("[Router] popstate listener not registered");
        }

        // 监听器与页面同生命周期
        on_popstate.forget();
    }
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 提供路由上下文，放在 App 根部
#[component]
pub fn Router(auth_status: Signal<AuthStatus>, children: Children) -> impl IntoView {
    let service = RouterService::new(auth_status);
    service.listen_popstate();
    provide_context(service);

    children()
}

/// 按当前路由渲染页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let route = use_router().current_route();
    move || matcher(route.get())
}

/// 站内链接：拦截点击，走路由服务导航
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    view! {
        <a
            href=to.to_path()
            class=class
            on:click=move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
                router.navigate_to(to);
            }
        >
            {children()}
        </a>
    }
}
