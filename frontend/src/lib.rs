//! Sentimeter 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::router`: 路由服务（核心引擎），路由定义在核心库 `sentimeter::route`
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod banner;
    pub mod field;
    pub mod landing;
    pub mod login;
    pub mod navbar;
    pub mod profile;
    pub mod protected;
    pub mod register;
    pub mod sentiment;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::landing::LandingPage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::sentiment::SentimentPage;

use leptos::prelude::*;
use sentimeter::AppRoute;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchClient;
    pub use storage::BrowserTokenStore;
    pub use timer::Timeout;
}

use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Sentiment => view! { <SentimentPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[70vh]">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link to=AppRoute::Home class="btn btn-primary">"Back to home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化认证状态（读取一次令牌存储）
    init_auth(&auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务
    let auth_status = auth_ctx.status_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router auth_status=auth_status>
            <div class="min-h-screen bg-base-200 flex flex-col font-sans">
                <Navbar />
                <main class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
}
