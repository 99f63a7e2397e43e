//! 受保护页面外壳
//!
//! 每次挂载创建一个 `SessionGate`：状态未定时显示加载指示，
//! 未认证时不渲染任何内容并只发出一次跳转，已认证时渲染子组件。

use crate::auth::use_auth;
use crate::web::router::use_router;
use leptos::prelude::*;
use sentimeter::{PageView, SessionGate};

#[component]
pub fn ProtectedPage(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let gate = StoredValue::new(SessionGate::new());
    let page_view = RwSignal::new(PageView::Loading);

    Effect::new(move |_| {
        // 追踪全局状态：后端拒绝令牌或注销时重新评估
        let global = auth.status.get();
        let api = auth.api();

        let (view, redirect) = gate
            .try_update_value(|g| {
                g.mount(api.token_store().as_ref());
                if global.is_unauthenticated() {
                    g.invalidate();
                }
                (g.view(), g.take_redirect())
            })
            .unwrap_or((PageView::Nothing, None));

        // 相同视图不重复设置，避免子组件重建
        if page_view.get_untracked() != view {
            page_view.set(view);
        }
        if let Some(route) = redirect {
            log::info!("[Gate] No session, redirecting to {}", route);
            router.redirect_to(route);
        }
    });

    move || match page_view.get() {
        PageView::Loading => view! {
            <div class="flex items-center justify-center min-h-[50vh]">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        PageView::Content => children(),
        PageView::Nothing => ().into_any(),
    }
}
