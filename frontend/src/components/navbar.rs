use crate::auth::{sign_out, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use sentimeter::AppRoute;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    // 登录/注册页上不显示认证入口
    let on_auth_page = move || router.current_route().get().is_auth_page();

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-10">
            <div class="flex-1">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl gap-2">
                    <svg xmlns="http://www.w3.org/2000/svg" class="h-6 w-6 text-primary" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 10V3L4 14h7v7l9-11h-7z" />
                    </svg>
                    "Sentiment Analyzer"
                </Link>
            </div>
            <div class="flex-none gap-2">
                {move || {
                    if auth.is_authenticated() {
                        view! {
                            <Link to=AppRoute::Sentiment class="btn btn-ghost btn-sm">"Analyze"</Link>
                            <Link to=AppRoute::Profile class="btn btn-ghost btn-sm">"Account"</Link>
                            <button
                                class="btn btn-ghost btn-sm text-error"
                                on:click=move |_| sign_out(&auth, &router)
                            >
                                "Logout"
                            </button>
                        }
                            .into_any()
                    } else if on_auth_page() {
                        ().into_any()
                    } else {
                        view! {
                            <Link to=AppRoute::Register class="btn btn-ghost btn-sm">"Register"</Link>
                            <Link to=AppRoute::Login class="btn btn-primary btn-sm">"Login"</Link>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
