use crate::auth::{mark_authenticated, use_auth};
use crate::components::banner::BannerAlert;
use crate::components::field::TextField;
use crate::web::Timeout;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use sentimeter::form::FormFlow;
use sentimeter::shared::Credentials;
use sentimeter::validation::Field;
use sentimeter::{AppRoute, LoginSuccess};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let flow = RwSignal::new(FormFlow::<LoginSuccess>::new());
    // 成功后的延迟跳转，页面卸载时随之取消
    let pending = StoredValue::new_local(None::<Timeout>);
    // 例如会话过期后被送回登录页时的提示
    let notice = RwSignal::new(auth.take_notice());

    on_cleanup(move || {
        let _ = flow.try_update(|f| f.abandon());
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(ticket) = flow.try_update(|f| f.begin()).flatten() else {
            return;
        };
        notice.set(None);

        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let api = auth.api();
        spawn_local(async move {
            let result = api.login(&credentials).await;
            // 令牌已写入存储，无论页面是否还在都同步全局状态
            if result.is_ok() {
                mark_authenticated(&auth);
            }
            let redirect = result.as_ref().ok().map(|s| s.redirect);

            let applied = flow
                .try_update(|f| match result {
                    Ok(success) => {
                        let message = success.message.clone();
                        f.succeed(ticket, success, Some(message))
                    }
                    Err(e) => f.fail(ticket, &e),
                })
                .unwrap_or(false);

            if let (true, Some(redirect)) = (applied, redirect) {
                let timer = Timeout::new(redirect.after, move || router.navigate_to(redirect.route));
                let _ = pending.try_set_value(timer);
            }
        });
    };

    let banner = Signal::derive(move || flow.with(|f| f.banner().cloned()).or_else(|| notice.get()));
    let on_dismiss = Callback::new(move |_| {
        flow.update(|f| f.dismiss_banner());
        notice.set(None);
    });
    let field_error = move |field: Field| {
        Signal::derive(move || flow.with(|f| f.field_error(field).map(str::to_string)))
    };
    let is_submitting = move || flow.with(|f| f.is_submitting());

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Welcome back"</h1>
                    <p class="text-base-content/70">"Log in to analyze your text"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <BannerAlert banner=banner on_dismiss=on_dismiss />

                        <TextField
                            id="username"
                            label="Username"
                            placeholder="your username"
                            value=username
                            on_input=move |v| username.set(v)
                            error=field_error(Field::Username)
                        />
                        <TextField
                            id="password"
                            label="Password"
                            input_type="password"
                            placeholder="••••••••"
                            value=password
                            on_input=move |v| password.set(v)
                            error=field_error(Field::Password)
                        />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || flow.with(|f| f.is_submit_disabled())>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Log in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account yet? "
                            <Link to=AppRoute::Register class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
