use crate::auth::use_auth;
use crate::components::banner::BannerAlert;
use crate::components::field::TextField;
use crate::web::Timeout;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use sentimeter::form::FormFlow;
use sentimeter::shared::RegisterRequest;
use sentimeter::validation::{Field, MIN_PASSWORD_LEN};
use sentimeter::{AppRoute, RegisterSuccess};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let name = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let flow = RwSignal::new(FormFlow::<RegisterSuccess>::new());
    let pending = StoredValue::new_local(None::<Timeout>);

    on_cleanup(move || {
        let _ = flow.try_update(|f| f.abandon());
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(ticket) = flow.try_update(|f| f.begin()).flatten() else {
            return;
        };

        let request = RegisterRequest {
            name: name.get_untracked(),
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let api = auth.api();
        spawn_local(async move {
            let result = api.register(&request).await;
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
                log::info!("account created, login page in {:?}", redirect.after);
                let timer = Timeout::new(redirect.after, move || router.navigate_to(redirect.route));
                let _ = pending.try_set_value(timer);
            }
        });
    };

    let banner = Signal::derive(move || flow.with(|f| f.banner().cloned()));
    let on_dismiss = Callback::new(move |_| flow.update(|f| f.dismiss_banner()));
    let field_error = move |field: Field| {
        Signal::derive(move || flow.with(|f| f.field_error(field).map(str::to_string)))
    };
    let is_submitting = move || flow.with(|f| f.is_submitting());

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create an account"</h1>
                    <p class="text-base-content/70">"Sign up to start analyzing sentiment"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <BannerAlert banner=banner on_dismiss=on_dismiss />

                        <TextField
                            id="name"
                            label="Full name"
                            value=name
                            on_input=move |v| name.set(v)
                            error=field_error(Field::Name)
                        />
                        <TextField
                            id="username"
                            label="Username"
                            value=username
                            on_input=move |v| username.set(v)
                            error=field_error(Field::Username)
                        />
                        <TextField
                            id="email"
                            label="Email"
                            input_type="email"
                            placeholder="you@example.com"
                            value=email
                            on_input=move |v| email.set(v)
                            error=field_error(Field::Email)
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
                        <p class="text-xs text-base-content/60">
                            {format!("At least {} characters.", MIN_PASSWORD_LEN)}
                        </p>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || flow.with(|f| f.is_submit_disabled())>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link to=AppRoute::Login class="link link-primary">"Log in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
