use crate::auth::use_auth;
use crate::web::router::Link;
use leptos::prelude::*;
use sentimeter::AppRoute;

const FEATURES: [(&str, &str); 3] = [
    (
        "Instant Prediction",
        "Get fast, model-powered sentiment results in milliseconds.",
    ),
    (
        "High Accuracy",
        "Built on a trained classification model for reliable results.",
    ),
    (
        "Private by Default",
        "Your text and credentials stay between you and the service.",
    ),
];

const STEPS: [&str; 4] = [
    "Sign up to create your free account.",
    "Log in to reach the analyzer.",
    "Paste or type the text you wish to analyze.",
    "Get an instant classification (Positive/Negative/Neutral) with a confidence score.",
];

/// 落地页
#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-12">
            <div class="hero py-12">
                <div class="hero-content text-center">
                    <div class="max-w-xl space-y-4">
                        <h1 class="text-5xl font-bold">"Understand the tone of any text"</h1>
                        <p class="text-base-content/70">
                            "Classify reviews, messages and feedback as positive, negative or neutral."
                        </p>
                        {move || {
                            if auth.is_authenticated() {
                                view! {
                                    <Link to=AppRoute::Sentiment class="btn btn-primary">"Open the analyzer"</Link>
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <div class="flex gap-2 justify-center">
                                        <Link to=AppRoute::Register class="btn btn-primary">"Get started"</Link>
                                        <Link to=AppRoute::Login class="btn btn-outline">"Log in"</Link>
                                    </div>
                                }
                                    .into_any()
                            }
                        }}
                    </div>
                </div>
            </div>

            <div class="grid gap-4 md:grid-cols-3">
                {FEATURES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h3 class="card-title">{*title}</h3>
                                    <p class="text-sm text-base-content/70">{*body}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">"How it works"</h2>
                    <ol class="list-decimal list-inside space-y-1 text-base-content/80">
                        {STEPS.iter().map(|step| view! { <li>{*step}</li> }).collect_view()}
                    </ol>
                </div>
            </div>
        </div>
    }
}
