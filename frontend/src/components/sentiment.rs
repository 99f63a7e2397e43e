use crate::auth::{check_session, use_auth};
use crate::components::banner::BannerAlert;
use crate::components::protected::ProtectedPage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sentimeter::form::FormFlow;
use sentimeter::sentiment::AnalysisResult;
use sentimeter::validation::Field;

#[component]
pub fn SentimentPage() -> impl IntoView {
    view! {
        <ProtectedPage>
            <SentimentAnalyzer />
        </ProtectedPage>
    }
}

/// 文本输入与分析结果
#[component]
fn SentimentAnalyzer() -> impl IntoView {
    let auth = use_auth();

    let text = RwSignal::new(String::new());
    let flow = RwSignal::new(FormFlow::<AnalysisResult>::new());

    on_cleanup(move || {
        let _ = flow.try_update(|f| f.abandon());
    });

    let char_count = move || text.with(|t| t.chars().count());
    let is_blank = move || text.with(|t| t.trim().is_empty());
    let is_submitting = move || flow.with(|f| f.is_submitting());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_blank() {
            return;
        }
        let Some(ticket) = flow.try_update(|f| f.begin()).flatten() else {
            return;
        };

        let input = text.get_untracked();
        let api = auth.api();
        spawn_local(async move {
            let result = api.analyze(&input).await;
            if let Err(e) = &result {
                check_session(&auth, e);
            }
            let _ = flow.try_update(|f| f.complete(ticket, result));
        });
    };

    let banner = Signal::derive(move || flow.with(|f| f.banner().cloned()));
    let on_dismiss = Callback::new(move |_| flow.update(|f| f.dismiss_banner()));
    let text_error = move || flow.with(|f| f.field_error(Field::Text).map(str::to_string));

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8 space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"AI Sentiment Analyzer"</h1>
                <p class="text-base-content/70">
                    "Paste a review, a message or any short text to classify its tone."
                </p>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <BannerAlert banner=banner on_dismiss=on_dismiss />

                    <textarea
                        class="textarea textarea-bordered h-40 w-full"
                        placeholder="Paste or write your text here (e.g., 'The service was excellent and the staff were very friendly')."
                        prop:value=move || text.get()
                        on:input=move |ev| text.set(event_target_value(&ev))
                    ></textarea>
                    <div class="flex justify-between text-xs text-base-content/60">
                        <span class="text-error">{text_error}</span>
                        <span>{move || format!("{} characters", char_count())}</span>
                    </div>

                    <div class="card-actions justify-end">
                        <button class="btn btn-primary" disabled=move || is_blank() || is_submitting()>
                            {move || if is_submitting() {
                                view! { <span class="loading loading-spinner"></span> "Analyzing..." }.into_any()
                            } else {
                                "Analyze Sentiment".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>

            {move || flow.with(|f| f.output().copied()).map(|result| view! { <AnalysisCard result=result /> })}
        </div>
    }
}

#[component]
fn AnalysisCard(result: AnalysisResult) -> impl IntoView {
    let class = format!("alert {} shadow", result.sentiment.tone());

    view! {
        <div role="status" class=class>
            <div class="flex-1">
                <h3 class="font-bold text-lg">{result.label()}</h3>
                <p class="text-sm">{result.sentiment.description()}</p>
            </div>
            <div class="text-right">
                <div class="text-xs opacity-70">"Confidence"</div>
                <div class="font-mono text-xl">{result.confidence_display()}</div>
            </div>
        </div>
    }
}
