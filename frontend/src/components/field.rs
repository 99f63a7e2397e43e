use leptos::prelude::*;

/// 带标签和行内错误的输入框
#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: impl Fn(String) + Send + Sync + 'static,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=input_type
                placeholder=placeholder
                class=move || {
                    if error.get().is_some() {
                        "input input-bordered input-error"
                    } else {
                        "input input-bordered"
                    }
                }
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            {move || {
                error
                    .get()
                    .map(|msg| {
                        view! {
                            <label class="label">
                                <span class="label-text-alt text-error">{msg}</span>
                            </label>
                        }
                    })
            }}
        </div>
    }
}
