use leptos::prelude::*;
use sentimeter::form::Banner;

/// 可关闭的提示条
#[component]
pub fn BannerAlert(
    #[prop(into)] banner: Signal<Option<Banner>>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    move || {
        banner.get().map(|b| {
            let class = if b.is_error() {
                "alert alert-error text-sm py-2"
            } else {
                "alert alert-success text-sm py-2"
            };
            view! {
                <div role="alert" class=class>
                    <span class="flex-1">{b.text}</span>
                    <button
                        type="button"
                        class="btn btn-ghost btn-xs"
                        aria-label="Dismiss"
                        on:click=move |_| on_dismiss.run(())
                    >
                        "✕"
                    </button>
                </div>
            }
        })
    }
}
