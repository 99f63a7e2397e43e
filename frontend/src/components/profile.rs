use crate::auth::{check_session, sign_out, use_auth};
use crate::components::banner::BannerAlert;
use crate::components::field::TextField;
use crate::components::protected::ProtectedPage;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sentimeter::api::PROFILE_UPDATED_MESSAGE;
use sentimeter::form::FormFlow;
use sentimeter::profile::{ProfileEditor, ProfileField};
use sentimeter::shared::UserProfile;
use sentimeter::validation::Field;

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <ProtectedPage>
            <ProfileSettings />
        </ProtectedPage>
    }
}

/// 账户资料：用户名只读，姓名和邮箱可编辑
#[component]
fn ProfileSettings() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let editor = RwSignal::new(None::<ProfileEditor>);
    let load_error = RwSignal::new(None::<String>);
    let flow = RwSignal::new(FormFlow::<UserProfile>::new());

    on_cleanup(move || {
        let _ = flow.try_update(|f| f.abandon());
    });

    // 挂载时加载资料（只有已认证时才会渲染到这里）
    let api = auth.api();
    spawn_local(async move {
        match api.fetch_profile().await {
            Ok(profile) => {
                let _ = editor.try_set(Some(ProfileEditor::new(profile)));
            }
            Err(e) => {
                check_session(&auth, &e);
                let _ = load_error.try_set(Some(e.user_message()));
            }
        }
    });

    let is_submitting = move || flow.with(|f| f.is_submitting());
    let can_save = move || {
        let submitting = is_submitting();
        editor.with(|e| e.as_ref().is_some_and(|e| e.can_save(submitting)))
    };
    let is_dirty = move || editor.with(|e| e.as_ref().is_some_and(ProfileEditor::is_dirty));

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        // 没有改动时不发请求
        let Some(update) = editor.with_untracked(|e| e.as_ref().and_then(ProfileEditor::pending_update)) else {
            return;
        };
        let Some(ticket) = flow.try_update(|f| f.begin()).flatten() else {
            return;
        };

        let api = auth.api();
        spawn_local(async move {
            let result = api.update_profile(&update).await;
            if let Err(e) = &result {
                check_session(&auth, e);
            }
            let saved = result.as_ref().ok().cloned();

            let applied = flow
                .try_update(|f| match result {
                    Ok(profile) => f.succeed(ticket, profile, Some(PROFILE_UPDATED_MESSAGE.to_string())),
                    Err(e) => f.fail(ticket, &e),
                })
                .unwrap_or(false);

            if let (true, Some(saved)) = (applied, saved) {
                let _ = editor.try_update(|e| {
                    if let Some(e) = e {
                        e.commit(saved);
                    }
                });
            }
        });
    };

    let field_value = move |field: ProfileField| {
        Signal::derive(move || {
            editor.with(|e| e.as_ref().map(|e| e.value(field).to_string()).unwrap_or_default())
        })
    };
    let set_field = move |field: ProfileField| {
        move |value: String| {
            editor.update(|e| {
                if let Some(e) = e {
                    e.set(field, value);
                }
            })
        }
    };
    let field_error = move |field: Field| {
        Signal::derive(move || flow.with(|f| f.field_error(field).map(str::to_string)))
    };

    let banner = Signal::derive(move || flow.with(|f| f.banner().cloned()));
    let on_dismiss = Callback::new(move |_| flow.update(|f| f.dismiss_banner()));
    let on_revert = move |_| {
        editor.update(|e| {
            if let Some(e) = e {
                e.revert();
            }
        })
    };
    let on_logout = move |_| sign_out(&auth, &router);

    view! {
        <div class="max-w-md mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"User Profile"</h2>

                    {move || load_error.get().map(|msg| view! {
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{msg}</span>
                        </div>
                    })}

                    <Show
                        when=move || editor.with(Option::is_some)
                        fallback=move || view! {
                            <Show when=move || load_error.with(Option::is_none)>
                                <div class="flex justify-center py-8">
                                    <span class="loading loading-spinner loading-md"></span>
                                </div>
                            </Show>
                        }
                    >
                        <form class="space-y-2" on:submit=on_save novalidate>
                            <BannerAlert banner=banner on_dismiss=on_dismiss />

                            <div class="form-control">
                                <label class="label" for="username">
                                    <span class="label-text">"Username"</span>
                                </label>
                                <input
                                    id="username"
                                    class="input input-bordered"
                                    readonly
                                    prop:value=field_value(ProfileField::Username)
                                />
                            </div>
                            <TextField
                                id="name"
                                label="Full name"
                                value=field_value(ProfileField::Name)
                                on_input=set_field(ProfileField::Name)
                                error=field_error(Field::Name)
                            />
                            <TextField
                                id="email"
                                label="Email"
                                input_type="email"
                                value=field_value(ProfileField::Email)
                                on_input=set_field(ProfileField::Email)
                                error=field_error(Field::Email)
                            />

                            <div class="flex gap-2 justify-end pt-4">
                                <button
                                    type="button"
                                    class="btn btn-ghost"
                                    disabled=move || !is_dirty() || is_submitting()
                                    on:click=on_revert
                                >
                                    "Cancel"
                                </button>
                                <button class="btn btn-primary" disabled=move || !can_save()>
                                    {move || if is_submitting() {
                                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                    } else {
                                        "Save changes".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </Show>

                    <div class="divider"></div>
                    <button class="btn btn-outline btn-error w-full" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </div>
        </div>
    }
}
