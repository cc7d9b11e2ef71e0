use leptos::ev;
use leptos::prelude::*;

use crate::state::AppState;

/// Image panel: one prompt, one resulting image.
#[component]
pub fn ImagePanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_loading = move || state.image.with(|s| s.is_loading());
    let current_image = move || state.image.with(|s| s.image().map(str::to_string));

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            state.generate_image();
        }
    };

    view! {
        <section class="image-panel">
            <div class="panel-header">
                <div>
                    <h2>"AI Image Generator"</h2>
                    <p class="subtitle">"Powered by Gemini"</p>
                </div>
                {move || {
                    current_image()
                        .map(|_| {
                            view! {
                                <button
                                    class="icon-btn"
                                    title="Clear"
                                    on:click=move |_| state.set_image.update(|s| s.clear())
                                >
                                    "Clear"
                                </button>
                            }
                        })
                }}
            </div>

            <div class="image-stage">
                {move || {
                    if is_loading() {
                        view! { <p class="thinking">"Creating your image..."</p> }.into_any()
                    } else if let Some(uri) = current_image() {
                        view! { <img class="generated-image" src=uri alt="Generated" /> }.into_any()
                    } else {
                        view! {
                            <div class="empty-state">
                                <h3>"Generate Stunning AI Images"</h3>
                                <p>"Describe the image you want, and Gemini will draw it."</p>
                            </div>
                        }
                            .into_any()
                    }
                }}
                {move || {
                    state
                        .image
                        .with(|s| s.error().map(str::to_string))
                        .map(|err| view! { <div class="error-banner">{err}</div> })
                }}
            </div>

            <div class="input-area">
                <div class="input-row">
                    <input
                        type="text"
                        placeholder="Describe an image..."
                        prop:value=move || state.image.with(|s| s.prompt().to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.set_image.update(|s| s.set_prompt(value));
                        }
                        on:keydown=on_keydown
                        disabled=is_loading
                    />
                    <button
                        class="send-btn"
                        on:click=move |_| state.generate_image()
                        disabled=is_loading
                    >
                        {move || if is_loading() { "Generating..." } else { "Generate" }}
                    </button>
                    {move || {
                        is_loading()
                            .then(|| {
                                view! {
                                    <button
                                        class="cancel-btn"
                                        on:click=move |_| {
                                            state.set_image.update(|s| {
                                                s.abort();
                                            });
                                        }
                                    >
                                        "Cancel"
                                    </button>
                                }
                            })
                    }}
                </div>
                <p class="disclaimer">
                    "AI-generated images may not always match your expectations."
                </p>
            </div>
        </section>
    }
}
