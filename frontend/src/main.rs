mod api;
mod components;
mod format;
mod models;
mod session;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatPanel;
use components::image::ImagePanel;
use state::{AppState, Panel};

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    view! {
        <div class="app-container">
            <header class="app-header">
                <h1>"AI Generator App"</h1>
                <nav class="panel-tabs">
                    <button
                        class="tab"
                        class:active=move || state.panel.get() == Panel::Chat
                        on:click=move |_| state.set_panel.set(Panel::Chat)
                    >
                        "Text Chat"
                    </button>
                    <button
                        class="tab"
                        class:active=move || state.panel.get() == Panel::Image
                        on:click=move |_| state.set_panel.set(Panel::Image)
                    >
                        "Image"
                    </button>
                </nav>
            </header>
            <main class="panel">
                {move || match state.panel.get() {
                    Panel::Chat => view! { <ChatPanel /> }.into_any(),
                    Panel::Image => view! { <ImagePanel /> }.into_any(),
                }}
            </main>
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
