use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpApi;
use crate::session::{self, ChatSession, ImageSession};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Chat,
    Image,
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub chat: ReadSignal<ChatSession>,
    pub image: ReadSignal<ImageSession>,
    pub panel: ReadSignal<Panel>,

    // --- Write signals (for mutating state) ---
    pub set_chat: WriteSignal<ChatSession>,
    pub set_image: WriteSignal<ImageSession>,
    pub set_panel: WriteSignal<Panel>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (chat, set_chat) = signal(ChatSession::default());
        let (image, set_image) = signal(ImageSession::default());
        let (panel, set_panel) = signal(Panel::Chat);

        let state = Self { chat, image, panel, set_chat, set_image, set_panel };

        provide_context(state);
        state
    }

    /// Send the current chat input, if the session admits it.
    pub fn send_message(&self) {
        let mut admitted = None;
        self.set_chat.update(|session| admitted = session.begin_send());
        let Some(pending) = admitted else {
            return;
        };

        let set_chat = self.set_chat;
        spawn_local(async move {
            if let Some(outcome) = session::dispatch(&HttpApi, pending).await {
                set_chat.update(|session| {
                    session.complete(outcome);
                });
            }
        });
    }

    /// Generate an image from the current prompt, if the session admits it.
    pub fn generate_image(&self) {
        let mut admitted = None;
        self.set_image.update(|session| admitted = session.begin_generate());
        let Some(pending) = admitted else {
            return;
        };

        let set_image = self.set_image;
        spawn_local(async move {
            if let Some(outcome) = session::dispatch(&HttpApi, pending).await {
                set_image.update(|session| {
                    session.complete(outcome);
                });
            }
        });
    }
}
