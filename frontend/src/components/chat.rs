use leptos::prelude::*;
use leptos::{ev, html};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::format::{Block, Fragment};
use crate::models::{ChatMessage, Role};
use crate::state::AppState;

/// Chat panel: transcript, thinking indicator, and input row.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_loading = move || state.chat.with(|s| s.is_loading());

    let on_clear = move |_| state.set_chat.update(|s| s.clear());

    // Keep the newest message (or the thinking indicator) in view.
    let transcript_end = NodeRef::<html::Div>::new();
    Effect::new(move |_| {
        let _marker = state.chat.with(|s| s.scroll_marker());
        if let Some(end) = transcript_end.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            end.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    view! {
        <section class="chat-panel">
            <div class="panel-header">
                <div>
                    <h2>"AI Assistant"</h2>
                    <p class="subtitle">"Powered by Gemini"</p>
                </div>
                <button class="icon-btn" title="Clear chat" on:click=on_clear>
                    "Clear"
                </button>
            </div>

            <div class="messages-container">
                {move || {
                    let empty = state.chat.with(|s| s.messages().is_empty());
                    if empty && !is_loading() {
                        view! {
                            <div class="empty-state">
                                <h3>"Welcome to AI Chat!"</h3>
                                <p>
                                    "Ask me anything and I'll do my best to assist you with helpful information."
                                </p>
                            </div>
                        }
                            .into_any()
                    } else {
                        state
                            .chat
                            .with(|s| {
                                s.messages()
                                    .iter()
                                    .cloned()
                                    .map(|message| view! { <MessageBubble message=message /> })
                                    .collect_view()
                            })
                            .into_any()
                    }
                }}
                {move || {
                    is_loading()
                        .then(|| {
                            view! {
                                <div class="message assistant">
                                    <div class="role-label">"assistant"</div>
                                    <div class="thinking">"Thinking…"</div>
                                </div>
                            }
                        })
                }}
                <div class="transcript-end" node_ref=transcript_end></div>
            </div>

            <ChatInput />
        </section>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let css_class = match message.role {
        Role::User => "message user",
        Role::Assistant => "message assistant",
    };
    let label = message.role.as_str();

    let body = match message.formatted {
        Some(blocks) => view! { <FormattedReply blocks=blocks /> }.into_any(),
        None => view! { <div>{message.content}</div> }.into_any(),
    };

    view! {
        <div class=css_class>
            <div class="role-label">{label}</div>
            {body}
        </div>
    }
}

#[component]
fn FormattedReply(blocks: Vec<Block>) -> impl IntoView {
    let rendered = blocks
        .into_iter()
        .map(|block| match block {
            Block::Heading(text) => view! { <h3 class="reply-heading">{text}</h3> }.into_any(),
            Block::List(items) => view! {
                <ul class="reply-list">
                    {items
                        .into_iter()
                        .map(|item| view! { <li>{fragments(item)}</li> })
                        .collect_view()}
                </ul>
            }
            .into_any(),
            Block::Numbered(line) => {
                view! { <p class="reply-numbered">{fragments(line)}</p> }.into_any()
            }
            Block::Paragraph(line) => {
                view! { <p class="reply-paragraph">{fragments(line)}</p> }.into_any()
            }
        })
        .collect_view();

    view! { <div class="formatted-reply">{rendered}</div> }
}

fn fragments(line: Vec<Fragment>) -> impl IntoView {
    line.into_iter()
        .map(|fragment| {
            if fragment.emphasized {
                view! { <strong>{fragment.text}</strong> }.into_any()
            } else {
                view! { <span>{fragment.text}</span> }.into_any()
            }
        })
        .collect_view()
}

/// Input row: Enter or the send button submits, cancel drops the pending reply.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_loading = move || state.chat.with(|s| s.is_loading());

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            state.send_message();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <input
                    type="text"
                    placeholder="Ask something..."
                    prop:value=move || state.chat.with(|s| s.input().to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.set_chat.update(|s| s.set_input(value));
                    }
                    on:keydown=on_keydown
                    disabled=is_loading
                />
                <button class="send-btn" on:click=move |_| state.send_message() disabled=is_loading>
                    {move || if is_loading() { "Sending…" } else { "Send" }}
                </button>
                {move || {
                    is_loading()
                        .then(|| {
                            view! {
                                <button
                                    class="cancel-btn"
                                    on:click=move |_| {
                                        state.set_chat.update(|s| {
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
                "AI may produce inaccurate information about people, places, or facts."
            </p>
        </div>
    }
}
