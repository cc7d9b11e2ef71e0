//! View state for the chat and image panels, independent of the reactive layer.
//!
//! Each panel owns a [`RequestSlot`]: at most one request is in flight, the
//! loading flag is derived from slot occupancy, and an in-flight request can be
//! aborted. Results arriving for a ticket that is no longer in the slot are
//! discarded.

use std::future::Future;

use futures_util::future::{AbortHandle, AbortRegistration, Abortable};

use crate::models::ChatMessage;

/// The two backend calls a panel can make.
pub trait GenerationApi {
    fn generate_text(&self, prompt: &str) -> impl Future<Output = Result<String, String>>;

    /// Resolves to a `data:` URI.
    fn generate_image(&self, prompt: &str) -> impl Future<Output = Result<String, String>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Text,
    Image,
}

#[derive(Debug)]
struct InFlight {
    ticket: u64,
    abort: AbortHandle,
}

/// Single-slot holder for the one request a panel may have outstanding.
#[derive(Debug, Default)]
pub struct RequestSlot {
    current: Option<InFlight>,
    next_ticket: u64,
}

impl RequestSlot {
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    fn open(&mut self) -> (u64, AbortRegistration) {
        self.abort();
        let (abort, registration) = AbortHandle::new_pair();
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.current = Some(InFlight { ticket, abort });
        (ticket, registration)
    }

    /// Frees the slot if `ticket` is the one in flight.
    fn settle(&mut self, ticket: u64) -> bool {
        match &self.current {
            Some(in_flight) if in_flight.ticket == ticket => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    fn abort(&mut self) -> bool {
        match self.current.take() {
            Some(in_flight) => {
                in_flight.abort.abort();
                true
            }
            None => false,
        }
    }
}

/// A request that has been admitted by a panel but not yet sent.
#[derive(Debug)]
pub struct Pending {
    pub ticket: u64,
    pub prompt: String,
    pub kind: RequestKind,
    registration: AbortRegistration,
}

/// Result of a request that ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub ticket: u64,
    pub result: Result<String, String>,
}

/// Performs the network call for `pending`.
///
/// Returns `None` if the request was aborted before it finished.
pub async fn dispatch<A: GenerationApi>(api: &A, pending: Pending) -> Option<Outcome> {
    let Pending { ticket, prompt, kind, registration } = pending;

    let finished = match kind {
        RequestKind::Text => Abortable::new(api.generate_text(&prompt), registration).await,
        RequestKind::Image => Abortable::new(api.generate_image(&prompt), registration).await,
    };

    match finished {
        Ok(result) => Some(Outcome { ticket, result }),
        Err(_aborted) => {
            log::debug!("Request {ticket} aborted");
            None
        }
    }
}

// ── Chat ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    input: String,
    slot: RequestSlot,
}

impl ChatSession {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub fn is_loading(&self) -> bool {
        self.slot.is_busy()
    }

    /// Changes whenever the visible tail of the transcript does: a message is
    /// added or removed, or the thinking indicator appears or goes away.
    pub fn scroll_marker(&self) -> (usize, bool) {
        (self.messages.len(), self.is_loading())
    }

    /// Admits the current input as a new user message.
    ///
    /// Returns `None`, leaving everything untouched, when the input is blank
    /// or a reply is still pending.
    pub fn begin_send(&mut self) -> Option<Pending> {
        if self.input.trim().is_empty() || self.slot.is_busy() {
            return None;
        }

        let prompt = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage::user(prompt.clone()));
        let (ticket, registration) = self.slot.open();

        Some(Pending { ticket, prompt, kind: RequestKind::Text, registration })
    }

    /// Appends the assistant side of the exchange. Stale outcomes are ignored.
    pub fn complete(&mut self, outcome: Outcome) -> bool {
        if !self.slot.settle(outcome.ticket) {
            return false;
        }

        let message = match outcome.result {
            Ok(reply) => ChatMessage::reply(reply),
            Err(description) => ChatMessage::error(&description),
        };
        self.messages.push(message);
        true
    }

    pub fn abort(&mut self) -> bool {
        self.slot.abort()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

// ── Image ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ImageSession {
    prompt: String,
    image: Option<String>,
    error: Option<String>,
    slot: RequestSlot,
}

impl ImageSession {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.slot.is_busy()
    }

    pub fn begin_generate(&mut self) -> Option<Pending> {
        if self.prompt.trim().is_empty() || self.slot.is_busy() {
            return None;
        }

        self.error = None;
        let (ticket, registration) = self.slot.open();
        Some(Pending {
            ticket,
            prompt: self.prompt.clone(),
            kind: RequestKind::Image,
            registration,
        })
    }

    pub fn complete(&mut self, outcome: Outcome) -> bool {
        if !self.slot.settle(outcome.ticket) {
            return false;
        }

        match outcome.result {
            Ok(uri) => self.image = Some(uri),
            Err(description) => {
                log::error!("Image generation failed: {description}");
                self.error = Some(description);
            }
        }
        true
    }

    pub fn abort(&mut self) -> bool {
        self.slot.abort()
    }

    pub fn clear(&mut self) {
        self.image = None;
        self.prompt.clear();
    }
}
