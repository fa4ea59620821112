//! Append-only chat transcript.
//!
//! Bubbles are only ever appended, except the typing placeholder, which is
//! removed once its exchange settles. At most one placeholder exists at a time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

/// Text shown while the bot's reply is outstanding.
pub const TYPING_TEXT: &str = "...typing";

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BubbleId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BubbleKind {
    Message,
    Typing,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub id: BubbleId,
    pub author: Author,
    pub kind: BubbleKind,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Change notification for front ends that render incrementally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TranscriptEvent {
    Appended(Bubble),
    Removed(BubbleId),
}

#[derive(Debug, Default)]
struct TranscriptInner {
    bubbles: Vec<Bubble>,
    next_id: u64,
}

#[derive(Debug)]
pub struct ChatTranscript {
    inner: Mutex<TranscriptInner>,
    events: broadcast::Sender<TranscriptEvent>,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Mutex::new(TranscriptInner::default()),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TranscriptInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: TranscriptEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn push_locked(
        inner: &mut TranscriptInner,
        author: Author,
        kind: BubbleKind,
        text: String,
    ) -> Bubble {
        inner.next_id += 1;
        let bubble = Bubble {
            id: BubbleId(inner.next_id),
            author,
            kind,
            text,
            created_at: Utc::now(),
        };
        inner.bubbles.push(bubble.clone());
        bubble
    }

    fn push(&self, author: Author, kind: BubbleKind, text: String) -> Bubble {
        let bubble = Self::push_locked(&mut self.lock(), author, kind, text);
        self.notify(TranscriptEvent::Appended(bubble.clone()));
        bubble
    }

    pub fn append_user(&self, text: impl Into<String>) -> Bubble {
        self.push(Author::User, BubbleKind::Message, text.into())
    }

    pub fn append_bot(&self, text: impl Into<String>) -> Bubble {
        self.push(Author::Bot, BubbleKind::Message, text.into())
    }

    pub fn append_error(&self, text: impl Into<String>) -> Bubble {
        self.push(Author::Bot, BubbleKind::Error, text.into())
    }

    /// Show the typing placeholder, or return the one already shown.
    pub fn show_typing(&self) -> BubbleId {
        let created = {
            let mut inner = self.lock();
            if let Some(existing) = inner.bubbles.iter().find(|b| b.kind == BubbleKind::Typing) {
                return existing.id;
            }
            Self::push_locked(
                &mut inner,
                Author::Bot,
                BubbleKind::Typing,
                TYPING_TEXT.to_string(),
            )
        };
        let id = created.id;
        self.notify(TranscriptEvent::Appended(created));
        id
    }

    /// Remove a typing placeholder. Returns `false` if `id` is not a
    /// placeholder currently in the transcript.
    pub fn remove_typing(&self, id: BubbleId) -> bool {
        let removed = {
            let mut inner = self.lock();
            match inner
                .bubbles
                .iter()
                .position(|b| b.id == id && b.kind == BubbleKind::Typing)
            {
                Some(pos) => {
                    inner.bubbles.remove(pos);
                    true
                }
                None => false,
            }
        };
        if removed {
            self.notify(TranscriptEvent::Removed(id));
        }
        removed
    }

    pub fn typing_count(&self) -> usize {
        self.lock()
            .bubbles
            .iter()
            .filter(|b| b.kind == BubbleKind::Typing)
            .count()
    }

    pub fn bubbles(&self) -> Vec<Bubble> {
        self.lock().bubbles.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().bubbles.is_empty()
    }
}
