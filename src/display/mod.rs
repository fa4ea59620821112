//! Toolkit-independent display surfaces.
//!
//! A [`DisplayRegion`] is the single result area a flow renders into; a
//! [`ChatTranscript`] is the append-only bubble list the chat widget owns.
//! Front ends (the CLI, or any GUI) read snapshots and events from these.

pub mod number;
pub mod region;
pub mod transcript;

pub use number::to_fixed;
pub use region::{DisplayRegion, RegionSnapshot, RegionState, Ticket};
pub use transcript::{Author, Bubble, BubbleId, BubbleKind, ChatTranscript, TranscriptEvent};

use serde::Serialize;

/// Outcome styling applied to a settled region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Danger,
}

/// What a flow decided to render for one response.
///
/// Exactly one is produced per settled request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// The backend answered successfully. Elevated-risk predictions carry
    /// [`Tone::Danger`].
    Success { text: String, tone: Tone },
    /// The backend answered with an error status or an unusable body.
    Error { text: String },
    /// The request never completed.
    NetworkError { text: String },
}

impl RenderOutcome {
    pub fn text(&self) -> &str {
        match self {
            RenderOutcome::Success { text, .. }
            | RenderOutcome::Error { text }
            | RenderOutcome::NetworkError { text } => text,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            RenderOutcome::Success { tone, .. } => *tone,
            RenderOutcome::Error { .. } | RenderOutcome::NetworkError { .. } => Tone::Danger,
        }
    }

    pub fn state(&self) -> RegionState {
        match self {
            RenderOutcome::Success { .. } => RegionState::Success,
            RenderOutcome::Error { .. } => RegionState::Error,
            RenderOutcome::NetworkError { .. } => RegionState::NetworkError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RenderOutcome::Success { .. })
    }
}
