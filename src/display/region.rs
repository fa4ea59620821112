//! Single-result display region with a reset/settle state machine.
//!
//! ```text
//! Idle ──reset──▶ Pending ──settle──▶ Success | Error | NetworkError
//!                   ▲                          │
//!                   └──────────reset───────────┘
//! ```
//!
//! Every `reset` hands out a [`Ticket`]. Under
//! [`OrderingPolicy::LatestSubmission`] a settlement only lands if its ticket
//! is the newest one issued; under [`OrderingPolicy::LastResponse`] any ticket
//! lands and the last settlement wins.

use super::{RenderOutcome, Tone};
use crate::config::OrderingPolicy;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionState {
    Idle,
    Pending,
    Success,
    Error,
    NetworkError,
}

/// Handle for one submission against a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Point-in-time copy of a region for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSnapshot {
    pub id: String,
    pub state: RegionState,
    pub visible: bool,
    pub text: String,
    pub tone: Option<Tone>,
}

#[derive(Debug)]
struct RegionInner {
    state: RegionState,
    visible: bool,
    text: String,
    tone: Option<Tone>,
    /// Newest ticket handed out by `reset`
    generation: u64,
}

#[derive(Debug)]
pub struct DisplayRegion {
    id: String,
    ordering: OrderingPolicy,
    inner: Mutex<RegionInner>,
}

impl DisplayRegion {
    pub fn new(id: impl Into<String>, ordering: OrderingPolicy) -> Self {
        Self {
            id: id.into(),
            ordering,
            inner: Mutex::new(RegionInner {
                state: RegionState::Idle,
                visible: false,
                text: String::new(),
                tone: None,
                generation: 0,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    fn lock(&self) -> MutexGuard<'_, RegionInner> {
        // Critical sections never panic midway; a poisoned lock still holds
        // consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hide the region, clear its text and styling, and start a new submission.
    pub fn reset(&self) -> Ticket {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = RegionState::Pending;
        inner.visible = false;
        inner.text.clear();
        inner.tone = None;
        Ticket(inner.generation)
    }

    fn accepts(&self, inner: &RegionInner, ticket: Ticket) -> bool {
        match self.ordering {
            OrderingPolicy::LatestSubmission => ticket.0 == inner.generation,
            OrderingPolicy::LastResponse => true,
        }
    }

    /// Render `outcome` for `ticket`. Returns `false` when the settlement was
    /// dropped because a newer submission owns the region.
    pub fn settle(&self, ticket: Ticket, outcome: &RenderOutcome) -> bool {
        let mut inner = self.lock();
        if !self.accepts(&inner, ticket) {
            tracing::debug!(
                region = %self.id,
                ticket = ticket.0,
                current = inner.generation,
                "Dropping stale settlement"
            );
            return false;
        }
        inner.state = outcome.state();
        inner.visible = true;
        inner.text = outcome.text().to_string();
        inner.tone = Some(outcome.tone());
        true
    }

    /// Return a pending region to `Idle` without showing anything.
    pub fn dismiss(&self, ticket: Ticket) -> bool {
        let mut inner = self.lock();
        if !self.accepts(&inner, ticket) {
            return false;
        }
        inner.state = RegionState::Idle;
        inner.visible = false;
        inner.text.clear();
        inner.tone = None;
        true
    }

    pub fn snapshot(&self) -> RegionSnapshot {
        let inner = self.lock();
        RegionSnapshot {
            id: self.id.clone(),
            state: inner.state,
            visible: inner.visible,
            text: inner.text.clone(),
            tone: inner.tone,
        }
    }
}
