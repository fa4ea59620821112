//! AI planner board: one result region per planner kind.

use super::{ErrorFraming, Submission};
use crate::client::{PlannerKind, PlannerRequest, StrokeBackend};
use crate::config::OrderingPolicy;
use crate::display::{DisplayRegion, RegionSnapshot, RenderOutcome, Tone};
use crate::logging::{generate_request_id, truncate_content};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::Instrument;

const FRAMING: ErrorFraming = ErrorFraming {
    error_prefix: "Error: ",
    fallback: "Could not generate plan.",
    network_prefix: "Network error: ",
    network_hint: ". Please ensure the backend server is running and its AI service is configured.",
};

/// Planner requests keyed by kind. Each kind renders only into its own
/// `{kind}PlannerResult` region, created on first use.
pub struct PlannerBoard {
    backend: Arc<dyn StrokeBackend>,
    regions: DashMap<PlannerKind, Arc<DisplayRegion>>,
    ordering: OrderingPolicy,
    content_logging: bool,
}

impl PlannerBoard {
    pub fn new(backend: Arc<dyn StrokeBackend>, ordering: OrderingPolicy) -> Self {
        Self {
            backend,
            regions: DashMap::new(),
            ordering,
            content_logging: false,
        }
    }

    /// Include (truncated) planner input in log lines.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.content_logging = enabled;
        self
    }

    fn region(&self, kind: &PlannerKind) -> Arc<DisplayRegion> {
        // Clone the Arc out so the shard lock is released before any await.
        self.regions
            .entry(kind.clone())
            .or_insert_with(|| Arc::new(DisplayRegion::new(kind.region_id(), self.ordering)))
            .value()
            .clone()
    }

    /// Snapshot of a planner's region, if that planner has been used.
    pub fn snapshot(&self, kind: &PlannerKind) -> Option<RegionSnapshot> {
        self.regions.get(kind).map(|region| region.snapshot())
    }

    /// Snapshots of every planner region, ordered by kind.
    pub fn snapshots(&self) -> Vec<RegionSnapshot> {
        let mut entries: Vec<(PlannerKind, RegionSnapshot)> = self
            .regions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().snapshot()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, snap)| snap).collect()
    }

    pub async fn recommend(&self, kind: &PlannerKind, input: &str) -> Submission {
        let region = self.region(kind);
        let ticket = region.reset();

        let span = tracing::info_span!(
            "planner",
            request_id = %generate_request_id(),
            planner = %kind,
        );

        async {
            if let Some(preview) = truncate_content(input, self.content_logging) {
                tracing::debug!(input = %preview, "Requesting plan");
            }

            let result = self
                .backend
                .plan(
                    kind,
                    &PlannerRequest {
                        input: input.to_string(),
                    },
                )
                .await;

            let outcome = match result {
                Ok(response) if !response.plan.trim().is_empty() => RenderOutcome::Success {
                    text: response.plan,
                    tone: Tone::Success,
                },
                Ok(_) => {
                    tracing::warn!("Planner answered without a plan");
                    RenderOutcome::Error {
                        text: format!("{}{}", FRAMING.error_prefix, FRAMING.fallback),
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Planner request failed");
                    FRAMING.render(&e)
                }
            };

            let applied = region.settle(ticket, &outcome);
            Submission { outcome, applied }
        }
        .instrument(span)
        .await
    }
}
