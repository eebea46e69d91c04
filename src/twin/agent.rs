//! The Twin pipeline: gate → generate → safety → log → deliver.
//!
//! `Twin` owns one user's state and is constructed explicitly by the caller,
//! so several users (or tests) can run side by side without sharing anything.

use serde::Serialize;

use crate::config::TwinConfig;
use crate::error::Result;
use crate::twin::consent::ConsentPolicy;
use crate::twin::delivery::{Delivery, DeliveryMode, DeliverySink};
use crate::twin::gate::{GateDecision, GateEvaluator, GateVerdict, InboundEvent};
use crate::twin::generator::ReplyGenerator;
use crate::twin::safety::{SafetyOutcome, apply_safety};
use crate::twin::store::{
    ActivityLogEntry, FeedbackScore, FileKvStore, ModeUsed, TrainingFeedbackItem, TwinStore,
};
use crate::twin::style::StyleProfile;
use crate::utils::text::preview;

pub const DEFAULT_PREVIEW_CHARS: usize = 80;

/// Result of handling one inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TwinOutcome {
    /// The gate refused to act; nothing was generated or logged.
    Suppressed { reason: &'static str },
    Replied {
        verdict: GateVerdict,
        entry: ActivityLogEntry,
        delivery: Delivery,
    },
}

impl TwinOutcome {
    /// Final decision after escalation has been applied.
    pub fn decision(&self) -> GateDecision {
        match self {
            Self::Suppressed { .. } => GateDecision::Suppressed,
            Self::Replied { entry, .. } => match entry.mode_used {
                ModeUsed::Auto => GateDecision::Auto,
                ModeUsed::Suggest => GateDecision::Suggest,
            },
        }
    }

    pub fn entry(&self) -> Option<&ActivityLogEntry> {
        match self {
            Self::Suppressed { .. } => None,
            Self::Replied { entry, .. } => Some(entry),
        }
    }

    pub fn delivery(&self) -> Option<&Delivery> {
        match self {
            Self::Suppressed { .. } => None,
            Self::Replied { delivery, .. } => Some(delivery),
        }
    }
}

#[derive(Debug)]
pub struct Twin {
    store: TwinStore,
    generator: ReplyGenerator,
    gate: GateEvaluator,
    preview_chars: usize,
}

impl Twin {
    pub fn new(store: TwinStore, generator: ReplyGenerator, gate: GateEvaluator) -> Self {
        Self {
            store,
            generator,
            gate,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// File-backed Twin under the configured state directory.
    pub fn from_config(config: &TwinConfig) -> Self {
        let store = TwinStore::load(Box::new(FileKvStore::new(config.state_dir_path())));
        let generator = config
            .generator
            .seed
            .map_or_else(ReplyGenerator::default, ReplyGenerator::seeded);
        let gate = config
            .utc_offset_minutes
            .and_then(GateEvaluator::from_offset_minutes)
            .unwrap_or_else(GateEvaluator::system_local);
        Self::new(store, generator, gate).with_preview_chars(config.preview_chars)
    }

    #[must_use]
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars.max(1);
        self
    }

    pub fn store(&self) -> &TwinStore {
        &self.store
    }

    pub fn gate(&self) -> &GateEvaluator {
        &self.gate
    }

    // ── Pipeline ────────────────────────────────────────────────────────

    /// Gate an event without generating anything.
    pub fn evaluate(&self, event: &InboundEvent) -> GateVerdict {
        self.gate
            .evaluate(event, self.store.consent(), self.store.activity())
    }

    /// Raw candidate reply for `input`, before safety filtering.
    pub fn generate_reply(&mut self, input: &str) -> String {
        self.generator
            .generate(input, self.store.style(), self.store.feedback())
    }

    /// Run the full pipeline for one inbound event.
    ///
    /// The activity entry is appended before the sink is called, so a gate
    /// evaluation that runs after this returns always sees it.
    pub fn handle(&mut self, event: &InboundEvent, sink: &dyn DeliverySink) -> TwinOutcome {
        let verdict = self.evaluate(event);
        let Some(gated_mode) = verdict.decision.mode_used() else {
            return TwinOutcome::Suppressed {
                reason: verdict.reason,
            };
        };

        let candidate = self.generate_reply(&event.text);
        let SafetyOutcome {
            text, escalated, ..
        } = apply_safety(&candidate, &self.store.consent().safety);

        let mode_used = if escalated {
            ModeUsed::Suggest
        } else {
            gated_mode
        };

        let entry = ActivityLogEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: event.timestamp_utc,
            surface: event.surface,
            conversation_id: event.conversation_id.clone(),
            contact_id: event.contact_id.clone(),
            input_preview: preview(&event.text, self.preview_chars),
            output: text,
            mode_used,
            approved: None,
            escalated,
        };
        self.store.record_activity(entry.clone());

        let delivery = Delivery {
            entry_id: entry.id.clone(),
            conversation_id: entry.conversation_id.clone(),
            text: entry.output.clone(),
            mode: match mode_used {
                ModeUsed::Auto => DeliveryMode::SendNow,
                ModeUsed::Suggest => DeliveryMode::HoldForApproval,
            },
            badge: self.badge_visible(),
        };
        match sink.deliver(&delivery) {
            Ok(()) => tracing::info!(
                conversation = %delivery.conversation_id,
                mode = %delivery.mode,
                escalated,
                "twin.deliver"
            ),
            Err(error) => tracing::warn!(
                conversation = %delivery.conversation_id,
                %error,
                "twin.deliver"
            ),
        }

        TwinOutcome::Replied {
            verdict,
            entry,
            delivery,
        }
    }

    pub fn badge_visible(&self) -> bool {
        self.store.consent().show_badge
    }

    // ── Activity & feedback ─────────────────────────────────────────────

    pub fn record_activity(&mut self, entry: ActivityLogEntry) {
        self.store.record_activity(entry);
    }

    pub fn clear_activity(&mut self) {
        self.store.clear_activity();
    }

    /// Accept or reject a held suggestion. `false` when the id is unknown.
    pub fn review(&mut self, entry_id: &str, approved: bool) -> bool {
        self.store.set_approval(entry_id, approved)
    }

    pub fn record_feedback(
        &mut self,
        text: impl Into<String>,
        score: FeedbackScore,
    ) -> TrainingFeedbackItem {
        self.store.record_feedback(text, score)
    }

    pub fn remove_feedback(&mut self, id: &str) -> bool {
        self.store.remove_feedback(id)
    }

    // ── Settings ────────────────────────────────────────────────────────

    pub fn consent(&self) -> &ConsentPolicy {
        self.store.consent()
    }

    pub fn style(&self) -> &StyleProfile {
        self.store.style()
    }

    pub fn update_consent(&mut self, consent: ConsentPolicy) -> Result<()> {
        self.store.update_consent(consent)
    }

    pub fn reset_consent(&mut self) {
        self.store.reset_consent();
    }

    pub fn update_style(&mut self, style: StyleProfile) -> Result<()> {
        self.store.update_style(style)
    }

    pub fn reset_style(&mut self) {
        self.store.reset_style();
    }
}
