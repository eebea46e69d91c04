//! Write-through state container for one user's Twin.
//!
//! Everything is loaded once at construction and rewritten on every mutation.
//! In-memory state is updated first and stays authoritative: a failed write is
//! logged and otherwise ignored.

mod activity;
mod auto_sends;
mod feedback;
mod kv;
mod ring;

pub use activity::{ACTIVITY_LOG_CAPACITY, ActivityLog, ActivityLogEntry, ModeUsed};
pub use auto_sends::AutoSendLedger;
pub use feedback::{
    FEEDBACK_CAPACITY, FeedbackScore, FeedbackStore, FeedbackSummary, TrainingFeedbackItem,
};
pub use kv::{
    ACTIVITY_LOG_KEY, AUTO_SENDS_KEY, CONSENT_POLICY_KEY, FileKvStore, KvStore, MemoryKvStore,
    STYLE_PROFILE_KEY, TRAINING_FEEDBACK_KEY,
};
pub use ring::RingBuffer;

#[cfg(test)]
pub(crate) use activity::tests as activity_tests;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, StorageError, TwinError};
use crate::twin::consent::ConsentPolicy;
use crate::twin::style::StyleProfile;

pub struct TwinStore {
    kv: Box<dyn KvStore>,
    style: StyleProfile,
    consent: ConsentPolicy,
    activity: ActivityLog,
    feedback: FeedbackStore,
}

impl std::fmt::Debug for TwinStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwinStore")
            .field("style", &self.style)
            .field("consent", &self.consent)
            .field("activity_len", &self.activity.len())
            .field("feedback_len", &self.feedback.len())
            .finish_non_exhaustive()
    }
}

fn load_or_default<T: DeserializeOwned + Default>(kv: &dyn KvStore, key: &str) -> T {
    let Some(value) = kv.get(key) else {
        tracing::debug!(key, "twin.store.load_fallback");
        return T::default();
    };
    match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(error) => {
            tracing::warn!(key, %error, "twin.store.load_fallback");
            T::default()
        }
    }
}

impl TwinStore {
    /// Load every document, substituting defaults for anything absent or
    /// corrupt. A missing auto-send tally is rebuilt from the log.
    pub fn load(kv: Box<dyn KvStore>) -> Self {
        let style: StyleProfile = load_or_default(kv.as_ref(), STYLE_PROFILE_KEY);
        let consent: ConsentPolicy = load_or_default(kv.as_ref(), CONSENT_POLICY_KEY);
        let entries: Vec<ActivityLogEntry> = load_or_default(kv.as_ref(), ACTIVITY_LOG_KEY);
        let items: Vec<TrainingFeedbackItem> =
            load_or_default(kv.as_ref(), TRAINING_FEEDBACK_KEY);
        let auto_sends: Option<AutoSendLedger> = load_or_default(kv.as_ref(), AUTO_SENDS_KEY);

        let style = if style.validate().is_ok() {
            style
        } else {
            tracing::warn!(key = STYLE_PROFILE_KEY, "twin.store.load_fallback");
            StyleProfile::default()
        };
        let consent = if consent.validate().is_ok() {
            consent
        } else {
            tracing::warn!(key = CONSENT_POLICY_KEY, "twin.store.load_fallback");
            ConsentPolicy::default()
        };

        let activity = match auto_sends {
            Some(ledger) => ActivityLog::from_entries(entries).with_auto_sends(ledger),
            None => ActivityLog::from_entries(entries),
        };

        Self {
            kv,
            style,
            consent,
            activity,
            feedback: FeedbackStore::from_items(items),
        }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryKvStore::new()))
    }

    pub fn style(&self) -> &StyleProfile {
        &self.style
    }

    pub fn consent(&self) -> &ConsentPolicy {
        &self.consent
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn feedback(&self) -> &FeedbackStore {
        &self.feedback
    }

    // ── Configuration edits ─────────────────────────────────────────────

    pub fn update_style(&mut self, style: StyleProfile) -> Result<()> {
        style.validate()?;
        self.style = style;
        self.persist(STYLE_PROFILE_KEY, &self.style);
        Ok(())
    }

    pub fn reset_style(&mut self) {
        self.style = StyleProfile::default();
        self.persist(STYLE_PROFILE_KEY, &self.style);
    }

    pub fn update_consent(&mut self, consent: ConsentPolicy) -> Result<()> {
        consent.validate()?;
        self.consent = consent;
        self.persist(CONSENT_POLICY_KEY, &self.consent);
        Ok(())
    }

    /// The policy is never deleted, only reset.
    pub fn reset_consent(&mut self) {
        self.consent = ConsentPolicy::default();
        self.persist(CONSENT_POLICY_KEY, &self.consent);
    }

    // ── Activity log ────────────────────────────────────────────────────

    pub fn record_activity(&mut self, entry: ActivityLogEntry) {
        let auto = entry.is_auto();
        self.activity.append(entry);
        self.persist_activity();
        if auto {
            self.activity.forget_cooled(self.consent.cooldown_seconds);
            self.persist(AUTO_SENDS_KEY, self.activity.auto_sends());
        }
    }

    pub fn clear_activity(&mut self) {
        self.activity.clear();
        self.persist_activity();
    }

    pub fn set_approval(&mut self, entry_id: &str, approved: bool) -> bool {
        let found = self.activity.set_approval(entry_id, approved);
        if found {
            self.persist_activity();
        }
        found
    }

    // ── Training feedback ───────────────────────────────────────────────

    pub fn record_feedback(
        &mut self,
        text: impl Into<String>,
        score: FeedbackScore,
    ) -> TrainingFeedbackItem {
        self.record_feedback_at(text, score, Utc::now())
    }

    pub fn record_feedback_at(
        &mut self,
        text: impl Into<String>,
        score: FeedbackScore,
        at: DateTime<Utc>,
    ) -> TrainingFeedbackItem {
        let item = TrainingFeedbackItem::new(text, score, at);
        self.feedback.add(item.clone());
        self.persist_feedback();
        item
    }

    pub fn remove_feedback(&mut self, id: &str) -> bool {
        let removed = self.feedback.remove(id);
        if removed {
            self.persist_feedback();
        }
        removed
    }

    // ── Persistence ─────────────────────────────────────────────────────

    fn persist_activity(&self) {
        let entries: Vec<&ActivityLogEntry> = self.activity.entries().collect();
        self.persist(ACTIVITY_LOG_KEY, &entries);
    }

    fn persist_feedback(&self) {
        let items: Vec<&TrainingFeedbackItem> = self.feedback.items().collect();
        self.persist(TRAINING_FEEDBACK_KEY, &items);
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_value(value)
            .map_err(|e| {
                TwinError::from(StorageError::Encode {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            })
            .and_then(|json| self.kv.set(key, &json));
        if let Err(error) = result {
            tracing::warn!(key, %error, "twin.store.persist_failed");
        }
    }
}
