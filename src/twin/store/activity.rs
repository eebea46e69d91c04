use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::auto_sends::AutoSendLedger;
use super::ring::RingBuffer;
use crate::twin::consent::Surface;

pub const ACTIVITY_LOG_CAPACITY: usize = 100;

/// How a logged reply left the Twin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModeUsed {
    /// Held for human approval.
    Suggest,
    /// Sent without approval.
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub surface: Surface,
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub contact_id: String,
    pub input_preview: String,
    pub output: String,
    pub mode_used: ModeUsed,
    /// `None` until the user reviews the entry.
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub escalated: bool,
}

impl ActivityLogEntry {
    pub fn is_auto(&self) -> bool {
        self.mode_used == ModeUsed::Auto
    }
}

/// Append-only audit trail of generated replies, newest first, plus the
/// auto-send tally the gate rate-limits against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLog {
    entries: RingBuffer<ActivityLogEntry>,
    auto_sends: AutoSendLedger,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self {
            entries: RingBuffer::with_capacity(ACTIVITY_LOG_CAPACITY),
            auto_sends: AutoSendLedger::default(),
        }
    }
}

impl ActivityLog {
    /// Rebuild from stored entries, seeding the tally from their auto sends.
    pub fn from_entries(entries: Vec<ActivityLogEntry>) -> Self {
        let mut auto_sends = AutoSendLedger::default();
        for entry in entries.iter().filter(|e| e.is_auto()) {
            auto_sends.record(&entry.conversation_id, entry.timestamp);
        }
        Self {
            entries: RingBuffer::from_newest_first(entries, ACTIVITY_LOG_CAPACITY),
            auto_sends,
        }
    }

    /// Replace the tally with a persisted one.
    pub fn with_auto_sends(mut self, auto_sends: AutoSendLedger) -> Self {
        self.auto_sends = auto_sends;
        self
    }

    pub fn append(&mut self, entry: ActivityLogEntry) {
        if entry.is_auto() {
            self.auto_sends.record(&entry.conversation_id, entry.timestamp);
        }
        if let Some(evicted) = self.entries.push(entry) {
            tracing::debug!(id = %evicted.id, "twin.activity.evicted");
        }
    }

    /// Drop the visible history. The auto-send tally is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn auto_sends(&self) -> &AutoSendLedger {
        &self.auto_sends
    }

    pub fn forget_cooled(&mut self, cooldown_seconds: u64) {
        self.auto_sends.forget_cooled(cooldown_seconds);
    }

    /// Record the user's verdict on an entry. Returns `false` for unknown ids.
    pub fn set_approval(&mut self, id: &str, approved: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.approved = Some(approved);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ActivityLogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &ActivityLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
