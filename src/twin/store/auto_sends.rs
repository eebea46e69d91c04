use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Send instants older than this, measured from the newest one, can no
/// longer share a local day with anything the gate will see.
const DAY_RETENTION_SECS: i64 = 48 * 3600;

/// Tally of autonomous sends backing the daily cap and per-conversation
/// cooldown. Lives beside the activity log but is never evicted with it and
/// survives `clear`, so trimming history cannot lift a rate limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoSendLedger {
    /// Oldest first.
    sent: Vec<DateTime<Utc>>,
    last_by_conversation: BTreeMap<String, DateTime<Utc>>,
}

impl AutoSendLedger {
    pub fn record(&mut self, conversation_id: &str, at: DateTime<Utc>) {
        let index = self.sent.partition_point(|t| *t <= at);
        self.sent.insert(index, at);

        self.last_by_conversation
            .entry(conversation_id.to_string())
            .and_modify(|last| *last = (*last).max(at))
            .or_insert(at);

        if let Some(newest) = self.sent.last().copied() {
            self.sent.retain(|t| (newest - *t).num_seconds() <= DAY_RETENTION_SECS);
        }
    }

    /// Drop conversations whose last send is beyond both the cooldown and the
    /// day window.
    pub fn forget_cooled(&mut self, cooldown_seconds: u64) {
        let Some(newest) = self.last_by_conversation.values().max().copied() else {
            return;
        };
        let cooldown = i64::try_from(cooldown_seconds).unwrap_or(i64::MAX);
        let horizon = cooldown.max(DAY_RETENTION_SECS);
        self.last_by_conversation
            .retain(|_, last| (newest - *last).num_seconds() <= horizon);
    }

    pub fn count_on_local_day(&self, now: DateTime<Utc>, offset: FixedOffset) -> usize {
        let today = now.with_timezone(&offset).date_naive();
        self.sent
            .iter()
            .filter(|t| t.with_timezone(&offset).date_naive() == today)
            .count()
    }

    pub fn last_for(&self, conversation_id: &str) -> Option<DateTime<Utc>> {
        self.last_by_conversation.get(conversation_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty() && self.last_by_conversation.is_empty()
    }
}
