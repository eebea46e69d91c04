use chrono::{DateTime, FixedOffset, Utc};

use crate::twin::store::ActivityLog;

/// Read-only view over the activity log's auto-send tally answering the two
/// rate questions the gate asks: how many replies went out autonomously
/// today, and how long ago the last one in a conversation was.
#[derive(Debug, Clone, Copy)]
pub struct AutoSendTracker<'a> {
    log: &'a ActivityLog,
    offset: FixedOffset,
}

impl<'a> AutoSendTracker<'a> {
    pub fn new(log: &'a ActivityLog, offset: FixedOffset) -> Self {
        Self { log, offset }
    }

    /// Auto sends whose local calendar day equals that of `now`.
    pub fn count_on_local_day(&self, now: DateTime<Utc>) -> usize {
        self.log.auto_sends().count_on_local_day(now, self.offset)
    }

    /// Seconds since the newest auto send for `conversation_id`. Negative
    /// when that send is stamped after `now`.
    pub fn seconds_since_last(&self, conversation_id: &str, now: DateTime<Utc>) -> Option<i64> {
        self.log
            .auto_sends()
            .last_for(conversation_id)
            .map(|last| (now - last).num_seconds())
    }

    pub fn cooling_down(
        &self,
        conversation_id: &str,
        now: DateTime<Utc>,
        cooldown_secs: u64,
    ) -> bool {
        let cooldown = i64::try_from(cooldown_secs).unwrap_or(i64::MAX);
        self.seconds_since_last(conversation_id, now)
            .is_some_and(|elapsed| elapsed < cooldown)
    }
}
