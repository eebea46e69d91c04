mod trackers;

pub use trackers::AutoSendTracker;

use chrono::{DateTime, FixedOffset, Local, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::twin::consent::{AgentMode, ConsentPolicy, Surface};
use crate::twin::store::{ActivityLog, ModeUsed};

const SURFACE_DISABLED: &str = "surface disabled by consent policy";
const MODE_OFF: &str = "effective mode is off";
const CONTACT_DENIED: &str = "contact is on the deny list";
const SUGGEST_MODE: &str = "effective mode is suggest";
const NOT_ALLOW_LISTED: &str = "auto downgraded: contact not on allow list";
const QUIET_HOURS: &str = "auto downgraded: inside quiet hours";
const DAILY_CAP: &str = "auto downgraded: daily auto limit reached";
const COOLDOWN: &str = "auto downgraded: conversation cooling down";
const AUTO_PERMITTED: &str = "auto permitted";

/// An inbound message or feed item the Twin may respond to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    pub conversation_id: String,
    pub contact_id: String,
    pub surface: Surface,
    pub text: String,
    pub timestamp_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GateDecision {
    Suppressed,
    Suggest,
    Auto,
}

impl GateDecision {
    /// The log mode for a decision that produces output.
    pub fn mode_used(self) -> Option<ModeUsed> {
        match self {
            Self::Suppressed => None,
            Self::Suggest => Some(ModeUsed::Suggest),
            Self::Auto => Some(ModeUsed::Auto),
        }
    }
}

/// Decision plus the rule that produced it, for the review surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateVerdict {
    pub decision: GateDecision,
    pub reason: &'static str,
}

impl GateVerdict {
    fn new(decision: GateDecision, reason: &'static str) -> Self {
        Self { decision, reason }
    }
}

/// Decides, per inbound event, whether the Twin may act and how.
///
/// Restrictions on autonomy downgrade `Auto` to `Suggest` rather than
/// suppressing, so the user still sees a held draft.
#[derive(Debug, Clone, Copy)]
pub struct GateEvaluator {
    /// `None` follows the system zone, resolved at each event's instant.
    offset: Option<FixedOffset>,
}

impl Default for GateEvaluator {
    fn default() -> Self {
        Self::system_local()
    }
}

impl GateEvaluator {
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    /// `None` when the offset is outside ±24h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::with_offset)
    }

    pub fn system_local() -> Self {
        Self { offset: None }
    }

    pub fn follows_system_zone(&self) -> bool {
        self.offset.is_none()
    }

    /// The UTC offset in force at `at`. For the system zone this tracks
    /// daylight-saving changes.
    pub fn offset_at(&self, at: DateTime<Utc>) -> FixedOffset {
        self.offset
            .unwrap_or_else(|| at.with_timezone(&Local).offset().fix())
    }

    pub fn local_hour(&self, now: DateTime<Utc>) -> u32 {
        now.with_timezone(&self.offset_at(now)).hour()
    }

    pub fn evaluate(
        &self,
        event: &InboundEvent,
        policy: &ConsentPolicy,
        log: &ActivityLog,
    ) -> GateVerdict {
        let verdict = self.decide(event, policy, log);
        tracing::debug!(
            conversation = %event.conversation_id,
            surface = %event.surface,
            decision = %verdict.decision,
            reason = verdict.reason,
            "twin.gate"
        );
        verdict
    }

    fn decide(
        &self,
        event: &InboundEvent,
        policy: &ConsentPolicy,
        log: &ActivityLog,
    ) -> GateVerdict {
        if !policy.surface_enabled(event.surface) {
            return GateVerdict::new(GateDecision::Suppressed, SURFACE_DISABLED);
        }

        let mode = policy.effective_mode(&event.conversation_id);
        if mode == AgentMode::Off {
            return GateVerdict::new(GateDecision::Suppressed, MODE_OFF);
        }

        if policy.is_denied(&event.contact_id) {
            return GateVerdict::new(GateDecision::Suppressed, CONTACT_DENIED);
        }

        if mode == AgentMode::Suggest {
            return GateVerdict::new(GateDecision::Suggest, SUGGEST_MODE);
        }

        if !policy.auto_permitted_for(&event.contact_id) {
            return GateVerdict::new(GateDecision::Suggest, NOT_ALLOW_LISTED);
        }

        let now = event.timestamp_utc;
        if policy.quiet_hours.contains(self.local_hour(now)) {
            return GateVerdict::new(GateDecision::Suggest, QUIET_HOURS);
        }

        let tracker = AutoSendTracker::new(log, self.offset_at(now));
        let daily_cap = usize::try_from(policy.daily_max_auto).unwrap_or(usize::MAX);
        if tracker.count_on_local_day(now) >= daily_cap {
            return GateVerdict::new(GateDecision::Suggest, DAILY_CAP);
        }
        if tracker.cooling_down(&event.conversation_id, now, policy.cooldown_seconds) {
            return GateVerdict::new(GateDecision::Suggest, COOLDOWN);
        }

        GateVerdict::new(GateDecision::Auto, AUTO_PERMITTED)
    }
}

/// Gate one event against the policy and recent activity.
pub fn evaluate_gate(
    event: &InboundEvent,
    policy: &ConsentPolicy,
    log: &ActivityLog,
    evaluator: &GateEvaluator,
) -> GateDecision {
    evaluator.evaluate(event, policy, log).decision
}
