#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use twin::twin::{
    AgentMode, ConsentPolicy, GateEvaluator, InboundEvent, QuietHours, ReplyGenerator,
    ScriptedRng, Surface, Twin, TwinStore,
};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 14, 12, 0, 0).unwrap()
}

pub fn utc_gate() -> GateEvaluator {
    GateEvaluator::from_offset_minutes(0).unwrap()
}

pub fn no_quiet_hours() -> QuietHours {
    QuietHours {
        start_hour: 0,
        end_hour: 0,
    }
}

pub fn auto_policy() -> ConsentPolicy {
    ConsentPolicy {
        mode: AgentMode::Auto,
        quiet_hours: no_quiet_hours(),
        ..ConsentPolicy::default()
    }
}

pub fn event(conversation: &str, contact: &str, at: DateTime<Utc>) -> InboundEvent {
    message(conversation, contact, "ok", at)
}

pub fn message(conversation: &str, contact: &str, text: &str, at: DateTime<Utc>) -> InboundEvent {
    InboundEvent {
        conversation_id: conversation.into(),
        contact_id: contact.into(),
        surface: Surface::Messages,
        text: text.into(),
        timestamp_utc: at,
    }
}

/// In-memory Twin with scripted (all-zero) clause picks and a UTC clock.
pub fn scripted_twin(policy: ConsentPolicy) -> Twin {
    let mut store = TwinStore::in_memory();
    store.update_consent(policy).unwrap();
    Twin::new(
        store,
        ReplyGenerator::with_rng(Box::new(ScriptedRng::new())),
        utc_gate(),
    )
}
