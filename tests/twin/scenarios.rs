use chrono::{Duration, TimeZone, Utc};

use twin::twin::generator::pools;
use twin::twin::safety::{REDACTED_TOKEN, count_emoji};
use twin::twin::{
    AgentMode, CollectingSink, ConsentPolicy, DeliveryMode, FeedbackStore, GateDecision,
    GateEvaluator, QuietHours, ReplyGenerator, SafetyRules, StyleProfile, Tone, apply_safety,
    evaluate_gate,
};
use twin::twin::{ActivityLog, ScriptedRng};

use crate::twin_harness::{auto_policy, event, scripted_twin, t0};

#[test]
fn cooldown_then_daily_cap() {
    let mut twin = scripted_twin(ConsentPolicy {
        daily_max_auto: 1,
        cooldown_seconds: 120,
        ..auto_policy()
    });
    let sink = CollectingSink::new();

    let first = twin.handle(&event("conv-x", "X", t0()), &sink);
    assert_eq!(first.decision(), GateDecision::Auto);

    let second = twin.handle(&event("conv-x", "X", t0() + Duration::seconds(30)), &sink);
    assert_eq!(second.decision(), GateDecision::Suggest);

    let third = twin.handle(&event("conv-y", "Y", t0() + Duration::minutes(10)), &sink);
    assert_eq!(third.decision(), GateDecision::Suggest);

    let modes: Vec<DeliveryMode> = sink.deliveries().iter().map(|d| d.mode).collect();
    assert_eq!(
        modes,
        vec![
            DeliveryMode::SendNow,
            DeliveryMode::HoldForApproval,
            DeliveryMode::HoldForApproval
        ]
    );
    assert_eq!(twin.store().activity().len(), 3);
}

#[test]
fn gratitude_and_schedule_with_one_trailing_emoji() {
    let style = StyleProfile {
        tone: Tone::Friendly,
        emojis_enabled: true,
        ..StyleProfile::default()
    };

    let mut scripted = ReplyGenerator::with_rng(Box::new(
        ScriptedRng::new().with_picks([1, 3, 0, 2]),
    ));
    let reply = scripted.generate(
        "thanks so much, see you tomorrow?",
        &style,
        &FeedbackStore::default(),
    );
    assert_eq!(
        reply,
        "Got it, thank you! All good for then, looking forward to it. \
         Could you share a bit more detail? 😊"
    );

    for seed in 0..64 {
        let mut generator = ReplyGenerator::seeded(seed);
        let reply = generator.generate(
            "thanks so much, see you tomorrow?",
            &style,
            &FeedbackStore::default(),
        );
        assert!(
            pools::ACKNOWLEDGEMENT.iter().any(|c| reply.contains(c)),
            "{reply}"
        );
        assert!(pools::CONFIRMATION.iter().any(|c| reply.contains(c)), "{reply}");
        assert_eq!(count_emoji(&reply), 1, "{reply}");
        assert!(
            pools::EMOJIS.iter().any(|e| reply.ends_with(e)),
            "{reply}"
        );
    }
}

#[test]
fn blocklisted_word_is_redacted() {
    let rules = SafetyRules {
        blocklist: vec!["password".into()],
        ..SafetyRules::default()
    };
    let outcome = apply_safety("send me your password please", &rules);
    assert!(outcome.text.contains(REDACTED_TOKEN));
    assert!(!outcome.text.to_lowercase().contains("password"));
}

#[test]
fn quiet_hours_downgrade_auto() {
    let policy = ConsentPolicy {
        mode: AgentMode::Auto,
        quiet_hours: QuietHours {
            start_hour: 22,
            end_hour: 7,
        },
        ..ConsentPolicy::default()
    };
    // 21:00 UTC is 23:00 at UTC+2.
    let gate = GateEvaluator::from_offset_minutes(120).unwrap();
    let at = Utc.with_ymd_and_hms(2026, 4, 14, 21, 0, 0).unwrap();
    assert_eq!(gate.local_hour(at), 23);

    let decision = evaluate_gate(&event("c", "x", at), &policy, &ActivityLog::default(), &gate);
    assert_eq!(decision, GateDecision::Suggest);

    let morning = Utc.with_ymd_and_hms(2026, 4, 14, 6, 0, 0).unwrap();
    let decision = evaluate_gate(
        &event("c", "x", morning),
        &policy,
        &ActivityLog::default(),
        &gate,
    );
    assert_eq!(decision, GateDecision::Auto);
}

#[test]
fn escalated_reply_is_never_sent_automatically() {
    let mut policy = auto_policy();
    policy.safety.escalation_keywords = vec!["appreciate".into()];
    let mut twin = scripted_twin(policy);
    let sink = CollectingSink::new();

    let outcome = twin.handle(
        &crate::twin_harness::message("c", "x", "thanks!", t0()),
        &sink,
    );
    assert_eq!(outcome.decision(), GateDecision::Suggest);
    let delivery = sink.last().unwrap();
    assert_eq!(delivery.mode, DeliveryMode::HoldForApproval);
    assert!(outcome.entry().unwrap().escalated);
}
