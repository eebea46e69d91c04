use chrono::{Duration, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};

use twin::twin::{
    ACTIVITY_LOG_CAPACITY, ActivityLog, AgentMode, CollectingSink, ConsentPolicy, GateDecision,
    evaluate_gate,
};

use crate::twin_harness::{auto_policy, event, scripted_twin, t0, utc_gate};

const MODES: [AgentMode; 3] = [AgentMode::Off, AgentMode::Suggest, AgentMode::Auto];

#[test]
fn denied_contact_is_never_auto() {
    for global in MODES {
        for override_mode in [None, Some(AgentMode::Auto), Some(AgentMode::Suggest)] {
            for allow_listed in [false, true] {
                let policy = ConsentPolicy {
                    mode: global,
                    deny_list: BTreeSet::from(["blocked".to_string()]),
                    allow_list: if allow_listed {
                        BTreeSet::from(["blocked".to_string()])
                    } else {
                        BTreeSet::new()
                    },
                    overrides: override_mode
                        .map(|m| BTreeMap::from([("conv".to_string(), m)]))
                        .unwrap_or_default(),
                    ..auto_policy()
                };
                let decision = evaluate_gate(
                    &event("conv", "blocked", t0()),
                    &policy,
                    &ActivityLog::default(),
                    &utc_gate(),
                );
                assert_eq!(
                    decision,
                    GateDecision::Suppressed,
                    "mode={global} override={override_mode:?} allow={allow_listed}"
                );
            }
        }
    }
}

#[test]
fn effective_off_is_always_suppressed() {
    for global in MODES {
        let policy = ConsentPolicy {
            mode: global,
            overrides: BTreeMap::from([("quiet".to_string(), AgentMode::Off)]),
            ..auto_policy()
        };
        let decision = evaluate_gate(
            &event("quiet", "friend", t0()),
            &policy,
            &ActivityLog::default(),
            &utc_gate(),
        );
        assert_eq!(decision, GateDecision::Suppressed, "global={global}");
    }

    let policy = ConsentPolicy {
        mode: AgentMode::Off,
        overrides: BTreeMap::from([("open".to_string(), AgentMode::Auto)]),
        ..auto_policy()
    };
    let decision = evaluate_gate(
        &event("open", "friend", t0()),
        &policy,
        &ActivityLog::default(),
        &utc_gate(),
    );
    assert_eq!(decision, GateDecision::Auto);
}

#[test]
fn auto_count_per_local_day_never_exceeds_cap() {
    let mut twin = scripted_twin(ConsentPolicy {
        daily_max_auto: 5,
        cooldown_seconds: 0,
        ..auto_policy()
    });
    let sink = CollectingSink::new();
    let morning = Utc.with_ymd_and_hms(2026, 4, 14, 0, 30, 0).unwrap();

    let mut autos = 0;
    for i in 0..30 {
        let at = morning + Duration::minutes(i * 40);
        let outcome = twin.handle(&event(&format!("c{i}"), &format!("p{i}"), at), &sink);
        if outcome.decision() == GateDecision::Auto {
            autos += 1;
        } else {
            assert_eq!(autos, 5, "downgraded before the cap at i={i}");
        }
    }
    assert_eq!(autos, 5);

    let next_day = Utc.with_ymd_and_hms(2026, 4, 15, 0, 5, 0).unwrap();
    let outcome = twin.handle(&event("fresh", "someone", next_day), &sink);
    assert_eq!(outcome.decision(), GateDecision::Auto);
}

#[test]
fn daily_cap_holds_after_log_eviction_and_clear() {
    let mut twin = scripted_twin(ConsentPolicy {
        daily_max_auto: 1,
        cooldown_seconds: 0,
        ..auto_policy()
    });
    let sink = CollectingSink::new();

    let mut autos = 0;
    for i in 0..102 {
        let at = t0() + Duration::seconds(i);
        let outcome = twin.handle(&event(&format!("c{i}"), &format!("p{i}"), at), &sink);
        if outcome.decision() == GateDecision::Auto {
            autos += 1;
        }
    }
    assert_eq!(twin.store().activity().len(), ACTIVITY_LOG_CAPACITY);
    assert!(twin.store().activity().entries().all(|e| !e.is_auto()));

    twin.clear_activity();
    let outcome = twin.handle(&event("after-clear", "p", t0() + Duration::hours(1)), &sink);
    if outcome.decision() == GateDecision::Auto {
        autos += 1;
    }
    assert_eq!(autos, 1);
}

#[test]
fn cooldown_holds_after_clear() {
    let mut twin = scripted_twin(ConsentPolicy {
        cooldown_seconds: 600,
        ..auto_policy()
    });
    let sink = CollectingSink::new();

    let first = twin.handle(&event("same", "pal", t0()), &sink);
    assert_eq!(first.decision(), GateDecision::Auto);
    twin.clear_activity();

    let again = twin.handle(&event("same", "pal", t0() + Duration::seconds(30)), &sink);
    assert_eq!(again.decision(), GateDecision::Suggest);
}

#[test]
fn autos_in_one_conversation_respect_cooldown() {
    let mut twin = scripted_twin(ConsentPolicy {
        daily_max_auto: 1_000,
        cooldown_seconds: 120,
        ..auto_policy()
    });
    let sink = CollectingSink::new();

    let mut auto_times = Vec::new();
    for i in 0..40 {
        let at = t0() + Duration::seconds(i * 25);
        let outcome = twin.handle(&event("same", "pal", at), &sink);
        if outcome.decision() == GateDecision::Auto {
            auto_times.push(at);
        }
    }

    assert!(auto_times.len() > 1);
    for pair in auto_times.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::seconds(120), "{pair:?}");
    }
}

#[test]
fn restrictions_downgrade_rather_than_suppress() {
    let policy = ConsentPolicy {
        allow_list: BTreeSet::from(["vip".to_string()]),
        ..auto_policy()
    };
    let decision = evaluate_gate(
        &event("c", "stranger", t0()),
        &policy,
        &ActivityLog::default(),
        &utc_gate(),
    );
    assert_eq!(decision, GateDecision::Suggest);
}
