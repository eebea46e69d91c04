use std::fs;

use tempfile::TempDir;
use twin::twin::{
    AgentMode, CollectingSink, ConsentPolicy, FeedbackScore, FileKvStore, ReplyGenerator, Tone,
    Twin, TwinStore,
};

use crate::twin_harness::{auto_policy, event, t0, utc_gate};

fn file_twin(dir: &TempDir) -> Twin {
    Twin::new(
        TwinStore::load(Box::new(FileKvStore::new(dir.path()))),
        ReplyGenerator::seeded(11),
        utc_gate(),
    )
}

#[test]
fn state_survives_reload() {
    let dir = TempDir::new().unwrap();
    let entry_id;
    let feedback_id;
    {
        let mut twin = file_twin(&dir);
        twin.update_consent(ConsentPolicy {
            daily_max_auto: 3,
            ..auto_policy()
        })
        .unwrap();
        let mut style = twin.style().clone();
        style.tone = Tone::Playful;
        twin.update_style(style).unwrap();

        let outcome = twin.handle(&event("c1", "x", t0()), &CollectingSink::new());
        entry_id = outcome.entry().unwrap().id.clone();
        twin.review(&entry_id, true);
        feedback_id = twin.record_feedback("more like this", FeedbackScore::Positive).id;
    }

    for file in [
        "twin.style_profile.v1.json",
        "twin.consent_policy.v1.json",
        "twin.activity_log.v1.json",
        "twin.training_feedback.v1.json",
        "twin.auto_sends.v1.json",
    ] {
        assert!(dir.path().join(file).exists(), "missing {file}");
    }

    let twin = file_twin(&dir);
    assert_eq!(twin.consent().mode, AgentMode::Auto);
    assert_eq!(twin.consent().daily_max_auto, 3);
    assert_eq!(twin.style().tone, Tone::Playful);

    let entry = twin.store().activity().get(&entry_id).unwrap();
    assert_eq!(entry.approved, Some(true));
    assert_eq!(entry.conversation_id, "c1");
    assert_eq!(
        twin.store().feedback().items().next().unwrap().id,
        feedback_id
    );
}

#[test]
fn reloaded_log_still_gates() {
    let dir = TempDir::new().unwrap();
    {
        let mut twin = file_twin(&dir);
        twin.update_consent(ConsentPolicy {
            daily_max_auto: 1,
            ..auto_policy()
        })
        .unwrap();
        twin.handle(&event("c1", "x", t0()), &CollectingSink::new());
    }

    let twin = file_twin(&dir);
    let verdict = twin.evaluate(&event("c2", "y", t0() + chrono::Duration::minutes(1)));
    assert_eq!(verdict.decision, twin::twin::GateDecision::Suggest);
}

#[test]
fn cleared_log_still_gates_after_reload() {
    let dir = TempDir::new().unwrap();
    {
        let mut twin = file_twin(&dir);
        twin.update_consent(ConsentPolicy {
            daily_max_auto: 1,
            ..auto_policy()
        })
        .unwrap();
        twin.handle(&event("c1", "x", t0()), &CollectingSink::new());
        twin.clear_activity();
    }

    let twin = file_twin(&dir);
    assert!(twin.store().activity().is_empty());
    let verdict = twin.evaluate(&event("c2", "y", t0() + chrono::Duration::minutes(1)));
    assert_eq!(verdict.decision, twin::twin::GateDecision::Suggest);
}

#[test]
fn corrupt_documents_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("twin.consent_policy.v1.json"), "{ not json").unwrap();
    fs::write(
        dir.path().join("twin.style_profile.v1.json"),
        r#"{"tone": "professional", "formality": 250}"#,
    )
    .unwrap();
    fs::write(dir.path().join("twin.activity_log.v1.json"), "[1, 2, 3]").unwrap();

    let twin = file_twin(&dir);
    assert_eq!(twin.consent(), &ConsentPolicy::default());
    assert_eq!(twin.style().tone, Tone::Friendly);
    assert!(twin.store().activity().is_empty());
}

#[test]
fn partial_documents_keep_known_fields() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("twin.consent_policy.v1.json"),
        r#"{"mode": "off", "denyList": ["ex"]}"#,
    )
    .unwrap();

    let twin = file_twin(&dir);
    assert_eq!(twin.consent().mode, AgentMode::Off);
    assert!(twin.consent().deny_list.contains("ex"));
    assert_eq!(twin.consent().daily_max_auto, 20);
}
