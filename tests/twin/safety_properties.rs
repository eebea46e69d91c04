use twin::twin::safety::{REDACTED_TOKEN, count_emoji};
use twin::twin::{SafetyRules, apply_safety};

const SAMPLES: &[&str] = &[
    "",
    "Sounds great!",
    "send me your PASSWORD please, password123 is fine",
    "🎉🎉🎉 party at 8pm 🎉 with 👩‍👩‍👧 and 🇯🇵",
    "pass🙂word",
    "This is urgent, my lawyer will call you",
    "a very long message that keeps going and going well beyond any sane limit for a quick reply ✨✨",
    "   trailing spaces right before the cut point                      and then more",
    "Social Security Number: please don't",
    "🟢🟢🟢 status 🈯 1️⃣2️⃣3️⃣ ‼️ ©️ 🅿️",
    "Rated ★★★ done ✓ step ❶ then ➜ next 😀",
];

fn rule_sets() -> Vec<SafetyRules> {
    vec![
        SafetyRules::default(),
        SafetyRules {
            blocklist: vec!["password".into(), "".into(), "  ".into()],
            max_length: 24,
            max_emoji_count: 1,
            escalation_keywords: vec!["lawyer".into()],
        },
        SafetyRules {
            blocklist: vec!["party".into(), "very long".into()],
            max_length: 1,
            max_emoji_count: 0,
            escalation_keywords: Vec::new(),
        },
        SafetyRules {
            blocklist: Vec::new(),
            max_length: 12,
            max_emoji_count: 3,
            escalation_keywords: vec!["URGENT".into()],
        },
    ]
}

#[test]
fn safety_is_idempotent() {
    for rules in rule_sets() {
        for sample in SAMPLES {
            let once = apply_safety(sample, &rules);
            let twice = apply_safety(&once.text, &rules);
            assert_eq!(twice.text, once.text, "sample={sample:?} rules={rules:?}");
            assert_eq!(twice.escalated, once.escalated);
            assert!(!twice.modified, "sample={sample:?} rules={rules:?}");
        }
    }
}

#[test]
fn output_respects_length_and_emoji_bounds() {
    for rules in rule_sets() {
        for sample in SAMPLES {
            let out = apply_safety(sample, &rules).text;
            assert!(
                out.chars().count() <= rules.max_length,
                "{out:?} exceeds {}",
                rules.max_length
            );
            assert!(count_emoji(&out) <= rules.max_emoji_count, "{out:?}");
        }
    }
}

#[test]
fn blocklisted_phrases_are_gone_after_masking() {
    let rules = SafetyRules {
        blocklist: vec!["password".into()],
        max_length: 500,
        max_emoji_count: 0,
        escalation_keywords: Vec::new(),
    };
    let out = apply_safety("Password? PASSWORD! pass🙂word", &rules).text;
    assert!(!out.to_lowercase().contains("password"), "{out}");
    assert_eq!(out.matches(REDACTED_TOKEN).count(), 3, "{out}");
}

#[test]
fn escalation_tracks_keywords_only() {
    let rules = SafetyRules::default();
    assert!(apply_safety("This is an EMERGENCY", &rules).escalated);
    assert!(apply_safety("considering legal action", &rules).escalated);
    assert!(!apply_safety("see you at lunch", &rules).escalated);

    let outcome = apply_safety("Urgent: call me", &rules);
    assert_eq!(outcome.text, "Urgent: call me");
    assert!(!outcome.modified);
}

#[test]
fn emoji_cap_removes_only_emoji_clusters() {
    let rules = SafetyRules {
        blocklist: Vec::new(),
        max_length: 500,
        max_emoji_count: 0,
        escalation_keywords: Vec::new(),
    };
    assert_eq!(apply_safety("🟢🟢🟢", &rules).text, "");
    assert_eq!(apply_safety("ok 🈯🈯", &rules).text, "ok ");
    assert_eq!(apply_safety("1️⃣2️⃣3️⃣ go", &rules).text, " go");
    assert_eq!(apply_safety("‼️‼️ wow", &rules).text, " wow");

    let symbols = "Rated ★★★, done ✓, step ❶ then ➜ next";
    let outcome = apply_safety(symbols, &rules);
    assert_eq!(outcome.text, symbols);
    assert!(!outcome.modified);
}
