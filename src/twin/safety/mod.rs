//! Safety post-processor: the last transformation a generated reply passes
//! through before it reaches a human or the wire.
//!
//! Passes run in a fixed order: blocklist masking, then length enforcement,
//! then the emoji cap. Masked tokens therefore count toward the length budget
//! and the cap applies to the visible string. Escalation is detected on the
//! final text and never changes it.

mod emoji;
mod mask;

pub use emoji::{cap_emoji, contains_emoji, count_emoji};
pub use mask::{REDACTED_TOKEN, contains_blocked, mask_blocklist};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TwinError};
use crate::utils::text::truncate_with_ellipsis;

/// Extra passes allowed for the filter to settle. Dropping emoji can butt two
/// fragments of a blocklisted phrase together; a second pass masks it.
const MAX_SETTLE_PASSES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SafetyRules {
    /// Phrases masked case-insensitively with `[redacted]`.
    pub blocklist: Vec<String>,
    /// Character budget for the final text. Must be positive.
    pub max_length: usize,
    pub max_emoji_count: usize,
    /// Any case-insensitive hit forces human review.
    pub escalation_keywords: Vec<String>,
}

impl Default for SafetyRules {
    fn default() -> Self {
        Self {
            blocklist: vec!["password".into(), "social security number".into()],
            max_length: 280,
            max_emoji_count: 2,
            escalation_keywords: vec![
                "urgent".into(),
                "emergency".into(),
                "lawyer".into(),
                "legal action".into(),
                "harass".into(),
                "threat".into(),
                "self-harm".into(),
            ],
        }
    }
}

impl SafetyRules {
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(TwinError::Validation(
                "safety.max_length must be >= 1".into(),
            ));
        }
        Ok(())
    }

    pub fn is_escalation(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.escalation_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .any(|k| !k.is_empty() && lowered.contains(&k))
    }
}

/// Final, policy-compliant text plus the escalation signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyOutcome {
    pub text: String,
    /// A human must approve before send, whatever the gate decided.
    pub escalated: bool,
    /// Whether any pass changed the input.
    pub modified: bool,
}

fn filter_pass(text: &str, rules: &SafetyRules) -> String {
    let masked = mask_blocklist(text, &rules.blocklist);
    let bounded = truncate_with_ellipsis(&masked, rules.max_length.max(1));
    cap_emoji(&bounded, rules.max_emoji_count)
}

/// Mask, bound and emoji-cap `text`, then flag escalation.
///
/// Idempotent: feeding the output back in returns it unchanged.
pub fn apply_safety(text: &str, rules: &SafetyRules) -> SafetyOutcome {
    let mut current = filter_pass(text, rules);
    for _ in 0..MAX_SETTLE_PASSES {
        let next = filter_pass(&current, rules);
        if next == current {
            break;
        }
        current = next;
    }

    let escalated = rules.is_escalation(&current);
    if escalated {
        tracing::info!(chars = current.chars().count(), "twin.safety.escalated");
    }

    SafetyOutcome {
        modified: current != text,
        text: current,
        escalated,
    }
}
