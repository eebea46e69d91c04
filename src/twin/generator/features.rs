use regex::Regex;
use std::sync::LazyLock;
use strum::Display;

use super::pools::{self, ClausePool};

/// Independent boolean classifications of inbound text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Feature {
    Gratitude,
    Schedule,
    Question,
    Positive,
    Negative,
}

/// One row of the rule table: a literal keyword pattern and the pool drawn
/// from when it matches.
#[derive(Debug)]
pub struct FeatureRule {
    pub feature: Feature,
    pub pattern: Regex,
    pub pool: ClausePool,
}

fn rule(feature: Feature, pattern: &str, pool: ClausePool) -> FeatureRule {
    FeatureRule {
        feature,
        pattern: Regex::new(pattern).expect("feature patterns are static and valid"),
        pool,
    }
}

/// Ordered: output lines follow this order when several features match.
pub static FEATURE_RULES: LazyLock<Vec<FeatureRule>> = LazyLock::new(|| {
    vec![
        rule(
            Feature::Gratitude,
            r"\b(thanks|thank you|thx|ty|appreciate[sd]?|grateful)\b",
            pools::ACKNOWLEDGEMENT,
        ),
        rule(
            Feature::Schedule,
            r"\b(today|tomorrow|tonight|monday|tuesday|wednesday|thursday|friday|saturday|sunday|weekend|next week|meeting|meet|call|schedule|calendar|o'clock)\b|\b\d{1,2}(:\d{2})?\s?(am|pm)\b|\b\d{1,2}:\d{2}\b",
            pools::CONFIRMATION,
        ),
        rule(
            Feature::Question,
            r"\?|^\s*(who|what|when|where|why|how|can|could|would|will|do|does|did|is|are)\b",
            pools::CLARIFYING,
        ),
        rule(
            Feature::Positive,
            r"\b(great|awesome|amazing|love|loved|excited|congrats|congratulations|happy|glad|excellent|nice|fantastic|wonderful)\b",
            pools::AGREEMENT,
        ),
        rule(
            Feature::Negative,
            r"\b(sorry|sad|upset|angry|frustrat\w*|disappoint\w*|bad|terrible|awful|worried|stress\w*|sick|unfortunately)\b",
            pools::EMPATHY,
        ),
    ]
});

/// Rules matching `text`, in table order. Matching runs on lower-cased text.
pub fn matching_rules(text: &str) -> Vec<&'static FeatureRule> {
    let lowered = text.to_lowercase();
    FEATURE_RULES
        .iter()
        .filter(|rule| rule.pattern.is_match(&lowered))
        .collect()
}

pub fn classify(text: &str) -> Vec<Feature> {
    matching_rules(text).into_iter().map(|r| r.feature).collect()
}
