//! Rule-based reply generator.
//!
//! Every output is traceable: each line comes from a clause pool selected by
//! an explicit keyword rule, and every later step (topic prefix, tone, lean-in,
//! emoji, repeat-avoidance) is a visible string edit.

mod features;
pub mod pools;
mod rng;
mod tone;

pub use features::{FEATURE_RULES, Feature, FeatureRule, classify};
pub use rng::{ReplyRng, ScriptedRng, SeededRng, ThreadReplyRng};
pub use tone::{FORMAL_THRESHOLD, apply_tone};

use crate::twin::safety::contains_emoji;
use crate::twin::store::{FeedbackStore, RingBuffer};
use crate::twin::style::StyleProfile;

pub const RECENT_OUTPUT_CAPACITY: usize = 5;
pub const TOPIC_PREFIX_PROBABILITY: f64 = 0.3;
pub const LEAN_IN_PROBABILITY: f64 = 0.3;

pub struct ReplyGenerator {
    rng: Box<dyn ReplyRng>,
    recent: RingBuffer<String>,
}

impl std::fmt::Debug for ReplyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyGenerator")
            .field("recent", &self.recent)
            .finish_non_exhaustive()
    }
}

impl Default for ReplyGenerator {
    fn default() -> Self {
        Self::with_rng(Box::new(ThreadReplyRng))
    }
}

impl ReplyGenerator {
    pub fn with_rng(rng: Box<dyn ReplyRng>) -> Self {
        Self {
            rng,
            recent: RingBuffer::with_capacity(RECENT_OUTPUT_CAPACITY),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Box::new(SeededRng::new(seed)))
    }

    /// Newest first, at most [`RECENT_OUTPUT_CAPACITY`].
    pub fn recent_outputs(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    /// Produce one candidate reply. Never fails: unclassifiable input gets a
    /// generic agreement clause.
    pub fn generate(
        &mut self,
        input: &str,
        style: &StyleProfile,
        feedback: &FeedbackStore,
    ) -> String {
        let rules = features::matching_rules(input);
        let mut lines: Vec<&str> = rules.iter().map(|rule| self.draw(rule.pool)).collect();
        if lines.is_empty() {
            lines.push(self.draw(pools::AGREEMENT));
        }
        let mut text = lines.join(" ");

        let topics: Vec<&str> = style.usable_topics().collect();
        if !topics.is_empty() && self.rng.chance(TOPIC_PREFIX_PROBABILITY) {
            let topic = topics[self.rng.pick(topics.len())];
            text = format!("{topic}: {text}");
        }

        text = apply_tone(&text, style, self.rng.as_mut());

        if feedback.has_positive() && self.rng.chance(LEAN_IN_PROBABILITY) {
            let lean_in = self.draw(pools::LEAN_IN);
            text = format!("{text} {lean_in}");
        }

        if style.emojis_enabled && !contains_emoji(&text) {
            let emoji = self.draw(pools::EMOJIS);
            text = format!("{text} {emoji}");
        }

        if self
            .recent
            .newest()
            .is_some_and(|last| last.to_lowercase() == text.to_lowercase())
        {
            text = self.vary(&text, style);
        }

        tracing::debug!(
            features = ?rules.iter().map(|r| r.feature).collect::<Vec<_>>(),
            chars = text.chars().count(),
            "twin.generate"
        );

        self.recent.push(text.clone());
        text
    }

    fn draw(&mut self, pool: pools::ClausePool) -> &'static str {
        pool[self.rng.pick(pool.len())]
    }

    fn vary(&mut self, text: &str, style: &StyleProfile) -> String {
        if style.emojis_enabled {
            let emoji = self.draw(pools::EMOJIS);
            format!("{text} {emoji}")
        } else {
            let tail = self.draw(pools::PUNCTUATION_VARIATIONS);
            format!("{text}{tail}")
        }
    }
}
