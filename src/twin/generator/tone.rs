use regex::Regex;
use std::sync::LazyLock;

use super::pools;
use super::rng::ReplyRng;
use crate::twin::style::{StyleProfile, Tone};

/// Formality above which casual affirmations are formalised.
pub const FORMAL_THRESHOLD: u8 = 70;

static GOT_IT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bgot it\b").expect("static pattern"));
static ALL_GOOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\ball good\b").expect("static pattern"));
static CASUAL_AFFIRMATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(yeah|cool)\b").expect("static pattern"));

/// Rewrite `text` for the profile's tone and formality.
pub fn apply_tone(text: &str, style: &StyleProfile, rng: &mut dyn ReplyRng) -> String {
    let mut out = match style.tone {
        Tone::Professional => {
            let step = GOT_IT.replace_all(text, "Understood");
            ALL_GOOD
                .replace_all(&step, "All good on my side")
                .into_owned()
        }
        Tone::Playful => {
            let suffix = pools::PLAYFUL_SUFFIXES[rng.pick(pools::PLAYFUL_SUFFIXES.len())];
            format!("{text}{suffix}")
        }
        Tone::Casual | Tone::Friendly => text.to_string(),
    };

    if style.formality > FORMAL_THRESHOLD {
        out = CASUAL_AFFIRMATION.replace_all(&out, "Yes").into_owned();
    }
    out
}
