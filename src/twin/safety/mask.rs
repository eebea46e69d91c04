use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

pub const REDACTED_TOKEN: &str = "[redacted]";

fn phrase_pattern(phrase: &str) -> Option<Regex> {
    if phrase.trim().is_empty() {
        return None;
    }
    match RegexBuilder::new(&regex::escape(phrase))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(error) => {
            tracing::warn!(%error, "twin.safety.blocklist_pattern_skipped");
            None
        }
    }
}

/// Replace `re` everywhere except inside existing redaction tokens, so a
/// phrase that happens to appear in `[redacted]` is never masked twice.
fn replace_outside_tokens(text: &str, re: &Regex) -> Option<String> {
    let mut changed = false;
    let pieces: Vec<Cow<'_, str>> = text
        .split(REDACTED_TOKEN)
        .map(|segment| {
            let replaced = re.replace_all(segment, REDACTED_TOKEN);
            if matches!(replaced, Cow::Owned(_)) {
                changed = true;
            }
            replaced
        })
        .collect();

    changed.then(|| pieces.join(REDACTED_TOKEN))
}

/// Case-insensitively mask every blocklisted phrase with [`REDACTED_TOKEN`].
pub fn mask_blocklist<'a>(text: &'a str, blocklist: &[String]) -> Cow<'a, str> {
    let mut masked = Cow::Borrowed(text);
    for re in blocklist.iter().filter_map(|phrase| phrase_pattern(phrase)) {
        if let Some(next) = replace_outside_tokens(&masked, &re) {
            masked = Cow::Owned(next);
        }
    }
    masked
}

/// True when any blocklisted phrase still occurs outside redaction tokens.
pub fn contains_blocked(text: &str, blocklist: &[String]) -> bool {
    blocklist
        .iter()
        .filter_map(|phrase| phrase_pattern(phrase))
        .any(|re| text.split(REDACTED_TOKEN).any(|segment| re.is_match(segment)))
}
