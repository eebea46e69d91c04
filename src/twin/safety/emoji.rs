use unicode_properties::UnicodeEmoji;
use unicode_segmentation::UnicodeSegmentation;

const KEYCAP: char = '\u{20E3}';

/// A grapheme cluster is one visible emoji when it carries a scalar with the
/// Unicode `Emoji` property, or ends a keycap sequence. ASCII digits, `#` and
/// `*` are `Emoji` too but only render as one inside a keycap.
pub(crate) fn is_emoji_cluster(cluster: &str) -> bool {
    cluster
        .chars()
        .any(|c| c == KEYCAP || (!c.is_ascii() && c.is_emoji_char()))
}

fn clusters(text: &str) -> impl Iterator<Item = &str> {
    text.graphemes(true)
}

pub fn count_emoji(text: &str) -> usize {
    clusters(text).filter(|g| is_emoji_cluster(g)).count()
}

pub fn contains_emoji(text: &str) -> bool {
    clusters(text).any(is_emoji_cluster)
}

/// Keep every non-emoji cluster and only the first `max_emoji` emoji.
pub fn cap_emoji(text: &str, max_emoji: usize) -> String {
    let mut seen = 0usize;
    clusters(text)
        .filter(|g| {
            if !is_emoji_cluster(g) {
                return true;
            }
            seen += 1;
            seen <= max_emoji
        })
        .collect()
}
