pub const ELLIPSIS: char = '…';

/// Cap `s` at `max_chars` scalar values.
///
/// Over-long input keeps its first `max_chars - 1` characters, loses any
/// trailing whitespace and gains a single `…`, so the result never exceeds
/// `max_chars`.
#[must_use]
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    match s.char_indices().nth(max_chars) {
        Some(_) => {
            let keep = s
                .char_indices()
                .nth(max_chars - 1)
                .map_or(s.len(), |(idx, _)| idx);
            let mut truncated = s[..keep].trim_end().to_string();
            truncated.push(ELLIPSIS);
            truncated
        }
        None => s.to_string(),
    }
}

/// First `max_chars` characters of `s`, for log previews.
#[must_use]
pub fn preview(s: &str, max_chars: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    truncate_with_ellipsis(trimmed, max_chars)
}
