use tracing::warn;

/// Characters stripped from the end of a word before comparison.
pub const TRAILING_PUNCTUATION: [char; 8] = ['.', ',', '!', '?', ';', ':', '\'', '"'];

/// Characters of the passage quoted in not-found warnings.
pub const EXCERPT_CHARS: usize = 50;

/// Lowercases, trims, and strips a trailing run of [`TRAILING_PUNCTUATION`].
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .trim_end_matches(TRAILING_PUNCTUATION)
        .to_string()
}

/// First [`EXCERPT_CHARS`] characters of `passage`.
pub fn excerpt(passage: &str) -> &str {
    match passage.char_indices().nth(EXCERPT_CHARS) {
        Some((byte, _)) => &passage[..byte],
        None => passage,
    }
}

/// Zero-based index of the first whitespace-separated word in `passage`
/// matching `target` after normalization.
///
/// Missing inputs yield `None` silently; a present pair with no match also
/// yields `None` and logs a warning naming the target.
pub fn find_target_position(passage: Option<&str>, target: Option<&str>) -> Option<usize> {
    let (passage, target) = (passage?, target?);
    let wanted = normalize_word(target);
    let found = passage
        .split_whitespace()
        .position(|word| normalize_word(word) == wanted);
    if found.is_none() {
        warn!(
            "could not find target word '{target}' in passage: {}...",
            excerpt(passage)
        );
    }
    found
}
