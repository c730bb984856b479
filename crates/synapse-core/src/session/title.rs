//! Session title derivation.
//!
//! A session's title is derived once at creation from the first user
//! turn's text and is immutable thereafter.

/// Maximum title length in characters.
const TITLE_MAX_CHARS: usize = 50;

/// Title used when the first turn yields no usable text.
const FALLBACK_TITLE: &str = "New Prompt";

/// Derive a session title from the first user turn.
///
/// Trims the text and truncates to 50 characters on a char boundary.
pub fn derive_title(first_turn_text: &str) -> String {
    let trimmed = first_turn_text.trim();
    if trimmed.is_empty() {
        return FALLBACK_TITLE.to_string();
    }
    trimmed.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_passes_through() {
        assert_eq!(derive_title("Write a tagline"), "Write a tagline");
    }

    #[test]
    fn test_long_text_truncated_to_fifty_chars() {
        let text = "a".repeat(80);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), 50);
    }

    #[test]
    fn test_truncation_is_char_boundary_safe() {
        let text = "日".repeat(60);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), 50);
    }

    #[test]
    fn test_whitespace_only_falls_back() {
        assert_eq!(derive_title("   "), "New Prompt");
        assert_eq!(derive_title(""), "New Prompt");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed_before_truncation() {
        assert_eq!(derive_title("  hello  "), "hello");
    }
}
