use crate::strip::strip_tags;

/// Plaintext excerpt of rich content, truncated to at most `max_chars`
/// visible characters (plus an ellipsis when cut). Truncation happens on a
/// character boundary, never inside a multi-byte sequence.
pub fn plain_text_excerpt(s: &str, max_chars: usize) -> String {
    let text = strip_tags(s);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    // Back off to the last word boundary when one exists reasonably close.
    let trimmed = match cut.rfind(' ') {
        Some(pos) if pos > max_chars / 2 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_untouched() {
        assert_eq!(plain_text_excerpt("<p>short</p>", 50), "short");
    }

    #[test]
    fn long_content_is_cut_on_a_word_boundary() {
        let text = "<p>The quick brown fox jumps over the lazy dog</p>";
        let excerpt = plain_text_excerpt(text, 20);
        assert_eq!(excerpt, "The quick brown fox…");
    }

    #[test]
    fn multibyte_text_does_not_panic() {
        let text = "école élémentaire à côté de l'église";
        let excerpt = plain_text_excerpt(text, 10);
        assert!(excerpt.ends_with('…'));
        assert!(excerpt.chars().count() <= 11);
    }
}
