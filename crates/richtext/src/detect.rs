use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the opening of any HTML-like tag, e.g. `<p`, `</div`, `<img`.
/// No closing delimiter is required: truncated markup such as a bare `<p`
/// at the end of a string still counts as HTML.
static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9-]*").expect("valid regex"));

/// Matches tags that carry visual content on their own, independent of any
/// text they may contain.
static MEDIA_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(img|video|iframe|svg|figure|picture|audio|source)(\s|>|/)")
        .expect("valid regex")
});

/// Whether the string looks like HTML rather than literal text.
///
/// Content entries do not record whether an editor pasted plain copy or
/// produced markup, so renderers use this to pick between escaping and raw
/// injection.
pub fn contains_html(s: &str) -> bool {
    HTML_TAG.is_match(s)
}

/// Whether rich content embeds media (images, video, iframes, ...).
///
/// Media-only content has no visible text but must still be rendered.
pub fn contains_media_tags(s: &str) -> bool {
    MEDIA_TAG.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_html() {
        assert!(!contains_html("Bienvenue à l'école"));
        assert!(!contains_html("a < b and b > c"));
    }

    #[test]
    fn markup_is_detected() {
        assert!(contains_html("<p>hello</p>"));
        assert!(contains_html("before <br/> after"));
        assert!(contains_html("</div>"));
    }

    #[test]
    fn truncated_markup_is_still_html() {
        assert!(contains_html("some text ending in <p"));
        assert!(contains_html("<p"));
        assert!(contains_html("</em"));
    }

    #[test]
    fn media_tags_detected_case_insensitively() {
        assert!(contains_media_tags("<IMG src=x>"));
        assert!(contains_media_tags("<figure><img src=x></figure>"));
        assert!(contains_media_tags("<video controls></video>"));
        assert!(!contains_media_tags("<p>just text</p>"));
    }

    #[test]
    fn image_word_in_text_is_not_a_tag() {
        assert!(!contains_media_tags("our image gallery"));
    }
}
