use crate::detect::contains_media_tags;
use crate::strip::strip_tags;

/// Decide whether rich content is worth rendering.
///
/// Returns `""` when the markup has no visible text and no embedded media,
/// so callers can hide the block instead of injecting empty paragraphs.
/// Otherwise the original markup is returned unchanged; storage is trusted
/// because only authenticated editors write it.
pub fn sanitize_rich_text(s: &str) -> &str {
    if contains_media_tags(s) {
        return s;
    }
    if strip_tags(s).is_empty() {
        return "";
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_paragraph_is_dropped() {
        assert_eq!(sanitize_rich_text("<p></p>"), "");
        assert_eq!(sanitize_rich_text("<p> </p><p>&nbsp;</p>"), "");
        assert_eq!(sanitize_rich_text(""), "");
    }

    #[test]
    fn media_only_content_is_kept_verbatim() {
        let html = "<p><img src=x></p>";
        assert_eq!(sanitize_rich_text(html), html);
    }

    #[test]
    fn text_content_is_kept_verbatim() {
        let html = "<p>Portes ouvertes le samedi</p>";
        assert_eq!(sanitize_rich_text(html), html);
    }
}
