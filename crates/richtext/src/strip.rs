use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Reduce markup to a plaintext fallback.
///
/// Tags are removed, the handful of entities WYSIWYG editors emit are
/// decoded, and runs of whitespace collapse to a single space.
pub fn strip_tags(s: &str) -> String {
    let without_tags = TAG.replace_all(s, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_tags_and_collapses_whitespace() {
        assert_eq!(
            strip_tags("<p>Hello   <strong>world</strong></p>"),
            "Hello world"
        );
    }

    #[test]
    fn decodes_common_entities() {
        assert_eq!(strip_tags("fish &amp; chips"), "fish & chips");
        assert_eq!(strip_tags("a&nbsp;b"), "a b");
        assert_eq!(strip_tags("l&#39;école"), "l'école");
    }

    #[test]
    fn empty_markup_becomes_empty_string() {
        assert_eq!(strip_tags("<p></p>"), "");
        assert_eq!(strip_tags("<p>&nbsp;</p>"), "");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_tags("no markup here"), "no markup here");
    }
}
