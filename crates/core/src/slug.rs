//! Slug derivation and validation.
//!
//! Blog post URLs use a slug derived from the title: lowercase ASCII,
//! digits, and single hyphens. Titles are French, so the common accented
//! letters fold to their base character instead of being dropped.

/// Fold the accented characters that show up in French titles.
fn fold_char(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'â' | 'ä' | 'á' | 'ã' => 'a',
        'ç' => 'c',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' | 'í' => 'i',
        'ô' | 'ö' | 'ó' | 'õ' => 'o',
        'ù' | 'û' | 'ü' | 'ú' => 'u',
        'ÿ' => 'y',
        'ñ' => 'n',
        _ => return None,
    };
    Some(folded)
}

/// Derive a URL-safe slug from a title.
///
/// Non-alphanumeric runs collapse to a single hyphen; leading and trailing
/// hyphens are trimmed. Returns an empty string only when the title has no
/// alphanumeric content at all — callers treat that as a validation error.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.to_lowercase().chars() {
        let c = fold_char(c).unwrap_or(c);
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Whether a caller-provided slug is acceptable as-is.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.contains("--")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn slugify_folds_french_accents() {
        assert_eq!(slugify("Rentrée des élèves"), "rentree-des-eleves");
        assert_eq!(slugify("Leçon d'été"), "lecon-d-ete");
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("  One -- two!!  three  "), "one-two-three");
    }

    #[test]
    fn slugify_empty_when_no_alphanumerics() {
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn valid_slug_rules() {
        assert!(is_valid_slug("rentree-2026"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("UpperCase"));
        assert!(is_valid_slug(&slugify("Rentrée des élèves")));
    }
}
