//! URL-safe identifiers derived from bar names.

use once_cell::sync::Lazy;
use regex::Regex;

static VALID_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern compiles"));

/// Lowercases `name`, drops punctuation and joins words with single hyphens.
///
/// ```
/// use barfindr::slug::generate_slug;
///
/// assert_eq!(generate_slug("The Roosevelt Room"), "the-roosevelt-room");
/// assert_eq!(generate_slug("Whisler's"), "whislers");
/// ```
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
        // anything else is dropped without breaking the word
    }

    slug
}

pub fn is_valid_slug(slug: &str) -> bool {
    VALID_SLUG.is_match(slug)
}

/// Returns `slug` when unused, otherwise the first free `slug-N` starting at 2.
pub fn ensure_unique_slug<S: AsRef<str>>(slug: &str, existing: &[S]) -> String {
    let taken = |candidate: &str| existing.iter().any(|s| s.as_ref() == candidate);

    if !taken(slug) {
        return slug.to_string();
    }

    (2..)
        .map(|n| format!("{slug}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_collapses_separators() {
        assert_eq!(generate_slug("Rainey Street  Bars"), "rainey-street-bars");
        assert_eq!(generate_slug("Bar -- & -- Grill"), "bar-grill");
        assert_eq!(generate_slug("  Midnight Cowboy  "), "midnight-cowboy");
        assert_eq!(generate_slug("dirty_6th"), "dirty-6th");
        assert_eq!(generate_slug("Ego's"), "egos");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(generate_slug("Café No Sé"), "caf-no-s");
    }

    #[test]
    fn generated_slugs_validate() {
        for name in ["The White Horse", "Firehouse Lounge", "  --Odd__Name--  ", "B.Y.O.B."] {
            let slug = generate_slug(name);
            assert!(is_valid_slug(&slug), "{name:?} produced {slug:?}");
        }
    }

    #[test]
    fn rejects_malformed_slugs() {
        assert!(is_valid_slug("white-horse"));
        assert!(!is_valid_slug("-white-horse"));
        assert!(!is_valid_slug("white--horse"));
        assert!(!is_valid_slug("White-Horse"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn unique_slug_appends_first_free_counter() {
        let existing = vec!["bar-name", "bar-name-2"];
        assert_eq!(ensure_unique_slug("bar-name", &existing), "bar-name-3");
        assert_eq!(ensure_unique_slug("other", &existing), "other");
    }
}
