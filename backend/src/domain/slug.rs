//! Listing slugs: readable, URL-safe, and unique per creation instant.
//!
//! Slugs are lowercase ASCII letters, digits and single hyphens, with a
//! millisecond timestamp suffix so two listings with the same name do not
//! collide.

use chrono::{DateTime, Utc};

const FALLBACK: &str = "listing";

/// Reduce `text` to lowercase ASCII alphanumerics separated by single hyphens.
///
/// Returns `"listing"` when nothing usable remains.
///
/// # Examples
/// ```
/// use marketplace::domain::slugify;
///
/// assert_eq!(slugify("  Bright Future Academy!! "), "bright-future-academy");
/// assert_eq!(slugify("???"), "listing");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        FALLBACK.to_owned()
    } else {
        slug
    }
}

/// Slug for a new listing named `name`, created at `now`.
#[must_use]
pub fn generate_slug(name: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", slugify(name), now.timestamp_millis())
}

/// Return `true` when `value` is a well-formed slug.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("Ravi Kumar", "ravi-kumar")]
    #[case("--Ravi   Kumar--", "ravi-kumar")]
    #[case("St. Mary's School (CBSE)", "st-mary-s-school-cbse")]
    #[case("Kota Classes 2024", "kota-classes-2024")]
    #[case("शिक्षक", "listing")]
    #[case("", "listing")]
    fn slugify_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[rstest]
    fn generate_slug_appends_millis() {
        let now = Utc
            .timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("valid instant");
        let slug = generate_slug("Physics Tutor", now);
        assert_eq!(slug, "physics-tutor-1700000000123");
        assert!(is_valid_slug(&slug));
    }

    #[rstest]
    #[case("abc-123", true)]
    #[case("-abc", false)]
    #[case("abc-", false)]
    #[case("a--b", false)]
    #[case("Abc", false)]
    #[case("", false)]
    fn is_valid_slug_cases(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(input), expected);
    }
}
