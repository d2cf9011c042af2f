//! Revision markers for duplicated records
//!
//! A cloned record gets the source's description with its trailing
//! revision marker bumped:
//!
//! - `"abc"` becomes `"abc (2)"`
//! - `"abc (2)"` becomes `"abc (3)"`

/// Increment the revision number at the end of `title`
///
/// Only a trailing `(<digits>)` group counts as a revision marker. Anything
/// else, including an empty title, gets `" (2)"` appended unchanged.
pub fn increment_revision(title: &str) -> String {
    match bump_trailing_marker(title) {
        Some(next) => next,
        None => format!("{} (2)", title),
    }
}

/// Like [`increment_revision`], but shortens the text before the marker so
/// the result is at most `max_chars` characters long
///
/// The revision marker itself is never cut.
pub fn increment_revision_within(title: &str, max_chars: usize) -> String {
    let next = increment_revision(title);
    if next.chars().count() <= max_chars {
        return next;
    }

    // `next` always ends with its "(n)" marker
    let open = next.rfind('(').unwrap_or(0);
    let (text, marker) = next.split_at(open);
    let room = max_chars.saturating_sub(marker.chars().count() + 1);
    let shortened: String = text.trim_end().chars().take(room).collect();
    let shortened = shortened.trim_end();

    if shortened.is_empty() {
        marker.to_string()
    } else {
        format!("{} {}", shortened, marker)
    }
}

fn bump_trailing_marker(title: &str) -> Option<String> {
    let without_close = title.strip_suffix(')')?;
    let open = without_close.rfind('(')?;
    let digits = &without_close[open + 1..];

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Markers too large for u64 are not treated as revisions
    let next = digits.parse::<u64>().ok()?.checked_add(1)?;

    let prefix = without_close[..open].trim_end();
    if prefix.is_empty() {
        Some(format!("({})", next))
    } else {
        Some(format!("{} ({})", prefix, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_title_gets_second_revision() {
        assert_eq!(increment_revision("Song Title"), "Song Title (2)");
    }

    #[test]
    fn test_existing_marker_is_incremented() {
        assert_eq!(increment_revision("Song Title (2)"), "Song Title (3)");
        assert_eq!(increment_revision("Song Title (9)"), "Song Title (10)");
        assert_eq!(increment_revision("Song Title (41)"), "Song Title (42)");
    }

    #[test]
    fn test_non_numeric_parenthetical_is_not_a_marker() {
        assert_eq!(increment_revision("Weird (abc)"), "Weird (abc) (2)");
        assert_eq!(increment_revision("Live (2 takes)"), "Live (2 takes) (2)");
        assert_eq!(increment_revision("Signed (-3)"), "Signed (-3) (2)");
        assert_eq!(increment_revision("Spaced ( 3 )"), "Spaced ( 3 ) (2)");
        assert_eq!(increment_revision("Empty ()"), "Empty () (2)");
    }

    #[test]
    fn test_whitespace_before_marker_is_normalized() {
        assert_eq!(increment_revision("Title   (3)"), "Title (4)");
        assert_eq!(increment_revision("Title(3)"), "Title (4)");
    }

    #[test]
    fn test_only_trailing_group_counts() {
        assert_eq!(increment_revision("Take (1) (7)"), "Take (1) (8)");
        assert_eq!(increment_revision("Take (7) again"), "Take (7) again (2)");
        assert_eq!(increment_revision("Mix (radio) (4)"), "Mix (radio) (5)");
    }

    #[test]
    fn test_malformed_input_never_panics() {
        assert_eq!(increment_revision(""), " (2)");
        assert_eq!(increment_revision("("), "( (2)");
        assert_eq!(increment_revision(")"), ") (2)");
        assert_eq!(increment_revision("Broken (3"), "Broken (3 (2)");
        assert_eq!(increment_revision("Broken 3)"), "Broken 3) (2)");
        assert_eq!(increment_revision("Überfall (ä)"), "Überfall (ä) (2)");
    }

    #[test]
    fn test_leading_whitespace_is_kept() {
        assert_eq!(increment_revision("  abc (2)"), "  abc (3)");
        assert_eq!(increment_revision("  abc"), "  abc (2)");
    }

    #[test]
    fn test_bounded_revision_fits_when_short() {
        assert_eq!(increment_revision_within("Song Title (2)", 256), "Song Title (3)");
    }

    #[test]
    fn test_bounded_revision_shortens_text_not_marker() {
        let full = "a".repeat(256);
        let next = increment_revision_within(&full, 256);
        assert_eq!(next.chars().count(), 256);
        assert_eq!(next, format!("{} (2)", "a".repeat(252)));

        let marked = format!("{} (9)", "b".repeat(252));
        assert_eq!(
            increment_revision_within(&marked, 256),
            format!("{} (10)", "b".repeat(251))
        );
    }

    #[test]
    fn test_bounded_revision_counts_characters() {
        let title = "é".repeat(256);
        let next = increment_revision_within(&title, 256);
        assert_eq!(next.chars().count(), 256);
        assert!(next.ends_with("é (2)"));
    }

    #[test]
    fn test_bare_marker_keeps_no_leading_space() {
        assert_eq!(increment_revision("(3)"), "(4)");
    }

    #[test]
    fn test_overflowing_marker_is_appended_to() {
        let title = "Huge (99999999999999999999999)";
        assert_eq!(increment_revision(title), format!("{} (2)", title));

        let at_limit = format!("Limit ({})", u64::MAX);
        assert_eq!(increment_revision(&at_limit), format!("{} (2)", at_limit));
    }

    #[test]
    fn test_repeated_cloning_keeps_counting() {
        let mut title = "Intro".to_string();
        for _ in 0..3 {
            title = increment_revision(&title);
        }
        assert_eq!(title, "Intro (4)");
    }
}
