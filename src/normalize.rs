//! Normalization functions for catalog matching.
//!
//! The title rules are tuned against one catalog's naming conventions
//! ("Song Name - Remastered 2009" and the "Song Name -" stubs left after
//! suffix removal). Keep them in sync with the acceptance threshold in
//! `scoring`; the threshold was tuned against exactly this normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing remaster marker, with optional year ("remastered", "remastered 2009").
/// Anchored so it only ever strips a suffix, matched after lowercasing.
static REMASTER_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"remastered(?:\s+\d{4})?$").unwrap());

/// Dash left dangling once the remaster marker is gone ("song name -").
static DASH_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-$").unwrap());

/// Normalize a title for matching.
/// Lowercases, then strips the trailing remaster marker and the dash stub
/// it leaves behind, trimming whitespace after each strip.
pub fn normalize_title(title: &str) -> String {
    let mut result = title.to_lowercase();
    result = REMASTER_SUFFIX.replace(&result, "").trim().to_string();
    result = DASH_SUFFIX.replace(&result, "").trim().to_string();
    result
}

/// Normalize an artist name for matching. Lowercase only: artist spellings
/// are left to the edit-cost comparison, not rewritten here.
pub fn normalize_artist(artist: &str) -> String {
    artist.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_basic() {
        assert_eq!(normalize_title("Let It Be"), "let it be");
        assert_eq!(normalize_title("Song Name - Remastered"), "song name");
        assert_eq!(normalize_title("Let It Be - Remastered 2009"), "let it be");
    }

    #[test]
    fn test_normalize_title_dash_stub() {
        assert_eq!(normalize_title("Song Name -"), "song name");
        assert_eq!(normalize_title("song name - remastered"), "song name");
    }

    #[test]
    fn test_normalize_title_interior_untouched() {
        // Only trailing markers are stripped; interior text is preserved.
        assert_eq!(
            normalize_title("Remastered Love - The Single"),
            "remastered love - the single"
        );
        assert_eq!(normalize_title("A - B"), "a - b");
    }

    #[test]
    fn test_normalize_title_idempotent() {
        for s in [
            "Let It Be - Remastered 2009",
            "Song Name -",
            "  Plain Title  ",
            "",
            "remastered",
        ] {
            let once = normalize_title(s);
            assert_eq!(normalize_title(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_normalize_artist_lowercase_only() {
        assert_eq!(normalize_artist("The Beatles"), "the beatles");
        assert_eq!(normalize_artist("QUEEN"), "queen");
        // No suffix stripping for artists.
        assert_eq!(normalize_artist("Band - Remastered"), "band - remastered");
    }
}
