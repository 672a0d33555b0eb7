//! Query planning and candidate selection.
//!
//! Queries go to the catalog raw (its search is already fuzzy/tokenized);
//! selection compares normalized strings under the edit-cost policy, in two
//! tiers. The first candidate in catalog order that passes wins - there is
//! deliberately no global best-match search, so the catalog's relevance
//! order stays the tie-break.

use crate::models::{CatalogCandidate, MatchTier, TrackRequest};
use crate::normalize::normalize_title;
use crate::scoring::{edit_cost, MatchPolicy};

// ============================================================================
// Query Planner
// ============================================================================

/// Build the search queries for a request, primary first. At most two.
///
/// The fallback truncates the title to its first `floor(len/2)` chars:
/// catalogs sometimes retitle a track (subtitles, "live", parenthetical
/// edits) such that only the leading portion still matches. Titles shorter
/// than 2 chars get no fallback.
pub fn build_queries(request: &TrackRequest) -> Vec<String> {
    let mut queries = vec![format!("{} {}", request.artist, request.title)];

    let half = request.title.chars().count() / 2;
    if half > 0 {
        let prefix: String = request.title.chars().take(half).collect();
        queries.push(format!("{} {}", request.artist, prefix));
    }

    queries
}

// ============================================================================
// Match Selector
// ============================================================================

/// True if any credited artist is within the cost threshold of the
/// normalized request artist. Candidate artists are lowercased only.
fn artist_matches(policy: MatchPolicy, artist_norm: &str, candidate: &CatalogCandidate) -> bool {
    candidate
        .artists
        .iter()
        .any(|a| policy.accepts(edit_cost(artist_norm, &a.to_lowercase())))
}

/// Two-tier selection over candidates in catalog relevance order.
///
/// Strict tier: edit cost on the fully normalized candidate name, plus the
/// artist test. Loose tier (only when strict finds nothing): prefix match on
/// the lowercased name, skipping instrumental versions, plus the same
/// artist test. Returns the first passing candidate's id and the tier that
/// accepted it, or None.
pub fn select_match<'a>(
    policy: MatchPolicy,
    title_norm: &str,
    artist_norm: &str,
    candidates: &'a [CatalogCandidate],
) -> Option<(&'a str, MatchTier)> {
    for candidate in candidates {
        let name_norm = normalize_title(&candidate.name);
        if policy.accepts(edit_cost(title_norm, &name_norm))
            && artist_matches(policy, artist_norm, candidate)
        {
            return Some((&candidate.id, MatchTier::Strict));
        }
    }

    for candidate in candidates {
        let name = candidate.name.to_lowercase();
        // Prefix match, but never an instrumental cover of a vocal original.
        if name.starts_with(title_norm)
            && !name.contains("instrumental")
            && artist_matches(policy, artist_norm, candidate)
        {
            return Some((&candidate.id, MatchTier::Loose));
        }
    }

    None
}
