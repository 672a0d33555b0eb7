//! Per-request track resolution.
//!
//! A deliberately best-effort, non-retrying pipeline: at most two search
//! calls per request (primary query, then the truncated-title fallback).
//! A failed call is folded into the request's outcome, never surfaced, so
//! iteration over a whole list always completes.

use rayon::prelude::*;

use crate::catalog::CatalogSearch;
use crate::matching::{build_queries, select_match};
use crate::models::{MatchOutcome, ResolvedMatch, TrackRequest, UnresolvedReason};
use crate::normalize::{normalize_artist, normalize_title};
use crate::scoring::MatchPolicy;

/// Drives query planning, catalog search, and candidate selection for one
/// request at a time. Holds no state beyond the policy and the injected
/// search capability, so requests are independent of each other.
pub struct Resolver<'a> {
    search: &'a dyn CatalogSearch,
    policy: MatchPolicy,
}

impl<'a> Resolver<'a> {
    pub fn new(search: &'a dyn CatalogSearch, policy: MatchPolicy) -> Self {
        Self { search, policy }
    }

    /// Resolve one request to a catalog id, or report why not.
    ///
    /// Both attempts compare candidates against the request's normalized
    /// title and artist; the queries themselves go out raw. A failed search
    /// call is never retried, but it does not stop the fallback query from
    /// being tried; the failure only shows in the reason once every attempt
    /// is exhausted without a match.
    pub fn resolve(&self, request: &TrackRequest) -> MatchOutcome {
        let title_norm = normalize_title(&request.title);
        let artist_norm = normalize_artist(&request.artist);

        let mut search_failed = false;
        for (attempt, query) in build_queries(request).iter().enumerate() {
            match self.search.search(query) {
                Ok(candidates) => {
                    if let Some((id, tier)) =
                        select_match(self.policy, &title_norm, &artist_norm, &candidates)
                    {
                        return MatchOutcome::Resolved(ResolvedMatch {
                            id: id.to_string(),
                            tier,
                            via_fallback: attempt > 0,
                        });
                    }
                }
                Err(_) => search_failed = true,
            }
        }

        if search_failed {
            MatchOutcome::Unresolved(UnresolvedReason::SearchError)
        } else {
            MatchOutcome::Unresolved(UnresolvedReason::NoCandidate)
        }
    }

    /// Resolve a whole list sequentially, one outcome per request, in
    /// source order.
    pub fn resolve_all(&self, requests: &[TrackRequest]) -> Vec<MatchOutcome> {
        requests.iter().map(|r| self.resolve(r)).collect()
    }

    /// Resolve a whole list across rayon's pool. `collect` places each
    /// result at its input index, so output order matches source order
    /// regardless of completion order, with no shared output lock.
    pub fn resolve_all_parallel(&self, requests: &[TrackRequest]) -> Vec<MatchOutcome> {
        requests.par_iter().map(|r| self.resolve(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureCatalog;
    use crate::models::{CatalogCandidate, MatchTier};

    fn candidate(id: &str, name: &str, artist: &str) -> CatalogCandidate {
        CatalogCandidate {
            id: id.to_string(),
            name: name.to_string(),
            artists: vec![artist.to_string()],
        }
    }

    fn request(artist: &str, title: &str) -> TrackRequest {
        TrackRequest {
            artist: artist.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_resolves_remastered_request_on_primary_query() {
        let catalog = FixtureCatalog::new().with_result(
            "The Beatles Let It Be - Remastered 2009",
            vec![candidate("beatles-1", "Let It Be", "The Beatles")],
        );
        let resolver = Resolver::new(&catalog, MatchPolicy::default());

        let outcome = resolver.resolve(&request("The Beatles", "Let It Be - Remastered 2009"));
        assert_eq!(
            outcome,
            MatchOutcome::resolved("beatles-1", MatchTier::Strict, false)
        );
    }

    #[test]
    fn test_fallback_query_rescues_retitled_track() {
        // Primary query finds nothing; the half-title query does.
        let full = "Queen Bohemian Rhapsody";
        let half = "Queen Bohemian"; // floor(17 / 2) = 8 chars of the title
        let catalog = FixtureCatalog::new()
            .with_result(full, vec![])
            .with_result(half, vec![candidate("q-1", "Bohemian Rhapsody", "Queen")]);
        let resolver = Resolver::new(&catalog, MatchPolicy::default());

        let outcome = resolver.resolve(&request("Queen", "Bohemian Rhapsody"));
        assert_eq!(outcome, MatchOutcome::resolved("q-1", MatchTier::Strict, true));
    }

    #[test]
    fn test_primary_search_error_then_fallback_match_resolves() {
        // A failed primary call is not fatal to the request: the fallback
        // query still runs, and a strict match there resolves it.
        let catalog = FixtureCatalog::new()
            .with_failing_query("Queen Bohemian Rhapsody")
            .with_result(
                "Queen Bohemian",
                vec![candidate("q-1", "Bohemian Rhapsody", "Queen")],
            );
        let resolver = Resolver::new(&catalog, MatchPolicy::default());

        let outcome = resolver.resolve(&request("Queen", "Bohemian Rhapsody"));
        assert_eq!(outcome, MatchOutcome::resolved("q-1", MatchTier::Strict, true));
    }

    #[test]
    fn test_all_searches_failing_reports_search_error() {
        let catalog = FixtureCatalog::new()
            .with_failing_query("Queen Bohemian Rhapsody")
            .with_failing_query("Queen Bohemian");
        let resolver = Resolver::new(&catalog, MatchPolicy::default());

        let outcome = resolver.resolve(&request("Queen", "Bohemian Rhapsody"));
        assert_eq!(
            outcome,
            MatchOutcome::Unresolved(UnresolvedReason::SearchError)
        );
    }

    #[test]
    fn test_no_candidate_when_both_attempts_miss() {
        let catalog = FixtureCatalog::new()
            .with_result("Queen Bohemian Rhapsody", vec![candidate("x", "Radio Ga Ga", "Queen")])
            .with_result("Queen Bohemian", vec![]);
        let resolver = Resolver::new(&catalog, MatchPolicy::default());

        let outcome = resolver.resolve(&request("Queen", "Bohemian Rhapsody"));
        assert_eq!(
            outcome,
            MatchOutcome::Unresolved(UnresolvedReason::NoCandidate)
        );
    }

    #[test]
    fn test_instrumental_only_result_stays_unresolved() {
        // The catalog only has an instrumental cover: the loose tier must
        // refuse it even though the name prefix and artist both line up.
        let inst = candidate("inst", "Bohemian Rhapsody (Instrumental Version)", "Queen");
        let catalog = FixtureCatalog::new()
            .with_result("Queen Bohemian Rhapsody", vec![inst.clone()])
            .with_result("Queen Bohemian", vec![inst]);
        let resolver = Resolver::new(&catalog, MatchPolicy::default());

        let outcome = resolver.resolve(&request("Queen", "Bohemian Rhapsody"));
        assert_eq!(
            outcome,
            MatchOutcome::Unresolved(UnresolvedReason::NoCandidate)
        );
    }

    #[test]
    fn test_resolve_all_preserves_order() {
        let catalog = FixtureCatalog::new()
            .with_result("A One", vec![candidate("a", "One", "A")])
            .with_result("B Two", vec![candidate("b", "Two", "B")]);
        let resolver = Resolver::new(&catalog, MatchPolicy::default());

        let requests = vec![request("A", "One"), request("B", "Two"), request("C", "??")];
        let outcomes = resolver.resolve_all(&requests);
        assert_eq!(outcomes[0].resolved_id(), Some("a"));
        assert_eq!(outcomes[1].resolved_id(), Some("b"));
        assert!(!outcomes[2].is_resolved());
    }

    #[test]
    fn test_resolve_all_parallel_matches_sequential() {
        let catalog = FixtureCatalog::new()
            .with_result("A One", vec![candidate("a", "One", "A")])
            .with_result("B Two", vec![candidate("b", "Two", "B")])
            .with_failing_query("C Three");
        let resolver = Resolver::new(&catalog, MatchPolicy::default());

        let requests = vec![
            request("A", "One"),
            request("B", "Two"),
            request("C", "Three"),
        ];
        assert_eq!(
            resolver.resolve_all(&requests),
            resolver.resolve_all_parallel(&requests)
        );
    }
}
