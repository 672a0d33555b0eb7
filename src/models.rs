//! Core data model for toplist resolution.
//!
//! This module contains the request/candidate/outcome types used throughout
//! the resolution pipeline, plus run statistics for instrumentation.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Requests and Candidates
// ============================================================================

/// One entry from the source top list, exactly as supplied.
/// Raw strings; normalization happens at match time only.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TrackRequest {
    pub artist: String,
    pub title: String,
}

/// A single search result from the catalog.
///
/// Candidates arrive in the catalog's own relevance order and are never
/// re-sorted: that order is the tie-break when several candidates pass the
/// match test.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CatalogCandidate {
    pub id: String,
    pub name: String,
    /// All credited artists, in the catalog's credited order.
    pub artists: Vec<String>,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Why a request ended without a resolved id. Not a fault; a normal outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedReason {
    /// A catalog search call failed (network/auth/rate-limit, not retried).
    SearchError,
    /// Every search attempt came back without a candidate passing either tier.
    NoCandidate,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::SearchError => write!(f, "search-error"),
            UnresolvedReason::NoCandidate => write!(f, "no-candidate"),
        }
    }
}

/// Which selection tier accepted a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchTier {
    /// Edit-cost test on the normalized candidate name.
    Strict,
    /// Prefix test on the lowercased name (instrumentals excluded).
    Loose,
}

/// A resolved id plus how it was found, for stats and operator logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMatch {
    pub id: String,
    pub tier: MatchTier,
    /// True when the half-title fallback query produced the match.
    pub via_fallback: bool,
}

/// Terminal outcome of resolving one request. Exactly one per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Resolved(ResolvedMatch),
    Unresolved(UnresolvedReason),
}

impl MatchOutcome {
    pub fn resolved(id: &str, tier: MatchTier, via_fallback: bool) -> Self {
        MatchOutcome::Resolved(ResolvedMatch {
            id: id.to_string(),
            tier,
            via_fallback,
        })
    }

    pub fn resolved_id(&self) -> Option<&str> {
        match self {
            MatchOutcome::Resolved(m) => Some(&m.id),
            MatchOutcome::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, MatchOutcome::Resolved(_))
    }
}

// ============================================================================
// Playlist
// ============================================================================

/// The populated playlist returned by the assembler.
///
/// `track_ids` preserves source-list order and may contain duplicates: a
/// duplicate source entry yields a duplicate playlist entry. Unresolved
/// requests contribute nothing (no placeholder entries).
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedPlaylist {
    pub id: String,
    pub name: String,
    pub track_ids: Vec<String>,
}

// ============================================================================
// Statistics (Instrumentation)
// ============================================================================

/// Per-run resolution statistics.
#[derive(Default, Debug, Clone, Serialize)]
pub struct ResolutionStats {
    pub total_requests: usize,
    pub resolved: usize,
    pub strict_matches: usize,
    pub loose_matches: usize,
    /// Resolved requests whose match came from the half-title fallback query.
    pub fallback_rescues: usize,
    pub search_errors: usize,
    pub no_candidates: usize,

    // Timing
    pub elapsed_seconds: f64,
}

impl ResolutionStats {
    pub fn record_outcome(&mut self, outcome: &MatchOutcome) {
        match outcome {
            MatchOutcome::Resolved(m) => {
                self.resolved += 1;
                match m.tier {
                    MatchTier::Strict => self.strict_matches += 1,
                    MatchTier::Loose => self.loose_matches += 1,
                }
                if m.via_fallback {
                    self.fallback_rescues += 1;
                }
            }
            MatchOutcome::Unresolved(UnresolvedReason::SearchError) => self.search_errors += 1,
            MatchOutcome::Unresolved(UnresolvedReason::NoCandidate) => self.no_candidates += 1,
        }
    }

    /// Calculate resolve rate as a percentage
    pub fn resolve_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            100.0 * self.resolved as f64 / self.total_requests as f64
        }
    }

    /// Log stats to stderr in JSON format
    pub fn log_phase(&self, phase: &str) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[STATS:{}]\n{}", phase, json);
        }
    }

    /// Write stats to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
