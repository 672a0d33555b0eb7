//! Playlist assembly: resolve the full request list and populate a playlist.
//!
//! One unresolved request never blocks the batch; a playlist with fewer
//! tracks than the source list is the expected outcome when some entries
//! cannot be matched. Mutation failures are fatal: a playlist has to exist
//! before tracks can be attached to it.

use std::time::Instant;

use crate::catalog::{CatalogMutation, CatalogSearch, MutationError};
use crate::models::{MatchOutcome, ResolutionStats, ResolvedPlaylist, TrackRequest};
use crate::resolver::Resolver;
use crate::scoring::MatchPolicy;

/// Result of one assemble run: the populated playlist plus the per-request
/// outcomes (paired with the input by index, for operator logging) and run
/// statistics.
#[derive(Debug)]
pub struct AssembleOutput {
    pub playlist: ResolvedPlaylist,
    pub outcomes: Vec<MatchOutcome>,
    pub stats: ResolutionStats,
}

pub struct Assembler<'a> {
    resolver: Resolver<'a>,
    mutation: &'a dyn CatalogMutation,
    parallel: bool,
}

impl<'a> Assembler<'a> {
    pub fn new(
        search: &'a dyn CatalogSearch,
        mutation: &'a dyn CatalogMutation,
        policy: MatchPolicy,
    ) -> Self {
        Self {
            resolver: Resolver::new(search, policy),
            mutation,
            parallel: false,
        }
    }

    /// Fan resolution out across rayon's pool. Output order is unaffected.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolve every request in order, create the playlist for `owner`, and
    /// attach all resolved ids in a single bulk call.
    ///
    /// Unresolved requests are skipped, never placeholders. The playlist is
    /// created even for an empty request list.
    pub fn assemble(
        &self,
        name: &str,
        owner: &str,
        requests: &[TrackRequest],
    ) -> Result<AssembleOutput, MutationError> {
        let start = Instant::now();

        let outcomes = if self.parallel {
            self.resolver.resolve_all_parallel(requests)
        } else {
            self.resolver.resolve_all(requests)
        };

        let track_ids: Vec<String> = outcomes
            .iter()
            .filter_map(|o| o.resolved_id().map(str::to_string))
            .collect();

        let playlist_id = self.mutation.create_playlist(owner, name)?;
        self.mutation.add_tracks(&playlist_id, &track_ids)?;

        let mut stats = ResolutionStats {
            total_requests: requests.len(),
            ..Default::default()
        };
        for outcome in &outcomes {
            stats.record_outcome(outcome);
        }
        stats.elapsed_seconds = start.elapsed().as_secs_f64();

        Ok(AssembleOutput {
            playlist: ResolvedPlaylist {
                id: playlist_id,
                name: name.to_string(),
                track_ids,
            },
            outcomes,
            stats,
        })
    }
}
