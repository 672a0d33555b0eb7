//! Catalog capability seams.
//!
//! The engine never talks to a live catalog directly: search and mutation
//! are injected as traits, so tests and dry runs can use the in-memory
//! fixture in `fixture` and a server can plug in an API-bound client that
//! carries its own authorization.

use crate::models::CatalogCandidate;
use thiserror::Error;

/// Search failure. Transient and permanent failures are deliberately not
/// distinguished: the resolver absorbs either into an unresolved outcome
/// without retrying.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authorization error: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),
}

/// Playlist creation or track-add failure. Fatal to the assemble call.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("authorization error: {0}")]
    Auth(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Catalog track search. Results come back in the catalog's own relevance
/// order, which the engine treats as meaningful and never re-sorts.
pub trait CatalogSearch: Sync {
    fn search(&self, query: &str) -> Result<Vec<CatalogCandidate>, SearchError>;
}

/// Catalog playlist mutation.
pub trait CatalogMutation {
    fn create_playlist(&self, owner: &str, name: &str) -> Result<String, MutationError>;

    /// Attach tracks in one bulk call. Callers needing chunking for a
    /// batch-size limit wrap this; the engine never chunks.
    fn add_tracks(&self, playlist_id: &str, ids: &[String]) -> Result<(), MutationError>;
}
