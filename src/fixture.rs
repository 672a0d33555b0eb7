//! In-memory fixture catalog.
//!
//! Implements both catalog capabilities from a query -> candidates map, so
//! the resolver and assembler can be exercised without a network or
//! credentials. Loadable from JSON for CLI dry runs; tests build it with
//! the `with_*` helpers. Failure toggles cover the error paths.

use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::path::Path;
use std::sync::Mutex;

use crate::catalog::{CatalogMutation, CatalogSearch, MutationError, SearchError};
use crate::models::CatalogCandidate;

/// Record of mutation calls, for assertions and dry-run reporting.
#[derive(Default, Debug, Clone)]
pub struct MutationLog {
    /// (owner, name) per create_playlist call.
    pub created: Vec<(String, String)>,
    /// (playlist_id, ids) per add_tracks call.
    pub added: Vec<(String, Vec<String>)>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct FixtureCatalog {
    /// Query string -> candidates in relevance order. Unknown queries
    /// return an empty result, like a catalog with no hits.
    results: FxHashMap<String, Vec<CatalogCandidate>>,

    /// Queries that fail with a network error instead of returning results.
    failing_queries: FxHashSet<String>,

    fail_create_playlist: bool,
    fail_add_tracks: bool,

    #[serde(skip)]
    log: Mutex<MutationLog>,
}

impl FixtureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture catalog {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixture catalog {}", path.display()))
    }

    pub fn with_result(mut self, query: &str, candidates: Vec<CatalogCandidate>) -> Self {
        self.results.insert(query.to_string(), candidates);
        self
    }

    pub fn with_failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub fn with_failing_create(mut self) -> Self {
        self.fail_create_playlist = true;
        self
    }

    pub fn with_failing_add(mut self) -> Self {
        self.fail_add_tracks = true;
        self
    }

    pub fn mutation_log(&self) -> MutationLog {
        self.log.lock().expect("fixture log poisoned").clone()
    }
}

impl CatalogSearch for FixtureCatalog {
    fn search(&self, query: &str) -> Result<Vec<CatalogCandidate>, SearchError> {
        if self.failing_queries.contains(query) {
            return Err(SearchError::Network(format!(
                "fixture failure for query {:?}",
                query
            )));
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }
}

impl CatalogMutation for FixtureCatalog {
    fn create_playlist(&self, owner: &str, name: &str) -> Result<String, MutationError> {
        if self.fail_create_playlist {
            return Err(MutationError::Auth("fixture create failure".to_string()));
        }
        let mut log = self.log.lock().expect("fixture log poisoned");
        log.created.push((owner.to_string(), name.to_string()));
        Ok(format!("pl-{}", log.created.len()))
    }

    fn add_tracks(&self, playlist_id: &str, ids: &[String]) -> Result<(), MutationError> {
        if self.fail_add_tracks {
            return Err(MutationError::Transport("fixture add failure".to_string()));
        }
        let mut log = self.log.lock().expect("fixture log poisoned");
        log.added.push((playlist_id.to_string(), ids.to_vec()));
        Ok(())
    }
}
