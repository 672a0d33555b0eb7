//! Similarity scoring for catalog matching.
//!
//! The scorer is a weighted edit distance (Wagner-Fischer): insertion and
//! deletion cost 1, substitution costs 2. Cost 0 means identical; lower is
//! more similar.

// ============================================================================
// Cost Thresholds
// ============================================================================

/// Maximum edit cost that still counts as "close enough".
/// A tuned constant, not derived; see `MatchPolicy`.
pub const DEFAULT_MAX_COST: u32 = 5;

/// Acceptance policy for edit costs.
///
/// The default threshold of 5 was tuned against the normalization rules in
/// `normalize`; treat it as policy, not law.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchPolicy {
    pub max_cost: u32,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            max_cost: DEFAULT_MAX_COST,
        }
    }
}

impl MatchPolicy {
    pub fn accepts(&self, cost: u32) -> bool {
        cost <= self.max_cost
    }
}

// ============================================================================
// Weighted Edit Distance
// ============================================================================

/// Weighted edit distance between two strings, over chars.
/// Insertion = 1, deletion = 1, substitution = 2. Rolling single-row DP,
/// O(len(a) * len(b)) time, O(min-side) space.
pub fn edit_cost(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<u32> = (0..=b.len() as u32).collect();
    let mut curr = vec![0u32; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i as u32 + 1;
        for (j, &cb) in b.iter().enumerate() {
            let sub = if ca == cb { 0 } else { 2 };
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + sub);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
