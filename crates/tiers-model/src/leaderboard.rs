use serde::{Deserialize, Serialize};

/// One row of the overall leaderboard as the ranking service returns it.
///
/// Upstream objects carry more fields; only these two participate in rank
/// estimation, and both default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: i64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, points: i64) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Estimated 1-based rank of `score` against a snapshot ordered by
/// descending points.
///
/// Only entries strictly above `score` count as ahead, so ties place the
/// user above equal-scoring incumbents. An optimistic lower bound.
pub fn estimate_rank(score: i64, entries: &[LeaderboardEntry]) -> usize {
    entries.iter().filter(|e| e.points > score).count() + 1
}

/// Points of the lowest-ranked entry in the snapshot.
pub fn cutoff(entries: &[LeaderboardEntry]) -> Option<i64> {
    entries.last().map(|e| e.points)
}
