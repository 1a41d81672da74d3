use std::fmt;

use tracing::debug;

use tiers_model::{LeaderboardEntry, TierSelection, cutoff, estimate_rank};

use crate::error::AppError;

/// A point-in-time copy of the top-N leaderboard, ordered by descending
/// points upstream. Replaced wholesale on each successful refresh.
#[derive(Debug, Clone)]
pub struct Snapshot {
    entries: Vec<LeaderboardEntry>,
    generation: u64,
}

impl Snapshot {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The #1 entry.
    pub fn top(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    /// Points of the lowest-ranked entry.
    pub fn cutoff(&self) -> Option<i64> {
        cutoff(&self.entries)
    }

    /// Token of the refresh that produced this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of a completed rank calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankReport {
    pub score: u32,
    pub rank: usize,
    pub total: usize,
    pub cutoff: i64,
}

impl fmt::Display for RankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {} pts", self.score)?;
        writeln!(f, "Rank vs loaded Top {}: #{}", self.total, self.rank)?;
        write!(f, "Cutoff: {} pts", self.cutoff)
    }
}

/// All mutable application state, owned by the primary task.
///
/// Background workers never see this struct. They report through the service
/// event channels, and the primary task applies each outcome here, so every
/// mutation happens on one task.
#[derive(Debug, Default)]
pub struct AppState {
    leaderboard: Option<Snapshot>,
    selection: TierSelection,
    latest_refresh: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &TierSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut TierSelection {
        &mut self.selection
    }

    /// The last successfully loaded snapshot, if any refresh ever finished.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.leaderboard.as_ref()
    }

    /// Record `generation` as the newest in-flight refresh.
    ///
    /// Completions carrying an older token are dropped by
    /// [`AppState::apply_refresh`], which closes the window where a slow
    /// stale fetch could overwrite a newer snapshot.
    pub fn begin_refresh(&mut self, generation: u64) {
        self.latest_refresh = self.latest_refresh.max(generation);
    }

    /// Apply the outcome of a finished refresh worker.
    ///
    /// Returns `None` when the worker was superseded. A failed or empty
    /// refresh leaves the previous snapshot, if any, untouched.
    pub fn apply_refresh(
        &mut self,
        generation: u64,
        outcome: Result<Vec<LeaderboardEntry>, AppError>,
    ) -> Option<Result<&Snapshot, AppError>> {
        if generation != self.latest_refresh {
            debug!(
                generation,
                latest = self.latest_refresh,
                "discarding stale refresh result"
            );
            return None;
        }
        match outcome {
            Ok(entries) if entries.is_empty() => Some(Err(AppError::EmptyLeaderboard)),
            Ok(entries) => {
                let snapshot = Snapshot {
                    entries,
                    generation,
                };
                Some(Ok(self.leaderboard.insert(snapshot)))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Live preview score over the current, possibly partial, selection.
    pub fn live_score(&self) -> u32 {
        self.selection.score()
    }

    /// Estimate the user's rank against the loaded snapshot.
    ///
    /// Refuses when no snapshot has ever loaded, or when any of the 8
    /// gamemodes is unset. Unlike the live score, nothing defaults here.
    pub fn calculate_rank(&self) -> Result<RankReport, AppError> {
        let Some(snapshot) = &self.leaderboard else {
            return Err(AppError::Precondition(
                "refresh the leaderboard before calculating a rank".into(),
            ));
        };
        let missing = self.selection.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|m| m.as_str()).collect();
            return Err(AppError::Precondition(format!(
                "pick a tier for every mode (missing: {})",
                names.join(", ")
            )));
        }

        let score = self.selection.score();
        Ok(RankReport {
            score,
            rank: estimate_rank(i64::from(score), snapshot.entries()),
            total: snapshot.len(),
            cutoff: snapshot.cutoff().unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiers_model::{Gamemode, Tier};

    fn entries(points: &[i64]) -> Vec<LeaderboardEntry> {
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| LeaderboardEntry::new(format!("p{i}"), p))
            .collect()
    }

    fn loaded_state(points: &[i64]) -> AppState {
        let mut state = AppState::new();
        state.begin_refresh(1);
        state.apply_refresh(1, Ok(entries(points))).unwrap().unwrap();
        state
    }

    fn complete_selection(state: &mut AppState) {
        state.selection_mut().set(Gamemode::Vanilla, Tier::Ht1);
        state.selection_mut().set(Gamemode::Uhc, Tier::Lt1);
        state.selection_mut().set(Gamemode::Pot, Tier::Ht5);
        for mode in [
            Gamemode::NetHop,
            Gamemode::Smp,
            Gamemode::Sword,
            Gamemode::Axe,
            Gamemode::Mace,
        ] {
            state.selection_mut().set(mode, Tier::Lt5);
        }
    }

    #[test]
    fn rank_requires_a_loaded_snapshot() {
        let mut state = AppState::new();
        complete_selection(&mut state);
        let err = state.calculate_rank().unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
        assert!(err.to_string().contains("refresh"));
    }

    #[test]
    fn rank_requires_a_complete_selection() {
        let mut state = loaded_state(&[500, 300]);
        complete_selection(&mut state);
        state.selection_mut().clear(Gamemode::Smp);
        state.selection_mut().clear(Gamemode::Axe);

        let err = state.calculate_rank().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, AppError::Precondition(_)));
        assert!(message.contains("smp") && message.contains("axe"));
        // The refusal left the snapshot alone.
        assert_eq!(state.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn rank_report_from_complete_inputs() {
        // HT1 + LT1 + HT5 + five LT5 = 60 + 45 + 2 + 5 = 112
        let mut state = loaded_state(&[500, 112, 90, 40]);
        complete_selection(&mut state);

        let report = state.calculate_rank().unwrap();
        assert_eq!(report.score, 112);
        // The 112-point incumbent ties and is not counted ahead.
        assert_eq!(report.rank, 2);
        assert_eq!(report.total, 4);
        assert_eq!(report.cutoff, 40);
    }

    #[test]
    fn live_score_tolerates_partial_selection() {
        let mut state = AppState::new();
        assert_eq!(state.live_score(), 0);
        state.selection_mut().set(Gamemode::Vanilla, Tier::Ht1);
        assert_eq!(state.live_score(), 60);
    }

    #[test]
    fn empty_refresh_is_an_error_and_keeps_prior_snapshot() {
        let mut state = loaded_state(&[500, 300]);
        state.begin_refresh(2);
        let outcome = state.apply_refresh(2, Ok(Vec::new())).unwrap();
        assert!(matches!(outcome, Err(AppError::EmptyLeaderboard)));
        assert_eq!(state.snapshot().unwrap().len(), 2);
        assert_eq!(state.snapshot().unwrap().generation(), 1);
    }

    #[test]
    fn failed_refresh_keeps_prior_snapshot() {
        let mut state = loaded_state(&[500, 300]);
        state.begin_refresh(2);
        let outcome = state
            .apply_refresh(2, Err(AppError::EmptyLeaderboard))
            .unwrap();
        assert!(outcome.is_err());
        assert_eq!(state.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn stale_refresh_result_is_discarded() {
        let mut state = AppState::new();
        state.begin_refresh(1);
        state.begin_refresh(2);

        // The newer fetch lands first.
        let applied = state.apply_refresh(2, Ok(entries(&[900, 800])));
        assert!(matches!(applied, Some(Ok(_))));

        // The slow generation-1 worker finishes afterwards; its result must
        // not overwrite the newer snapshot.
        assert!(state.apply_refresh(1, Ok(entries(&[1]))).is_none());
        assert_eq!(state.snapshot().unwrap().len(), 2);
        assert_eq!(state.snapshot().unwrap().generation(), 2);

        // A stale failure is equally ignored.
        assert!(
            state
                .apply_refresh(1, Err(AppError::EmptyLeaderboard))
                .is_none()
        );
        assert_eq!(state.snapshot().unwrap().generation(), 2);
    }

    #[test]
    fn successful_refresh_replaces_snapshot_wholesale() {
        let mut state = loaded_state(&[500, 300, 100]);
        state.begin_refresh(2);
        state
            .apply_refresh(2, Ok(entries(&[900, 800])))
            .unwrap()
            .unwrap();

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.top().unwrap().points, 900);
        assert_eq!(snapshot.cutoff(), Some(800));
        assert_eq!(snapshot.generation(), 2);
    }

    #[test]
    fn rank_report_display_shape() {
        let report = RankReport {
            score: 107,
            rank: 3,
            total: 10_000,
            cutoff: 20,
        };
        assert_eq!(
            report.to_string(),
            "Score: 107 pts\nRank vs loaded Top 10000: #3\nCutoff: 20 pts"
        );
    }
}
