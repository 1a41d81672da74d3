// Domain model: gamemodes, tiers, scoring, rank estimation

pub mod gamemode;
pub mod leaderboard;
pub mod profile;
pub mod selection;
pub mod tier;

pub use gamemode::{Gamemode, IconMode};
pub use leaderboard::{LeaderboardEntry, cutoff, estimate_rank};
pub use profile::{PlayerProfile, TierPlacement};
pub use selection::{TierSelection, compute_score};
pub use tier::Tier;
