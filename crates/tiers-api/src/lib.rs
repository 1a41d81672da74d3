// Ranking service client: paginated leaderboard fetch, profile lookup

pub mod client;
pub mod error;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TOP_N, PAGE_SIZE, TiersClient};
pub use error::ApiError;
