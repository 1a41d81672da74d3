use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::debug;

use tiers_api::TiersClient;
use tiers_model::{LeaderboardEntry, PlayerProfile};

use crate::error::AppError;

/// Messages a refresh worker sends back to the primary task.
#[derive(Debug)]
pub enum RefreshEvent {
    /// Running entry total after each fetched page.
    Progress { generation: u64, count: usize },
    /// Terminal outcome of the fetch.
    Finished {
        generation: u64,
        result: Result<Vec<LeaderboardEntry>, AppError>,
    },
}

/// Spawns background leaderboard refreshes.
///
/// Every refresh carries a monotonically increasing generation token.
/// Overlapping refreshes are allowed; nothing cancels an in-flight fetch,
/// but [`crate::AppState::apply_refresh`] drops completions from superseded
/// generations, so a slow old fetch can never clobber a newer snapshot.
pub struct RefreshService {
    client: Arc<TiersClient>,
    next_generation: AtomicU64,
}

impl RefreshService {
    pub fn new(client: Arc<TiersClient>) -> Self {
        Self {
            client,
            next_generation: AtomicU64::new(1),
        }
    }

    /// Start fetching the top `top_n` entries on a background task.
    ///
    /// Returns the generation token; hand it to
    /// [`crate::AppState::begin_refresh`] before draining events.
    pub fn spawn(&self, top_n: usize, events: mpsc::UnboundedSender<RefreshEvent>) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let progress = events.clone();
            let result = client
                .fetch_top(top_n, |count| {
                    let _ = progress.send(RefreshEvent::Progress { generation, count });
                })
                .await
                .map_err(AppError::from);
            if events
                .send(RefreshEvent::Finished { generation, result })
                .is_err()
            {
                debug!(generation, "refresh receiver dropped before completion");
            }
        });
        generation
    }
}

/// Outcome of a player lookup worker.
#[derive(Debug)]
pub struct LookupEvent {
    pub name: String,
    pub result: Result<PlayerProfile, AppError>,
}

/// Spawns background player lookups.
///
/// Lookups are independent of the leaderboard: a failed or successful lookup
/// has no access to refresh state and can never disturb it.
pub struct LookupService {
    client: Arc<TiersClient>,
}

impl LookupService {
    pub fn new(client: Arc<TiersClient>) -> Self {
        Self { client }
    }

    /// Start a background profile fetch.
    ///
    /// An empty or whitespace username is rejected here, before any work is
    /// dispatched.
    pub fn spawn(
        &self,
        name: &str,
        events: mpsc::UnboundedSender<LookupEvent>,
    ) -> Result<(), AppError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Lookup("enter a username".into()));
        }
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let result = client
                .fetch_profile(&name)
                .await
                .map_err(|e| AppError::Lookup(e.to_string()));
            if events.send(LookupEvent { name, result }).is_err() {
                debug!("lookup receiver dropped before completion");
            }
        });
        Ok(())
    }
}
