use thiserror::Error;

use tiers_api::ApiError;

/// Application-level failure taxonomy.
///
/// Every variant propagates to the presentation glue, which alone decides
/// how to show it. None of these corrupt previously loaded state.
#[derive(Debug, Error)]
pub enum AppError {
    /// Network failure, timeout, or non-success status from the service.
    /// Fatal to the triggering operation; not retried.
    #[error(transparent)]
    Transport(#[from] ApiError),
    /// A refresh that ultimately yielded zero entries.
    #[error("no leaderboard data returned")]
    EmptyLeaderboard,
    /// Rank calculation attempted before its inputs are in place.
    #[error("{0}")]
    Precondition(String),
    /// Player lookup failed, or was asked for an empty username.
    #[error("lookup failed: {0}")]
    Lookup(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            AppError::EmptyLeaderboard.to_string(),
            "no leaderboard data returned"
        );
        assert_eq!(
            AppError::Precondition("pick a tier for every mode".into()).to_string(),
            "pick a tier for every mode"
        );
        assert_eq!(
            AppError::Lookup("enter a username".into()).to_string(),
            "lookup failed: enter a username"
        );
    }
}
