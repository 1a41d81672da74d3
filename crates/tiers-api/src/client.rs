use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use tiers_model::{LeaderboardEntry, PlayerProfile};

use crate::error::ApiError;

/// Default public endpoint of the ranking service.
pub const DEFAULT_BASE_URL: &str = "https://mctiers.com/api/v2";

/// Entries requested per leaderboard page.
pub const PAGE_SIZE: usize = 50;

/// Default number of top entries a full refresh aims for.
pub const DEFAULT_TOP_N: usize = 10_000;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) MCTiersRankTool/Official";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the ranking service.
pub struct TiersClient {
    http: reqwest::Client,
    base_url: String,
}

impl TiersClient {
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a non-default endpoint. Used by tests and the CLI's
    /// `--api-base` override.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch up to `n` of the top-ranked entries, one page at a time.
    ///
    /// `progress` receives the running entry total after every page. Pages
    /// are fetched sequentially since each offset depends on how many
    /// entries the previous pages actually returned.
    ///
    /// An empty page, or a body that is not a well-formed entry list, ends
    /// the fetch gracefully with whatever was accumulated; a short page is
    /// appended and then ends it. A transport failure on any page fails the
    /// whole fetch with no partial result.
    pub async fn fetch_top(
        &self,
        n: usize,
        mut progress: impl FnMut(usize),
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let url = format!("{}/mode/overall", self.base_url);
        let mut out: Vec<LeaderboardEntry> = Vec::new();

        while out.len() < n {
            let text = self
                .http
                .get(&url)
                .query(&[("count", PAGE_SIZE), ("from", out.len())])
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            let body: Value = serde_json::from_str(&text)?;

            let Some(items) = body.as_array().filter(|page| !page.is_empty()) else {
                break;
            };
            let page: Vec<LeaderboardEntry> =
                match serde_json::from_value(Value::Array(items.clone())) {
                    Ok(page) => page,
                    Err(e) => {
                        debug!(offset = out.len(), "page is not an entry list: {e}");
                        break;
                    }
                };

            let short = page.len() < PAGE_SIZE;
            out.extend(page);
            progress(out.len());
            if short {
                break;
            }
        }

        out.truncate(n);
        Ok(out)
    }

    /// Fetch a single player's public profile.
    ///
    /// One request, no retry; any failure is the caller's to surface.
    pub async fn fetch_profile(&self, name: &str) -> Result<PlayerProfile, ApiError> {
        let url = format!(
            "{}/profile/by-name/{}",
            self.base_url,
            urlencoding::encode(name)
        );
        let text = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let profile = serde_json::from_str(&text)?;
        Ok(profile)
    }
}
