use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

/// Public skin service serving player head renders.
pub const DEFAULT_SKIN_URL: &str = "https://minotar.net";

/// Pixel size requested for head renders.
pub const DEFAULT_HEAD_SIZE: u32 = 96;

const SKIN_TIMEOUT: Duration = Duration::from_secs(20);

/// Disk-backed cache of player head images, keyed by player name.
pub struct SkinCache {
    dir: PathBuf,
    http: reqwest::Client,
    site_url: String,
}

impl SkinCache {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_site_url(dir, DEFAULT_SKIN_URL)
    }

    pub fn with_site_url(dir: impl Into<PathBuf>, site_url: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating skin cache directory {}", dir.display()))?;
        let http = reqwest::Client::builder().timeout(SKIN_TIMEOUT).build()?;
        Ok(Self {
            dir,
            http,
            site_url: site_url.into(),
        })
    }

    pub fn head_url(&self, name: &str, size: u32) -> String {
        format!(
            "{}/helm/{}/{size}.png",
            self.site_url,
            urlencoding::encode(name)
        )
    }

    /// Where a player's head image lives on disk once cached.
    pub fn head_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("skin_{name}.png"))
    }

    /// A player's head image bytes, fetched through the disk cache.
    ///
    /// An empty cached file counts as a miss and is refetched.
    pub async fn get_player_head(&self, name: &str, size: u32) -> Result<Vec<u8>> {
        let path = self.head_path(name);
        if let Ok(bytes) = tokio::fs::read(&path).await
            && !bytes.is_empty()
        {
            debug!("skin cache hit for {name}");
            return Ok(bytes);
        }

        let response = self
            .http
            .get(self.head_url(name, size))
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?.to_vec();
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("writing skin cache file {}", path.display()))?;
        Ok(bytes)
    }
}
