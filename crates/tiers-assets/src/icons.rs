use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::warn;

use tiers_model::IconMode;

/// Public site serving the per-mode tier icons.
pub const DEFAULT_SITE_URL: &str = "https://mctiers.com";

const DOWNLOAD_ATTEMPTS: usize = 6;
const RETRY_PAUSE: Duration = Duration::from_millis(350);
const ICON_TIMEOUT: Duration = Duration::from_secs(25);
const SNIFF_LEN: usize = 1400;

/// Disk store for the tier icon set.
///
/// Downloads are best-effort: [`IconStore::ensure_available`] records a
/// warning per icon it could not fetch instead of failing, so missing icons
/// never block the caller.
pub struct IconStore {
    dir: PathBuf,
    http: reqwest::Client,
    site_url: String,
}

impl IconStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_site_url(dir, DEFAULT_SITE_URL)
    }

    pub fn with_site_url(dir: impl Into<PathBuf>, site_url: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating icon directory {}", dir.display()))?;
        let http = reqwest::Client::builder().timeout(ICON_TIMEOUT).build()?;
        Ok(Self {
            dir,
            http,
            site_url: site_url.into(),
        })
    }

    pub fn icon_url(&self, mode: IconMode) -> String {
        format!("{}/tier_icons/{}.svg", self.site_url, mode)
    }

    pub fn icon_path(&self, mode: IconMode) -> PathBuf {
        self.dir.join(format!("{mode}.svg"))
    }

    /// Make sure every icon is cached on disk.
    ///
    /// Returns one warning line per icon that could not be fetched. Already
    /// cached, non-empty files are left alone.
    pub async fn ensure_available(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for mode in IconMode::ALL {
            let path = self.icon_path(mode);
            if matches!(tokio::fs::metadata(&path).await, Ok(meta) if meta.len() > 0) {
                continue;
            }
            match self.download_icon(mode).await {
                Ok(bytes) => {
                    if let Err(e) = tokio::fs::write(&path, &bytes).await {
                        warnings.push(format!("{mode}: {e}"));
                    }
                }
                Err(e) => {
                    warn!("icon fetch failed for {mode}: {e}");
                    warnings.push(format!("{mode}: {e}"));
                }
            }
        }
        warnings
    }

    /// Read a cached icon's bytes.
    pub async fn load_icon(&self, mode: IconMode) -> Result<Vec<u8>> {
        let path = self.icon_path(mode);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("icon not cached: {}", path.display()))
    }

    async fn download_icon(&self, mode: IconMode) -> Result<Vec<u8>> {
        let url = self.icon_url(mode);
        let mut last_err = None;
        for attempt in 0..DOWNLOAD_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(RETRY_PAUSE).await;
            }
            match self.try_download(&url).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("icon download failed: {url}")))
    }

    async fn try_download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .header("Accept", "image/svg+xml,image/*,*/*;q=0.8")
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        if !looks_like_svg(&bytes) {
            bail!("non-svg content");
        }
        Ok(bytes.to_vec())
    }
}

/// Sniff whether a body is actually an SVG document. The site serves error
/// pages as HTML with a 200 status.
fn looks_like_svg(data: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&data[..data.len().min(SNIFF_LEN)]).to_lowercase();
    !head.contains("<html") && head.contains("<svg")
}
