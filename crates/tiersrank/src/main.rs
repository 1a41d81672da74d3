// tiersrank — estimate a player's MCTiers standing from the command line.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;

use tiers_api::{DEFAULT_TOP_N, TiersClient};
use tiers_app::{AppState, LookupService, RefreshEvent, RefreshService};
use tiers_assets::{DEFAULT_HEAD_SIZE, IconStore, SkinCache};
use tiers_model::{Gamemode, Tier};

#[derive(Parser, Debug)]
#[command(name = "tiersrank", about = "MCTiers rank estimation tool")]
struct Cli {
    /// Base URL of the ranking API.
    #[arg(long, default_value = tiers_api::DEFAULT_BASE_URL)]
    api_base: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Refresh the top leaderboard and print a summary.
    Refresh {
        /// Number of top entries to fetch.
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },
    /// Estimate your rank from per-gamemode tier picks.
    Rank {
        /// Number of top entries to compare against.
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        #[command(flatten)]
        tiers: TierArgs,
    },
    /// Look up a player's public profile and tier badges.
    Lookup {
        /// Player username.
        name: String,

        /// Also cache the player's head image into this directory.
        #[arg(long)]
        skin_dir: Option<PathBuf>,
    },
    /// Download the tier icon set into a local directory.
    Icons {
        #[arg(long, default_value = "assets/icons")]
        dir: PathBuf,
    },
}

/// One optional tier pick per gamemode, e.g. `--vanilla HT1 --sword LT3`.
#[derive(Args, Debug)]
struct TierArgs {
    #[arg(long)]
    vanilla: Option<Tier>,
    #[arg(long)]
    uhc: Option<Tier>,
    #[arg(long)]
    pot: Option<Tier>,
    #[arg(long)]
    nethop: Option<Tier>,
    #[arg(long)]
    smp: Option<Tier>,
    #[arg(long)]
    sword: Option<Tier>,
    #[arg(long)]
    axe: Option<Tier>,
    #[arg(long)]
    mace: Option<Tier>,
}

impl TierArgs {
    fn apply(&self, state: &mut AppState) {
        let picks = [
            (Gamemode::Vanilla, self.vanilla),
            (Gamemode::Uhc, self.uhc),
            (Gamemode::Pot, self.pot),
            (Gamemode::NetHop, self.nethop),
            (Gamemode::Smp, self.smp),
            (Gamemode::Sword, self.sword),
            (Gamemode::Axe, self.axe),
            (Gamemode::Mace, self.mace),
        ];
        for (mode, tier) in picks {
            if let Some(tier) = tier {
                state.selection_mut().set(mode, tier);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Refresh { top } => {
            let mut state = AppState::new();
            refresh_into(&mut state, &cli.api_base, top).await
        }
        Command::Rank { top, tiers } => rank(&cli.api_base, top, &tiers).await,
        Command::Lookup { name, skin_dir } => {
            lookup(&cli.api_base, &name, skin_dir.as_deref()).await
        }
        Command::Icons { dir } => icons(&dir).await,
    }
}

/// Refresh the leaderboard into `state`, echoing worker progress.
async fn refresh_into(state: &mut AppState, api_base: &str, top: usize) -> Result<()> {
    let client = Arc::new(TiersClient::with_base_url(api_base)?);
    let service = RefreshService::new(client);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let generation = service.spawn(top, tx);
    state.begin_refresh(generation);
    info!(generation, top, "refreshing leaderboard");

    while let Some(event) = rx.recv().await {
        match event {
            RefreshEvent::Progress { count, .. } => {
                eprintln!("Loaded {count}/{top}");
            }
            RefreshEvent::Finished { generation, result } => {
                match state.apply_refresh(generation, result) {
                    Some(Ok(snapshot)) => {
                        if let Some(top1) = snapshot.top() {
                            println!(
                                "Loaded {} entries; #1 {} ({} pts)",
                                snapshot.len(),
                                top1.name,
                                top1.points
                            );
                        }
                        return Ok(());
                    }
                    Some(Err(e)) => return Err(e.into()),
                    // Superseded worker; keep draining.
                    None => {}
                }
            }
        }
    }
    anyhow::bail!("refresh worker ended without a result")
}

async fn rank(api_base: &str, top: usize, tiers: &TierArgs) -> Result<()> {
    let mut state = AppState::new();
    tiers.apply(&mut state);
    println!("Live score: {} pts", state.live_score());

    refresh_into(&mut state, api_base, top).await?;

    let report = state.calculate_rank()?;
    println!("{report}");
    Ok(())
}

async fn lookup(api_base: &str, name: &str, skin_dir: Option<&Path>) -> Result<()> {
    let client = Arc::new(TiersClient::with_base_url(api_base)?);
    let service = LookupService::new(client);
    let (tx, mut rx) = mpsc::unbounded_channel();
    service.spawn(name, tx)?;

    let event = rx
        .recv()
        .await
        .ok_or_else(|| anyhow::anyhow!("lookup worker ended without a result"))?;
    let profile = event.result?;

    println!(
        "{} [{}] \u{2022} {} points \u{2022} Overall rank #{}",
        profile.name, profile.region, profile.points, profile.overall
    );
    for (mode, tier, retired) in profile.tier_badges() {
        let suffix = if retired { " (retired)" } else { "" };
        println!("  {mode}: {tier}{suffix}");
    }

    if let Some(dir) = skin_dir {
        let cache = SkinCache::new(dir)?;
        cache
            .get_player_head(&profile.name, DEFAULT_HEAD_SIZE)
            .await?;
        println!("Saved head to {}", cache.head_path(&profile.name).display());
    }
    Ok(())
}

async fn icons(dir: &Path) -> Result<()> {
    let store = IconStore::new(dir)?;
    let warnings = store.ensure_available().await;
    if warnings.is_empty() {
        println!("Icons ready in {}", dir.display());
    } else {
        for warning in &warnings {
            eprintln!("warning: {warning}");
        }
    }
    Ok(())
}
