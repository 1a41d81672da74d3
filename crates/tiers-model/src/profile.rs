use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::gamemode::Gamemode;
use crate::tier::Tier;

/// Raw per-gamemode placement inside a player profile.
///
/// `tier` and `pos` come straight off the wire and are both optional there;
/// a placement missing either one is skipped rather than decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPlacement {
    #[serde(default)]
    pub tier: Option<u8>,
    #[serde(default)]
    pub pos: Option<i64>,
    #[serde(default)]
    pub retired: bool,
}

impl TierPlacement {
    /// Decode into a tier label, or `None` when either field is absent or
    /// the level is out of range.
    pub fn decode(&self) -> Option<Tier> {
        Tier::from_placement(self.tier?, self.pos?)
    }
}

/// A player's public profile on the ranking service.
///
/// Fetched fresh on each lookup; never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub overall: i64,
    #[serde(default = "unknown_region")]
    pub region: String,
    #[serde(default, deserialize_with = "known_mode_rankings")]
    pub rankings: HashMap<Gamemode, TierPlacement>,
}

impl PlayerProfile {
    /// Decoded tier badges in gamemode display order.
    ///
    /// Modes without a ranking, or with an incomplete placement, are left
    /// out. The flag marks retired placements.
    pub fn tier_badges(&self) -> Vec<(Gamemode, Tier, bool)> {
        Gamemode::ALL
            .into_iter()
            .filter_map(|mode| {
                let placement = self.rankings.get(&mode)?;
                let tier = placement.decode()?;
                Some((mode, tier, placement.retired))
            })
            .collect()
    }
}

fn unknown_region() -> String {
    "??".to_string()
}

/// The service has grown gamemodes this tool does not score; drop those keys
/// instead of failing the whole profile.
fn known_mode_rankings<'de, D>(
    deserializer: D,
) -> Result<HashMap<Gamemode, TierPlacement>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, TierPlacement> = HashMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, placement)| Some((key.parse::<Gamemode>().ok()?, placement)))
        .collect())
}
