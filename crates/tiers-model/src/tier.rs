use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Skill bracket: level 1 (best) through 5, split into a high and a low
/// sub-band per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "HT1")]
    Ht1,
    #[serde(rename = "LT1")]
    Lt1,
    #[serde(rename = "HT2")]
    Ht2,
    #[serde(rename = "LT2")]
    Lt2,
    #[serde(rename = "HT3")]
    Ht3,
    #[serde(rename = "LT3")]
    Lt3,
    #[serde(rename = "HT4")]
    Ht4,
    #[serde(rename = "LT4")]
    Lt4,
    #[serde(rename = "HT5")]
    Ht5,
    #[serde(rename = "LT5")]
    Lt5,
}

impl Tier {
    /// All tiers in ascending point order, the order selection menus list them.
    pub const ALL: [Tier; 10] = [
        Tier::Lt5,
        Tier::Ht5,
        Tier::Lt4,
        Tier::Ht4,
        Tier::Lt3,
        Tier::Ht3,
        Tier::Lt2,
        Tier::Ht2,
        Tier::Lt1,
        Tier::Ht1,
    ];

    /// Point value from the fixed scoring table.
    pub fn points(self) -> u32 {
        match self {
            Tier::Ht1 => 60,
            Tier::Lt1 => 45,
            Tier::Ht2 => 30,
            Tier::Lt2 => 20,
            Tier::Ht3 => 10,
            Tier::Lt3 => 6,
            Tier::Ht4 => 4,
            Tier::Lt4 => 3,
            Tier::Ht5 => 2,
            Tier::Lt5 => 1,
        }
    }

    /// Numeric level, 1 (best) through 5.
    pub fn level(self) -> u8 {
        match self {
            Tier::Ht1 | Tier::Lt1 => 1,
            Tier::Ht2 | Tier::Lt2 => 2,
            Tier::Ht3 | Tier::Lt3 => 3,
            Tier::Ht4 | Tier::Lt4 => 4,
            Tier::Ht5 | Tier::Lt5 => 5,
        }
    }

    /// Whether this is the high sub-band of its level.
    pub fn is_high(self) -> bool {
        matches!(self, Tier::Ht1 | Tier::Ht2 | Tier::Ht3 | Tier::Ht4 | Tier::Ht5)
    }

    /// Human-readable label, `"HT1"` through `"LT5"`.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Ht1 => "HT1",
            Tier::Lt1 => "LT1",
            Tier::Ht2 => "HT2",
            Tier::Lt2 => "LT2",
            Tier::Ht3 => "HT3",
            Tier::Lt3 => "LT3",
            Tier::Ht4 => "HT4",
            Tier::Lt4 => "LT4",
            Tier::Ht5 => "HT5",
            Tier::Lt5 => "LT5",
        }
    }

    /// Decode a raw profile placement into a tier label.
    ///
    /// `pos == 0` means the high sub-band, any other value the low one; `pos`
    /// carries no further meaning here. Levels outside 1..=5 yield `None`.
    pub fn from_placement(tier: u8, pos: i64) -> Option<Tier> {
        let high = pos == 0;
        Some(match (tier, high) {
            (1, true) => Tier::Ht1,
            (1, false) => Tier::Lt1,
            (2, true) => Tier::Ht2,
            (2, false) => Tier::Lt2,
            (3, true) => Tier::Ht3,
            (3, false) => Tier::Lt3,
            (4, true) => Tier::Ht4,
            (4, false) => Tier::Lt4,
            (5, true) => Tier::Ht5,
            (5, false) => Tier::Lt5,
            _ => return None,
        })
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown tier: {s}"))
    }
}
