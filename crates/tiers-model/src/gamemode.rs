use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Competitive PvP gamemode scored independently on the ranking service.
///
/// Exactly these 8 participate in score computation. The "overall" aggregate
/// is not a gamemode; see [`IconMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gamemode {
    Vanilla,
    Uhc,
    Pot,
    NetHop,
    Smp,
    Sword,
    Axe,
    Mace,
}

impl Gamemode {
    /// All scored gamemodes, in display order.
    pub const ALL: [Gamemode; 8] = [
        Gamemode::Vanilla,
        Gamemode::Uhc,
        Gamemode::Pot,
        Gamemode::NetHop,
        Gamemode::Smp,
        Gamemode::Sword,
        Gamemode::Axe,
        Gamemode::Mace,
    ];

    /// API slug for this gamemode.
    pub fn as_str(self) -> &'static str {
        match self {
            Gamemode::Vanilla => "vanilla",
            Gamemode::Uhc => "uhc",
            Gamemode::Pot => "pot",
            Gamemode::NetHop => "nethop",
            Gamemode::Smp => "smp",
            Gamemode::Sword => "sword",
            Gamemode::Axe => "axe",
            Gamemode::Mace => "mace",
        }
    }

    /// Index into fixed-size per-gamemode arrays.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Gamemode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gamemode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gamemode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown gamemode: {s}"))
    }
}

/// Icon identifier: the 8 gamemodes plus the "overall" aggregate.
///
/// Overall has an icon and a leaderboard, but never contributes to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconMode {
    Overall,
    Gamemode(Gamemode),
}

impl IconMode {
    /// All icon identifiers, overall first.
    pub const ALL: [IconMode; 9] = [
        IconMode::Overall,
        IconMode::Gamemode(Gamemode::Vanilla),
        IconMode::Gamemode(Gamemode::Uhc),
        IconMode::Gamemode(Gamemode::Pot),
        IconMode::Gamemode(Gamemode::NetHop),
        IconMode::Gamemode(Gamemode::Smp),
        IconMode::Gamemode(Gamemode::Sword),
        IconMode::Gamemode(Gamemode::Axe),
        IconMode::Gamemode(Gamemode::Mace),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IconMode::Overall => "overall",
            IconMode::Gamemode(mode) => mode.as_str(),
        }
    }
}

impl fmt::Display for IconMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Gamemode> for IconMode {
    fn from(mode: Gamemode) -> Self {
        IconMode::Gamemode(mode)
    }
}
