use crate::gamemode::Gamemode;
use crate::tier::Tier;

/// Per-gamemode tier picks supplied by the user.
///
/// Transient UI state; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierSelection {
    slots: [Option<Tier>; Gamemode::ALL.len()],
}

impl TierSelection {
    /// A selection with every gamemode unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, mode: Gamemode, tier: Tier) {
        self.slots[mode.index()] = Some(tier);
    }

    pub fn clear(&mut self, mode: Gamemode) {
        self.slots[mode.index()] = None;
    }

    pub fn get(&self, mode: Gamemode) -> Option<Tier> {
        self.slots[mode.index()]
    }

    /// Whether every one of the 8 gamemodes has a tier set.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Gamemodes still unset, in display order.
    pub fn missing(&self) -> Vec<Gamemode> {
        Gamemode::ALL
            .into_iter()
            .filter(|m| self.get(*m).is_none())
            .collect()
    }

    /// Total points over the set gamemodes. See [`compute_score`].
    pub fn score(&self) -> u32 {
        compute_score(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Gamemode, Option<Tier>)> + '_ {
        Gamemode::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

/// Sum of the point values of every set gamemode.
///
/// Unset gamemodes contribute 0 silently. This is the permissive preview
/// path; the rank-calculation gate separately requires a complete selection.
pub fn compute_score(selection: &TierSelection) -> u32 {
    Gamemode::ALL
        .into_iter()
        .filter_map(|m| selection.get(m))
        .map(Tier::points)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_scores_zero() {
        let selection = TierSelection::new();
        assert_eq!(compute_score(&selection), 0);
        assert!(!selection.is_complete());
        assert_eq!(selection.missing().len(), 8);
    }

    #[test]
    fn partial_selection_sums_set_modes() {
        let mut selection = TierSelection::new();
        selection.set(Gamemode::Vanilla, Tier::Ht1);
        selection.set(Gamemode::Uhc, Tier::Lt1);
        selection.set(Gamemode::Pot, Tier::Ht5);
        assert_eq!(compute_score(&selection), 60 + 45 + 2);
        assert_eq!(selection.score(), 107);
    }

    #[test]
    fn score_is_order_invariant() {
        let mut forward = TierSelection::new();
        for mode in Gamemode::ALL {
            forward.set(mode, Tier::Ht3);
        }
        let mut backward = TierSelection::new();
        for mode in Gamemode::ALL.into_iter().rev() {
            backward.set(mode, Tier::Ht3);
        }
        assert_eq!(compute_score(&forward), compute_score(&backward));
        assert_eq!(compute_score(&forward), 8 * 10);
    }

    #[test]
    fn set_then_clear_restores_unset() {
        let mut selection = TierSelection::new();
        selection.set(Gamemode::Mace, Tier::Lt2);
        assert_eq!(selection.get(Gamemode::Mace), Some(Tier::Lt2));
        selection.clear(Gamemode::Mace);
        assert_eq!(selection.get(Gamemode::Mace), None);
        assert_eq!(compute_score(&selection), 0);
    }

    #[test]
    fn overwriting_a_pick_replaces_it() {
        let mut selection = TierSelection::new();
        selection.set(Gamemode::Sword, Tier::Lt5);
        selection.set(Gamemode::Sword, Tier::Ht1);
        assert_eq!(selection.score(), 60);
    }

    #[test]
    fn missing_names_only_unset_modes() {
        let mut selection = TierSelection::new();
        for mode in Gamemode::ALL {
            selection.set(mode, Tier::Lt5);
        }
        selection.clear(Gamemode::Pot);
        selection.clear(Gamemode::Axe);
        assert_eq!(selection.missing(), vec![Gamemode::Pot, Gamemode::Axe]);
        assert!(!selection.is_complete());
    }

    #[test]
    fn complete_selection() {
        let mut selection = TierSelection::new();
        for mode in Gamemode::ALL {
            selection.set(mode, Tier::Ht2);
        }
        assert!(selection.is_complete());
        assert!(selection.missing().is_empty());
    }

    #[test]
    fn iter_yields_every_mode_once() {
        let selection = TierSelection::new();
        let modes: Vec<Gamemode> = selection.iter().map(|(m, _)| m).collect();
        assert_eq!(modes, Gamemode::ALL);
    }
}
