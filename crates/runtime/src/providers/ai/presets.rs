//! Layer 4: Complete trees per personality.
//!
//! Trees are plain data, so a [`PresetTrees`] is built once per decision
//! engine and shared by every decision it makes.

use combat_core::Personality;

use super::subtrees::{BehaviorTree, strategies};

/// Builds the tree for one personality.
pub fn for_personality(personality: Personality) -> BehaviorTree {
    match personality {
        Personality::Aggressive => strategies::aggressive(),
        Personality::Defensive => strategies::defensive(),
        Personality::Balanced => strategies::balanced(),
    }
}

/// One prebuilt tree per personality.
pub struct PresetTrees {
    aggressive: BehaviorTree,
    defensive: BehaviorTree,
    balanced: BehaviorTree,
}

impl PresetTrees {
    pub fn new() -> Self {
        Self {
            aggressive: for_personality(Personality::Aggressive),
            defensive: for_personality(Personality::Defensive),
            balanced: for_personality(Personality::Balanced),
        }
    }

    pub fn get(&self, personality: Personality) -> &BehaviorTree {
        match personality {
            Personality::Aggressive => &self.aggressive,
            Personality::Defensive => &self.defensive,
            Personality::Balanced => &self.balanced,
        }
    }
}

impl Default for PresetTrees {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresetTrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetTrees").finish_non_exhaustive()
    }
}
