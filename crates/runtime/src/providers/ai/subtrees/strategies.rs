//! Layer 3: Strategic decision-making behaviors.
//!
//! One strategy per [`Personality`](combat_core::Personality). Each decides
//! in which order survival, support, and offense are considered.

use behavior_tree::builder::selector;

use super::{BehaviorTree, patterns, tactics};

/// Aggressive: only a desperate, outnumbered cultivator retreats.
///
/// 1. Critical and outnumbered → flee
/// 2. Critical → heal if possible
/// 3. Otherwise → strongest damage, then disruption
pub fn aggressive() -> BehaviorTree {
    selector(vec![
        patterns::escape_when_overwhelmed(),
        patterns::recover_when_critical(),
        tactics::all_out_offense(),
    ])
}

/// Defensive: survival and allies first, offense last.
///
/// 1. Critical → heal, else flee
/// 2. Wounded → heal, buff, or guard
/// 3. Injured or afflicted ally → heal or cleanse
/// 4. Low mana → meditate
/// 5. Otherwise → measured offense, or turtle when nothing can be struck
pub fn defensive() -> BehaviorTree {
    selector(vec![
        patterns::recover_when_critical(),
        patterns::escape_when_critical(),
        patterns::brace_when_wounded(),
        tactics::support(),
        patterns::meditate_when_drained(),
        tactics::measured_offense(),
        tactics::turtle(),
    ])
}

/// Balanced: survive, keep the team standing, then fight.
pub fn balanced() -> BehaviorTree {
    selector(vec![
        tactics::survival(),
        tactics::support(),
        patterns::meditate_when_drained(),
        tactics::measured_offense(),
    ])
}
