//! Layer 2: Goal-oriented tactical behaviors.
//!
//! Each tactic answers "how do I accomplish X?" and fails when X is not
//! needed or not possible this turn.

use behavior_tree::builder::{action, condition, selector, sequence};

use crate::providers::ai::nodes;

use super::{BehaviorTree, patterns};

/// Stay alive: escape a lost fight, otherwise patch up.
pub fn survival() -> BehaviorTree {
    selector(vec![
        patterns::escape_when_overwhelmed(),
        patterns::recover_when_critical(),
        patterns::brace_when_wounded(),
    ])
}

/// Look after the team before the enemy.
pub fn support() -> BehaviorTree {
    selector(vec![
        patterns::heal_when_ally_injured(),
        patterns::cleanse_when_afflicted(),
    ])
}

/// Hit as hard as possible.
pub fn all_out_offense() -> BehaviorTree {
    selector(vec![
        patterns::damage_when_targets(),
        patterns::disrupt_when_targets(),
    ])
}

/// Damage and disruption compete on priority. Disruption only wins when the
/// best damage option is a plain attack.
pub fn measured_offense() -> BehaviorTree {
    sequence(vec![
        condition("has_targets", nodes::has_targets),
        patterns::damage_when_targets(),
        selector(vec![
            action("disrupt", nodes::disrupt),
            action("basic_attack", nodes::basic_attack),
        ]),
    ])
}

/// Buff up and guard instead of attacking.
pub fn turtle() -> BehaviorTree {
    selector(vec![
        action("buff_self", nodes::buff_self),
        action("defend", nodes::defend),
    ])
}
