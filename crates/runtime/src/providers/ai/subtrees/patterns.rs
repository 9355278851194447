//! Layer 1: Basic if-then patterns.
//!
//! Patterns follow the `behavior_when_condition()` convention. Where a
//! pattern offers alternatives they are tried in order, skills before items.

use behavior_tree::builder::{action, condition, selector, sequence};

use crate::providers::ai::nodes;

use super::BehaviorTree;

// ============================================================================
// Survival Patterns
// ============================================================================

/// Flee when critically wounded and outnumbered.
pub fn escape_when_overwhelmed() -> BehaviorTree {
    sequence(vec![
        condition("is_health_critical", nodes::is_health_critical),
        condition("is_outnumbered", nodes::is_outnumbered),
        action("flee", nodes::flee),
    ])
}

/// Flee whenever critically wounded, outnumbered or not.
pub fn escape_when_critical() -> BehaviorTree {
    sequence(vec![
        condition("is_health_critical", nodes::is_health_critical),
        action("flee", nodes::flee),
    ])
}

/// Heal when critically wounded.
pub fn recover_when_critical() -> BehaviorTree {
    sequence(vec![
        condition("is_health_critical", nodes::is_health_critical),
        action("heal_self", nodes::heal_self),
    ])
}

/// When wounded, weigh healing against a protective buff and guarding.
///
/// The three proposals compete on priority, so healing wins whenever it is
/// available and guarding is the last resort.
pub fn brace_when_wounded() -> BehaviorTree {
    sequence(vec![
        condition("is_health_low", nodes::is_health_low),
        selector(vec![
            action("heal_self", nodes::heal_self),
            action("defend", nodes::defend),
        ]),
        selector(vec![
            action("buff_self", nodes::buff_self),
            action("defend", nodes::defend),
        ]),
    ])
}

// ============================================================================
// Support Patterns
// ============================================================================

pub fn heal_when_ally_injured() -> BehaviorTree {
    sequence(vec![
        condition("has_injured_ally", nodes::has_injured_ally),
        action("heal_ally", nodes::heal_ally),
    ])
}

pub fn cleanse_when_afflicted() -> BehaviorTree {
    sequence(vec![
        condition("is_anyone_afflicted", nodes::is_anyone_afflicted),
        action("cleanse", nodes::cleanse),
    ])
}

pub fn meditate_when_drained() -> BehaviorTree {
    sequence(vec![
        condition("is_mana_low", nodes::is_mana_low),
        action("restore_mana", nodes::restore_mana),
    ])
}

// ============================================================================
// Offense Patterns
// ============================================================================

/// Strongest damage option, falling back to a plain attack.
pub fn damage_when_targets() -> BehaviorTree {
    sequence(vec![
        condition("has_targets", nodes::has_targets),
        selector(vec![
            action("area_strike", nodes::area_strike),
            action("strike", nodes::strike),
            action("basic_attack", nodes::basic_attack),
        ]),
    ])
}

pub fn disrupt_when_targets() -> BehaviorTree {
    sequence(vec![
        condition("has_targets", nodes::has_targets),
        action("disrupt", nodes::disrupt),
    ])
}
