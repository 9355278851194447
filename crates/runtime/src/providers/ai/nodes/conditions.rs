//! Condition nodes for AI behavior trees.
//!
//! Conditions read the decision context and never produce actions.

use crate::providers::ai::DecisionContext;

pub fn is_health_critical(ctx: &DecisionContext) -> bool {
    ctx.health() < ctx.config.critical_health
}

pub fn is_health_low(ctx: &DecisionContext) -> bool {
    ctx.health() < ctx.config.low_health
}

pub fn is_mana_low(ctx: &DecisionContext) -> bool {
    ctx.mana() < ctx.config.low_mana
}

pub fn has_injured_ally(ctx: &DecisionContext) -> bool {
    !ctx.injured_allies.is_empty()
}

/// The actor or an ally carries a removable harmful effect.
pub fn is_anyone_afflicted(ctx: &DecisionContext) -> bool {
    ctx.actor.afflicted || ctx.allies.iter().any(|ally| ally.afflicted)
}

/// At least one enemy can be struck without heaven intervening.
pub fn has_targets(ctx: &DecisionContext) -> bool {
    ctx.targets().next().is_some()
}

pub fn is_outnumbered(ctx: &DecisionContext) -> bool {
    ctx.outnumbered()
}
