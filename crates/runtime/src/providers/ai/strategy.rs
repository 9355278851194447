//! Target selection strategies.

use std::cmp::Ordering;

use combat_core::CombatantId;
use serde::{Deserialize, Serialize};

use super::context::{CombatantView, DecisionContext};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TargetStrategy {
    /// First entry of the threat list.
    #[default]
    HighestThreat,
    /// Fewest current health points.
    LowestHealth,
    /// Most damage dealt so far this fight; attack power breaks ties.
    HighestDamage,
    /// An enemy with a heal or buff ready, else the highest threat.
    SupportFirst,
}

impl TargetStrategy {
    /// Picks an enemy the actor may strike. Ties go to the earlier candidate.
    pub fn select(self, ctx: &DecisionContext) -> Option<CombatantId> {
        match self {
            TargetStrategy::HighestThreat => highest_threat(ctx),
            TargetStrategy::LowestHealth => {
                first_best(ctx.targets(), |a, b| b.health.total_cmp(&a.health)).map(|view| view.id)
            }
            TargetStrategy::HighestDamage => first_best(ctx.targets(), |a, b| {
                a.damage_dealt
                    .total_cmp(&b.damage_dealt)
                    .then(a.attack_power.total_cmp(&b.attack_power))
            })
            .map(|view| view.id),
            TargetStrategy::SupportFirst => ctx
                .threats
                .iter()
                .map(|threat| threat.target)
                .find(|&id| ctx.can_target(id) && ctx.enemy(id).is_some_and(|view| view.supportive))
                .or_else(|| highest_threat(ctx)),
        }
    }
}

fn highest_threat(ctx: &DecisionContext) -> Option<CombatantId> {
    ctx.threats
        .iter()
        .map(|threat| threat.target)
        .find(|&id| ctx.can_target(id))
}

/// The greatest candidate under `cmp`, keeping the first on ties.
fn first_best<'a>(
    candidates: impl Iterator<Item = &'a CombatantView>,
    cmp: impl Fn(&CombatantView, &CombatantView) -> Ordering,
) -> Option<&'a CombatantView> {
    candidates.fold(None, |best, view| match best {
        Some(top) if cmp(view, top) != Ordering::Greater => Some(top),
        _ => Some(view),
    })
}
