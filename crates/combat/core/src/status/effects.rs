//! Status effect engine: the bounded list of effects on one combatant.

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use super::effect::{
    EffectDuration, PeriodicEffect, PeriodicTrigger, StackingPolicy, StatusEffect, StatusTags,
};
use crate::config::CombatConfig;
use crate::stats::{Attribute, ModifierSource};

/// What [`StatusEffects::add`] did with the incoming effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AddOutcome {
    /// No same-named effect existed; appended.
    Added,
    /// Appended beside an existing same-named instance.
    AddedInstance,
    /// Non-stacking: the stronger newcomer replaced the existing effect.
    Replaced,
    /// Non-stacking: the existing effect was at least as strong.
    Kept,
    /// Duration of the existing effect was reset.
    Refreshed,
    /// Stack count incremented (or already at its cap).
    Stacked(u32),
    /// The list is full.
    Rejected,
}

impl AddOutcome {
    /// Whether the holder's effect state changed.
    pub fn changed(self) -> bool {
        !matches!(self, AddOutcome::Kept | AddOutcome::Rejected)
    }
}

/// Totals produced by one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub damage: f64,
    pub healing: f64,
    /// Names of effects removed by this tick, in list order.
    pub expired: Vec<String>,
}

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `effect` into the list according to its stacking policy.
    pub fn add(&mut self, mut effect: StatusEffect) -> AddOutcome {
        effect.stacks = effect.stacks.max(1);
        let policy = effect.stacking;
        let position = self.effects.iter().position(|e| e.name == effect.name);

        let outcome = match (policy, position) {
            (_, None) => return self.push(effect, AddOutcome::Added),
            (StackingPolicy::Independent, Some(_)) => {
                return self.push(effect, AddOutcome::AddedInstance);
            }
            (StackingPolicy::NoStack, Some(index)) => {
                let existing = &mut self.effects[index];
                if effect.magnitude() > existing.magnitude() {
                    *existing = effect;
                    AddOutcome::Replaced
                } else {
                    AddOutcome::Kept
                }
            }
            (StackingPolicy::RefreshDuration, Some(index)) => {
                self.effects[index].remaining = effect.duration;
                AddOutcome::Refreshed
            }
            (StackingPolicy::StackIntensity { max_stacks }, Some(index)) => {
                let existing = &mut self.effects[index];
                existing.stacks = (existing.stacks + 1).min(max_stacks.max(1));
                existing.remaining = effect.duration;
                AddOutcome::Stacked(existing.stacks)
            }
        };

        debug!(target: "combat::status", %outcome, "merged status effect");
        outcome
    }

    fn push(&mut self, effect: StatusEffect, outcome: AddOutcome) -> AddOutcome {
        if self.effects.is_full() {
            warn!(
                target: "combat::status",
                name = %effect.name,
                capacity = CombatConfig::MAX_STATUS_EFFECTS,
                "status list full, effect rejected"
            );
            return AddOutcome::Rejected;
        }
        self.effects.push(effect);
        outcome
    }

    /// Advances every effect by one round.
    ///
    /// Periodic amounts fire first (every-tick effects always, on-expire
    /// effects only on their final tick), then finite durations decrement and
    /// effects reaching zero are removed. Permanent effects never decrement.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        for effect in self.effects.iter_mut() {
            let expires = match &mut effect.remaining {
                EffectDuration::Rounds(rounds) => {
                    *rounds = rounds.saturating_sub(1);
                    *rounds == 0
                }
                EffectDuration::Permanent => false,
            };

            if let Some(periodic) = effect.periodic {
                let fires = match periodic.trigger {
                    PeriodicTrigger::EveryTick => true,
                    PeriodicTrigger::OnExpire => expires,
                };
                if fires {
                    let amount = periodic.amount * f64::from(effect.stacks);
                    match periodic.effect {
                        PeriodicEffect::Damage => report.damage += amount,
                        PeriodicEffect::Heal => report.healing += amount,
                    }
                }
            }
        }

        self.effects.retain(|effect| {
            let expired = effect.remaining == EffectDuration::Rounds(0);
            if expired {
                report.expired.push(effect.name.clone());
            }
            !expired
        });

        report
    }

    /// Removes every dispellable harmful effect; returns the removed names.
    pub fn clear_dispellable_debuffs(&mut self) -> Vec<String> {
        let mut removed = Vec::new();
        self.effects.retain(|effect| {
            let dispel = effect.dispellable && effect.kind.is_harmful();
            if dispel {
                removed.push(effect.name.clone());
            }
            !dispel
        });
        removed
    }

    pub fn clear_all(&mut self) {
        self.effects.clear();
    }

    /// Removes every instance named `name`; returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.effects.len();
        self.effects.retain(|effect| effect.name != name);
        before - self.effects.len()
    }

    /// Sum of effective modifier values targeting `attribute`.
    pub fn aggregate_modifier(&self, attribute: Attribute) -> f64 {
        self.effects.iter().map(|e| e.modifier_for(attribute)).sum()
    }

    pub fn has_tag(&self, tags: StatusTags) -> bool {
        self.effects.iter().any(|e| e.tags.intersects(tags))
    }

    /// Stunned or frozen.
    pub fn prevents_action(&self) -> bool {
        self.effects.iter().any(StatusEffect::prevents_action)
    }

    /// Held by a stun or freeze that never wears off.
    pub fn permanently_incapacitated(&self) -> bool {
        self.effects
            .iter()
            .any(|e| e.prevents_action() && e.is_permanent())
    }

    pub fn get(&self, name: &str) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl ModifierSource for StatusEffects {
    fn aggregate_modifier(&self, attribute: Attribute) -> f64 {
        StatusEffects::aggregate_modifier(self, attribute)
    }
}
