//! Basic attack resolution and the damage math shared with skills.

use tracing::debug;

use super::CombatEngine;
use crate::action::{ActionResult, DamageEntry};
use crate::combatant::CombatantId;
use crate::config::CombatConfig;
use crate::cultivation::Element;
use crate::error::CombatError;
use crate::stats::StatsSnapshot;

/// `accuracy / (accuracy + evasion)`, clamped to the configured band.
pub fn hit_chance(config: &CombatConfig, accuracy: f64, evasion: f64) -> f64 {
    let total = accuracy + evasion;
    if total <= 0.0 {
        return config.hit_chance.max;
    }
    config.hit_chance.clamp(accuracy / total)
}

/// Damage before variance and crits: `max(minimum, attack - defense × factor)`.
pub fn base_damage(config: &CombatConfig, attack_power: f64, defense: f64) -> f64 {
    (attack_power - defense * config.damage.defense_factor).max(config.damage.minimum)
}

/// Five-element multiplier of an attack element against a defender's
/// dominant spiritual root.
pub fn element_multiplier(
    config: &CombatConfig,
    attack: Option<Element>,
    defender: Option<Element>,
) -> f64 {
    match (attack, defender) {
        (Some(attack), Some(defender)) if attack.counters() == defender => {
            config.elements.advantage
        }
        (Some(attack), Some(defender)) if defender.counters() == attack => {
            config.elements.disadvantage
        }
        _ => 1.0,
    }
}

impl CombatEngine<'_> {
    /// Rolls a critical hit, yielding the crit multiplier when it lands.
    pub(super) fn roll_crit(&mut self, attacker: &StatsSnapshot) -> Option<f64> {
        self.rng
            .chance(attacker.derived.crit_rate / 100.0)
            .then_some(attacker.derived.crit_damage / 100.0)
    }

    pub(super) fn basic_attack(
        &mut self,
        actor_id: CombatantId,
        target_id: CombatantId,
    ) -> Result<ActionResult, CombatError> {
        let ruleset = self.ruleset;
        let config = ruleset.config();
        let actor = self.encounter.require(actor_id)?;
        let target = self.encounter.require(target_id)?;
        let (actor_name, target_name) = (actor.name.clone(), target.name.clone());
        let attacker = actor.stats();
        let defender = target.stats();

        let chance = hit_chance(config, attacker.derived.accuracy, defender.derived.evasion);
        if !self.rng.chance(chance) {
            debug!(target: "combat::engine", actor = %actor_id, target = %target_id, chance, "attack evaded");
            let mut result =
                ActionResult::resolved(actor_id, format!("{target_name} evades {actor_name}'s attack"));
            result.success = false;
            result.damage.push(DamageEntry {
                target: target_id,
                amount: 0.0,
                critical: false,
                evaded: true,
                element_multiplier: 1.0,
            });
            return Ok(result);
        }

        let base = base_damage(config, attacker.derived.attack_power, defender.derived.defense);
        let variance = config.damage.variance;
        let mut amount = base * self.rng.uniform(1.0 - variance, 1.0 + variance);
        let crit = self.roll_crit(&attacker);
        if let Some(multiplier) = crit {
            amount *= multiplier;
        }
        debug!(
            target: "combat::engine",
            actor = %actor_id,
            target = %target_id,
            chance,
            base,
            amount,
            critical = crit.is_some(),
            "attack hit"
        );

        let dealt = self.encounter.require_mut(target_id)?.take_damage(amount);
        self.encounter.require_mut(actor_id)?.record.damage_dealt += dealt;

        let message = if crit.is_some() {
            format!("{actor_name} lands a critical strike on {target_name} for {dealt:.0} damage")
        } else {
            format!("{actor_name} strikes {target_name} for {dealt:.0} damage")
        };
        let mut result = ActionResult::resolved(actor_id, message);
        result.damage.push(DamageEntry {
            target: target_id,
            amount: dealt,
            critical: crit.is_some(),
            evaded: false,
            element_multiplier: 1.0,
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_chance_is_accuracy_share_within_band() {
        let config = CombatConfig::default();
        assert!((hit_chance(&config, 80.0, 20.0) - 0.8).abs() < 1e-12);
        assert_eq!(hit_chance(&config, 1.0, 1_000.0), 0.1);
        assert_eq!(hit_chance(&config, 1_000.0, 0.0), 0.95);
        assert_eq!(hit_chance(&config, 0.0, 0.0), 0.95);
    }

    #[test]
    fn base_damage_subtracts_half_defense_with_a_floor() {
        let config = CombatConfig::default();
        assert_eq!(base_damage(&config, 100.0, 30.0), 85.0);
        assert_eq!(base_damage(&config, 10.0, 500.0), 1.0);
    }

    #[test]
    fn element_counters_scale_damage() {
        let config = CombatConfig::default();
        let fire = Some(Element::Fire);
        assert_eq!(element_multiplier(&config, fire, Some(Element::Metal)), 1.5);
        assert_eq!(element_multiplier(&config, fire, Some(Element::Water)), 0.7);
        assert_eq!(element_multiplier(&config, fire, Some(Element::Earth)), 1.0);
        assert_eq!(element_multiplier(&config, None, Some(Element::Metal)), 1.0);
        assert_eq!(element_multiplier(&config, fire, None), 1.0);
    }
}
