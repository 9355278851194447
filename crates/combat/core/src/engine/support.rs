//! Defend, flee and wait.

use tracing::{debug, info};

use super::CombatEngine;
use crate::action::{ActionResult, StatusChange};
use crate::combatant::CombatantId;
use crate::config::CombatConfig;
use crate::error::CombatError;
use crate::status::{DEFENDING, EffectSource, StatusTemplate};

/// `base + per_speed × (speed - mean enemy speed)`, clamped to the flee band.
/// With no enemies left the base chance applies.
pub fn flee_chance(config: &CombatConfig, speed: f64, enemy_speeds: &[f64]) -> f64 {
    let flee = &config.flee;
    if enemy_speeds.is_empty() {
        return flee.chance.clamp(flee.base);
    }
    let mean = enemy_speeds.iter().sum::<f64>() / enemy_speeds.len() as f64;
    flee.chance.clamp(flee.base + flee.per_speed * (speed - mean))
}

impl CombatEngine<'_> {
    pub(super) fn defend(&mut self, actor_id: CombatantId) -> Result<ActionResult, CombatError> {
        let ruleset = self.ruleset;
        let fallback;
        let template = match ruleset.status(DEFENDING) {
            Some(template) => template,
            None => {
                fallback = StatusTemplate::defending(ruleset.config().defend_bonus);
                &fallback
            }
        };

        let actor = self.encounter.require_mut(actor_id)?;
        let outcome = actor.apply_status(template, EffectSource::combatant(actor_id));
        let mut result =
            ActionResult::resolved(actor_id, format!("{} takes a defensive stance", actor.name));
        result.statuses_applied.push(StatusChange {
            target: actor_id,
            status: template.name.clone(),
            outcome,
        });
        Ok(result)
    }

    pub(super) fn flee(&mut self, actor_id: CombatantId) -> Result<ActionResult, CombatError> {
        let ruleset = self.ruleset;
        let actor = self.encounter.require(actor_id)?;
        let speed = actor.stats().derived.speed;
        let name = actor.name.clone();
        let enemy_speeds: Vec<f64> = self
            .encounter
            .enemies_of(actor_id)
            .iter()
            .map(|enemy| enemy.stats().derived.speed)
            .collect();

        let chance = flee_chance(ruleset.config(), speed, &enemy_speeds);
        let escaped = self.rng.chance(chance);
        debug!(target: "combat::engine", actor = %actor_id, chance, escaped, "flee attempt");

        if !escaped {
            let mut result = ActionResult::resolved(actor_id, format!("{name} tries to flee but cannot escape"));
            result.success = false;
            return Ok(result);
        }

        info!(target: "combat::engine", actor = %actor_id, round = self.encounter.round(), "combatant fled");
        self.encounter.withdraw(actor_id);
        let mut result = ActionResult::resolved(actor_id, format!("{name} flees the battle"));
        result.fled = true;
        Ok(result)
    }

    pub(super) fn wait(&mut self, actor_id: CombatantId) -> Result<ActionResult, CombatError> {
        let actor = self.encounter.require(actor_id)?;
        Ok(ActionResult::resolved(actor_id, format!("{} bides their time", actor.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flee_chance_tracks_speed_difference() {
        let config = CombatConfig::default();
        assert!((flee_chance(&config, 30.0, &[10.0]) - 0.7).abs() < 1e-12);
        assert!((flee_chance(&config, 10.0, &[10.0, 30.0]) - 0.4).abs() < 1e-12);
        assert_eq!(flee_chance(&config, 500.0, &[10.0]), 0.9);
        assert_eq!(flee_chance(&config, 0.0, &[500.0]), 0.1);
        assert_eq!(flee_chance(&config, 0.0, &[]), 0.5);
    }
}
