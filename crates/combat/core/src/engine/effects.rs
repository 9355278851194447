//! Skill and item resolution.
//!
//! Both run the same [`SkillEffect`] list: each effect in order, against each
//! resolved target in order. Caster values are locked before costs are paid;
//! defender values are read fresh for every effect so earlier effects in the
//! list (a defense-shredding debuff, say) count for later ones.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::CombatEngine;
use super::attack::element_multiplier;
use crate::action::{ActionResult, DamageEntry, HealEntry, StatusChange};
use crate::combatant::CombatantId;
use crate::config::CombatConfig;
use crate::cultivation::Element;
use crate::error::CombatError;
use crate::item::ItemDef;
use crate::skill::{DamageType, FormulaContext, SkillDef, SkillEffect};
use crate::stats::{ResourceKind, Resources, StatsSnapshot};
use crate::status::EffectSource;

/// Everything the effect loop needs to know about the user.
struct Caster {
    id: CombatantId,
    stats: StatsSnapshot,
    resources: Resources,
    element: Option<Element>,
    source: EffectSource,
}

/// Applies the damage type's mitigation to a raw amount.
fn mitigate(config: &CombatConfig, damage_type: DamageType, raw: f64, defender: &StatsSnapshot) -> f64 {
    match damage_type {
        DamageType::Physical => raw - defender.derived.defense * config.damage.defense_factor,
        DamageType::Magical => {
            let resistance = defender.derived.magic_resistance.max(0.0);
            raw * (1.0 - resistance / (resistance + 100.0))
        }
        DamageType::True => raw,
    }
}

impl<'r> CombatEngine<'r> {
    pub(super) fn cast_skill(
        &mut self,
        actor_id: CombatantId,
        skill: &'r SkillDef,
        targets: &[CombatantId],
    ) -> Result<ActionResult, CombatError> {
        let actor = self.encounter.require_mut(actor_id)?;
        let caster = Caster {
            id: actor_id,
            stats: actor.stats(),
            resources: actor.resources,
            element: skill.element,
            source: EffectSource::combatant(actor_id).with_skill(skill.id.clone()),
        };
        for (resource, amount) in skill.cost.iter() {
            actor.spend(resource, amount);
        }
        actor.start_cooldown(&skill.id, skill.cooldown);
        let headline = format!("{} uses {}", actor.name, skill.name);
        debug!(target: "combat::engine", actor = %actor_id, skill = %skill.id, targets = ?targets, "casting skill");

        let mut result = ActionResult::resolved(actor_id, headline);
        self.apply_effects(&caster, &skill.effects, targets, &mut result)?;
        result.message = self.summarize(&result);
        Ok(result)
    }

    pub(super) fn use_item(
        &mut self,
        actor_id: CombatantId,
        item: &'r ItemDef,
        targets: &[CombatantId],
    ) -> Result<ActionResult, CombatError> {
        let actor = self.encounter.require_mut(actor_id)?;
        actor.take_item(&item.id);
        let caster = Caster {
            id: actor_id,
            stats: actor.stats(),
            resources: actor.resources,
            element: None,
            source: EffectSource::combatant(actor_id),
        };
        let headline = format!("{} uses {}", actor.name, item.name);

        let mut result = ActionResult::resolved(actor_id, headline);
        self.apply_effects(&caster, &item.effects, targets, &mut result)?;
        result.message = self.summarize(&result);
        Ok(result)
    }

    fn apply_effects(
        &mut self,
        caster: &Caster,
        effects: &[SkillEffect],
        targets: &[CombatantId],
        result: &mut ActionResult,
    ) -> Result<(), CombatError> {
        let ruleset = self.ruleset;
        let config = ruleset.config();
        // Self-applied statuses land once per cast, not once per target.
        let mut applied_to_self = BTreeSet::new();

        for &target_id in targets {
            for (index, effect) in effects.iter().enumerate() {
                let target = self.encounter.require(target_id)?;
                if !target.is_alive() {
                    break;
                }
                let defender = target.stats();
                let defender_resources = target.resources;

                match effect {
                    SkillEffect::Damage {
                        formula,
                        damage_type,
                    } => {
                        let ctx = FormulaContext::new(
                            (&caster.stats, &caster.resources),
                            (&defender, &defender_resources),
                        );
                        let raw = formula.evaluate(&ctx).max(0.0);
                        let multiplier = element_multiplier(
                            config,
                            caster.element,
                            target.attributes.dominant_element(),
                        );
                        let resistance = caster.element.map_or(0.0, |element| {
                            config
                                .elements
                                .resistance
                                .clamp(target.attributes.elemental_resistance(element))
                        });

                        let mut amount = mitigate(config, *damage_type, raw, &defender)
                            * multiplier
                            * (1.0 - resistance / 100.0);
                        amount = amount.max(config.damage.minimum);
                        let crit = self.roll_crit(&caster.stats);
                        if let Some(crit) = crit {
                            amount *= crit;
                        }
                        debug!(
                            target: "combat::engine",
                            target = %target_id,
                            raw,
                            multiplier,
                            resistance,
                            amount,
                            "skill damage"
                        );

                        let dealt = self.encounter.require_mut(target_id)?.take_damage(amount);
                        self.encounter.require_mut(caster.id)?.record.damage_dealt += dealt;
                        result.damage.push(DamageEntry {
                            target: target_id,
                            amount: dealt,
                            critical: crit.is_some(),
                            evaded: false,
                            element_multiplier: multiplier,
                        });
                    }
                    SkillEffect::Heal { formula } => {
                        let ctx = FormulaContext::new(
                            (&caster.stats, &caster.resources),
                            (&defender, &defender_resources),
                        );
                        let amount = formula.evaluate(&ctx).max(0.0);
                        let healed = self
                            .encounter
                            .require_mut(target_id)?
                            .restore(ResourceKind::Health, amount);
                        self.encounter.require_mut(caster.id)?.record.healing_done += healed;
                        result.healing.push(HealEntry {
                            target: target_id,
                            amount: healed,
                        });
                    }
                    SkillEffect::RestoreMana { formula } => {
                        let ctx = FormulaContext::new(
                            (&caster.stats, &caster.resources),
                            (&defender, &defender_resources),
                        );
                        let amount = formula.evaluate(&ctx).max(0.0);
                        self.encounter
                            .require_mut(target_id)?
                            .restore(ResourceKind::Mana, amount);
                    }
                    SkillEffect::ApplyStatus {
                        status,
                        chance,
                        on_self,
                    } => {
                        if *on_self && !applied_to_self.insert(index) {
                            continue;
                        }
                        let Some(template) = ruleset.status(status) else {
                            warn!(target: "combat::engine", status, "status template missing");
                            continue;
                        };
                        if !self.rng.chance(*chance) {
                            continue;
                        }
                        let recipient = if *on_self { caster.id } else { target_id };
                        let outcome = self
                            .encounter
                            .require_mut(recipient)?
                            .apply_status(template, caster.source.clone());
                        result.statuses_applied.push(StatusChange {
                            target: recipient,
                            status: template.name.clone(),
                            outcome,
                        });
                    }
                    SkillEffect::Cleanse => {
                        let removed = self
                            .encounter
                            .require_mut(target_id)?
                            .status
                            .clear_dispellable_debuffs();
                        result
                            .statuses_removed
                            .extend(removed.into_iter().map(|name| (target_id, name)));
                    }
                }
            }
        }
        Ok(())
    }

    /// One display line for a resolved skill or item.
    fn summarize(&self, result: &ActionResult) -> String {
        let name = |id: CombatantId| {
            self.encounter
                .participant(id)
                .map_or_else(|| id.to_string(), |c| c.name.clone())
        };

        let mut parts = Vec::new();
        for entry in &result.damage {
            let crit = if entry.critical { " (critical)" } else { "" };
            parts.push(format!("{} takes {:.0} damage{crit}", name(entry.target), entry.amount));
        }
        for entry in &result.healing {
            parts.push(format!("{} recovers {:.0} health", name(entry.target), entry.amount));
        }
        for change in result.statuses_applied.iter().filter(|c| c.outcome.changed()) {
            parts.push(format!("{} is affected by {}", name(change.target), change.status));
        }
        for (target, status) in &result.statuses_removed {
            parts.push(format!("{status} is lifted from {}", name(*target)));
        }

        if parts.is_empty() {
            result.message.clone()
        } else {
            format!("{}: {}", result.message, parts.join(", "))
        }
    }
}
