//! Request validation: turns an [`ActionRequest`] into a resolved plan or a
//! structured refusal.

use super::CombatEngine;
use crate::action::{ActionFailure, ActionKind, ActionRequest};
use crate::combatant::{Combatant, CombatantId};
use crate::error::CombatError;
use crate::item::ItemDef;
use crate::skill::{SkillDef, TargetType};
use crate::stats::ResourceKind;
use crate::status::StatusTags;

/// A validated action with its targets resolved.
#[derive(Debug)]
pub(super) enum Plan<'r> {
    Attack {
        target: CombatantId,
    },
    Skill {
        skill: &'r SkillDef,
        targets: Vec<CombatantId>,
    },
    Item {
        item: &'r ItemDef,
        targets: Vec<CombatantId>,
    },
    Defend,
    Flee,
    Wait,
}

type Validation<'r> = Result<Plan<'r>, ActionFailure>;

impl<'r> CombatEngine<'r> {
    pub(super) fn validate(&self, request: &ActionRequest) -> Result<Validation<'r>, CombatError> {
        let actor = self.encounter.require(request.actor)?;
        if !actor.is_alive() {
            return Ok(Err(ActionFailure::ActorDead(actor.name.clone())));
        }
        if !actor.can_act() {
            return Ok(Err(ActionFailure::Incapacitated(actor.name.clone())));
        }

        let ruleset = self.ruleset;
        let plan = match &request.kind {
            ActionKind::BasicAttack => self
                .single_target(actor, &request.targets, TargetType::SingleEnemy)
                .map(|target| Plan::Attack { target }),
            ActionKind::UseSkill(id) => {
                let Some(skill) = ruleset.skill(id) else {
                    return Ok(Err(ActionFailure::UnknownSkill(id.clone())));
                };
                check_skill(actor, skill).and_then(|()| {
                    self.resolve_targets(actor, skill.target, skill.max_targets, &request.targets)
                        .map(|targets| Plan::Skill { skill, targets })
                })
            }
            ActionKind::UseItem(id) => {
                let Some(item) = ruleset.item(id) else {
                    return Ok(Err(ActionFailure::UnknownItem(id.clone())));
                };
                if actor.pouch.get(id).copied().unwrap_or_default() == 0 {
                    return Ok(Err(ActionFailure::ItemNotHeld {
                        actor: actor.name.clone(),
                        item: item.name.clone(),
                    }));
                }
                self.resolve_targets(actor, item.target, 1, &request.targets)
                    .map(|targets| Plan::Item { item, targets })
            }
            ActionKind::Defend => Ok(Plan::Defend),
            ActionKind::Flee => Ok(Plan::Flee),
            ActionKind::Wait => Ok(Plan::Wait),
        };
        Ok(plan)
    }

    /// Resolves the target list for a skill or item.
    ///
    /// Single-target kinds use the first requested id; a single-ally action
    /// with no target falls back to the actor. Area kinds ignore the request
    /// and take living combatants in insertion order, up to `limit`.
    fn resolve_targets(
        &self,
        actor: &Combatant,
        target: TargetType,
        limit: u32,
        requested: &[CombatantId],
    ) -> Result<Vec<CombatantId>, ActionFailure> {
        let limit = limit.max(1) as usize;
        match target {
            TargetType::SelfOnly => Ok(vec![actor.id]),
            TargetType::SingleEnemy => self
                .single_target(actor, requested, target)
                .map(|id| vec![id]),
            TargetType::SingleAlly if requested.is_empty() => Ok(vec![actor.id]),
            TargetType::SingleAlly => self
                .single_target(actor, requested, target)
                .map(|id| vec![id]),
            TargetType::AllEnemies => {
                let enemies: Vec<_> = self
                    .encounter
                    .enemies_of(actor.id)
                    .into_iter()
                    .take(limit)
                    .map(|c| c.id)
                    .collect();
                if enemies.is_empty() {
                    Err(ActionFailure::MissingTarget)
                } else {
                    Ok(enemies)
                }
            }
            TargetType::AllAllies => Ok(std::iter::once(actor.id)
                .chain(self.encounter.allies_of(actor.id).into_iter().map(|c| c.id))
                .take(limit)
                .collect()),
        }
    }

    fn single_target(
        &self,
        actor: &Combatant,
        requested: &[CombatantId],
        target: TargetType,
    ) -> Result<CombatantId, ActionFailure> {
        let id = *requested.first().ok_or(ActionFailure::MissingTarget)?;
        let candidate = self
            .encounter
            .participant(id)
            .ok_or(ActionFailure::InvalidTarget(id))?;
        if !candidate.is_alive() {
            return Err(ActionFailure::TargetDead(candidate.name.clone()));
        }
        let same_team = candidate.team == actor.team;
        if target.hostile() == same_team {
            return Err(ActionFailure::WrongTeam(candidate.name.clone()));
        }
        Ok(id)
    }
}

/// Checks everything about a skill that depends only on its caster:
/// knowledge, silence, level and realm gates, cooldown and costs.
pub fn check_skill(actor: &Combatant, skill: &SkillDef) -> Result<(), ActionFailure> {
    if !actor.knows(&skill.id) {
        return Err(ActionFailure::SkillNotKnown {
            actor: actor.name.clone(),
            skill: skill.name.clone(),
        });
    }
    if actor.status.has_tag(StatusTags::SILENCE) {
        return Err(ActionFailure::Silenced(actor.name.clone()));
    }
    if actor.level() < skill.required_level {
        return Err(ActionFailure::LevelTooLow {
            skill: skill.name.clone(),
            required: skill.required_level,
        });
    }
    if let Some(required) = skill.required_realm {
        if actor.realm() < required {
            return Err(ActionFailure::RealmTooLow {
                skill: skill.name.clone(),
                required: required.to_string(),
            });
        }
    }

    let remaining = actor.cooldown(&skill.id);
    if remaining > 0 {
        return Err(ActionFailure::OnCooldown {
            skill: skill.name.clone(),
            rounds: remaining,
        });
    }

    for (resource, needed) in skill.cost.iter() {
        let available = actor.resources.get(resource);
        // A health cost may never be the last of the caster's health.
        let affordable = match resource {
            ResourceKind::Health => available > needed,
            _ => available >= needed,
        };
        if !affordable {
            return Err(ActionFailure::InsufficientResource {
                resource: resource.to_string(),
                needed,
                available,
            });
        }
    }
    Ok(())
}
