//! Action nodes for AI behavior trees.
//!
//! Each node proposes at most one [`Decision`]. Priorities only matter where
//! a sequence has to pick between several proposals.

use combat_core::{ActionRequest, CombatantId, Personality, SkillKind, TargetType};

use crate::providers::ai::{Decision, DecisionContext, ItemOption, SkillOption};

pub const FLEE_PRIORITY: f64 = 90.0;
pub const HEAL_SELF_PRIORITY: f64 = 80.0;
pub const HEAL_ALLY_PRIORITY: f64 = 70.0;
pub const AREA_STRIKE_PRIORITY: f64 = 55.0;
pub const CLEANSE_PRIORITY: f64 = 55.0;
pub const STRIKE_PRIORITY: f64 = 50.0;
pub const RESTORE_MANA_PRIORITY: f64 = 50.0;
pub const BUFF_PRIORITY: f64 = 45.0;
pub const DISRUPT_PRIORITY: f64 = 40.0;
pub const DEFEND_PRIORITY: f64 = 20.0;
pub const ATTACK_PRIORITY: f64 = 10.0;

/// Items cost a turn and a pill, so they rank just below the matching skill.
const ITEM_DISCOUNT: f64 = 5.0;

pub fn flee(ctx: &DecisionContext) -> Option<Decision> {
    Some(Decision::new(
        ActionRequest::flee(ctx.id()),
        FLEE_PRIORITY,
        format!("{} is too wounded to fight on", ctx.actor.name),
    ))
}

pub fn defend(ctx: &DecisionContext) -> Option<Decision> {
    Some(Decision::new(
        ActionRequest::defend(ctx.id()),
        DEFEND_PRIORITY,
        "bracing for the next blow",
    ))
}

pub fn basic_attack(ctx: &DecisionContext) -> Option<Decision> {
    let target = ctx.target()?;
    Some(Decision::new(
        ActionRequest::attack(ctx.id(), target),
        ATTACK_PRIORITY,
        format!("plain strike at {}", name_of(ctx, target)),
    ))
}

pub fn heal_self(ctx: &DecisionContext) -> Option<Decision> {
    let me = ctx.id();
    if let Some(skill) = best_skill(ctx, |s| s.effects.healing, |s| reaches_self(s.target)) {
        return Some(Decision::new(
            skill_request(me, skill, me),
            HEAL_SELF_PRIORITY,
            format!("{} to recover", skill.name),
        ));
    }
    let item = best_item(ctx, |i| i.effects.healing)?;
    Some(Decision::new(
        ActionRequest::item(me, item.id.clone(), vec![me]),
        HEAL_SELF_PRIORITY - ITEM_DISCOUNT,
        format!("swallows a {}", item.name),
    ))
}

pub fn heal_ally(ctx: &DecisionContext) -> Option<Decision> {
    let me = ctx.id();
    let ally = *ctx.injured_allies.first()?;
    let reason = |what: &str| format!("{what} for the wounded {}", name_of(ctx, ally));

    if let Some(skill) = best_skill(ctx, |s| s.effects.healing, |s| reaches_ally(s.target)) {
        return Some(Decision::new(
            skill_request(me, skill, ally),
            HEAL_ALLY_PRIORITY,
            reason(&skill.name),
        ));
    }
    let item = best_item(ctx, |i| if i.target == TargetType::SingleAlly { i.effects.healing } else { 0.0 })?;
    Some(Decision::new(
        ActionRequest::item(me, item.id.clone(), vec![ally]),
        HEAL_ALLY_PRIORITY - ITEM_DISCOUNT,
        reason(&item.name),
    ))
}

pub fn cleanse(ctx: &DecisionContext) -> Option<Decision> {
    let me = ctx.id();
    let patient = if ctx.actor.afflicted {
        me
    } else {
        ctx.allies.iter().find(|ally| ally.afflicted)?.id
    };
    let fits = |target: TargetType| {
        if patient == me {
            reaches_self(target)
        } else {
            reaches_ally(target)
        }
    };
    let reason = |what: &str| format!("{what} to purge {}", name_of(ctx, patient));

    if let Some(skill) = ctx.skills.iter().find(|s| s.effects.cleanses && fits(s.target)) {
        return Some(Decision::new(
            skill_request(me, skill, patient),
            CLEANSE_PRIORITY,
            reason(&skill.name),
        ));
    }
    let item = ctx
        .items
        .iter()
        .find(|i| i.effects.cleanses && fits(i.target))?;
    Some(Decision::new(
        ActionRequest::item(me, item.id.clone(), vec![patient]),
        CLEANSE_PRIORITY - ITEM_DISCOUNT,
        reason(&item.name),
    ))
}

pub fn restore_mana(ctx: &DecisionContext) -> Option<Decision> {
    let me = ctx.id();
    if let Some(skill) = best_skill(ctx, |s| s.effects.mana, |s| reaches_self(s.target)) {
        return Some(Decision::new(
            skill_request(me, skill, me),
            RESTORE_MANA_PRIORITY,
            format!("{} to refill the dantian", skill.name),
        ));
    }
    let item = best_item(ctx, |i| i.effects.mana)?;
    Some(Decision::new(
        ActionRequest::item(me, item.id.clone(), vec![me]),
        RESTORE_MANA_PRIORITY - ITEM_DISCOUNT,
        format!("swallows a {}", item.name),
    ))
}

/// Casts a self buff the actor does not already carry.
pub fn buff_self(ctx: &DecisionContext) -> Option<Decision> {
    let skill = ctx.skills.iter().find(|s| {
        s.kind == SkillKind::Buff
            && reaches_self(s.target)
            && s.effects.grants.iter().any(|status| !ctx.has_status(status))
    })?;
    Some(Decision::new(
        skill_request(ctx.id(), skill, ctx.id()),
        BUFF_PRIORITY,
        format!("{} before the exchange", skill.name),
    ))
}

/// Control or debuff on the strategy's target, unless it is already suffering
/// everything the skill could inflict.
pub fn disrupt(ctx: &DecisionContext) -> Option<Decision> {
    let target = ctx.target()?;
    let view = ctx.enemy(target)?;
    let skill = ctx.skills.iter().find(|s| {
        matches!(s.kind, SkillKind::Control | SkillKind::Debuff)
            && s.target.hostile()
            && allowed(ctx, s)
            && area_is_clear(ctx, s)
            && s.effects.grants.iter().any(|status| !view.statuses.contains(status))
    })?;
    Some(Decision::new(
        skill_request(ctx.id(), skill, target),
        DISRUPT_PRIORITY,
        format!("{} to hamper {}", skill.name, view.name),
    ))
}

/// Strongest single-target damage technique against the strategy's target.
pub fn strike(ctx: &DecisionContext) -> Option<Decision> {
    let target = ctx.target()?;
    let skill = best_skill(ctx, |s| s.effects.damage, |s| {
        s.target == TargetType::SingleEnemy && allowed(ctx, s)
    })?;
    Some(Decision::new(
        skill_request(ctx.id(), skill, target),
        STRIKE_PRIORITY,
        format!("{} at {}", skill.name, name_of(ctx, target)),
    ))
}

/// Area damage when it would catch at least two enemies.
pub fn area_strike(ctx: &DecisionContext) -> Option<Decision> {
    if ctx.targets().count() < 2 {
        return None;
    }
    let skill = best_skill(ctx, |s| s.effects.damage, |s| {
        s.target == TargetType::AllEnemies && allowed(ctx, s) && area_is_clear(ctx, s)
    })?;
    Some(Decision::new(
        skill_request(ctx.id(), skill, ctx.id()),
        AREA_STRIKE_PRIORITY,
        format!("{} across the enemy line", skill.name),
    ))
}

// ============================================================================
// Helpers
// ============================================================================

fn reaches_self(target: TargetType) -> bool {
    matches!(
        target,
        TargetType::SelfOnly | TargetType::SingleAlly | TargetType::AllAllies
    )
}

fn reaches_ally(target: TargetType) -> bool {
    matches!(target, TargetType::SingleAlly | TargetType::AllAllies)
}

/// Only aggressive cultivators risk heaven's backlash.
fn allowed(ctx: &DecisionContext, skill: &SkillOption) -> bool {
    !skill.forbidden || ctx.personality == Personality::Aggressive
}

/// An area skill also hits protected enemies, which heaven would refuse.
fn area_is_clear(ctx: &DecisionContext, skill: &SkillOption) -> bool {
    skill.target != TargetType::AllEnemies || ctx.protected.is_empty()
}

/// Builds a skill request aimed at `target`; implicit target kinds send none.
fn skill_request(actor: CombatantId, skill: &SkillOption, target: CombatantId) -> ActionRequest {
    let targets = if skill.target.implicit() {
        Vec::new()
    } else {
        vec![target]
    };
    ActionRequest::skill(actor, skill.id.clone(), targets)
}

/// The matching skill with the largest positive `value`, first on ties.
fn best_skill<'a>(
    ctx: &'a DecisionContext,
    value: impl Fn(&SkillOption) -> f64,
    filter: impl Fn(&SkillOption) -> bool,
) -> Option<&'a SkillOption> {
    ctx.skills
        .iter()
        .filter(|skill| filter(*skill) && value(*skill) > 0.0)
        .fold(None, |best: Option<&SkillOption>, skill| match best {
            Some(top) if value(top) >= value(skill) => Some(top),
            _ => Some(skill),
        })
}

fn best_item<'a>(ctx: &'a DecisionContext, value: impl Fn(&ItemOption) -> f64) -> Option<&'a ItemOption> {
    ctx.items
        .iter()
        .filter(|item| value(*item) > 0.0)
        .fold(None, |best: Option<&ItemOption>, item| match best {
            Some(top) if value(top) >= value(item) => Some(top),
            _ => Some(item),
        })
}

fn name_of(ctx: &DecisionContext, id: CombatantId) -> String {
    ctx.enemy(id)
        .or_else(|| ctx.ally(id))
        .map_or_else(|| ctx.actor.name.clone(), |view| view.name.clone())
}
