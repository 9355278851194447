//! Decision context: an owned, read-only picture of the fight as one
//! combatant sees it.
//!
//! The context is built fresh for every decision so tree nodes never touch
//! the encounter directly.

use combat_core::skill::FormulaContext;
use combat_core::{
    CombatEngine, Combatant, CombatantId, ItemId, Personality, Ruleset, SkillDef, SkillEffect,
    SkillId, SkillKind, TargetType, check_skill,
};

use super::config::AiConfig;
use super::threat::{ThreatInfo, evaluate_threats};
use crate::api::{Result, RuntimeError};

/// Skills `combatant` could cast right now, in the order it learned them.
pub fn usable_skills<'a>(
    combatant: &'a Combatant,
    ruleset: &'a Ruleset,
) -> impl Iterator<Item = &'a SkillDef> + 'a {
    combatant
        .skills
        .iter()
        .filter_map(|id| ruleset.skill(id))
        .filter(|skill| check_skill(combatant, skill).is_ok())
}

/// Another combatant as seen by the decider.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub health: f64,
    pub health_fraction: f64,
    pub mana_fraction: f64,
    pub attack_power: f64,
    pub damage_dealt: f64,
    /// Has a heal or buff technique ready.
    pub supportive: bool,
    /// Carries a harmful effect a cleanse would remove.
    pub afflicted: bool,
    pub statuses: Vec<String>,
}

impl CombatantView {
    pub fn new(combatant: &Combatant, ruleset: &Ruleset) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name.clone(),
            health: combatant.resources.health,
            health_fraction: combatant.health_fraction(),
            mana_fraction: combatant.fraction(combat_core::ResourceKind::Mana),
            attack_power: combatant.stats().derived.attack_power,
            damage_dealt: combatant.record.damage_dealt,
            supportive: usable_skills(combatant, ruleset)
                .any(|skill| skill.heals() || skill.kind == SkillKind::Buff),
            afflicted: combatant
                .status
                .iter()
                .any(|effect| effect.dispellable && effect.kind.is_harmful()),
            statuses: combatant.status.iter().map(|effect| effect.id.clone()).collect(),
        }
    }
}

/// Rough output of an effect list, evaluated with the user on both sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectSummary {
    pub damage: f64,
    pub healing: f64,
    pub mana: f64,
    pub cleanses: bool,
    /// Status template ids the effects may apply.
    pub grants: Vec<String>,
}

impl EffectSummary {
    fn of(effects: &[SkillEffect], ctx: &FormulaContext<'_>) -> Self {
        let mut summary = Self::default();
        for effect in effects {
            match effect {
                SkillEffect::Damage { formula, .. } => summary.damage += formula.evaluate(ctx),
                SkillEffect::Heal { formula } => summary.healing += formula.evaluate(ctx),
                SkillEffect::RestoreMana { formula } => summary.mana += formula.evaluate(ctx),
                SkillEffect::ApplyStatus { status, .. } => summary.grants.push(status.clone()),
                SkillEffect::Cleanse => summary.cleanses = true,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillOption {
    pub id: SkillId,
    pub name: String,
    pub kind: SkillKind,
    pub target: TargetType,
    /// Heaven punishes this technique on every use.
    pub forbidden: bool,
    pub effects: EffectSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemOption {
    pub id: ItemId,
    pub name: String,
    pub target: TargetType,
    pub effects: EffectSummary,
}

/// Everything a personality tree may look at.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    pub actor: CombatantView,
    pub personality: Personality,
    pub threats: Vec<ThreatInfo>,
    /// Usable skills: known, off cooldown, affordable and not silenced.
    pub skills: Vec<SkillOption>,
    pub items: Vec<ItemOption>,
    /// Living allies, excluding the actor.
    pub allies: Vec<CombatantView>,
    /// Living enemies in encounter order.
    pub enemies: Vec<CombatantView>,
    /// Allies below the injury threshold, most wounded first.
    pub injured_allies: Vec<CombatantId>,
    /// Enemies a strike on which heaven would intercept.
    pub protected: Vec<CombatantId>,
    pub config: AiConfig,
}

impl DecisionContext {
    pub fn build(engine: &CombatEngine<'_>, actor_id: CombatantId, config: &AiConfig) -> Result<Self> {
        let encounter = engine.encounter();
        let ruleset = engine.ruleset();
        let actor = encounter
            .participant(actor_id)
            .ok_or(RuntimeError::UnknownCombatant(actor_id))?;

        let enemies = encounter.enemies_of(actor_id);
        let allies = encounter.allies_of(actor_id);
        let threats = evaluate_threats(actor, &enemies, ruleset, config);
        let protected = enemies
            .iter()
            .filter(|enemy| ruleset.laws().forbids_strike(actor, enemy))
            .map(|enemy| enemy.id)
            .collect();

        let stats = actor.stats();
        let formula_ctx = FormulaContext::reflexive(&stats, actor);
        let forbidden_arts = &ruleset.laws().laws().forbidden_arts;
        let skills = usable_skills(actor, ruleset)
            .map(|skill| SkillOption {
                id: skill.id.clone(),
                name: skill.name.clone(),
                kind: skill.kind,
                target: skill.target,
                forbidden: forbidden_arts.enabled
                    && forbidden_arts.params.techniques.contains(&skill.name),
                effects: EffectSummary::of(&skill.effects, &formula_ctx),
            })
            .collect();
        let items = actor
            .pouch
            .iter()
            .filter(|(_, count)| **count > 0)
            .filter_map(|(id, _)| ruleset.item(id))
            .map(|item| ItemOption {
                id: item.id.clone(),
                name: item.name.clone(),
                target: item.target,
                effects: EffectSummary::of(&item.effects, &formula_ctx),
            })
            .collect();

        let allies: Vec<CombatantView> = allies
            .iter()
            .map(|ally| CombatantView::new(ally, ruleset))
            .collect();
        let mut injured: Vec<&CombatantView> = allies
            .iter()
            .filter(|ally| ally.health_fraction < config.injured_ally)
            .collect();
        injured.sort_by(|a, b| a.health_fraction.total_cmp(&b.health_fraction));
        let injured_allies = injured.iter().map(|ally| ally.id).collect();

        Ok(Self {
            actor: CombatantView::new(actor, ruleset),
            personality: actor.personality.unwrap_or_default(),
            threats,
            skills,
            items,
            allies,
            enemies: enemies
                .iter()
                .map(|enemy| CombatantView::new(enemy, ruleset))
                .collect(),
            injured_allies,
            protected,
            config: config.clone(),
        })
    }

    pub fn id(&self) -> CombatantId {
        self.actor.id
    }

    pub fn health(&self) -> f64 {
        self.actor.health_fraction
    }

    pub fn mana(&self) -> f64 {
        self.actor.mana_fraction
    }

    pub fn can_target(&self, id: CombatantId) -> bool {
        !self.protected.contains(&id) && self.enemy(id).is_some()
    }

    /// Enemies the actor may strike without heaven intervening.
    pub fn targets(&self) -> impl Iterator<Item = &CombatantView> {
        self.enemies
            .iter()
            .filter(|enemy| !self.protected.contains(&enemy.id))
    }

    pub fn enemy(&self, id: CombatantId) -> Option<&CombatantView> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn ally(&self, id: CombatantId) -> Option<&CombatantView> {
        self.allies.iter().find(|ally| ally.id == id)
    }

    /// Target chosen by the configured strategy.
    pub fn target(&self) -> Option<CombatantId> {
        self.config.strategy.select(self)
    }

    /// More enemies than allies, counting the actor.
    pub fn outnumbered(&self) -> bool {
        self.enemies.len() > self.allies.len() + 1
    }

    pub fn has_status(&self, id: &str) -> bool {
        self.actor.statuses.iter().any(|status| status == id)
    }
}
