//! Combatants and their identities.

use std::collections::{BTreeMap, BTreeSet};

use crate::cultivation::Realm;
use crate::item::ItemId;
use crate::skill::SkillId;
use crate::stats::{Attribute, AttributeSet, ResourceKind, Resources, StatsSnapshot};
use crate::status::{AddOutcome, EffectSource, StatusEffects, StatusTemplate, TickReport};

/// Stable combatant identifier, unique within an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(pub u32);

impl core::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team tag. Combatants sharing a tag are allies.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl core::fmt::Display for TeamId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// AI temperament of a computer-controlled combatant.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Personality {
    Aggressive,
    Defensive,
    #[default]
    Balanced,
}

/// Running totals kept for the post-combat summary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatRecord {
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub healing_done: f64,
    pub defeated: u32,
}

/// A participant in combat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub team: TeamId,
    pub attributes: AttributeSet,
    pub resources: Resources,
    pub status: StatusEffects,
    /// `None` means the combatant is driven by an external provider.
    pub personality: Option<Personality>,
    pub skills: Vec<SkillId>,
    /// Own turns left before a skill can be used again. Zero entries are dropped.
    pub cooldowns: BTreeMap<SkillId, u32>,
    /// Cooldowns started during the turn in progress. The tick that closes
    /// that turn leaves them alone.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fresh_cooldowns: BTreeSet<SkillId>,
    pub karma: i64,
    /// Consumables carried into the fight.
    pub pouch: BTreeMap<ItemId, u32>,
    pub record: CombatRecord,
}

impl Combatant {
    /// A combatant at full resources.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        team: TeamId,
        attributes: AttributeSet,
    ) -> Self {
        let resources = Resources::full(&attributes.snapshot());
        Self {
            id,
            name: name.into(),
            team,
            attributes,
            resources,
            status: StatusEffects::new(),
            personality: None,
            skills: Vec::new(),
            cooldowns: BTreeMap::new(),
            fresh_cooldowns: BTreeSet::new(),
            karma: 0,
            pouch: BTreeMap::new(),
            record: CombatRecord::default(),
        }
    }

    #[must_use]
    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = Some(personality);
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<SkillId>) -> Self {
        self.skills.push(skill.into());
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<ItemId>, count: u32) -> Self {
        *self.pouch.entry(item.into()).or_default() += count;
        self
    }

    /// Every attribute with temporary modifiers and status effects folded in.
    pub fn stats(&self) -> StatsSnapshot {
        self.attributes.snapshot_with(&self.status)
    }

    pub fn attribute(&self, attribute: Attribute) -> f64 {
        self.stats().get(attribute)
    }

    pub fn realm(&self) -> Realm {
        self.attributes.realm
    }

    pub fn level(&self) -> u32 {
        self.attributes.base.cultivation_level
    }

    pub fn is_alive(&self) -> bool {
        self.resources.health > 0.0
    }

    /// Alive and not stunned or frozen.
    pub fn can_act(&self) -> bool {
        self.is_alive() && !self.status.prevents_action()
    }

    pub fn fraction(&self, kind: ResourceKind) -> f64 {
        self.resources.fraction(kind, &self.stats())
    }

    pub fn health_fraction(&self) -> f64 {
        self.fraction(ResourceKind::Health)
    }

    /// Removes health, never below zero. Returns the amount actually lost.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let before = self.resources.health;
        self.resources.health = (before - amount.max(0.0)).max(0.0);
        let lost = before - self.resources.health;
        self.record.damage_taken += lost;
        lost
    }

    /// Removes health but leaves at least one point. Returns the amount lost.
    pub fn take_damage_nonlethal(&mut self, amount: f64) -> f64 {
        let before = self.resources.health;
        self.resources.health = (before - amount.max(0.0)).max(1.0_f64.min(before));
        let lost = before - self.resources.health;
        self.record.damage_taken += lost;
        lost
    }

    /// Restores a resource up to its maximum. Returns the amount restored.
    pub fn restore(&mut self, kind: ResourceKind, amount: f64) -> f64 {
        let stats = self.stats();
        let before = self.resources.get(kind);
        self.resources.set(kind, before + amount.max(0.0), &stats);
        self.resources.get(kind) - before
    }

    pub fn has_resource(&self, kind: ResourceKind, amount: f64) -> bool {
        self.resources.get(kind) >= amount
    }

    /// Deducts a cost without any check; callers validate first.
    pub fn spend(&mut self, kind: ResourceKind, amount: f64) {
        let stats = self.stats();
        let before = self.resources.get(kind);
        self.resources.set(kind, before - amount.max(0.0), &stats);
    }

    /// Instantiates `template` against current stats and merges it in.
    pub fn apply_status(&mut self, template: &StatusTemplate, source: EffectSource) -> AddOutcome {
        let effect = template.instantiate(&self.stats(), source);
        let outcome = self.status.add(effect);
        self.resources.clamp_to(&self.stats());
        outcome
    }

    /// Ticks status effects and applies their periodic damage and healing.
    ///
    /// Damage lands before healing, so a lethal tick kills even if a heal
    /// would have fired on the same tick.
    pub fn tick_status(&mut self) -> TickReport {
        let report = self.status.tick();
        if report.damage > 0.0 {
            self.take_damage(report.damage);
        }
        if report.healing > 0.0 && self.is_alive() {
            self.restore(ResourceKind::Health, report.healing);
        }
        self.resources.clamp_to(&self.stats());
        report
    }

    pub fn knows(&self, skill: &SkillId) -> bool {
        self.skills.contains(skill)
    }

    pub fn cooldown(&self, skill: &SkillId) -> u32 {
        self.cooldowns.get(skill).copied().unwrap_or_default()
    }

    /// Blocks `skill` for the combatant's next `turns` turns.
    pub fn start_cooldown(&mut self, skill: &SkillId, turns: u32) {
        if turns > 0 {
            self.cooldowns.insert(skill.clone(), turns);
            self.fresh_cooldowns.insert(skill.clone());
        }
    }

    /// Closes one of the combatant's turns: every cooldown not started during
    /// it drops by one.
    pub fn tick_cooldowns(&mut self) {
        let fresh = std::mem::take(&mut self.fresh_cooldowns);
        self.cooldowns.retain(|skill, turns| {
            if !fresh.contains(skill) {
                *turns = turns.saturating_sub(1);
            }
            *turns > 0
        });
    }

    /// Takes one consumable from the pouch. Returns false if none is held.
    pub fn take_item(&mut self, item: &ItemId) -> bool {
        match self.pouch.get_mut(item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.pouch.remove(item);
                }
                true
            }
            _ => false,
        }
    }
}
