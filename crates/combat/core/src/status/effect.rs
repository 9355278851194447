//! A single active status effect.

use crate::combatant::CombatantId;
use crate::skill::SkillId;
use crate::stats::Attribute;

bitflags::bitflags! {
    /// Behavioral tags carried by a status effect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct StatusTags: u16 {
        /// Cannot act.
        const STUN = 1 << 0;
        /// Cannot act.
        const FREEZE = 1 << 1;
        /// Cannot use skills.
        const SILENCE = 1 << 2;
        const DEFENDING = 1 << 3;
        const TRIBULATION = 1 << 4;
        const POISON = 1 << 5;
        const BURN = 1 << 6;
        const SHIELD = 1 << 7;
    }
}

impl StatusTags {
    pub const INCAPACITATING: StatusTags = StatusTags::STUN.union(StatusTags::FREEZE);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    Buff,
    Debuff,
    DamageOverTime,
    HealOverTime,
    Control,
    Special,
}

impl StatusKind {
    /// Harmful kinds, the ones a cleanse may remove.
    pub const fn is_harmful(self) -> bool {
        matches!(
            self,
            StatusKind::Debuff | StatusKind::DamageOverTime | StatusKind::Control
        )
    }
}

/// Remaining or configured lifetime. Configuration writes `-1` for permanent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i32", into = "i32"))]
pub enum EffectDuration {
    Rounds(u32),
    Permanent,
}

impl From<i32> for EffectDuration {
    fn from(value: i32) -> Self {
        u32::try_from(value).map_or(EffectDuration::Permanent, EffectDuration::Rounds)
    }
}

impl From<EffectDuration> for i32 {
    fn from(value: EffectDuration) -> Self {
        match value {
            EffectDuration::Rounds(rounds) => i32::try_from(rounds).unwrap_or(i32::MAX),
            EffectDuration::Permanent => -1,
        }
    }
}

/// How a second application of a same-named effect is merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackingPolicy {
    /// Keep whichever has the larger magnitude; never duplicate.
    NoStack,
    /// Reset the remaining duration; discard the newcomer.
    #[default]
    RefreshDuration,
    /// Increment the stack count up to `max_stacks`; modifiers scale with it.
    StackIntensity { max_stacks: u32 },
    /// Every application is a separate instance.
    Independent,
}

/// Flat per-stack delta on one attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub attribute: Attribute,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeriodicEffect {
    Damage,
    Heal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeriodicTrigger {
    /// Every tick, before the duration decrements.
    #[default]
    EveryTick,
    /// Once, on the tick the effect expires.
    OnExpire,
}

/// Resolved per-stack periodic amount.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Periodic {
    pub effect: PeriodicEffect,
    pub amount: f64,
    pub trigger: PeriodicTrigger,
}

/// Who or what applied an effect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSource {
    pub combatant: Option<CombatantId>,
    pub skill: Option<SkillId>,
}

impl EffectSource {
    pub fn combatant(id: CombatantId) -> Self {
        Self {
            combatant: Some(id),
            skill: None,
        }
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillId) -> Self {
        self.skill = Some(skill);
        self
    }
}

/// An active status effect. Effects are matched by `name` when stacking.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: String,
    pub name: String,
    pub kind: StatusKind,
    pub modifiers: Vec<StatModifier>,
    pub periodic: Option<Periodic>,
    /// Configured duration, restored on refresh.
    pub duration: EffectDuration,
    pub remaining: EffectDuration,
    pub stacking: StackingPolicy,
    pub stacks: u32,
    pub source: EffectSource,
    pub dispellable: bool,
    pub tags: StatusTags,
}

impl StatusEffect {
    /// Effective delta on `attribute`: base modifier × stack count.
    pub fn modifier_for(&self, attribute: Attribute) -> f64 {
        let per_stack: f64 = self
            .modifiers
            .iter()
            .filter(|m| m.attribute == attribute)
            .map(|m| m.value)
            .sum();
        per_stack * f64::from(self.stacks)
    }

    /// Strength used to pick a winner between two non-stacking applications.
    pub fn magnitude(&self) -> f64 {
        let modifiers: f64 = self.modifiers.iter().map(|m| m.value.abs()).sum();
        let periodic = self.periodic.map_or(0.0, |p| p.amount.abs());
        (modifiers + periodic) * f64::from(self.stacks)
    }

    pub fn is_permanent(&self) -> bool {
        self.remaining == EffectDuration::Permanent
    }

    pub fn prevents_action(&self) -> bool {
        self.tags.intersects(StatusTags::INCAPACITATING)
    }
}
