//! Skill definitions.
//!
//! A skill is a costed, cooled-down bundle of [`SkillEffect`]s applied in order
//! to every resolved target. Items reuse the same effect machinery.

pub mod formula;

pub use formula::{Formula, FormulaContext, FormulaError};

use crate::cultivation::{Element, Realm};
use crate::stats::ResourceKind;

/// Skill identifier as written in content.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub String);

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl core::fmt::Display for SkillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broad purpose of a skill, used by AI classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkillKind {
    Attack,
    Heal,
    Buff,
    Debuff,
    Control,
    Support,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    SelfOnly,
    #[default]
    SingleEnemy,
    SingleAlly,
    AllEnemies,
    AllAllies,
}

impl TargetType {
    pub const fn hostile(self) -> bool {
        matches!(self, TargetType::SingleEnemy | TargetType::AllEnemies)
    }

    /// Targets are chosen by the engine rather than the request.
    pub const fn implicit(self) -> bool {
        matches!(
            self,
            TargetType::SelfOnly | TargetType::AllEnemies | TargetType::AllAllies
        )
    }
}

/// Mitigation path for skill damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageType {
    /// Reduced by a fraction of defense.
    #[default]
    Physical,
    /// Reduced by magic resistance.
    Magical,
    /// Ignores mitigation.
    True,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillCost {
    pub mana: f64,
    pub stamina: f64,
    /// Paid from health; the caster must keep more than this much.
    pub health: f64,
}

impl SkillCost {
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, f64)> {
        [
            (ResourceKind::Mana, self.mana),
            (ResourceKind::Stamina, self.stamina),
            (ResourceKind::Health, self.health),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
    }
}

/// One step of a skill or item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    Damage {
        formula: Formula,
        #[cfg_attr(feature = "serde", serde(default))]
        damage_type: DamageType,
    },
    Heal {
        formula: Formula,
    },
    RestoreMana {
        formula: Formula,
    },
    ApplyStatus {
        status: String,
        #[cfg_attr(feature = "serde", serde(default = "always"))]
        chance: f64,
        /// Apply to the user instead of each target.
        #[cfg_attr(feature = "serde", serde(default))]
        on_self: bool,
    },
    /// Removes dispellable harmful effects from each target.
    Cleanse,
}

#[cfg(feature = "serde")]
fn always() -> f64 {
    1.0
}

impl SkillEffect {
    pub fn is_damaging(&self) -> bool {
        matches!(self, SkillEffect::Damage { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    pub kind: SkillKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetType,
    /// Cap on resolved targets for area skills.
    #[cfg_attr(feature = "serde", serde(default = "one_target"))]
    pub max_targets: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: SkillCost,
    /// Rounds before the skill is usable again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
    pub effects: Vec<SkillEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_realm: Option<Realm>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

#[cfg(feature = "serde")]
fn one_target() -> u32 {
    1
}

impl SkillDef {
    pub fn is_damaging(&self) -> bool {
        self.effects.iter().any(SkillEffect::is_damaging)
    }

    pub fn heals(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, SkillEffect::Heal { .. }))
    }

    /// Control or debuff skills make their owner more threatening.
    pub fn is_disruptive(&self) -> bool {
        matches!(self.kind, SkillKind::Control | SkillKind::Debuff)
    }

    /// Describes the first problem with this definition that does not need
    /// the rest of the ruleset to detect.
    pub fn problem(&self) -> Option<String> {
        if self.id.0.trim().is_empty() || self.name.trim().is_empty() {
            return Some("id and name must not be empty".into());
        }
        if self.effects.is_empty() {
            return Some("a skill needs at least one effect".into());
        }
        if self.max_targets == 0 {
            return Some("max_targets must be at least 1".into());
        }
        if self.cost.iter().any(|(_, amount)| !amount.is_finite()) {
            return Some("costs must be finite".into());
        }
        for effect in &self.effects {
            if let SkillEffect::ApplyStatus { chance, .. } = effect {
                if !(0.0..=1.0).contains(chance) {
                    return Some(format!("status chance {chance} is outside [0, 1]"));
                }
            }
        }
        None
    }
}
