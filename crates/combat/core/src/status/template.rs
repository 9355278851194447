//! Status templates: the configured form of an effect, before it has a holder.

use super::effect::{
    EffectDuration, EffectSource, Periodic, PeriodicEffect, PeriodicTrigger, StackingPolicy,
    StatModifier, StatusEffect, StatusKind, StatusTags,
};
use crate::stats::{Attribute, StatsSnapshot};

/// Template id of the effect granted by the defend action.
pub const DEFENDING: &str = "defending";
/// Template id of the burn left behind by a heavenly tribulation.
pub const SCORCHED: &str = "scorched";

/// Modifier as written in content. `percentage` values are fractions of the
/// holder's current attribute value (`-0.2` = -20%).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSpec {
    pub attribute: Attribute,
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub percentage: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeriodicAmount {
    Flat(f64),
    /// Fraction of the holder's max health at application time.
    MaxHealthFraction(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodicSpec {
    pub effect: PeriodicEffect,
    pub amount: PeriodicAmount,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trigger: PeriodicTrigger,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTemplate {
    pub id: String,
    pub name: String,
    pub kind: StatusKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<ModifierSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub periodic: Option<PeriodicSpec>,
    pub duration: EffectDuration,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacking: StackingPolicy,
    #[cfg_attr(feature = "serde", serde(default = "dispellable_by_default"))]
    pub dispellable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: StatusTags,
}

#[cfg(feature = "serde")]
fn dispellable_by_default() -> bool {
    true
}

impl StatusTemplate {
    /// Builds a live effect for a holder whose current stats are `holder`.
    ///
    /// Percentage modifiers and max-health periodic amounts are converted to
    /// flat values here and never rescaled afterwards.
    pub fn instantiate(&self, holder: &StatsSnapshot, source: EffectSource) -> StatusEffect {
        let modifiers = self
            .modifiers
            .iter()
            .map(|spec| StatModifier {
                attribute: spec.attribute,
                value: if spec.percentage {
                    holder.get(spec.attribute) * spec.value
                } else {
                    spec.value
                },
            })
            .collect();

        let periodic = self.periodic.map(|spec| Periodic {
            effect: spec.effect,
            amount: match spec.amount {
                PeriodicAmount::Flat(amount) => amount,
                PeriodicAmount::MaxHealthFraction(fraction) => {
                    holder.derived.max_health * fraction
                }
            },
            trigger: spec.trigger,
        });

        StatusEffect {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            modifiers,
            periodic,
            duration: self.duration,
            remaining: self.duration,
            stacking: self.stacking,
            stacks: 1,
            source,
            dispellable: self.dispellable,
            tags: self.tags,
        }
    }

    /// Describes the first problem with this template, if any.
    pub fn problem(&self) -> Option<String> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Some("id and name must not be empty".into());
        }
        if let StackingPolicy::StackIntensity { max_stacks: 0 } = self.stacking {
            return Some("max_stacks must be at least 1".into());
        }
        if self.modifiers.iter().any(|m| !m.value.is_finite()) {
            return Some("modifier values must be finite".into());
        }
        if let Some(spec) = self.periodic {
            let amount = match spec.amount {
                PeriodicAmount::Flat(amount) | PeriodicAmount::MaxHealthFraction(amount) => amount,
            };
            if !amount.is_finite() || amount < 0.0 {
                return Some("periodic amount must be a non-negative number".into());
            }
        }
        None
    }

    /// One-round defense boost granted by the defend action.
    pub fn defending(bonus: f64) -> Self {
        Self {
            id: DEFENDING.into(),
            name: "防御".into(),
            kind: StatusKind::Buff,
            modifiers: vec![ModifierSpec {
                attribute: Attribute::Defense,
                value: bonus,
                percentage: true,
            }],
            periodic: None,
            duration: EffectDuration::Rounds(1),
            stacking: StackingPolicy::RefreshDuration,
            dispellable: false,
            tags: StatusTags::DEFENDING,
        }
    }

    /// Lingering lightning burn: -20% attack power, defense and agility.
    pub fn scorched() -> Self {
        let weaken = |attribute| ModifierSpec {
            attribute,
            value: -0.2,
            percentage: true,
        };
        Self {
            id: SCORCHED.into(),
            name: "天雷灼伤".into(),
            kind: StatusKind::Debuff,
            modifiers: vec![
                weaken(Attribute::AttackPower),
                weaken(Attribute::Defense),
                weaken(Attribute::Agility),
            ],
            periodic: None,
            duration: EffectDuration::Rounds(10),
            stacking: StackingPolicy::RefreshDuration,
            dispellable: true,
            tags: StatusTags::TRIBULATION,
        }
    }
}
