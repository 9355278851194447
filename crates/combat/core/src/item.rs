//! Combat consumables.
//!
//! Only the in-fight use of a consumable is modelled here; acquiring and
//! trading items happens outside combat.

use crate::skill::{SkillEffect, TargetType};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    /// `SelfOnly` or `SingleAlly`; consumables never target enemies.
    #[cfg_attr(feature = "serde", serde(default = "self_only"))]
    pub target: TargetType,
    pub effects: Vec<SkillEffect>,
}

#[cfg(feature = "serde")]
fn self_only() -> TargetType {
    TargetType::SelfOnly
}

impl ItemDef {
    pub fn problem(&self) -> Option<String> {
        if self.id.0.trim().is_empty() || self.name.trim().is_empty() {
            return Some("id and name must not be empty".into());
        }
        if !matches!(self.target, TargetType::SelfOnly | TargetType::SingleAlly) {
            return Some("items may only target the user or one ally".into());
        }
        if self.effects.is_empty() {
            return Some("an item needs at least one effect".into());
        }
        if self.effects.iter().any(SkillEffect::is_damaging) {
            return Some("items cannot deal damage".into());
        }
        None
    }
}
