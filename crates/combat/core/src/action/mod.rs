//! Action requests and their results.

pub mod result;

pub use result::{
    ActionFailure, ActionOutcome, ActionResult, DamageEntry, HealEntry, StatusChange,
};

use crate::combatant::CombatantId;
use crate::item::ItemId;
use crate::skill::SkillId;

#[derive(Clone, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    BasicAttack,
    UseSkill(SkillId),
    Defend,
    UseItem(ItemId),
    Flee,
    Wait,
}

/// One turn's worth of intent, already structured.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub actor: CombatantId,
    pub kind: ActionKind,
    pub targets: Vec<CombatantId>,
}

impl ActionRequest {
    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self {
            actor,
            kind: ActionKind::BasicAttack,
            targets: vec![target],
        }
    }

    pub fn skill(actor: CombatantId, skill: impl Into<SkillId>, targets: Vec<CombatantId>) -> Self {
        Self {
            actor,
            kind: ActionKind::UseSkill(skill.into()),
            targets,
        }
    }

    pub fn item(actor: CombatantId, item: impl Into<ItemId>, targets: Vec<CombatantId>) -> Self {
        Self {
            actor,
            kind: ActionKind::UseItem(item.into()),
            targets,
        }
    }

    pub fn defend(actor: CombatantId) -> Self {
        Self::bare(actor, ActionKind::Defend)
    }

    pub fn flee(actor: CombatantId) -> Self {
        Self::bare(actor, ActionKind::Flee)
    }

    pub fn wait(actor: CombatantId) -> Self {
        Self::bare(actor, ActionKind::Wait)
    }

    fn bare(actor: CombatantId, kind: ActionKind) -> Self {
        Self {
            actor,
            kind,
            targets: Vec::new(),
        }
    }
}
