//! Result records produced by action execution.

use crate::combatant::CombatantId;
use crate::error::{ErrorSeverity, GameError};
use crate::item::ItemId;
use crate::skill::SkillId;
use crate::status::AddOutcome;

/// Why an action was refused. These are player-facing, never panics.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionFailure {
    #[error("{0} has fallen and cannot act")]
    ActorDead(String),

    #[error("{0} is incapacitated and cannot act")]
    Incapacitated(String),

    #[error("it is not {0}'s turn")]
    NotYourTurn(String),

    #[error("no target was chosen")]
    MissingTarget,

    #[error("target {0} is not in this battle")]
    InvalidTarget(CombatantId),

    #[error("{0} has already fallen")]
    TargetDead(String),

    #[error("{0} is not a valid target for this action")]
    WrongTeam(String),

    #[error("unknown skill `{0}`")]
    UnknownSkill(SkillId),

    #[error("{actor} has not learned {skill}")]
    SkillNotKnown { actor: String, skill: String },

    #[error("{skill} needs cultivation level {required}")]
    LevelTooLow { skill: String, required: u32 },

    #[error("{skill} can only be used from {required} onward")]
    RealmTooLow { skill: String, required: String },

    #[error("{skill} is recovering for {rounds} more round(s)")]
    OnCooldown { skill: String, rounds: u32 },

    #[error("not enough {resource}: {needed:.0} needed, {available:.0} available")]
    InsufficientResource {
        resource: String,
        needed: f64,
        available: f64,
    },

    #[error("{0} is silenced and cannot use skills")]
    Silenced(String),

    #[error("unknown item `{0}`")]
    UnknownItem(ItemId),

    #[error("{actor} carries no {item}")]
    ItemNotHeld { actor: String, item: String },
}

impl GameError for ActionFailure {
    fn severity(&self) -> ErrorSeverity {
        use ActionFailure::*;
        match self {
            ActorDead(_) | Incapacitated(_) | NotYourTurn(_) => ErrorSeverity::Recoverable,
            OnCooldown { .. } | InsufficientResource { .. } | Silenced(_) => {
                ErrorSeverity::Recoverable
            }
            MissingTarget | InvalidTarget(_) | TargetDead(_) | WrongTeam(_) => {
                ErrorSeverity::Validation
            }
            UnknownSkill(_) | SkillNotKnown { .. } | LevelTooLow { .. } | RealmTooLow { .. } => {
                ErrorSeverity::Validation
            }
            UnknownItem(_) | ItemNotHeld { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionFailure::*;
        match self {
            ActorDead(_) => "ACTION_ACTOR_DEAD",
            Incapacitated(_) => "ACTION_INCAPACITATED",
            NotYourTurn(_) => "ACTION_NOT_YOUR_TURN",
            MissingTarget => "ACTION_MISSING_TARGET",
            InvalidTarget(_) => "ACTION_INVALID_TARGET",
            TargetDead(_) => "ACTION_TARGET_DEAD",
            WrongTeam(_) => "ACTION_WRONG_TEAM",
            UnknownSkill(_) => "ACTION_UNKNOWN_SKILL",
            SkillNotKnown { .. } => "ACTION_SKILL_NOT_KNOWN",
            LevelTooLow { .. } => "ACTION_LEVEL_TOO_LOW",
            RealmTooLow { .. } => "ACTION_REALM_TOO_LOW",
            OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            Silenced(_) => "ACTION_SILENCED",
            UnknownItem(_) => "ACTION_UNKNOWN_ITEM",
            ItemNotHeld { .. } => "ACTION_ITEM_NOT_HELD",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    /// The action ran; `success` says whether it achieved its aim.
    Resolved,
    /// Validation refused the action before anything happened.
    Rejected(ActionFailure),
    /// A world law cancelled the action.
    Intercepted,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEntry {
    pub target: CombatantId,
    pub amount: f64,
    pub critical: bool,
    pub evaded: bool,
    /// Five-element multiplier applied (1.0 when neutral).
    pub element_multiplier: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealEntry {
    pub target: CombatantId,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusChange {
    pub target: CombatantId,
    pub status: String,
    pub outcome: AddOutcome,
}

/// Everything an action did, ready for display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub actor: CombatantId,
    pub success: bool,
    pub outcome: ActionOutcome,
    pub message: String,
    pub damage: Vec<DamageEntry>,
    pub healing: Vec<HealEntry>,
    pub statuses_applied: Vec<StatusChange>,
    /// `(target, status name)` pairs removed by this action.
    pub statuses_removed: Vec<(CombatantId, String)>,
    pub law_messages: Vec<String>,
    pub defeated: Vec<CombatantId>,
    pub fled: bool,
}

impl ActionResult {
    pub fn resolved(actor: CombatantId, message: impl Into<String>) -> Self {
        Self {
            actor,
            success: true,
            outcome: ActionOutcome::Resolved,
            message: message.into(),
            damage: Vec::new(),
            healing: Vec::new(),
            statuses_applied: Vec::new(),
            statuses_removed: Vec::new(),
            law_messages: Vec::new(),
            defeated: Vec::new(),
            fled: false,
        }
    }

    pub fn rejected(actor: CombatantId, failure: ActionFailure) -> Self {
        Self {
            success: false,
            message: failure.to_string(),
            outcome: ActionOutcome::Rejected(failure),
            ..Self::resolved(actor, String::new())
        }
    }

    pub fn intercepted(actor: CombatantId, reason: String, law_messages: Vec<String>) -> Self {
        Self {
            success: false,
            outcome: ActionOutcome::Intercepted,
            law_messages,
            ..Self::resolved(actor, reason)
        }
    }

    pub fn failure(&self) -> Option<&ActionFailure> {
        match &self.outcome {
            ActionOutcome::Rejected(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn total_damage(&self) -> f64 {
        self.damage.iter().map(|entry| entry.amount).sum()
    }

    pub fn total_healing(&self) -> f64 {
        self.healing.iter().map(|entry| entry.amount).sum()
    }
}
