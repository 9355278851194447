//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the combat engine, snapshots, and action providers so
//! clients can bubble them up with consistent context.
use std::fmt;

use combat_core::{CombatError, CombatantId, ErrorSeverity, GameError, SnapshotError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("session requires an encounter or a snapshot before building")]
    MissingEncounter,

    #[error("combatant {0} is not part of this encounter")]
    UnknownCombatant(CombatantId),

    #[error("scripted provider has no action left for {0}")]
    ScriptExhausted(CombatantId),

    #[error("action actor {provided} does not match current combatant {expected}")]
    InvalidActionActor {
        expected: CombatantId,
        provided: CombatantId,
    },

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Combat(err) => err.severity(),
            RuntimeError::Snapshot(err) => err.severity(),
            RuntimeError::ScriptExhausted(_) => ErrorSeverity::Recoverable,
            RuntimeError::ProviderNotSet { .. }
            | RuntimeError::MissingEncounter
            | RuntimeError::UnknownCombatant(_)
            | RuntimeError::InvalidActionActor { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            RuntimeError::MissingEncounter => "RUNTIME_MISSING_ENCOUNTER",
            RuntimeError::UnknownCombatant(_) => "RUNTIME_UNKNOWN_COMBATANT",
            RuntimeError::ScriptExhausted(_) => "RUNTIME_SCRIPT_EXHAUSTED",
            RuntimeError::InvalidActionActor { .. } => "RUNTIME_INVALID_ACTION_ACTOR",
            RuntimeError::Combat(err) => err.error_code(),
            RuntimeError::Snapshot(err) => err.error_code(),
        }
    }
}

/// Which provider is asked for a combatant's action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    /// Combatants without a personality.
    Player,
    /// Combatants with a personality.
    Npc,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Npc => "npc",
        };
        write!(f, "{}", label)
    }
}
