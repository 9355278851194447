//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors live next to the code that raises them:
//! [`ActionFailure`](crate::action::ActionFailure) for rejected actions,
//! [`RulesetError`](crate::ruleset::RulesetError) for bad content,
//! [`FormulaError`](crate::skill::FormulaError) for skill formulas.
//!
//! # Design Principles
//!
//! - **Results, not panics**: validation failures travel inside action results
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Display-ready**: every message can be shown to a player or logged as is

use crate::combatant::CombatantId;
use crate::encounter::EncounterPhase;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with a different action.
    ///
    /// Examples: skill on cooldown, not enough mana
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown skill id, target on the wrong team
    Validation,

    /// Internal error - the caller broke an API contract.
    ///
    /// Examples: actor id not in the encounter, acting after the encounter ended
    Internal,

    /// Fatal error - content or state cannot be used at all.
    ///
    /// Examples: ruleset failed validation, snapshot from another law table
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or corrupted input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Contract violations raised by the combat engine.
///
/// These never describe a player mistake; a correct caller cannot trigger them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("combatant {0} is not part of this encounter")]
    ActorNotFound(CombatantId),

    #[error("combatant {0} is already part of this encounter")]
    DuplicateParticipant(CombatantId),

    #[error("encounter is {actual}, expected {expected}")]
    WrongPhase {
        expected: EncounterPhase,
        actual: EncounterPhase,
    },

    #[error("an encounter needs at least two teams with living members to start")]
    NotEnoughTeams,
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            CombatError::ActorNotFound(_) => "COMBAT_ACTOR_NOT_FOUND",
            CombatError::DuplicateParticipant(_) => "COMBAT_DUPLICATE_PARTICIPANT",
            CombatError::WrongPhase { .. } => "COMBAT_WRONG_PHASE",
            CombatError::NotEnoughTeams => "COMBAT_NOT_ENOUGH_TEAMS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_errors_are_internal() {
        let err = CombatError::ActorNotFound(CombatantId(7));
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "COMBAT_ACTOR_NOT_FOUND");
        assert_eq!(err.to_string(), "combatant #7 is not part of this encounter");
    }
}
