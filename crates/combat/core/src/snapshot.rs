//! Encounter snapshots.
//!
//! A snapshot carries everything needed to resume an encounter with
//! identical outcomes: the encounter itself, the random stream, and the
//! fingerprint of the law table it ran under. Two encodings are offered:
//! JSON for inspection and bincode for compact storage.

use crate::encounter::Encounter;
use crate::engine::CombatEngine;
use crate::error::{ErrorSeverity, GameError};
use crate::rng::CombatRng;
use crate::ruleset::Ruleset;

/// Bumped whenever the snapshot layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EncounterSnapshot {
    pub version: u32,
    pub law_fingerprint: String,
    pub rng: CombatRng,
    pub encounter: Encounter,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("snapshot was taken under different world laws ({found}, expected {expected})")]
    FingerprintMismatch { expected: String, found: String },

    #[error("snapshot is corrupted: {0}")]
    Corrupted(String),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::VersionMismatch { .. } => "SNAPSHOT_VERSION_MISMATCH",
            SnapshotError::FingerprintMismatch { .. } => "SNAPSHOT_FINGERPRINT_MISMATCH",
            SnapshotError::Corrupted(_) => "SNAPSHOT_CORRUPTED",
        }
    }
}

impl EncounterSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Corrupted(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(text).map_err(|e| SnapshotError::Corrupted(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Corrupted(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Corrupted(e.to_string()))
    }

    /// Checks version and law fingerprint against `ruleset`.
    pub fn verify(&self, ruleset: &Ruleset) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: self.version,
            });
        }
        let expected = ruleset.laws().fingerprint();
        if self.law_fingerprint != expected {
            return Err(SnapshotError::FingerprintMismatch {
                expected: expected.to_owned(),
                found: self.law_fingerprint.clone(),
            });
        }
        Ok(())
    }
}

impl<'r> CombatEngine<'r> {
    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            version: SNAPSHOT_VERSION,
            law_fingerprint: self.ruleset().laws().fingerprint().to_owned(),
            rng: self.rng().clone(),
            encounter: self.encounter().clone(),
        }
    }

    /// Resumes an encounter. Fails if the snapshot was taken by another
    /// version or under a different law table.
    pub fn restore(ruleset: &'r Ruleset, snapshot: EncounterSnapshot) -> Result<Self, SnapshotError> {
        snapshot.verify(ruleset)?;
        tracing::debug!(
            target: "combat::snapshot",
            round = snapshot.encounter.round(),
            "restoring encounter"
        );
        Ok(Self::with_rng(ruleset, snapshot.encounter, snapshot.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{Combatant, CombatantId, TeamId};
    use crate::cultivation::Realm;
    use crate::law::WorldLaws;
    use crate::ruleset::RulesetParts;
    use crate::stats::{AttributeSet, BaseStats};

    fn engine(ruleset: &Ruleset) -> CombatEngine<'_> {
        let mut encounter = Encounter::new();
        for (id, team) in [(1, "sect"), (2, "demons")] {
            encounter
                .add_participant(Combatant::new(
                    CombatantId(id),
                    format!("cultivator-{id}"),
                    TeamId::new(team),
                    AttributeSet::new(BaseStats::default(), Realm::Foundation),
                ))
                .unwrap();
        }
        encounter.start().unwrap();
        CombatEngine::new(ruleset, encounter, 17)
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let ruleset = Ruleset::new(RulesetParts::default()).unwrap();
        let mut snapshot = engine(&ruleset).snapshot();
        snapshot.version = 99;
        assert_eq!(
            CombatEngine::restore(&ruleset, snapshot).err(),
            Some(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: 99
            })
        );
    }

    #[test]
    fn different_laws_are_rejected() {
        let ruleset = Ruleset::new(RulesetParts::default()).unwrap();
        let snapshot = engine(&ruleset).snapshot();

        let mut laws = WorldLaws::default();
        laws.cross_realm_kill.params.max_gap = 4;
        laws.cross_realm_kill.params.severity_threshold = 5;
        let stricter = Ruleset::new(RulesetParts {
            laws,
            ..Default::default()
        })
        .unwrap();

        let err = CombatEngine::restore(&stricter, snapshot).err();
        assert!(matches!(err, Some(SnapshotError::FingerprintMismatch { .. })));
    }

    #[test]
    fn garbage_is_corrupted() {
        assert!(matches!(
            EncounterSnapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::Corrupted(_))
        ));
        assert!(matches!(
            EncounterSnapshot::from_json("{"),
            Err(SnapshotError::Corrupted(_))
        ));
    }
}
