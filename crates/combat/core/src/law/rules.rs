//! World law table as loaded from configuration.

use std::collections::BTreeMap;

use crate::cultivation::Realm;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LawCode {
    CrossRealmKill,
    ForbiddenArts,
    RealmBreakthrough,
}

/// Parameters of one law kind.
pub trait LawParams {
    const CODE: LawCode;

    /// Describes the first inconsistency, if any.
    fn problem(&self) -> Option<String>;
}

/// A law: its parameters plus an enabled flag.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldLaw<P> {
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub params: P,
}

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

impl<P: LawParams> WorldLaw<P> {
    pub fn enabled(params: P) -> Self {
        Self {
            enabled: true,
            params,
        }
    }

    pub fn disabled(params: P) -> Self {
        Self {
            enabled: false,
            params,
        }
    }

    pub fn code(&self) -> LawCode {
        P::CODE
    }
}

impl<P: LawParams + Default> Default for WorldLaw<P> {
    fn default() -> Self {
        Self::enabled(P::default())
    }
}

/// Forbids slaying cultivators far below one's own realm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrossRealmKill {
    /// Smallest realm gap that heaven refuses.
    pub max_gap: u8,
    /// Gap from which the punishment is severe.
    pub severity_threshold: u8,
    /// Gap from which the punishment is fatal.
    pub fatal_threshold: u8,
}

impl Default for CrossRealmKill {
    fn default() -> Self {
        Self {
            max_gap: 2,
            severity_threshold: 3,
            fatal_threshold: 8,
        }
    }
}

impl LawParams for CrossRealmKill {
    const CODE: LawCode = LawCode::CrossRealmKill;

    fn problem(&self) -> Option<String> {
        if self.max_gap == 0 {
            return Some("max_gap must be at least 1".into());
        }
        if self.severity_threshold < self.max_gap {
            return Some("severity_threshold must not be below max_gap".into());
        }
        if self.fatal_threshold < self.severity_threshold {
            return Some("fatal_threshold must not be below severity_threshold".into());
        }
        None
    }
}

/// Techniques heaven punishes whenever they are used.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForbiddenArts {
    pub karma_penalty: i64,
    /// Fraction of max health lost to backlash.
    pub backlash_fraction: f64,
    pub techniques: Vec<String>,
}

impl Default for ForbiddenArts {
    fn default() -> Self {
        Self {
            karma_penalty: 100,
            backlash_fraction: 0.1,
            techniques: ["血魔大法", "噬魂术", "九幽冥火", "天魔解体大法"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl LawParams for ForbiddenArts {
    const CODE: LawCode = LawCode::ForbiddenArts;

    fn problem(&self) -> Option<String> {
        if self.karma_penalty < 0 {
            return Some("karma_penalty must not be negative".into());
        }
        if !(0.0..=1.0).contains(&self.backlash_fraction) {
            return Some("backlash_fraction must be within [0, 1]".into());
        }
        None
    }
}

/// Tribulations that accompany stepping into a major realm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RealmBreakthrough {
    pub major_realms: Vec<Realm>,
    /// Difficulty per major realm; absent realms default to 1.
    pub tribulation_difficulty: BTreeMap<Realm, u32>,
    pub damage_per_difficulty: f64,
}

impl Default for RealmBreakthrough {
    fn default() -> Self {
        Self {
            major_realms: vec![
                Realm::Foundation,
                Realm::GoldenCore,
                Realm::NascentSoul,
                Realm::SpiritSevering,
                Realm::Fusion,
                Realm::Mahayana,
                Realm::Tribulation,
            ],
            tribulation_difficulty: BTreeMap::from([
                (Realm::Foundation, 1),
                (Realm::GoldenCore, 2),
                (Realm::NascentSoul, 3),
                (Realm::SpiritSevering, 4),
                (Realm::Fusion, 5),
                (Realm::Mahayana, 6),
                (Realm::Tribulation, 9),
            ]),
            damage_per_difficulty: 100.0,
        }
    }
}

impl RealmBreakthrough {
    pub fn difficulty(&self, realm: Realm) -> u32 {
        self.tribulation_difficulty.get(&realm).copied().unwrap_or(1)
    }
}

impl LawParams for RealmBreakthrough {
    const CODE: LawCode = LawCode::RealmBreakthrough;

    fn problem(&self) -> Option<String> {
        if let Some(realm) = self
            .tribulation_difficulty
            .keys()
            .find(|realm| !self.major_realms.contains(realm))
        {
            return Some(format!("difficulty given for {realm}, which is not a major realm"));
        }
        if !self.damage_per_difficulty.is_finite() || self.damage_per_difficulty < 0.0 {
            return Some("damage_per_difficulty must be a non-negative number".into());
        }
        None
    }
}

/// The complete, read-only law table.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldLaws {
    pub cross_realm_kill: WorldLaw<CrossRealmKill>,
    pub forbidden_arts: WorldLaw<ForbiddenArts>,
    pub realm_breakthrough: WorldLaw<RealmBreakthrough>,
}

impl WorldLaws {
    pub fn validate(&self) -> Result<(), LawError> {
        fn check<P: LawParams>(law: &WorldLaw<P>) -> Result<(), LawError> {
            match law.params.problem() {
                Some(reason) => Err(LawError::Invalid {
                    code: law.code(),
                    reason,
                }),
                None => Ok(()),
            }
        }

        check(&self.cross_realm_kill)?;
        check(&self.forbidden_arts)?;
        check(&self.realm_breakthrough)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LawError {
    #[error("law {code} is misconfigured: {reason}")]
    Invalid { code: LawCode, reason: String },
}

impl GameError for LawError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        "LAW_INVALID"
    }
}
