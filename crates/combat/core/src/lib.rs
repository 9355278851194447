//! Deterministic turn-based combat for cultivation worlds.
//!
//! The crate is organised bottom-up:
//!
//! - [`stats`]: attributes, derived stats and resource pools
//! - [`status`]: timed effects and their stacking rules
//! - [`law`]: heaven laws that can intercept actions
//! - [`encounter`] and [`engine`]: turn order and action resolution
//!
//! All rules come from a validated [`Ruleset`]; all randomness from the
//! engine's [`CombatRng`].

pub mod action;
pub mod combatant;
pub mod config;
pub mod cultivation;
pub mod encounter;
pub mod engine;
pub mod error;
pub mod item;
pub mod law;
pub mod rng;
pub mod ruleset;
pub mod skill;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod stats;
pub mod status;

pub use action::{
    ActionFailure, ActionKind, ActionOutcome, ActionRequest, ActionResult, DamageEntry, HealEntry,
    StatusChange,
};
pub use combatant::{Combatant, CombatantId, CombatRecord, Personality, TeamId};
pub use config::{Band, CombatConfig, DamageParams, ElementParams, FleeParams};
pub use cultivation::{Element, Realm};
pub use encounter::{Encounter, EncounterPhase, LogEntry};
pub use engine::{
    CombatEngine, base_damage, check_skill, element_multiplier, flee_chance, hit_chance,
};
pub use error::{CombatError, ErrorSeverity, GameError};
pub use item::{ItemDef, ItemId};
pub use law::{
    ActionContext, BreakthroughError, BreakthroughReport, LawEvent, TribulationSeverity,
    WorldLawEngine, WorldLaws,
};
pub use rng::CombatRng;
pub use ruleset::{Ruleset, RulesetError, RulesetParts};
pub use skill::{
    DamageType, Formula, FormulaError, SkillCost, SkillDef, SkillEffect, SkillId, SkillKind,
    TargetType,
};
#[cfg(feature = "serde")]
pub use snapshot::{EncounterSnapshot, SNAPSHOT_VERSION, SnapshotError};
pub use stats::{
    Attribute, AttributeError, AttributeSet, BaseStats, DerivedStats, ResourceKind, Resources,
    StatsSnapshot,
};
pub use status::{
    AddOutcome, EffectDuration, StackingPolicy, StatusEffect, StatusEffects, StatusKind,
    StatusTags, StatusTemplate,
};
