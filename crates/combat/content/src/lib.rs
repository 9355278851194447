//! Data-driven combat content and loaders.
//!
//! This crate houses the default rule content and the loaders that turn
//! RON/TOML files into a validated [`combat_core::Ruleset`]:
//! - Techniques (`skills.ron`)
//! - Status templates (`statuses.ron`)
//! - Consumables (`items.ron`)
//! - Heaven laws (`laws.toml`)
//! - Combat tuning (`combat.toml`)
//! - Combatant presets and encounters (`roster.ron`)
//!
//! The defaults are embedded in the binary; a data directory may override any
//! of the files.

pub mod defaults;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantSpec, ConfigLoader, ContentFactory, EncounterSpec, ItemLoader, LawLoader,
    LoadResult, Roster, RosterLoader, SkillLoader, StatusLoader,
};
