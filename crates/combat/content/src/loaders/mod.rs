//! Content loaders for reading combat data from files.
//!
//! Every loader offers `parse` for in-memory text and `load` for a path.

pub mod config;
pub mod factory;
pub mod items;
pub mod laws;
pub mod roster;
pub mod skills;
pub mod statuses;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use laws::LawLoader;
pub use roster::{CombatantSpec, EncounterSpec, Roster, RosterLoader};
pub use skills::SkillLoader;
pub use statuses::StatusLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
