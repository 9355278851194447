//! Content factory for building a ruleset from data files.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, ItemDef, Ruleset, RulesetParts, SkillDef, StatusTemplate, WorldLaws};
use tracing::debug;

use crate::defaults;
use crate::loaders::{
    ConfigLoader, ItemLoader, LawLoader, LoadResult, Roster, RosterLoader, SkillLoader,
    StatusLoader,
};

/// Content factory that loads combat content from a data directory.
///
/// Files missing from the directory fall back to the embedded defaults, so a
/// directory only needs the files it overrides.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── laws.toml
/// ├── skills.ron
/// ├── statuses.ron
/// ├── items.ron
/// └── roster.ron
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a factory that reads overrides from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Creates a factory that only uses the embedded defaults.
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Returns the data directory path, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Path of `file_name` when the data directory provides it.
    fn override_path(&self, file_name: &str) -> Option<PathBuf> {
        let path = self.data_dir.as_ref()?.join(file_name);
        path.is_file().then_some(path)
    }

    fn load_with<T>(
        &self,
        file_name: &str,
        embedded: &str,
        load: fn(&Path) -> LoadResult<T>,
        parse: fn(&str) -> LoadResult<T>,
    ) -> LoadResult<T> {
        match self.override_path(file_name) {
            Some(path) => {
                debug!(target: "content", path = %path.display(), "loading override");
                load(&path)
            }
            None => {
                debug!(target: "content", file = file_name, "using embedded default");
                parse(embedded)
            }
        }
    }

    /// Load combat tuning from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        self.load_with("combat.toml", defaults::COMBAT, ConfigLoader::load, ConfigLoader::parse)
    }

    /// Load the heaven law table from `laws.toml`.
    pub fn load_laws(&self) -> LoadResult<WorldLaws> {
        self.load_with("laws.toml", defaults::LAWS, LawLoader::load, LawLoader::parse)
    }

    /// Load the technique catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDef>> {
        self.load_with("skills.ron", defaults::SKILLS, SkillLoader::load, SkillLoader::parse)
    }

    /// Load status templates from `statuses.ron`.
    pub fn load_statuses(&self) -> LoadResult<Vec<StatusTemplate>> {
        self.load_with(
            "statuses.ron",
            defaults::STATUSES,
            StatusLoader::load,
            StatusLoader::parse,
        )
    }

    /// Load the consumable catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDef>> {
        self.load_with("items.ron", defaults::ITEMS, ItemLoader::load, ItemLoader::parse)
    }

    /// Load combatant presets from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        self.load_with("roster.ron", defaults::ROSTER, RosterLoader::load, RosterLoader::parse)
    }

    /// Loads every rule file and validates them into a [`Ruleset`].
    pub fn load_ruleset(&self) -> LoadResult<Ruleset> {
        let parts = RulesetParts {
            config: self.load_config()?,
            laws: self.load_laws()?,
            skills: self.load_skills()?,
            statuses: self.load_statuses()?,
            items: self.load_items()?,
        };

        let ruleset =
            Ruleset::new(parts).map_err(|e| anyhow::anyhow!("Invalid ruleset: {}", e))?;
        debug!(
            target: "content",
            skills = ruleset.skills().count(),
            statuses = ruleset.statuses().count(),
            items = ruleset.items().count(),
            fingerprint = ruleset.laws().fingerprint(),
            "ruleset loaded"
        );
        Ok(ruleset)
    }
}
