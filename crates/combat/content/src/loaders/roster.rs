//! Combatant presets and encounter layouts.
//!
//! A preset is a template; spawning it assigns the id and team so the same
//! preset can appear several times in one encounter.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{
    AttributeSet, BaseStats, Combatant, CombatantId, Element, Encounter, ItemId, Personality,
    Realm, SkillId, TeamId,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A combatant preset as written in `roster.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub realm: Realm,
    #[serde(default)]
    pub base: BaseStats,
    #[serde(default)]
    pub roots: BTreeMap<Element, f64>,
    #[serde(default)]
    pub resistances: BTreeMap<Element, f64>,
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub items: BTreeMap<ItemId, u32>,
    /// `None` leaves the combatant to an external provider.
    #[serde(default)]
    pub personality: Option<Personality>,
    #[serde(default)]
    pub karma: i64,
}

impl CombatantSpec {
    /// Builds a combatant at full resources.
    pub fn spawn(&self, id: CombatantId, team: TeamId) -> Combatant {
        let mut attributes = AttributeSet::new(self.base.clone(), self.realm);
        for (&element, &affinity) in &self.roots {
            attributes = attributes.with_root(element, affinity);
        }
        for (&element, &percent) in &self.resistances {
            attributes = attributes.with_resistance(element, percent);
        }

        let mut combatant = Combatant::new(id, self.name.clone(), team, attributes);
        combatant.skills = self.skills.clone();
        combatant.pouch = self.items.clone();
        combatant.personality = self.personality;
        combatant.karma = self.karma;
        combatant
    }
}

/// A ready-made encounter: teams in insertion order, each a list of preset keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub key: String,
    pub teams: Vec<(TeamId, Vec<String>)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub combatants: Vec<CombatantSpec>,
    #[serde(default)]
    pub encounters: Vec<EncounterSpec>,
}

impl Roster {
    pub fn combatant(&self, key: &str) -> Option<&CombatantSpec> {
        self.combatants.iter().find(|spec| spec.key == key)
    }

    pub fn encounter(&self, key: &str) -> Option<&EncounterSpec> {
        self.encounters.iter().find(|spec| spec.key == key)
    }

    /// Spawns a team layout into a fresh encounter in setup phase.
    ///
    /// Ids are assigned from 1 in layout order.
    pub fn build(&self, teams: &[(TeamId, Vec<String>)]) -> LoadResult<Encounter> {
        let mut encounter = Encounter::default();
        let mut next_id = 1;
        for (team, members) in teams {
            for key in members {
                let spec = self
                    .combatant(key)
                    .ok_or_else(|| anyhow::anyhow!("Unknown combatant preset '{}'", key))?;
                encounter.add_participant(spec.spawn(CombatantId(next_id), team.clone()))?;
                next_id += 1;
            }
        }
        Ok(encounter)
    }

    /// Builds the named encounter.
    pub fn build_encounter(&self, key: &str) -> LoadResult<Encounter> {
        let spec = self
            .encounter(key)
            .ok_or_else(|| anyhow::anyhow!("Unknown encounter '{}'", key))?;
        self.build(&spec.teams)
    }
}

/// Loader for roster files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let roster: Roster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        Ok(roster)
    }
}
