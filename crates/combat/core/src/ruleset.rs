//! The validated, read-only rule bundle every encounter runs under.
//!
//! A [`Ruleset`] can only be obtained through [`Ruleset::new`], which checks
//! every cross-reference. Holding one is proof the content is consistent, so
//! the engine never re-validates content mid-combat.

use std::collections::BTreeMap;

use crate::config::CombatConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::item::{ItemDef, ItemId};
use crate::law::{LawError, WorldLawEngine, WorldLaws};
use crate::skill::{SkillDef, SkillEffect, SkillId};
use crate::status::{DEFENDING, SCORCHED, StatusTemplate};

/// Unvalidated content, as parsed from configuration.
#[derive(Clone, Debug, Default)]
pub struct RulesetParts {
    pub config: CombatConfig,
    pub laws: WorldLaws,
    pub skills: Vec<SkillDef>,
    pub statuses: Vec<StatusTemplate>,
    pub items: Vec<ItemDef>,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RulesetError {
    #[error("combat config field `{0}` is out of range")]
    Config(&'static str),

    #[error(transparent)]
    Law(#[from] LawError),

    #[error("duplicate {kind} id `{id}`")]
    Duplicate { kind: &'static str, id: String },

    #[error("skill `{skill}`: {reason}")]
    Skill { skill: SkillId, reason: String },

    #[error("status `{status}`: {reason}")]
    Status { status: String, reason: String },

    #[error("item `{item}`: {reason}")]
    Item { item: ItemId, reason: String },

    #[error("`{owner}` references unknown status `{status}`")]
    UnknownStatus { owner: String, status: String },
}

impl GameError for RulesetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            RulesetError::Config(_) => "RULESET_CONFIG",
            RulesetError::Law(_) => "RULESET_LAW",
            RulesetError::Duplicate { .. } => "RULESET_DUPLICATE",
            RulesetError::Skill { .. } => "RULESET_SKILL",
            RulesetError::Status { .. } => "RULESET_STATUS",
            RulesetError::Item { .. } => "RULESET_ITEM",
            RulesetError::UnknownStatus { .. } => "RULESET_UNKNOWN_STATUS",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ruleset {
    config: CombatConfig,
    laws: WorldLawEngine,
    skills: BTreeMap<SkillId, SkillDef>,
    statuses: BTreeMap<String, StatusTemplate>,
    items: BTreeMap<ItemId, ItemDef>,
}

impl Ruleset {
    /// Validates `parts` and seals them.
    ///
    /// The built-in `defending` and `scorched` templates are added unless the
    /// content overrides them.
    pub fn new(parts: RulesetParts) -> Result<Self, RulesetError> {
        let RulesetParts {
            config,
            laws,
            skills,
            statuses,
            items,
        } = parts;

        if let Some(field) = config.invalid_field() {
            return Err(RulesetError::Config(field));
        }
        let laws = WorldLawEngine::new(laws)?;

        let mut status_table = BTreeMap::new();
        for template in statuses {
            if let Some(reason) = template.problem() {
                return Err(RulesetError::Status {
                    status: template.id,
                    reason,
                });
            }
            if status_table.contains_key(&template.id) {
                return Err(RulesetError::Duplicate {
                    kind: "status",
                    id: template.id,
                });
            }
            status_table.insert(template.id.clone(), template);
        }
        status_table
            .entry(DEFENDING.to_owned())
            .or_insert_with(|| StatusTemplate::defending(config.defend_bonus));
        status_table
            .entry(SCORCHED.to_owned())
            .or_insert_with(StatusTemplate::scorched);

        let check_effects = |owner: &str, effects: &[SkillEffect]| {
            effects.iter().try_for_each(|effect| match effect {
                SkillEffect::ApplyStatus { status, .. } if !status_table.contains_key(status) => {
                    Err(RulesetError::UnknownStatus {
                        owner: owner.to_owned(),
                        status: status.clone(),
                    })
                }
                _ => Ok(()),
            })
        };

        let mut skill_table = BTreeMap::new();
        for skill in skills {
            if let Some(reason) = skill.problem() {
                return Err(RulesetError::Skill {
                    skill: skill.id,
                    reason,
                });
            }
            check_effects(&skill.id.0, &skill.effects)?;
            if skill_table.contains_key(&skill.id) {
                return Err(RulesetError::Duplicate {
                    kind: "skill",
                    id: skill.id.0,
                });
            }
            skill_table.insert(skill.id.clone(), skill);
        }

        let mut item_table = BTreeMap::new();
        for item in items {
            if let Some(reason) = item.problem() {
                return Err(RulesetError::Item {
                    item: item.id,
                    reason,
                });
            }
            check_effects(&item.id.0, &item.effects)?;
            if item_table.contains_key(&item.id) {
                return Err(RulesetError::Duplicate {
                    kind: "item",
                    id: item.id.0,
                });
            }
            item_table.insert(item.id.clone(), item);
        }

        Ok(Self {
            config,
            laws,
            skills: skill_table,
            statuses: status_table,
            items: item_table,
        })
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn laws(&self) -> &WorldLawEngine {
        &self.laws
    }

    pub fn skill(&self, id: &SkillId) -> Option<&SkillDef> {
        self.skills.get(id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDef> {
        self.skills.values()
    }

    pub fn status(&self, id: &str) -> Option<&StatusTemplate> {
        self.statuses.get(id)
    }

    pub fn statuses(&self) -> impl Iterator<Item = &StatusTemplate> {
        self.statuses.values()
    }

    pub fn item(&self, id: &ItemId) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDef> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{Formula, SkillKind, TargetType};

    fn strike(id: &str) -> SkillDef {
        SkillDef {
            id: SkillId::from(id),
            name: id.to_owned(),
            kind: SkillKind::Attack,
            target: TargetType::SingleEnemy,
            max_targets: 1,
            cost: Default::default(),
            cooldown: 0,
            element: None,
            effects: vec![SkillEffect::Damage {
                formula: Formula::constant(10.0),
                damage_type: Default::default(),
            }],
            required_level: 0,
            required_realm: None,
            description: String::new(),
        }
    }

    #[test]
    fn empty_parts_get_builtin_statuses() {
        let ruleset = Ruleset::new(RulesetParts::default()).unwrap();
        assert!(ruleset.status(DEFENDING).is_some());
        assert!(ruleset.status(SCORCHED).is_some());
    }

    #[test]
    fn duplicate_skill_ids_are_rejected() {
        let parts = RulesetParts {
            skills: vec![strike("slash"), strike("slash")],
            ..Default::default()
        };
        assert_eq!(
            Ruleset::new(parts).unwrap_err(),
            RulesetError::Duplicate {
                kind: "skill",
                id: "slash".into()
            }
        );
    }

    #[test]
    fn unknown_status_reference_is_rejected() {
        let mut skill = strike("hex");
        skill.effects.push(SkillEffect::ApplyStatus {
            status: "doom".into(),
            chance: 1.0,
            on_self: false,
        });
        let parts = RulesetParts {
            skills: vec![skill],
            ..Default::default()
        };
        assert!(matches!(
            Ruleset::new(parts),
            Err(RulesetError::UnknownStatus { .. })
        ));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let mut parts = RulesetParts::default();
        parts.config.damage.variance = 2.0;
        let err = Ruleset::new(parts).unwrap_err();
        assert_eq!(err, RulesetError::Config("damage.variance"));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }
}
