//! Technique catalog loader.

use std::path::Path;

use combat_core::SkillDef;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDef>,
}

/// Loader for technique catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDef>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a skill catalog from RON text.
    ///
    /// Formula syntax errors surface here, before the ruleset is assembled.
    pub fn parse(content: &str) -> LoadResult<Vec<SkillDef>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        Ok(catalog.skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{DamageType, Element, SkillEffect, TargetType};

    #[test]
    fn parses_minimal_entry_with_defaults() {
        let skills = SkillLoader::parse(
            r#"(skills: [(
                id: "jab",
                name: "Jab",
                kind: Attack,
                effects: [Damage(formula: "attack_power")],
            )])"#,
        )
        .unwrap();

        let jab = &skills[0];
        assert_eq!(jab.target, TargetType::SingleEnemy);
        assert_eq!(jab.max_targets, 1);
        assert_eq!(jab.cooldown, 0);
        assert!(matches!(
            jab.effects[0],
            SkillEffect::Damage {
                damage_type: DamageType::Physical,
                ..
            }
        ));
    }

    #[test]
    fn element_reads_snake_case_name() {
        let skills = SkillLoader::parse(
            r#"(skills: [(
                id: "ember",
                name: "Ember",
                kind: Attack,
                element: Some(fire),
                effects: [Damage(formula: "10")],
            )])"#,
        )
        .unwrap();
        assert_eq!(skills[0].element, Some(Element::Fire));
    }

    #[test]
    fn bad_formula_is_a_parse_error() {
        let err = SkillLoader::parse(
            r#"(skills: [(
                id: "broken",
                name: "Broken",
                kind: Attack,
                effects: [Damage(formula: "attacker.attack_power *")],
            )])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("skill catalog"));
    }
}
