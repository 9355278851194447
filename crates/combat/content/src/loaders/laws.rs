//! Heaven law table loader.

use std::path::Path;

use combat_core::WorldLaws;

use crate::loaders::{LoadResult, read_file};

/// Loader for the world law table from TOML files.
pub struct LawLoader;

impl LawLoader {
    pub fn load(path: &Path) -> LoadResult<WorldLaws> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a law table. Omitted laws fall back to their defaults.
    pub fn parse(content: &str) -> LoadResult<WorldLaws> {
        let laws: WorldLaws = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse law TOML: {}", e))?;

        Ok(laws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::Realm;

    #[test]
    fn disabled_flag_and_partial_params() {
        let laws = LawLoader::parse(
            r#"
            [cross_realm_kill]
            enabled = false
            max_gap = 3
            "#,
        )
        .unwrap();

        assert!(!laws.cross_realm_kill.enabled);
        assert_eq!(laws.cross_realm_kill.params.max_gap, 3);
        assert_eq!(laws.cross_realm_kill.params.fatal_threshold, 8);
        assert!(laws.forbidden_arts.enabled);
    }

    #[test]
    fn difficulty_table_uses_realm_names() {
        let laws = LawLoader::parse(
            r#"
            [realm_breakthrough]
            major_realms = ["金丹期"]

            [realm_breakthrough.tribulation_difficulty]
            "金丹期" = 4
            "#,
        )
        .unwrap();

        let breakthrough = &laws.realm_breakthrough.params;
        assert_eq!(breakthrough.major_realms, vec![Realm::GoldenCore]);
        assert_eq!(breakthrough.difficulty(Realm::GoldenCore), 4);
    }
}
