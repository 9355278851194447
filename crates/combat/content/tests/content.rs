use std::fs;

use combat_content::ContentFactory;
use combat_core::{
    ActionOutcome, ActionRequest, CombatEngine, CombatantId, ItemId, Realm, SkillId, StatusTags,
};

#[test]
fn embedded_content_forms_a_valid_ruleset() {
    let ruleset = ContentFactory::embedded().load_ruleset().unwrap();

    assert!(ruleset.skill(&SkillId::from("sword_qi")).is_some());
    assert!(ruleset.item(&ItemId::from("healing_pill")).is_some());
    assert_eq!(
        ruleset.status("stunned").map(|s| s.tags),
        Some(StatusTags::STUN)
    );
    assert!(ruleset.status("defending").is_some());
    assert!(ruleset.laws().laws().cross_realm_kill.enabled);
}

#[test]
fn roster_presets_only_reference_known_content() {
    let factory = ContentFactory::embedded();
    let ruleset = factory.load_ruleset().unwrap();
    let roster = factory.load_roster().unwrap();

    for spec in &roster.combatants {
        for skill in &spec.skills {
            assert!(ruleset.skill(skill).is_some(), "{}: {}", spec.key, skill);
        }
        for item in spec.items.keys() {
            assert!(ruleset.item(item).is_some(), "{}: {}", spec.key, item);
        }
    }
    for encounter in &roster.encounters {
        roster.build_encounter(&encounter.key).unwrap();
    }
}

#[test]
fn blood_demon_art_is_a_forbidden_technique() {
    let factory = ContentFactory::embedded();
    let ruleset = factory.load_ruleset().unwrap();
    let skill = ruleset.skill(&SkillId::from("blood_demon_art")).unwrap();

    let forbidden = &ruleset.laws().laws().forbidden_arts.params.techniques;
    assert!(forbidden.contains(&skill.name));
}

#[test]
fn elder_striking_a_disciple_is_intercepted() {
    let factory = ContentFactory::embedded();
    let ruleset = factory.load_ruleset().unwrap();
    let roster = factory.load_roster().unwrap();
    let encounter = roster.build_encounter("elder_bullies_disciple").unwrap();

    let mut engine = CombatEngine::new(&ruleset, encounter, 11);
    engine.start().unwrap();
    let elder = engine.encounter().participant(CombatantId(1)).unwrap();
    assert_eq!(elder.realm(), Realm::GoldenCore);

    let result = engine
        .execute_action(&ActionRequest::attack(CombatantId(1), CombatantId(2)))
        .unwrap();
    assert_eq!(result.outcome, ActionOutcome::Intercepted);
    assert!(!result.law_messages.is_empty());

    let disciple = engine.encounter().participant(CombatantId(2)).unwrap();
    assert!(disciple.is_alive());
    assert_eq!(disciple.resources.health, disciple.stats().derived.max_health);
}

#[test]
fn directory_overrides_replace_single_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("combat.toml"),
        "defend_bonus = 1.0\n[hit_chance]\nmin = 0.2\nmax = 0.8\n",
    )
    .unwrap();

    let ruleset = ContentFactory::new(dir.path()).load_ruleset().unwrap();
    assert_eq!(ruleset.config().defend_bonus, 1.0);
    assert_eq!(ruleset.config().hit_chance.max, 0.8);
    // Untouched files still come from the defaults.
    assert!(ruleset.skill(&SkillId::from("fireball")).is_some());
}

#[test]
fn invalid_override_is_reported_with_context() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("laws.toml"),
        "[cross_realm_kill]\nmax_gap = 4\nseverity_threshold = 2\n",
    )
    .unwrap();

    let err = ContentFactory::new(dir.path()).load_ruleset().unwrap_err();
    assert!(err.to_string().contains("Invalid ruleset"));
}

#[test]
fn unknown_status_reference_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("items.ron"),
        r#"(items: [(id: "hex_charm", name: "Hex Charm", effects: [ApplyStatus(status: "doom")])])"#,
    )
    .unwrap();

    let err = ContentFactory::new(dir.path()).load_ruleset().unwrap_err();
    assert!(err.to_string().contains("doom"));
}
