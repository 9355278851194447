use combat_content::ContentFactory;
use combat_core::{
    ActionKind, CombatEngine, CombatantId, Personality, Ruleset, SkillId,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::providers::ai::{AiConfig, DecisionContext, DecisionEngine, TargetStrategy};

fn ruleset() -> Ruleset {
    ContentFactory::embedded().load_ruleset().unwrap()
}

fn engine<'r>(ruleset: &'r Ruleset, encounter: &str) -> CombatEngine<'r> {
    let roster = ContentFactory::embedded().load_roster().unwrap();
    let encounter = roster.build_encounter(encounter).unwrap();
    let mut engine = CombatEngine::new(ruleset, encounter, 7);
    engine.start().unwrap();
    engine
}

fn set_health(engine: &mut CombatEngine<'_>, id: u32, fraction: f64) {
    let combatant = engine
        .encounter_mut()
        .participant_mut(CombatantId(id))
        .unwrap();
    let max = combatant.stats().derived.max_health;
    combatant.resources.health = max * fraction;
}

fn set_personality(engine: &mut CombatEngine<'_>, id: u32, personality: Personality) {
    engine
        .encounter_mut()
        .participant_mut(CombatantId(id))
        .unwrap()
        .personality = Some(personality);
}

fn decide(engine: &CombatEngine<'_>, id: u32) -> runtime::Decision {
    let mut rng = StdRng::seed_from_u64(1);
    DecisionEngine::new(AiConfig::default())
        .decide_action(engine, CombatantId(id), &mut rng)
        .unwrap()
}

fn skill(id: &str) -> ActionKind {
    ActionKind::UseSkill(SkillId::from(id))
}

#[test]
fn elder_never_targets_a_protected_disciple() {
    let ruleset = ruleset();
    let engine = engine(&ruleset, "elder_bullies_disciple");

    let ctx = DecisionContext::build(&engine, CombatantId(1), &AiConfig::default()).unwrap();
    assert_eq!(ctx.protected, vec![CombatantId(2)]);
    assert_eq!(ctx.target(), None);

    // Nothing to strike, so the defensive elder raises the golden bell.
    let decision = decide(&engine, 1);
    assert_eq!(decision.request.kind, skill("golden_bell"));
    assert!(decision.request.targets.is_empty());
}

#[test]
fn aggressive_elder_without_targets_falls_back_to_waiting() {
    let ruleset = ruleset();
    let mut engine = engine(&ruleset, "elder_bullies_disciple");
    set_personality(&mut engine, 1, Personality::Aggressive);

    let decision = decide(&engine, 1);
    assert_eq!(decision.request.kind, ActionKind::Wait);
}

#[test]
fn disciple_strikes_upward_with_best_technique() {
    let ruleset = ruleset();
    let engine = engine(&ruleset, "elder_bullies_disciple");

    let decision = decide(&engine, 2);
    assert_eq!(decision.request.kind, skill("sword_qi"));
    assert_eq!(decision.request.targets, vec![CombatantId(1)]);
}

#[test]
fn desperate_outnumbered_cultist_flees() {
    let ruleset = ruleset();
    let mut engine = engine(&ruleset, "sect_vs_demons");
    // blood_cultist is #4; the demons are two against three.
    set_health(&mut engine, 4, 0.1);

    let decision = decide(&engine, 4);
    assert_eq!(decision.request.kind, ActionKind::Flee);
}

#[test]
fn healer_tends_the_most_wounded_ally() {
    let ruleset = ruleset();
    let mut engine = engine(&ruleset, "sect_vs_demons");
    set_health(&mut engine, 1, 0.45);
    set_health(&mut engine, 3, 0.3);

    let decision = decide(&engine, 2);
    assert_eq!(decision.request.kind, skill("spring_rain"));
    assert_eq!(decision.request.targets, vec![CombatantId(3)]);
}

#[test]
fn only_aggressive_cultivators_use_forbidden_arts() {
    let ruleset = ruleset();
    let mut engine = engine(&ruleset, "duel");
    let forbidden = skill("blood_demon_art");

    set_personality(&mut engine, 2, Personality::Balanced);
    let decision = decide(&engine, 2);
    assert_ne!(decision.request.kind, forbidden);

    set_personality(&mut engine, 2, Personality::Aggressive);
    let ctx = DecisionContext::build(&engine, CombatantId(2), &AiConfig::default()).unwrap();
    let strongest = ctx
        .skills
        .iter()
        .filter(|option| option.target == combat_core::TargetType::SingleEnemy)
        .max_by(|a, b| a.effects.damage.total_cmp(&b.effects.damage))
        .unwrap();
    let decision = decide(&engine, 2);
    assert_eq!(decision.request.kind, ActionKind::UseSkill(strongest.id.clone()));
}

#[test]
fn lowest_health_strategy_picks_the_weakest_enemy() {
    let ruleset = ruleset();
    let mut engine = engine(&ruleset, "sect_vs_demons");
    set_health(&mut engine, 5, 0.5);

    let config = AiConfig {
        strategy: TargetStrategy::LowestHealth,
        ..AiConfig::default()
    };
    let ctx = DecisionContext::build(&engine, CombatantId(1), &config).unwrap();
    assert_eq!(ctx.target(), Some(CombatantId(5)));
}

#[test]
fn highest_damage_strategy_follows_the_record() {
    let ruleset = ruleset();
    let mut engine = engine(&ruleset, "sect_vs_demons");
    for (id, dealt) in [(4, 10.0), (5, 60.0)] {
        engine
            .encounter_mut()
            .participant_mut(CombatantId(id))
            .unwrap()
            .record
            .damage_dealt = dealt;
    }

    let config = AiConfig {
        strategy: TargetStrategy::HighestDamage,
        ..AiConfig::default()
    };
    let ctx = DecisionContext::build(&engine, CombatantId(1), &config).unwrap();
    assert_eq!(ctx.target(), Some(CombatantId(5)));
}

#[test]
fn support_first_strategy_hunts_the_healer() {
    let ruleset = ruleset();
    let engine = engine(&ruleset, "sect_vs_demons");

    let config = AiConfig {
        strategy: TargetStrategy::SupportFirst,
        ..AiConfig::default()
    };
    let ctx = DecisionContext::build(&engine, CombatantId(1), &config).unwrap();
    // frost_witch (#5) carries spring_rain; blood_cultist (#4) has no support.
    assert_eq!(ctx.target(), Some(CombatantId(5)));
}

#[test]
fn threats_are_sorted_for_every_decider() {
    let ruleset = ruleset();
    let engine = engine(&ruleset, "sect_vs_demons");

    for id in 1..=5 {
        let ctx = DecisionContext::build(&engine, CombatantId(id), &AiConfig::default()).unwrap();
        assert!(ctx.threats.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(ctx.threats.len(), ctx.enemies.len());
    }
}

#[test]
fn unknown_actor_is_an_error() {
    let ruleset = ruleset();
    let engine = engine(&ruleset, "duel");
    let mut rng = StdRng::seed_from_u64(1);

    let err = DecisionEngine::default()
        .decide_action(&engine, CombatantId(99), &mut rng)
        .unwrap_err();
    assert!(matches!(err, runtime::RuntimeError::UnknownCombatant(CombatantId(99))));
}
