//! End-to-end combat scenarios against the public API.

use combat_core::{
    ActionOutcome, ActionRequest, Attribute, AttributeSet, BaseStats, CombatEngine, Combatant,
    CombatantId, CombatRng, Encounter, EncounterSnapshot, LawEvent, Realm, Ruleset, RulesetParts,
    TeamId, TribulationSeverity,
};

fn ruleset() -> Ruleset {
    Ruleset::new(RulesetParts::default()).expect("default ruleset is valid")
}

fn cultivator(id: u32, team: &str, realm: Realm) -> Combatant {
    let mut attributes = AttributeSet::new(BaseStats::uniform(60.0, 10), realm);
    attributes.apply_modifier(Attribute::CritRate, -100.0, false);
    Combatant::new(
        CombatantId(id),
        format!("cultivator-{id}"),
        TeamId::new(team),
        attributes,
    )
}

fn started(members: Vec<Combatant>) -> Encounter {
    let mut encounter = Encounter::new();
    for member in members {
        encounter.add_participant(member).expect("unique ids");
    }
    encounter.start().expect("two teams");
    encounter
}

fn health(engine: &CombatEngine<'_>, id: u32) -> f64 {
    engine
        .encounter()
        .participant(CombatantId(id))
        .expect("participant")
        .resources
        .health
}

/// A 金丹期 cultivator strikes a 炼气期 one: heaven cancels the blow and the
/// attacker eats a moderate thunder tribulation.
#[test]
fn golden_core_cannot_strike_qi_refining() {
    let ruleset = ruleset();
    let encounter = started(vec![
        cultivator(1, "elders", Realm::GoldenCore),
        cultivator(2, "disciples", Realm::QiRefining),
    ]);
    let mut engine = CombatEngine::new(&ruleset, encounter, 2024);
    let attacker_before = health(&engine, 1);
    let defender_before = health(&engine, 2);

    let result = engine
        .execute_action(&ActionRequest::attack(CombatantId(1), CombatantId(2)))
        .expect("active encounter");

    assert_eq!(result.outcome, ActionOutcome::Intercepted);
    assert!(!result.success);
    assert_eq!(result.law_messages.len(), 1);
    assert_eq!(health(&engine, 2), defender_before);
    assert_eq!(
        health(&engine, 1),
        (attacker_before - TribulationSeverity::Moderate.damage()).max(1.0)
    );
    assert!(engine.encounter().log().iter().any(|entry| entry.message.contains("Heaven forbids")));

    // Striking upward is always allowed.
    let upward = engine
        .execute_action(&ActionRequest::attack(CombatantId(2), CombatantId(1)))
        .expect("active encounter");
    assert_ne!(upward.outcome, ActionOutcome::Intercepted);
}

#[test]
fn law_direct_enforcement_attaches_one_moderate_event() {
    let ruleset = ruleset();
    let mut actor = cultivator(1, "elders", Realm::GoldenCore);
    let target = cultivator(2, "disciples", Realm::QiRefining);
    let before = actor.resources.health;

    let mut ctx = combat_core::ActionContext::new();
    ruleset.laws().enforce(&actor, Some(&target), &mut ctx);
    assert!(ctx.cancelled);
    assert_eq!(
        ctx.events,
        vec![LawEvent::ThunderTribulation {
            severity: TribulationSeverity::Moderate
        }]
    );

    ctx.apply_events(&mut actor);
    assert_eq!(actor.resources.health, before - 500.0);
}

/// Accuracy 80 against evasion 20 hits 80% of the time; attack 100 against
/// defense 30 deals 85 before variance.
#[test]
fn basic_attack_matches_hit_and_damage_model() {
    let ruleset = ruleset();
    let mut attacker = cultivator(1, "a", Realm::QiRefining);
    let mut defender = cultivator(2, "b", Realm::QiRefining);

    let stats = attacker.stats().derived;
    attacker.attributes.apply_modifier(Attribute::Accuracy, 80.0 - stats.accuracy, false);
    attacker.attributes.apply_modifier(Attribute::AttackPower, 100.0 - stats.attack_power, false);
    let stats = defender.stats().derived;
    defender.attributes.apply_modifier(Attribute::Evasion, 20.0 - stats.evasion, false);
    defender.attributes.apply_modifier(Attribute::Defense, 30.0 - stats.defense, false);

    let base = started(vec![attacker, defender]);
    let mut rng = CombatRng::new(7);
    let trials = 10_000;
    let mut hits = 0;
    let mut total = 0.0;

    for _ in 0..trials {
        let mut engine = CombatEngine::with_rng(&ruleset, base.clone(), rng);
        let result = engine
            .execute_action(&ActionRequest::attack(CombatantId(1), CombatantId(2)))
            .expect("active encounter");
        let entry = &result.damage[0];
        if !entry.evaded {
            hits += 1;
            total += entry.amount;
            assert!((76.5..=93.5).contains(&entry.amount), "damage {}", entry.amount);
        }
        rng = engine.into_parts().1;
    }

    let rate = f64::from(hits) / f64::from(trials);
    let mean = total / f64::from(hits);
    assert!((rate - 0.8).abs() < 0.02, "hit rate {rate}");
    assert!((mean - 85.0).abs() < 1.0, "mean damage {mean}");
}

/// Twenty points of speed over the enemy average gives a 70% escape chance.
#[test]
fn flee_rate_tracks_speed_advantage() {
    let ruleset = ruleset();
    let mut runner = cultivator(1, "a", Realm::QiRefining);
    let chaser = cultivator(2, "b", Realm::QiRefining);
    runner.attributes.apply_modifier(Attribute::Speed, 20.0, false);

    let base = started(vec![runner, chaser]);
    let mut rng = CombatRng::new(12_345);
    let trials = 10_000;
    let mut escapes = 0;

    for _ in 0..trials {
        let mut engine = CombatEngine::with_rng(&ruleset, base.clone(), rng);
        let result = engine
            .execute_action(&ActionRequest::flee(CombatantId(1)))
            .expect("active encounter");
        if result.fled {
            escapes += 1;
            assert!(engine.is_over());
        }
        rng = engine.into_parts().1;
    }

    let rate = f64::from(escapes) / f64::from(trials);
    assert!((rate - 0.7).abs() < 0.03, "flee rate {rate}");
}

fn scripted_turns(engine: &mut CombatEngine<'_>, turns: usize) -> Vec<combat_core::ActionResult> {
    let mut results = Vec::new();
    for _ in 0..turns {
        let Some(actor) = engine.current_actor() else {
            break;
        };
        let target = if actor == CombatantId(1) { CombatantId(2) } else { CombatantId(1) };
        results.push(
            engine
                .take_turn(&ActionRequest::attack(actor, target))
                .expect("active encounter"),
        );
    }
    results
}

/// A restored snapshot continues with exactly the rolls the original would
/// have produced, in both encodings.
#[test]
fn snapshot_round_trip_resumes_identically() {
    let ruleset = ruleset();
    let encounter = started(vec![
        cultivator(1, "a", Realm::Foundation),
        cultivator(2, "b", Realm::Foundation),
    ]);
    let mut engine = CombatEngine::new(&ruleset, encounter, 99);
    scripted_turns(&mut engine, 3);

    let snapshot = engine.snapshot();
    let json = snapshot.to_json().expect("json encode");
    let bytes = snapshot.to_bytes().expect("bincode encode");

    let from_json = EncounterSnapshot::from_json(&json).expect("json decode");
    let from_bytes = EncounterSnapshot::from_bytes(&bytes).expect("bincode decode");
    assert_eq!(from_json, snapshot);
    assert_eq!(from_bytes, snapshot);

    let mut resumed_json = CombatEngine::restore(&ruleset, from_json).expect("same laws");
    let mut resumed_bytes = CombatEngine::restore(&ruleset, from_bytes).expect("same laws");

    let expected = scripted_turns(&mut engine, 6);
    assert_eq!(scripted_turns(&mut resumed_json, 6), expected);
    assert_eq!(scripted_turns(&mut resumed_bytes, 6), expected);
    assert_eq!(resumed_json.encounter(), engine.encounter());
}
