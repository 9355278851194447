//! Threat ordering must hold for any mix of enemies.

use combat_core::{
    AttributeSet, BaseStats, Combatant, CombatantId, Realm, Ruleset, RulesetParts, TeamId,
};
use proptest::prelude::*;
use runtime::AiConfig;
use runtime::providers::ai::evaluate_threats;

fn enemy(id: u32, strength: f64, level: u32, wounds: f64, alive: bool) -> Combatant {
    let mut base = BaseStats::uniform(50.0, level);
    base.strength = strength;
    let mut combatant = Combatant::new(
        CombatantId(id),
        format!("demon-{id}"),
        TeamId::new("demons"),
        AttributeSet::new(base, Realm::QiRefining),
    );
    let max_health = combatant.stats().derived.max_health;
    combatant.take_damage(if alive { max_health * wounds } else { max_health * 2.0 });
    combatant
}

fn roster() -> impl Strategy<Value = Vec<(f64, u32, f64, bool)>> {
    prop::collection::vec(
        (
            // A coarse grid so equal scores show up often.
            (1u32..8).prop_map(|step| f64::from(step) * 20.0),
            0u32..4,
            prop_oneof![Just(0.0), Just(0.9)],
            prop::bool::weighted(0.85),
        ),
        0..10,
    )
}

proptest! {
    #[test]
    fn threats_are_sorted_descending_and_stable(specs in roster()) {
        let ruleset = Ruleset::new(RulesetParts::default()).unwrap();
        let evaluator = Combatant::new(
            CombatantId(100),
            "elder",
            TeamId::new("sect"),
            AttributeSet::new(BaseStats::uniform(50.0, 1), Realm::QiRefining),
        );
        let enemies: Vec<Combatant> = specs
            .iter()
            .enumerate()
            .map(|(index, &(strength, level, wounds, alive))| {
                enemy(index as u32 + 1, strength, level, wounds, alive)
            })
            .collect();
        let refs: Vec<&Combatant> = enemies.iter().collect();

        let threats = evaluate_threats(&evaluator, &refs, &ruleset, &AiConfig::default());

        let living = enemies.iter().filter(|e| e.is_alive()).count();
        prop_assert_eq!(threats.len(), living);
        for pair in threats.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].target.0 < pair[1].target.0);
            }
        }
        for threat in &threats {
            let source = &enemies[threat.target.0 as usize - 1];
            prop_assert!(source.is_alive());
        }
    }
}
