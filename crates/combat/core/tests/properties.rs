//! Properties that must hold for every input, checked with proptest.

use combat_core::{
    Attribute, AttributeSet, BaseStats, CombatConfig, Combatant, CombatantId, EffectDuration,
    Encounter, Realm, StackingPolicy, StatusEffect, StatusEffects, StatusKind, StatusTags, TeamId,
    WorldLaws,
};
use combat_core::law::{ActionContext, WorldLawEngine};
use combat_core::status::{EffectSource, StatModifier};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn effect(name: &str, value: f64, stacking: StackingPolicy, rounds: u32) -> StatusEffect {
    StatusEffect {
        id: name.to_owned(),
        name: name.to_owned(),
        kind: StatusKind::Buff,
        modifiers: vec![StatModifier {
            attribute: Attribute::AttackPower,
            value,
        }],
        periodic: None,
        duration: EffectDuration::Rounds(rounds),
        remaining: EffectDuration::Rounds(rounds),
        stacking,
        stacks: 1,
        source: EffectSource::default(),
        dispellable: true,
        tags: StatusTags::empty(),
    }
}

fn realm() -> impl Strategy<Value = Realm> {
    (0u8..=8).prop_map(|index| Realm::from_repr(index).unwrap_or_default())
}

proptest! {
    #[test]
    fn rate_attributes_stay_in_band(
        agility in -500.0f64..500.0,
        luck in -500.0f64..500.0,
        strength in -500.0f64..500.0,
        evasion_delta in -1_000.0f64..1_000.0,
        crit_delta in -1_000.0f64..1_000.0,
    ) {
        let mut base = BaseStats::default();
        base.agility = agility;
        base.luck = luck;
        base.strength = strength;
        let mut set = AttributeSet::new(base, Realm::QiRefining);
        set.apply_modifier(Attribute::Evasion, evasion_delta, false);
        set.apply_modifier(Attribute::CritRate, crit_delta, false);

        let derived = set.snapshot().derived;
        prop_assert!(CombatConfig::EVASION_BAND.min <= derived.evasion);
        prop_assert!(derived.evasion <= CombatConfig::EVASION_BAND.max);
        prop_assert!(CombatConfig::CRIT_RATE_BAND.min <= derived.crit_rate);
        prop_assert!(derived.crit_rate <= CombatConfig::CRIT_RATE_BAND.max);
        prop_assert!(CombatConfig::CRIT_DAMAGE_BAND.min <= derived.crit_damage);
        prop_assert!(derived.crit_damage <= CombatConfig::CRIT_DAMAGE_BAND.max);
    }

    #[test]
    fn stack_count_never_exceeds_maximum(max_stacks in 1u32..10, adds in 1usize..40) {
        let mut effects = StatusEffects::new();
        let policy = StackingPolicy::StackIntensity { max_stacks };
        for _ in 0..adds {
            effects.add(effect("tiger_fury", 5.0, policy, 3));
        }
        let stacks = effects.get("tiger_fury").map(|e| e.stacks).unwrap_or_default();
        prop_assert_eq!(stacks, (adds as u32).min(max_stacks));
        prop_assert_eq!(effects.len(), 1);
        prop_assert_eq!(effects.aggregate_modifier(Attribute::AttackPower), 5.0 * f64::from(stacks));
    }

    #[test]
    fn no_stack_keeps_the_strongest(values in prop::collection::vec(-100.0f64..100.0, 1..20)) {
        let mut effects = StatusEffects::new();
        for value in &values {
            effects.add(effect("iron_skin", *value, StackingPolicy::NoStack, 2));
        }
        let strongest = values[1..]
            .iter()
            .fold(values[0], |best, &v| if v.abs() > best.abs() { v } else { best });
        prop_assert_eq!(effects.len(), 1);
        prop_assert_eq!(effects.aggregate_modifier(Attribute::AttackPower), strongest);
    }

    #[test]
    fn finite_effects_expire_after_their_duration(rounds in 1u32..20) {
        let mut effects = StatusEffects::new();
        effects.add(effect("qi_surge", 1.0, StackingPolicy::RefreshDuration, rounds));
        for _ in 1..rounds {
            effects.tick();
            prop_assert_eq!(effects.len(), 1);
        }
        effects.tick();
        prop_assert!(effects.is_empty());
    }

    #[test]
    fn permanent_effects_survive_any_number_of_ticks(ticks in 0usize..200) {
        let mut effects = StatusEffects::new();
        let mut permanent = effect("dao_heart", 1.0, StackingPolicy::NoStack, 1);
        permanent.duration = EffectDuration::Permanent;
        permanent.remaining = EffectDuration::Permanent;
        effects.add(permanent);
        for _ in 0..ticks {
            effects.tick();
        }
        prop_assert_eq!(effects.len(), 1);
    }

    #[test]
    fn turn_order_is_sorted_by_speed(agilities in prop::collection::vec(0.0f64..100.0, 2..10)) {
        let mut encounter = Encounter::new();
        for (index, agility) in agilities.iter().enumerate() {
            let mut base = BaseStats::default();
            base.agility = *agility;
            let team = if index % 2 == 0 { "a" } else { "b" };
            encounter
                .add_participant(Combatant::new(
                    CombatantId(index as u32),
                    format!("c{index}"),
                    TeamId::new(team),
                    AttributeSet::new(base, Realm::QiRefining),
                ))
                .unwrap();
        }
        encounter.start().unwrap();

        let speeds: Vec<(f64, u32)> = encounter
            .turn_order()
            .iter()
            .map(|id| {
                let speed = encounter.participant(*id).unwrap().stats().derived.speed;
                (speed, id.0)
            })
            .collect();
        for pair in speeds.windows(2) {
            prop_assert!(pair[0].0 >= pair[1].0);
            if pair[0].0 == pair[1].0 {
                // Equal speed keeps insertion order.
                prop_assert!(pair[0].1 < pair[1].1);
            }
        }
    }

    #[test]
    fn realm_gap_cancels_exactly_at_threshold(actor in realm(), target in realm()) {
        let engine = WorldLawEngine::new(WorldLaws::default()).unwrap();
        let make = |id: u32, realm: Realm| {
            Combatant::new(
                CombatantId(id),
                format!("c{id}"),
                TeamId::new(format!("t{id}")),
                AttributeSet::new(BaseStats::default(), realm),
            )
        };
        let mut ctx = ActionContext::new();
        engine.enforce(&make(1, actor), Some(&make(2, target)), &mut ctx);

        let gap = actor.gap(target);
        prop_assert_eq!(ctx.cancelled, gap >= 2);
        prop_assert_eq!(ctx.events.len(), usize::from(gap >= 2));
    }
}

#[test]
fn every_realm_round_trips_through_its_index() {
    for realm in Realm::iter() {
        assert_eq!(Realm::from_repr(realm.index()), Some(realm));
    }
}
