//! Status Effect Engine.
//!
//! Effects are created from [`StatusTemplate`]s when an action resolves, merged
//! into a combatant's [`StatusEffects`] according to their stacking policy,
//! ticked once per round, and removed on expiry or dispel.

pub mod effect;
pub mod effects;
pub mod template;

pub use effect::{
    EffectDuration, EffectSource, Periodic, PeriodicEffect, PeriodicTrigger, StackingPolicy,
    StatModifier, StatusEffect, StatusKind, StatusTags,
};
pub use effects::{AddOutcome, StatusEffects, TickReport};
pub use template::{
    DEFENDING, ModifierSpec, PeriodicAmount, PeriodicSpec, SCORCHED, StatusTemplate,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::stats::Attribute;

    fn buff(name: &str, value: f64, stacking: StackingPolicy, rounds: u32) -> StatusEffect {
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

    fn poison(amount: f64, trigger: PeriodicTrigger, stacking: StackingPolicy) -> StatusEffect {
        StatusEffect {
            kind: StatusKind::DamageOverTime,
            modifiers: Vec::new(),
            periodic: Some(Periodic {
                effect: PeriodicEffect::Damage,
                amount,
                trigger,
            }),
            tags: StatusTags::POISON,
            ..buff("poison", 0.0, stacking, 3)
        }
    }

    #[test]
    fn no_stack_keeps_the_stronger_effect() {
        let mut effects = StatusEffects::new();
        effects.add(buff("might", 10.0, StackingPolicy::NoStack, 3));

        assert_eq!(
            effects.add(buff("might", 5.0, StackingPolicy::NoStack, 3)),
            AddOutcome::Kept
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.aggregate_modifier(Attribute::AttackPower), 10.0);

        assert_eq!(
            effects.add(buff("might", 15.0, StackingPolicy::NoStack, 3)),
            AddOutcome::Replaced
        );
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.aggregate_modifier(Attribute::AttackPower), 15.0);
    }

    #[test]
    fn equal_magnitude_keeps_existing() {
        let mut effects = StatusEffects::new();
        effects.add(buff("might", 10.0, StackingPolicy::NoStack, 3));
        assert_eq!(
            effects.add(buff("might", 10.0, StackingPolicy::NoStack, 9)),
            AddOutcome::Kept
        );
        assert_eq!(
            effects.get("might").map(|e| e.remaining),
            Some(EffectDuration::Rounds(3))
        );
    }

    #[test]
    fn stack_intensity_caps_at_max() {
        let policy = StackingPolicy::StackIntensity { max_stacks: 3 };
        let mut effects = StatusEffects::new();
        for _ in 0..5 {
            effects.add(buff("fury", 4.0, policy, 2));
        }

        assert_eq!(effects.len(), 1);
        assert_eq!(effects.get("fury").map(|e| e.stacks), Some(3));
        assert_eq!(effects.aggregate_modifier(Attribute::AttackPower), 12.0);
    }

    #[test]
    fn refresh_resets_remaining_duration() {
        let mut effects = StatusEffects::new();
        effects.add(buff("guard", 1.0, StackingPolicy::RefreshDuration, 3));
        effects.tick();
        assert_eq!(
            effects.get("guard").map(|e| e.remaining),
            Some(EffectDuration::Rounds(2))
        );

        assert_eq!(
            effects.add(buff("guard", 1.0, StackingPolicy::RefreshDuration, 3)),
            AddOutcome::Refreshed
        );
        assert_eq!(
            effects.get("guard").map(|e| e.remaining),
            Some(EffectDuration::Rounds(3))
        );
    }

    #[test]
    fn independent_instances_coexist() {
        let mut effects = StatusEffects::new();
        assert_eq!(
            effects.add(buff("bleed", 1.0, StackingPolicy::Independent, 2)),
            AddOutcome::Added
        );
        assert_eq!(
            effects.add(buff("bleed", 1.0, StackingPolicy::Independent, 2)),
            AddOutcome::AddedInstance
        );
        assert_eq!(effects.len(), 2);
        assert_eq!(effects.remove("bleed"), 2);
        assert!(effects.is_empty());
    }

    #[test]
    fn last_round_expires_on_tick() {
        let mut effects = StatusEffects::new();
        effects.add(buff("haste", 3.0, StackingPolicy::RefreshDuration, 1));

        let report = effects.tick();
        assert_eq!(report.expired, vec!["haste".to_string()]);
        assert!(effects.get("haste").is_none());
    }

    #[test]
    fn permanent_effects_never_tick_down() {
        let mut effects = StatusEffects::new();
        let mut curse = buff("curse", -2.0, StackingPolicy::NoStack, 1);
        curse.duration = EffectDuration::Permanent;
        curse.remaining = EffectDuration::Permanent;
        effects.add(curse);

        for _ in 0..50 {
            effects.tick();
        }
        assert!(effects.get("curse").is_some_and(StatusEffect::is_permanent));
    }

    #[test]
    fn damage_over_time_scales_with_stacks() {
        let policy = StackingPolicy::StackIntensity { max_stacks: 5 };
        let mut effects = StatusEffects::new();
        effects.add(poison(6.0, PeriodicTrigger::EveryTick, policy));
        effects.add(poison(6.0, PeriodicTrigger::EveryTick, policy));

        let report = effects.tick();
        assert_eq!(report.damage, 12.0);
        assert_eq!(report.healing, 0.0);
    }

    #[test]
    fn on_expire_periodic_fires_once_at_the_end() {
        let mut effects = StatusEffects::new();
        effects.add(poison(30.0, PeriodicTrigger::OnExpire, StackingPolicy::NoStack));

        assert_eq!(effects.tick().damage, 0.0);
        assert_eq!(effects.tick().damage, 0.0);
        let last = effects.tick();
        assert_eq!(last.damage, 30.0);
        assert_eq!(last.expired, vec!["poison".to_string()]);
    }

    #[test]
    fn dispel_removes_only_dispellable_harmful_effects() {
        let mut effects = StatusEffects::new();
        effects.add(buff("might", 5.0, StackingPolicy::NoStack, 3));
        effects.add(poison(3.0, PeriodicTrigger::EveryTick, StackingPolicy::NoStack));
        let mut brand = buff("brand", -1.0, StackingPolicy::NoStack, 3);
        brand.kind = StatusKind::Debuff;
        brand.dispellable = false;
        effects.add(brand);

        assert_eq!(effects.clear_dispellable_debuffs(), vec!["poison".to_string()]);
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn full_list_rejects_new_effects() {
        let mut effects = StatusEffects::new();
        for i in 0..CombatConfig::MAX_STATUS_EFFECTS {
            let name = format!("effect-{i}");
            assert_eq!(
                effects.add(buff(&name, 1.0, StackingPolicy::NoStack, 2)),
                AddOutcome::Added
            );
        }
        assert_eq!(
            effects.add(buff("overflow", 1.0, StackingPolicy::NoStack, 2)),
            AddOutcome::Rejected
        );
    }

    #[test]
    fn stun_prevents_action() {
        let mut effects = StatusEffects::new();
        let mut stun = buff("stun", 0.0, StackingPolicy::RefreshDuration, 1);
        stun.kind = StatusKind::Control;
        stun.tags = StatusTags::STUN;
        effects.add(stun);
        assert!(effects.prevents_action());
        assert!(!effects.has_tag(StatusTags::SILENCE));

        effects.tick();
        assert!(!effects.prevents_action());
    }

    #[test]
    fn template_converts_percentages_against_holder() {
        use crate::cultivation::Realm;
        use crate::stats::{AttributeSet, BaseStats};

        let holder = AttributeSet::new(BaseStats::default(), Realm::QiRefining).snapshot();
        let effect = StatusTemplate::scorched().instantiate(&holder, EffectSource::default());

        // attack power 25, defense 17, agility 10
        assert_eq!(effect.modifier_for(Attribute::AttackPower), -5.0);
        assert!((effect.modifier_for(Attribute::Defense) + 3.4).abs() < 1e-9);
        assert_eq!(effect.modifier_for(Attribute::Agility), -2.0);
        assert_eq!(effect.remaining, EffectDuration::Rounds(10));
    }

    #[test]
    fn negative_configured_duration_is_permanent() {
        assert_eq!(EffectDuration::from(-1), EffectDuration::Permanent);
        assert_eq!(EffectDuration::from(4), EffectDuration::Rounds(4));
        assert_eq!(i32::from(EffectDuration::Permanent), -1);
    }
}
