//! Attribute Model.
//!
//! ```text
//! [ BaseStats (stored) ] + [ temporary modifiers ] + [ status aggregate ]
//!      ↓
//! [ BaseValues (effective) ]
//!      ↓
//! [ DerivedStats (formulas, then clamp) ]
//! ```
//!
//! Only base values, modifier deltas and current resources are stored.
//! [`StatsSnapshot`] is recomputed on every read, so derived values can never
//! go stale.

pub mod attribute;
pub mod base;
pub mod derived;
pub mod resources;
pub mod set;
pub mod snapshot;

pub use attribute::Attribute;
pub use base::BaseStats;
pub use derived::DerivedStats;
pub use resources::{ResourceKind, Resources};
pub use set::{AttributeError, AttributeSet, ModifierSource, NoModifiers};
pub use snapshot::{BaseValues, StatsSnapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::cultivation::{Element, Realm};

    fn set() -> AttributeSet {
        AttributeSet::new(BaseStats::default(), Realm::QiRefining)
    }

    #[test]
    fn derived_values_follow_base_formulas() {
        let stats = set().snapshot();
        // CON 10, level 1
        assert_eq!(stats.derived.max_health, 120.0);
        assert_eq!(stats.derived.max_mana, 180.0);
        assert_eq!(stats.derived.attack_power, 25.0);
        assert_eq!(stats.derived.defense, 17.0);
        assert_eq!(stats.derived.speed, 15.0);
        assert_eq!(stats.derived.accuracy, 85.0);
        assert_eq!(stats.derived.crit_rate, 7.0);
        assert_eq!(stats.derived.crit_damage, 155.0);
    }

    #[test]
    fn base_modifier_flows_into_derived() {
        let mut attributes = set();
        attributes.apply_modifier(Attribute::Strength, 5.0, false);
        assert_eq!(attributes.get(Attribute::AttackPower), 35.0);

        attributes.clear_modifiers();
        assert_eq!(attributes.get(Attribute::AttackPower), 25.0);
    }

    #[test]
    fn percentage_modifier_is_converted_at_application_time() {
        let mut attributes = set();
        let flat = attributes.apply_modifier(Attribute::Defense, 0.5, true);
        assert_eq!(flat, 8.5);

        // Later base growth does not rescale the already-applied delta.
        attributes.base.constitution = 20.0;
        assert_eq!(attributes.get(Attribute::Defense), 32.0 + 8.5);
    }

    #[test]
    fn rate_values_stay_in_their_bands() {
        let mut attributes = set();
        attributes.apply_modifier(Attribute::CritRate, 500.0, false);
        attributes.apply_modifier(Attribute::Evasion, -500.0, false);

        assert_eq!(attributes.get(Attribute::CritRate), CombatConfig::CRIT_RATE_BAND.max);
        assert_eq!(attributes.get(Attribute::Evasion), CombatConfig::EVASION_BAND.min);
    }

    #[test]
    fn unknown_attribute_name_is_reported() {
        assert_eq!(
            set().get_named("charisma"),
            Err(AttributeError::Unknown("charisma".into()))
        );
        assert_eq!(set().get_named("speed"), Ok(15.0));
    }

    #[test]
    fn missing_resistance_reads_as_zero() {
        let attributes = set().with_resistance(Element::Fire, 30.0);
        assert_eq!(attributes.elemental_resistance(Element::Fire), 30.0);
        assert_eq!(attributes.elemental_resistance(Element::Water), 0.0);
    }

    #[test]
    fn dominant_element_prefers_strongest_root() {
        let attributes = set()
            .with_root(Element::Wood, 40.0)
            .with_root(Element::Fire, 70.0)
            .with_root(Element::Earth, 70.0);
        assert_eq!(attributes.dominant_element(), Some(Element::Fire));
        assert_eq!(set().dominant_element(), None);
    }
}
