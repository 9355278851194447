//! Attribute set: stored base values plus temporary modifiers.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::{Attribute, BaseStats, BaseValues, DerivedStats, StatsSnapshot};
use crate::cultivation::{Element, Realm};

/// Anything that contributes additive deltas to attributes on top of the
/// set's own temporary modifiers (status effects, in practice).
pub trait ModifierSource {
    fn aggregate_modifier(&self, attribute: Attribute) -> f64;
}

/// A source contributing nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoModifiers;

impl ModifierSource for NoModifiers {
    fn aggregate_modifier(&self, _attribute: Attribute) -> f64 {
        0.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("unknown attribute `{0}`")]
    Unknown(String),
}

/// Base values, cultivation state, elemental profile and temporary deltas.
///
/// Derived values are never stored; every read recomputes them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSet {
    pub base: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub realm: Realm,
    /// Spiritual-root affinity strength per element.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spiritual_roots: BTreeMap<Element, f64>,
    /// Elemental resistance in percent points.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: BTreeMap<Element, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    modifiers: BTreeMap<Attribute, f64>,
}

impl AttributeSet {
    pub fn new(base: BaseStats, realm: Realm) -> Self {
        Self {
            base,
            realm,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_root(mut self, element: Element, affinity: f64) -> Self {
        self.spiritual_roots.insert(element, affinity);
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, element: Element, percent: f64) -> Self {
        self.resistances.insert(element, percent);
        self
    }

    /// Computes every attribute, folding in `source` deltas.
    pub fn snapshot_with(&self, source: &impl ModifierSource) -> StatsSnapshot {
        let delta = |attribute| self.modifier(attribute) + source.aggregate_modifier(attribute);
        let base = BaseValues {
            strength: self.base.strength + delta(Attribute::Strength),
            constitution: self.base.constitution + delta(Attribute::Constitution),
            agility: self.base.agility + delta(Attribute::Agility),
            intelligence: self.base.intelligence + delta(Attribute::Intelligence),
            willpower: self.base.willpower + delta(Attribute::Willpower),
            comprehension: self.base.comprehension + delta(Attribute::Comprehension),
            luck: self.base.luck + delta(Attribute::Luck),
            spiritual_root_purity: self.base.spiritual_root_purity
                + delta(Attribute::SpiritualRootPurity),
            cultivation_level: f64::from(self.base.cultivation_level)
                + delta(Attribute::CultivationLevel),
        };
        let derived = DerivedStats::compute_base(&base).finish(delta);

        StatsSnapshot {
            base,
            derived,
            realm: self.realm,
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot_with(&NoModifiers)
    }

    /// Current value of `attribute` from this set alone.
    pub fn get(&self, attribute: Attribute) -> f64 {
        self.snapshot().get(attribute)
    }

    /// Looks up an attribute by name; unknown names are an error.
    pub fn get_named(&self, name: &str) -> Result<f64, AttributeError> {
        let attribute =
            Attribute::from_str(name).map_err(|_| AttributeError::Unknown(name.to_owned()))?;
        Ok(self.get(attribute))
    }

    /// Temporary delta currently held for `attribute`.
    pub fn modifier(&self, attribute: Attribute) -> f64 {
        self.modifiers.get(&attribute).copied().unwrap_or_default()
    }

    /// Adds a temporary delta and returns the flat amount applied.
    ///
    /// A percentage delta (`0.2` = +20%) is converted to a flat delta against
    /// the attribute's current value, as seen with `source` folded in.
    pub fn apply_modifier_with(
        &mut self,
        attribute: Attribute,
        delta: f64,
        is_percentage: bool,
        source: &impl ModifierSource,
    ) -> f64 {
        let flat = if is_percentage {
            self.snapshot_with(source).get(attribute) * delta
        } else {
            delta
        };
        *self.modifiers.entry(attribute).or_default() += flat;
        flat
    }

    pub fn apply_modifier(&mut self, attribute: Attribute, delta: f64, is_percentage: bool) -> f64 {
        self.apply_modifier_with(attribute, delta, is_percentage, &NoModifiers)
    }

    pub fn clear_modifiers(&mut self) {
        self.modifiers.clear();
    }

    /// Resistance against `element` in percent points; absent means 0.
    pub fn elemental_resistance(&self, element: Element) -> f64 {
        self.resistances.get(&element).copied().unwrap_or_default()
    }

    /// Strongest spiritual-root element; ties go to the earlier element.
    pub fn dominant_element(&self) -> Option<Element> {
        self.spiritual_roots
            .iter()
            .filter(|(_, affinity)| **affinity > 0.0)
            .fold(None, |best: Option<(Element, f64)>, (element, affinity)| match best {
                Some((_, top)) if top >= *affinity => best,
                _ => Some((*element, *affinity)),
            })
            .map(|(element, _)| element)
    }
}
