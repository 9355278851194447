//! Point-in-time view of every attribute.

use super::{Attribute, DerivedStats};
use crate::cultivation::Realm;

/// Effective base values: stored base plus every modifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseValues {
    pub strength: f64,
    pub constitution: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub willpower: f64,
    pub comprehension: f64,
    pub luck: f64,
    pub spiritual_root_purity: f64,
    pub cultivation_level: f64,
}

impl BaseValues {
    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        let value = match attribute {
            Attribute::Strength => self.strength,
            Attribute::Constitution => self.constitution,
            Attribute::Agility => self.agility,
            Attribute::Intelligence => self.intelligence,
            Attribute::Willpower => self.willpower,
            Attribute::Comprehension => self.comprehension,
            Attribute::Luck => self.luck,
            Attribute::SpiritualRootPurity => self.spiritual_root_purity,
            Attribute::CultivationLevel => self.cultivation_level,
            _ => return None,
        };
        Some(value)
    }
}

/// Every attribute value locked at one moment, used for action resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub base: BaseValues,
    pub derived: DerivedStats,
    pub realm: Realm,
}

impl StatsSnapshot {
    /// Value of any attribute. The enum is closed, so this is total.
    pub fn get(&self, attribute: Attribute) -> f64 {
        self.base
            .get(attribute)
            .or_else(|| self.derived.get(attribute))
            .unwrap_or_default()
    }
}
