//! Base attributes - the stored layer of the stat system.
//!
//! Everything else is computed from these values plus temporary modifiers.

use super::Attribute;

/// Stored base attributes of a cultivator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub strength: f64,
    pub constitution: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub willpower: f64,
    pub comprehension: f64,
    pub luck: f64,
    /// Spiritual root purity, 0-100.
    pub spiritual_root_purity: f64,
    pub cultivation_level: u32,
}

impl BaseStats {
    pub const DEFAULT_STAT: f64 = 10.0;
    pub const DEFAULT_PURITY: f64 = 50.0;

    /// Uniform base stats, default purity and the given level.
    pub fn uniform(value: f64, cultivation_level: u32) -> Self {
        Self {
            strength: value,
            constitution: value,
            agility: value,
            intelligence: value,
            willpower: value,
            comprehension: value,
            luck: value,
            spiritual_root_purity: Self::DEFAULT_PURITY,
            cultivation_level,
        }
    }

    /// Stored value of a base attribute; `None` for derived attributes.
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
            Attribute::CultivationLevel => f64::from(self.cultivation_level),
            _ => return None,
        };
        Some(value)
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_STAT, 1)
    }
}
