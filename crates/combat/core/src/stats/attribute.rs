//! Closed set of attribute names.

/// Every attribute a modifier, formula, or status effect can reference.
///
/// Parsing an unknown name fails; nothing silently reads as zero.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    // ========================================================================
    // Base attributes
    // ========================================================================
    Strength,
    Constitution,
    Agility,
    Intelligence,
    Willpower,
    Comprehension,
    Luck,
    SpiritualRootPurity,
    CultivationLevel,

    // ========================================================================
    // Derived attributes
    // ========================================================================
    MaxHealth,
    MaxMana,
    MaxStamina,
    AttackPower,
    SpellPower,
    Defense,
    MagicResistance,
    Speed,
    Accuracy,
    Evasion,
    CritRate,
    CritDamage,
}

impl Attribute {
    pub const fn is_base(self) -> bool {
        matches!(
            self,
            Attribute::Strength
                | Attribute::Constitution
                | Attribute::Agility
                | Attribute::Intelligence
                | Attribute::Willpower
                | Attribute::Comprehension
                | Attribute::Luck
                | Attribute::SpiritualRootPurity
                | Attribute::CultivationLevel
        )
    }

    #[inline]
    pub const fn is_derived(self) -> bool {
        !self.is_base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Attribute::AttackPower.to_string(), "attack_power");
        assert_eq!(Attribute::from_str("crit_rate"), Ok(Attribute::CritRate));
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(Attribute::from_str("charisma").is_err());
    }
}
