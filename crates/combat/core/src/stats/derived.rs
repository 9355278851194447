//! Derived Stats - computed layer of the stat system.
//!
//! These are NOT stored - always recomputed from effective base values.

use super::Attribute;
use super::snapshot::BaseValues;
use crate::config::CombatConfig;

/// Derived combat statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub max_health: f64,
    pub max_mana: f64,
    pub max_stamina: f64,
    pub attack_power: f64,
    pub spell_power: f64,
    pub defense: f64,
    pub magic_resistance: f64,
    pub speed: f64,
    pub accuracy: f64,
    /// Percent points.
    pub evasion: f64,
    /// Percent points.
    pub crit_rate: f64,
    /// Percent; 150 means ×1.5.
    pub crit_damage: f64,
}

impl DerivedStats {
    /// Compute derived stats from effective base values (before modifiers).
    ///
    /// Base formulas:
    /// - MaxHealth: CON × 10 + Level × 20
    /// - MaxMana: INT × 8 + Purity × 2
    /// - MaxStamina: CON × 5 + STR × 3
    /// - AttackPower: STR × 2 + Level × 5
    /// - SpellPower: INT × 2 + Purity × 0.5 + Level × 3
    /// - Defense: CON × 1.5 + Level × 2
    /// - MagicResistance: WIL × 2
    /// - Speed: AGI × 1.5
    /// - Accuracy: 80 + AGI × 0.5
    /// - Evasion: AGI × 0.8
    /// - CritRate: 5 + LUCK × 0.2
    /// - CritDamage: 150 + STR × 0.5
    pub fn compute_base(base: &BaseValues) -> Self {
        let level = base.cultivation_level;
        Self {
            max_health: base.constitution * 10.0 + level * 20.0,
            max_mana: base.intelligence * 8.0 + base.spiritual_root_purity * 2.0,
            max_stamina: base.constitution * 5.0 + base.strength * 3.0,
            attack_power: base.strength * 2.0 + level * 5.0,
            spell_power: base.intelligence * 2.0 + base.spiritual_root_purity * 0.5 + level * 3.0,
            defense: base.constitution * 1.5 + level * 2.0,
            magic_resistance: base.willpower * 2.0,
            speed: base.agility * 1.5,
            accuracy: 80.0 + base.agility * 0.5,
            evasion: base.agility * 0.8,
            crit_rate: 5.0 + base.luck * 0.2,
            crit_damage: 150.0 + base.strength * 0.5,
        }
    }

    /// Adds per-attribute deltas, then clamps: rate values to their bands,
    /// resource maximums to at least 1, everything else to at least 0.
    pub fn finish(mut self, delta: impl Fn(Attribute) -> f64) -> Self {
        self.max_health = (self.max_health + delta(Attribute::MaxHealth)).max(1.0);
        self.max_mana = (self.max_mana + delta(Attribute::MaxMana)).max(0.0);
        self.max_stamina = (self.max_stamina + delta(Attribute::MaxStamina)).max(0.0);
        self.attack_power = (self.attack_power + delta(Attribute::AttackPower)).max(0.0);
        self.spell_power = (self.spell_power + delta(Attribute::SpellPower)).max(0.0);
        self.defense = (self.defense + delta(Attribute::Defense)).max(0.0);
        self.magic_resistance =
            (self.magic_resistance + delta(Attribute::MagicResistance)).max(0.0);
        self.speed = (self.speed + delta(Attribute::Speed)).max(0.0);
        self.accuracy = (self.accuracy + delta(Attribute::Accuracy)).max(0.0);
        self.evasion = CombatConfig::EVASION_BAND.clamp(self.evasion + delta(Attribute::Evasion));
        self.crit_rate =
            CombatConfig::CRIT_RATE_BAND.clamp(self.crit_rate + delta(Attribute::CritRate));
        self.crit_damage =
            CombatConfig::CRIT_DAMAGE_BAND.clamp(self.crit_damage + delta(Attribute::CritDamage));
        self
    }

    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        let value = match attribute {
            Attribute::MaxHealth => self.max_health,
            Attribute::MaxMana => self.max_mana,
            Attribute::MaxStamina => self.max_stamina,
            Attribute::AttackPower => self.attack_power,
            Attribute::SpellPower => self.spell_power,
            Attribute::Defense => self.defense,
            Attribute::MagicResistance => self.magic_resistance,
            Attribute::Speed => self.speed,
            Attribute::Accuracy => self.accuracy,
            Attribute::Evasion => self.evasion,
            Attribute::CritRate => self.crit_rate,
            Attribute::CritDamage => self.crit_damage,
            _ => return None,
        };
        Some(value)
    }
}
