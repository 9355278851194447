/// Inclusive `[min, max]` band used to clamp rate-type values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Physical damage parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageParams {
    /// Fraction of defense subtracted from attack power.
    pub defense_factor: f64,
    /// Symmetric variance: the roll is uniform in `[1 - variance, 1 + variance]`.
    pub variance: f64,
    /// Floor applied before variance.
    pub minimum: f64,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            defense_factor: 0.5,
            variance: 0.1,
            minimum: 1.0,
        }
    }
}

/// Flee chance parameters: `base + per_speed × (speed - avg_enemy_speed)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleeParams {
    pub base: f64,
    pub per_speed: f64,
    pub chance: Band,
}

impl Default for FleeParams {
    fn default() -> Self {
        Self {
            base: 0.5,
            per_speed: 0.01,
            chance: Band::new(0.1, 0.9),
        }
    }
}

/// Five-element counter multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementParams {
    /// Attack element counters the defender's dominant affinity.
    pub advantage: f64,
    /// Defender's dominant affinity counters the attack element.
    pub disadvantage: f64,
    /// Clamp on elemental resistance, in percent points.
    pub resistance: Band,
}

impl Default for ElementParams {
    fn default() -> Self {
        Self {
            advantage: 1.5,
            disadvantage: 0.7,
            resistance: Band::new(0.0, 90.0),
        }
    }
}

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Hit chance clamp for basic attacks.
    pub hit_chance: Band,
    pub damage: DamageParams,
    pub flee: FleeParams,
    pub elements: ElementParams,
    /// Percentage defense bonus granted by the defend action (0.5 = +50%).
    pub defend_bonus: f64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== attribute bands (percent points) =====
    pub const CRIT_RATE_BAND: Band = Band::new(0.0, 75.0);
    pub const EVASION_BAND: Band = Band::new(0.0, 95.0);
    pub const CRIT_DAMAGE_BAND: Band = Band::new(100.0, 500.0);

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HIT_CHANCE: Band = Band::new(0.1, 0.95);
    pub const DEFAULT_DEFEND_BONUS: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            hit_chance: Self::DEFAULT_HIT_CHANCE,
            damage: DamageParams::default(),
            flee: FleeParams::default(),
            elements: ElementParams::default(),
            defend_bonus: Self::DEFAULT_DEFEND_BONUS,
        }
    }

    /// Returns the name of the first invalid field, if any.
    pub fn invalid_field(&self) -> Option<&'static str> {
        let probability = |band: &Band| band.is_valid() && band.min >= 0.0 && band.max <= 1.0;

        if !probability(&self.hit_chance) {
            return Some("hit_chance");
        }
        if !probability(&self.flee.chance) {
            return Some("flee.chance");
        }
        if !(0.0..1.0).contains(&self.damage.variance) {
            return Some("damage.variance");
        }
        if self.damage.defense_factor < 0.0 || !self.damage.defense_factor.is_finite() {
            return Some("damage.defense_factor");
        }
        if self.damage.minimum < 0.0 {
            return Some("damage.minimum");
        }
        if self.elements.advantage <= 0.0 || self.elements.disadvantage <= 0.0 {
            return Some("elements");
        }
        let resistance = &self.elements.resistance;
        if !resistance.is_valid() || resistance.min < 0.0 || resistance.max > 100.0 {
            return Some("elements.resistance");
        }
        if self.defend_bonus < 0.0 {
            return Some("defend_bonus");
        }
        None
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
