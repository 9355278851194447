//! Current resource pools.
//!
//! Maximums are derived (see [`DerivedStats`](super::DerivedStats)); only the
//! current values are stored. Current values are never negative.

use super::StatsSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Health,
    Mana,
    Stamina,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub health: f64,
    pub mana: f64,
    pub stamina: f64,
}

impl Resources {
    /// Full pools for the given stats.
    pub fn full(stats: &StatsSnapshot) -> Self {
        Self {
            health: stats.derived.max_health,
            mana: stats.derived.max_mana,
            stamina: stats.derived.max_stamina,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Health => self.health,
            ResourceKind::Mana => self.mana,
            ResourceKind::Stamina => self.stamina,
        }
    }

    pub fn max_of(stats: &StatsSnapshot, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Health => stats.derived.max_health,
            ResourceKind::Mana => stats.derived.max_mana,
            ResourceKind::Stamina => stats.derived.max_stamina,
        }
    }

    /// Sets a pool, clamped to `[0, max]`.
    pub fn set(&mut self, kind: ResourceKind, value: f64, stats: &StatsSnapshot) {
        let clamped = value.clamp(0.0, Self::max_of(stats, kind));
        match kind {
            ResourceKind::Health => self.health = clamped,
            ResourceKind::Mana => self.mana = clamped,
            ResourceKind::Stamina => self.stamina = clamped,
        }
    }

    /// Clamps every pool into `[0, max]` after maximums changed.
    pub fn clamp_to(&mut self, stats: &StatsSnapshot) {
        for kind in [ResourceKind::Health, ResourceKind::Mana, ResourceKind::Stamina] {
            self.set(kind, self.get(kind), stats);
        }
    }

    /// Fraction of the pool remaining, 0.0 when the maximum is zero.
    pub fn fraction(&self, kind: ResourceKind, stats: &StatsSnapshot) -> f64 {
        let max = Self::max_of(stats, kind);
        if max <= 0.0 { 0.0 } else { self.get(kind) / max }
    }
}
