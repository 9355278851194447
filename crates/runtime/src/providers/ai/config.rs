//! AI tuning knobs.

use serde::{Deserialize, Serialize};

use super::threat::ThreatLevel;
use super::strategy::TargetStrategy;

/// Score cutoffs for [`ThreatLevel`] buckets. A score at a cutoff belongs to
/// the higher bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatCutoffs {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for ThreatCutoffs {
    fn default() -> Self {
        Self {
            medium: 50.0,
            high: 100.0,
            critical: 150.0,
        }
    }
}

impl ThreatCutoffs {
    pub fn level(&self, score: f64) -> ThreatLevel {
        if score >= self.critical {
            ThreatLevel::Critical
        } else if score >= self.high {
            ThreatLevel::High
        } else if score >= self.medium {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }
}

/// Thresholds used by threat scoring and the personality trees.
///
/// All health and mana values are fractions of the maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub threat: ThreatCutoffs,
    /// Share of attack power counted as base threat.
    pub threat_factor: f64,
    /// Enemies below this health are considered half as dangerous.
    pub weakened_enemy: f64,
    /// Multiplier for an enemy holding a usable control or debuff skill.
    pub disruptor_factor: f64,
    /// Extra threat per cultivation level the enemy is above the evaluator.
    pub level_gap_factor: f64,
    /// Self health that triggers emergency behavior.
    pub critical_health: f64,
    /// Self health that makes cautious personalities turtle up.
    pub low_health: f64,
    /// Allies below this health are healed.
    pub injured_ally: f64,
    pub low_mana: f64,
    pub strategy: TargetStrategy,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            threat: ThreatCutoffs::default(),
            threat_factor: 0.5,
            weakened_enemy: 0.3,
            disruptor_factor: 1.5,
            level_gap_factor: 0.1,
            critical_health: 0.2,
            low_health: 0.4,
            injured_ally: 0.5,
            low_mana: 0.25,
            strategy: TargetStrategy::HighestThreat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoffs_belong_to_the_higher_bucket() {
        let cutoffs = ThreatCutoffs::default();
        assert_eq!(cutoffs.level(49.9), ThreatLevel::Low);
        assert_eq!(cutoffs.level(50.0), ThreatLevel::Medium);
        assert_eq!(cutoffs.level(100.0), ThreatLevel::High);
        assert_eq!(cutoffs.level(150.0), ThreatLevel::Critical);
    }
}
