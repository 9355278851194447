//! Threat evaluation.
//!
//! Every living enemy gets a score built from its attack power and a few
//! multipliers. Scores are recomputed for each decision and never stored.

use combat_core::{Combatant, CombatantId, Ruleset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::AiConfig;
use super::context::usable_skills;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreatInfo {
    pub target: CombatantId,
    pub score: f64,
    pub level: ThreatLevel,
    pub reasons: Vec<String>,
}

/// Scores every living enemy from `evaluator`'s point of view.
///
/// The result is sorted by descending score; equal scores keep the order of
/// `enemies`.
pub fn evaluate_threats(
    evaluator: &Combatant,
    enemies: &[&Combatant],
    ruleset: &Ruleset,
    config: &AiConfig,
) -> Vec<ThreatInfo> {
    let mut threats: Vec<ThreatInfo> = enemies
        .iter()
        .filter(|enemy| enemy.is_alive())
        .map(|enemy| assess(evaluator, enemy, ruleset, config))
        .collect();
    threats.sort_by(|a, b| b.score.total_cmp(&a.score));
    threats
}

fn assess(evaluator: &Combatant, enemy: &Combatant, ruleset: &Ruleset, config: &AiConfig) -> ThreatInfo {
    let attack_power = enemy.stats().derived.attack_power;
    let mut score = config.threat_factor * attack_power;
    let mut reasons = vec![format!("attack power {attack_power:.0}")];

    if enemy.health_fraction() < config.weakened_enemy {
        score *= 0.5;
        reasons.push("badly wounded".to_owned());
    }

    if usable_skills(enemy, ruleset).any(|skill| skill.is_disruptive()) {
        score *= config.disruptor_factor;
        reasons.push("has a control or debuff technique ready".to_owned());
    }

    if enemy.level() > evaluator.level() {
        let gap = enemy.level() - evaluator.level();
        score *= 1.0 + config.level_gap_factor * f64::from(gap);
        reasons.push(format!("{gap} levels above us"));
    }

    let level = config.threat.level(score);
    debug!(
        target: "ai::threat",
        evaluator = %evaluator.id,
        enemy = %enemy.id,
        score,
        %level,
        "threat assessed"
    );
    ThreatInfo {
        target: enemy.id,
        score,
        level,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        AttributeSet, BaseStats, Formula, Realm, RulesetParts, SkillDef, SkillEffect, SkillId,
        SkillKind, TargetType, TeamId,
    };

    use super::*;

    fn seal() -> SkillDef {
        SkillDef {
            id: SkillId::from("seal"),
            name: "封灵印".to_owned(),
            kind: SkillKind::Control,
            target: TargetType::SingleEnemy,
            max_targets: 1,
            cost: Default::default(),
            cooldown: 0,
            element: None,
            effects: vec![SkillEffect::Damage {
                formula: Formula::constant(1.0),
                damage_type: Default::default(),
            }],
            required_level: 0,
            required_realm: None,
            description: String::new(),
        }
    }

    fn ruleset() -> Ruleset {
        Ruleset::new(RulesetParts {
            skills: vec![seal()],
            ..Default::default()
        })
        .unwrap()
    }

    fn cultivator(id: u32, strength: f64, level: u32) -> Combatant {
        let base = BaseStats {
            strength,
            cultivation_level: level,
            ..BaseStats::default()
        };
        Combatant::new(
            CombatantId(id),
            format!("cultivator-{id}"),
            TeamId::new(format!("team-{id}")),
            AttributeSet::new(base, Realm::QiRefining),
        )
    }

    fn score_of(evaluator: &Combatant, enemy: &Combatant) -> ThreatInfo {
        let threats = evaluate_threats(evaluator, &[enemy], &ruleset(), &AiConfig::default());
        threats.into_iter().next().unwrap()
    }

    #[test]
    fn base_threat_is_half_attack_power() {
        let me = cultivator(1, 10.0, 1);
        // attack power 50 * 2 + 1 * 5 = 105
        let info = score_of(&me, &cultivator(2, 50.0, 1));
        assert!((info.score - 52.5).abs() < 1e-9);
        assert_eq!(info.level, ThreatLevel::Medium);
        assert_eq!(info.reasons.len(), 1);
    }

    #[test]
    fn wounded_enemy_counts_half() {
        let me = cultivator(1, 10.0, 1);
        let mut enemy = cultivator(2, 50.0, 1);
        let max = enemy.resources.health;
        enemy.take_damage(max * 0.75);

        let info = score_of(&me, &enemy);
        assert!((info.score - 26.25).abs() < 1e-9);
        assert_eq!(info.level, ThreatLevel::Low);
    }

    #[test]
    fn ready_control_skill_raises_threat() {
        let me = cultivator(1, 10.0, 1);
        let enemy = cultivator(2, 50.0, 1).with_skill("seal");

        let info = score_of(&me, &enemy);
        assert!((info.score - 78.75).abs() < 1e-9);
    }

    #[test]
    fn skill_on_cooldown_does_not_count() {
        let me = cultivator(1, 10.0, 1);
        let mut enemy = cultivator(2, 50.0, 1).with_skill("seal");
        enemy.start_cooldown(&SkillId::from("seal"), 2);

        let info = score_of(&me, &enemy);
        assert!((info.score - 52.5).abs() < 1e-9);
    }

    #[test]
    fn higher_level_enemy_scales_by_gap() {
        let me = cultivator(1, 10.0, 1);
        // attack power 50 * 2 + 3 * 5 = 115, gap 2
        let info = score_of(&me, &cultivator(2, 50.0, 3));
        assert!((info.score - 57.5 * 1.2).abs() < 1e-9);

        let lower = score_of(&cultivator(3, 10.0, 5), &cultivator(2, 50.0, 3));
        assert!((lower.score - 57.5).abs() < 1e-9);
    }

    #[test]
    fn sorted_descending_and_stable() {
        let me = cultivator(1, 10.0, 1);
        let weak = cultivator(2, 20.0, 1);
        let strong = cultivator(3, 110.0, 1);
        let twin = cultivator(4, 20.0, 1);
        let mut dead = cultivator(5, 99.0, 1);
        dead.take_damage(f64::MAX);

        let threats = evaluate_threats(
            &me,
            &[&weak, &strong, &dead, &twin],
            &ruleset(),
            &AiConfig::default(),
        );
        let order: Vec<u32> = threats.iter().map(|t| t.target.0).collect();
        assert_eq!(order, vec![3, 2, 4]);
        assert_eq!(threats[0].level, ThreatLevel::High);
    }
}
