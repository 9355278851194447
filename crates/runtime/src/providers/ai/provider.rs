//! Behavior-tree AI action provider.

use combat_core::{ActionRequest, CombatEngine, CombatantId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::nodes::ATTACK_PRIORITY;
use super::presets::PresetTrees;
use super::{AiConfig, Decision, DecisionContext};
use crate::api::{ActionProvider, Result};

/// Evaluates personality trees against a fresh [`DecisionContext`].
///
/// The engine itself is stateless between decisions; all randomness comes
/// from the caller so replays stay deterministic.
#[derive(Debug, Default)]
pub struct DecisionEngine {
    config: AiConfig,
    trees: PresetTrees,
}

impl DecisionEngine {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            trees: PresetTrees::new(),
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Runs the personality tree only. `None` means no branch applied.
    pub fn evaluate(&self, ctx: &DecisionContext) -> Option<Decision> {
        self.trees.get(ctx.personality).tick(ctx).into_decision()
    }

    /// Decides what `actor` does this turn.
    ///
    /// Falls back to a basic attack on a random enemy that can be struck,
    /// or to waiting when there is none. Enemies shielded by the realm-gap
    /// law do not count: when every living enemy is shielded the combatant
    /// waits instead of striking one at random and calling down thunder.
    pub fn decide_action<R: rand::Rng + ?Sized>(
        &self,
        engine: &CombatEngine<'_>,
        actor: CombatantId,
        rng: &mut R,
    ) -> Result<Decision> {
        let ctx = DecisionContext::build(engine, actor, &self.config)?;

        let tree = self.trees.get(ctx.personality);
        let decision = match tree.tick(&ctx).into_decision() {
            Some(decision) => decision,
            None => {
                debug!(
                    target: "ai::decision",
                    actor = %actor,
                    root = tree.name(),
                    "tree produced nothing, falling back"
                );
                fallback(&ctx, rng)
            }
        };

        debug!(
            target: "ai::decision",
            actor = %actor,
            personality = %ctx.personality,
            priority = decision.priority,
            reasoning = %decision.reasoning,
            "decision made"
        );
        Ok(decision)
    }
}

// Departs from the plain "any living enemy" fallback on purpose: striking a
// law-shielded enemy is always intercepted, so waiting is the better turn.
fn fallback<R: rand::Rng + ?Sized>(ctx: &DecisionContext, rng: &mut R) -> Decision {
    let targets: Vec<CombatantId> = ctx.targets().map(|enemy| enemy.id).collect();
    match targets.choose(rng) {
        Some(&target) => Decision::new(
            ActionRequest::attack(ctx.id(), target),
            ATTACK_PRIORITY,
            "nothing better to do, lashing out",
        ),
        None => Decision::new(ActionRequest::wait(ctx.id()), 0.0, "no one to fight"),
    }
}

/// [`ActionProvider`] driving every combatant with a personality.
#[derive(Debug)]
pub struct AiProvider {
    engine: DecisionEngine,
    rng: StdRng,
}

impl AiProvider {
    pub fn new(config: AiConfig, seed: u64) -> Self {
        Self {
            engine: DecisionEngine::new(config),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn decision_engine(&self) -> &DecisionEngine {
        &self.engine
    }
}

impl ActionProvider for AiProvider {
    fn provide_action(&mut self, actor: CombatantId, engine: &CombatEngine<'_>) -> Result<ActionRequest> {
        self.engine
            .decide_action(engine, actor, &mut self.rng)
            .map(|decision| decision.request)
    }
}
