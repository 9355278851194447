//! Combat Resolution Engine.
//!
//! [`CombatEngine`] drives one [`Encounter`] under a borrowed [`Ruleset`].
//! Every action goes through the same pipeline:
//!
//! 1. actor check (alive, not stunned or frozen)
//! 2. validation of targets, skill or item
//! 3. world-law enforcement, which may intercept the action
//! 4. dispatch to the resolver for the action kind
//! 5. defeat bookkeeping and the terminal check
//!
//! Player mistakes come back as rejected [`ActionResult`]s. Only contract
//! violations (unknown actor, inactive encounter) are `Err`.

mod attack;
mod effects;
mod support;
mod validate;

pub use attack::{base_damage, element_multiplier, hit_chance};
pub use support::flee_chance;
pub use validate::check_skill;

use tracing::{debug, info};

use crate::action::{ActionFailure, ActionRequest, ActionResult};
use crate::combatant::CombatantId;
use crate::encounter::{Encounter, EncounterPhase};
use crate::error::{CombatError, GameError};
use crate::law::ActionContext;
use crate::rng::CombatRng;
use crate::ruleset::Ruleset;

use validate::Plan;

pub struct CombatEngine<'r> {
    ruleset: &'r Ruleset,
    encounter: Encounter,
    rng: CombatRng,
}

impl<'r> CombatEngine<'r> {
    pub fn new(ruleset: &'r Ruleset, encounter: Encounter, seed: u64) -> Self {
        Self::with_rng(ruleset, encounter, CombatRng::new(seed))
    }

    pub fn with_rng(ruleset: &'r Ruleset, encounter: Encounter, rng: CombatRng) -> Self {
        Self {
            ruleset,
            encounter,
            rng,
        }
    }

    pub fn ruleset(&self) -> &'r Ruleset {
        self.ruleset
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn encounter_mut(&mut self) -> &mut Encounter {
        &mut self.encounter
    }

    pub fn rng(&self) -> &CombatRng {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut CombatRng {
        &mut self.rng
    }

    pub fn into_parts(self) -> (Encounter, CombatRng) {
        (self.encounter, self.rng)
    }

    pub fn start(&mut self) -> Result<(), CombatError> {
        self.encounter.start()
    }

    pub fn is_over(&self) -> bool {
        self.encounter.is_over()
    }

    /// The combatant whose turn it is. Runs start-of-turn upkeep once per turn.
    pub fn current_actor(&mut self) -> Option<CombatantId> {
        self.encounter.current_actor()
    }

    /// Executes `request` for whoever it names, then ends the turn in progress.
    ///
    /// A request from anyone but the current actor is rejected and leaves the
    /// turn untouched.
    pub fn take_turn(&mut self, request: &ActionRequest) -> Result<ActionResult, CombatError> {
        self.ensure_active()?;
        let current = self.encounter.current_actor();
        if current != Some(request.actor) {
            let actor = self.encounter.require(request.actor)?;
            let failure = ActionFailure::NotYourTurn(actor.name.clone());
            return Ok(ActionResult::rejected(request.actor, failure));
        }

        let result = self.execute_action(request)?;
        self.encounter.end_turn();
        Ok(result)
    }

    /// Resolves one action. Does not check or advance the turn order.
    pub fn execute_action(&mut self, request: &ActionRequest) -> Result<ActionResult, CombatError> {
        self.ensure_active()?;

        let plan = match self.validate(request)? {
            Ok(plan) => plan,
            Err(failure) => {
                debug!(
                    target: "combat::engine",
                    actor = %request.actor,
                    code = failure.error_code(),
                    "action rejected"
                );
                return Ok(ActionResult::rejected(request.actor, failure));
            }
        };

        let mut ctx = ActionContext::new();
        self.enforce_laws(request.actor, &plan, &mut ctx)?;
        if ctx.cancelled {
            return self.intercept(request.actor, &ctx);
        }

        let alive_before: Vec<CombatantId> = self
            .encounter
            .participants()
            .filter(|c| c.is_alive())
            .map(|c| c.id)
            .collect();

        let mut result = match plan {
            Plan::Attack { target } => self.basic_attack(request.actor, target)?,
            Plan::Skill { skill, targets } => self.cast_skill(request.actor, skill, &targets)?,
            Plan::Item { item, targets } => self.use_item(request.actor, item, &targets)?,
            Plan::Defend => self.defend(request.actor)?,
            Plan::Flee => self.flee(request.actor)?,
            Plan::Wait => self.wait(request.actor)?,
        };

        if ctx.has_events() {
            let actor = self.encounter.require_mut(request.actor)?;
            result.law_messages = ctx.apply_events(actor);
        }

        self.finish(&mut result, &alive_before);
        Ok(result)
    }

    fn ensure_active(&self) -> Result<(), CombatError> {
        match self.encounter.phase() {
            EncounterPhase::Active => Ok(()),
            actual => Err(CombatError::WrongPhase {
                expected: EncounterPhase::Active,
                actual,
            }),
        }
    }

    /// Runs the heaven laws for an action.
    ///
    /// The laws are independent. The realm-gap law stops at the first target
    /// that cancels, but a forbidden technique is still punished, so its
    /// backlash lands after the thunder.
    fn enforce_laws(
        &mut self,
        actor_id: CombatantId,
        plan: &Plan<'r>,
        ctx: &mut ActionContext,
    ) -> Result<(), CombatError> {
        let ruleset = self.ruleset;
        let laws = ruleset.laws();
        let hostile: &[CombatantId] = match plan {
            Plan::Attack { target } => std::slice::from_ref(target),
            Plan::Skill { skill, targets } if skill.is_damaging() && skill.target.hostile() => {
                targets
            }
            _ => &[],
        };

        let actor = self.encounter.require(actor_id)?;
        for &target in hostile {
            laws.enforce(actor, self.encounter.participant(target), ctx);
            if ctx.cancelled {
                break;
            }
        }

        if let Plan::Skill { skill, .. } = plan {
            let actor = self.encounter.require_mut(actor_id)?;
            laws.check_forbidden_art(actor, &skill.name, ctx);
        }
        Ok(())
    }

    fn intercept(
        &mut self,
        actor_id: CombatantId,
        ctx: &ActionContext,
    ) -> Result<ActionResult, CombatError> {
        let actor = self.encounter.require_mut(actor_id)?;
        let messages = ctx.apply_events(actor);
        let reason = ctx
            .reason
            .clone()
            .unwrap_or_else(|| "Heaven forbids this action".to_owned());
        info!(
            target: "combat::law",
            actor = %actor_id,
            events = ctx.events.len(),
            "action intercepted"
        );

        self.encounter.record(reason.clone());
        for message in &messages {
            self.encounter.record(message.clone());
        }
        Ok(ActionResult::intercepted(actor_id, reason, messages))
    }

    /// Logs the result, records defeats and runs the terminal check.
    fn finish(&mut self, result: &mut ActionResult, alive_before: &[CombatantId]) {
        self.encounter.record(result.message.clone());
        for message in &result.law_messages {
            self.encounter.record(message.clone());
        }

        for &id in alive_before {
            let fallen = self
                .encounter
                .participant(id)
                .is_some_and(|c| !c.is_alive());
            if fallen && !result.defeated.contains(&id) {
                result.defeated.push(id);
            }
        }

        let credited = result
            .defeated
            .iter()
            .filter(|&&id| !self.encounter.are_allies(id, result.actor))
            .count() as u32;
        if let Some(actor) = self.encounter.participant_mut(result.actor) {
            actor.record.defeated += credited;
        }

        for &id in &result.defeated {
            self.encounter.mark_defeated(id);
        }
        self.encounter.check_end();
    }
}
