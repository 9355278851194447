use tracing::{debug, info};

use super::{Encounter, EncounterPhase};
use crate::combatant::CombatantId;
use crate::error::CombatError;

/// Turn scheduling and start-of-turn upkeep.
impl Encounter {
    /// Moves from setup to active and rolls the first round's turn order.
    pub fn start(&mut self) -> Result<(), CombatError> {
        if self.phase != EncounterPhase::Setup {
            return Err(CombatError::WrongPhase {
                expected: EncounterPhase::Setup,
                actual: self.phase,
            });
        }
        if self.standing_teams().len() < 2 {
            return Err(CombatError::NotEnoughTeams);
        }

        self.phase = EncounterPhase::Active;
        self.round = 1;
        self.refresh_turn_order();
        info!(
            target: "combat::encounter",
            participants = self.participants.len(),
            teams = self.teams.len(),
            "encounter started"
        );
        self.record("The battle begins");
        Ok(())
    }

    /// Living participants by descending speed. Ties keep insertion order.
    fn refresh_turn_order(&mut self) {
        let mut order: Vec<(CombatantId, f64)> = self
            .participants
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| (c.id, c.stats().derived.speed))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));
        self.turn_order = order.into_iter().map(|(id, _)| id).collect();
        self.cursor = 0;
        debug!(target: "combat::encounter", round = self.round, order = ?self.turn_order, "turn order");
    }

    fn start_round(&mut self) {
        self.round += 1;
        self.refresh_turn_order();
        self.record(format!("Round {} begins", self.round));
    }

    /// Whose turn it is, without running upkeep.
    pub fn peek_actor(&self) -> Option<CombatantId> {
        self.active
    }

    /// Returns the combatant whose turn it is, running start-of-turn upkeep
    /// the first time a turn is reached.
    ///
    /// Upkeep ticks the combatant's status effects. A combatant that was
    /// stunned or frozen when its turn came loses the turn; one killed by a
    /// periodic effect is removed. Dead participants are skipped and running
    /// past the end of the order starts a new round. If every living
    /// combatant is held by a permanent stun or freeze, nobody can ever act
    /// again and the encounter ends without a winner. Returns `None` once the
    /// encounter is not active.
    pub fn current_actor(&mut self) -> Option<CombatantId> {
        loop {
            if self.phase != EncounterPhase::Active {
                return None;
            }
            if let Some(id) = self.active {
                return Some(id);
            }

            if self.cursor >= self.turn_order.len() {
                self.start_round();
                if self.turn_order.is_empty() {
                    self.check_end();
                    return None;
                }
                continue;
            }

            let id = self.turn_order[self.cursor];
            let Some(combatant) = self.participant_mut(id) else {
                self.turn_order.remove(self.cursor);
                continue;
            };
            if !combatant.is_alive() {
                self.cursor += 1;
                continue;
            }

            let blocked = combatant.status.prevents_action();
            let report = combatant.tick_status();
            let alive = combatant.is_alive();
            let name = combatant.name.clone();

            if report.damage > 0.0 {
                self.record(format!("{name} suffers {:.0} damage from lingering effects", report.damage));
            }
            if report.healing > 0.0 && alive {
                self.record(format!("{name} recovers {:.0} health", report.healing));
            }
            for expired in &report.expired {
                self.record(format!("{expired} on {name} fades"));
            }

            if !alive {
                self.mark_defeated(id);
                self.check_end();
                continue;
            }
            if blocked {
                debug!(target: "combat::encounter", combatant = %id, "turn lost to incapacitation");
                self.record(format!("{name} cannot move and loses the turn"));
                if let Some(combatant) = self.participant_mut(id) {
                    combatant.tick_cooldowns();
                }
                self.cursor += 1;
                if self.nobody_can_act() {
                    self.end_in_stalemate();
                    return None;
                }
                continue;
            }

            self.active = Some(id);
            return Some(id);
        }
    }

    /// Finishes the turn in progress, ticks the actor's cooldowns and
    /// advances the pointer.
    ///
    /// Cooldowns tick after the action, so a cooldown of `n` blocks the skill
    /// for the caster's next `n` turns.
    pub fn end_turn(&mut self) {
        let Some(id) = self.active.take() else {
            return;
        };
        if let Some(combatant) = self.participant_mut(id) {
            combatant.tick_cooldowns();
        }
        // The actor may already have left the order (fled), which shifted
        // the next combatant under the cursor.
        if self.turn_order.get(self.cursor) == Some(&id) {
            self.cursor += 1;
        }
    }

    fn nobody_can_act(&self) -> bool {
        let mut living = self.participants.iter().filter(|c| c.is_alive()).peekable();
        living.peek().is_some() && living.all(|c| c.status.permanently_incapacitated())
    }

    fn end_in_stalemate(&mut self) {
        self.phase = EncounterPhase::Terminal;
        self.active = None;
        self.winner = None;
        info!(target: "combat::encounter", round = self.round, "encounter ended in stalemate");
        self.record("The battle is over. Every combatant is sealed and none can move");
    }

    /// Drops `id` from the current turn order, keeping the cursor on the same
    /// upcoming combatant.
    pub(crate) fn remove_from_order(&mut self, id: CombatantId) {
        if let Some(index) = self.turn_order.iter().position(|&other| other == id) {
            self.turn_order.remove(index);
            if index < self.cursor {
                self.cursor -= 1;
            }
        }
    }

    /// Records a defeat and removes the combatant from the turn order.
    pub(crate) fn mark_defeated(&mut self, id: CombatantId) {
        self.remove_from_order(id);
        if self.active == Some(id) {
            self.active = None;
        }
        let name = self
            .participant(id)
            .map_or_else(|| id.to_string(), |c| c.name.clone());
        info!(target: "combat::encounter", combatant = %id, round = self.round, "combatant defeated");
        self.record(format!("{name} has been defeated"));
    }
}
