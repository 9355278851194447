//! Encounter state: participants, teams, turn order and the running log.
//!
//! The encounter is an arena of [`Combatant`]s addressed by [`CombatantId`].
//! It owns everything that must survive a snapshot; the engine that drives it
//! only adds the ruleset and the random stream.

mod turns;

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::combatant::{Combatant, CombatantId, TeamId};
use crate::error::CombatError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterPhase {
    #[default]
    Setup,
    Active,
    Terminal,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub round: u32,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    round: u32,
    participants: Vec<Combatant>,
    /// Member ids per team, in insertion order.
    teams: BTreeMap<TeamId, Vec<CombatantId>>,
    turn_order: Vec<CombatantId>,
    cursor: usize,
    /// Whose turn is in progress, once start-of-turn upkeep has run.
    active: Option<CombatantId>,
    phase: EncounterPhase,
    log: Vec<LogEntry>,
    winner: Option<TeamId>,
    fled: Vec<Combatant>,
}

impl Encounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant. During an active encounter the newcomer joins the
    /// turn order when the next round begins.
    pub fn add_participant(&mut self, combatant: Combatant) -> Result<(), CombatError> {
        if self.phase == EncounterPhase::Terminal {
            return Err(CombatError::WrongPhase {
                expected: EncounterPhase::Active,
                actual: self.phase,
            });
        }
        let id = combatant.id;
        if self.participant(id).is_some() || self.fled.iter().any(|c| c.id == id) {
            return Err(CombatError::DuplicateParticipant(id));
        }

        self.teams
            .entry(combatant.team.clone())
            .or_default()
            .push(id);
        if self.phase == EncounterPhase::Active {
            let message = format!("{} joins the battle", combatant.name);
            self.record(message);
        }
        self.participants.push(combatant);
        Ok(())
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == EncounterPhase::Terminal
    }

    pub fn winner(&self) -> Option<&TeamId> {
        self.winner.as_ref()
    }

    pub fn turn_order(&self) -> &[CombatantId] {
        &self.turn_order
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn fled(&self) -> &[Combatant] {
        &self.fled
    }

    pub fn teams(&self) -> impl Iterator<Item = (&TeamId, &[CombatantId])> {
        self.teams.iter().map(|(team, ids)| (team, ids.as_slice()))
    }

    pub fn participants(&self) -> impl Iterator<Item = &Combatant> {
        self.participants.iter()
    }

    pub fn participant(&self, id: CombatantId) -> Option<&Combatant> {
        self.participants.iter().find(|c| c.id == id)
    }

    pub fn participant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.participants.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn require(&self, id: CombatantId) -> Result<&Combatant, CombatError> {
        self.participant(id).ok_or(CombatError::ActorNotFound(id))
    }

    pub(crate) fn require_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, CombatError> {
        self.participant_mut(id).ok_or(CombatError::ActorNotFound(id))
    }

    /// Living members of every other team.
    pub fn enemies_of(&self, id: CombatantId) -> Vec<&Combatant> {
        let Some(me) = self.participant(id) else {
            return Vec::new();
        };
        self.participants
            .iter()
            .filter(|c| c.team != me.team && c.is_alive())
            .collect()
    }

    /// Living teammates, excluding `id` itself.
    pub fn allies_of(&self, id: CombatantId) -> Vec<&Combatant> {
        let Some(me) = self.participant(id) else {
            return Vec::new();
        };
        self.participants
            .iter()
            .filter(|c| c.team == me.team && c.id != id && c.is_alive())
            .collect()
    }

    pub fn are_allies(&self, a: CombatantId, b: CombatantId) -> bool {
        match (self.participant(a), self.participant(b)) {
            (Some(a), Some(b)) => a.team == b.team,
            _ => false,
        }
    }

    /// Appends a line to the battle log for the current round.
    pub fn record(&mut self, message: impl Into<String>) {
        self.log.push(LogEntry {
            round: self.round,
            message: message.into(),
        });
    }

    /// Teams that still have a living participant.
    fn standing_teams(&self) -> BTreeSet<&TeamId> {
        self.participants
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| &c.team)
            .collect()
    }

    /// Marks the encounter terminal once at most one team is left standing.
    /// Returns true if the encounter is (now) over.
    pub fn check_end(&mut self) -> bool {
        if self.phase == EncounterPhase::Terminal {
            return true;
        }
        if self.phase != EncounterPhase::Active {
            return false;
        }

        let standing = self.standing_teams();
        if standing.len() > 1 {
            return false;
        }

        let winner = standing.into_iter().next().cloned();
        self.phase = EncounterPhase::Terminal;
        self.active = None;
        let message = match &winner {
            Some(team) => format!("The battle is over. {team} stands victorious"),
            None => "The battle is over. No one is left standing".to_owned(),
        };
        info!(
            target: "combat::encounter",
            round = self.round,
            winner = winner.as_ref().map(|t| t.0.as_str()),
            "encounter ended"
        );
        self.record(message);
        self.winner = winner;
        true
    }

    /// Moves a participant out of the fight into the fled list.
    pub(crate) fn withdraw(&mut self, id: CombatantId) -> Option<&Combatant> {
        let index = self.participants.iter().position(|c| c.id == id)?;
        self.remove_from_order(id);
        let combatant = self.participants.remove(index);
        info!(target: "combat::encounter", combatant = %id, "fled the battle");
        self.fled.push(combatant);
        self.fled.last()
    }
}
