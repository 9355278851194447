//! Turn loop that pairs a [`CombatEngine`] with action providers.
//!
//! Combatants with a personality are driven by the NPC provider (the
//! behavior-tree AI unless replaced); combatants without one ask the player
//! provider. A [`Session`] borrows its [`Ruleset`] for its whole life.

use combat_core::{
    ActionRequest, ActionResult, CombatEngine, CombatantId, Encounter, EncounterPhase,
    EncounterSnapshot, LogEntry, Ruleset, TeamId,
};
use tracing::{debug, info};

use crate::api::{ActionProvider, ProviderKind, Result, RuntimeError};
use crate::providers::ai::{AiConfig, AiProvider};

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub round: u32,
    pub actor: CombatantId,
    pub provider: ProviderKind,
    pub request: ActionRequest,
    pub result: ActionResult,
}

/// Outcome of [`Session::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub winner: Option<TeamId>,
    pub rounds: u32,
    pub turns: u32,
    /// False when the turn cap stopped the fight.
    pub finished: bool,
    pub fled: Vec<CombatantId>,
    pub log: Vec<LogEntry>,
}

pub struct Session<'r> {
    engine: CombatEngine<'r>,
    player_provider: Option<Box<dyn ActionProvider>>,
    npc_provider: Box<dyn ActionProvider>,
    seed: u64,
    turns: u32,
}

impl<'r> Session<'r> {
    /// Create a new session builder
    pub fn builder(ruleset: &'r Ruleset) -> SessionBuilder<'r> {
        SessionBuilder::new(ruleset)
    }

    pub fn engine(&self) -> &CombatEngine<'r> {
        &self.engine
    }

    pub fn encounter(&self) -> &Encounter {
        self.engine.encounter()
    }

    /// Seed the combat stream and the AI were started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_over(&self) -> bool {
        self.engine.is_over()
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        self.engine.snapshot()
    }

    /// Set the player action provider
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Set the NPC action provider
    pub fn set_npc_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.npc_provider = Box::new(provider);
    }

    /// Plays the next turn. Returns `None` once the encounter is over.
    ///
    /// A player-controlled combatant without a player provider is an error;
    /// the turn is left pending so a provider can be set and the call retried.
    pub fn play_turn(&mut self) -> Result<Option<TurnReport>> {
        let Some(actor) = self.engine.current_actor() else {
            return Ok(None);
        };
        let controlled = self
            .engine
            .encounter()
            .participant(actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?
            .personality
            .is_none();

        let (provider, kind) = if controlled {
            let provider = self
                .player_provider
                .as_mut()
                .ok_or(RuntimeError::ProviderNotSet {
                    kind: ProviderKind::Player,
                })?;
            (provider, ProviderKind::Player)
        } else {
            (&mut self.npc_provider, ProviderKind::Npc)
        };

        let request = provider.provide_action(actor, &self.engine)?;
        if request.actor != actor {
            return Err(RuntimeError::InvalidActionActor {
                expected: actor,
                provided: request.actor,
            });
        }

        let round = self.engine.encounter().round();
        let result = self.engine.take_turn(&request)?;
        self.turns += 1;
        debug!(
            target: "runtime::session",
            round,
            actor = %actor,
            provider = %kind,
            success = result.success,
            message = %result.message,
            "turn played"
        );

        Ok(Some(TurnReport {
            round,
            actor,
            provider: kind,
            request,
            result,
        }))
    }

    /// Plays until the encounter ends or `max_turns` more turns were played.
    pub fn run(&mut self, max_turns: u32) -> Result<SessionSummary> {
        let mut played = 0;
        while played < max_turns {
            if self.play_turn()?.is_none() {
                break;
            }
            played += 1;
        }

        let summary = self.summary();
        info!(
            target: "runtime::session",
            winner = ?summary.winner,
            rounds = summary.rounds,
            turns = summary.turns,
            finished = summary.finished,
            "session stopped"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> SessionSummary {
        let encounter = self.engine.encounter();
        SessionSummary {
            winner: encounter.winner().cloned(),
            rounds: encounter.round(),
            turns: self.turns,
            finished: encounter.is_over(),
            fled: encounter.fled().iter().map(|combatant| combatant.id).collect(),
            log: encounter.log().to_vec(),
        }
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("seed", &self.seed)
            .field("turns", &self.turns)
            .field("round", &self.engine.encounter().round())
            .field("phase", &self.engine.encounter().phase())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder<'r> {
    ruleset: &'r Ruleset,
    encounter: Option<Encounter>,
    snapshot: Option<EncounterSnapshot>,
    seed: Option<u64>,
    ai_config: AiConfig,
    player_provider: Option<Box<dyn ActionProvider>>,
    npc_provider: Option<Box<dyn ActionProvider>>,
}

impl<'r> SessionBuilder<'r> {
    fn new(ruleset: &'r Ruleset) -> Self {
        Self {
            ruleset,
            encounter: None,
            snapshot: None,
            seed: None,
            ai_config: AiConfig::default(),
            player_provider: None,
            npc_provider: None,
        }
    }

    /// Encounter in setup phase; the session starts it.
    pub fn encounter(mut self, encounter: Encounter) -> Self {
        self.encounter = Some(encounter);
        self
    }

    /// Resume from a snapshot instead of a fresh encounter. The snapshot's
    /// random stream is kept; the seed only drives the AI.
    pub fn snapshot(mut self, snapshot: EncounterSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Fixes the seed. Without one the session draws a random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn ai_config(mut self, config: AiConfig) -> Self {
        self.ai_config = config;
        self
    }

    /// Set the player action provider
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Replace the default AI provider
    pub fn npc_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.npc_provider = Some(Box::new(provider));
        self
    }

    pub fn build(self) -> Result<Session<'r>> {
        let seed = self.seed.unwrap_or_else(rand::random);

        let engine = match (self.snapshot, self.encounter) {
            (Some(snapshot), _) => {
                let mut engine = CombatEngine::restore(self.ruleset, snapshot)?;
                if engine.encounter().phase() == EncounterPhase::Setup {
                    engine.start()?;
                }
                engine
            }
            (None, Some(encounter)) => {
                let mut engine = CombatEngine::new(self.ruleset, encounter, seed);
                engine.start()?;
                engine
            }
            (None, None) => return Err(RuntimeError::MissingEncounter),
        };

        let npc_provider = match self.npc_provider {
            Some(provider) => provider,
            None => Box::new(AiProvider::new(self.ai_config, seed)),
        };

        info!(
            target: "runtime::session",
            seed,
            participants = engine.encounter().participants().count(),
            "session ready"
        );

        Ok(Session {
            engine,
            player_provider: self.player_provider,
            npc_provider,
            seed,
            turns: 0,
        })
    }
}
