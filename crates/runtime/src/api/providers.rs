//! Abstraction for sourcing player and NPC intent.
//!
//! Session users plug in [`ActionProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or AI policies.
use std::collections::VecDeque;

use combat_core::{ActionRequest, CombatEngine, CombatantId};

use super::errors::{Result, RuntimeError};

/// Trait for providing actions based on the current encounter.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - NPC AI decisions
/// - Scripted/replayed actions
/// - Testing fixtures
pub trait ActionProvider: Send {
    /// Provide an action for `actor`, whose turn it is.
    ///
    /// The engine is read-only here; the session executes the returned request.
    fn provide_action(&mut self, actor: CombatantId, engine: &CombatEngine<'_>) -> Result<ActionRequest>;
}

/// A simple action provider that always waits.
/// Useful for testing or as a fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct WaitActionProvider;

impl ActionProvider for WaitActionProvider {
    fn provide_action(&mut self, actor: CombatantId, _engine: &CombatEngine<'_>) -> Result<ActionRequest> {
        Ok(ActionRequest::wait(actor))
    }
}

/// Replays a fixed list of requests in order.
///
/// Each request is handed out when its actor's turn comes; asking for an
/// actor whose next scripted request is missing is an error.
#[derive(Debug, Default, Clone)]
pub struct ScriptedActionProvider {
    script: VecDeque<ActionRequest>,
}

impl ScriptedActionProvider {
    pub fn new(script: impl IntoIterator<Item = ActionRequest>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn push(&mut self, request: ActionRequest) {
        self.script.push_back(request);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ActionProvider for ScriptedActionProvider {
    fn provide_action(&mut self, actor: CombatantId, _engine: &CombatEngine<'_>) -> Result<ActionRequest> {
        let position = self
            .script
            .iter()
            .position(|request| request.actor == actor)
            .ok_or(RuntimeError::ScriptExhausted(actor))?;
        self.script
            .remove(position)
            .ok_or(RuntimeError::ScriptExhausted(actor))
    }
}
