//! Session orchestration for cultivation combat.
//!
//! This crate wires the action provider abstraction and the behavior-tree AI
//! around [`combat_core::CombatEngine`]. Consumers build a [`Session`] to drive
//! turns, plugging in their own [`ActionProvider`] for player-controlled
//! combatants.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the turn loop and its builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] contains the AI decision engine
pub mod api;
pub mod providers;
pub mod session;

pub use api::{
    ActionProvider, ProviderKind, Result, RuntimeError, ScriptedActionProvider,
    WaitActionProvider,
};
pub use providers::ai::{AiConfig, Decision, DecisionContext, TargetStrategy};
pub use providers::{AiProvider, DecisionEngine};
pub use session::{Session, SessionBuilder, SessionSummary, TurnReport};
