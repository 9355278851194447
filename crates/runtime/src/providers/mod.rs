//! Action provider implementations for computer-controlled combatants.

pub mod ai;

pub use ai::{AiProvider, DecisionEngine};
