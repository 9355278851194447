//! Behavior-tree AI for computer-controlled cultivators.
//!
//! Every decision follows the same steps:
//!
//! 1. **Context**: build a [`DecisionContext`] with health and mana fractions,
//!    ranked [`ThreatInfo`]s, usable skills and items, allies, and enemies
//! 2. **Tree**: tick the personality's tree from [`presets`]; sequences pick
//!    the highest-priority [`Decision`] among their children
//! 3. **Fallback**: with no decision, attack a random enemy or wait
//!
//! Trees are layered the same way as the rest of the AI library:
//! [`nodes`] → [`subtrees`] (patterns, tactics, strategies) → [`presets`].
//!
//! Enemies that heaven protects from the actor (see
//! [`WorldLawEngine::forbids_strike`](combat_core::WorldLawEngine::forbids_strike))
//! are never chosen as targets, and area strikes are held back while any of
//! them stands.

pub mod config;
pub mod context;
pub mod nodes;
pub mod presets;
pub mod provider;
pub mod strategy;
pub mod subtrees;
pub mod threat;
pub mod types;

pub use config::{AiConfig, ThreatCutoffs};
pub use context::{CombatantView, DecisionContext, EffectSummary, ItemOption, SkillOption, usable_skills};
pub use provider::{AiProvider, DecisionEngine};
pub use strategy::TargetStrategy;
pub use threat::{ThreatInfo, ThreatLevel, evaluate_threats};
pub use types::Decision;
