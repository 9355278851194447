//! Reusable behavior tree subtrees.
//!
//! Subtrees are organized into three layers:
//!
//! - **Layer 1 (Patterns)**: one condition guarding one behavior
//! - **Layer 2 (Tactics)**: goal-oriented combinations of patterns
//! - **Layer 3 (Strategies)**: a full personality, ordering tactics by what
//!   the cultivator values most
//!
//! # Architecture
//!
//! ```text
//! Layer 3 (strategies)
//!     ├─ defensive()
//!     │   ├─ tactics::survival()             ← Layer 2
//!     │   │   ├─ patterns::escape_when_overwhelmed() ← Layer 1
//!     │   │   └─ patterns::recover_when_critical()   ← Layer 1
//!     │   ├─ tactics::support()              ← Layer 2
//!     │   └─ tactics::measured_offense()     ← Layer 2
//! ```
//!
//! Every subtree that can succeed ends in an action, so a success always
//! carries a decision.

pub mod patterns;
pub mod strategies;
pub mod tactics;

use behavior_tree::Node;

use super::{Decision, DecisionContext};

/// Type alias for behavior trees to reduce verbosity.
pub type BehaviorTree = Node<DecisionContext, Decision>;
