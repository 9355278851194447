//! Combat-specific behavior tree nodes.
//!
//! Nodes are plain functions over [`DecisionContext`](super::DecisionContext):
//!
//! - `conditions`: predicates that gate a branch
//! - `actions`: producers of a [`Decision`](super::Decision), or `None` when
//!   nothing sensible applies

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
