//! Lightweight behavior tree library optimized for turn-based games.
//!
//! This library provides a minimal, deterministic behavior tree implementation
//! designed for turn-based decision making.
//!
//! - **No delta time**: Every tick completes immediately (turn-based semantics)
//! - **No Running state**: Actions either produce a decision or fail
//! - **Closed node set**: Trees are data, not trait objects
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Node`]: Selector, Sequence, Condition, Action
//! - [`Status`]: Success (with optional decision) or Failure
//! - [`Prioritized`]: Decisions compared by sequences

pub mod builder;
pub mod composite;
pub mod node;
pub mod status;

pub use node::{Action, Condition, Node, Prioritized};
pub use status::Status;
