//! The closed set of behavior tree nodes.
//!
//! Trees are plain data: four node kinds, leaves hold function pointers. This
//! keeps them `Send + Sync`, cheap to build once and share between decisions,
//! and trivially inspectable in tests.

use crate::Status;
use crate::composite::{tick_selector, tick_sequence};

/// Decisions produced by action leaves must expose a priority so that a
/// sequence can pick the strongest of its children's results.
pub trait Prioritized {
    fn priority(&self) -> f64;
}

/// A named predicate over the context.
pub struct Condition<C> {
    pub name: &'static str,
    pub predicate: fn(&C) -> bool,
}

/// A named decision producer. Returning `None` means the action does not apply.
pub struct Action<C, D> {
    pub name: &'static str,
    pub produce: fn(&C) -> Option<D>,
}

/// A behavior tree node.
pub enum Node<C, D> {
    /// Succeeds with the first succeeding child.
    Selector(Vec<Node<C, D>>),
    /// Succeeds only if every child succeeds; carries the highest-priority
    /// decision among its children.
    Sequence(Vec<Node<C, D>>),
    Condition(Condition<C>),
    Action(Action<C, D>),
}

impl<C, D: Prioritized> Node<C, D> {
    /// Evaluates this node against the context.
    pub fn tick(&self, ctx: &C) -> Status<D> {
        match self {
            Node::Selector(children) => tick_selector(children, ctx),
            Node::Sequence(children) => tick_sequence(children, ctx),
            Node::Condition(condition) => {
                if (condition.predicate)(ctx) {
                    Status::Success(None)
                } else {
                    Status::Failure
                }
            }
            Node::Action(action) => match (action.produce)(ctx) {
                Some(decision) => Status::Success(Some(decision)),
                None => Status::Failure,
            },
        }
    }

    /// Node label used in debug traces.
    pub fn name(&self) -> &'static str {
        match self {
            Node::Selector(_) => "selector",
            Node::Sequence(_) => "sequence",
            Node::Condition(condition) => condition.name,
            Node::Action(action) => action.name,
        }
    }
}
