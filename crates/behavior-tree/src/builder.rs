//! Builder utilities for ergonomic behavior tree construction.
//!
//! Instead of writing `Node::Sequence(vec![Node::Condition(Condition { .. })])`
//! you can write `sequence(vec![condition("low_hp", is_low_hp)])`.

use crate::{Action, Condition, Node};

/// Creates a sequence node.
///
/// # Panics
///
/// Panics if `children` is empty. A sequence with no children is
/// meaningless and likely indicates a programming error.
#[inline]
pub fn sequence<C, D>(children: Vec<Node<C, D>>) -> Node<C, D> {
    assert!(!children.is_empty(), "Sequence must have at least one child");
    Node::Sequence(children)
}

/// Creates a selector node.
///
/// # Panics
///
/// Panics if `children` is empty.
#[inline]
pub fn selector<C, D>(children: Vec<Node<C, D>>) -> Node<C, D> {
    assert!(!children.is_empty(), "Selector must have at least one child");
    Node::Selector(children)
}

/// Creates a condition leaf.
#[inline]
pub fn condition<C, D>(name: &'static str, predicate: fn(&C) -> bool) -> Node<C, D> {
    Node::Condition(Condition { name, predicate })
}

/// Creates an action leaf.
#[inline]
pub fn action<C, D>(name: &'static str, produce: fn(&C) -> Option<D>) -> Node<C, D> {
    Node::Action(Action { name, produce })
}
