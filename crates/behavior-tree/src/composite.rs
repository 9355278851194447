//! Composite node evaluation.
//!
//! Composite nodes control the execution flow of multiple children:
//! [`Node::Sequence`](crate::Node::Sequence) (AND logic) and
//! [`Node::Selector`](crate::Node::Selector) (OR logic).

use crate::{Node, Prioritized, Status};

/// Evaluates children in order until one succeeds.
///
/// # Semantics
///
/// - If a child returns `Success`, the selector **stops immediately** and
///   returns that child's status (decision included)
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children fail, the selector fails
pub(crate) fn tick_selector<C, D: Prioritized>(children: &[Node<C, D>], ctx: &C) -> Status<D> {
    for child in children {
        let status = child.tick(ctx);
        if status.is_success() {
            return status;
        }
    }
    Status::Failure
}

/// Evaluates children in order until one fails.
///
/// # Semantics
///
/// - If a child returns `Failure`, the sequence **stops immediately** and fails
/// - Otherwise every child runs, and the sequence succeeds with the
///   highest-priority decision any child produced (first one wins on ties)
pub(crate) fn tick_sequence<C, D: Prioritized>(children: &[Node<C, D>], ctx: &C) -> Status<D> {
    let mut best: Option<D> = None;

    for child in children {
        match child.tick(ctx) {
            Status::Failure => return Status::Failure,
            Status::Success(None) => {}
            Status::Success(Some(decision)) => {
                let replace = best
                    .as_ref()
                    .is_none_or(|current| decision.priority() > current.priority());
                if replace {
                    best = Some(decision);
                }
            }
        }
    }

    Status::Success(best)
}

#[cfg(test)]
mod tests {
    use crate::builder::{action, condition, selector, sequence};
    use crate::{Prioritized, Status};

    struct TestContext {
        value: i32,
    }

    #[derive(Debug, PartialEq)]
    struct Pick {
        label: &'static str,
        priority: f64,
    }

    impl Prioritized for Pick {
        fn priority(&self) -> f64 {
            self.priority
        }
    }

    fn is_positive(ctx: &TestContext) -> bool {
        ctx.value > 0
    }

    fn low(_: &TestContext) -> Option<Pick> {
        Some(Pick { label: "low", priority: 1.0 })
    }

    fn high(_: &TestContext) -> Option<Pick> {
        Some(Pick { label: "high", priority: 5.0 })
    }

    fn also_high(_: &TestContext) -> Option<Pick> {
        Some(Pick { label: "also_high", priority: 5.0 })
    }

    fn never(_: &TestContext) -> Option<Pick> {
        None
    }

    #[test]
    fn sequence_returns_highest_priority_decision() {
        let tree = sequence(vec![
            condition("positive", is_positive),
            action("low", low),
            action("high", high),
        ]);

        let ctx = TestContext { value: 1 };
        let decision = tree.tick(&ctx).into_decision().unwrap();
        assert_eq!(decision.label, "high");
    }

    #[test]
    fn sequence_keeps_first_on_priority_tie() {
        let tree = sequence(vec![action("high", high), action("also_high", also_high)]);

        let decision = tree.tick(&TestContext { value: 0 }).into_decision().unwrap();
        assert_eq!(decision.label, "high");
    }

    #[test]
    fn sequence_fails_on_first_failure() {
        let tree = sequence(vec![
            action("high", high),
            condition("positive", is_positive),
            action("low", low),
        ]);

        assert_eq!(tree.tick(&TestContext { value: -3 }), Status::Failure);
    }

    #[test]
    fn condition_only_sequence_succeeds_without_decision() {
        let tree = sequence::<_, Pick>(vec![condition("positive", is_positive)]);

        assert_eq!(tree.tick(&TestContext { value: 2 }), Status::Success(None));
    }

    #[test]
    fn selector_succeeds_on_first_success() {
        let tree = selector(vec![action("never", never), action("low", low), action("high", high)]);

        let decision = tree.tick(&TestContext { value: 0 }).into_decision().unwrap();
        assert_eq!(decision.label, "low");
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let tree = selector(vec![
            action("never", never),
            sequence(vec![condition("positive", is_positive), action("high", high)]),
        ]);

        assert_eq!(tree.tick(&TestContext { value: 0 }), Status::Failure);
    }

    #[test]
    fn names_label_leaves_and_composites() {
        assert_eq!(action::<TestContext, Pick>("high", high).name(), "high");
        assert_eq!(condition::<TestContext, Pick>("positive", is_positive).name(), "positive");
        assert_eq!(selector(vec![action("low", low)]).name(), "selector");
        assert_eq!(sequence(vec![action("low", low)]).name(), "sequence");
    }

    #[test]
    #[should_panic(expected = "Selector must have at least one child")]
    fn empty_selector_panics() {
        let _ = selector::<TestContext, Pick>(vec![]);
    }
}
