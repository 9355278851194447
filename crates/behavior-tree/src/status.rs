//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// # Turn-based Semantics
///
/// Every node completes within a single tick. Conditions answer immediately and
/// actions either produce a decision or fail; there is no `Running` state.
///
/// `Success` optionally carries the decision produced underneath the node.
/// A sequence made only of conditions succeeds without one.
#[derive(Debug, Clone, PartialEq)]
pub enum Status<D> {
    /// The node succeeded, possibly yielding a decision.
    Success(Option<D>),

    /// The node failed (condition not met, or no action was applicable).
    Failure,
}

impl<D> Status<D> {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success(_))
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Consumes the status and returns the carried decision, if any.
    #[inline]
    pub fn into_decision(self) -> Option<D> {
        match self {
            Status::Success(decision) => decision,
            Status::Failure => None,
        }
    }
}
