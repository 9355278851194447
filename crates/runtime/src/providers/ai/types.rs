//! Decision type produced by the personality trees.

use behavior_tree::Prioritized;
use combat_core::ActionRequest;

/// A candidate action with the priority used to arbitrate sequences and a
/// reasoning string for logs.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub request: ActionRequest,
    pub priority: f64,
    pub reasoning: String,
}

impl Decision {
    pub fn new(request: ActionRequest, priority: f64, reasoning: impl Into<String>) -> Self {
        Self {
            request,
            priority,
            reasoning: reasoning.into(),
        }
    }
}

impl Prioritized for Decision {
    fn priority(&self) -> f64 {
        self.priority
    }
}
