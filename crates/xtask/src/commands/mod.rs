//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect_snapshot;
mod simulate;
mod validate;

pub use inspect_snapshot::InspectSnapshot;
pub use simulate::Simulate;
pub use validate::Validate;
