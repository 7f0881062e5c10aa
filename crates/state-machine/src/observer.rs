//! Synchronous notification channel for transition outcomes.
//!
//! Observers are registered on the machine instance itself, so their
//! lifetime is scoped to the machine that emits to them; there is no
//! process-wide registry. Delivery is synchronous and in-process,
//! immediately after the corresponding hooks have run.

use crate::state::StateId;

/// Receives transition outcome notifications from a [`StateMachine`].
///
/// Both methods default to no-ops so an observer only implements the
/// events it cares about (logging, animation sync, ...).
///
/// [`StateMachine`]: crate::StateMachine
pub trait TransitionObserver {
    /// A transition committed; `new_state` is now current and entered.
    fn state_changed(&mut self, _new_state: StateId) {}

    /// A transition was vetoed by the exit guard of `from` while targeting
    /// `to`; `from` remains current and active.
    fn transition_cancelled(&mut self, _from: StateId, _to: StateId) {}
}
