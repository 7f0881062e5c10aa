//! Error types for machine lifecycle preconditions.
//!
//! Only fatal precondition violations surface as errors; recoverable
//! refusals (vetoed transitions, calls while paused or mid-transition)
//! return `false` and leave all state unmodified.

use crate::state::StateId;

/// Errors surfaced when starting a [`StateMachine`].
///
/// [`StateMachine`]: crate::StateMachine
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    /// The machine is already running; stop it before restarting.
    #[error("state machine is already active")]
    AlreadyActive,

    /// The initial state handle was never registered with this machine.
    #[error("cannot start state machine with unregistered state {0:?}")]
    UnknownState(StateId),
}
