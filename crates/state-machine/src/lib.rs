//! Transition-guarded finite state machine for tick-driven game logic.
//!
//! A [`StateMachine`] owns a set of registered [`State`]s and mediates every
//! transition through a single controlled protocol, so that state-exit logic
//! can veto a transition (e.g. "cannot exit while an animation is locked").
//! Transitions either fully commit (exit old, enter new) or fully abort (the
//! old state remains current); no partial state is ever observable.
//!
//! - **Tick-driven**: the owner calls [`StateMachine::update`],
//!   [`StateMachine::fixed_update`] and [`StateMachine::late_update`] once per
//!   phase; while paused, ticks are dropped, not queued.
//! - **Single-threaded**: no internal locking, all operations are synchronous.
//! - **Explicit identity**: states are registered once and addressed by
//!   [`StateId`]; the machine owns the boxed state values.
//!
//! # Architecture
//!
//! - [`State`]: behavior trait with enter/exit hooks, per-phase update hooks
//!   and a transition-check hook
//! - [`StateMachine`]: owner and transition mediator
//! - [`TransitionObserver`]: synchronous notification channel for
//!   state-changed / transition-cancelled events
//! - [`Clock`]: monotonic time source backing `time_in_state`

pub mod clock;
pub mod error;
pub mod machine;
pub mod observer;
pub mod state;

// Re-export core types for ergonomic API
pub use clock::{Clock, MonotonicClock};
pub use error::StartError;
pub use machine::StateMachine;
pub use observer::TransitionObserver;
pub use state::{State, StateId};
