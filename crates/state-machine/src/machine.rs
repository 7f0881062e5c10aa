//! The machine owning current/last/next state handles and mediating every
//! transition through a single controlled protocol.

use std::time::Duration;

use crate::clock::{Clock, MonotonicClock};
use crate::error::StartError;
use crate::observer::TransitionObserver;
use crate::state::{State, StateId};

/// Bookkeeping the machine tracks per registered state.
struct StateSlot<C> {
    state: Box<dyn State<C>>,
    /// Clock sample taken when the state was last entered.
    entered_at: Duration,
    /// Whether the state is currently entered (set on enter, cleared on a
    /// successful exit).
    is_active: bool,
}

/// Generic transition-guarded state machine with cancellable transitions and
/// pause semantics. Exactly one machine instance drives a logical actor.
///
/// # Lifecycle
///
/// {Inactive} → [`start`] → {Active-Running} ⇄ [`pause`]/[`resume`] →
/// {Active-Paused}; [`stop`] returns to {Inactive}, which is re-enterable
/// via [`start`]. Transitions are transient and always resolve back to
/// Active-Running (commit) or to the unchanged current state (veto).
///
/// # Re-entrancy
///
/// Not re-entrant: calling [`change_state`] while a transition is in
/// progress is refused cleanly (`false`) via the
/// [`is_performing_transition`] guard rather than corrupting state.
///
/// [`start`]: StateMachine::start
/// [`pause`]: StateMachine::pause
/// [`resume`]: StateMachine::resume
/// [`stop`]: StateMachine::stop
/// [`change_state`]: StateMachine::change_state
/// [`is_performing_transition`]: StateMachine::is_performing_transition
pub struct StateMachine<C> {
    states: Vec<StateSlot<C>>,
    observers: Vec<Box<dyn TransitionObserver>>,
    clock: Box<dyn Clock>,

    current: Option<StateId>,
    last: Option<StateId>,
    /// Only `Some` while a transition is being performed, so exit guards and
    /// observers can see where the machine is headed.
    next: Option<StateId>,

    is_active: bool,
    is_paused: bool,
    is_performing_transition: bool,
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> StateMachine<C> {
    /// Creates an empty, inactive machine with the default monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(MonotonicClock::new()))
    }

    /// Creates an empty, inactive machine with a caller-supplied clock.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            states: Vec::new(),
            observers: Vec::new(),
            clock,
            current: None,
            last: None,
            next: None,
            is_active: false,
            is_paused: false,
            is_performing_transition: false,
        }
    }

    /// Registers a state and returns its handle. The machine takes ownership;
    /// states are never shared between machines.
    pub fn add_state(&mut self, state: Box<dyn State<C>>) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(StateSlot {
            state,
            entered_at: Duration::ZERO,
            is_active: false,
        });
        id
    }

    /// Registers an observer notified synchronously of transition outcomes.
    pub fn add_observer(&mut self, observer: Box<dyn TransitionObserver>) {
        self.observers.push(observer);
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Starts the machine in `initial`, running its enter hook.
    ///
    /// Fails with [`StartError::AlreadyActive`] if the machine is running and
    /// [`StartError::UnknownState`] if the handle was never registered; in
    /// both cases the machine remains in its prior state.
    pub fn start(&mut self, ctx: &mut C, initial: StateId) -> Result<(), StartError> {
        if self.is_active {
            return Err(StartError::AlreadyActive);
        }
        if initial.0 >= self.states.len() {
            return Err(StartError::UnknownState(initial));
        }

        self.current = Some(initial);
        self.enter(ctx, initial);
        self.is_active = true;
        tracing::debug!(state = ?initial, "state machine started");
        Ok(())
    }

    /// Pauses the machine: ticks become no-ops (dropped, not queued) and
    /// `change_state` is refused until [`resume`](StateMachine::resume).
    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    /// Resumes a paused machine.
    pub fn resume(&mut self) {
        self.is_paused = false;
    }

    /// Stops the machine. No-op if inactive.
    ///
    /// With `exit_last_state`, the current state's exit is attempted through
    /// its guard; a veto skips the exit hook but never blocks the stop. The
    /// current state is recorded as the last state and the machine
    /// deactivates unconditionally.
    pub fn stop(&mut self, ctx: &mut C, exit_last_state: bool) {
        if !self.is_active {
            return;
        }

        if let Some(current) = self.current {
            if exit_last_state {
                self.try_exit(ctx, current);
            }
            self.last = Some(current);
        }

        self.is_active = false;
        tracing::debug!(state = ?self.last, "state machine stopped");
    }

    // ------------------------------------------------------------------
    // Ticks
    // ------------------------------------------------------------------

    /// Logic phase: runs the current state's check hook, then its update
    /// hook. No-op unless active and not paused.
    pub fn update(&mut self, ctx: &mut C) {
        if !self.can_tick() {
            return;
        }
        if let Some(current) = self.current {
            let slot = &mut self.states[current.0];
            slot.state.on_check(ctx);
            slot.state.on_update(ctx);
        }
    }

    /// Physics phase: runs the current state's fixed-update hook. No-op
    /// unless active and not paused.
    pub fn fixed_update(&mut self, ctx: &mut C) {
        if !self.can_tick() {
            return;
        }
        if let Some(current) = self.current {
            self.states[current.0].state.on_fixed_update(ctx);
        }
    }

    /// Post phase: runs the current state's late-update hook, then its
    /// transition check; a requested transition is applied through
    /// [`change_state`](StateMachine::change_state). No-op unless active and
    /// not paused.
    pub fn late_update(&mut self, ctx: &mut C) {
        if !self.can_tick() {
            return;
        }
        let Some(current) = self.current else {
            return;
        };

        let slot = &mut self.states[current.0];
        slot.state.on_late_update(ctx);
        let requested = slot.state.check_transitions(ctx);

        if let Some(candidate) = requested {
            self.change_state(ctx, candidate);
        }
    }

    fn can_tick(&self) -> bool {
        self.is_active && !self.is_paused
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Requests a transition to `candidate`.
    ///
    /// Returns `false` without side effects if the machine is inactive,
    /// paused, already mid-transition, or `candidate` is the current state
    /// and that state does not allow self-transitions. Otherwise runs the
    /// transition protocol, which commits fully or aborts fully.
    pub fn change_state(&mut self, ctx: &mut C, candidate: StateId) -> bool {
        if !self.is_active || self.is_paused || self.is_performing_transition {
            return false;
        }
        if let Some(current) = self.current
            && candidate == current
            && !self.states[current.0].state.can_transition_to_self()
        {
            return false;
        }

        self.perform_transition(ctx, candidate)
    }

    /// The transition protocol: exit (guarded) → record last → enter → notify.
    fn perform_transition(&mut self, ctx: &mut C, candidate: StateId) -> bool {
        // Unknown handle: fail immediately, no side effects.
        if candidate.0 >= self.states.len() {
            return false;
        }

        // Make the destination visible so exit guards can inspect it.
        self.next = Some(candidate);
        self.is_performing_transition = true;

        if let Some(current) = self.current {
            if !self.try_exit(ctx, current) {
                // Vetoed: the current state remains unchanged and active.
                self.next = None;
                self.is_performing_transition = false;
                tracing::debug!(from = ?current, to = ?candidate, "transition cancelled");
                for observer in &mut self.observers {
                    observer.transition_cancelled(current, candidate);
                }
                return false;
            }
            self.last = Some(current);
        }

        // The destination handle has served its veto-visibility purpose.
        self.next = None;

        self.current = Some(candidate);
        self.enter(ctx, candidate);
        tracing::debug!(state = ?candidate, "state changed");
        for observer in &mut self.observers {
            observer.state_changed(candidate);
        }

        self.is_performing_transition = false;
        true
    }

    fn enter(&mut self, ctx: &mut C, id: StateId) {
        let now = self.clock.now();
        let slot = &mut self.states[id.0];
        slot.entered_at = now;
        slot.is_active = true;
        slot.state.on_enter(ctx);
    }

    fn try_exit(&mut self, ctx: &mut C, id: StateId) -> bool {
        let slot = &mut self.states[id.0];
        if !slot.state.can_exit(ctx) {
            return false;
        }
        slot.state.on_exit(ctx);
        slot.is_active = false;
        true
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current state handle. `Some` whenever the machine is active; after a
    /// stop it keeps pointing at the state that was current.
    pub fn current_state(&self) -> Option<StateId> {
        self.current
    }

    /// The state that was current before the most recent committed
    /// transition or stop.
    pub fn last_state(&self) -> Option<StateId> {
        self.last
    }

    /// Destination of the in-flight transition. `Some` only transiently
    /// while a transition is being performed.
    pub fn next_state(&self) -> Option<StateId> {
        self.next
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_performing_transition(&self) -> bool {
        self.is_performing_transition
    }

    /// Whether `id` is currently entered. Distinct from being current: a
    /// stop with a vetoed exit leaves the old state flagged active.
    pub fn state_is_active(&self, id: StateId) -> bool {
        self.states.get(id.0).is_some_and(|slot| slot.is_active)
    }

    /// Time elapsed since the current state was entered. `None` while the
    /// machine is inactive.
    pub fn time_in_state(&self) -> Option<Duration> {
        if !self.is_active {
            return None;
        }
        self.current
            .map(|id| self.clock.now().saturating_sub(self.states[id.0].entered_at))
    }
}
