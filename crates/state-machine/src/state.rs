//! The per-instance behavior unit driven by a [`StateMachine`].
//!
//! [`StateMachine`]: crate::StateMachine

/// Handle identifying a state registered with a [`StateMachine`].
///
/// Identity comparison (e.g. the self-transition rule) is id equality; a
/// handle is only meaningful for the machine that issued it.
///
/// [`StateMachine`]: crate::StateMachine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Raw registration index, stable for the lifetime of the machine.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A behavior unit with enter/exit hooks, optional per-phase update hooks and
/// a transition-check hook.
///
/// `C` is the caller-supplied context passed to every hook; it is how states
/// read and mutate the actor they drive.
///
/// # Semantics
///
/// Per machine tick the hooks run in a fixed order:
/// - logic phase (`update`): [`on_check`], then [`on_update`]
/// - physics phase (`fixed_update`): [`on_fixed_update`]
/// - post phase (`late_update`): [`on_late_update`], then
///   [`check_transitions`]; a returned [`StateId`] is handed to the machine's
///   `change_state`
///
/// [`on_check`]: State::on_check
/// [`on_update`]: State::on_update
/// [`on_fixed_update`]: State::on_fixed_update
/// [`on_late_update`]: State::on_late_update
/// [`check_transitions`]: State::check_transitions
pub trait State<C> {
    /// Invoked once when the machine enters this state.
    fn on_enter(&mut self, ctx: &mut C);

    /// Invoked once when the machine exits this state. Never runs if
    /// [`can_exit`](State::can_exit) refused the exit.
    fn on_exit(&mut self, ctx: &mut C);

    /// Guard predicate consulted before every exit. Returning `false` vetoes
    /// the in-progress transition and leaves this state current and active.
    fn can_exit(&self, _ctx: &C) -> bool {
        true
    }

    /// Whether `change_state` targeting this state while it is already
    /// current should re-enter it (exit + enter) instead of being refused.
    fn can_transition_to_self(&self) -> bool {
        false
    }

    /// Refresh hook, runs before [`on_update`](State::on_update) in the logic
    /// phase. Useful to gather, check, cast before the frame's logic.
    fn on_check(&mut self, _ctx: &mut C) {}

    /// Logic-phase hook.
    fn on_update(&mut self, _ctx: &mut C) {}

    /// Physics-phase hook.
    fn on_fixed_update(&mut self, _ctx: &mut C) {}

    /// Post-phase hook, runs before [`check_transitions`](State::check_transitions).
    fn on_late_update(&mut self, _ctx: &mut C) {}

    /// Decides where to go next, evaluated after the post-phase hook.
    /// Returning `Some(id)` requests a transition; the machine applies the
    /// usual refusal matrix (pause, mid-transition, self-transition policy,
    /// exit guard), so a request is not a guarantee.
    fn check_transitions(&mut self, ctx: &mut C) -> Option<StateId>;
}
