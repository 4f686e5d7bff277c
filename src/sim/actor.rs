//! Finite state actor
//!
//! An actor exposes its current state and a dispatch table mapping each state
//! to a set of optional hooks. `advance` runs the current state's `during`
//! hook once; `transition` runs the old state's `after` hook and the new
//! state's `before` hook around the switch.

use std::fmt::Debug;

/// A hook receives the actor it belongs to
pub type Hook<A> = fn(&mut A);

/// Hooks registered for one state
pub struct StateHooks<A> {
    /// Runs right after the actor enters the state
    pub before: Option<Hook<A>>,
    /// Runs once per `advance` while the actor is in the state
    pub during: Option<Hook<A>>,
    /// Runs right before the actor leaves the state
    pub after: Option<Hook<A>>,
}

impl<A> StateHooks<A> {
    /// No hooks at all
    pub const fn none() -> Self {
        Self {
            before: None,
            during: None,
            after: None,
        }
    }

    /// Only a `during` hook
    pub const fn during(hook: Hook<A>) -> Self {
        Self {
            before: None,
            during: Some(hook),
            after: None,
        }
    }
}

impl<A> Default for StateHooks<A> {
    fn default() -> Self {
        Self::none()
    }
}

// Derives would require `A: Clone`; fn pointers are always Copy.
impl<A> Clone for StateHooks<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for StateHooks<A> {}

/// State-driven behaviour
pub trait FiniteStateActor: Sized {
    type State: Copy + PartialEq + Debug;

    fn state(&self) -> Self::State;

    /// Overwrite the state without running hooks (used by `transition`)
    fn store_state(&mut self, state: Self::State);

    /// Dispatch table: hooks for a given state
    fn hooks(state: Self::State) -> StateHooks<Self>;

    /// Run the current state's `during` hook
    fn advance(&mut self) {
        if let Some(during) = Self::hooks(self.state()).during {
            during(self);
        }
    }

    /// Switch to `next`, running `after` for the old state and `before` for the new one
    fn transition(&mut self, next: Self::State) {
        let prev = self.state();
        if let Some(after) = Self::hooks(prev).after {
            after(self);
        }
        log::trace!("state {:?} -> {:?}", prev, next);
        self.store_state(next);
        if let Some(before) = Self::hooks(next).before {
            before(self);
        }
    }
}
