//! State Machine Runtime
//!
//! Flat state machines over caller-defined state and event enums.
//! Supports:
//! - Transition tables (first match wins)
//! - Terminal states (states with no outgoing transitions)
//! - Transition history for diagnostics
//!
//! Events with no matching transition leave the machine untouched, which makes
//! one-way lifecycles (idle -> running, unarmed -> armed) idempotent.

use std::fmt::Debug;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
}

impl<S, E> Transition<S, E> {
    pub const fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: Vec<Transition<S, E>>,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine<S, E> {
        StateMachine::new(self.initial_state, self.transitions)
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: Vec<Transition<S, E>>,
    /// History of state transitions (for debugging)
    history: Vec<(S, E, S)>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    pub fn new(initial_state: S, transitions: Vec<Transition<S, E>>) -> Self {
        Self {
            current_state: initial_state,
            transitions,
            history: Vec::new(),
        }
    }

    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: E) -> bool {
        self.find(event).is_some()
    }

    /// True when no transition leaves the current state
    pub fn is_terminal(&self) -> bool {
        !self
            .transitions
            .iter()
            .any(|t| t.from_state == self.current_state)
    }

    /// Send an event, returning the (possibly unchanged) current state
    pub fn send(&mut self, event: E) -> S {
        let current = self.current_state;
        let Some(to_state) = self.find(event) else {
            return current;
        };

        self.current_state = to_state;
        self.history.push((current, event, to_state));
        tracing::trace!(from = ?current, ?event, to = ?to_state, "state transition");

        to_state
    }

    fn find(&self, event: E) -> Option<S> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.event == event)
            .map(|t| t.to_state)
    }
}
