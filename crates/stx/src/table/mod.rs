//! # Parsing Tables
//!
//! Read-only access to LALR action and goto tables.
//!
//! ## Overview
//!
//! A table maps `(state, terminal index)` to an [`Action`] and
//! `(state, nonterminal index)` to a successor state. Two encodings exist:
//!
//! - [`PackedTable`]: per-state action lists with a default, per-nonterminal
//!   goto lists with a default
//! - [`DenseTable`]: one row per state holding every action cell followed by
//!   every goto cell, default reductions filled in
//!
//! Both are observationally equivalent and both implement [`TableQuery`], so
//! the parsing engine is written once against the trait.
//!
//! ## Action Codes
//!
//! Raw cells are `i32`: positive values shift to that state, negative values
//! reduce by rule `-code`, [`ACCEPT`] accepts and `0` is an error.

mod dense;
mod packed;

pub use dense::DenseTable;
pub use packed::{ActionEntry, GotoEntry, PackedGoto, PackedState, PackedTable};

use crate::{RuleId, StateId};

/// Raw action code for accept
pub const ACCEPT: i32 = i32::MAX;

/// Raw action code for "no action"
pub const ERROR: i32 = 0;

/// LR parsing action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Action {
    /// Shift to state
    Shift(StateId),
    /// Reduce using rule
    Reduce(RuleId),
    /// Accept (successful parse)
    Accept,
    /// Error (no action)
    Error,
}

impl Action {
    /// Decode a raw table cell
    #[must_use]
    pub const fn decode(code: i32) -> Self {
        match code {
            ACCEPT => Self::Accept,
            ERROR => Self::Error,
            // i32 -> usize is lossless for positive values on every supported target
            c if c > 0 => Self::Shift(c as StateId),
            c => Self::Reduce(c.unsigned_abs() as RuleId),
        }
    }

    /// Encode back into a raw table cell
    ///
    /// Returns `None` when the state or rule does not fit the cell range.
    #[must_use]
    pub fn encode(self) -> Option<i32> {
        match self {
            Self::Shift(state) => i32::try_from(state).ok().filter(|&s| s > 0 && s != ACCEPT),
            Self::Reduce(rule) => i32::try_from(rule).ok().filter(|&r| r > 0).map(|r| -r),
            Self::Accept => Some(ACCEPT),
            Self::Error => Some(ERROR),
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Uniform query interface over a table encoding
///
/// Lookups never panic: out-of-range states or symbols yield
/// [`Action::Error`] or `None`.
pub trait TableQuery {
    /// Number of automaton states
    fn num_states(&self) -> usize;

    /// Number of terminal columns
    fn num_terminals(&self) -> usize;

    /// Number of nonterminal columns
    fn num_nonterminals(&self) -> usize;

    /// Raw action cell for `(state, terminal)`, `0` if out of range
    fn action_code(&self, state: StateId, terminal: usize) -> i32;

    /// Decoded action for `(state, terminal)`
    fn action(&self, state: StateId, terminal: usize) -> Action {
        Action::decode(self.action_code(state, terminal))
    }

    /// Successor state after reducing to `nonterminal` on top of `state`
    fn goto_state(&self, state: StateId, nonterminal: usize) -> Option<StateId>;

    /// Index into the grammar's message table for `state`
    fn message_index(&self, state: StateId) -> Option<usize>;
}

impl<T: TableQuery + ?Sized> TableQuery for &T {
    fn num_states(&self) -> usize {
        (**self).num_states()
    }

    fn num_terminals(&self) -> usize {
        (**self).num_terminals()
    }

    fn num_nonterminals(&self) -> usize {
        (**self).num_nonterminals()
    }

    fn action_code(&self, state: StateId, terminal: usize) -> i32 {
        (**self).action_code(state, terminal)
    }

    fn goto_state(&self, state: StateId, nonterminal: usize) -> Option<StateId> {
        (**self).goto_state(state, nonterminal)
    }

    fn message_index(&self, state: StateId) -> Option<usize> {
        (**self).message_index(state)
    }
}
