use super::{TableQuery, ERROR};
use crate::StateId;

/// Explicit action of a packed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEntry {
    pub terminal: usize,
    pub action: i32,
}

impl ActionEntry {
    #[must_use]
    pub const fn new(terminal: usize, action: i32) -> Self {
        Self { terminal, action }
    }
}

/// Action list of one state plus its default action
#[derive(Debug, Clone, Copy)]
pub struct PackedState<'a> {
    pub actions: &'a [ActionEntry],
    /// Taken when no entry matches; usually a default reduction or `0`
    pub default: i32,
    pub message: Option<usize>,
}

/// Explicit goto of a packed nonterminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GotoEntry {
    pub origin: StateId,
    pub destination: StateId,
}

impl GotoEntry {
    #[must_use]
    pub const fn new(origin: StateId, destination: StateId) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Goto list of one nonterminal plus its default destination
#[derive(Debug, Clone, Copy)]
pub struct PackedGoto<'a> {
    pub entries: &'a [GotoEntry],
    pub default: StateId,
}

/// Packed (compressed) encoding
///
/// Lookups are linear scans, which is what the generator emits: the lists are
/// short and the defaults absorb the common case.
#[derive(Debug, Clone, Copy)]
pub struct PackedTable<'a> {
    states: &'a [PackedState<'a>],
    gotos: &'a [PackedGoto<'a>],
    terminals: usize,
}

impl<'a> PackedTable<'a> {
    #[must_use]
    pub const fn new(
        states: &'a [PackedState<'a>],
        gotos: &'a [PackedGoto<'a>],
        terminals: usize,
    ) -> Self {
        Self {
            states,
            gotos,
            terminals,
        }
    }

    #[must_use]
    pub const fn states(&self) -> &'a [PackedState<'a>] {
        self.states
    }

    #[must_use]
    pub const fn gotos(&self) -> &'a [PackedGoto<'a>] {
        self.gotos
    }
}

impl TableQuery for PackedTable<'_> {
    fn num_states(&self) -> usize {
        self.states.len()
    }

    fn num_terminals(&self) -> usize {
        self.terminals
    }

    fn num_nonterminals(&self) -> usize {
        self.gotos.len()
    }

    fn action_code(&self, state: StateId, terminal: usize) -> i32 {
        if terminal >= self.terminals {
            return ERROR;
        }
        let Some(packed) = self.states.get(state) else {
            return ERROR;
        };
        packed
            .actions
            .iter()
            .find(|entry| entry.terminal == terminal)
            .map_or(packed.default, |entry| entry.action)
    }

    fn goto_state(&self, state: StateId, nonterminal: usize) -> Option<StateId> {
        if state >= self.states.len() {
            return None;
        }
        let goto = self.gotos.get(nonterminal)?;
        let destination = goto
            .entries
            .iter()
            .find(|entry| entry.origin == state)
            .map_or(goto.default, |entry| entry.destination);
        // The initial state is never a goto target
        (destination != 0).then_some(destination)
    }

    fn message_index(&self, state: StateId) -> Option<usize> {
        self.states.get(state).and_then(|packed| packed.message)
    }
}
