use super::{TableQuery, ERROR};
use crate::StateId;

/// Dense (uncompressed) encoding
///
/// Row `s` holds `terminals` action cells followed by one goto cell per
/// nonterminal. A goto cell of `0` means no transition.
#[derive(Debug, Clone, Copy)]
pub struct DenseTable<'a> {
    terminals: usize,
    rows: &'a [&'a [i32]],
    messages: &'a [Option<usize>],
}

impl<'a> DenseTable<'a> {
    /// `messages` is indexed by state; missing entries mean "no message"
    #[must_use]
    pub const fn new(terminals: usize, rows: &'a [&'a [i32]], messages: &'a [Option<usize>]) -> Self {
        Self {
            terminals,
            rows,
            messages,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> &'a [&'a [i32]] {
        self.rows
    }

    fn cell(&self, state: StateId, column: usize) -> Option<i32> {
        self.rows.get(state)?.get(column).copied()
    }
}

impl TableQuery for DenseTable<'_> {
    fn num_states(&self) -> usize {
        self.rows.len()
    }

    fn num_terminals(&self) -> usize {
        self.terminals
    }

    fn num_nonterminals(&self) -> usize {
        self.rows
            .first()
            .map_or(0, |row| row.len().saturating_sub(self.terminals))
    }

    fn action_code(&self, state: StateId, terminal: usize) -> i32 {
        if terminal >= self.terminals {
            return ERROR;
        }
        self.cell(state, terminal).unwrap_or(ERROR)
    }

    fn goto_state(&self, state: StateId, nonterminal: usize) -> Option<StateId> {
        let code = self.cell(state, self.terminals + nonterminal)?;
        usize::try_from(code).ok().filter(|&s| s != 0)
    }

    fn message_index(&self, state: StateId) -> Option<usize> {
        self.messages.get(state).copied().flatten()
    }
}
