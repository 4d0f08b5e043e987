use crate::error::ParseError;
use crate::StateId;

/// View of one stack frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a, V> {
    pub state: StateId,
    pub value: &'a V,
}

/// Bounded parse stack
///
/// States and values are stored as parallel columns so a reduction can hand
/// the semantic action one contiguous slice of values. The bottom frame
/// (state 0) is never popped; depth is the index of the top frame.
#[derive(Debug, Clone)]
pub struct ParseStack<V> {
    states: Vec<StateId>,
    values: Vec<V>,
    capacity: usize,
}

impl<V: Default> ParseStack<V> {
    /// Create a stack holding only the bottom frame
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let reserve = capacity.min(64);
        let mut states = Vec::with_capacity(reserve);
        let mut values = Vec::with_capacity(reserve);
        states.push(0);
        values.push(V::default());
        Self {
            states,
            values,
            capacity,
        }
    }

    /// Drop everything above the bottom frame and reset its value
    pub fn clear(&mut self) {
        self.states.truncate(1);
        self.values.truncate(1);
        if let Some(bottom) = self.values.first_mut() {
            *bottom = V::default();
        }
    }
}

impl<V> ParseStack<V> {
    /// Push a frame
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::StackOverflow`] when the stack is full.
    pub fn push(&mut self, state: StateId, value: V) -> Result<(), ParseError> {
        if self.states.len() >= self.capacity {
            return Err(ParseError::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.states.push(state);
        self.values.push(value);
        Ok(())
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.states.len() - 1
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn top_state(&self) -> StateId {
        self.states.last().copied().unwrap_or(0)
    }

    #[must_use]
    pub fn top_value(&self) -> Option<&V> {
        self.values.last()
    }

    pub fn top_value_mut(&mut self) -> Option<&mut V> {
        self.values.last_mut()
    }

    #[must_use]
    pub fn state_at(&self, depth: usize) -> Option<StateId> {
        self.states.get(depth).copied()
    }

    /// The top `count` values, clamped to the frames above the bottom one
    pub fn top_values_mut(&mut self, count: usize) -> &mut [V] {
        let start = self.values.len() - count.min(self.depth());
        &mut self.values[start..]
    }

    /// Pop `count` frames, never the bottom one
    pub fn pop(&mut self, count: usize) {
        let keep = self.states.len() - count.min(self.depth());
        self.truncate(keep - 1);
    }

    /// Keep frames `0..=depth`
    pub fn truncate(&mut self, depth: usize) {
        self.states.truncate(depth + 1);
        self.values.truncate(depth + 1);
    }

    #[must_use]
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Frames from the bottom up
    pub fn frames(&self) -> impl DoubleEndedIterator<Item = Frame<'_, V>> + ExactSizeIterator + '_ {
        self.states
            .iter()
            .zip(&self.values)
            .map(|(&state, value)| Frame { state, value })
    }
}
