//! Backtracking matcher over the generated token automaton

use super::source::{CharCursor, CharSource};
use crate::error::{LexerError, LexerErrorKind};
use compact_str::CompactString;
use smallvec::SmallVec;

/// Set of characters accepted by one transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharClass {
    /// Any character (but never end of input)
    Any,
    /// Inclusive ranges, matched when any range contains the character
    Ranges {
        ranges: SmallVec<[(char, char); 2]>,
        negated: bool,
    },
}

impl CharClass {
    #[must_use]
    pub fn new(ranges: impl IntoIterator<Item = (char, char)>, negated: bool) -> Self {
        Self::Ranges {
            ranges: ranges.into_iter().collect(),
            negated,
        }
    }

    #[must_use]
    pub fn single(c: char) -> Self {
        Self::new([(c, c)], false)
    }

    #[must_use]
    pub fn range(start: char, end: char) -> Self {
        Self::new([(start, end)], false)
    }

    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        match self {
            Self::Any => true,
            Self::Ranges { ranges, negated } => {
                ranges.iter().any(|&(start, end)| c >= start && c <= end) != *negated
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub target: usize,
    pub class: CharClass,
}

impl Transition {
    #[must_use]
    pub const fn new(target: usize, class: CharClass) -> Self {
        Self { target, class }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vertex {
    pub accepting: bool,
    /// Tried in order; the first match wins
    pub transitions: Vec<Transition>,
}

impl Vertex {
    #[must_use]
    pub const fn new(accepting: bool, transitions: Vec<Transition>) -> Self {
        Self {
            accepting,
            transitions,
        }
    }
}

/// Token automaton shared by every regex of a grammar
///
/// Each token regex starts at its own vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    vertices: Vec<Vertex>,
}

impl Automaton {
    /// Build from typed vertices
    ///
    /// # Errors
    ///
    /// Returns [`LexerErrorKind::InvalidAutomaton`] if a transition targets a
    /// vertex that does not exist.
    pub fn new(vertices: Vec<Vertex>) -> Result<Self, LexerError> {
        for (index, vertex) in vertices.iter().enumerate() {
            if let Some(transition) = vertex.transitions.iter().find(|t| t.target >= vertices.len()) {
                return Err(invalid(format!(
                    "vertex {index} has a transition to missing vertex {}",
                    transition.target
                )));
            }
        }
        Ok(Self { vertices })
    }

    /// Decode the generator's flat encoding
    ///
    /// `vertices[v]` is the offset of vertex `v` in `edges`, negated when the
    /// vertex is accepting. At the offset: transition count, then per
    /// transition the target vertex, a signed range count (negative for a
    /// negated set, zero for any character) and that many `(start, end)` code
    /// point pairs.
    ///
    /// # Errors
    ///
    /// Returns [`LexerErrorKind::InvalidAutomaton`] for truncated edge data,
    /// invalid code points, negative counts or missing target vertices.
    pub fn decode(vertices: &[i32], edges: &[i32]) -> Result<Self, LexerError> {
        let mut decoded = Vec::with_capacity(vertices.len());
        for (index, &raw) in vertices.iter().enumerate() {
            let mut reader = EdgeReader {
                edges,
                position: raw.unsigned_abs() as usize,
                vertex: index,
            };
            let count = reader.count()?;
            let mut transitions = Vec::with_capacity(count.min(edges.len()));
            for _ in 0..count {
                let target = reader.count()?;
                let size = reader.next()?;
                let class = if size == 0 {
                    CharClass::Any
                } else {
                    let mut ranges = SmallVec::new();
                    for _ in 0..size.unsigned_abs() {
                        let start = reader.code_point()?;
                        let end = reader.code_point()?;
                        ranges.push((start, end));
                    }
                    CharClass::Ranges {
                        ranges,
                        negated: size < 0,
                    }
                };
                transitions.push(Transition::new(target, class));
            }
            decoded.push(Vertex::new(raw < 0, transitions));
        }
        Self::new(decoded)
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Match the regex starting at `start` against the cursor
    ///
    /// Follows the first matching transition until none matches. If the
    /// vertex reached is accepting the consumed text is returned; otherwise
    /// every consumed character is pushed back and the cursor is left where
    /// matching began.
    pub fn matches<S: CharSource>(
        &self,
        start: usize,
        cursor: &mut CharCursor<S>,
    ) -> Option<CompactString> {
        let mut vertex = self.vertices.get(start)?;
        let mut lexeme = CompactString::default();

        while let Some(c) = cursor.current() {
            let Some(next) = vertex
                .transitions
                .iter()
                .find(|transition| transition.class.matches(c))
                .and_then(|transition| self.vertices.get(transition.target))
            else {
                break;
            };
            cursor.advance();
            lexeme.push(c);
            vertex = next;
        }

        if vertex.accepting {
            Some(lexeme)
        } else {
            for c in lexeme.chars().rev() {
                cursor.push_back(c);
            }
            None
        }
    }
}

fn invalid(reason: String) -> LexerError {
    LexerError::new(0..0, LexerErrorKind::invalid_automaton(reason))
}

struct EdgeReader<'a> {
    edges: &'a [i32],
    position: usize,
    vertex: usize,
}

impl EdgeReader<'_> {
    fn next(&mut self) -> Result<i32, LexerError> {
        let value = self.edges.get(self.position).copied().ok_or_else(|| {
            invalid(format!(
                "edge data of vertex {} ends at offset {}",
                self.vertex, self.position
            ))
        })?;
        self.position += 1;
        Ok(value)
    }

    fn count(&mut self) -> Result<usize, LexerError> {
        let value = self.next()?;
        usize::try_from(value)
            .map_err(|_| invalid(format!("negative count {value} in vertex {}", self.vertex)))
    }

    fn code_point(&mut self) -> Result<char, LexerError> {
        let value = self.next()?;
        u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| invalid(format!("invalid code point {value} in vertex {}", self.vertex)))
    }
}
