//! # Parser Seams
//!
//! The traits and values exchanged between the engine and its callers.
//!
//! ## Overview
//!
//! - [`SymbolSource`]: where batch mode pulls `(token, value)` pairs from
//! - [`SemanticActions`]: reduce callbacks and the syntax error reporter
//! - [`ParseEventHandler`]: optional observer of every engine transition
//! - [`ParseStats`]: counters collected during a parse
//! - [`StepOutcome`]: what one incremental call did

use crate::error::{LexerError, ParseError, SemanticError};
use crate::{RuleId, StateId, TokenId, END_OF_INPUT};

/// A terminal together with its semantic value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol<V> {
    pub token: TokenId,
    pub value: V,
}

impl<V> Symbol<V> {
    #[must_use]
    pub const fn new(token: TokenId, value: V) -> Self {
        Self { token, value }
    }
}

impl<V: Default> Symbol<V> {
    #[must_use]
    pub fn end_of_input() -> Self {
        Self::new(END_OF_INPUT, V::default())
    }
}

/// Supplier of terminals for batch parsing
///
/// After the last real symbol a source keeps returning token `0`.
pub trait SymbolSource<V> {
    /// Produce the next symbol
    ///
    /// # Errors
    ///
    /// Returns a [`LexerError`] when no symbol can be produced; the parse is
    /// aborted with [`ParseError::Lexer`].
    fn next_symbol(&mut self) -> Result<Symbol<V>, LexerError>;
}

impl<V, S: SymbolSource<V> + ?Sized> SymbolSource<V> for &mut S {
    fn next_symbol(&mut self) -> Result<Symbol<V>, LexerError> {
        (**self).next_symbol()
    }
}

/// Symbol source over any iterator of `(token, value)` pairs
#[derive(Debug, Clone)]
pub struct SymbolStream<I> {
    iter: I,
    consumed: usize,
}

impl<I> SymbolStream<I> {
    pub fn new<T>(symbols: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: symbols.into_iter(),
            consumed: 0,
        }
    }

    /// Number of real symbols handed out so far
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<I: ExactSizeIterator> SymbolStream<I> {
    /// Number of real symbols not yet handed out
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.iter.len()
    }
}

impl<V, I> SymbolSource<V> for SymbolStream<I>
where
    V: Default,
    I: Iterator<Item = (TokenId, V)>,
{
    fn next_symbol(&mut self) -> Result<Symbol<V>, LexerError> {
        Ok(match self.iter.next() {
            Some((token, value)) => {
                self.consumed += 1;
                Symbol::new(token, value)
            }
            None => Symbol::end_of_input(),
        })
    }
}

/// Everything known about a syntax error when it is reported
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct SyntaxErrorReport {
    pub state: StateId,
    pub token: TokenId,
    pub stack_depth: usize,
    pub message: String,
}

/// Semantic callbacks driven by the engine
///
/// Closures `FnMut(RuleId, &mut [V]) -> Result<V, SemanticError>` implement
/// this trait with the default reporter.
pub trait SemanticActions<V> {
    /// Compute the value of a reduced rule from the values of its right-hand side
    ///
    /// # Errors
    ///
    /// [`SemanticError::Syntax`] turns the reduction into a syntax error;
    /// [`SemanticError::Failed`] aborts the parse.
    fn reduce(&mut self, rule: RuleId, values: &mut [V]) -> Result<V, SemanticError>;

    /// Called once per syntax error before recovery; `false` aborts the parse
    fn report_error(&mut self, report: &SyntaxErrorReport) -> bool {
        let _ = report;
        true
    }
}

impl<V, F> SemanticActions<V> for F
where
    F: FnMut(RuleId, &mut [V]) -> Result<V, SemanticError>,
{
    fn reduce(&mut self, rule: RuleId, values: &mut [V]) -> Result<V, SemanticError> {
        self(rule, values)
    }
}

/// Engine control status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ParserStatus {
    /// Waiting for the first symbol
    Ready,
    Shifting,
    Reducing,
    Recovering,
    Accepted,
    Failed,
}

impl ParserStatus {
    /// Whether the parse has ended
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Accepted | Self::Failed)
    }
}

/// Result of one incremental call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Accepted,
    /// The symbol was shifted (or nothing is pending); feed the next one
    Shifted,
    /// A reduction happened and the symbol is still pending; call `resume`
    ///
    /// Feeding another symbol before the pending one is finished is rejected
    /// with [`ParseError::SymbolPending`].
    ReducedAndContinue,
    /// Error recovery handled the symbol: it was dropped, or shifted after
    /// resynchronizing. Feed the next one.
    ParsingError,
    /// The parse failed and cannot continue, or the call was rejected
    /// ([`ParseError::SymbolPending`]) and the parser is unchanged
    InternalError(ParseError),
}

/// Statistics collected during parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ParseStats {
    pub shifts: usize,
    pub reductions: usize,
    /// Maximum stack depth
    pub max_depth: usize,
    /// Reported syntax errors
    pub errors: usize,
    /// Symbols discarded by recovery
    pub dropped_tokens: usize,
}

impl ParseStats {
    /// Create new empty stats
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shifts: 0,
            reductions: 0,
            max_depth: 0,
            errors: 0,
            dropped_tokens: 0,
        }
    }

    /// Merge stats from another instance
    pub fn merge(&mut self, other: &Self) {
        self.shifts += other.shifts;
        self.reductions += other.reductions;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.errors += other.errors;
        self.dropped_tokens += other.dropped_tokens;
    }

    pub(crate) fn observe_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }
}

/// A parsing event for debugging/tracing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ParseEvent {
    Shift {
        token: TokenId,
        state: StateId,
        depth: usize,
    },
    Reduce {
        rule: RuleId,
        goto: StateId,
        depth: usize,
    },
    Accept { depth: usize },
    SyntaxError { state: StateId, token: TokenId },
    /// Recovery discarded a frame while searching for a synchronizing state
    PopState { state: StateId, depth: usize },
    /// Recovery resumed by shifting a synchronizing token
    Synchronize {
        token: TokenId,
        state: StateId,
        depth: usize,
    },
    DropToken { token: TokenId },
}

/// Trait for receiving parse events (for debugging/tracing)
pub trait ParseEventHandler: Send {
    /// Handle a parse event
    fn handle(&mut self, event: ParseEvent);
}

impl<F: FnMut(ParseEvent) + Send> ParseEventHandler for F {
    fn handle(&mut self, event: ParseEvent) {
        self(event);
    }
}

/// A no-op event handler
pub struct NullEventHandler;

impl ParseEventHandler for NullEventHandler {
    fn handle(&mut self, _event: ParseEvent) {}
}

/// Forwards events to the `log` facade
///
/// Transitions are logged at trace level, recovery at debug level.
pub struct LogEventHandler;

impl ParseEventHandler for LogEventHandler {
    fn handle(&mut self, event: ParseEvent) {
        match event {
            ParseEvent::Shift {
                token,
                state,
                depth,
            } => log::trace!("shift {token} to state {state} (depth {depth})"),
            ParseEvent::Reduce { rule, goto, depth } => {
                log::trace!("reduce rule {rule}, goto {goto} (depth {depth})");
            }
            ParseEvent::Accept { depth } => log::trace!("accept (depth {depth})"),
            ParseEvent::SyntaxError { state, token } => {
                log::debug!("syntax error on state {state} with token {token}");
            }
            ParseEvent::PopState { state, depth } => {
                log::debug!("recovery pops state {state} at depth {depth}");
            }
            ParseEvent::Synchronize {
                token,
                state,
                depth,
            } => log::debug!("recovery shifts {token} to state {state} (depth {depth})"),
            ParseEvent::DropToken { token } => log::debug!("recovery drops token {token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_stream_ends_with_eof() {
        let mut stream = SymbolStream::new(vec![(257, 3_i64)]);
        assert_eq!(stream.remaining(), 1);
        assert_eq!(stream.next_symbol().unwrap(), Symbol::new(257, 3));
        assert_eq!(stream.next_symbol().unwrap(), Symbol::new(END_OF_INPUT, 0));
        assert_eq!(stream.next_symbol().unwrap(), Symbol::new(END_OF_INPUT, 0));
        assert_eq!(stream.consumed(), 1);
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn test_closure_actions_continue_on_error() {
        let mut actions = |_rule: RuleId, values: &mut [i64]| -> Result<i64, SemanticError> {
            Ok(values.iter().sum())
        };
        let report = SyntaxErrorReport {
            state: 0,
            token: 1,
            stack_depth: 0,
            message: String::new(),
        };
        assert!(SemanticActions::<i64>::report_error(&mut actions, &report));
        assert_eq!(SemanticActions::<i64>::reduce(&mut actions, 1, &mut [1, 2, 3]), Ok(6));
    }

    #[test]
    fn test_parse_stats() {
        let mut stats1 = ParseStats::new();
        stats1.shifts = 10;
        stats1.max_depth = 5;

        let mut stats2 = ParseStats::new();
        stats2.shifts = 20;
        stats2.max_depth = 8;
        stats2.errors = 1;

        stats1.merge(&stats2);

        assert_eq!(stats1.shifts, 30);
        assert_eq!(stats1.max_depth, 8);
        assert_eq!(stats1.errors, 1);
    }

    #[test]
    fn test_status_is_finished() {
        assert!(ParserStatus::Accepted.is_finished());
        assert!(ParserStatus::Failed.is_finished());
        assert!(!ParserStatus::Recovering.is_finished());
    }
}
