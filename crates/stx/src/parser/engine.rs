use super::config::EngineConfig;
use super::driver::{
    NullEventHandler, ParseEvent, ParseEventHandler, ParseStats, ParserStatus, SemanticActions,
    StepOutcome, SymbolSource,
};
use super::recovery::RecoveryStep;
use super::stack::ParseStack;
use crate::error::{ParseError, SemanticError};
use crate::grammar::Grammar;
use crate::table::{Action, TableQuery};
use crate::{RuleId, StateId, TokenId};
use smallvec::SmallVec;

/// The symbol currently being parsed
#[derive(Debug)]
pub(super) struct Lookahead<V> {
    pub(super) token: TokenId,
    /// Terminal index, `None` for token ids unknown to the grammar
    pub(super) index: Option<usize>,
    pub(super) value: V,
}

/// Outcome of one transition of the automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Shifted,
    Reduced,
    Accepted,
    Recovered(RecoveryStep),
}

/// Table-driven LR parser
///
/// `T` is the table encoding, `V` the semantic value carried on the stack.
/// One parser handles one input at a time; call [`reset`](Self::reset) (or
/// [`parse`](Self::parse), which resets) to reuse it.
pub struct Parser<'t, T, V> {
    pub(super) table: T,
    pub(super) grammar: Grammar<'t>,
    pub(super) config: EngineConfig,
    pub(super) stack: ParseStack<V>,
    pub(super) lookahead: Option<Lookahead<V>>,
    /// Panic-mode counter: 0 normal, 3 just synchronized, decremented per shift
    pub(super) recovery: u8,
    /// Recovery ran since the last completed step
    pub(super) step_error: bool,
    pub(super) errors: usize,
    pub(super) status: ParserStatus,
    pub(super) stats: ParseStats,
    pub(super) events: Box<dyn ParseEventHandler + 't>,
}

impl<'t, T: TableQuery, V: Default> Parser<'t, T, V> {
    #[must_use]
    pub fn new(table: T, grammar: &Grammar<'t>, config: EngineConfig) -> Self {
        Self {
            table,
            grammar: *grammar,
            stack: ParseStack::new(config.stack_depth),
            config,
            lookahead: None,
            recovery: 0,
            step_error: false,
            errors: 0,
            status: ParserStatus::Ready,
            stats: ParseStats::new(),
            events: Box::new(NullEventHandler),
        }
    }

    /// Attach an observer for engine events
    #[must_use]
    pub fn with_event_handler(mut self, handler: impl ParseEventHandler + 't) -> Self {
        self.events = Box::new(handler);
        self
    }

    /// Discard all per-parse state
    pub fn reset(&mut self) {
        self.stack.clear();
        self.lookahead = None;
        self.recovery = 0;
        self.step_error = false;
        self.errors = 0;
        self.status = ParserStatus::Ready;
        self.stats = ParseStats::new();
    }

    /// Parse a whole input
    ///
    /// Symbols are pulled from `source` until the input is accepted. Syntax
    /// errors are reported through `actions` and recovered from.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that ended the parse; see [`ParseError`].
    pub fn parse<S, A>(&mut self, mut source: S, actions: &mut A) -> Result<(), ParseError>
    where
        S: SymbolSource<V>,
        A: SemanticActions<V> + ?Sized,
    {
        self.reset();
        loop {
            if self.lookahead.is_none() {
                let symbol = source.next_symbol().map_err(|err| self.fail(err.into()))?;
                self.set_lookahead(symbol.token, symbol.value);
            }
            match self.transition(actions) {
                Ok(Transition::Accepted) => return Ok(()),
                Ok(_) => {}
                Err(err) => return Err(self.fail(err)),
            }
        }
    }

    /// Feed one symbol
    ///
    /// Performs every reduction the symbol triggers and returns once it has
    /// been shifted, accepted or dropped. With
    /// [`EngineConfig::yield_on_reduce`] the call returns after each reduction
    /// instead and the symbol stays pending until [`resume`](Self::resume)
    /// finishes it. Feeding a new symbol while one is pending is rejected with
    /// [`ParseError::SymbolPending`] and leaves the parser unchanged.
    pub fn parse_step<A>(&mut self, token: TokenId, value: V, actions: &mut A) -> StepOutcome
    where
        A: SemanticActions<V> + ?Sized,
    {
        if self.status.is_finished() {
            return StepOutcome::InternalError(ParseError::Finished {
                status: self.status,
            });
        }
        if let Some(pending) = &self.lookahead {
            return StepOutcome::InternalError(ParseError::SymbolPending {
                pending: pending.token,
                token,
            });
        }
        self.set_lookahead(token, value);
        self.resume(actions)
    }

    /// Continue work on the pending symbol
    ///
    /// Returns [`StepOutcome::Shifted`] when no symbol is pending. A symbol
    /// that needed error recovery ends in [`StepOutcome::ParsingError`], also
    /// when it was shifted after resynchronizing.
    pub fn resume<A>(&mut self, actions: &mut A) -> StepOutcome
    where
        A: SemanticActions<V> + ?Sized,
    {
        if self.status.is_finished() {
            return StepOutcome::InternalError(ParseError::Finished {
                status: self.status,
            });
        }
        while self.lookahead.is_some() {
            match self.transition(actions) {
                Ok(Transition::Accepted) => {
                    self.step_error = false;
                    return StepOutcome::Accepted;
                }
                Ok(Transition::Shifted) => {
                    return if std::mem::take(&mut self.step_error) {
                        StepOutcome::ParsingError
                    } else {
                        StepOutcome::Shifted
                    };
                }
                Ok(Transition::Reduced) if self.config.yield_on_reduce => {
                    return StepOutcome::ReducedAndContinue;
                }
                Ok(Transition::Recovered(RecoveryStep::DropToken)) => {
                    self.step_error = false;
                    return StepOutcome::ParsingError;
                }
                Ok(Transition::Reduced | Transition::Recovered(RecoveryStep::Synchronized)) => {}
                Err(err) => return StepOutcome::InternalError(self.fail(err)),
            }
        }
        StepOutcome::Shifted
    }

    /// Token ids with a non-error action in the current state
    #[must_use]
    pub fn valid_transitions(&self) -> SmallVec<[TokenId; 8]> {
        let state = self.state();
        self.grammar
            .tokens
            .iter()
            .enumerate()
            .filter(|&(index, _)| !self.table.action(state, index).is_error())
            .map(|(_, def)| def.token)
            .collect()
    }

    /// The accepted value
    #[must_use]
    pub fn result(&self) -> Option<&V> {
        if self.status == ParserStatus::Accepted {
            self.stack.top_value()
        } else {
            None
        }
    }

    /// Move the accepted value out, leaving `V::default()` behind
    pub fn take_result(&mut self) -> Option<V> {
        if self.status == ParserStatus::Accepted {
            self.stack.top_value_mut().map(std::mem::take)
        } else {
            None
        }
    }

    /// Current automaton state
    #[must_use]
    pub fn state(&self) -> StateId {
        self.stack.top_state()
    }

    /// Index of the top stack frame
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Control status of the engine
    #[must_use]
    pub const fn status(&self) -> ParserStatus {
        self.status
    }

    /// Number of reported syntax errors
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors
    }

    /// Counters collected since the last reset
    #[must_use]
    pub const fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// The parse stack, bottom frame first
    #[must_use]
    pub const fn stack(&self) -> &ParseStack<V> {
        &self.stack
    }

    /// Grammar metadata the parser was built with
    #[must_use]
    pub const fn grammar(&self) -> &Grammar<'t> {
        &self.grammar
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Short name of a token id; see [`Grammar::token_name`]
    #[must_use]
    pub fn token_name(&self, token: TokenId) -> String {
        self.grammar.token_name(token)
    }

    /// Diagnostic name of a token id; see [`Grammar::token_full_name`]
    #[must_use]
    pub fn token_full_name(&self, token: TokenId) -> String {
        self.grammar.token_full_name(token)
    }

    fn set_lookahead(&mut self, token: TokenId, value: V) {
        self.lookahead = Some(Lookahead {
            token,
            index: self.grammar.token_index(token),
            value,
        });
    }

    fn fail(&mut self, err: ParseError) -> ParseError {
        self.status = ParserStatus::Failed;
        self.lookahead = None;
        err
    }

    /// One move of the automaton on the pending symbol
    fn transition<A>(&mut self, actions: &mut A) -> Result<Transition, ParseError>
    where
        A: SemanticActions<V> + ?Sized,
    {
        let state = self.state();
        let Some(lookahead) = self.lookahead.as_ref() else {
            return Ok(Transition::Shifted);
        };
        let action = lookahead
            .index
            .map_or(Action::Error, |index| self.table.action(state, index));

        match action {
            Action::Shift(next) => {
                let Some(lookahead) = self.lookahead.take() else {
                    return Ok(Transition::Shifted);
                };
                self.stack.push(next, lookahead.value)?;
                self.recovery = self.recovery.saturating_sub(1);
                self.status = ParserStatus::Shifting;
                self.stats.shifts += 1;
                self.stats.observe_depth(self.stack.depth());
                self.events.handle(ParseEvent::Shift {
                    token: lookahead.token,
                    state: next,
                    depth: self.stack.depth(),
                });
                Ok(Transition::Shifted)
            }
            Action::Reduce(rule) => self.reduce(rule, actions),
            Action::Accept => {
                self.lookahead = None;
                self.status = ParserStatus::Accepted;
                self.events.handle(ParseEvent::Accept {
                    depth: self.stack.depth(),
                });
                Ok(Transition::Accepted)
            }
            Action::Error => self.recover(actions).map(Transition::Recovered),
        }
    }

    fn reduce<A>(&mut self, rule: RuleId, actions: &mut A) -> Result<Transition, ParseError>
    where
        A: SemanticActions<V> + ?Sized,
    {
        let state = self.state();
        let info = self
            .grammar
            .rule(rule)
            .filter(|_| rule != 0)
            .ok_or_else(|| ParseError::corrupt_table(state, format!("reduce by invalid rule {rule}")))?;

        let depth = self.stack.depth();
        if info.reductions > depth {
            return Err(ParseError::corrupt_table(
                state,
                format!("rule {rule} pops {} frames from depth {depth}", info.reductions),
            ));
        }
        let base = depth - info.reductions;
        let origin = self.stack.state_at(base).unwrap_or(0);
        let goto = self.table.goto_state(origin, info.symbol).ok_or_else(|| {
            let name = self
                .grammar
                .nonterminal_name(info.symbol)
                .map_or_else(|| info.symbol.to_string(), str::to_string);
            ParseError::corrupt_table(origin, format!("no goto for {name} after rule {rule}"))
        })?;

        match actions.reduce(rule, self.stack.top_values_mut(info.reductions)) {
            Ok(value) => {
                self.stack.pop(info.reductions);
                self.stack.push(goto, value)?;
                self.status = ParserStatus::Reducing;
                self.stats.reductions += 1;
                self.stats.observe_depth(self.stack.depth());
                self.events.handle(ParseEvent::Reduce {
                    rule,
                    goto,
                    depth: self.stack.depth(),
                });
                Ok(Transition::Reduced)
            }
            Err(SemanticError::Syntax) => self.recover(actions).map(Transition::Recovered),
            Err(SemanticError::Failed(message)) => Err(ParseError::SemanticAction { rule, message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SymbolStream;
    use crate::testing::fixtures::{self, Calculator, NUMBER, PLUS};

    fn expr_parser() -> Parser<'static, &'static crate::table::PackedTable<'static>, i64> {
        Parser::new(&fixtures::EXPR_PACKED, &fixtures::EXPR_GRAMMAR, EngineConfig::default())
    }

    #[test]
    fn test_parse_sum() {
        let mut parser = expr_parser();
        let mut calc = Calculator::default();
        let input = SymbolStream::new(vec![(NUMBER, 3), (PLUS, 0), (NUMBER, 4)]);
        parser.parse(input, &mut calc).unwrap();
        assert_eq!(parser.status(), ParserStatus::Accepted);
        assert_eq!(parser.result(), Some(&7));
        assert_eq!(parser.error_count(), 0);
        assert_eq!(parser.stats().shifts, 3);
        assert_eq!(parser.stats().reductions, 3);
    }

    #[test]
    fn test_take_result() {
        let mut parser = expr_parser();
        let mut calc = Calculator::default();
        parser
            .parse(SymbolStream::new(vec![(NUMBER, 5)]), &mut calc)
            .unwrap();
        assert_eq!(parser.take_result(), Some(5));
        assert_eq!(parser.result(), Some(&0));
    }

    #[test]
    fn test_no_result_before_accept() {
        let mut parser = expr_parser();
        let mut calc = Calculator::default();
        assert_eq!(parser.parse_step(NUMBER, 1, &mut calc), StepOutcome::Shifted);
        assert_eq!(parser.result(), None);
        assert_eq!(parser.take_result(), None);
    }

    #[test]
    fn test_valid_transitions() {
        let mut parser = expr_parser();
        assert_eq!(parser.valid_transitions().as_slice(), &[NUMBER]);
        let mut calc = Calculator::default();
        parser.parse_step(NUMBER, 1, &mut calc);
        // State 2 reduces on every terminal
        assert_eq!(parser.valid_transitions().as_slice(), &[0, NUMBER, PLUS]);
    }

    #[test]
    fn test_corrupt_rule_is_reported() {
        static BAD_RULES: [crate::grammar::RuleInfo; 1] = [crate::grammar::RuleInfo::new(0, 1)];
        let grammar = Grammar {
            rules: &BAD_RULES,
            ..fixtures::EXPR_GRAMMAR
        };
        let mut parser: Parser<'_, _, i64> =
            Parser::new(&fixtures::EXPR_PACKED, &grammar, EngineConfig::default());
        let mut calc = Calculator::default();
        let err = parser
            .parse(SymbolStream::new(vec![(NUMBER, 1)]), &mut calc)
            .unwrap_err();
        assert!(matches!(err, ParseError::CorruptTable { state: 2, .. }));
        assert_eq!(parser.status(), ParserStatus::Failed);
    }

    #[test]
    fn test_semantic_failure_is_fatal() {
        let mut parser = expr_parser();
        let mut failing = |_rule: RuleId, _values: &mut [i64]| -> Result<i64, SemanticError> {
            Err(SemanticError::failed("boom"))
        };
        let err = parser
            .parse(SymbolStream::new(vec![(NUMBER, 1)]), &mut failing)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::SemanticAction {
                rule: 2,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_stack_overflow() {
        let mut parser: Parser<'_, _, i64> = Parser::new(
            &fixtures::EXPR_PACKED,
            &fixtures::EXPR_GRAMMAR,
            EngineConfig::default().with_stack_depth(1),
        );
        let mut calc = Calculator::default();
        let err = parser
            .parse(SymbolStream::new(vec![(NUMBER, 1)]), &mut calc)
            .unwrap_err();
        assert_eq!(err, ParseError::StackOverflow { capacity: 1 });
    }

    #[test]
    fn test_reset_allows_reuse() {
        let mut parser = expr_parser();
        let mut calc = Calculator::default();
        parser
            .parse(SymbolStream::new(vec![(NUMBER, 1)]), &mut calc)
            .unwrap();
        parser.reset();
        assert_eq!(parser.status(), ParserStatus::Ready);
        assert_eq!(parser.depth(), 0);
        assert_eq!(parser.stats(), &ParseStats::new());
    }
}
