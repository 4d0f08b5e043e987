//! Panic-mode recovery
//!
//! The parser keeps a panic-mode counter that drives a small state machine:
//!
//! - `0`: first error, report it and fall through to synchronizing
//! - `1` or `2`: error shortly after a synchronization, search the stack again
//! - `3`: nothing was shifted since the last synchronization, drop the symbol
//!
//! Each successful shift decrements the counter.

use super::driver::{ParseEvent, ParserStatus, SemanticActions, SyntaxErrorReport};
use super::engine::Parser;
use crate::error::ParseError;
use crate::table::{Action, TableQuery};
use crate::{StateId, TokenId, END_OF_INPUT};

/// Counter value right after synchronizing
const SYNC_WINDOW: u8 = 3;

/// What a recovery attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RecoveryStep {
    /// A synchronizing token was shifted; the current symbol is retried
    Synchronized,
    /// The current symbol was discarded
    DropToken,
}

/// A stack frame able to shift a synchronizing token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SyncPoint {
    pub(super) depth: usize,
    pub(super) token: TokenId,
    pub(super) state: StateId,
}

impl<T: TableQuery, V: Default> Parser<'_, T, V> {
    /// Scan the stack from the top for the first frame that shifts a
    /// synchronizing token, trying the tokens in list order per frame
    pub(super) fn find_sync(&self) -> Option<SyncPoint> {
        self.stack.frames().enumerate().rev().find_map(|(depth, frame)| {
            self.grammar.recover.iter().find_map(|&token| {
                let index = self.grammar.token_index(token)?;
                match self.table.action(frame.state, index) {
                    Action::Shift(state) => Some(SyncPoint {
                        depth,
                        token,
                        state,
                    }),
                    _ => None,
                }
            })
        })
    }

    /// Render the diagnostic for an error in the current state
    ///
    /// When recovery will synchronize on a token, that token's full name is
    /// used as the template and `$m` is replaced by the state message.
    pub(super) fn error_message(&self, token: TokenId) -> String {
        let state = self.state();
        let message = self
            .table
            .message_index(state)
            .and_then(|index| self.grammar.message(index))
            .map_or_else(
                || {
                    format!(
                        "Syntax error on state {state} with token {}",
                        self.grammar.token_name(token)
                    )
                },
                str::to_string,
            );

        match self.find_sync() {
            Some(sync) => self
                .grammar
                .token_full_name(sync.token)
                .replace("$m", &message),
            None => message,
        }
    }

    pub(super) fn recover<A>(&mut self, actions: &mut A) -> Result<RecoveryStep, ParseError>
    where
        A: SemanticActions<V> + ?Sized,
    {
        let state = self.state();
        let token = self
            .lookahead
            .as_ref()
            .map_or(END_OF_INPUT, |lookahead| lookahead.token);
        self.status = ParserStatus::Recovering;
        self.step_error = true;

        if self.recovery == 0 {
            let message = self.error_message(token);
            self.events.handle(ParseEvent::SyntaxError { state, token });
            let report = SyntaxErrorReport {
                state,
                token,
                stack_depth: self.stack.depth(),
                message,
            };
            if !actions.report_error(&report) {
                return Err(ParseError::Aborted { state, token });
            }
            self.errors += 1;
            self.stats.errors += 1;
            if !self.config.error_recovery {
                return Err(ParseError::Syntax {
                    state,
                    token,
                    message: report.message,
                });
            }
            if self.errors > self.config.max_errors {
                return Err(ParseError::TooManyErrors { count: self.errors });
            }
        }

        if self.recovery < SYNC_WINDOW {
            self.recovery = SYNC_WINDOW;
            return self.synchronize(state, token);
        }

        if token == END_OF_INPUT {
            return Err(ParseError::RecoveryExhausted { state, token });
        }
        self.lookahead = None;
        self.stats.dropped_tokens += 1;
        self.events.handle(ParseEvent::DropToken { token });
        Ok(RecoveryStep::DropToken)
    }

    fn synchronize(&mut self, state: StateId, token: TokenId) -> Result<RecoveryStep, ParseError> {
        let sync = self
            .find_sync()
            .ok_or(ParseError::RecoveryExhausted { state, token })?;

        while self.stack.depth() > sync.depth {
            let popped = self.stack.top_state();
            let depth = self.stack.depth();
            self.stack.pop(1);
            self.events.handle(ParseEvent::PopState {
                state: popped,
                depth,
            });
        }
        self.stack.push(sync.state, V::default())?;
        self.stats.observe_depth(self.stack.depth());
        self.events.handle(ParseEvent::Synchronize {
            token: sync.token,
            state: sync.state,
            depth: self.stack.depth(),
        });
        Ok(RecoveryStep::Synchronized)
    }
}
