//! # Error Types
//!
//! Error types for parsing, scanning and semantic actions.
//!
//! ## Overview
//!
//! - [`ParseError`]: why a parse ended without being accepted
//! - [`LexerError`]: a symbol or character source could not produce input
//! - [`SemanticError`]: returned by reduce callbacks
//!
//! Syntax errors are normally handled by panic-mode recovery and only reach
//! the caller as [`ParseError::Syntax`] when recovery is disabled. Every other
//! variant aborts the parse immediately.
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, errors integrate with [`miette`]
//! through stable diagnostic codes.

use crate::parser::ParserStatus;
use crate::{RuleId, StateId, TokenId};
use std::ops::Range;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ParseError {
    #[error("{message}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::syntax)))]
    Syntax {
        state: StateId,
        token: TokenId,
        message: String,
    },

    #[error("Unable to recover from syntax error on state {state} with token {token}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::recovery_exhausted)))]
    RecoveryExhausted { state: StateId, token: TokenId },

    #[error("Parse stack overflow (capacity {capacity})")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::stack_overflow)))]
    StackOverflow { capacity: usize },

    #[error("Semantic action for rule {rule} failed: {message}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::semantic_action)))]
    SemanticAction { rule: RuleId, message: String },

    #[error("Parse aborted by the error reporter on state {state} with token {token}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::aborted)))]
    Aborted { state: StateId, token: TokenId },

    #[error("Too many syntax errors ({count})")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::too_many_errors)))]
    TooManyErrors { count: usize },

    #[error("Corrupt parsing table on state {state}: {detail}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::corrupt_table)))]
    CorruptTable { state: StateId, detail: String },

    #[error("Token {token} fed while token {pending} is still pending; call resume first")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::symbol_pending)))]
    SymbolPending { pending: TokenId, token: TokenId },

    #[error("Parser already finished ({status:?})")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::finished)))]
    Finished { status: ParserStatus },

    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(transparent))]
    Lexer(#[from] LexerError),
}

impl ParseError {
    /// Create a corrupt table error
    #[must_use]
    pub fn corrupt_table(state: StateId, detail: impl Into<String>) -> Self {
        Self::CorruptTable {
            state,
            detail: detail.into(),
        }
    }

    /// Whether the error came out of panic-mode recovery rather than a resource or callback failure
    #[must_use]
    pub const fn is_syntax_related(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. }
                | Self::RecoveryExhausted { .. }
                | Self::Aborted { .. }
                | Self::TooManyErrors { .. }
        )
    }
}

/// Lexer error with location information
///
/// Spans are character offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[error("{kind}")]
pub struct LexerError {
    #[cfg_attr(feature = "diagnostics", label)]
    pub span: Range<usize>,
    #[source]
    pub kind: LexerErrorKind,
}

impl LexerError {
    #[must_use]
    pub const fn new(span: Range<usize>, kind: LexerErrorKind) -> Self {
        Self { span, kind }
    }
}

/// Types of lexer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum LexerErrorKind {
    #[error("Unexpected character: '{char}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::unexpected_char)))]
    UnexpectedChar { char: char },

    #[error("Invalid regex automaton: {reason}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::invalid_automaton)))]
    InvalidAutomaton { reason: String },
}

impl LexerErrorKind {
    /// Create an unexpected character error
    #[must_use]
    pub const fn unexpected_char(char: char) -> Self {
        Self::UnexpectedChar { char }
    }

    /// Create an invalid automaton error
    #[must_use]
    pub fn invalid_automaton(reason: impl Into<String>) -> Self {
        Self::InvalidAutomaton {
            reason: reason.into(),
        }
    }
}

/// Failure signalled by a semantic action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Treat the reduction as a syntax error and start recovery
    #[error("Semantic action requested a syntax error")]
    Syntax,

    /// Abort the parse
    #[error("{0}")]
    Failed(String),
}

impl SemanticError {
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_error_display() {
        let err = LexerError::new(3..4, LexerErrorKind::unexpected_char('@'));
        assert_eq!(err.to_string(), "Unexpected character: '@'");
        assert_eq!(err.span, 3..4);
    }

    #[test]
    fn test_lexer_error_converts_into_parse_error() {
        let err: ParseError =
            LexerError::new(0..0, LexerErrorKind::invalid_automaton("vertex 1 is missing")).into();
        assert!(matches!(err, ParseError::Lexer(_)));
        assert_eq!(err.to_string(), "Invalid regex automaton: vertex 1 is missing");
    }

    #[test]
    fn test_syntax_related() {
        assert!(ParseError::RecoveryExhausted { state: 0, token: 0 }.is_syntax_related());
        assert!(!ParseError::StackOverflow { capacity: 4 }.is_syntax_related());
        assert!(!ParseError::corrupt_table(2, "no goto").is_syntax_related());
    }

    #[test]
    fn test_semantic_error_message() {
        assert_eq!(SemanticError::failed("division by zero").to_string(), "division by zero");
    }
}
