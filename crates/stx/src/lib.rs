//! # Stx
//!
//! Runtime engine for table-driven LR parsers and their regex scanners.
//!
//! ## Overview
//!
//! A grammar compiler produces parsing tables (action, goto, rule metadata,
//! recovery tokens, error messages) and a regex automaton for the tokens. Stx
//! executes them:
//!
//! - **Table queries**: one [`TableQuery`] trait over the packed and the dense
//!   encodings of the same logical tables
//! - **Parsing engine**: shift/reduce/goto automaton with a bounded stack, in a
//!   batch mode ([`Parser::parse`]) and an incremental mode
//!   ([`Parser::parse_step`])
//! - **Error recovery**: panic-mode recovery with synchronizing tokens and a
//!   three-shift healing window
//! - **Scanning**: a backtracking matcher over the token automaton and a
//!   mode-aware [`Scanner`] that feeds the parser
//!
//! ## Quick Start
//!
//! Parse `3 + 4` with the expression grammar `E -> E '+' E | number`:
//!
//! ```rust
//! use stx::parser::{EngineConfig, Parser, SymbolStream};
//! use stx::testing::fixtures::{self, NUMBER, PLUS};
//!
//! let mut parser = Parser::new(&fixtures::EXPR_PACKED, &fixtures::EXPR_GRAMMAR, EngineConfig::default());
//! let mut input = SymbolStream::new(vec![(NUMBER, 3), (PLUS, 0), (NUMBER, 4)]);
//! let mut calc = fixtures::Calculator::default();
//!
//! parser.parse(&mut input, &mut calc).expect("valid input");
//! assert_eq!(parser.result(), Some(&7));
//! ```
//!
//! ## Modules
//!
//! - [`table`] - Action/goto table encodings
//! - [`grammar`] - Rule, token, recovery and message metadata
//! - [`parser`] - Parsing engine, recovery, configuration and event hooks
//! - [`lexer`] - Character sources, regex automaton and scanner
//! - [`error`] - Error types
//! - [`testing`] - Fixture tables and reference semantic actions

pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod table;
pub mod testing;

/// External terminal number. `0` is end of input; character tokens use their code point.
pub type TokenId = u32;
/// Automaton state number. State 0 is the initial state.
pub type StateId = usize;
/// Index into the rule table.
pub type RuleId = usize;

/// Token id of the end of input.
pub const END_OF_INPUT: TokenId = 0;

// Re-export commonly used types
pub use error::{LexerError, LexerErrorKind, ParseError, SemanticError};
pub use grammar::{Grammar, RuleInfo, TokenDef};
pub use lexer::{Automaton, CharCursor, CharSource, Lexeme, Scanner, StrSource};
pub use parser::{
    EngineConfig, ParseEvent, ParseEventHandler, Parser, ParserStatus, SemanticActions,
    StepOutcome, Symbol, SymbolSource, SyntaxErrorReport,
};
pub use table::{Action, DenseTable, PackedTable, TableQuery};
