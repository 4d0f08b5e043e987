//! # Lexer Module
//!
//! Character sources, the token automaton and the scanner built on them.
//!
//! ## Overview
//!
//! - [`CharSource`]: pull-based character input with pushback
//! - [`Automaton`]: the generated regex automaton; [`Automaton::matches`]
//!   runs one token regex against a [`CharCursor`]
//! - [`Scanner`]: tries the regexes of the current [`LexerMode`] in order,
//!   resolves reserved words and yields [`Lexeme`]s
//!
//! A scanner becomes a parser input through [`Scanner::symbols`]:
//!
//! ```rust
//! use stx::lexer::{Scanner, StrSource};
//! use stx::parser::{EngineConfig, Parser};
//! use stx::testing::fixtures::{self, StatementCalculator};
//!
//! let automaton = fixtures::token_automaton()?;
//! let scanner = Scanner::new(&automaton, &fixtures::TOKEN_MODES, &fixtures::KEYWORD_GRAMMAR, StrSource::new("1 + 2; 40 + 2;"));
//! let mut parser = Parser::new(&fixtures::STMT_DENSE, &fixtures::STMT_GRAMMAR, EngineConfig::default());
//! let mut calc = StatementCalculator::default();
//!
//! parser.parse(scanner.symbols(fixtures::lexeme_value), &mut calc)?;
//! assert_eq!(calc.results, vec![3, 42]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod regex;
mod scanner;
mod source;

pub use regex::{Automaton, CharClass, Transition, Vertex};
pub use scanner::{Lexeme, LexerMode, RegexRule, RuleAction, Scanner, ScannerSymbols};
pub use source::{CharCursor, CharSource, StrSource};
