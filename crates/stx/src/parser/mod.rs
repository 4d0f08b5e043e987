//! # Parsing Engine
//!
//! Table-driven LR automaton with panic-mode error recovery.
//!
//! ## Overview
//!
//! [`Parser`] owns all per-parse state (stack, lookahead, recovery counter,
//! statistics) and borrows the immutable tables. It runs either in batch mode,
//! pulling symbols from a [`SymbolSource`] until the input is accepted, or in
//! incremental mode, where the caller pushes one symbol per call.
//!
//! ## Recovery
//!
//! On a syntax error the reporter is called once. The engine then searches the
//! stack from the top for a state that can shift one of the grammar's
//! synchronizing tokens, and if that is not enough it drops input symbols until
//! parsing can continue. Three clean shifts end the recovery window.

mod config;
mod driver;
mod engine;
mod recovery;
mod stack;

pub use config::EngineConfig;
pub use driver::{
    LogEventHandler, NullEventHandler, ParseEvent, ParseEventHandler, ParseStats, ParserStatus,
    SemanticActions, StepOutcome, Symbol, SymbolSource, SymbolStream, SyntaxErrorReport,
};
pub use engine::Parser;
pub use stack::{Frame, ParseStack};
