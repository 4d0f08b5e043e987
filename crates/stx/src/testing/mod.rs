//! # Testing Utilities
//!
//! Fixture tables, reference semantic actions and input generators shared by
//! unit tests, integration tests, benches and fuzz targets.
//!
//! ## Fixtures
//!
//! [`fixtures`] holds an expression grammar and a statement grammar, each in
//! the packed and the dense encoding, plus a token automaton with two lexer
//! modes.
//!
//! ## Property-Based Testing
//!
//! [`generators`] turns plain values into token sequences so that `proptest`
//! strategies can produce sentences of the fixture grammars.

pub mod fixtures;
pub mod generators;

pub use generators::*;
