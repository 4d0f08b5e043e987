//! # Input Generators
//!
//! Builders for token sequences over the fixture grammars, meant to be driven
//! by `proptest` strategies.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stx::testing::generators::statement_tokens;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn statements_are_accepted(statements in prop::collection::vec(prop::collection::vec(0i64..100, 1..4), 1..8)) {
//!         let tokens = statement_tokens(&statements);
//!         // parse with fixtures::STMT_PACKED ...
//!     }
//! }
//! ```

use super::fixtures::{NUMBER, PLUS, SEMICOLON};
use crate::TokenId;

/// Tokens of `n1 + n2 + ... ;` for every statement
///
/// Empty statements are skipped since the statement grammar has no empty
/// expression.
#[must_use]
pub fn statement_tokens(statements: &[Vec<i64>]) -> Vec<(TokenId, i64)> {
    let mut tokens = Vec::new();
    for operands in statements.iter().filter(|operands| !operands.is_empty()) {
        for (index, &operand) in operands.iter().enumerate() {
            if index > 0 {
                tokens.push((PLUS, 0));
            }
            tokens.push((NUMBER, operand));
        }
        tokens.push((SEMICOLON, 0));
    }
    tokens
}

/// Value each statement produced by [`statement_tokens`] evaluates to
#[must_use]
pub fn statement_sums(statements: &[Vec<i64>]) -> Vec<i64> {
    statements
        .iter()
        .filter(|operands| !operands.is_empty())
        .map(|operands| operands.iter().sum())
        .collect()
}

/// Tokens of `n1 + n2 + ...` for the expression grammar
#[must_use]
pub fn expression_tokens(operands: &[i64]) -> Vec<(TokenId, i64)> {
    let mut tokens = Vec::with_capacity(operands.len() * 2);
    for (index, &operand) in operands.iter().enumerate() {
        if index > 0 {
            tokens.push((PLUS, 0));
        }
        tokens.push((NUMBER, operand));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_tokens() {
        let tokens = statement_tokens(&[vec![1, 2], vec![], vec![3]]);
        assert_eq!(
            tokens,
            vec![
                (NUMBER, 1),
                (PLUS, 0),
                (NUMBER, 2),
                (SEMICOLON, 0),
                (NUMBER, 3),
                (SEMICOLON, 0)
            ]
        );
        assert_eq!(statement_sums(&[vec![1, 2], vec![], vec![3]]), vec![3, 3]);
    }

    #[test]
    fn test_expression_tokens() {
        assert_eq!(expression_tokens(&[4]), vec![(NUMBER, 4)]);
        assert!(expression_tokens(&[]).is_empty());
    }
}
