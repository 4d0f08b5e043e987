//! # Grammar Metadata
//!
//! Generated metadata that accompanies the parsing tables: rule shapes,
//! token definitions, synchronizing tokens and error messages.
//!
//! Everything here is plain borrowed data so that a generator can emit it as
//! `static` items and share it between parsers on any number of threads.

mod token;

pub use token::TokenDef;

use crate::{RuleId, TokenId};

/// Shape of one grammar rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Nonterminal index of the left-hand side
    pub symbol: usize,
    /// Number of right-hand side symbols popped on reduction
    pub reductions: usize,
}

impl RuleInfo {
    #[must_use]
    pub const fn new(symbol: usize, reductions: usize) -> Self {
        Self { symbol, reductions }
    }
}

/// Grammar tables shared by both table encodings
#[derive(Debug, Clone, Copy)]
pub struct Grammar<'a> {
    /// Token definitions; the position is the terminal index
    pub tokens: &'a [TokenDef<'a>],
    pub rules: &'a [RuleInfo],
    /// Synchronizing tokens, tried in order during recovery
    pub recover: &'a [TokenId],
    pub messages: &'a [&'a str],
    pub nonterminals: &'a [&'a str],
}

impl<'a> Grammar<'a> {
    /// Terminal index of a token id
    #[must_use]
    pub fn token_index(&self, token: TokenId) -> Option<usize> {
        self.tokens.iter().position(|def| def.token == token)
    }

    /// Short name of a token id
    #[must_use]
    pub fn token_name(&self, token: TokenId) -> String {
        self.token_def(token).map_or_else(|| unknown_token_name(token), |def| def.name.to_string())
    }

    /// Descriptive name of a token id, used in error messages
    #[must_use]
    pub fn token_full_name(&self, token: TokenId) -> String {
        self.token_def(token).map_or_else(|| unknown_token_name(token), |def| def.full_name.to_string())
    }

    /// Definition of a token id, `None` for ids the grammar does not declare
    #[must_use]
    pub fn token_def(&self, token: TokenId) -> Option<&'a TokenDef<'a>> {
        self.tokens.iter().find(|def| def.token == token)
    }

    #[must_use]
    pub fn rule(&self, rule: RuleId) -> Option<RuleInfo> {
        self.rules.get(rule).copied()
    }

    #[must_use]
    pub fn message(&self, index: usize) -> Option<&'a str> {
        self.messages.get(index).copied()
    }

    #[must_use]
    pub fn nonterminal_name(&self, index: usize) -> Option<&'a str> {
        self.nonterminals.get(index).copied()
    }

    /// Token id of a reserved word, matched exactly
    #[must_use]
    pub fn find_reserved_word(&self, word: &str) -> Option<TokenId> {
        self.reserved_words()
            .find(|def| def.name == word)
            .map(|def| def.token)
    }

    /// Token id of a reserved word, ignoring ASCII case
    #[must_use]
    pub fn find_reserved_word_ignore_case(&self, word: &str) -> Option<TokenId> {
        self.reserved_words()
            .find(|def| def.name.eq_ignore_ascii_case(word))
            .map(|def| def.token)
    }

    pub fn reserved_words(&self) -> impl Iterator<Item = &'a TokenDef<'a>> + 'a {
        self.tokens.iter().filter(|def| def.reserved)
    }
}

fn unknown_token_name(token: TokenId) -> String {
    match char::from_u32(token) {
        Some(c) if token < 256 => format!("'{c}'"),
        _ => "UNKNOWN TOKEN".to_string(),
    }
}
