//! Small generated-style tables for tests, benches and documentation
//!
//! Two grammars are provided in both table encodings:
//!
//! ```text
//! expression:  S' -> E          statement:  S' -> L
//!              E  -> E '+' E                L  -> L St | St
//!              E  -> number                 St -> E ';'
//!                                           E  -> E '+' E | number
//! ```
//!
//! The statement grammar synchronizes on `';'`.

use crate::error::{LexerError, SemanticError};
use crate::grammar::{Grammar, RuleInfo, TokenDef};
use crate::lexer::{Automaton, CharClass, Lexeme, LexerMode, RegexRule, Transition, Vertex};
use crate::parser::SyntaxErrorReport;
use crate::table::{ActionEntry, DenseTable, GotoEntry, PackedGoto, PackedState, PackedTable, ACCEPT};
use crate::{RuleId, TokenId};

pub const NUMBER: TokenId = 257;
pub const IDENT: TokenId = 258;
pub const STRING: TokenId = 259;
pub const WHILE: TokenId = 300;
pub const PLUS: TokenId = 43;
pub const SEMICOLON: TokenId = 59;
pub const QUOTE: TokenId = 34;

// Expression grammar

static EXPR_TOKENS: [TokenDef<'static>; 3] = [
    TokenDef::new("$", "end of input", 0),
    TokenDef::new("NUMBER", "number", NUMBER),
    TokenDef::new("'+'", "'+'", PLUS),
];

static EXPR_RULES: [RuleInfo; 3] = [RuleInfo::new(0, 1), RuleInfo::new(0, 3), RuleInfo::new(0, 1)];

static EXPR_MESSAGES: [&str; 2] = ["number expected", "'+' or end of input expected"];

pub static EXPR_GRAMMAR: Grammar<'static> = Grammar {
    tokens: &EXPR_TOKENS,
    rules: &EXPR_RULES,
    recover: &[],
    messages: &EXPR_MESSAGES,
    nonterminals: &["E"],
};

/// Expression grammar without any state messages
pub static UNMESSAGED_EXPR_GRAMMAR: Grammar<'static> = Grammar {
    tokens: &EXPR_TOKENS,
    rules: &EXPR_RULES,
    recover: &[],
    messages: &[],
    nonterminals: &["E"],
};

static EXPR_ROWS: [&[i32]; 5] = [
    &[0, 2, 0, 1],
    &[ACCEPT, 0, 3, 0],
    &[-2, -2, -2, 0],
    &[0, 2, 0, 4],
    &[-1, -1, -1, 0],
];

static EXPR_STATE_MESSAGES: [Option<usize>; 5] = [Some(0), Some(1), None, Some(0), None];

pub static EXPR_DENSE: DenseTable<'static> = DenseTable::new(3, &EXPR_ROWS, &EXPR_STATE_MESSAGES);

static EXPR_SHIFT_NUMBER: [ActionEntry; 1] = [ActionEntry::new(1, 2)];
static EXPR_ACCEPT_OR_PLUS: [ActionEntry; 2] = [ActionEntry::new(0, ACCEPT), ActionEntry::new(2, 3)];

static EXPR_STATES: [PackedState<'static>; 5] = [
    PackedState {
        actions: &EXPR_SHIFT_NUMBER,
        default: 0,
        message: Some(0),
    },
    PackedState {
        actions: &EXPR_ACCEPT_OR_PLUS,
        default: 0,
        message: Some(1),
    },
    PackedState {
        actions: &[],
        default: -2,
        message: None,
    },
    PackedState {
        actions: &EXPR_SHIFT_NUMBER,
        default: 0,
        message: Some(0),
    },
    PackedState {
        actions: &[],
        default: -1,
        message: None,
    },
];

static EXPR_GOTO_E: [GotoEntry; 1] = [GotoEntry::new(0, 1)];

static EXPR_GOTOS: [PackedGoto<'static>; 1] = [PackedGoto {
    entries: &EXPR_GOTO_E,
    default: 4,
}];

pub static EXPR_PACKED: PackedTable<'static> = PackedTable::new(&EXPR_STATES, &EXPR_GOTOS, 3);

// Statement grammar

static STMT_TOKENS: [TokenDef<'static>; 4] = [
    TokenDef::new("$", "end of input", 0),
    TokenDef::new("NUMBER", "number", NUMBER),
    TokenDef::new("'+'", "'+'", PLUS),
    TokenDef::new("';'", "missing ';': $m", SEMICOLON),
];

static STMT_RULES: [RuleInfo; 6] = [
    RuleInfo::new(0, 1),
    RuleInfo::new(0, 2),
    RuleInfo::new(0, 1),
    RuleInfo::new(1, 2),
    RuleInfo::new(2, 3),
    RuleInfo::new(2, 1),
];

static STMT_MESSAGES: [&str; 3] = [
    "number expected",
    "number or end of input expected",
    "'+' or ';' expected",
];

pub static STMT_GRAMMAR: Grammar<'static> = Grammar {
    tokens: &STMT_TOKENS,
    rules: &STMT_RULES,
    recover: &[SEMICOLON],
    messages: &STMT_MESSAGES,
    nonterminals: &["L", "St", "E"],
};

static STMT_ROWS: [&[i32]; 9] = [
    &[0, 4, 0, 0, 1, 2, 3],
    &[ACCEPT, 4, 0, 0, 0, 5, 3],
    &[-2, -2, -2, -2, 0, 0, 0],
    &[0, 0, 7, 6, 0, 0, 0],
    &[-5, -5, -5, -5, 0, 0, 0],
    &[-1, -1, -1, -1, 0, 0, 0],
    &[-3, -3, -3, -3, 0, 0, 0],
    &[0, 4, 0, 0, 0, 0, 8],
    &[-4, -4, -4, -4, 0, 0, 0],
];

static STMT_STATE_MESSAGES: [Option<usize>; 9] =
    [Some(0), Some(1), None, Some(2), None, None, None, Some(0), None];

pub static STMT_DENSE: DenseTable<'static> = DenseTable::new(4, &STMT_ROWS, &STMT_STATE_MESSAGES);

static STMT_SHIFT_NUMBER: [ActionEntry; 1] = [ActionEntry::new(1, 4)];
static STMT_ACCEPT_OR_NUMBER: [ActionEntry; 2] = [ActionEntry::new(0, ACCEPT), ActionEntry::new(1, 4)];
static STMT_PLUS_OR_SEMICOLON: [ActionEntry; 2] = [ActionEntry::new(2, 7), ActionEntry::new(3, 6)];

const fn reduce_state(rule: i32) -> PackedState<'static> {
    PackedState {
        actions: &[],
        default: -rule,
        message: None,
    }
}

static STMT_STATES: [PackedState<'static>; 9] = [
    PackedState {
        actions: &STMT_SHIFT_NUMBER,
        default: 0,
        message: Some(0),
    },
    PackedState {
        actions: &STMT_ACCEPT_OR_NUMBER,
        default: 0,
        message: Some(1),
    },
    reduce_state(2),
    PackedState {
        actions: &STMT_PLUS_OR_SEMICOLON,
        default: 0,
        message: Some(2),
    },
    reduce_state(5),
    reduce_state(1),
    reduce_state(3),
    PackedState {
        actions: &STMT_SHIFT_NUMBER,
        default: 0,
        message: Some(0),
    },
    reduce_state(4),
];

static STMT_GOTO_ST: [GotoEntry; 1] = [GotoEntry::new(0, 2)];
static STMT_GOTO_E: [GotoEntry; 1] = [GotoEntry::new(7, 8)];

static STMT_GOTOS: [PackedGoto<'static>; 3] = [
    PackedGoto {
        entries: &[],
        default: 1,
    },
    PackedGoto {
        entries: &STMT_GOTO_ST,
        default: 5,
    },
    PackedGoto {
        entries: &STMT_GOTO_E,
        default: 3,
    },
];

pub static STMT_PACKED: PackedTable<'static> = PackedTable::new(&STMT_STATES, &STMT_GOTOS, 4);

/// Reference actions for the expression grammar
#[derive(Debug, Default)]
pub struct Calculator {
    pub reports: Vec<SyntaxErrorReport>,
    /// Return `false` from the reporter
    pub abort_on_error: bool,
}

impl crate::parser::SemanticActions<i64> for Calculator {
    fn reduce(&mut self, rule: RuleId, values: &mut [i64]) -> Result<i64, SemanticError> {
        match (rule, &*values) {
            (1, &[lhs, _, rhs]) => Ok(lhs + rhs),
            (2, &[n]) => Ok(n),
            _ => Err(SemanticError::failed(format!("unexpected rule {rule}"))),
        }
    }

    fn report_error(&mut self, report: &SyntaxErrorReport) -> bool {
        self.reports.push(report.clone());
        !self.abort_on_error
    }
}

/// Reference actions for the statement grammar
///
/// Every completed statement appends its value to `results`.
#[derive(Debug, Default)]
pub struct StatementCalculator {
    pub results: Vec<i64>,
    pub reports: Vec<SyntaxErrorReport>,
    /// Numbers rejected with [`SemanticError::Syntax`]
    pub forbidden: Option<i64>,
}

impl crate::parser::SemanticActions<i64> for StatementCalculator {
    fn reduce(&mut self, rule: RuleId, values: &mut [i64]) -> Result<i64, SemanticError> {
        match (rule, &*values) {
            (1, &[_, statement]) => Ok(statement),
            (2, &[statement]) => Ok(statement),
            (3, &[value, _]) => {
                self.results.push(value);
                Ok(value)
            }
            (4, &[lhs, _, rhs]) => Ok(lhs + rhs),
            (5, &[n]) if self.forbidden == Some(n) => Err(SemanticError::Syntax),
            (5, &[n]) => Ok(n),
            _ => Err(SemanticError::failed(format!("unexpected rule {rule}"))),
        }
    }

    fn report_error(&mut self, report: &SyntaxErrorReport) -> bool {
        self.reports.push(report.clone());
        true
    }
}

// Token automaton

/// One-or-more digits in the generator's flat encoding
pub const DIGITS_VERTICES: [i32; 2] = [1, -6];
pub const DIGITS_EDGES: [i32; 11] = [0, 1, 1, 1, 48, 57, 1, 1, 1, 48, 57];

static KEYWORD_TOKENS: [TokenDef<'static>; 8] = [
    TokenDef::new("$", "end of input", 0),
    TokenDef::new("NUMBER", "number", NUMBER),
    TokenDef::new("IDENT", "identifier", IDENT),
    TokenDef::new("STRING", "string", STRING),
    TokenDef::new("'+'", "'+'", PLUS),
    TokenDef::new("';'", "';'", SEMICOLON),
    TokenDef::new("'\"'", "'\"'", QUOTE),
    TokenDef::reserved("while", "'while'", WHILE),
];

/// Token definitions for the scanner fixtures
pub static KEYWORD_GRAMMAR: Grammar<'static> = Grammar {
    tokens: &KEYWORD_TOKENS,
    rules: &[],
    recover: &[],
    messages: &[],
    nonterminals: &[],
};

const WHITESPACE: usize = 0;
const DIGITS: usize = 2;
const WORD: usize = 4;
const PLUS_SIGN: usize = 6;
const QUOTE_SIGN: usize = 8;
const STRING_BODY: usize = 10;
const SEMICOLON_SIGN: usize = 12;

static DEFAULT_RULES: [RegexRule; 6] = [
    RegexRule::skip(WHITESPACE),
    RegexRule::token(DIGITS, NUMBER),
    RegexRule::reserved(WORD, IDENT),
    RegexRule::token(PLUS_SIGN, PLUS),
    RegexRule::token(SEMICOLON_SIGN, SEMICOLON),
    RegexRule::token(QUOTE_SIGN, QUOTE).then_mode(1),
];

static STRING_RULES: [RegexRule; 2] = [
    RegexRule::token(STRING_BODY, STRING),
    RegexRule::token(QUOTE_SIGN, QUOTE).then_mode(0),
];

/// `default` mode for numbers, words and operators; `string` mode between quotes
pub static TOKEN_MODES: [LexerMode<'static>; 2] = [
    LexerMode {
        name: "default",
        rules: &DEFAULT_RULES,
    },
    LexerMode {
        name: "string",
        rules: &STRING_RULES,
    },
];

/// Automaton used by [`TOKEN_MODES`]
///
/// # Errors
///
/// Never fails for this fixture; the signature mirrors [`Automaton::new`].
pub fn token_automaton() -> Result<Automaton, LexerError> {
    let whitespace = || CharClass::new([(' ', ' '), ('\t', '\t'), ('\r', '\r'), ('\n', '\n')], false);
    let word_start = || CharClass::new([('a', 'z'), ('A', 'Z'), ('_', '_')], false);
    let word = || CharClass::new([('a', 'z'), ('A', 'Z'), ('0', '9'), ('_', '_')], false);
    let string_char = || CharClass::new([('"', '"')], true);

    Automaton::new(vec![
        Vertex::new(false, vec![Transition::new(1, whitespace())]),
        Vertex::new(true, vec![Transition::new(1, whitespace())]),
        Vertex::new(false, vec![Transition::new(3, CharClass::range('0', '9'))]),
        Vertex::new(true, vec![Transition::new(3, CharClass::range('0', '9'))]),
        Vertex::new(false, vec![Transition::new(5, word_start())]),
        Vertex::new(true, vec![Transition::new(5, word())]),
        Vertex::new(false, vec![Transition::new(7, CharClass::single('+'))]),
        Vertex::new(true, vec![]),
        Vertex::new(false, vec![Transition::new(9, CharClass::single('"'))]),
        Vertex::new(true, vec![]),
        Vertex::new(false, vec![Transition::new(11, string_char())]),
        Vertex::new(true, vec![Transition::new(11, string_char())]),
        Vertex::new(false, vec![Transition::new(13, CharClass::single(';'))]),
        Vertex::new(true, vec![]),
    ])
}

/// Semantic value of a lexeme: numbers parse to their value, everything else is `0`
#[must_use]
pub fn lexeme_value(lexeme: &Lexeme) -> i64 {
    if lexeme.token == NUMBER {
        lexeme.text.parse().unwrap_or(0)
    } else {
        0
    }
}
