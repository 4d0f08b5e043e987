use super::regex::Automaton;
use super::source::{CharCursor, CharSource};
use crate::error::{LexerError, LexerErrorKind};
use crate::grammar::Grammar;
use crate::parser::{Symbol, SymbolSource};
use crate::{TokenId, END_OF_INPUT};
use compact_str::CompactString;
use hashbrown::HashMap;
use std::ops::Range;

/// What the scanner does with a matched lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Emit this token
    Token(TokenId),
    /// Discard the lexeme (whitespace, comments)
    Skip,
    /// Look the lexeme up as a reserved word, emitting `fallback` if it is not one
    Reserved { fallback: TokenId },
}

/// One token regex of a lexer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexRule {
    /// Start vertex in the automaton
    pub vertex: usize,
    pub action: RuleAction,
    /// Mode to switch to after a match
    pub next_mode: Option<usize>,
}

impl RegexRule {
    #[must_use]
    pub const fn token(vertex: usize, token: TokenId) -> Self {
        Self {
            vertex,
            action: RuleAction::Token(token),
            next_mode: None,
        }
    }

    #[must_use]
    pub const fn skip(vertex: usize) -> Self {
        Self {
            vertex,
            action: RuleAction::Skip,
            next_mode: None,
        }
    }

    #[must_use]
    pub const fn reserved(vertex: usize, fallback: TokenId) -> Self {
        Self {
            vertex,
            action: RuleAction::Reserved { fallback },
            next_mode: None,
        }
    }

    #[must_use]
    pub const fn then_mode(mut self, mode: usize) -> Self {
        self.next_mode = Some(mode);
        self
    }
}

/// Ordered rules active in one lexer state
#[derive(Debug, Clone, Copy)]
pub struct LexerMode<'a> {
    pub name: &'a str,
    pub rules: &'a [RegexRule],
}

/// A recognized token
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Lexeme {
    pub token: TokenId,
    pub text: CompactString,
    /// Character offsets
    pub span: Range<usize>,
}

/// Mode-aware scanner driving the token automaton
///
/// Rules of the current mode are tried in order and the first match wins.
/// Matches of zero length are ignored so that a skip rule can never stall
/// the scanner.
pub struct Scanner<'a, S> {
    automaton: &'a Automaton,
    modes: &'a [LexerMode<'a>],
    mode: usize,
    cursor: CharCursor<S>,
    reserved: HashMap<CompactString, TokenId, ahash::RandomState>,
    ignore_case: bool,
}

impl<'a, S: CharSource> Scanner<'a, S> {
    /// Create a scanner starting in the first mode
    ///
    /// Reserved words are taken from the grammar's token definitions.
    pub fn new(
        automaton: &'a Automaton,
        modes: &'a [LexerMode<'a>],
        grammar: &Grammar<'_>,
        source: S,
    ) -> Self {
        let mut reserved = HashMap::with_hasher(ahash::RandomState::new());
        for def in grammar.reserved_words() {
            reserved.insert(CompactString::from(def.name), def.token);
        }
        Self {
            automaton,
            modes,
            mode: 0,
            cursor: CharCursor::new(source),
            reserved,
            ignore_case: false,
        }
    }

    /// Match reserved words regardless of ASCII case
    #[must_use]
    pub fn with_ignore_case(mut self) -> Self {
        self.reserved = self
            .reserved
            .drain()
            .map(|(word, token)| (word.to_ascii_lowercase().into(), token))
            .collect();
        self.ignore_case = true;
        self
    }

    /// Switch to the mode called `name`; returns `false` if there is none
    pub fn set_mode(&mut self, name: &str) -> bool {
        match self.modes.iter().position(|mode| mode.name == name) {
            Some(index) => {
                self.mode = index;
                true
            }
            None => false,
        }
    }

    /// Name of the current mode
    #[must_use]
    pub fn mode(&self) -> Option<&'a str> {
        self.modes.get(self.mode).map(|mode| mode.name)
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Recognize the next token
    ///
    /// Returns token `0` at end of input, repeatedly.
    ///
    /// # Errors
    ///
    /// When no rule matches, the offending character is consumed and
    /// reported as [`LexerErrorKind::UnexpectedChar`]; scanning may continue
    /// afterwards.
    pub fn next_lexeme(&mut self) -> Result<Lexeme, LexerError> {
        loop {
            let start = self.cursor.offset();
            let Some(c) = self.cursor.current() else {
                return Ok(Lexeme {
                    token: END_OF_INPUT,
                    text: CompactString::default(),
                    span: start..start,
                });
            };

            let Some((rule, text)) = self.match_rule() else {
                self.cursor.advance();
                log::debug!("unexpected character {c:?} at offset {start}");
                return Err(LexerError::new(
                    start..start + 1,
                    LexerErrorKind::unexpected_char(c),
                ));
            };

            if let Some(mode) = rule.next_mode {
                self.mode = mode;
            }
            let span = start..self.cursor.offset();
            let token = match rule.action {
                RuleAction::Skip => continue,
                RuleAction::Token(token) => token,
                RuleAction::Reserved { fallback } => self.reserved_word(&text).unwrap_or(fallback),
            };
            log::trace!("lexeme {token} {text:?} at {span:?}");
            return Ok(Lexeme { token, text, span });
        }
    }

    /// Adapt the scanner into a parser symbol source
    pub fn symbols<V, F>(self, convert: F) -> ScannerSymbols<'a, S, F>
    where
        F: FnMut(&Lexeme) -> V,
    {
        ScannerSymbols {
            scanner: self,
            convert,
        }
    }

    fn match_rule(&mut self) -> Option<(RegexRule, CompactString)> {
        let modes = self.modes;
        let mode = modes.get(self.mode)?;
        mode.rules.iter().find_map(|rule| {
            let text = self.automaton.matches(rule.vertex, &mut self.cursor)?;
            if text.is_empty() {
                return None;
            }
            Some((*rule, text))
        })
    }

    fn reserved_word(&self, text: &str) -> Option<TokenId> {
        if self.ignore_case {
            self.reserved.get(text.to_ascii_lowercase().as_str()).copied()
        } else {
            self.reserved.get(text).copied()
        }
    }
}

/// [`SymbolSource`] produced by [`Scanner::symbols`]
pub struct ScannerSymbols<'a, S, F> {
    scanner: Scanner<'a, S>,
    convert: F,
}

impl<'a, S, F> ScannerSymbols<'a, S, F> {
    pub fn into_scanner(self) -> Scanner<'a, S> {
        self.scanner
    }
}

impl<S, F, V> SymbolSource<V> for ScannerSymbols<'_, S, F>
where
    S: CharSource,
    F: FnMut(&Lexeme) -> V,
{
    fn next_symbol(&mut self) -> Result<Symbol<V>, LexerError> {
        let lexeme = self.scanner.next_lexeme()?;
        Ok(Symbol::new(lexeme.token, (self.convert)(&lexeme)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::StrSource;
    use crate::testing::fixtures::{
        self, token_automaton, IDENT, NUMBER, PLUS, QUOTE, STRING, TOKEN_MODES, WHILE,
    };

    fn scan(text: &str) -> Vec<(TokenId, String)> {
        let automaton = token_automaton().unwrap();
        let mut scanner = Scanner::new(
            &automaton,
            &TOKEN_MODES,
            &fixtures::KEYWORD_GRAMMAR,
            StrSource::new(text),
        );
        let mut out = Vec::new();
        loop {
            let lexeme = scanner.next_lexeme().unwrap();
            if lexeme.token == END_OF_INPUT {
                return out;
            }
            out.push((lexeme.token, lexeme.text.to_string()));
        }
    }

    #[test]
    fn test_scans_numbers_and_operators() {
        assert_eq!(
            scan("12 + 3"),
            vec![
                (NUMBER, "12".to_string()),
                (PLUS, "+".to_string()),
                (NUMBER, "3".to_string())
            ]
        );
    }

    #[test]
    fn test_reserved_words_and_identifiers() {
        assert_eq!(
            scan("while whilex"),
            vec![(WHILE, "while".to_string()), (IDENT, "whilex".to_string())]
        );
    }

    #[test]
    fn test_reserved_words_ignore_case() {
        let automaton = token_automaton().unwrap();
        let mut scanner = Scanner::new(
            &automaton,
            &TOKEN_MODES,
            &fixtures::KEYWORD_GRAMMAR,
            StrSource::new("WHILE"),
        )
        .with_ignore_case();
        assert_eq!(scanner.next_lexeme().unwrap().token, WHILE);
    }

    #[test]
    fn test_string_mode() {
        // The opening quote switches to the string mode, the closing one back
        assert_eq!(
            scan("\"a b\" 1"),
            vec![
                (QUOTE, "\"".to_string()),
                (STRING, "a b".to_string()),
                (QUOTE, "\"".to_string()),
                (NUMBER, "1".to_string())
            ]
        );
    }

    #[test]
    fn test_unexpected_char_is_consumed() {
        let automaton = token_automaton().unwrap();
        let mut scanner = Scanner::new(
            &automaton,
            &TOKEN_MODES,
            &fixtures::KEYWORD_GRAMMAR,
            StrSource::new("1 @ 2"),
        );
        assert_eq!(scanner.next_lexeme().unwrap().token, NUMBER);
        let err = scanner.next_lexeme().unwrap_err();
        assert_eq!(err.span, 2..3);
        assert_eq!(err.kind, LexerErrorKind::unexpected_char('@'));
        let lexeme = scanner.next_lexeme().unwrap();
        assert_eq!(lexeme.token, NUMBER);
        assert_eq!(lexeme.span, 4..5);
    }

    #[test]
    fn test_set_mode() {
        let automaton = token_automaton().unwrap();
        let mut scanner = Scanner::new(
            &automaton,
            &TOKEN_MODES,
            &fixtures::KEYWORD_GRAMMAR,
            StrSource::new(""),
        );
        assert_eq!(scanner.mode(), Some("default"));
        assert!(scanner.set_mode("string"));
        assert_eq!(scanner.mode(), Some("string"));
        assert!(!scanner.set_mode("comment"));
        assert_eq!(scanner.mode(), Some("string"));
    }

    #[test]
    fn test_end_of_input_repeats() {
        let automaton = token_automaton().unwrap();
        let mut scanner = Scanner::new(
            &automaton,
            &TOKEN_MODES,
            &fixtures::KEYWORD_GRAMMAR,
            StrSource::new("  "),
        );
        let first = scanner.next_lexeme().unwrap();
        assert_eq!(first.token, END_OF_INPUT);
        assert_eq!(first.span, 2..2);
        assert_eq!(scanner.next_lexeme().unwrap().token, END_OF_INPUT);
    }
}
