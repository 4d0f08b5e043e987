use smallvec::SmallVec;

/// Character supplier with multi-character pushback
pub trait CharSource {
    /// Next character, `None` at end of input
    fn next_char(&mut self) -> Option<char>;

    /// Return a character so that the next `next_char` yields it again
    fn unget_char(&mut self, c: char);
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> Option<char> {
        (**self).next_char()
    }

    fn unget_char(&mut self, c: char) {
        (**self).unget_char(c);
    }
}

/// [`CharSource`] over a string slice
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: std::str::Chars<'a>,
    pushback: SmallVec<[char; 16]>,
}

impl<'a> StrSource<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            pushback: SmallVec::new(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> Option<char> {
        self.pushback.pop().or_else(|| self.chars.next())
    }

    fn unget_char(&mut self, c: char) {
        self.pushback.push(c);
    }
}

/// One-character lookahead over a [`CharSource`]
///
/// Tracks the character offset of the current character so lexemes can carry
/// spans.
#[derive(Debug, Clone)]
pub struct CharCursor<S> {
    source: S,
    current: Option<char>,
    offset: usize,
}

impl<S: CharSource> CharCursor<S> {
    pub fn new(mut source: S) -> Self {
        let current = source.next_char();
        Self {
            source,
            current,
            offset: 0,
        }
    }

    /// Character under the cursor, `None` at end of input
    #[must_use]
    pub const fn current(&self) -> Option<char> {
        self.current
    }

    /// Character offset of the current character
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Consume the current character
    pub fn advance(&mut self) -> Option<char> {
        let consumed = self.current?;
        self.current = self.source.next_char();
        self.offset += 1;
        Some(consumed)
    }

    /// Step back over `c`, which becomes the current character again
    pub fn push_back(&mut self, c: char) {
        if let Some(current) = self.current {
            self.source.unget_char(current);
        }
        self.current = Some(c);
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}
