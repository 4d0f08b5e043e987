use crate::TokenId;

/// Definition of one terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDef<'a> {
    /// Name as written in the grammar (`NUMBER`, `while`, `'+'`)
    pub name: &'a str,
    /// Human readable name used in diagnostics
    ///
    /// For synchronizing tokens this may contain `$m`, which is replaced by
    /// the message of the state where the error occurred.
    pub full_name: &'a str,
    pub token: TokenId,
    /// Whether the scanner looks this token up as a keyword
    pub reserved: bool,
}

impl<'a> TokenDef<'a> {
    #[must_use]
    pub const fn new(name: &'a str, full_name: &'a str, token: TokenId) -> Self {
        Self {
            name,
            full_name,
            token,
            reserved: false,
        }
    }

    #[must_use]
    pub const fn reserved(name: &'a str, full_name: &'a str, token: TokenId) -> Self {
        Self {
            name,
            full_name,
            token,
            reserved: true,
        }
    }
}
