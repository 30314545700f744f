//! Tokens
use smol_str::SmolStr;
use std::fmt;

/// Lexeme paired with its category.
///
/// Tokens are immutable once the lexer has produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw text that was matched in the source.
    pub lexeme: SmolStr,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} '{}'", self.kind, self.lexeme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum TokenKind {
    // ------------------------------------------------------------------------
    // Complex
    Identifier,
    /// Integer literal
    Constant,

    // ------------------------------------------------------------------------
    // Punctuation
    OpenParenthesis,  // (
    CloseParenthesis, // )
    OpenBrace,        // {
    CloseBrace,       // }
    Semicolon,        // ;

    // ------------------------------------------------------------------------
    // Reserved identifiers
    IntKeyword,       // int
    VoidKeyword,      // void
    ReturnKeyword,    // return

    // ------------------------------------------------------------------------
    // Unary operators
    Negation,         // -
    Complement,       // ~
    Decrement,        // --
}

impl TokenKind {
    /// Reclassify an identifier fragment as a reserved keyword.
    ///
    /// Only a full match counts, so `integer` stays an identifier.
    #[rustfmt::skip]
    pub fn keyword(text: impl AsRef<str>) -> Option<Self> {
        match text.as_ref() {
            "int"    => Some(Self::IntKeyword),
            "void"   => Some(Self::VoidKeyword),
            "return" => Some(Self::ReturnKeyword),
            _        => None,
        }
    }

    #[inline]
    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::IntKeyword | Self::VoidKeyword | Self::ReturnKeyword)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Chunk of source code, as a range of byte positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position of bytes in source.
    pub start: usize,
    /// End position of bytes in source, exclusive.
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn fragment<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Number of bytes covered by the span.
    #[inline]
    pub fn size(&self) -> usize {
        self.end - self.start
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_span_past_4gib() {
        let start = u32::MAX as usize + 10;
        let span = Span::new(start, start + 3);
        assert_eq!(span.start, 4_294_967_305);
        assert_eq!(span.size(), 3);
    }

    #[test]
    fn test_span_fragment() {
        let span = Span::new(4, 8);
        assert_eq!(span.fragment("int main(void)"), "main");
        assert_eq!(span.size(), 4);
    }
}
