//! Lexical analysis (tokenizer)
use crate::tokens::{Span, Token, TokenKind};

use log::{debug, trace};
use std::fmt::{self, Write as FmtWrite};
use thiserror::Error;

/// Number of characters of unmatched source reported in a [`LexError`].
pub const ERROR_CONTEXT_CHARS: usize = 20;

/// Token patterns in priority order.
///
/// The first pattern that matches a prefix of the remaining source wins,
/// even when a later pattern would match a longer prefix. Keywords are
/// not listed; they are lexed as identifiers first and reclassified.
///
/// Decrement must stay ahead of negation so `--` isn't lexed as two `-`.
#[rustfmt::skip]
const PATTERNS: &[(TokenKind, Pattern)] = &[
    (TokenKind::Identifier,       Pattern::Scan(scan_identifier)),
    (TokenKind::Constant,         Pattern::Scan(scan_constant)),
    (TokenKind::OpenParenthesis,  Pattern::Literal("(")),
    (TokenKind::CloseParenthesis, Pattern::Literal(")")),
    (TokenKind::OpenBrace,        Pattern::Literal("{")),
    (TokenKind::CloseBrace,       Pattern::Literal("}")),
    (TokenKind::Semicolon,        Pattern::Literal(";")),
    (TokenKind::Decrement,        Pattern::Literal("--")),
    (TokenKind::Negation,         Pattern::Literal("-")),
    (TokenKind::Complement,       Pattern::Literal("~")),
];

/// Matcher for a single token kind.
enum Pattern {
    /// Exact text.
    Literal(&'static str),
    /// Scanner returning the byte length of the match at the start of the text.
    Scan(fn(&str) -> Option<usize>),
}

impl Pattern {
    #[inline]
    fn matches(&self, text: &str) -> Option<usize> {
        match self {
            Pattern::Literal(literal) => text.starts_with(*literal).then(|| literal.len()),
            Pattern::Scan(scan) => scan(text),
        }
    }
}

/// Tokenize preprocessed source code.
///
/// Stops at the first sequence that no pattern recognizes.
pub fn tokenize(source_code: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source_code).collect::<Result<Vec<_>, _>>()?;
    debug!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

/// Lexical analyzer.
///
/// Keeps a byte cursor into the source, and yields tokens lazily.
pub struct Lexer<'a> {
    /// Keep reference to the source so tokens can
    /// slice fragments from it.
    original: &'a str,
    /// Byte position of the start of the remaining source.
    cursor: usize,
    /// Set after an error so iteration stops.
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source_code: &'a str) -> Self {
        Self {
            original: source_code,
            cursor: 0,
            failed: false,
        }
    }

    /// Original source code that was passed in during construction.
    pub fn source_code(&self) -> &'a str {
        self.original
    }

    /// Indicates whether the lexer has consumed all the source.
    pub fn at_end(&self) -> bool {
        self.cursor >= self.original.len()
    }

    /// Scan the remaining source and construct the next token.
    ///
    /// Returns `None` when only whitespace is left.
    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        self.skip_whitespace();

        if self.at_end() {
            return None;
        }

        let rest = &self.original[self.cursor..];

        for (kind, pattern) in PATTERNS {
            // Empty matches would never advance the cursor.
            if let Some(size) = pattern.matches(rest).filter(|size| *size > 0) {
                return Some(Ok(self.make_token(*kind, size)));
            }
        }

        Some(Err(LexError::Unrecognized {
            index: self.cursor,
            fragment: rest.chars().take(ERROR_CONTEXT_CHARS).collect(),
        }))
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.original[self.cursor..];
        let trimmed = rest.trim_start();
        self.cursor += rest.len() - trimmed.len();
    }

    /// Build a token of the given size from the cursor, and move the
    /// cursor past it.
    fn make_token(&mut self, kind: TokenKind, size: usize) -> Token {
        let span = Span::new(self.cursor, self.cursor + size);
        let fragment = span.fragment(self.original);

        // Identifiers that spell a keyword are reserved.
        let kind = match kind {
            TokenKind::Identifier => TokenKind::keyword(fragment).unwrap_or(kind),
            _ => kind,
        };

        self.cursor += size;
        trace!("{:?} {:?}", kind, fragment);

        Token::new(kind, fragment, span)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let result = self.next_token();
        if let Some(Err(_)) = result {
            self.failed = true;
        }
        result
    }
}

/// Render tokens as a table, one token per line.
pub fn dump_tokens(tokens: &[Token]) -> Result<String, fmt::Error> {
    let mut buf = String::new();

    writeln!(buf, "offset | len | token            | fragment")?;
    for token in tokens {
        let offset = token.span.start;
        let len = token.span.size();
        let kind = format!("{:?}", token.kind); // cannot format debug print {:?} into columns
        let fragment = &token.lexeme;
        writeln!(buf, "{offset:6} | {len:<3} | {kind:<16} | \"{fragment}\"")?;
    }

    Ok(buf)
}

// ----------------------------------------------------------------------------
// Scanners

/// `[a-zA-Z_]\w*\b`
///
/// The first character must be an ASCII letter or underscore. Later
/// characters may be any Unicode word character, so `mainé` is one
/// identifier.
fn scan_identifier(text: &str) -> Option<usize> {
    let mut chars = text.char_indices();

    match chars.next() {
        Some((_, c)) if is_letter(c) => {}
        _ => return None,
    }

    let end = chars
        .find(|(_, c)| !is_word_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    at_word_boundary(text, end).then(|| end)
}

/// `[0-9]+\b`
///
/// Digits running straight into letters, like `1foo`, are not a constant.
fn scan_constant(text: &str) -> Option<usize> {
    let end = text
        .char_indices()
        .find(|(_, c)| !is_digit(*c))
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    (end > 0 && at_word_boundary(text, end)).then(|| end)
}

/// A match ending at `end` must not be followed by a word character.
fn at_word_boundary(text: &str, end: usize) -> bool {
    !text[end..].chars().next().map(is_word_char).unwrap_or(false)
}

#[allow(clippy::manual_is_ascii_check)] // consistency with other functions
fn is_digit(c: char) -> bool {
    matches!(c, '0'..='9')
}

fn is_letter(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '_')
}

/// Word characters in the Unicode sense, used for boundaries.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized sequence at byte {index}: '{fragment}'")]
    Unrecognized { index: usize, fragment: String },
}

#[cfg(test)]
mod test {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_scan_identifier() {
        assert_eq!(scan_identifier("main("), Some(4));
        assert_eq!(scan_identifier("_x1 "), Some(3));
        assert_eq!(scan_identifier("1x"), None);
        // Non-ASCII word characters may follow the first character.
        assert_eq!(scan_identifier("mainé("), Some("mainé".len()));
        assert_eq!(scan_identifier("éx"), None);
    }

    #[test]
    fn test_scan_constant() {
        assert_eq!(scan_constant("100;"), Some(3));
        assert_eq!(scan_constant("0"), Some(1));
        assert_eq!(scan_constant("1foo"), None);
        assert_eq!(scan_constant("x"), None);
    }

    #[test]
    fn test_keyword_reclassification() {
        use TokenKind as T;
        assert_eq!(
            kinds("int integer void voids return returned"),
            vec![T::IntKeyword, T::Identifier, T::VoidKeyword, T::Identifier, T::ReturnKeyword, T::Identifier]
        );
    }

    #[test]
    fn test_priority_order() {
        use TokenKind as T;
        assert_eq!(kinds("--"), vec![T::Decrement]);
        assert_eq!(kinds("---"), vec![T::Decrement, T::Negation]);
        assert_eq!(kinds("- -"), vec![T::Negation, T::Negation]);
        assert_eq!(kinds("~-2"), vec![T::Complement, T::Negation, T::Constant]);
    }

    #[test]
    fn test_unrecognized() {
        let err = tokenize("int main(void) { return @0123456789abcdefghij; }").unwrap_err();
        assert_eq!(
            err,
            LexError::Unrecognized {
                index: 24,
                fragment: "@0123456789abcdefghi".to_owned(),
            }
        );
    }

    #[test]
    fn test_unicode_identifier() {
        use TokenKind as T;
        let tokens = tokenize("int mainé(void)").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![T::IntKeyword, T::Identifier, T::OpenParenthesis, T::VoidKeyword, T::CloseParenthesis]);
        assert_eq!(tokens[1].lexeme, "mainé");
        assert_eq!(tokens[1].span, Span::new(4, 10));
    }

    #[test]
    fn test_lexer_stops_after_error() {
        let mut lexer = Lexer::new("a $ b");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \n\t\r\n").unwrap().is_empty());
    }
}
