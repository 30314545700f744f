//! Cursor over lexed tokens.
use crate::tokens::{Token, TokenKind};

use thiserror::Error;

/// Immutable token slice with an explicit read position.
///
/// Consuming a token only moves the cursor forward. The tokens
/// themselves are never modified, so a stream can be rewound by
/// constructing a new one over the same slice.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    #[inline]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Index of the next token to be consumed.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens that have not been consumed yet.
    #[inline]
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.pos..]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Return the current token without advancing the cursor.
    #[inline]
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Consumes the current token regardless of kind.
    ///
    /// Returns `None` when the cursor is at the end of the token stream.
    #[inline]
    pub fn next_token(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Consumes the current token if it matches the given token kind.
    ///
    /// Returns true when matched. Returns false when token kinds
    /// do not match, or the token stream is at the end.
    pub fn match_token(&mut self, token_kind: TokenKind) -> bool {
        match self.peek() {
            Some(token) if token.kind == token_kind => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Return the current token and advance the cursor.
    ///
    /// The consumed token must match the given token kind, otherwise
    /// an error is returned. The cursor is not advanced if the token
    /// kind does not match.
    pub fn expect(&mut self, token_kind: TokenKind) -> Result<&'a Token, TokenError> {
        match self.peek() {
            Some(token) if token.kind == token_kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(TokenError::Mismatch {
                expected: token_kind,
                encountered: token.clone(),
            }),
            None => Err(TokenError::EndOfSource { expected: token_kind }),
        }
    }
}

/// Error returned when an unexpected token is encountered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("expected {expected}, found {encountered}")]
    Mismatch { expected: TokenKind, encountered: Token },

    #[error("expected {expected}, found end of input")]
    EndOfSource { expected: TokenKind },
}

impl TokenError {
    /// Kind of token the parser was looking for.
    pub fn expected(&self) -> TokenKind {
        match self {
            Self::Mismatch { expected, .. } | Self::EndOfSource { expected } => *expected,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lex::tokenize;

    #[test]
    fn test_expect_does_not_advance_on_mismatch() {
        let tokens = tokenize("int main").unwrap();
        let mut stream = TokenStream::new(&tokens);

        let err = stream.expect(TokenKind::VoidKeyword).unwrap_err();
        assert_eq!(err.expected(), TokenKind::VoidKeyword);
        assert_eq!(err.to_string(), "expected VoidKeyword, found IntKeyword 'int'");
        assert_eq!(stream.position(), 0);

        assert_eq!(stream.expect(TokenKind::IntKeyword).unwrap().lexeme, "int");
        assert_eq!(stream.expect(TokenKind::Identifier).unwrap().lexeme, "main");
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_expect_end_of_input() {
        let mut stream = TokenStream::new(&[]);
        assert_eq!(
            stream.expect(TokenKind::Semicolon),
            Err(TokenError::EndOfSource {
                expected: TokenKind::Semicolon
            })
        );
        assert_eq!(
            stream.expect(TokenKind::Semicolon).unwrap_err().to_string(),
            "expected Semicolon, found end of input"
        );
    }

    #[test]
    fn test_match_token() {
        let tokens = tokenize("; }").unwrap();
        let mut stream = TokenStream::new(&tokens);

        assert!(!stream.match_token(TokenKind::CloseBrace));
        assert!(stream.match_token(TokenKind::Semicolon));
        assert_eq!(stream.remaining().len(), 1);
        assert_eq!(stream.next_token().map(|t| t.kind), Some(TokenKind::CloseBrace));
        assert_eq!(stream.next_token(), None);
    }
}
