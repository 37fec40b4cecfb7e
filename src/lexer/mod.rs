//! Lexical analysis for Quark specifications
//!
//! The [`Scanner`] turns source text into classified [`Lexeme`]s one at a
//! time, using the logos crate for the token automaton. It never fails:
//! characters outside every token class come back as [`Token::Illegal`] and
//! it is left to the parser to reject them.

mod token;

use logos::Logos;
pub use token::Token;

use crate::Span;

/// A token with its literal text and source location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'src> {
    /// The token kind
    pub token: Token,
    /// The exact source text of the token (empty at end of input)
    pub literal: &'src str,
    /// Source location
    pub span: Span,
}

impl<'src> Lexeme<'src> {
    /// Create a new lexeme
    #[must_use]
    pub const fn new(token: Token, literal: &'src str, span: Span) -> Self {
        Self {
            token,
            literal,
            span,
        }
    }
}

/// Scanner for Quark source code
pub struct Scanner<'src> {
    inner: logos::Lexer<'src, Token>,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given source
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: Token::lexer(source),
        }
    }

    /// Read the next token
    ///
    /// Once the source is exhausted every further call returns
    /// [`Token::Eof`] with an empty literal.
    pub fn scan(&mut self) -> Lexeme<'src> {
        let Some(result) = self.inner.next() else {
            let end = self.inner.source().len();
            return Lexeme::new(Token::Eof, "", Span::new(end, end));
        };

        let span = Span::from(self.inner.span());
        let literal = self.inner.slice();
        let token = result.unwrap_or(Token::Illegal);
        Lexeme::new(token, literal, span)
    }

    /// Get the remaining source text
    #[must_use]
    pub fn remainder(&self) -> &'src str {
        self.inner.remainder()
    }
}

/// Tokenize source code into a vector of lexemes, whitespace included
///
/// The trailing [`Token::Eof`] is not part of the result.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Lexeme<'_>> {
    let mut scanner = Scanner::new(source);
    std::iter::from_fn(|| {
        let lexeme = scanner.scan();
        (lexeme.token != Token::Eof).then_some(lexeme)
    })
    .collect()
}
