//! Parser for Quark specifications
//!
//! This module implements a recursive descent parser that pulls tokens from
//! the [`Scanner`] on demand and builds a [`Spec`]. The grammar never needs
//! more than one token of lookahead, so the parser keeps a single pushback
//! slot instead of a token buffer:
//!
//! ```text
//! spec        := "spec" IDENT debtor "to" creditor
//!                event("create") event("detach") event("discharge")
//! debtor      := IDENT
//! creditor    := IDENT
//! event(NAME) := NAME IDENT "[" arglist "]"
//! arglist     := arg ("," arg)*
//! arg         := IDENT ["=" IDENT]
//! ```
//!
//! Whitespace is skipped between every pair of significant tokens. Parsing
//! stops at the first violation; anything after the closing `]` of the
//! `discharge` event is never read.

mod error;

pub use error::{ParseError, ParseResult};

use crate::ast::{Arg, Constraint, Event, EventKind, Spec};
use crate::lexer::{Lexeme, Scanner, Token};
use smol_str::SmolStr;
use tracing::{debug, trace};

/// The single-token pushback slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookahead<'src> {
    /// Nothing pushed back; the next token comes from the scanner
    Empty,
    /// A token that was read and then handed back
    Held(Lexeme<'src>),
}

/// Parser for Quark specifications
///
/// A parser handles exactly one document: [`Parser::parse`] consumes it.
pub struct Parser<'src> {
    /// Token source
    scanner: Scanner<'src>,
    /// Token read ahead and returned unconsumed
    lookahead: Lookahead<'src>,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            scanner: Scanner::new(source),
            lookahead: Lookahead::Empty,
        }
    }

    /// Parse a complete specification
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation found in source order.
    pub fn parse(mut self) -> ParseResult<Spec> {
        let constraint = self.parse_constraint()?;
        debug!(spec = %constraint.name, "parsed constraint");

        let create = self.parse_event(EventKind::Create)?;
        let detach = self.parse_event(EventKind::Detach)?;
        let discharge = self.parse_event(EventKind::Discharge)?;

        Ok(Spec {
            constraint,
            create,
            detach,
            discharge,
        })
    }

    // ========== Header ==========

    /// Parse `spec NAME DEBTOR to CREDITOR`
    fn parse_constraint(&mut self) -> ParseResult<Constraint> {
        self.expect(Token::Spec, "'spec'")?;
        let name = self.expect_ident("specification name")?;
        let debtor = self.expect_ident("debtor name")?;
        self.expect(Token::To, "'to'")?;
        let creditor = self.expect_ident("creditor name")?;

        Ok(Constraint {
            name,
            debtor,
            creditor,
        })
    }

    // ========== Events ==========

    /// Parse `KEYWORD NAME [args]` for one lifecycle phase
    fn parse_event(&mut self, kind: EventKind) -> ParseResult<Event> {
        self.expect(kind.keyword(), &format!("'{kind}'"))?;
        let name = self.expect_ident(&format!("event name for '{kind}'"))?;

        let mut event = Event::new(name);
        self.parse_args(&mut event)?;

        debug!(event = %kind, name = %event.name, args = event.args.len(), "parsed event");
        Ok(event)
    }

    /// Parse a bracketed, comma-separated, non-empty argument list
    ///
    /// Neither `[]` nor a trailing comma is accepted: both leave `]` where a
    /// field name is required.
    fn parse_args(&mut self, event: &mut Event) -> ParseResult<()> {
        self.expect(Token::LBracket, "'['")?;

        loop {
            event.add_arg(self.parse_arg()?);

            if self.accept(Token::RBracket).is_some() {
                return Ok(());
            }

            let separator = self.scan_significant();
            if separator.token != Token::Comma {
                return Err(ParseError::malformed_argument("',' or ']'", &separator));
            }
        }
    }

    /// Parse `NAME` or `NAME=VALUE`
    fn parse_arg(&mut self) -> ParseResult<Arg> {
        let name = self.scan_significant();
        if name.token != Token::Ident {
            return Err(ParseError::malformed_argument("field", &name));
        }

        if self.accept(Token::Eq).is_none() {
            return Ok(Arg::named(name.literal));
        }

        let value = self.scan_significant();
        if value.token != Token::Ident {
            return Err(ParseError::malformed_argument(
                format!("value for {:?} when using '='", name.literal),
                &value,
            ));
        }

        Ok(Arg::with_value(name.literal, value.literal))
    }

    // ========== Helpers ==========

    /// Next token, taking the pushed-back one first
    fn scan(&mut self) -> Lexeme<'src> {
        match std::mem::replace(&mut self.lookahead, Lookahead::Empty) {
            Lookahead::Held(lexeme) => lexeme,
            Lookahead::Empty => {
                let lexeme = self.scanner.scan();
                trace!(token = ?lexeme.token, literal = lexeme.literal, "scan");
                lexeme
            }
        }
    }

    /// Next token that is not whitespace
    fn scan_significant(&mut self) -> Lexeme<'src> {
        loop {
            let lexeme = self.scan();
            if lexeme.token != Token::Whitespace {
                return lexeme;
            }
        }
    }

    /// Hand a token back so the next scan returns it again
    fn unscan(&mut self, lexeme: Lexeme<'src>) {
        debug_assert_eq!(
            self.lookahead,
            Lookahead::Empty,
            "pushback slot already holds a token"
        );
        trace!(token = ?lexeme.token, "unscan");
        self.lookahead = Lookahead::Held(lexeme);
    }

    /// Consume the next significant token if it is `expected`, otherwise
    /// leave it in the pushback slot
    fn accept(&mut self, expected: Token) -> Option<Lexeme<'src>> {
        let lexeme = self.scan_significant();
        if lexeme.token == expected {
            Some(lexeme)
        } else {
            self.unscan(lexeme);
            None
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> ParseResult<Lexeme<'src>> {
        let lexeme = self.scan_significant();
        if lexeme.token == token {
            Ok(lexeme)
        } else {
            Err(ParseError::unexpected(expected, &lexeme))
        }
    }

    fn expect_ident(&mut self, expected: &str) -> ParseResult<SmolStr> {
        self.expect(Token::Ident, expected)
            .map(|lexeme| SmolStr::new(lexeme.literal))
    }
}

/// Parse a Quark specification from source code
///
/// # Errors
///
/// Returns an error if parsing fails
pub fn parse(source: &str) -> ParseResult<Spec> {
    debug!(len = source.len(), "parsing specification");
    Parser::new(source).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;
    use pretty_assertions::assert_eq;

    const LOAN: &str = "spec Loan L to B create Created [amount=100, currency=USD] \
                        detach Detached [reason] discharge Discharged [amount=100]";

    /// Wrap an argument list in an otherwise valid document
    fn with_create_args(args: &str) -> String {
        format!("spec S D to C create E {args} detach D [x] discharge F [y]")
    }

    fn parse_err(source: &str) -> ParseError {
        parse(source).unwrap_err()
    }

    #[test]
    fn test_parse_loan() {
        let spec = parse(LOAN).unwrap();

        assert_eq!(spec.constraint, Constraint::new("Loan", "L", "B"));
        assert_eq!(spec.create.name.as_str(), "Created");
        assert_eq!(
            spec.create.args,
            vec![
                Arg::with_value("amount", "100"),
                Arg::with_value("currency", "USD"),
            ]
        );
        assert_eq!(spec.detach.name.as_str(), "Detached");
        assert_eq!(spec.detach.args, vec![Arg::named("reason")]);
        assert_eq!(spec.discharge.name.as_str(), "Discharged");
        assert_eq!(spec.discharge.args, vec![Arg::with_value("amount", "100")]);
    }

    #[test]
    fn test_missing_spec_keyword() {
        let err =
            parse_err("Loan L to B create Created [amount=100] detach D [r] discharge E [a]");
        assert_eq!(err.to_string(), "found \"Loan\", expected 'spec'");
        assert_eq!(err.found(), "Loan");
        assert_eq!(err.span(), Span::new(0, 4));
    }

    #[test]
    fn test_empty_source() {
        let err = parse_err("");
        assert_eq!(err.to_string(), "found \"\", expected 'spec'");
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(
            parse_err("spec to").to_string(),
            "found \"to\", expected specification name"
        );
        assert_eq!(
            parse_err("spec Loan [").to_string(),
            "found \"[\", expected debtor name"
        );
        assert_eq!(
            parse_err("spec Loan L from B").to_string(),
            "found \"from\", expected 'to'"
        );
        assert_eq!(
            parse_err("spec Loan L to create").to_string(),
            "found \"create\", expected creditor name"
        );
    }

    #[test]
    fn test_keyword_prefix_is_not_keyword() {
        let err = parse_err("spec X Y to Z creates E [a] detach D [b] discharge F [c]");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(err.to_string(), "found \"creates\", expected 'create'");
    }

    #[test]
    fn test_events_must_be_in_order() {
        let err = parse_err("spec S D to C detach E [a] create F [b] discharge G [c]");
        assert_eq!(err.to_string(), "found \"detach\", expected 'create'");

        let err = parse_err("spec S D to C create E [a] discharge G [c] detach F [b]");
        assert_eq!(err.to_string(), "found \"discharge\", expected 'detach'");
    }

    #[test]
    fn test_missing_event_name() {
        let err = parse_err("spec S D to C create [a] detach D [x] discharge F [y]");
        assert_eq!(err.to_string(), "found \"[\", expected event name for 'create'");
    }

    #[test]
    fn test_missing_left_bracket() {
        let err = parse_err("spec S D to C create E a] detach D [x] discharge F [y]");
        assert_eq!(err.to_string(), "found \"a\", expected '['");
    }

    #[test]
    fn test_argument_order_preserved() {
        let spec = parse(&with_create_args("[a, b=1, c]")).unwrap();
        assert_eq!(
            spec.create.args,
            vec![Arg::named("a"), Arg::with_value("b", "1"), Arg::named("c")]
        );
    }

    #[test]
    fn test_duplicate_arguments_kept() {
        let spec = parse(&with_create_args("[a=1, a=2, a]")).unwrap();
        assert_eq!(
            spec.create.args,
            vec![
                Arg::with_value("a", "1"),
                Arg::with_value("a", "2"),
                Arg::named("a"),
            ]
        );
    }

    #[test]
    fn test_empty_argument_list_rejected() {
        let err = parse_err(&with_create_args("[]"));
        assert!(matches!(err, ParseError::MalformedArgument { .. }));
        assert_eq!(err.to_string(), "found \"]\", expected field");
    }

    #[test]
    fn test_trailing_comma_rejected() {
        let err = parse_err(&with_create_args("[a,]"));
        assert!(matches!(err, ParseError::MalformedArgument { .. }));
        assert_eq!(err.to_string(), "found \"]\", expected field");
    }

    #[test]
    fn test_missing_value_rejected() {
        let err = parse_err(&with_create_args("[a=]"));
        assert!(matches!(err, ParseError::MalformedArgument { .. }));
        assert_eq!(
            err.to_string(),
            "found \"]\", expected value for \"a\" when using '='"
        );
    }

    #[test]
    fn test_missing_separator_rejected() {
        let err = parse_err(&with_create_args("[a b]"));
        assert_eq!(err.to_string(), "found \"b\", expected ',' or ']'");

        let err = parse_err(&with_create_args("[a=1 b=2]"));
        assert_eq!(err.to_string(), "found \"b\", expected ',' or ']'");
    }

    #[test]
    fn test_unterminated_argument_list() {
        let err = parse_err("spec S D to C create E [a, b");
        assert_eq!(err.to_string(), "found \"\", expected ',' or ']'");
    }

    #[test]
    fn test_keyword_as_value_rejected() {
        let err = parse_err(&with_create_args("[a=to]"));
        assert_eq!(
            err.to_string(),
            "found \"to\", expected value for \"a\" when using '='"
        );
    }

    #[test]
    fn test_illegal_character_reported() {
        let err = parse_err(&with_create_args("[amount=10.5]"));
        assert_eq!(err.to_string(), "found \".\", expected ',' or ']'");

        let err = parse_err("spec Loan L to B# create");
        assert_eq!(err.to_string(), "found \"#\", expected 'create'");
    }

    #[test]
    fn test_whitespace_insensitive() {
        let spaced = "\n  spec\tLoan  L\n to B\n\ncreate Created\n[ amount = 100 ,currency=USD ]\n\
                      detach Detached[reason]discharge   Discharged [\tamount\t=\t100\t]  ";
        assert_eq!(parse(spaced).unwrap(), parse(LOAN).unwrap());
    }

    #[test]
    fn test_display_reparses() {
        let spec = parse(LOAN).unwrap();
        assert_eq!(parse(&spec.to_string()).unwrap(), spec);
    }

    #[test]
    fn test_trailing_content_ignored() {
        let source = format!("{LOAN} this is never read $$$");
        assert!(parse(&source).is_ok());
    }

    #[test]
    fn test_braces_are_not_brackets() {
        let err = parse_err(&with_create_args("{a}"));
        assert_eq!(err.to_string(), "found \"{\", expected '['");
    }

    #[test]
    fn test_pushback_then_separator() {
        let mut parser = Parser::new("a , b");
        assert!(parser.accept(Token::Eq).is_none());
        assert_eq!(
            parser.lookahead,
            Lookahead::Held(Lexeme::new(Token::Ident, "a", Span::new(0, 1)))
        );
        assert_eq!(parser.scan_significant().literal, "a");
        assert_eq!(parser.lookahead, Lookahead::Empty);
        assert!(parser.accept(Token::Comma).is_some());
        assert_eq!(parser.scan_significant().literal, "b");
        assert_eq!(parser.scan_significant().token, Token::Eof);
    }

    #[test]
    fn test_multibyte_illegal_value() {
        let err = parse_err(&with_create_args("[a=\u{20ac}]"));
        assert!(matches!(err, ParseError::MalformedArgument { .. }));
        assert_eq!(
            err.to_string(),
            "found \"\u{20ac}\", expected value for \"a\" when using '='"
        );
        assert_eq!(err.span().len(), 3);
    }

    #[test]
    fn test_quote_in_source_is_escaped() {
        let err = parse_err("spec \"");
        assert_eq!(
            err.to_string(),
            r#"found "\"", expected specification name"#
        );
        assert_eq!(err.found(), "\"");
    }

    #[test]
    fn test_scan_reads_every_token() {
        let mut parser = Parser::new("spec Loan");
        let tokens: Vec<_> = std::iter::repeat_with(|| parser.scan().token)
            .take(4)
            .collect();
        assert_eq!(
            tokens,
            vec![Token::Spec, Token::Whitespace, Token::Ident, Token::Eof]
        );
    }
}
