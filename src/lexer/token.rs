//! Token definitions for Quark

use logos::Logos;

/// Token kinds in the Quark language
///
/// `Eof` and `Illegal` are never produced by the logos automaton directly:
/// the [`Scanner`](super::Scanner) emits them when the input is exhausted or
/// when a character matches no pattern.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // ========== Special ==========
    /// End of the character stream
    Eof,

    /// A maximal run of whitespace
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// A character that belongs to no token class
    Illegal,

    // ========== Keywords ==========
    /// `spec` keyword
    #[token("spec")]
    Spec,

    /// `to` keyword separating debtor from creditor
    #[token("to")]
    To,

    /// `create` event keyword
    #[token("create")]
    Create,

    /// `detach` event keyword
    #[token("detach")]
    Detach,

    /// `discharge` event keyword
    #[token("discharge")]
    Discharge,

    // ========== Punctuation ==========
    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `=`
    #[token("=")]
    Eq,

    /// `,`
    #[token(",")]
    Comma,

    // ========== Literals ==========
    /// Names and values: letters, digits and underscores
    #[regex(r"[a-zA-Z0-9_]+")]
    Ident,
}

impl Token {
    /// Whether this token is one of the reserved words
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Token::Spec | Token::To | Token::Create | Token::Detach | Token::Discharge
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Whitespace => write!(f, "whitespace"),
            Token::Illegal => write!(f, "illegal character"),
            Token::Spec => write!(f, "spec"),
            Token::To => write!(f, "to"),
            Token::Create => write!(f, "create"),
            Token::Detach => write!(f, "detach"),
            Token::Discharge => write!(f, "discharge"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Eq => write!(f, "="),
            Token::Comma => write!(f, ","),
            Token::Ident => write!(f, "identifier"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(lex("spec"), vec![Token::Spec]);
        assert_eq!(lex("to"), vec![Token::To]);
        assert_eq!(lex("create"), vec![Token::Create]);
        assert_eq!(lex("detach"), vec![Token::Detach]);
        assert_eq!(lex("discharge"), vec![Token::Discharge]);
    }

    #[test]
    fn test_keyword_prefix_is_ident() {
        assert_eq!(lex("creates"), vec![Token::Ident]);
        assert_eq!(lex("tokens"), vec![Token::Ident]);
        assert_eq!(lex("spec_1"), vec![Token::Ident]);
        assert_eq!(lex("detached"), vec![Token::Ident]);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(lex("Spec"), vec![Token::Ident]);
        assert_eq!(lex("TO"), vec![Token::Ident]);
        assert_eq!(lex("Discharge"), vec![Token::Ident]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            lex("{}[]=,"),
            vec![
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
                Token::Eq,
                Token::Comma,
            ]
        );
    }

    #[test]
    fn test_whitespace_run_is_one_token() {
        assert_eq!(
            lex("a \t\n  b"),
            vec![Token::Ident, Token::Whitespace, Token::Ident]
        );
    }

    #[test]
    fn test_digits_are_ident() {
        assert_eq!(lex("100"), vec![Token::Ident]);
        assert_eq!(lex("_x9"), vec![Token::Ident]);
    }

    #[test]
    fn test_is_keyword() {
        assert!(Token::Spec.is_keyword());
        assert!(Token::Discharge.is_keyword());
        assert!(!Token::Ident.is_keyword());
        assert!(!Token::Comma.is_keyword());
    }
}
