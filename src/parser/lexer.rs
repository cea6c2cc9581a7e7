//! Logos-based lexer for lamgamma
//!
//! Fast, lossless tokenization using the logos crate. Nothing is skipped:
//! whitespace and comments come out as trivia tokens so the CST can
//! reproduce the input exactly.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Number,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("`{")]
    QuoteOpen,

    #[token("~{")]
    SpliceOpen,

    #[token("=>")]
    FatArrow,

    #[token("->")]
    Arrow,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("~")]
    Tilde,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("let")]
    LetKw,
    #[token("rec")]
    RecKw,
    #[token("in")]
    InKw,
    #[token("if")]
    IfKw,
    #[token("then")]
    ThenKw,
    #[token("else")]
    ElseKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("mod")]
    ModKw,
    #[token("int")]
    IntKw,
    #[token("bool")]
    BoolKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,

            // Multi-char punctuation
            QuoteOpen => SyntaxKind::QUOTE_OPEN,
            SpliceOpen => SyntaxKind::SPLICE_OPEN,
            FatArrow => SyntaxKind::FAT_ARROW,
            Arrow => SyntaxKind::ARROW,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,

            // Single-char punctuation
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Tilde => SyntaxKind::TILDE,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Bang => SyntaxKind::BANG,

            // Keywords
            LetKw => SyntaxKind::LET_KW,
            RecKw => SyntaxKind::REC_KW,
            InKw => SyntaxKind::IN_KW,
            IfKw => SyntaxKind::IF_KW,
            ThenKw => SyntaxKind::THEN_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            ModKw => SyntaxKind::MOD_KW,
            IntKw => SyntaxKind::INT_KW,
            BoolKw => SyntaxKind::BOOL_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_let() {
        let tokens: Vec<_> = Lexer::new("let x = 1 in x").collect();
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[0].kind, SyntaxKind::LET_KW);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[4].kind, SyntaxKind::EQ);
        assert_eq!(tokens[6].kind, SyntaxKind::NUMBER);
        assert_eq!(tokens[8].kind, SyntaxKind::IN_KW);
        assert_eq!(tokens[10].offset, TextSize::new(13));
    }

    #[test]
    fn test_lex_keyword_prefix_is_ident() {
        assert_eq!(kinds("letter"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("modulo"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("mod"), vec![SyntaxKind::MOD_KW]);
    }

    #[test]
    fn test_lex_staging() {
        assert_eq!(
            kinds("`{~{x}}"),
            vec![
                SyntaxKind::QUOTE_OPEN,
                SyntaxKind::SPLICE_OPEN,
                SyntaxKind::IDENT,
                SyntaxKind::R_BRACE,
                SyntaxKind::R_BRACE,
            ]
        );
        assert_eq!(
            kinds("~0{y}"),
            vec![
                SyntaxKind::TILDE,
                SyntaxKind::NUMBER,
                SyntaxKind::L_BRACE,
                SyntaxKind::IDENT,
                SyntaxKind::R_BRACE,
            ]
        );
    }

    #[test]
    fn test_lex_operators() {
        assert_eq!(
            kinds("<=>=->=>"),
            vec![
                SyntaxKind::LT_EQ,
                SyntaxKind::GT_EQ,
                SyntaxKind::ARROW,
                SyntaxKind::FAT_ARROW,
            ]
        );
    }

    #[test]
    fn test_lex_comment() {
        let tokens = tokenize("// comment\nx");
        assert_eq!(tokens[0].kind, SyntaxKind::LINE_COMMENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::IDENT);
    }

    #[test]
    fn test_lex_uppercase_start_is_error() {
        let tokens = tokenize("Foo");
        assert_eq!(tokens[0].kind, SyntaxKind::ERROR);
        let text: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(text, "Foo");
    }
}
