//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! The numbering doubles as the symbol index of the grammar tables, so the
//! order here and the order of `SYMBOL_NAMES` in `grammar.rs` must agree.

/// All syntax kinds (tokens and nodes) in lamgamma
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (lambdas, applications, let bindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // identifier
    NUMBER,             // 42

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACE,            // {
    R_BRACE,            // }
    QUOTE_OPEN,         // `{
    SPLICE_OPEN,        // ~{
    TILDE,              // ~
    COLON,              // :
    COMMA,              // ,
    FAT_ARROW,          // =>
    ARROW,              // ->
    EQ,                 // =
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    EQ_EQ,              // ==
    BANG_EQ,            // !=
    LT,                 // <
    LT_EQ,              // <=
    GT,                 // >
    GT_EQ,              // >=
    AMP_AMP,            // &&
    PIPE_PIPE,          // ||
    BANG,               // !

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    LET_KW,
    REC_KW,
    IN_KW,
    IF_KW,
    THEN_KW,
    ELSE_KW,
    TRUE_KW,
    FALSE_KW,
    MOD_KW,
    INT_KW,
    BOOL_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,

    // Expressions
    PAREN_EXPR,
    NAME_REF,
    LITERAL,
    LAMBDA,
    PARAM_LIST,
    PARAM,
    RET_TYPE,
    APP_EXPR,
    BINARY_EXPR,
    NOT_EXPR,
    IF_EXPR,
    LET_EXPR,
    QUOTE_EXPR,
    SPLICE_EXPR,

    // Types
    INT_TYPE,
    BOOL_TYPE,
    FUNC_TYPE,
    CODE_TYPE,
    PAREN_TYPE,

    // Special
    ERROR,
    EOF,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::LET_KW as u16) && (self as u16) <= (Self::BOOL_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::BANG as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::IDENT | Self::NUMBER | Self::TRUE_KW | Self::FALSE_KW)
    }

    /// Check if this is a composite node kind
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::SOURCE_FILE as u16) && (self as u16) <= (Self::PAREN_TYPE as u16)
    }

    /// Check if a token of this kind can start an application argument
    pub fn starts_simple_expr(self) -> bool {
        matches!(
            self,
            Self::L_PAREN
                | Self::IDENT
                | Self::NUMBER
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::QUOTE_OPEN
                | Self::SPLICE_OPEN
                | Self::TILDE
        )
    }

    /// Number of kinds, i.e. the size of the grammar symbol table
    pub const fn count() -> usize {
        Self::__LAST as usize
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LamgammaLanguage {}

impl rowan::Language for LamgammaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<LamgammaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<LamgammaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<LamgammaLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_categories() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::LET_KW.is_keyword());
        assert!(SyntaxKind::BOOL_KW.is_keyword());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(SyntaxKind::BANG.is_punct());
        assert!(SyntaxKind::LAMBDA.is_node());
        assert!(!SyntaxKind::ERROR.is_node());
    }

    #[test]
    fn test_raw_roundtrip() {
        for raw in 0..SyntaxKind::count() as u16 {
            let kind = SyntaxKind::from(rowan::SyntaxKind(raw));
            assert_eq!(rowan::SyntaxKind::from(kind).0, raw);
        }
    }
}
