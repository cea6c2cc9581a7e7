//! Parse context tracking for context-aware error messages
//!
//! The parser maintains a stack of contexts so that an error can say where
//! in the expression structure it happened.

use crate::parser::SyntaxKind;

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// At the top level of a file
    TopLevel,
    /// Parsing a lambda (parameters, annotation, body)
    Lambda,
    /// Parsing a parameter list
    ParameterList,
    /// Parsing `if ... then ... else ...`
    Conditional,
    /// Parsing `let ... = ... in ...`
    LetBinding,
    /// Inside `` `{ ... } ``
    Quote,
    /// Inside `~{ ... }`
    Splice,
    /// Parsing a type annotation
    TypeAnnotation,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::Lambda => "in lambda",
            Self::ParameterList => "in parameter list",
            Self::Conditional => "in if expression",
            Self::LetBinding => "in let binding",
            Self::Quote => "in quotation",
            Self::Splice => "in splice",
            Self::TypeAnnotation => "in type annotation",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "an expression",
            Self::Lambda => "`=>` followed by a braced body",
            Self::ParameterList => "a parameter name",
            Self::Conditional => "`then` and `else` branches",
            Self::LetBinding => "`= <expr> in <expr>`",
            Self::Quote | Self::Splice => "an expression followed by `}`",
            Self::TypeAnnotation => "`int`, `bool`, `<type>` or `type -> type`",
        }
    }

    /// Get the recovery tokens appropriate for this context
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::TopLevel => &[],
            Self::Lambda | Self::Quote | Self::Splice => &[SyntaxKind::R_BRACE],
            Self::ParameterList => &[SyntaxKind::COMMA, SyntaxKind::R_PAREN],
            Self::Conditional => &[SyntaxKind::THEN_KW, SyntaxKind::ELSE_KW],
            Self::LetBinding => &[SyntaxKind::EQ, SyntaxKind::IN_KW],
            Self::TypeAnnotation => &[
                SyntaxKind::R_PAREN,
                SyntaxKind::COMMA,
                SyntaxKind::EQ,
                SyntaxKind::FAT_ARROW,
            ],
        }
    }
}
