//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Accessors return `Option` because the CST may be incomplete after errors.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn expr(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Any expression node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Paren(ParenExpr),
    NameRef(NameRef),
    Literal(Literal),
    Lambda(Lambda),
    App(AppExpr),
    Binary(BinaryExpr),
    Not(NotExpr),
    If(IfExpr),
    Let(LetExpr),
    Quote(QuoteExpr),
    Splice(SpliceExpr),
}

impl AstNode for Expression {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::PAREN_EXPR
                | SyntaxKind::NAME_REF
                | SyntaxKind::LITERAL
                | SyntaxKind::LAMBDA
                | SyntaxKind::APP_EXPR
                | SyntaxKind::BINARY_EXPR
                | SyntaxKind::NOT_EXPR
                | SyntaxKind::IF_EXPR
                | SyntaxKind::LET_EXPR
                | SyntaxKind::QUOTE_EXPR
                | SyntaxKind::SPLICE_EXPR
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PAREN_EXPR => Some(Self::Paren(ParenExpr(node))),
            SyntaxKind::NAME_REF => Some(Self::NameRef(NameRef(node))),
            SyntaxKind::LITERAL => Some(Self::Literal(Literal(node))),
            SyntaxKind::LAMBDA => Some(Self::Lambda(Lambda(node))),
            SyntaxKind::APP_EXPR => Some(Self::App(AppExpr(node))),
            SyntaxKind::BINARY_EXPR => Some(Self::Binary(BinaryExpr(node))),
            SyntaxKind::NOT_EXPR => Some(Self::Not(NotExpr(node))),
            SyntaxKind::IF_EXPR => Some(Self::If(IfExpr(node))),
            SyntaxKind::LET_EXPR => Some(Self::Let(LetExpr(node))),
            SyntaxKind::QUOTE_EXPR => Some(Self::Quote(QuoteExpr(node))),
            SyntaxKind::SPLICE_EXPR => Some(Self::Splice(SpliceExpr(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Paren(n) => n.syntax(),
            Self::NameRef(n) => n.syntax(),
            Self::Literal(n) => n.syntax(),
            Self::Lambda(n) => n.syntax(),
            Self::App(n) => n.syntax(),
            Self::Binary(n) => n.syntax(),
            Self::Not(n) => n.syntax(),
            Self::If(n) => n.syntax(),
            Self::Let(n) => n.syntax(),
            Self::Quote(n) => n.syntax(),
            Self::Splice(n) => n.syntax(),
        }
    }
}

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    pub fn expr(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn ident(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::IDENT)
    }

    pub fn name(&self) -> Option<String> {
        self.ident().map(|t| t.text().to_string())
    }
}

ast_node!(Literal, LITERAL);

/// The token content of a literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralKind {
    /// Unparsed digits; range checking happens during lowering
    Int(SyntaxToken),
    Bool(bool),
}

impl Literal {
    pub fn kind(&self) -> Option<LiteralKind> {
        let token = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())?;
        match token.kind() {
            SyntaxKind::NUMBER => Some(LiteralKind::Int(token)),
            SyntaxKind::TRUE_KW => Some(LiteralKind::Bool(true)),
            SyntaxKind::FALSE_KW => Some(LiteralKind::Bool(false)),
            _ => None,
        }
    }
}

ast_node!(Lambda, LAMBDA);

impl Lambda {
    pub fn param_list(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }

    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        self.param_list()
            .into_iter()
            .flat_map(|list| list.syntax().children().filter_map(Param::cast).collect::<Vec<_>>())
    }

    pub fn ret_type(&self) -> Option<TypeExpr> {
        self.0
            .children()
            .find_map(RetType::cast)
            .and_then(|r| r.ty())
    }

    pub fn body(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

ast_node!(ParamList, PARAM_LIST);
ast_node!(RetType, RET_TYPE);

impl RetType {
    pub fn ty(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn ident(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::IDENT)
    }

    pub fn name(&self) -> Option<String> {
        self.ident().map(|t| t.text().to_string())
    }

    pub fn ty(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }
}

ast_node!(AppExpr, APP_EXPR);

impl AppExpr {
    pub fn func(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }

    pub fn arg(&self) -> Option<Expression> {
        self.0.children().filter_map(Expression::cast).nth(1)
    }
}

ast_node!(BinaryExpr, BINARY_EXPR);

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }

    pub fn rhs(&self) -> Option<Expression> {
        self.0.children().filter_map(Expression::cast).nth(1)
    }

    /// The operator token (`+`, `mod`, `&&`, ...)
    pub fn op(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_punct() || t.kind() == SyntaxKind::MOD_KW)
    }
}

ast_node!(NotExpr, NOT_EXPR);

impl NotExpr {
    pub fn operand(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

ast_node!(IfExpr, IF_EXPR);

impl IfExpr {
    pub fn condition(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }

    pub fn then_branch(&self) -> Option<Expression> {
        self.0.children().filter_map(Expression::cast).nth(1)
    }

    pub fn else_branch(&self) -> Option<Expression> {
        self.0.children().filter_map(Expression::cast).nth(2)
    }
}

ast_node!(LetExpr, LET_EXPR);

impl LetExpr {
    pub fn is_rec(&self) -> bool {
        child_token(&self.0, SyntaxKind::REC_KW).is_some()
    }

    pub fn param(&self) -> Option<Param> {
        self.0.children().find_map(Param::cast)
    }

    pub fn value(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }

    pub fn body(&self) -> Option<Expression> {
        self.0.children().filter_map(Expression::cast).nth(1)
    }
}

ast_node!(QuoteExpr, QUOTE_EXPR);

impl QuoteExpr {
    pub fn body(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

ast_node!(SpliceExpr, SPLICE_EXPR);

impl SpliceExpr {
    /// Explicit shift token in `~N{e}`; `None` for the `~{e}` form
    pub fn shift_token(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::NUMBER)
    }

    pub fn body(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

// ============================================================================
// Types
// ============================================================================

/// Any type annotation node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Int(SyntaxNode),
    Bool(SyntaxNode),
    Func(FuncType),
    Code(CodeType),
    Paren(ParenType),
}

impl AstNode for TypeExpr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::INT_TYPE
                | SyntaxKind::BOOL_TYPE
                | SyntaxKind::FUNC_TYPE
                | SyntaxKind::CODE_TYPE
                | SyntaxKind::PAREN_TYPE
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::INT_TYPE => Some(Self::Int(node)),
            SyntaxKind::BOOL_TYPE => Some(Self::Bool(node)),
            SyntaxKind::FUNC_TYPE => Some(Self::Func(FuncType(node))),
            SyntaxKind::CODE_TYPE => Some(Self::Code(CodeType(node))),
            SyntaxKind::PAREN_TYPE => Some(Self::Paren(ParenType(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Int(n) | Self::Bool(n) => n,
            Self::Func(n) => n.syntax(),
            Self::Code(n) => n.syntax(),
            Self::Paren(n) => n.syntax(),
        }
    }
}

ast_node!(FuncType, FUNC_TYPE);

impl FuncType {
    pub fn param(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }

    pub fn result(&self) -> Option<TypeExpr> {
        self.0.children().filter_map(TypeExpr::cast).nth(1)
    }
}

ast_node!(CodeType, CODE_TYPE);

impl CodeType {
    pub fn inner(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }
}

ast_node!(ParenType, PAREN_TYPE);

impl ParenType {
    pub fn inner(&self) -> Option<TypeExpr> {
        self.0.children().find_map(TypeExpr::cast)
    }
}
