//! Lowered expression tree
//!
//! Unlike the CST this tree has no trivia or error nodes, lambdas take
//! exactly one parameter, and every node keeps the range of the source
//! text it came from.

use smol_str::SmolStr;
use text_size::TextRange;

use super::ty::Type;
use crate::eval::Value;

/// An expression with its source range
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Bool(bool),
    Var(SmolStr),
    Lambda {
        param: SmolStr,
        param_ty: Option<Type>,
        ret_ty: Option<Type>,
        body: Box<Expr>,
    },
    App {
        func: Box<Expr>,
        arg: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    ShortCircuit {
        op: ShortCircuit,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Not(Box<Expr>),
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Let {
        name: SmolStr,
        ty: Option<Type>,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    /// `value` is always a `Lambda`
    LetRec {
        name: SmolStr,
        ty: Option<Type>,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    Quote(Box<Expr>),
    Splice {
        shift: u32,
        body: Box<Expr>,
    },
    /// A value embedded into generated code (cross-stage persistence)
    Lifted(Value),
}

/// Strict binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// `&&` and `||`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortCircuit {
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "mod",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod)
    }

    pub fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }
}

impl ShortCircuit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Whether the expression contains a quote or splice
    pub fn is_staged(&self) -> bool {
        match &self.kind {
            ExprKind::Quote(_) | ExprKind::Splice { .. } => true,
            ExprKind::Int(_) | ExprKind::Bool(_) | ExprKind::Var(_) | ExprKind::Lifted(_) => false,
            ExprKind::Lambda { body, .. } => body.is_staged(),
            ExprKind::Not(e) => e.is_staged(),
            ExprKind::App { func: a, arg: b }
            | ExprKind::Binary { lhs: a, rhs: b, .. }
            | ExprKind::ShortCircuit { lhs: a, rhs: b, .. }
            | ExprKind::Let { value: a, body: b, .. }
            | ExprKind::LetRec { value: a, body: b, .. } => a.is_staged() || b.is_staged(),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => cond.is_staged() || then_branch.is_staged() || else_branch.is_staged(),
        }
    }
}
