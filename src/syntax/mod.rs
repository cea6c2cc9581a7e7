//! Lowered syntax: expression tree, types and CST lowering

mod display;
mod expr;
mod lower;
mod ty;

pub use expr::{BinaryOp, Expr, ExprKind, ShortCircuit};
pub use lower::lower;
pub use ty::Type;

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
