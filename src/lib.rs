//! # lamgamma
//!
//! Grammar, parser, type checker and staged evaluator for lamgamma, a
//! small multi-stage lambda calculus with quotation `` `{ e } `` and
//! splicing `~{ e }`.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! driver    → check / run entry points
//!   ↓
//! eval      → staged evaluator, CK machine
//! semantic  → type checker with stage levels
//!   ↓
//! syntax    → lowered Expr, Type, CST lowering
//!   ↓
//! parser    → grammar tables, Language loading, logos lexer, rowan parser
//!   ↓
//! base      → primitives (TextRange, LineIndex, Span)
//! ```
//!
//! ## Loading the grammar
//!
//! ```
//! use lamgamma::parser::{Language, language};
//!
//! let lang = Language::new(language()).expect("Error loading lamgamma grammar");
//! assert_eq!(lang.name(), "lamgamma");
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → semantic/eval → driver)
// ============================================================================

/// Foundation types: TextRange, LineIndex, Span
pub mod base;

/// Parser: grammar tables, Language handle, logos lexer, rowan parser
pub mod parser;

/// Syntax: lowered expressions and types
pub mod syntax;

/// Type checking with stage levels
pub mod semantic;

/// Staged evaluator and CK machine
pub mod eval;

mod driver;

pub use base::{LineCol, LineIndex, Position, Span, TextRange, TextSize};
pub use driver::{Error, check, compile, run};
pub use eval::{EvalError, EvalOptions, Value};
pub use parser::{Language, LanguageError, check_language, language};
pub use semantic::TypeError;
pub use syntax::{Expr, Type};
