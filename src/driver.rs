//! End-to-end entry points: source text in, type or value out

use text_size::TextRange;
use thiserror::Error;

use crate::base::LineIndex;
use crate::eval::{self, EvalError, EvalOptions, Value};
use crate::parser::{self, LanguageError, SyntaxError};
use crate::semantic::{self, TypeError};
use crate::syntax::{self, Expr, Type};

/// Any failure between loading the grammar and producing a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Language(#[from] LanguageError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::Language(_) => None,
            Self::Syntax(err) => Some(err.range),
            Self::Type(err) => Some(err.range()),
            Self::Eval(err) => err.range(),
        }
    }

    /// `line:col: message`, 1-based, when the error has a location.
    /// Syntax errors add their hint and related locations on indented lines.
    pub fn render(&self, source: &str) -> String {
        let index = LineIndex::new(source);
        match self {
            Self::Syntax(err) => err.render(&index),
            _ => match self.range() {
                Some(range) => format!("{}: {}", index.span(range), self),
                None => self.to_string(),
            },
        }
    }
}

/// Parse and lower `source`
pub fn compile(source: &str) -> Result<Expr, Error> {
    let parse = parser::parse(source)?;
    let expr = syntax::lower(&parse)?;
    tracing::debug!(len = source.len(), "lowered source");
    Ok(expr)
}

/// Parse, lower and type check `source`
pub fn check(source: &str) -> Result<Type, Error> {
    let expr = compile(source)?;
    Ok(semantic::type_check(&expr)?)
}

/// Check `source`, then evaluate it
pub fn run(source: &str, options: &EvalOptions) -> Result<Value, Error> {
    let expr = compile(source)?;
    let ty = semantic::type_check(&expr)?;
    tracing::debug!(%ty, "evaluating");
    Ok(eval::evaluate(&expr, options)?)
}
