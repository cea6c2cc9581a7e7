//! Type checking errors

use smol_str::SmolStr;
use text_size::TextRange;
use thiserror::Error;

use crate::syntax::Type;

/// Errors reported by the type checker. Each carries the offending range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: Type,
        actual: Type,
        range: TextRange,
    },

    #[error("expected a function, found {actual}")]
    ExpectedFunction { actual: Type, range: TextRange },

    #[error("expected code, found {actual}")]
    ExpectedCode { actual: Type, range: TextRange },

    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: SmolStr, range: TextRange },

    /// Lambda parameters and recursive bindings need annotations
    #[error("insufficient type annotation for `{name}`")]
    InsufficientTypeAnnotation { name: SmolStr, range: TextRange },

    /// A variable bound inside code is used at an earlier stage
    #[error("ill-staged variable `{name}`: bound at level {bound}, used at level {used}")]
    IllStagedVariable {
        name: SmolStr,
        bound: u32,
        used: u32,
        range: TextRange,
    },

    /// Code run by `~0{..}` at level `run` mentions a variable that only
    /// exists in code being built around it
    #[error("scope extrusion: `{name}` is bound at level {bound} but escapes into code run at level {run}")]
    ScopeExtrusion {
        name: SmolStr,
        bound: u32,
        run: u32,
        range: TextRange,
    },

    #[error("invalid splice: shift {shift} exceeds level {level}")]
    InvalidSplice {
        shift: u32,
        level: u32,
        range: TextRange,
    },
}

impl TypeError {
    pub fn range(&self) -> TextRange {
        match self {
            Self::TypeMismatch { range, .. }
            | Self::ExpectedFunction { range, .. }
            | Self::ExpectedCode { range, .. }
            | Self::UndefinedVariable { range, .. }
            | Self::InsufficientTypeAnnotation { range, .. }
            | Self::IllStagedVariable { range, .. }
            | Self::ScopeExtrusion { range, .. }
            | Self::InvalidSplice { range, .. } => *range,
        }
    }
}
