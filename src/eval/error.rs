//! Runtime errors

use smol_str::SmolStr;
use text_size::TextRange;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    ZeroDivision { range: TextRange },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
        range: TextRange,
    },

    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: SmolStr, range: TextRange },

    /// A variable bound inside code was referenced outside of it
    #[error("ill-staged variable `{name}`")]
    IllStagedVariable { name: SmolStr, range: TextRange },

    #[error("invalid splice: shift {shift} exceeds level {level}")]
    InvalidSplice {
        shift: u32,
        level: u32,
        range: TextRange,
    },

    #[error("evaluation depth limit of {limit} exceeded")]
    DepthLimitExceeded { limit: usize },

    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize },

    #[error("quotation and splicing are not supported by the CK machine")]
    StagingUnsupported { range: TextRange },

    #[error("machine has already halted")]
    Halted,
}

impl EvalError {
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::ZeroDivision { range }
            | Self::TypeMismatch { range, .. }
            | Self::UndefinedVariable { range, .. }
            | Self::IllStagedVariable { range, .. }
            | Self::InvalidSplice { range, .. }
            | Self::StagingUnsupported { range } => Some(*range),
            Self::DepthLimitExceeded { .. } | Self::StepLimitExceeded { .. } | Self::Halted => None,
        }
    }
}
