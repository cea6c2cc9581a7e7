//! Types of lamgamma expressions

use std::fmt;

/// `int`, `bool`, `a -> b` or code `<T>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
    Func(Box<Type>, Box<Type>),
    Code(Box<Type>),
}

impl Type {
    pub fn func(param: Type, result: Type) -> Self {
        Self::Func(Box::new(param), Box::new(result))
    }

    pub fn code(inner: Type) -> Self {
        Self::Code(Box::new(inner))
    }

    pub fn is_func(&self) -> bool {
        matches!(self, Self::Func(..))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Bool => f.write_str("bool"),
            Self::Func(param, result) if param.is_func() => write!(f, "({}) -> {}", param, result),
            Self::Func(param, result) => write!(f, "{} -> {}", param, result),
            Self::Code(inner) => write!(f, "<{}>", inner),
        }
    }
}
