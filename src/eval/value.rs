//! Runtime values and environments

use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::syntax::Expr;

/// Result of evaluation
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Closure(Rc<Closure>),
    /// Generated code
    Code(Rc<Expr>),
}

/// A function value
///
/// Recursive functions refer to themselves by `rec_name` instead of through
/// their environment, which keeps closures acyclic.
#[derive(Debug)]
pub struct Closure {
    pub param: SmolStr,
    pub body: Expr,
    pub env: Env,
    pub rec_name: Option<SmolStr>,
}

impl Value {
    /// Short kind name used in runtime errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Closure(_) => "function",
            Self::Code(_) => "code",
        }
    }
}

/// Closures compare by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Closure(a), Self::Closure(b)) => Rc::ptr_eq(a, b),
            (Self::Code(a), Self::Code(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "Int({})", n),
            Self::Bool(b) => write!(f, "Bool({})", b),
            Self::Closure(c) => write!(f, "Closure({})", c.param),
            Self::Code(e) => write!(f, "Code({})", e),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Closure(_) => f.write_str("<fun>"),
            Self::Code(e) => write!(f, "`{{ {} }}", e),
        }
    }
}

/// What a name is bound to
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Value(Value),
    /// A binder inside code under construction, renamed for hygiene
    CodeVar(SmolStr),
}

/// Persistent environment; extending it never disturbs existing sharers
#[derive(Clone, Default)]
pub struct Env(Option<Rc<EnvNode>>);

struct EnvNode {
    name: SmolStr,
    binding: Binding,
    next: Env,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, name: SmolStr, value: Value) -> Self {
        self.extend(name, Binding::Value(value))
    }

    pub fn bind_code_var(&self, name: SmolStr, renamed: SmolStr) -> Self {
        self.extend(name, Binding::CodeVar(renamed))
    }

    fn extend(&self, name: SmolStr, binding: Binding) -> Self {
        Self(Some(Rc::new(EnvNode {
            name,
            binding,
            next: self.clone(),
        })))
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        let mut current = self.0.as_deref();
        while let Some(node) = current {
            if node.name == name {
                return Some(&node.binding);
            }
            current = node.next.0.as_deref();
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    fn names(&self) -> Vec<&SmolStr> {
        let mut names = Vec::new();
        let mut current = self.0.as_deref();
        while let Some(node) = current {
            names.push(&node.name);
            current = node.next.0.as_deref();
        }
        names
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
