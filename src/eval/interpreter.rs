//! Big-step staged evaluator
//!
//! At level 0 expressions are evaluated to values. Inside a quotation the
//! evaluator instead *builds* code: binders are renamed apart, free
//! variables with a value are embedded as [`ExprKind::Lifted`], and any
//! splice whose shift reaches back to level 0 is evaluated on the spot and
//! its code inserted.

use std::rc::Rc;

use smol_str::{SmolStr, format_smolstr};
use text_size::TextRange;

use super::error::EvalError;
use super::ops::{apply_binary, expect_bool, mismatch};
use super::options::EvalOptions;
use super::value::{Binding, Closure, Env, Value};
use crate::base::ensure_sufficient_stack;
use crate::syntax::{Expr, ExprKind, ShortCircuit};

/// Evaluate a closed expression
pub fn evaluate(expr: &Expr, options: &EvalOptions) -> Result<Value, EvalError> {
    Interpreter::new(*options).eval(expr, &Env::new())
}

/// Evaluator state: depth accounting and the fresh name supply
#[derive(Debug)]
pub struct Interpreter {
    options: EvalOptions,
    depth: usize,
    next_fresh: u32,
}

impl Interpreter {
    pub fn new(options: EvalOptions) -> Self {
        Self {
            options,
            depth: 0,
            next_fresh: 0,
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        if self.depth >= self.options.max_depth {
            return Err(EvalError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn fresh(&mut self, base: &str) -> SmolStr {
        self.next_fresh += 1;
        format_smolstr!("{}_{}", base, self.next_fresh)
    }

    /// Evaluate `expr` at level 0 in `env`
    pub fn eval(&mut self, expr: &Expr, env: &Env) -> Result<Value, EvalError> {
        self.enter()?;
        let result = ensure_sufficient_stack(|| self.eval_inner(expr, env));
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, expr: &Expr, env: &Env) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Lifted(value) => Ok(value.clone()),
            ExprKind::Var(name) => match env.lookup(name) {
                Some(Binding::Value(value)) => Ok(value.clone()),
                Some(Binding::CodeVar(_)) => Err(EvalError::IllStagedVariable {
                    name: name.clone(),
                    range: expr.range,
                }),
                None => Err(EvalError::UndefinedVariable {
                    name: name.clone(),
                    range: expr.range,
                }),
            },
            ExprKind::Lambda { param, body, .. } => Ok(Value::Closure(Rc::new(Closure {
                param: param.clone(),
                body: (**body).clone(),
                env: env.clone(),
                rec_name: None,
            }))),
            ExprKind::App { func, arg } => {
                let func_value = self.eval(func, env)?;
                let arg_value = self.eval(arg, env)?;
                self.apply(&func_value, arg_value, func.range)
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs, env)?;
                let rhs = self.eval(rhs, env)?;
                apply_binary(*op, &lhs, &rhs, expr.range)
            }
            ExprKind::ShortCircuit { op, lhs, rhs } => {
                let lhs_value = expect_bool(&self.eval(lhs, env)?, lhs.range)?;
                match (op, lhs_value) {
                    (ShortCircuit::And, false) => Ok(Value::Bool(false)),
                    (ShortCircuit::Or, true) => Ok(Value::Bool(true)),
                    _ => self.eval(rhs, env),
                }
            }
            ExprKind::Not(operand) => {
                let b = expect_bool(&self.eval(operand, env)?, operand.range)?;
                Ok(Value::Bool(!b))
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if expect_bool(&self.eval(cond, env)?, cond.range)? {
                    self.eval(then_branch, env)
                } else {
                    self.eval(else_branch, env)
                }
            }
            ExprKind::Let {
                name, value, body, ..
            } => {
                let value = self.eval(value, env)?;
                self.eval(body, &env.bind(name.clone(), value))
            }
            ExprKind::LetRec {
                name, value, body, ..
            } => {
                let closure = recursive_closure(name, value, env)?;
                self.eval(body, &env.bind(name.clone(), closure))
            }
            ExprKind::Quote(body) => {
                let code = self.build(body, env, 1)?;
                Ok(Value::Code(Rc::new(code)))
            }
            ExprKind::Splice { shift: 0, body } => {
                let code = self.eval_code(body, env)?;
                tracing::debug!(%code, "running generated code");
                self.eval(&code, &Env::new())
            }
            ExprKind::Splice { shift, .. } => Err(EvalError::InvalidSplice {
                shift: *shift,
                level: 0,
                range: expr.range,
            }),
        }
    }

    /// Evaluate `expr` and require a code value
    fn eval_code(&mut self, expr: &Expr, env: &Env) -> Result<Rc<Expr>, EvalError> {
        match self.eval(expr, env)? {
            Value::Code(code) => Ok(code),
            other => Err(mismatch("code", &other, expr.range)),
        }
    }

    fn apply(&mut self, func: &Value, arg: Value, range: TextRange) -> Result<Value, EvalError> {
        let Value::Closure(closure) = func else {
            return Err(mismatch("function", func, range));
        };
        let env = closure_env(closure, arg);
        self.eval(&closure.body, &env)
    }

    /// Build code for `expr` at `level` (at least 1)
    fn build(&mut self, expr: &Expr, env: &Env, level: u32) -> Result<Expr, EvalError> {
        self.enter()?;
        let result = ensure_sufficient_stack(|| self.build_inner(expr, env, level));
        self.depth -= 1;
        result
    }

    fn build_inner(&mut self, expr: &Expr, env: &Env, level: u32) -> Result<Expr, EvalError> {
        let range = expr.range;
        let kind = match &expr.kind {
            ExprKind::Int(_) | ExprKind::Bool(_) | ExprKind::Lifted(_) => expr.kind.clone(),
            ExprKind::Var(name) => match env.lookup(name) {
                Some(Binding::CodeVar(renamed)) => ExprKind::Var(renamed.clone()),
                Some(Binding::Value(value)) => ExprKind::Lifted(value.clone()),
                None => {
                    return Err(EvalError::UndefinedVariable {
                        name: name.clone(),
                        range,
                    });
                }
            },
            ExprKind::Lambda {
                param,
                param_ty,
                ret_ty,
                body,
            } => {
                let renamed = self.fresh(param);
                let inner = env.bind_code_var(param.clone(), renamed.clone());
                ExprKind::Lambda {
                    param: renamed,
                    param_ty: param_ty.clone(),
                    ret_ty: ret_ty.clone(),
                    body: Box::new(self.build(body, &inner, level)?),
                }
            }
            ExprKind::App { func, arg } => ExprKind::App {
                func: Box::new(self.build(func, env, level)?),
                arg: Box::new(self.build(arg, env, level)?),
            },
            ExprKind::Binary { op, lhs, rhs } => ExprKind::Binary {
                op: *op,
                lhs: Box::new(self.build(lhs, env, level)?),
                rhs: Box::new(self.build(rhs, env, level)?),
            },
            ExprKind::ShortCircuit { op, lhs, rhs } => ExprKind::ShortCircuit {
                op: *op,
                lhs: Box::new(self.build(lhs, env, level)?),
                rhs: Box::new(self.build(rhs, env, level)?),
            },
            ExprKind::Not(operand) => ExprKind::Not(Box::new(self.build(operand, env, level)?)),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => ExprKind::If {
                cond: Box::new(self.build(cond, env, level)?),
                then_branch: Box::new(self.build(then_branch, env, level)?),
                else_branch: Box::new(self.build(else_branch, env, level)?),
            },
            ExprKind::Let {
                name,
                ty,
                value,
                body,
            } => {
                let value = self.build(value, env, level)?;
                let renamed = self.fresh(name);
                let inner = env.bind_code_var(name.clone(), renamed.clone());
                ExprKind::Let {
                    name: renamed,
                    ty: ty.clone(),
                    value: Box::new(value),
                    body: Box::new(self.build(body, &inner, level)?),
                }
            }
            ExprKind::LetRec {
                name,
                ty,
                value,
                body,
            } => {
                let renamed = self.fresh(name);
                let inner = env.bind_code_var(name.clone(), renamed.clone());
                ExprKind::LetRec {
                    name: renamed,
                    ty: ty.clone(),
                    value: Box::new(self.build(value, &inner, level)?),
                    body: Box::new(self.build(body, &inner, level)?),
                }
            }
            ExprKind::Quote(body) => ExprKind::Quote(Box::new(self.build(body, env, level + 1)?)),
            ExprKind::Splice { shift, body } if *shift == level => {
                let code = self.eval_code(body, env)?;
                tracing::trace!(%code, level, "inserting spliced code");
                return Ok((*code).clone());
            }
            ExprKind::Splice { shift, body } if *shift < level => ExprKind::Splice {
                shift: *shift,
                body: Box::new(self.build(body, env, level - shift)?),
            },
            ExprKind::Splice { shift, .. } => {
                return Err(EvalError::InvalidSplice {
                    shift: *shift,
                    level,
                    range,
                });
            }
        };
        Ok(Expr::new(kind, range))
    }
}

/// Closure for `let rec name = value`; `value` must be a lambda
pub(crate) fn recursive_closure(name: &SmolStr, value: &Expr, env: &Env) -> Result<Value, EvalError> {
    match &value.kind {
        ExprKind::Lambda { param, body, .. } => Ok(Value::Closure(Rc::new(Closure {
            param: param.clone(),
            body: (**body).clone(),
            env: env.clone(),
            rec_name: Some(name.clone()),
        }))),
        _ => Err(EvalError::TypeMismatch {
            expected: "function",
            found: "expression".to_string(),
            range: value.range,
        }),
    }
}

/// Environment for running a closure body on `arg`
pub(crate) fn closure_env(closure: &Rc<Closure>, arg: Value) -> Env {
    let env = match &closure.rec_name {
        Some(name) => closure
            .env
            .bind(name.clone(), Value::Closure(Rc::clone(closure))),
        None => closure.env.clone(),
    };
    env.bind(closure.param.clone(), arg)
}
