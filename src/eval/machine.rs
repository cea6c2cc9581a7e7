//! CK machine for the unstaged fragment
//!
//! A small-step machine with an explicit control (the expression being
//! evaluated, or the value being returned) and continuation (a stack of
//! frames). Each call to [`Machine::step`] performs exactly one transition,
//! which makes intermediate states observable.

use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;
use text_size::TextRange;

use super::error::EvalError;
use super::interpreter::{closure_env, recursive_closure};
use super::ops::{apply_binary, expect_bool, mismatch};
use super::options::EvalOptions;
use super::value::{Binding, Closure, Env, Value};
use crate::syntax::{BinaryOp, Expr, ExprKind, ShortCircuit};

/// Pending work, innermost frame last
pub type Continuation = Vec<Frame>;

/// A continuation frame
#[derive(Debug, Clone)]
pub enum Frame {
    /// Evaluating the function; the argument comes next
    AppLeft { arg: Expr, env: Env },
    /// Evaluating the argument
    AppRight { func: Value, range: TextRange },
    BinaryLeft {
        op: BinaryOp,
        rhs: Expr,
        env: Env,
        range: TextRange,
    },
    BinaryRight {
        op: BinaryOp,
        lhs: Value,
        range: TextRange,
    },
    ShortCircuit {
        op: ShortCircuit,
        rhs: Expr,
        env: Env,
        range: TextRange,
    },
    Not { range: TextRange },
    If {
        then_branch: Expr,
        else_branch: Expr,
        env: Env,
        range: TextRange,
    },
    Let { name: SmolStr, body: Expr, env: Env },
}

/// Machine state
#[derive(Debug, Clone)]
pub enum State {
    Eval {
        expr: Expr,
        env: Env,
        cont: Continuation,
    },
    Apply {
        value: Value,
        cont: Continuation,
    },
    Done(Value),
}

impl State {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Number of pending frames
    pub fn depth(&self) -> usize {
        match self {
            Self::Eval { cont, .. } | Self::Apply { cont, .. } => cont.len(),
            Self::Done(_) => 0,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eval { expr, cont, .. } => write!(f, "eval {} [{}]", expr, cont.len()),
            Self::Apply { value, cont } => write!(f, "apply {} [{}]", value, cont.len()),
            Self::Done(value) => write!(f, "done {}", value),
        }
    }
}

/// Transition functions of the CK machine
pub struct Machine;

impl Machine {
    /// Initial state: evaluate `expr` with an empty environment and continuation
    #[allow(clippy::new_ret_no_self)]
    pub fn new(expr: &Expr) -> State {
        State::Eval {
            expr: expr.clone(),
            env: Env::new(),
            cont: Vec::new(),
        }
    }

    /// Perform one transition
    pub fn step(state: State) -> Result<State, EvalError> {
        match state {
            State::Eval { expr, env, cont } => Self::step_eval(expr, env, cont),
            State::Apply { value, cont } => Self::step_apply(value, cont),
            State::Done(_) => Err(EvalError::Halted),
        }
    }

    /// Step until `Done`, within the step budget
    pub fn run(state: State, options: &EvalOptions) -> Result<Value, EvalError> {
        let mut state = state;
        let mut steps = 0usize;
        loop {
            if let State::Done(value) = state {
                tracing::debug!(steps, "machine halted");
                return Ok(value);
            }
            if steps >= options.max_steps {
                return Err(EvalError::StepLimitExceeded {
                    limit: options.max_steps,
                });
            }
            state = Self::step(state)?;
            steps += 1;
            tracing::trace!(step = steps, depth = state.depth(), "machine step");
        }
    }

    fn step_eval(expr: Expr, env: Env, mut cont: Continuation) -> Result<State, EvalError> {
        let range = expr.range;
        let value = match expr.kind {
            ExprKind::Int(n) => Value::Int(n),
            ExprKind::Bool(b) => Value::Bool(b),
            ExprKind::Lifted(value) => value,
            ExprKind::Var(name) => match env.lookup(&name) {
                Some(Binding::Value(value)) => value.clone(),
                Some(Binding::CodeVar(_)) => {
                    return Err(EvalError::IllStagedVariable { name, range });
                }
                None => return Err(EvalError::UndefinedVariable { name, range }),
            },
            ExprKind::Lambda { param, body, .. } => Value::Closure(Rc::new(Closure {
                param,
                body: *body,
                env,
                rec_name: None,
            })),
            ExprKind::App { func, arg } => {
                cont.push(Frame::AppLeft {
                    arg: *arg,
                    env: env.clone(),
                });
                return Ok(State::Eval {
                    expr: *func,
                    env,
                    cont,
                });
            }
            ExprKind::Binary { op, lhs, rhs } => {
                cont.push(Frame::BinaryLeft {
                    op,
                    rhs: *rhs,
                    env: env.clone(),
                    range,
                });
                return Ok(State::Eval {
                    expr: *lhs,
                    env,
                    cont,
                });
            }
            ExprKind::ShortCircuit { op, lhs, rhs } => {
                cont.push(Frame::ShortCircuit {
                    op,
                    rhs: *rhs,
                    env: env.clone(),
                    range: lhs.range,
                });
                return Ok(State::Eval {
                    expr: *lhs,
                    env,
                    cont,
                });
            }
            ExprKind::Not(operand) => {
                cont.push(Frame::Not {
                    range: operand.range,
                });
                return Ok(State::Eval {
                    expr: *operand,
                    env,
                    cont,
                });
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                cont.push(Frame::If {
                    then_branch: *then_branch,
                    else_branch: *else_branch,
                    env: env.clone(),
                    range: cond.range,
                });
                return Ok(State::Eval {
                    expr: *cond,
                    env,
                    cont,
                });
            }
            ExprKind::Let {
                name, value, body, ..
            } => {
                cont.push(Frame::Let {
                    name,
                    body: *body,
                    env: env.clone(),
                });
                return Ok(State::Eval {
                    expr: *value,
                    env,
                    cont,
                });
            }
            ExprKind::LetRec {
                name, value, body, ..
            } => {
                let closure = recursive_closure(&name, &value, &env)?;
                return Ok(State::Eval {
                    expr: *body,
                    env: env.bind(name, closure),
                    cont,
                });
            }
            ExprKind::Quote(_) | ExprKind::Splice { .. } => {
                return Err(EvalError::StagingUnsupported { range });
            }
        };
        Ok(State::Apply { value, cont })
    }

    fn step_apply(value: Value, mut cont: Continuation) -> Result<State, EvalError> {
        let Some(frame) = cont.pop() else {
            return Ok(State::Done(value));
        };
        let next = match frame {
            Frame::AppLeft { arg, env } => {
                cont.push(Frame::AppRight {
                    func: value,
                    range: arg.range,
                });
                State::Eval {
                    expr: arg,
                    env,
                    cont,
                }
            }
            Frame::AppRight { func, range } => {
                let Value::Closure(closure) = &func else {
                    return Err(mismatch("function", &func, range));
                };
                State::Eval {
                    expr: closure.body.clone(),
                    env: closure_env(closure, value),
                    cont,
                }
            }
            Frame::BinaryLeft {
                op,
                rhs,
                env,
                range,
            } => {
                cont.push(Frame::BinaryRight {
                    op,
                    lhs: value,
                    range,
                });
                State::Eval {
                    expr: rhs,
                    env,
                    cont,
                }
            }
            Frame::BinaryRight { op, lhs, range } => State::Apply {
                value: apply_binary(op, &lhs, &value, range)?,
                cont,
            },
            Frame::ShortCircuit {
                op,
                rhs,
                env,
                range,
            } => match (op, expect_bool(&value, range)?) {
                (ShortCircuit::And, false) | (ShortCircuit::Or, true) => State::Apply { value, cont },
                _ => State::Eval {
                    expr: rhs,
                    env,
                    cont,
                },
            },
            Frame::Not { range } => State::Apply {
                value: Value::Bool(!expect_bool(&value, range)?),
                cont,
            },
            Frame::If {
                then_branch,
                else_branch,
                env,
                range,
            } => State::Eval {
                expr: if expect_bool(&value, range)? {
                    then_branch
                } else {
                    else_branch
                },
                env,
                cont,
            },
            Frame::Let { name, body, env } => State::Eval {
                expr: body,
                env: env.bind(name, value),
                cont,
            },
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::syntax::lower;

    fn expr(input: &str) -> Expr {
        lower(&parse(input).unwrap()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = Machine::new(&expr("1"));
        assert!(matches!(state, State::Eval { ref cont, ref env, .. } if cont.is_empty() && env.is_empty()));
    }

    #[test]
    fn test_single_steps() {
        let state = Machine::new(&expr("1 + 2"));
        let state = Machine::step(state).unwrap();
        assert!(matches!(state, State::Eval { ref cont, .. } if cont.len() == 1));
        let state = Machine::step(state).unwrap();
        assert!(matches!(state, State::Apply { value: Value::Int(1), .. }));
    }

    #[test]
    fn test_run_to_completion() {
        let src = "let rec fib = (n: int): int => { if n <= 1 then 1 else fib (n - 1) + fib (n - 2) } in fib 10";
        let value = Machine::run(Machine::new(&expr(src)), &EvalOptions::default()).unwrap();
        assert_eq!(value, Value::Int(89));
    }

    #[test]
    fn test_stepping_done_state_is_an_error() {
        assert!(matches!(Machine::step(State::Done(Value::Int(0))), Err(EvalError::Halted)));
    }

    #[test]
    fn test_staging_is_unsupported() {
        let result = Machine::run(Machine::new(&expr("`{ 1 }")), &EvalOptions::default());
        assert!(matches!(result, Err(EvalError::StagingUnsupported { .. })));
    }

    #[test]
    fn test_step_limit() {
        let src = "let rec loop = (n: int): int => { loop n } in loop 0";
        let options = EvalOptions::default().with_max_steps(500);
        let result = Machine::run(Machine::new(&expr(src)), &options);
        assert_eq!(result, Err(EvalError::StepLimitExceeded { limit: 500 }));
    }
}
