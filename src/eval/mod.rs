//! Evaluation: a big-step staged evaluator and a small-step CK machine
//!
//! Both share [`Value`], [`Env`] and the primitive operations, so they agree
//! on every program the CK machine accepts.

mod error;
mod interpreter;
mod machine;
mod ops;
mod options;
mod value;

pub use error::EvalError;
pub use interpreter::{Interpreter, evaluate};
pub use machine::{Continuation, Frame, Machine, State};
pub use options::EvalOptions;
pub use value::{Binding, Closure, Env, Value};
