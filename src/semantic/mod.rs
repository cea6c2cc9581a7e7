//! # Semantic Analysis
//!
//! Static checking of lowered expressions: types plus stage levels.

mod checker;
mod error;

pub use checker::{TypeChecker, type_check};
pub use error::TypeError;
