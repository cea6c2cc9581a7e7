//! Foundation types for the lamgamma toolchain.
//!
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Position`], [`Span`] - Line/column ranges for diagnostics
//! - [`ensure_sufficient_stack`] - Stack growth for deep recursion
//!
//! This module has NO dependencies on other lamgamma modules.

mod line_index;
mod position;
mod stack;

pub use line_index::{LineCol, LineIndex};
pub use position::{Position, Span};
pub use stack::ensure_sufficient_stack;

pub use text_size::{TextRange, TextSize};
