//! Lossless parser for lamgamma
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! Parsing is driven by a [`Language`]: a validated handle over the static
//! grammar tables exposed by [`language()`]. A [`Parser`] without a language
//! refuses to parse.
//!
//! ## Architecture
//!
//! ```text
//! language() → RawLanguage
//!     ↓
//! Language::new / check_language → validated Language
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
pub mod grammar;
mod language;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use errors::{ErrorCode, SyntaxError};
pub use grammar::{
    Assoc, LANGUAGE_VERSION, LanguageTables, MIN_COMPATIBLE_LANGUAGE_VERSION, OperatorEntry,
    RawLanguage, language,
};
pub use language::{LOAD_FAILURE_MESSAGE, Language, LanguageError, LoadError, check_language};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{MAX_NESTING, Parse, Parser, parse};
pub use syntax_kind::{LamgammaLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
