//! Compiled grammar tables for lamgamma
//!
//! This is the grammar artifact the parsing runtime loads. It is exposed the
//! way generated grammar bindings usually are: a parameterless accessor,
//! [`language`], that hands out an opaque [`RawLanguage`]. The runtime side
//! ([`Language::new`](super::Language::new)) validates the descriptor before
//! anything is parsed with it.
//!
//! Precedences (higher binds tighter):
//!
//! ```text
//! application 11
//! !           10
//! * / mod      9
//! + -          8
//! == != < <= > >=  7
//! &&           5
//! ||           4
//! ```

use super::syntax_kind::SyntaxKind;

/// ABI version of the tables produced by this crate
pub const LANGUAGE_VERSION: u32 = 14;

/// Oldest table layout the runtime still accepts
pub const MIN_COMPATIBLE_LANGUAGE_VERSION: u32 = 13;

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
}

/// One row of the binary operator table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorEntry {
    /// Operator token
    pub token: SyntaxKind,
    /// Binding strength; zero is reserved for "not an operator"
    pub precedence: u8,
    pub assoc: Assoc,
}

impl OperatorEntry {
    pub const fn left(token: SyntaxKind, precedence: u8) -> Self {
        Self {
            token,
            precedence,
            assoc: Assoc::Left,
        }
    }
}

/// Static grammar description consumed by the parsing runtime
///
/// Fields are public so that alternative (or deliberately broken) tables
/// can be declared as statics, e.g. in tests of the loader.
#[derive(Debug)]
pub struct LanguageTables {
    /// Table layout version, see [`LANGUAGE_VERSION`]
    pub version: u32,
    /// Grammar name
    pub name: &'static str,
    /// Display name for every [`SyntaxKind`], indexed by kind number
    pub symbol_names: &'static [&'static str],
    /// Reserved words and the kind each one lexes to
    pub keywords: &'static [(&'static str, SyntaxKind)],
    /// Infix operators
    pub binary_operators: &'static [OperatorEntry],
    /// Precedence of juxtaposition (`f x`)
    pub application_precedence: u8,
    /// Precedence of the prefix `!` operand
    pub unary_precedence: u8,
}

/// Opaque handle to grammar tables, as returned by a grammar accessor
///
/// A raw language may be null; the runtime constructor rejects it.
#[derive(Debug, Clone, Copy)]
pub struct RawLanguage(Option<&'static LanguageTables>);

impl RawLanguage {
    /// Wrap a set of static tables
    pub const fn from_tables(tables: &'static LanguageTables) -> Self {
        Self(Some(tables))
    }

    /// A descriptor that points at nothing
    pub const fn null() -> Self {
        Self(None)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub(crate) fn tables(self) -> Option<&'static LanguageTables> {
        self.0
    }
}

/// Grammar accessor: the raw lamgamma language descriptor
pub fn language() -> RawLanguage {
    RawLanguage::from_tables(&LAMGAMMA)
}

static LAMGAMMA: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION,
    name: "lamgamma",
    symbol_names: &SYMBOL_NAMES,
    keywords: KEYWORDS,
    binary_operators: BINARY_OPERATORS,
    application_precedence: 11,
    unary_precedence: 10,
};

static SYMBOL_NAMES: [&str; SyntaxKind::count()] = [
    // trivia
    "whitespace",
    "comment",
    // literals
    "identifier",
    "number",
    // punctuation
    "(",
    ")",
    "{",
    "}",
    "`{",
    "~{",
    "~",
    ":",
    ",",
    "=>",
    "->",
    "=",
    "+",
    "-",
    "*",
    "/",
    "==",
    "!=",
    "<",
    "<=",
    ">",
    ">=",
    "&&",
    "||",
    "!",
    // keywords
    "let",
    "rec",
    "in",
    "if",
    "then",
    "else",
    "true",
    "false",
    "mod",
    "int",
    "bool",
    // nodes
    "source_file",
    "parenthesized_expression",
    "variable",
    "literal",
    "lambda",
    "params",
    "param",
    "return_type",
    "application",
    "binary_expression",
    "not",
    "ctrl_if",
    "let_binding",
    "quote",
    "splice",
    "int_type",
    "bool_type",
    "func_type",
    "code_type",
    "parenthesized_type",
    // special
    "ERROR",
    "end",
];

static KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("let", SyntaxKind::LET_KW),
    ("rec", SyntaxKind::REC_KW),
    ("in", SyntaxKind::IN_KW),
    ("if", SyntaxKind::IF_KW),
    ("then", SyntaxKind::THEN_KW),
    ("else", SyntaxKind::ELSE_KW),
    ("true", SyntaxKind::TRUE_KW),
    ("false", SyntaxKind::FALSE_KW),
    ("mod", SyntaxKind::MOD_KW),
    ("int", SyntaxKind::INT_KW),
    ("bool", SyntaxKind::BOOL_KW),
];

static BINARY_OPERATORS: &[OperatorEntry] = &[
    OperatorEntry::left(SyntaxKind::STAR, 9),
    OperatorEntry::left(SyntaxKind::SLASH, 9),
    OperatorEntry::left(SyntaxKind::MOD_KW, 9),
    OperatorEntry::left(SyntaxKind::PLUS, 8),
    OperatorEntry::left(SyntaxKind::MINUS, 8),
    OperatorEntry::left(SyntaxKind::EQ_EQ, 7),
    OperatorEntry::left(SyntaxKind::BANG_EQ, 7),
    OperatorEntry::left(SyntaxKind::LT, 7),
    OperatorEntry::left(SyntaxKind::LT_EQ, 7),
    OperatorEntry::left(SyntaxKind::GT, 7),
    OperatorEntry::left(SyntaxKind::GT_EQ, 7),
    OperatorEntry::left(SyntaxKind::AMP_AMP, 5),
    OperatorEntry::left(SyntaxKind::PIPE_PIPE, 4),
];
