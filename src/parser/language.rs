//! Loadable language handle
//!
//! [`Language::new`] is the runtime-side constructor for a [`RawLanguage`]
//! produced by a grammar accessor. It checks the descriptor once, builds the
//! lookup maps the parser needs, and hands back a cheap-to-clone handle.
//! Anything malformed is refused: `new` returns `None`, [`Language::load`]
//! says why.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::grammar::{
    LANGUAGE_VERSION, LanguageTables, MIN_COMPATIBLE_LANGUAGE_VERSION, OperatorEntry, RawLanguage,
};
use super::lexer::Lexer;
use super::syntax_kind::SyntaxKind;

/// Why a raw language descriptor could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("language descriptor is null")]
    Null,

    #[error("table version {found} is outside the supported range {min}..={max}")]
    UnsupportedVersion { found: u32, min: u32, max: u32 },

    #[error("language has no name")]
    EmptyName,

    #[error("expected {expected} symbol names, found {found}")]
    SymbolCountMismatch { expected: usize, found: usize },

    #[error("invalid keyword `{0}`")]
    InvalidKeyword(String),

    #[error("invalid binary operator {0:?}")]
    InvalidOperator(SyntaxKind),

    /// Both levels must be non-zero and application must bind tighter than `!`
    #[error("invalid precedence: application {application}, unary {unary}")]
    InvalidPrecedence { application: u8, unary: u8 },
}

/// A validated, loaded grammar
#[derive(Debug, Clone)]
pub struct Language {
    inner: Arc<LanguageData>,
}

#[derive(Debug)]
struct LanguageData {
    tables: &'static LanguageTables,
    keywords: IndexMap<&'static str, SyntaxKind>,
    operators: FxHashMap<SyntaxKind, OperatorEntry>,
}

impl Language {
    /// Wrap a raw descriptor, or `None` if it cannot be used
    pub fn new(raw: RawLanguage) -> Option<Self> {
        Self::load(raw).ok()
    }

    /// Wrap a raw descriptor, reporting what is wrong with it
    pub fn load(raw: RawLanguage) -> Result<Self, LanguageError> {
        let result = raw.tables().ok_or(LanguageError::Null).and_then(Self::from_tables);
        match &result {
            Ok(language) => tracing::debug!(
                name = language.name(),
                version = language.version(),
                "loaded language"
            ),
            Err(err) => tracing::warn!(%err, "rejected language descriptor"),
        }
        result
    }

    fn from_tables(tables: &'static LanguageTables) -> Result<Self, LanguageError> {
        if !(MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&tables.version) {
            return Err(LanguageError::UnsupportedVersion {
                found: tables.version,
                min: MIN_COMPATIBLE_LANGUAGE_VERSION,
                max: LANGUAGE_VERSION,
            });
        }

        if tables.name.is_empty() {
            return Err(LanguageError::EmptyName);
        }

        if tables.symbol_names.len() != SyntaxKind::count() {
            return Err(LanguageError::SymbolCountMismatch {
                expected: SyntaxKind::count(),
                found: tables.symbol_names.len(),
            });
        }

        let mut keywords = IndexMap::with_capacity(tables.keywords.len());
        for &(text, kind) in tables.keywords {
            if !is_keyword_shaped(text) || !kind.is_keyword() || !lexes_to(text, kind) {
                return Err(LanguageError::InvalidKeyword(text.to_string()));
            }
            if keywords.insert(text, kind).is_some() {
                return Err(LanguageError::InvalidKeyword(text.to_string()));
            }
        }

        let (application, unary) = (tables.application_precedence, tables.unary_precedence);
        if unary == 0 || application <= unary {
            return Err(LanguageError::InvalidPrecedence { application, unary });
        }

        let mut operators = FxHashMap::default();
        for entry in tables.binary_operators {
            let is_operator_token = entry.token.is_punct() || entry.token == SyntaxKind::MOD_KW;
            if !is_operator_token || entry.precedence == 0 {
                return Err(LanguageError::InvalidOperator(entry.token));
            }
            if operators.insert(entry.token, *entry).is_some() {
                return Err(LanguageError::InvalidOperator(entry.token));
            }
        }

        Ok(Self {
            inner: Arc::new(LanguageData {
                tables,
                keywords,
                operators,
            }),
        })
    }

    /// Grammar name
    pub fn name(&self) -> &'static str {
        self.inner.tables.name
    }

    /// Table layout version
    pub fn version(&self) -> u32 {
        self.inner.tables.version
    }

    /// Number of symbols (token and node kinds)
    pub fn symbol_count(&self) -> usize {
        self.inner.tables.symbol_names.len()
    }

    /// Display name of a kind, e.g. `"("` or `"lambda"`
    pub fn symbol_name(&self, kind: SyntaxKind) -> &'static str {
        self.inner.tables.symbol_names[kind as usize]
    }

    /// Look up a reserved word
    pub fn keyword(&self, text: &str) -> Option<SyntaxKind> {
        self.inner.keywords.get(text).copied()
    }

    /// Reserved words in declaration order
    pub fn keywords(&self) -> impl Iterator<Item = (&'static str, SyntaxKind)> + '_ {
        self.inner.keywords.iter().map(|(text, kind)| (*text, *kind))
    }

    /// Infix operator entry for a token kind
    pub fn binary_operator(&self, kind: SyntaxKind) -> Option<&OperatorEntry> {
        self.inner.operators.get(&kind)
    }

    pub fn application_precedence(&self) -> u8 {
        self.inner.tables.application_precedence
    }

    pub fn unary_precedence(&self) -> u8 {
        self.inner.tables.unary_precedence
    }
}

fn is_keyword_shaped(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            unicode_ident::is_xid_start(first) && chars.all(unicode_ident::is_xid_continue)
        }
        None => false,
    }
}

/// The table must agree with the lexer: the keyword text is one token of `kind`
fn lexes_to(text: &str, kind: SyntaxKind) -> bool {
    let mut tokens = Lexer::new(text);
    matches!((tokens.next(), tokens.next()), (Some(token), None) if token.kind == kind)
}

/// Message prefix used when a grammar cannot be loaded
pub const LOAD_FAILURE_MESSAGE: &str = "Error loading lamgamma grammar";

/// Failure of the binding check, see [`check_language`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", LOAD_FAILURE_MESSAGE, .0)]
pub struct LoadError(#[from] pub LanguageError);

/// Binding check: call the accessor once and load what it returns
///
/// There is exactly one construction attempt; nothing is retried.
pub fn check_language(accessor: fn() -> RawLanguage) -> Result<Language, LoadError> {
    Ok(Language::load(accessor())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::grammar::{Assoc, language};

    static NO_NAME: LanguageTables = LanguageTables {
        version: LANGUAGE_VERSION,
        name: "",
        symbol_names: &[],
        keywords: &[],
        binary_operators: &[],
        application_precedence: 11,
        unary_precedence: 10,
    };

    #[test]
    fn test_load_builtin() {
        let language = Language::load(language()).unwrap();
        assert_eq!(language.name(), "lamgamma");
        assert_eq!(language.version(), LANGUAGE_VERSION);
        assert_eq!(language.symbol_count(), SyntaxKind::count());
        assert_eq!(language.keyword("rec"), Some(SyntaxKind::REC_KW));
        assert_eq!(language.keyword("fn"), None);
        assert_eq!(language.symbol_name(SyntaxKind::FAT_ARROW), "=>");
    }

    #[test]
    fn test_operator_lookup() {
        let language = Language::new(language()).unwrap();
        let plus = language.binary_operator(SyntaxKind::PLUS).unwrap();
        let star = language.binary_operator(SyntaxKind::STAR).unwrap();
        assert!(star.precedence > plus.precedence);
        assert_eq!(plus.assoc, Assoc::Left);
        assert!(language.binary_operator(SyntaxKind::BANG).is_none());
        assert!(language.application_precedence() > language.unary_precedence());
    }

    #[test]
    fn test_keywords_keep_declaration_order() {
        let language = Language::new(language()).unwrap();
        let first: Vec<_> = language.keywords().take(3).map(|(text, _)| text).collect();
        assert_eq!(first, vec!["let", "rec", "in"]);
    }

    #[test]
    fn test_null_is_rejected() {
        assert!(Language::new(RawLanguage::null()).is_none());
        assert_eq!(Language::load(RawLanguage::null()).unwrap_err(), LanguageError::Null);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = Language::load(RawLanguage::from_tables(&NO_NAME)).unwrap_err();
        assert_eq!(err, LanguageError::EmptyName);
    }

    #[test]
    fn test_check_language_message() {
        let err = check_language(RawLanguage::null).unwrap_err();
        assert_eq!(err.to_string(), "Error loading lamgamma grammar: language descriptor is null");
    }

    #[test]
    fn test_keyword_shape() {
        assert!(is_keyword_shaped("let"));
        assert!(!is_keyword_shaped(""));
        assert!(!is_keyword_shaped("9lives"));
        assert!(!is_keyword_shaped("=>"));
    }
}
