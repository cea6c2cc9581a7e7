//! Binding tests: the grammar accessor must produce a loadable language
//!
//! Mirrors the check every grammar binding ships with: call the accessor,
//! hand the result to the runtime constructor, and fail with a clear
//! message if nothing comes back.

use rayon::prelude::*;
use rstest::rstest;
use lamgamma::parser::{
    LANGUAGE_VERSION, LOAD_FAILURE_MESSAGE, Language, LanguageError, LanguageTables,
    OperatorEntry, RawLanguage, SyntaxKind, check_language, language,
};

static NAMES: [&str; SyntaxKind::count()] = ["symbol"; SyntaxKind::count()];

static FUTURE_VERSION: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION + 1,
    name: "lamgamma",
    symbol_names: &NAMES,
    keywords: &[],
    binary_operators: &[],
    application_precedence: 11,
    unary_precedence: 10,
};

static TRUNCATED_SYMBOLS: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION,
    name: "lamgamma",
    symbol_names: &["end"],
    keywords: &[],
    binary_operators: &[],
    application_precedence: 11,
    unary_precedence: 10,
};

static BAD_KEYWORD: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION,
    name: "lamgamma",
    symbol_names: &NAMES,
    keywords: &[("Let", SyntaxKind::LET_KW)],
    binary_operators: &[],
    application_precedence: 11,
    unary_precedence: 10,
};

static MISMATCHED_KEYWORD: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION,
    name: "lamgamma",
    symbol_names: &NAMES,
    keywords: &[("let", SyntaxKind::IN_KW)],
    binary_operators: &[],
    application_precedence: 11,
    unary_precedence: 10,
};

static BAD_OPERATOR: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION,
    name: "lamgamma",
    symbol_names: &NAMES,
    keywords: &[],
    binary_operators: &[OperatorEntry::left(SyntaxKind::IDENT, 3)],
    application_precedence: 11,
    unary_precedence: 10,
};

static ZERO_UNARY: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION,
    name: "lamgamma",
    symbol_names: &NAMES,
    keywords: &[],
    binary_operators: &[],
    application_precedence: 11,
    unary_precedence: 0,
};

static ZERO_APPLICATION: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION,
    name: "lamgamma",
    symbol_names: &NAMES,
    keywords: &[],
    binary_operators: &[],
    application_precedence: 0,
    unary_precedence: 10,
};

static UNARY_ABOVE_APPLICATION: LanguageTables = LanguageTables {
    version: LANGUAGE_VERSION,
    name: "lamgamma",
    symbol_names: &NAMES,
    keywords: &[],
    binary_operators: &[],
    application_precedence: 10,
    unary_precedence: 11,
};

fn null_language() -> RawLanguage {
    RawLanguage::null()
}

fn future_language() -> RawLanguage {
    RawLanguage::from_tables(&FUTURE_VERSION)
}

#[test]
fn test_can_load_grammar() {
    let lang = Language::new(language());
    assert!(lang.is_some(), "Error loading lamgamma grammar");
}

#[test]
fn test_check_language_accepts_builtin_grammar() {
    let lang = check_language(language).unwrap();
    assert_eq!(lang.name(), "lamgamma");
}

#[rstest]
#[case(null_language)]
#[case(future_language)]
fn test_check_language_reports_load_failure(#[case] accessor: fn() -> RawLanguage) {
    let err = check_language(accessor).unwrap_err();
    assert!(err.to_string().starts_with(LOAD_FAILURE_MESSAGE), "{}", err);
    assert!(Language::new(accessor()).is_none());
}

#[rstest]
#[case(&FUTURE_VERSION, LanguageError::UnsupportedVersion { found: LANGUAGE_VERSION + 1, min: 13, max: LANGUAGE_VERSION })]
#[case(&TRUNCATED_SYMBOLS, LanguageError::SymbolCountMismatch { expected: SyntaxKind::count(), found: 1 })]
#[case(&BAD_KEYWORD, LanguageError::InvalidKeyword("Let".to_string()))]
#[case(&MISMATCHED_KEYWORD, LanguageError::InvalidKeyword("let".to_string()))]
#[case(&BAD_OPERATOR, LanguageError::InvalidOperator(SyntaxKind::IDENT))]
#[case(&ZERO_UNARY, LanguageError::InvalidPrecedence { application: 11, unary: 0 })]
#[case(&ZERO_APPLICATION, LanguageError::InvalidPrecedence { application: 0, unary: 10 })]
#[case(&UNARY_ABOVE_APPLICATION, LanguageError::InvalidPrecedence { application: 10, unary: 11 })]
fn test_malformed_tables_are_rejected(
    #[case] tables: &'static LanguageTables,
    #[case] expected: LanguageError,
) {
    let raw = RawLanguage::from_tables(tables);
    assert_eq!(Language::load(raw).unwrap_err(), expected);
    assert!(Language::new(raw).is_none());
}

#[test]
fn test_null_descriptor() {
    assert!(!language().is_null());
    assert_eq!(Language::load(RawLanguage::null()).unwrap_err(), LanguageError::Null);
}

#[test]
fn test_repeated_loads_are_equivalent() {
    let first = Language::new(language()).unwrap();
    let second = Language::new(language()).unwrap();
    assert_eq!(first.name(), second.name());
    assert_eq!(first.version(), second.version());
    assert!(first.keywords().eq(second.keywords()));
}

#[test]
fn test_concurrent_binding_checks() {
    let names: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| check_language(language).map(|lang| lang.name()))
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(names.iter().all(|name| *name == "lamgamma"));
}
