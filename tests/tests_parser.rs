//! Parser Tests
//!
//! Lossless round-trips, tree shapes and error reporting through the public
//! parser API.

use rstest::rstest;
use lamgamma::TextSize;
use lamgamma::parser::{
    AstNode, ErrorCode, Expression, Language, MAX_NESTING, Parser, SourceFile, SyntaxKind, language,
    parse,
};

fn parses_successfully(input: &str) -> bool {
    let parsed = parse(input).unwrap();
    parsed.ok() && SourceFile::cast(parsed.syntax()).is_some()
}

fn top_kind(input: &str) -> SyntaxKind {
    let parsed = parse(input).unwrap();
    let file = SourceFile::cast(parsed.syntax()).unwrap();
    file.expr().unwrap().syntax().kind()
}

// ============================================================================
// Round trips
// ============================================================================

#[rstest]
#[case("1")]
#[case("  x  ")]
#[case("let x = `{ 1 + 2 } in\n`{ 2 * ~{ x } }")]
#[case("let x = `{ 1 + 2 } in\n~0{ x }")]
#[case("// leading comment\nlet rec f: int -> int = (n: int) => { f n } in f 1")]
#[case("if a <= b && !c then (x: int, y: bool): int => { x } else g")]
#[case("`{\n  let y = 1 in\n  ~{ y }\n}")]
#[case("((((")]
#[case("let = in")]
#[case("1 + $ 2")]
fn test_cst_is_lossless(#[case] input: &str) {
    let parsed = parse(input).unwrap();
    assert_eq!(parsed.syntax().text().to_string(), input);
}

// ============================================================================
// Accepted programs
// ============================================================================

#[rstest]
#[case("f x y")]
#[case("f (x + 1) (g y)")]
#[case("(x: int) => { x }")]
#[case("(x): <int> => { `{ x } }")]
#[case("(f: (int -> int) -> int) => { f }")]
#[case("let rec loop = (n: int): int => { loop n } in loop 0")]
#[case("~3{ x }")]
#[case("a mod b == 0 || a != b")]
#[case("!!true")]
fn test_accepted_programs(#[case] input: &str) {
    assert!(parses_successfully(input), "Failed to parse: {}", input);
}

// ============================================================================
// Shapes
// ============================================================================

#[rstest]
#[case("f x + 1", SyntaxKind::BINARY_EXPR)]
#[case("!f x", SyntaxKind::NOT_EXPR)]
#[case("(x)", SyntaxKind::PAREN_EXPR)]
#[case("(x) => { x }", SyntaxKind::LAMBDA)]
#[case("(x) => { x } 1", SyntaxKind::APP_EXPR)]
#[case("if c then 1 else 2 + 3", SyntaxKind::IF_EXPR)]
#[case("let x = 1 in x + 1", SyntaxKind::LET_EXPR)]
#[case("`{ 1 }", SyntaxKind::QUOTE_EXPR)]
fn test_top_level_shape(#[case] input: &str, #[case] expected: SyntaxKind) {
    assert_eq!(top_kind(input), expected);
}

#[test]
fn test_binary_operators_are_left_associative() {
    let parsed = parse("1 - 2 - 3").unwrap();
    let Some(Expression::Binary(outer)) = SourceFile::cast(parsed.syntax()).unwrap().expr() else {
        panic!("expected binary expression");
    };
    assert!(matches!(outer.lhs(), Some(Expression::Binary(_))));
    assert!(matches!(outer.rhs(), Some(Expression::Literal(_))));
}

#[test]
fn test_and_binds_tighter_than_or() {
    let parsed = parse("a || b && c").unwrap();
    let Some(Expression::Binary(outer)) = SourceFile::cast(parsed.syntax()).unwrap().expr() else {
        panic!("expected binary expression");
    };
    assert_eq!(outer.op().unwrap().kind(), SyntaxKind::PIPE_PIPE);
    assert!(matches!(outer.rhs(), Some(Expression::Binary(_))));
}

// ============================================================================
// Errors
// ============================================================================

#[rstest]
#[case("(1 + 2", ErrorCode::E0203)]
#[case("`{ 1", ErrorCode::E0202)]
#[case("1 2 )", ErrorCode::E0208)]
#[case("", ErrorCode::E0406)]
#[case("if x then y", ErrorCode::E0407)]
#[case("(x: ) => { x }", ErrorCode::E0501)]
#[case("1 + $", ErrorCode::E0101)]
fn test_first_error_code(#[case] input: &str, #[case] expected: ErrorCode) {
    let parsed = parse(input).unwrap();
    assert!(!parsed.ok(), "expected an error for {:?}", input);
    assert_eq!(parsed.errors[0].code, expected, "{:?}", parsed.errors);
}

#[test]
fn test_unclosed_quote_points_at_opener() {
    let parsed = parse("let c = `{ 1 + 2 in c").unwrap();
    let err = parsed
        .errors
        .iter()
        .find(|e| e.code == ErrorCode::E0202)
        .expect("unclosed quote error");
    assert_eq!(err.related[0].message, "opened here");
    assert_eq!(u32::from(err.related[0].range.start()), 8);
}

#[test]
fn test_deep_nesting_is_an_error() {
    let input = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    let parsed = parse(&input).unwrap();
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].code, ErrorCode::E0209);
    assert_eq!(parsed.syntax().text().len(), TextSize::of(input.as_str()));

    let err = lamgamma::check(&input).unwrap_err();
    assert!(matches!(err, lamgamma::Error::Syntax(ref e) if e.code == ErrorCode::E0209));
}

#[test]
fn test_nesting_below_limit_is_accepted() {
    let depth = MAX_NESTING / 4;
    let input = format!("{}1{}", "`{ ".repeat(depth), " }".repeat(depth));
    assert!(parses_successfully(&input));
}

#[test]
fn test_parser_requires_language() {
    let mut parser = Parser::new();
    assert!(parser.language().is_none());
    assert!(parser.parse("1").is_none());

    let lang = Language::new(language()).unwrap();
    parser.set_language(&lang);
    assert_eq!(parser.language().map(|l| l.name()), Some("lamgamma"));
    assert!(parser.parse("1").unwrap().ok());
}
