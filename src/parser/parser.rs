//! Recursive descent parser for lamgamma
//!
//! Builds a rowan GreenNode tree from tokens. Operator precedence comes from
//! the loaded [`Language`] tables rather than being hard-coded, so the
//! parser only works once a language has been set. Errors are collected,
//! never fatal, and the resulting CST is lossless.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::errors::{ErrorCode, ParseContext, SyntaxError};
use crate::base::ensure_sufficient_stack;
use super::grammar::{self, Assoc};
use super::language::{Language, LanguageError};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

/// Deepest nesting of expressions and types the parser accepts
///
/// Operator chains, application spines and curried parameters each count
/// one level per link, since lowering nests them the same way.
pub const MAX_NESTING: usize = 1_000;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parsing runtime; needs a [`Language`] before it can parse anything
#[derive(Debug, Clone, Default)]
pub struct Parser {
    language: Option<Language>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `language` for subsequent parses
    pub fn set_language(&mut self, language: &Language) {
        self.language = Some(language.clone());
    }

    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    /// Parse `text`, or `None` if no language has been set
    pub fn parse(&self, text: &str) -> Option<Parse> {
        let language = self.language.as_ref()?;
        Some(parse_with(language, text))
    }
}

/// Parse lamgamma source with the built-in grammar
pub fn parse(text: &str) -> Result<Parse, LanguageError> {
    let language = Language::load(grammar::language())?;
    Ok(parse_with(&language, text))
}

fn parse_with(language: &Language, text: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(text).collect();
    tracing::trace!(tokens = tokens.len(), "parsing lamgamma source");
    let mut state = ParseState::new(language, &tokens, TextSize::of(text));
    state.parse_source_file();
    state.finish()
}

/// The parser state
struct ParseState<'a> {
    language: &'a Language,
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    contexts: Vec<ParseContext>,
    depth: usize,
    /// Set once the nesting limit is hit; later errors are noise
    too_deep: bool,
}

impl<'a> ParseState<'a> {
    fn new(language: &'a Language, tokens: &'a [Token<'a>], end: TextSize) -> Self {
        Self {
            language,
            tokens,
            pos: 0,
            end,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            contexts: Vec::new(),
            depth: 0,
            too_deep: false,
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index of the nth non-trivia token at or after `pos`
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(idx, _)| idx)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn peek(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    fn at_eof(&self) -> bool {
        self.peek() == SyntaxKind::EOF
    }

    fn peek_range(&self) -> TextRange {
        self.nth_index(0)
            .map(|idx| {
                let token = &self.tokens[idx];
                TextRange::at(token.offset, TextSize::of(token.text))
            })
            .unwrap_or_else(|| TextRange::empty(self.end))
    }

    fn describe_current(&self) -> String {
        match self.nth_index(0) {
            Some(idx) => format!("`{}`", self.tokens[idx].text),
            None => "end of input".to_string(),
        }
    }

    /// At `(` whose matching `)` is followed by `:` or `=>`
    fn at_lambda(&self) -> bool {
        let Some(start) = self.nth_index(0) else {
            return false;
        };
        if self.tokens[start].kind != SyntaxKind::L_PAREN {
            return false;
        }
        let mut depth = 0usize;
        let mut significant = self.tokens[start..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind);
        for kind in significant.by_ref() {
            match kind {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        depth == 0 && matches!(significant.next(), Some(SyntaxKind::COLON | SyntaxKind::FAT_ARROW))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Attach pending trivia to the current node
    fn skip_trivia(&mut self) {
        while self.tokens.get(self.pos).is_some_and(|t| t.kind.is_trivia()) {
            let token = &self.tokens[self.pos];
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume the next significant token (and any trivia before it)
    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, code: ErrorCode) -> bool {
        if self.eat(kind) {
            return true;
        }
        let message = format!(
            "expected `{}`, found {}",
            self.language.symbol_name(kind),
            self.describe_current()
        );
        let err = SyntaxError::builder(code)
            .message(message)
            .range(self.peek_range())
            .build();
        self.report(err);
        false
    }

    /// Expect a closing delimiter, pointing back at its opener on failure
    fn expect_closing(&mut self, kind: SyntaxKind, opener: TextRange, code: ErrorCode) -> bool {
        if self.eat(kind) {
            return true;
        }
        let closer = self.language.symbol_name(kind);
        let err = SyntaxError::builder(code)
            .message(format!("expected `{}`, found {}", closer, self.describe_current()))
            .range(self.peek_range())
            .hint(format!("add `{}`", closer))
            .related("opened here", opener)
            .build();
        self.report(err);
        false
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn report(&mut self, err: SyntaxError) {
        if !self.too_deep {
            self.errors.push(err);
        }
    }

    /// Enter one nesting level; past [`MAX_NESTING`] report once and skip
    /// the rest of the input
    fn enter(&mut self) -> bool {
        if self.depth < MAX_NESTING {
            self.depth += 1;
            return true;
        }
        if !self.too_deep {
            let err = SyntaxError::builder(ErrorCode::E0209)
                .message(format!("expression nested more than {} levels deep", MAX_NESTING))
                .range(self.peek_range())
                .hint("name intermediate results with `let`")
                .build();
            self.errors.push(err);
            self.too_deep = true;
        }
        if !self.at_eof() {
            self.error_recover(&[]);
        }
        false
    }

    fn context(&self) -> ParseContext {
        self.contexts.last().copied().unwrap_or(ParseContext::TopLevel)
    }

    fn error_unexpected(&mut self, code: ErrorCode) {
        let err = SyntaxError::unexpected(&self.describe_current(), self.context(), code)
            .range(self.peek_range())
            .build();
        self.report(err);
    }

    /// A missing expression right after an operator is a missing operand
    fn mark_missing_operand(&mut self) {
        if let Some(err) = self.errors.last_mut().filter(|e| e.code == ErrorCode::E0406) {
            err.code = ErrorCode::E0402;
        }
    }

    /// Wrap tokens up to the next recovery token in an ERROR node
    fn error_recover(&mut self, recovery: &[SyntaxKind]) {
        self.skip_trivia();
        self.builder.start_node(SyntaxKind::ERROR.into());
        let mut consumed = false;
        while !self.at_eof() && !(consumed && recovery.contains(&self.peek())) {
            self.bump();
            consumed = true;
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    /// Single-token node, e.g. NAME_REF around an IDENT
    fn token_node(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = Expr
    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());

        if self.at_eof() {
            self.error_unexpected(ErrorCode::E0406);
        } else {
            self.parse_expr(0);
        }

        if !self.at_eof() {
            let err = SyntaxError::builder(ErrorCode::E0208)
                .message(format!("unexpected {} after expression", self.describe_current()))
                .range(self.peek_range())
                .build();
            self.report(err);
            self.error_recover(&[]);
        }

        self.skip_trivia();
        self.finish_node();
    }

    /// Expr with binding power at least `min_prec`
    ///
    /// Returns false if no expression could be started.
    fn parse_expr(&mut self, min_prec: u8) -> bool {
        if !self.enter() {
            return false;
        }
        let parsed = ensure_sufficient_stack(|| self.parse_expr_inner(min_prec));
        self.depth -= 1;
        parsed
    }

    fn parse_expr_inner(&mut self, min_prec: u8) -> bool {
        let cp = self.checkpoint();
        if !self.parse_prefix() {
            return false;
        }

        // Each wrap around the left operand nests the tree one level deeper.
        let mut wraps = 0;
        loop {
            let kind = self.peek();

            let app_prec = self.language.application_precedence();
            if kind.starts_simple_expr() && app_prec >= min_prec && !self.at_lambda() {
                if !self.enter() {
                    break;
                }
                wraps += 1;
                self.builder.start_node_at(cp, SyntaxKind::APP_EXPR.into());
                self.parse_prefix();
                self.finish_node();
                continue;
            }

            let Some(op) = self.language.binary_operator(kind).copied() else {
                break;
            };
            if op.precedence < min_prec {
                break;
            }
            let next_prec = match op.assoc {
                Assoc::Left => op.precedence + 1,
                Assoc::Right => op.precedence,
            };

            if !self.enter() {
                break;
            }
            wraps += 1;
            self.builder.start_node_at(cp, SyntaxKind::BINARY_EXPR.into());
            self.bump();
            if !self.parse_expr(next_prec) {
                self.mark_missing_operand();
            }
            self.finish_node();
        }

        self.depth -= wraps;
        true
    }

    /// Atoms and prefix forms
    fn parse_prefix(&mut self) -> bool {
        match self.peek() {
            SyntaxKind::L_PAREN if self.at_lambda() => self.parse_lambda(),
            SyntaxKind::L_PAREN => self.parse_paren_expr(),
            SyntaxKind::IDENT => self.token_node(SyntaxKind::NAME_REF),
            SyntaxKind::NUMBER | SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => {
                self.token_node(SyntaxKind::LITERAL)
            }
            SyntaxKind::QUOTE_OPEN => self.parse_quote(),
            SyntaxKind::SPLICE_OPEN | SyntaxKind::TILDE => self.parse_splice(),
            SyntaxKind::BANG => self.parse_not(),
            SyntaxKind::IF_KW => self.parse_if(),
            SyntaxKind::LET_KW => self.parse_let(),
            SyntaxKind::EOF => {
                self.error_unexpected(ErrorCode::E0406);
                return false;
            }
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACE => {
                // Leave the closer for whoever opened the group.
                self.error_unexpected(ErrorCode::E0205);
                return false;
            }
            kind => {
                let code = if kind == SyntaxKind::ERROR {
                    ErrorCode::E0101
                } else {
                    ErrorCode::E0406
                };
                self.error_unexpected(code);
                // A token the enclosing construct is waiting for stays put.
                let recovery = self.context().recovery_tokens();
                if !recovery.contains(&kind) {
                    self.error_recover(recovery);
                }
                return false;
            }
        }
        true
    }

    /// ParenExpr = '(' Expr ')'
    fn parse_paren_expr(&mut self) {
        self.start_node(SyntaxKind::PAREN_EXPR);
        let opener = self.peek_range();
        self.bump();
        self.parse_expr(0);
        self.expect_closing(SyntaxKind::R_PAREN, opener, ErrorCode::E0203);
        self.finish_node();
    }

    /// Lambda = '(' Param (',' Param)* ')' (':' Type)? '=>' '{' Expr '}'
    fn parse_lambda(&mut self) {
        self.start_node(SyntaxKind::LAMBDA);
        self.contexts.push(ParseContext::ParameterList);

        self.start_node(SyntaxKind::PARAM_LIST);
        let opener = self.peek_range();
        self.bump();
        self.parse_param();
        // Every parameter after the first becomes a nested lambda.
        let mut curried = 0;
        while self.eat(SyntaxKind::COMMA) {
            if !self.enter() {
                break;
            }
            curried += 1;
            self.parse_param();
        }
        self.expect_closing(SyntaxKind::R_PAREN, opener, ErrorCode::E0203);
        self.finish_node();

        self.contexts.pop();
        self.contexts.push(ParseContext::Lambda);

        if self.at(SyntaxKind::COLON) {
            self.start_node(SyntaxKind::RET_TYPE);
            self.bump();
            self.parse_type();
            self.finish_node();
        }

        self.expect(SyntaxKind::FAT_ARROW, ErrorCode::E0902);
        let opener = self.peek_range();
        if self.expect(SyntaxKind::L_BRACE, ErrorCode::E0902) {
            self.parse_expr(0);
            self.expect_closing(SyntaxKind::R_BRACE, opener, ErrorCode::E0202);
        }

        self.depth -= curried;
        self.contexts.pop();
        self.finish_node();
    }

    /// Param = Ident (':' Type)?
    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::PARAM);
        if !self.expect(SyntaxKind::IDENT, ErrorCode::E0301) {
            let recovery = self.context().recovery_tokens();
            if !self.at_eof() && !recovery.contains(&self.peek()) {
                self.error_recover(recovery);
            }
        }
        if self.eat(SyntaxKind::COLON) {
            self.parse_type();
        }
        self.finish_node();
    }

    /// Quote = '`{' Expr '}'
    fn parse_quote(&mut self) {
        self.start_node(SyntaxKind::QUOTE_EXPR);
        self.contexts.push(ParseContext::Quote);
        let opener = self.peek_range();
        self.bump();
        self.parse_expr(0);
        self.expect_closing(SyntaxKind::R_BRACE, opener, ErrorCode::E0202);
        self.contexts.pop();
        self.finish_node();
    }

    /// Splice = '~{' Expr '}' | '~' Number '{' Expr '}'
    fn parse_splice(&mut self) {
        self.start_node(SyntaxKind::SPLICE_EXPR);
        self.contexts.push(ParseContext::Splice);
        let opener = self.peek_range();
        let shifted = self.at(SyntaxKind::TILDE);
        self.bump();
        let mut opened = true;
        if shifted {
            self.expect(SyntaxKind::NUMBER, ErrorCode::E0902);
            opened = self.expect(SyntaxKind::L_BRACE, ErrorCode::E0902);
        }
        if opened {
            self.parse_expr(0);
            self.expect_closing(SyntaxKind::R_BRACE, opener, ErrorCode::E0202);
        }
        self.contexts.pop();
        self.finish_node();
    }

    /// Not = '!' Expr
    fn parse_not(&mut self) {
        self.start_node(SyntaxKind::NOT_EXPR);
        self.bump();
        let prec = self.language.unary_precedence();
        if !self.parse_expr(prec) {
            self.mark_missing_operand();
        }
        self.finish_node();
    }

    /// If = 'if' Expr 'then' Expr 'else' Expr
    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IF_EXPR);
        self.contexts.push(ParseContext::Conditional);
        self.bump();
        self.parse_expr(0);
        if self.expect(SyntaxKind::THEN_KW, ErrorCode::E0407) {
            self.parse_expr(0);
            if self.expect(SyntaxKind::ELSE_KW, ErrorCode::E0407) {
                self.parse_expr(0);
            }
        }
        self.contexts.pop();
        self.finish_node();
    }

    /// Let = 'let' 'rec'? Param '=' Expr 'in' Expr
    fn parse_let(&mut self) {
        self.start_node(SyntaxKind::LET_EXPR);
        self.contexts.push(ParseContext::LetBinding);
        self.bump();
        self.eat(SyntaxKind::REC_KW);
        self.parse_param();
        if self.expect(SyntaxKind::EQ, ErrorCode::E0902) {
            self.parse_expr(0);
            if self.expect(SyntaxKind::IN_KW, ErrorCode::E0407) {
                self.parse_expr(0);
            }
        }
        self.contexts.pop();
        self.finish_node();
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Type = TypeAtom ('->' Type)?
    fn parse_type(&mut self) -> bool {
        if !self.enter() {
            return false;
        }
        let parsed = ensure_sufficient_stack(|| self.parse_type_inner());
        self.depth -= 1;
        parsed
    }

    fn parse_type_inner(&mut self) -> bool {
        self.contexts.push(ParseContext::TypeAnnotation);
        let cp = self.checkpoint();
        let ok = self.parse_type_atom();
        if ok && self.at(SyntaxKind::ARROW) {
            self.builder.start_node_at(cp, SyntaxKind::FUNC_TYPE.into());
            self.bump();
            self.parse_type();
            self.finish_node();
        }
        self.contexts.pop();
        ok
    }

    /// TypeAtom = 'int' | 'bool' | '(' Type ')' | '<' Type '>'
    fn parse_type_atom(&mut self) -> bool {
        match self.peek() {
            SyntaxKind::INT_KW => self.token_node(SyntaxKind::INT_TYPE),
            SyntaxKind::BOOL_KW => self.token_node(SyntaxKind::BOOL_TYPE),
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_TYPE);
                let opener = self.peek_range();
                self.bump();
                self.parse_type();
                self.expect_closing(SyntaxKind::R_PAREN, opener, ErrorCode::E0203);
                self.finish_node();
            }
            SyntaxKind::LT => {
                self.start_node(SyntaxKind::CODE_TYPE);
                self.bump();
                self.parse_type();
                self.expect(SyntaxKind::GT, ErrorCode::E0501);
                self.finish_node();
            }
            _ => {
                let err = SyntaxError::builder(ErrorCode::E0501)
                    .message(format!("expected type, found {}", self.describe_current()))
                    .range(self.peek_range())
                    .hint(self.context().expected_description())
                    .build();
                self.report(err);
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxNode;

    fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.descendants().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_parser_without_language() {
        assert!(Parser::new().parse("1").is_none());
    }

    #[test]
    fn test_parse_is_lossless() {
        let input = "let f = (x: int, y: int) => { x + y } // add\nin f 1 2";
        let parse = parse(input).unwrap();
        assert!(parse.ok(), "{:?}", parse.errors);
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_application_binds_tighter_than_plus() {
        let parse = parse("f 1 + 2").unwrap();
        assert!(parse.ok());
        let root = parse.syntax();
        let expr = root.first_child().unwrap();
        assert_eq!(expr.kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(expr.first_child().unwrap().kind(), SyntaxKind::APP_EXPR);
    }

    #[test]
    fn test_lambda_vs_parenthesized() {
        let lambda = parse("(x) => { x }").unwrap();
        assert_eq!(lambda.syntax().first_child().unwrap().kind(), SyntaxKind::LAMBDA);

        let paren = parse("(x)").unwrap();
        assert_eq!(paren.syntax().first_child().unwrap().kind(), SyntaxKind::PAREN_EXPR);
    }

    #[test]
    fn test_staging_nodes() {
        let parse = parse("`{ ~{ x } + ~0{ y } }").unwrap();
        assert!(parse.ok(), "{:?}", parse.errors);
        let kinds = kinds(&parse.syntax());
        assert!(kinds.contains(&SyntaxKind::QUOTE_EXPR));
        assert_eq!(kinds.iter().filter(|k| **k == SyntaxKind::SPLICE_EXPR).count(), 2);
    }

    #[test]
    fn test_function_type_is_right_associative() {
        let parse = parse("(f: int -> int -> bool) => { f }").unwrap();
        assert!(parse.ok(), "{:?}", parse.errors);
        let func = parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::FUNC_TYPE)
            .unwrap();
        let children: Vec<_> = func.children().map(|n| n.kind()).collect();
        assert_eq!(children, vec![SyntaxKind::INT_TYPE, SyntaxKind::FUNC_TYPE]);
    }

    #[test]
    fn test_missing_close_paren_points_at_opener() {
        let parse = parse("(1 + 2").unwrap();
        assert!(!parse.ok());
        let err = &parse.errors[0];
        assert_eq!(err.code, ErrorCode::E0203);
        assert_eq!(err.related[0].range, TextRange::new(0.into(), 1.into()));
    }

    #[test]
    fn test_trailing_input() {
        let parse = parse("1 )").unwrap();
        assert_eq!(parse.errors[0].code, ErrorCode::E0208);
        assert_eq!(parse.syntax().text().to_string(), "1 )");
    }

    #[test]
    fn test_empty_input() {
        let parse = parse("   ").unwrap();
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].code, ErrorCode::E0406);
    }

    #[test]
    fn test_missing_in_keyword() {
        let parse = parse("let x = 1 x").unwrap();
        assert!(parse.errors.iter().any(|e| e.code == ErrorCode::E0407));
    }

    fn nested_parens(depth: usize) -> String {
        format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_within_limit() {
        let parse = parse(&nested_parens(MAX_NESTING / 2)).unwrap();
        assert!(parse.ok(), "{:?}", parse.errors.first());
    }

    #[test]
    fn test_nesting_limit_reports_once() {
        let input = nested_parens(20_000);
        let parse = parse(&input).unwrap();
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].code, ErrorCode::E0209);
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_operator_chains_count_towards_nesting() {
        let short = format!("1{}", " + 1".repeat(MAX_NESTING / 2));
        assert!(parse(&short).unwrap().ok());

        let long = format!("1{}", " + 1".repeat(MAX_NESTING * 2));
        let parse = parse(&long).unwrap();
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].code, ErrorCode::E0209);
    }

    #[test]
    fn test_curried_parameters_count_towards_nesting() {
        let params: Vec<String> = (0..MAX_NESTING * 2).map(|i| format!("x{}: int", i)).collect();
        let input = format!("({}) => {{ x0 }}", params.join(", "));
        let parse = parse(&input).unwrap();
        assert_eq!(parse.errors[0].code, ErrorCode::E0209);
    }
}
