//! Syntax error type and its builder

use std::fmt::Write as _;

use rowan::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;
use super::context::ParseContext;
use crate::base::LineIndex;

/// A secondary location attached to an error, such as the opener of an
/// unclosed quotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub message: String,
    pub range: TextRange,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A syntax error with location, code and optional hint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
    pub code: ErrorCode,
    /// Suggested fix, shown by [`SyntaxError::render`]
    pub hint: Option<String>,
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            hint: None,
            related: Vec::new(),
        }
    }

    pub fn builder(code: ErrorCode) -> SyntaxErrorBuilder {
        SyntaxErrorBuilder {
            code,
            message: None,
            range: None,
            hint: None,
            related: Vec::new(),
        }
    }

    /// "unexpected X in <context>, expected Y"
    pub fn unexpected(found: &str, context: ParseContext, code: ErrorCode) -> SyntaxErrorBuilder {
        Self::builder(code).message(format!(
            "unexpected {} {}, expected {}",
            found,
            context.description(),
            context.expected_description()
        ))
    }

    /// `line:col: code: message`, then the hint and each related location
    /// on its own indented line
    pub fn render(&self, index: &LineIndex) -> String {
        let mut out = format!("{}: {}", index.span(self.range), self);
        if let Some(hint) = &self.hint {
            let _ = write!(out, "\n  hint: {}", hint);
        }
        for info in &self.related {
            let _ = write!(out, "\n  {}: note: {}", index.span(info.range), info.message);
        }
        out
    }
}

pub struct SyntaxErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    range: Option<TextRange>,
    hint: Option<String>,
    related: Vec<RelatedInfo>,
}

impl SyntaxErrorBuilder {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo::new(message, range));
        self
    }

    /// Unset message falls back to the code's default; unset range is empty at 0
    pub fn build(self) -> SyntaxError {
        let code = self.code;
        SyntaxError {
            message: self.message.unwrap_or_else(|| code.default_message().to_string()),
            range: self.range.unwrap_or_else(|| TextRange::empty(TextSize::new(0))),
            code,
            hint: self.hint,
            related: self.related,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let err = SyntaxError::builder(ErrorCode::E0406).build();
        assert_eq!(err.message, "expected expression");
        assert_eq!(err.range, TextRange::empty(TextSize::new(0)));
        assert!(err.hint.is_none());
    }

    #[test]
    fn test_display_and_render() {
        let err = SyntaxError::builder(ErrorCode::E0407)
            .message("expected `in`")
            .range(TextRange::empty(TextSize::new(4)))
            .hint("a let binding reads `let x = e in body`")
            .build();

        assert_eq!(err.to_string(), "E0407: expected `in`");
        let rendered = err.render(&LineIndex::new("let\nx = 1"));
        assert_eq!(
            rendered,
            "2:1: E0407: expected `in`\n  hint: a let binding reads `let x = e in body`"
        );
    }

    #[test]
    fn test_render_related_locations() {
        let source = "`{\n  1 +\n";
        let err = SyntaxError::builder(ErrorCode::E0202)
            .message("expected `}`, found end of input")
            .range(TextRange::empty(TextSize::of(source)))
            .related("opened here", TextRange::new(0.into(), 2.into()))
            .build();

        let rendered = err.render(&LineIndex::new(source));
        assert!(rendered.ends_with("\n  1:1: note: opened here"), "{}", rendered);
    }

    #[test]
    fn test_unexpected_mentions_context() {
        let err = SyntaxError::unexpected("`)`", ParseContext::LetBinding, ErrorCode::E0901).build();
        assert!(err.message.starts_with("unexpected `)` in let binding, expected"));
    }
}
