//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, parentheses, trailing input)
//! - E03xx: Binding errors (parameters, let)
//! - E04xx: Expression errors
//! - E05xx: Type annotation errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering, documentation, and IDE integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Invalid numeric literal (e.g. out of range)
    E0104,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unexpected closing delimiter
    E0205,
    /// Input left over after the expression
    E0208,
    /// Expression nested too deeply
    E0209,

    // =========================================================================
    // E03xx: Binding errors
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// `let rec` must bind a function
    E0308,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Missing operand in expression
    E0402,
    /// Missing expression where expected
    E0406,
    /// Missing `then`, `else` or `in`
    E0407,

    // =========================================================================
    // E05xx: Type annotation errors
    // =========================================================================
    /// Missing or malformed type
    E0501,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0202")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0104 => "E0104",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0205 => "E0205",
            Self::E0208 => "E0208",
            Self::E0209 => "E0209",
            Self::E0301 => "E0301",
            Self::E0308 => "E0308",
            Self::E0402 => "E0402",
            Self::E0406 => "E0406",
            Self::E0407 => "E0407",
            Self::E0501 => "E0501",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0104 => "lexical error",
            Self::E0202 | Self::E0203 | Self::E0205 | Self::E0208 | Self::E0209 => "structural error",
            Self::E0301 | Self::E0308 => "binding error",
            Self::E0402 | Self::E0406 | Self::E0407 => "expression error",
            Self::E0501 => "type annotation error",
            Self::E0901 | Self::E0902 | Self::E0999 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0104 => "invalid numeric literal",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0208 => "unexpected input after expression",
            Self::E0209 => "expression nested too deeply",
            Self::E0301 => "missing identifier",
            Self::E0308 => "let rec must bind a function",
            Self::E0402 => "missing operand",
            Self::E0406 => "expected expression",
            Self::E0407 => "missing keyword",
            Self::E0501 => "expected type",
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0202 | Self::E0203 | Self::E0205 | Self::E0208 | Self::E0209
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E0202.as_str(), "E0202");
        assert_eq!(ErrorCode::E0901.as_str(), "E0901");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0203), "E0203");
    }

    #[test]
    fn test_structural() {
        assert!(ErrorCode::E0203.is_structural());
        assert!(!ErrorCode::E0406.is_structural());
    }
}
