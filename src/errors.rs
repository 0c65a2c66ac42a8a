//! Bracket Tree Error Handling
//!
//! Every failure in the crate is a [`BracketError`]: a kind, an optional
//! location in the text being parsed, and the diagnostic code used when the
//! error is rendered through miette.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// The text a parse runs over, together with a display name for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context for text that came from a file or other named origin.
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Create a source context for text typed in directly.
    pub fn inline(content: impl Into<String>) -> Self {
        Self::from_file("<input>", content)
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Everything that can go wrong while parsing, serializing or generating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // Configuration errors
    #[error("no value converter configured")]
    MissingConverter,

    // Syntax errors
    #[error("unbalanced parentheses: expected ')', found {found}")]
    UnbalancedParentheses { found: String },
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("unterminated quoted value")]
    UnterminatedQuote,
    #[error("trailing content: expected end of input, found {found}")]
    TrailingContent { found: String },

    // Conversion errors
    #[error("invalid value token '{token}': {reason}")]
    InvalidValue { token: String, reason: String },
    #[error("value '{value}' cannot be written in bracket notation")]
    UnrepresentableValue { value: String },

    // Limits
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },

    // Precondition violations
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Syntax,
    Conversion,
    Limit,
    Argument,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Syntax => "syntax",
            Self::Conversion => "conversion",
            Self::Limit => "limit",
            Self::Argument => "argument",
        }
    }
}

impl ErrorKind {
    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingConverter => ErrorCategory::Configuration,

            Self::UnbalancedParentheses { .. }
            | Self::UnexpectedToken { .. }
            | Self::UnterminatedQuote
            | Self::TrailingContent { .. } => ErrorCategory::Syntax,

            Self::InvalidValue { .. } | Self::UnrepresentableValue { .. } => {
                ErrorCategory::Conversion
            }

            Self::DepthExceeded { .. } => ErrorCategory::Limit,

            Self::InvalidArgument { .. } => ErrorCategory::Argument,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::MissingConverter => "missing_converter",
            Self::UnbalancedParentheses { .. } => "unbalanced_parentheses",
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::UnterminatedQuote => "unterminated_quote",
            Self::TrailingContent { .. } => "trailing_content",
            Self::InvalidValue { .. } => "invalid_value",
            Self::UnrepresentableValue { .. } => "unrepresentable_value",
            Self::DepthExceeded { .. } => "depth_exceeded",
            Self::InvalidArgument { .. } => "invalid_argument",
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::MissingConverter => "value needs a converter",
            Self::UnbalancedParentheses { .. } => "expected ')' here",
            Self::UnexpectedToken { .. } => "unexpected token",
            Self::UnterminatedQuote => "quote opened here",
            Self::TrailingContent { .. } => "expected end of input",
            Self::InvalidValue { .. } => "invalid value",
            Self::UnrepresentableValue { .. } => "unrepresentable value",
            Self::DepthExceeded { .. } => "nesting too deep",
            Self::InvalidArgument { .. } => "invalid argument",
        }
    }

    fn default_help(&self) -> Option<&'static str> {
        match self {
            Self::MissingConverter => {
                Some("construct the codec with a value converter before parsing")
            }
            Self::UnbalancedParentheses { .. } => {
                Some("every '(' opening a child group must be closed by ')'")
            }
            Self::TrailingContent { .. } => {
                Some("a bracket string holds exactly one root node")
            }
            Self::UnterminatedQuote => Some("close the quoted value with '\"'"),
            _ => None,
        }
    }
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

/// The crate's single error type.
#[derive(Debug, Clone)]
pub struct BracketError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened, when the error is tied to input text
    pub span: Option<SourceSpan>,
    source: Option<Arc<NamedSource<String>>>,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

impl BracketError {
    /// Creates an error that is not tied to any input text.
    pub fn unlocated(kind: ErrorKind) -> Self {
        let diagnostic_info = DiagnosticInfo {
            help: kind.default_help().map(String::from),
            error_code: format!(
                "bracket_tree::{}::{}",
                kind.category().as_str(),
                kind.code_suffix()
            ),
        };
        Self {
            kind,
            span: None,
            source: None,
            diagnostic_info,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::unlocated(ErrorKind::InvalidArgument {
            message: message.into(),
        })
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Cursor offset at which the error was detected.
    pub fn offset(&self) -> Option<usize> {
        self.span.map(|span| span.offset())
    }

    /// Attaches source text so the diagnostic can render a snippet.
    pub fn with_source(mut self, source: &SourceContext) -> Self {
        self.source = Some(source.to_named_source());
        self
    }
}

impl std::error::Error for BracketError {}

impl fmt::Display for BracketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(offset) => write!(f, "{} [{}]", self.kind, offset),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Diagnostic for BracketError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source
            .as_deref()
            .map(|source| source as &dyn miette::SourceCode)
    }
}

// ============================================================================
// ERROR REPORTING CONTEXTS
// ============================================================================

/// Context-aware error creation for anything that walks over input text.
pub trait ErrorReporting {
    /// Create an error located at `span`.
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> BracketError;

    fn unbalanced(&self, found: &str, offset: usize) -> BracketError {
        self.report(
            ErrorKind::UnbalancedParentheses {
                found: found.into(),
            },
            point(offset),
        )
    }

    fn unexpected_token(&self, expected: &str, found: &str, offset: usize) -> BracketError {
        self.report(
            ErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: found.into(),
            },
            point(offset),
        )
    }

    fn trailing_content(&self, found: &str, offset: usize) -> BracketError {
        self.report(
            ErrorKind::TrailingContent {
                found: found.into(),
            },
            point(offset),
        )
    }
}

impl ErrorReporting for SourceContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> BracketError {
        let mut error = BracketError::unlocated(kind);
        error.span = Some(span);
        error.with_source(self)
    }
}

/// Zero-length span at `offset`.
pub fn point(offset: usize) -> SourceSpan {
    SourceSpan::from(offset..offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_located_error_reports_offset_and_code() {
        let source = SourceContext::inline("5(3,8");
        let error = source.unbalanced("end of input", 5);

        assert_eq!(error.offset(), Some(5));
        assert_eq!(error.category(), ErrorCategory::Syntax);
        assert_eq!(
            error.diagnostic_info.error_code,
            "bracket_tree::syntax::unbalanced_parentheses"
        );
        assert_eq!(
            error.to_string(),
            "unbalanced parentheses: expected ')', found end of input [5]"
        );
    }

    #[test]
    fn test_unlocated_error_has_no_offset() {
        let error = BracketError::invalid_argument("min_value must not exceed max_value");
        assert_eq!(error.offset(), None);
        assert_eq!(error.category(), ErrorCategory::Argument);
        assert!(error.labels().is_none());
    }

    #[test]
    fn test_missing_converter_is_configuration_error() {
        let error = BracketError::unlocated(ErrorKind::MissingConverter);
        assert_eq!(error.category(), ErrorCategory::Configuration);
        assert!(error.diagnostic_info.help.is_some());
    }
}
