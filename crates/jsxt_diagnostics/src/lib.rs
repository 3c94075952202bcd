//! jsxt_diagnostics: The error taxonomy and message table of the transpiler.
//!
//! Every failure is fatal to the current transform. The scanner marks a
//! malformed lexeme with the [`DiagnosticMessage`] that describes it, and
//! the parser turns that (or its own grammar failure) into a single
//! [`TranspileError`] carrying the message, line, offset and path.

use jsxt_core::text::Location;
use std::fmt;

/// What went wrong, independent of wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnterminatedString,
    UnterminatedComment,
    UnterminatedRegExp,
    InvalidRegExpFlags,
    UnterminatedTemplate,
    InvalidUnicodeEscape,
    MalformedNumber,
    InvalidCharacter,
    UnexpectedToken,
    UnexpectedEndOfSource,
    MismatchedClosingTag,
    UnterminatedElement,
    DuplicateAttribute,
    ComponentChildren,
    InvalidEventName,
    MalformedImport,
    MalformedExport,
    DuplicateDefaultExport,
    MissingSemicolon,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A message template with a stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002, 2001).
    pub code: u32,
    /// The error family this message belongs to.
    pub kind: ErrorKind,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// The single fatal error a transform can produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("SyntaxError: {message}\nline:{line}, pos:{pos}, {path}")]
pub struct TranspileError {
    pub kind: ErrorKind,
    pub code: u32,
    pub message: String,
    /// One-based line of the offending token.
    pub line: u32,
    /// End offset of the offending token.
    pub pos: usize,
    /// The diagnostic path supplied by the caller.
    pub path: String,
}

impl TranspileError {
    pub fn new(message: &DiagnosticMessage, args: &[&str], location: Location, path: &str) -> Self {
        Self {
            kind: message.kind,
            code: message.code,
            message: format_message(message.message, args),
            line: location.line_number(),
            pos: location.end,
            path: path.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranspileError>;

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::{DiagnosticMessage, ErrorKind};

    macro_rules! diag {
        ($code:expr, $kind:ident, $msg:expr) => {
            DiagnosticMessage { code: $code, kind: ErrorKind::$kind, message: $msg }
        };
    }

    // Lexical errors (1xxx)
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, UnterminatedString, "Unterminated string literal.");
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(1010, UnterminatedComment, "'*/' expected.");
    pub const UNTERMINATED_XML_COMMENT: DiagnosticMessage = diag!(1011, UnterminatedComment, "'-->' expected.");
    pub const UNTERMINATED_REGEXP_LITERAL: DiagnosticMessage = diag!(1161, UnterminatedRegExp, "Unterminated regular expression literal.");
    pub const INVALID_REGEXP_FLAGS: DiagnosticMessage = diag!(1499, InvalidRegExpFlags, "Invalid regular expression flags.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, UnterminatedTemplate, "Unterminated template literal.");
    pub const INVALID_UNICODE_ESCAPE: DiagnosticMessage = diag!(1125, InvalidUnicodeEscape, "Hexadecimal digit expected.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1124, MalformedNumber, "Digit expected.");
    pub const MALFORMED_NUMBER: DiagnosticMessage = diag!(1351, MalformedNumber, "An identifier or keyword cannot immediately follow a numeric literal.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, InvalidCharacter, "Invalid character.");

    // Grammar errors (2xxx)
    pub const UNEXPECTED_TOKEN_0: DiagnosticMessage = diag!(2001, UnexpectedToken, "Unexpected token '{0}'.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(2002, UnexpectedToken, "'{0}' expected.");
    pub const UNEXPECTED_END_OF_SOURCE: DiagnosticMessage = diag!(2003, UnexpectedEndOfSource, "Unexpected end of source.");
    pub const BRACE_LEVEL_MISMATCH: DiagnosticMessage = diag!(2004, UnexpectedToken, "Bracket nesting level mismatch.");
    pub const MISSING_SEMICOLON_AFTER_CLASS_FIELD: DiagnosticMessage = diag!(2005, MissingSemicolon, "';' expected after class field '{0}'.");
    pub const INVALID_ACCESSOR_DEFINITION: DiagnosticMessage = diag!(2006, UnexpectedToken, "Invalid property accessor definition.");
    pub const INVALID_EVENT_NAME_0: DiagnosticMessage = diag!(2007, InvalidEventName, "Event name '{0}' must start with 'on'.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(2008, UnexpectedToken, "Maximum nesting depth exceeded.");

    // XML errors (3xxx)
    pub const CLOSING_TAG_0_DOES_NOT_MATCH_1: DiagnosticMessage = diag!(3001, MismatchedClosingTag, "Closing tag '</{0}>' does not match opening tag '<{1}>'.");
    pub const MISSING_CLOSING_TAG_0: DiagnosticMessage = diag!(3002, UnterminatedElement, "Missing closing tag '</{0}>'.");
    pub const DUPLICATE_ATTRIBUTE_0: DiagnosticMessage = diag!(3003, DuplicateAttribute, "Duplicate attribute '{0}'.");
    pub const COMPONENT_0_CANNOT_HAVE_CHILDREN: DiagnosticMessage = diag!(3004, ComponentChildren, "Component '{0}' cannot have child views.");
    pub const ATTRIBUTES_MUST_BE_SEPARATED: DiagnosticMessage = diag!(3005, UnexpectedToken, "Attributes must be separated by whitespace.");
    pub const XML_NOT_ALLOWED_IN_ATTRIBUTE: DiagnosticMessage = diag!(3006, UnexpectedToken, "XML elements are not allowed inside an attribute value.");

    // Module errors (4xxx)
    pub const MALFORMED_IMPORT: DiagnosticMessage = diag!(4001, MalformedImport, "Malformed import declaration.");
    pub const MALFORMED_EXPORT: DiagnosticMessage = diag!(4002, MalformedExport, "Malformed export declaration.");
    pub const DUPLICATE_DEFAULT_EXPORT: DiagnosticMessage = diag!(4003, DuplicateDefaultExport, "A module cannot have multiple default exports.");
}
