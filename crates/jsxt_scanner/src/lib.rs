//! jsxt_scanner: Lexer for the JSX-flavoured script dialect.
//!
//! The scanner is pull-based and double-buffered: it always holds the
//! current token and one token of lookahead. Besides ordinary script
//! tokens it has three rescanning modes the parser switches into:
//! - XML element content
//! - regular expression literals
//! - the literal text of a template after an interpolation closes

mod char_codes;
mod scanner;
mod token;

pub use scanner::{is_identifier_part, is_identifier_start, ScanMode, Scanner};
pub use token::{Token, TokenDescriptor};
