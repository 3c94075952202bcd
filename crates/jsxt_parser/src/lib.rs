//! jsxt_parser: The dialect-to-script transformer.
//!
//! Drives the scanner over a source text and emits plain, module-loadable
//! script. Imports become `require` bindings, exports are assigned onto
//! `exports`, inline XML compiles to element descriptors, and class fields
//! and `event` members are expanded. Line numbers of the input are kept.

mod class;
mod fragments;
mod module;
mod output;
mod parser;
mod utilities;
mod xml;

pub use class::{group_member_records, MemberDataExpression, MemberRecord};
pub use jsxt_diagnostics::TranspileError;
pub use jsxt_options::TransformOptions;
pub use output::Output;
pub use parser::Parser;
pub use utilities::{is_legal_literal_begin, module_binding_name, LiteralContext};
pub use xml::normalize_xml_text;

use jsxt_core::text::{decode_utf16, encode_utf16};
use tracing::{debug, debug_span};

/// Transform one source text.
///
/// `path` only names the source in error messages.
pub fn transform(source: &str, path: &str, options: &TransformOptions) -> Result<String, TranspileError> {
    let _span = debug_span!("transform", path).entered();
    debug!(bytes = source.len(), jsx = options.jsx, "transforming");
    let output = Parser::new(source, path, options).transform()?;
    debug!(bytes = output.len(), "transformed");
    Ok(output)
}

/// Transform a UTF-16 code-unit buffer. Unpaired surrogates are read as
/// U+FFFD.
pub fn transform_utf16(source: &[u16], path: &str, options: &TransformOptions) -> Result<Vec<u16>, TranspileError> {
    let source = decode_utf16(source);
    transform(&source, path, options).map(|output| encode_utf16(&output))
}
