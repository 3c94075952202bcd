//! Token predicates shared by the transformer.

use jsxt_scanner::{is_identifier_part, is_identifier_start, Token};

/// What else is known about the token under test besides its predecessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralContext {
    /// The predecessor is the `)` closing a single-statement `if` condition.
    pub after_single_if: bool,
    /// A line terminator separates the token from its predecessor.
    pub before_line_feed: bool,
}

/// Whether a literal (a regex, an XML element) may begin right after `prev`.
///
/// Decides `/` between divide and regex, and `<` between less-than and a tag.
pub fn is_legal_literal_begin(prev: Token, context: LiteralContext) -> bool {
    // Assignment, comma, binary, comparison and unary operators.
    if (Token::Assign..=Token::Typeof).contains(&prev) {
        return true;
    }
    match prev {
        Token::Bos
        | Token::ShellHeader
        | Token::LParen
        | Token::LBrack
        | Token::LBrace
        | Token::RBrace
        | Token::Semicolon
        | Token::Colon
        | Token::Conditional
        | Token::Arrow
        | Token::Ellipsis
        | Token::Of
        | Token::Return
        | Token::Else
        | Token::Default
        | Token::Case
        | Token::Do
        | Token::Throw
        | Token::Void
        | Token::Delete
        | Token::Await
        | Token::Yield => true,
        Token::RParen => context.after_single_if,
        Token::RBrack => context.before_line_feed,
        _ => false,
    }
}

/// Tokens usable as a declared name: identifiers and contextual keywords.
pub fn is_binding_identifier(token: Token) -> bool {
    matches!(
        token,
        Token::Identifier
            | Token::As
            | Token::Async
            | Token::Event
            | Token::From
            | Token::Get
            | Token::Of
            | Token::Set
            | Token::Static
    )
}

/// Tokens usable as a property or attribute name: any word.
#[inline]
pub fn is_property_name(token: Token) -> bool {
    token == Token::Identifier || token.is_keyword()
}

/// Tokens that can name a class member.
#[inline]
pub fn is_class_member_name(token: Token) -> bool {
    is_property_name(token) || matches!(token, Token::String | Token::Number)
}

/// Tokens that can begin an expression.
pub fn is_expression_start(token: Token) -> bool {
    is_binding_identifier(token)
        || matches!(
            token,
            Token::Number
                | Token::String
                | Token::Command
                | Token::XmlElementTag
                | Token::Div
                | Token::AssignDiv
                | Token::LParen
                | Token::LBrack
                | Token::LBrace
                | Token::Not
                | Token::BitNot
                | Token::Add
                | Token::Sub
                | Token::Inc
                | Token::Dec
                | Token::Typeof
                | Token::New
                | Token::Await
                | Token::Void
                | Token::Delete
        )
}

/// Unary prefixes accepted inside an attribute value.
pub fn is_unary_prefix(token: Token) -> bool {
    matches!(
        token,
        Token::Not
            | Token::BitNot
            | Token::Add
            | Token::Sub
            | Token::Inc
            | Token::Dec
            | Token::Typeof
            | Token::Void
            | Token::New
            | Token::Await
            | Token::Delete
    )
}

/// Whether `text` is a plain identifier.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(is_identifier_start) && chars.all(is_identifier_part)
}

/// The binding name a bare `import 'path'` introduces.
///
/// The file basename without its extension, with `.` and `-` replaced by
/// `_`. `None` when that is not a legal identifier.
pub fn module_binding_name(path: &str) -> Option<String> {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match base.rfind('.') {
        Some(index) => &base[..index],
        None => base,
    };
    let name: String = stem
        .chars()
        .map(|ch| if ch == '.' || ch == '-' { '_' } else { ch })
        .collect();
    if is_identifier(&name) && Token::from_keyword(&name).is_none() {
        Some(name)
    } else {
        None
    }
}
